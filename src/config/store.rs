use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A wrapper for the token store configuration:
/// - persistent: if false, tokens only live in memory for this process (MemoryStore).
/// - backend: the on-disk backend used when persistent.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct StoreConfig {
    pub persistent: bool,
    #[serde(flatten)]
    pub backend: Option<StoreBackend>,
}

/// The existing persistent backends, told apart by a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreBackend {
    #[serde(rename = "file")]
    File(FileStoreConfig),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct FileStoreConfig {
    /// Location of the JSON token file. Defaults to `<config dir>/bookshelf/tokens.json`.
    pub path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persistent: true,
            backend: Some(StoreBackend::File(FileStoreConfig::default())),
        }
    }
}
