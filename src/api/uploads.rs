use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::ApiClient;
use crate::gateway::{ApiRequest, FilePart, GatewayError};
use crate::models::{IngestionLog, MessageResponse, Page};

const UPLOAD_PATH: &str = "/api/upload-csv/";
const INGESTION_LOGS_PATH: &str = "/api/ingestion-logs/";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("only .csv files can be uploaded, got '{0}'")]
    NotCsv(String),
    #[error("could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

fn is_csv(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

impl ApiClient {
    /// Hand a CSV file to the server for background ingestion.
    pub async fn upload_csv(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<MessageResponse, UploadError> {
        if !is_csv(file_name) {
            return Err(UploadError::NotCsv(file_name.to_string()));
        }

        let size = bytes.len();
        let request = ApiRequest::post(UPLOAD_PATH).with_file(FilePart {
            field_name: "file".to_string(),
            file_name: file_name.to_string(),
            mime: "text/csv".to_string(),
            bytes,
        });
        let accepted: MessageResponse = self.gateway().send_json(request).await?;
        info!(file_name, size, "CSV upload accepted");
        Ok(accepted)
    }

    /// Read `path` from disk and upload it.
    pub async fn upload_csv_file(&self, path: &Path) -> Result<MessageResponse, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_csv(&file_name) {
            return Err(UploadError::NotCsv(path.display().to_string()));
        }
        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.upload_csv(&file_name, bytes).await
    }

    pub async fn list_ingestion_logs(&self) -> Result<Page<IngestionLog>, GatewayError> {
        self.gateway()
            .send_json(ApiRequest::get(INGESTION_LOGS_PATH))
            .await
    }
}
