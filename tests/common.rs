#![allow(dead_code)]

use std::sync::Arc;

use bookshelf::config::{load_config_from_str, ConfigV1};
use bookshelf::startup::init_with_store;
use bookshelf::state::AppState;
use bookshelf::store::{MemoryStore, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use serde_json::{json, Value};

pub fn test_config(base_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: {base_url}
  timeout_in_ms: 5000
store:
  persistent: false
logging:
  level: "debug"
  format: "json"
"#
    );
    load_config_from_str(&yaml).expect("Failed to parse test config YAML")
}

/// App state against `base_url` with an in-memory store, optionally seeded with a token pair.
pub async fn build_state(base_url: &str, tokens: Option<(&str, &str)>) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    if let Some((access, refresh)) = tokens {
        store.set(ACCESS_TOKEN_KEY, access).await.unwrap();
        store.set(REFRESH_TOKEN_KEY, refresh).await.unwrap();
    }
    let state = init_with_store(test_config(base_url), store.clone()).expect("state should build");
    (state, store)
}

pub async fn stored(store: &MemoryStore, key: &str) -> Option<String> {
    store.get(key).await.expect("memory store never fails")
}

pub fn book_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "original_title": title,
        "authors": [{"name": "Somebody"}],
        "isbn": null,
        "isbn13": null,
        "average_rating": 4.0,
        "ratings_count": 10,
        "original_publication_year": 1999,
        "image_url": null,
        "small_image_url": null,
        "language_code": "eng",
        "goodreads_book_id": 2767052,
        "reserved": false
    })
}

pub fn page_json(results: Vec<Value>, count: u64, next: Option<String>) -> String {
    json!({
        "count": count,
        "next": next,
        "previous": null,
        "results": results,
    })
    .to_string()
}
