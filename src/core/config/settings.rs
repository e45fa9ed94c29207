use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Immutable snapshot of the runtime settings.
///
/// A settings change never mutates a live snapshot; the server builds a new
/// pipeline from the new snapshot and swaps it in wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Generation model identifier, e.g. "gpt-4o" or "llama3:8b".
    #[serde(default = "default_llm_model_name")]
    pub llm_model_name: String,
    /// Generation backend kind: "cloud" or "local".
    #[serde(default = "default_kind")]
    pub llm_model_type: String,
    /// Embedding provider kind: "local" or "cloud".
    #[serde(default = "default_kind")]
    pub embedding_model_name: String,
    /// Number of neighbors retrieved per query.
    #[serde(default = "default_num_relevant_docs")]
    pub num_relevant_docs: usize,
    /// API credential for the cloud backends. Stored in the secrets file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_credential: Option<String>,
    /// Vector index location; defaults to `<data dir>/index.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_path: Option<PathBuf>,
    #[serde(default = "default_cloud_base_url")]
    pub cloud_base_url: String,
    #[serde(default = "default_local_base_url")]
    pub local_base_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            llm_model_name: default_llm_model_name(),
            llm_model_type: default_kind(),
            embedding_model_name: default_kind(),
            num_relevant_docs: default_num_relevant_docs(),
            api_credential: None,
            index_path: None,
            cloud_base_url: default_cloud_base_url(),
            local_base_url: default_local_base_url(),
        }
    }
}

fn default_llm_model_name() -> String {
    "llama3:8b".to_string()
}

fn default_kind() -> String {
    "local".to_string()
}

fn default_num_relevant_docs() -> usize {
    3
}

fn default_cloud_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_local_base_url() -> String {
    "http://localhost:11434".to_string()
}
