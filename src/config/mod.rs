use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model passed to the completion endpoint.
    pub model: String,
    /// Timeout for page and caption fetches, in seconds.
    pub fetch_timeout: u64,
    /// Timeout for the completion request, in seconds.
    pub llm_timeout: u64,
    pub user_agent: String,
    /// Restrict video identifiers to alphanumeric, dash, and underscore.
    pub strict_video_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "llama3-8b-8192".to_string(),
            fetch_timeout: 10,
            llm_timeout: 60,
            user_agent: format!("websum/{}", env!("CARGO_PKG_VERSION")),
            strict_video_ids: false,
        }
    }
}

impl Config {
    /// Reads the default credential from the environment, once at startup.
    /// Returns None when unset or blank; the credential is never required
    /// to come from the environment.
    pub fn api_key_from_env() -> Option<String> {
        std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
