use std::env;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub auth_token: String,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            auth_token: String::new(),
            request_timeout_secs: 30,
        }
    }

    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8800/api".to_string()),
            auth_token: env::var("AUTH_TOKEN").unwrap_or_default(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}
