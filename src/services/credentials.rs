/// Supplies the bearer token attached to collaborator requests. Injected
/// into the HTTP clients so the engine never reads ambient session state.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

pub struct StaticCredentials {
    token: String,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn bearer_token(&self) -> Option<String> {
        if self.token.is_empty() {
            None
        } else {
            Some(self.token.clone())
        }
    }
}

/// Anonymous access; requests carry no authorization header.
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}
