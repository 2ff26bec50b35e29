use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::ClientConfig;
use crate::services::credentials::CredentialProvider;

/// Raw weekly feed from the availability query service: ISO date keys, each
/// holding the day's marker strings ("HH:MM" free, "HH:MM*" reserved) in
/// whatever order the service returned them.
pub type WeekAvailability = BTreeMap<String, Vec<String>>;

#[async_trait]
pub trait AvailabilityService: Send + Sync {
    async fn week_slots(
        &self,
        professional_id: &str,
        week_start: NaiveDate,
    ) -> anyhow::Result<WeekAvailability>;
}

pub struct HttpAvailabilityClient {
    base_url: String,
    timeout: Duration,
    credentials: Arc<dyn CredentialProvider>,
    client: reqwest::Client,
}

impl HttpAvailabilityClient {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            credentials,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        let mut client = Self::new(config.api_base_url.clone(), credentials);
        client.timeout = Duration::from_secs(config.request_timeout_secs);
        client
    }
}

#[async_trait]
impl AvailabilityService for HttpAvailabilityClient {
    async fn week_slots(
        &self,
        professional_id: &str,
        week_start: NaiveDate,
    ) -> anyhow::Result<WeekAvailability> {
        let url = format!("{}/availability/{}", self.base_url, professional_id);

        let mut request = self
            .client
            .get(&url)
            .query(&[("week", week_start.format("%Y-%m-%d").to_string())])
            .timeout(self.timeout);

        if let Some(token) = self.credentials.bearer_token() {
            request = request.bearer_auth(token);
        }

        let week = request
            .send()
            .await
            .context("failed to call availability service")?
            .error_for_status()
            .context("availability service returned error")?
            .json()
            .await
            .context("failed to parse availability response")?;

        Ok(week)
    }
}
