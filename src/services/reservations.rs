use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::models::{DateRangeSelection, Reservation, ReservationStatus};
use crate::services::credentials::CredentialProvider;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub professional_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Submission-time validation: a booking attempt with a missing start or end
/// is rejected here, before any network call is made.
pub fn reservation_draft(
    professional_id: &str,
    date: NaiveDate,
    start_time: Option<&str>,
    end_time: Option<&str>,
    message: Option<String>,
) -> Result<NewReservation, ClientError> {
    match (start_time, end_time) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => Ok(NewReservation {
            professional_id: professional_id.to_string(),
            date,
            start_time: start.to_string(),
            end_time: end.to_string(),
            message,
        }),
        _ => Err(ClientError::IncompleteSelection),
    }
}

impl DateRangeSelection {
    /// Builds the create-reservation payload from a completed picker range.
    pub fn into_request(self, professional_id: &str, message: Option<String>) -> NewReservation {
        NewReservation {
            professional_id: professional_id.to_string(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            message,
        }
    }
}

#[async_trait]
pub trait ReservationService: Send + Sync {
    async fn create(&self, request: &NewReservation) -> Result<Reservation, ClientError>;
    async fn update_status(&self, id: &str, status: ReservationStatus) -> Result<(), ClientError>;
    async fn cancel(&self, id: &str) -> Result<(), ClientError>;
}

pub struct HttpReservationClient {
    base_url: String,
    timeout: Duration,
    credentials: Arc<dyn CredentialProvider>,
    client: reqwest::Client,
}

impl HttpReservationClient {
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

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header("x-request-id", Uuid::new_v4().to_string())
            .timeout(self.timeout);
        if let Some(token) = self.credentials.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

/// Surfaces the collaborator's own message on a non-success response,
/// falling back to a generic rejection when the body carries none.
async fn rejection(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let detail = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .or_else(|| body.get("error"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| format!("the booking service returned {status}"));
    ClientError::Rejected(detail)
}

#[async_trait]
impl ReservationService for HttpReservationClient {
    async fn create(&self, request: &NewReservation) -> Result<Reservation, ClientError> {
        let url = format!("{}/reservations", self.base_url);
        let response = self
            .request(reqwest::Method::POST, url)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(response.json().await?)
    }

    async fn update_status(&self, id: &str, status: ReservationStatus) -> Result<(), ClientError> {
        let url = format!("{}/reservations/{}/status", self.base_url, id);
        let response = self
            .request(reqwest::Method::PUT, url)
            .json(&serde_json::json!({ "status": status.as_str() }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }

    async fn cancel(&self, id: &str) -> Result<(), ClientError> {
        let url = format!("{}/reservations/{}", self.base_url, id);
        let response = self.request(reqwest::Method::DELETE, url).send().await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        "2025-06-10".parse().unwrap()
    }

    #[test]
    fn test_draft_requires_both_times() {
        assert!(matches!(
            reservation_draft("pro-1", day(), None, Some("10:00"), None),
            Err(ClientError::IncompleteSelection)
        ));
        assert!(matches!(
            reservation_draft("pro-1", day(), Some("09:00"), None, None),
            Err(ClientError::IncompleteSelection)
        ));
        assert!(matches!(
            reservation_draft("pro-1", day(), Some(""), Some("10:00"), None),
            Err(ClientError::IncompleteSelection)
        ));
    }

    #[test]
    fn test_draft_builds_request() {
        let draft =
            reservation_draft("pro-1", day(), Some("09:00"), Some("10:30"), None).unwrap();
        assert_eq!(draft.professional_id, "pro-1");
        assert_eq!(draft.start_time, "09:00");
        assert_eq!(draft.end_time, "10:30");
    }

    #[test]
    fn test_selection_into_request() {
        let selection = DateRangeSelection {
            date: day(),
            start_time: "09:00".to_string(),
            end_time: "10:30".to_string(),
        };
        let request = selection.into_request("pro-1", Some("first session".to_string()));
        assert_eq!(request.date, day());
        assert_eq!(request.message.as_deref(), Some("first session"));
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let draft =
            reservation_draft("pro-1", day(), Some("09:00"), Some("10:30"), None).unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["professionalId"], "pro-1");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:30");
        assert!(json.get("message").is_none());
    }
}
