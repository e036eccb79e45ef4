//! HTTP client for the meetgrid backend.

use meetgrid_core::session::{AvailabilityApi, BatchAction};
use meetgrid_core::{
    AvailabilityRequest, ClearRequest, EventDetails, EventSummary, LoginRequest, LoginResponse,
    MeetgridError, MeetgridResult,
};
use reqwest::{Method, StatusCode};

/// Marker the backend puts in its 404 body when the acting user no longer
/// exists. Distinguishes a stale identity from an ordinary not-found.
const STALE_USER_MARKER: &str = "Uzytkownik";

/// Thin wrapper over reqwest speaking the backend's JSON API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiClient {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /api/users/login
    pub async fn login(&self, name: &str) -> MeetgridResult<LoginResponse> {
        let response = self
            .http
            .post(self.url("/api/users/login"))
            .json(&LoginRequest {
                name: name.to_string(),
            })
            .send()
            .await
            .map_err(transport)?;

        json_body(response).await
    }

    /// GET /api/events
    pub async fn list_events(&self) -> MeetgridResult<Vec<EventSummary>> {
        let response = self
            .http
            .get(self.url("/api/events"))
            .send()
            .await
            .map_err(transport)?;

        json_body(response).await
    }
}

impl AvailabilityApi for ApiClient {
    /// GET /api/events/{id}
    async fn fetch_event(&self, public_id: &str) -> MeetgridResult<EventDetails> {
        let response = self
            .http
            .get(self.url(&format!("/api/events/{public_id}")))
            .send()
            .await
            .map_err(transport)?;

        json_body(response).await
    }

    /// POST|DELETE /api/events/{id}/availability — one call per batch
    async fn send_availability(
        &self,
        public_id: &str,
        action: BatchAction,
        request: &AvailabilityRequest,
    ) -> MeetgridResult<()> {
        let method = match action {
            BatchAction::Add => Method::POST,
            BatchAction::Remove => Method::DELETE,
        };
        let response = self
            .http
            .request(method, self.url(&format!("/api/events/{public_id}/availability")))
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        expect_success(response).await
    }

    /// DELETE /api/events/{id}/my-availability
    async fn clear_availability(
        &self,
        public_id: &str,
        request: &ClearRequest,
    ) -> MeetgridResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/events/{public_id}/my-availability")))
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        expect_success(response).await
    }
}

fn transport(err: reqwest::Error) -> MeetgridError {
    MeetgridError::Transport(err.to_string())
}

/// Turn a non-success response into the right error variant.
async fn api_error(response: reqwest::Response) -> MeetgridError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();

    if status == StatusCode::NOT_FOUND && message.contains(STALE_USER_MARKER) {
        return MeetgridError::StaleIdentity;
    }
    MeetgridError::Api {
        status: status.as_u16(),
        message,
    }
}

async fn expect_success(response: reqwest::Response) -> MeetgridResult<()> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}

async fn json_body<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> MeetgridResult<T> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| MeetgridError::Serialization(e.to_string()))
}
