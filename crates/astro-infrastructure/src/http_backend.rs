//! HttpBackend - REST implementation of the Astro backend API.
//!
//! Every request carries the session's bearer token. Responses are the
//! backend's authoritative copy of the affected fields.

use astro_core::achievement::Achievement;
use astro_core::backend::BackendApi;
use astro_core::config::ApiConfig;
use astro_core::error::{AstroError, Result};
use astro_core::notification::Notification;
use astro_core::user::{TextSpeed, UserProfile};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend client over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IncrementNotificationsRequest<'a> {
    user_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncrementNotificationsResponse {
    new_notifications_count: Vec<Notification>,
}

#[derive(Debug, Serialize)]
struct UnlockBadgeRequest<'a> {
    badge: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
struct NamePayload {
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextSpeedRequest {
    text_speed: TextSpeed,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextSpeedResponse {
    text_speed: u32,
}

impl HttpBackend {
    /// Creates a client against `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url, config.timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn user_url(&self, self_id: &str, resource: &str) -> String {
        self.url(&format!("/user/{}/{}", self_id, resource))
    }

    fn auth_request(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.bearer_auth(token).timeout(self.timeout)
    }

    /// Sends the request and decodes a JSON body, mapping failures onto
    /// [`AstroError`].
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| AstroError::network(format!("{} request failed: {}", what, e)))?;
        let response = Self::check_status(response).await?;
        response.json::<T>().await.map_err(|e| AstroError::Serialization {
            format: "JSON".to_string(),
            message: format!("Failed to parse {} response: {}", what, e),
        })
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(AstroError::backend(status.as_u16(), error_text))
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn current_user(&self, token: &str) -> Result<UserProfile> {
        let request = self.auth_request(self.client.post(self.url("/current-user")), token);
        let profile: UserProfile = self.send_json(request, "current-user").await?;
        tracing::debug!(user_id = %profile.id, "fetched current user");
        Ok(profile)
    }

    async fn increment_notifications(
        &self,
        token: &str,
        self_id: &str,
        source_user_id: &str,
        message: &str,
    ) -> Result<Vec<Notification>> {
        let body = IncrementNotificationsRequest {
            user_id: source_user_id,
            message,
        };
        let request = self.auth_request(
            self.client
                .put(self.user_url(self_id, "notifications"))
                .json(&body),
            token,
        );
        let response: IncrementNotificationsResponse =
            self.send_json(request, "increment-notifications").await?;
        Ok(response.new_notifications_count)
    }

    async fn unlock_badge(
        &self,
        token: &str,
        self_id: &str,
        achievement: Achievement,
    ) -> Result<bool> {
        let flag = achievement.flag_name();
        let request = self.auth_request(
            self.client
                .put(self.user_url(self_id, "badges"))
                .json(&UnlockBadgeRequest { badge: flag }),
            token,
        );
        let response: serde_json::Value = self.send_json(request, "unlock-badge").await?;
        response
            .get(flag)
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| AstroError::Serialization {
                format: "JSON".to_string(),
                message: format!("unlock-badge response is missing boolean '{}'", flag),
            })
    }

    async fn update_user_name(&self, token: &str, self_id: &str, name: &str) -> Result<String> {
        let request = self.auth_request(
            self.client.put(self.user_url(self_id, "name")).json(&NamePayload {
                name: name.to_string(),
            }),
            token,
        );
        let response: NamePayload = self.send_json(request, "update-name").await?;
        Ok(response.name)
    }

    async fn update_text_speed(
        &self,
        token: &str,
        self_id: &str,
        speed: TextSpeed,
    ) -> Result<u32> {
        let request = self.auth_request(
            self.client
                .put(self.user_url(self_id, "text-speed"))
                .json(&TextSpeedRequest { text_speed: speed }),
            token,
        );
        let response: TextSpeedResponse = self.send_json(request, "update-text-speed").await?;
        Ok(response.text_speed)
    }
}
