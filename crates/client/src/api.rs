//! REST client for the folio API.

use folio_core::assets::ImageUpload;
use folio_core::contact::ContactMessage;
use folio_core::project::{IntegrityIssue, ProjectDraft, ProjectRecord};
use folio_core::types::DbId;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{message_from_body, ClientError};

/// `{ "data": T }` envelope used by the `/api/v1` endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Body of every `/api/contactus` reply.
#[derive(Debug, Deserialize)]
pub struct RelayReply {
    pub message: String,
    pub success: bool,
}

/// Response to `GET /api/v1/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectList {
    pub data: Vec<ProjectRecord>,
    #[serde(default)]
    pub integrity_errors: Vec<IntegrityIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    pub email: String,
    pub expires_at: i64,
}

/// HTTP client for one folio deployment.
///
/// Holds the session token after [`login`](Self::login) and sends it as a
/// Bearer token on admin calls.
#[derive(Debug, Clone)]
pub struct FolioClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl FolioClient {
    /// * `base_url` - Site root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ---- contact ----

    /// Send a contact message. Returns the relay's confirmation text.
    ///
    /// Non-2xx is a failure whatever the body says; so is a 2xx reply with
    /// `success: false`.
    pub async fn send_contact(&self, message: &ContactMessage) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/api/contactus"))
            .json(message)
            .send()
            .await?;

        let status = response.status().as_u16();
        let reply: RelayReply = Self::parse_response(response).await?;
        if reply.success {
            Ok(reply.message)
        } else {
            Err(ClientError::Api {
                status,
                message: reply.message,
            })
        }
    }

    // ---- auth ----

    /// Sign in and keep the returned session token.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let login: Envelope<LoginResponse> = Self::parse_response(response).await?;
        self.token = Some(login.data.access_token.clone());
        Ok(login.data)
    }

    pub async fn session(&self) -> Result<SessionInfo, ClientError> {
        let response = self
            .authorized(self.client.get(self.url("/api/v1/auth/session")))
            .send()
            .await?;
        let session: Envelope<SessionInfo> = Self::parse_response(response).await?;
        Ok(session.data)
    }

    /// Forget the session locally and ask the server to clear its cookie.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.token = None;
        let response = self
            .client
            .post(self.url("/api/v1/auth/logout"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- projects ----

    pub async fn list_projects(&self, query: Option<&str>) -> Result<ProjectList, ClientError> {
        let mut request = self.client.get(self.url("/api/v1/projects"));
        if let Some(q) = query.filter(|q| !q.trim().is_empty()) {
            request = request.query(&[("q", q)]);
        }
        Self::parse_response(request.send().await?).await
    }

    pub async fn get_project(&self, id: DbId) -> Result<ProjectRecord, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/v1/projects/{id}")))
            .send()
            .await?;
        let record: Envelope<ProjectRecord> = Self::parse_response(response).await?;
        Ok(record.data)
    }

    pub async fn create_project(
        &self,
        draft: &ProjectDraft,
        image: Option<&ImageUpload>,
    ) -> Result<ProjectRecord, ClientError> {
        let response = self
            .authorized(self.client.post(self.url("/api/v1/projects")))
            .multipart(submission_form(draft, image)?)
            .send()
            .await?;
        let record: Envelope<ProjectRecord> = Self::parse_response(response).await?;
        Ok(record.data)
    }

    /// Replace the project `id` in place.
    pub async fn update_project(
        &self,
        id: DbId,
        draft: &ProjectDraft,
        image: Option<&ImageUpload>,
    ) -> Result<ProjectRecord, ClientError> {
        let response = self
            .authorized(self.client.put(self.url(&format!("/api/v1/projects/{id}"))))
            .multipart(submission_form(draft, image)?)
            .send()
            .await?;
        let record: Envelope<ProjectRecord> = Self::parse_response(response).await?;
        Ok(record.data)
    }

    pub async fn delete_project(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .authorized(self.client.delete(self.url(&format!("/api/v1/projects/{id}"))))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, turning anything else
    /// into [`ClientError::Api`] with the body's message.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %body, "folio API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: message_from_body(&body),
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Multipart body for project writes: `project` JSON plus an optional `image`.
fn submission_form(draft: &ProjectDraft, image: Option<&ImageUpload>) -> Result<Form, ClientError> {
    let mut form = Form::new().text("project", serde_json::to_string(draft)?);
    if let Some(image) = image {
        form = form.part(
            "image",
            Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
        );
    }
    Ok(form)
}
