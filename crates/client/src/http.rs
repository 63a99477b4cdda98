//! Typed HTTP client for the `/api/v1` surface.
//!
//! Thin wrapper over [`reqwest`]: every method maps to one route,
//! failures surface the server's `{ error, code }` body when present.

use serde::Deserialize;
use serde_json::Value;

use taskdeck_core::entities::{
    CreateNote, CreateProject, CreateTask, CreateTaskNote, Note, Project, Summary, Task, TaskNote,
    TaskStatus, UpdateProject, UpdateTask, User,
};
use taskdeck_core::types::EntityId;

/// Errors from the API client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided error message, or the raw body.
        message: String,
    },
}

/// Token and user payload returned by signup and login.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Response of `POST /projects/{id}/share`.
#[derive(Debug, Deserialize)]
pub struct ShareResponse {
    pub share_url: String,
    pub share_id: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// HTTP client for a single taskdeck server.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create an unauthenticated client.
    ///
    /// * `base_url` - Server origin including the API prefix, e.g.
    ///   `http://localhost:8080/api/v1`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// Attach the bearer token used for authenticated routes.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    // -- auth ----------------------------------------------------------------

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        let response = self
            .request(reqwest::Method::POST, "/auth/signup")
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/logout")
            .send()
            .await?;
        Self::check(response).await
    }

    // -- projects ------------------------------------------------------------

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/projects").send().await?;
        Self::parse(response).await
    }

    pub async fn create_project(&self, input: &CreateProject) -> Result<Project, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/projects")
            .json(input)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn get_project(&self, id: EntityId) -> Result<Project, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/projects/{id}"))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn update_project(
        &self,
        id: EntityId,
        input: &UpdateProject,
    ) -> Result<Project, ClientError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/projects/{id}"))
            .json(input)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_project(&self, id: EntityId) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/projects/{id}"))
            .send()
            .await?;
        Self::check(response).await
    }

    pub async fn share_project(&self, id: EntityId) -> Result<ShareResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, &format!("/projects/{id}/share"))
            .send()
            .await?;
        Self::parse(response).await
    }

    // -- tasks ---------------------------------------------------------------

    /// Every task across the caller's projects, for summary assembly.
    pub async fn list_all_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/tasks").send().await?;
        Self::parse(response).await
    }

    pub async fn list_tasks(&self, project_id: EntityId) -> Result<Vec<Task>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/projects/{project_id}/tasks"))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn create_task(&self, input: &CreateTask) -> Result<Task, ClientError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/projects/{}/tasks", input.project_id),
            )
            .json(input)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn update_task(
        &self,
        id: EntityId,
        input: &UpdateTask,
    ) -> Result<Task, ClientError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/tasks/{id}"))
            .json(input)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn set_task_status(
        &self,
        id: EntityId,
        status: TaskStatus,
    ) -> Result<Task, ClientError> {
        let body = serde_json::json!({ "status": status });
        let response = self
            .request(reqwest::Method::PATCH, &format!("/tasks/{id}/status"))
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_task(&self, id: EntityId) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/tasks/{id}"))
            .send()
            .await?;
        Self::check(response).await
    }

    // -- notes ---------------------------------------------------------------

    pub async fn list_notes(&self, project_id: EntityId) -> Result<Vec<Note>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/projects/{project_id}/notes"))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn create_note(&self, input: &CreateNote) -> Result<Note, ClientError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/projects/{}/notes", input.project_id),
            )
            .json(input)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn list_task_notes(&self, task_id: EntityId) -> Result<Vec<TaskNote>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/tasks/{task_id}/notes"))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn create_task_note(&self, input: &CreateTaskNote) -> Result<TaskNote, ClientError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/tasks/{}/notes", input.task_id),
            )
            .json(input)
            .send()
            .await?;
        Self::parse(response).await
    }

    // -- summary -------------------------------------------------------------

    /// Call the server-side generative proxy with a finished prompt.
    /// Returns the provider's raw JSON result on success.
    pub async fn proxy_summary(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<Value, ClientError> {
        let body = serde_json::json!({ "prompt": prompt, "model": model });
        let response = self
            .request(reqwest::Method::POST, "/ai/summary")
            .json(&body)
            .send()
            .await?;
        let envelope: Value = Self::parse(response).await?;
        Ok(envelope.get("result").cloned().unwrap_or(envelope))
    }

    /// Overwrite the caller's stored summary text.
    pub async fn put_summary(&self, summary: &str) -> Result<Summary, ClientError> {
        let body = serde_json::json!({ "summary": summary });
        let response = self
            .request(reqwest::Method::PUT, "/summary")
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn get_summary(&self) -> Result<Option<Summary>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/summary").send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse(response).await.map(Some)
    }
}
