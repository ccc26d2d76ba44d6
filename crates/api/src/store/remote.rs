//! Project source backed by another instance of this admin API.
//!
//! Signs in through the remote login form, keeps the `admin_auth` cookie it
//! receives, and replays it on every call. A 401 triggers one fresh sign-in
//! and a single retry.

use std::time::Duration;

use async_trait::async_trait;
use portfolio_core::project::{Project, ProjectDraft};
use portfolio_core::types::ProjectId;
use reqwest::header::COOKIE;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tokio::sync::Mutex;

use super::{ProjectSource, SourceError};
use crate::auth::cookie::{token_from_set_cookie, SESSION_COOKIE};
use crate::response::StatusResponse;

/// HTTP request timeout for a single call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpProjectSource {
    client: reqwest::Client,
    base_url: String,
    password: String,
    /// `admin_auth=<token>` once signed in.
    session: Mutex<Option<String>>,
}

/// Body of `POST /admin/api/projects`. Without `id` the remote creates.
#[derive(Serialize)]
struct SaveBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a ProjectId>,
    #[serde(flatten)]
    draft: &'a ProjectDraft,
}

impl HttpProjectSource {
    /// Create a source for the instance at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, password: impl Into<String>) -> Self {
        // Redirects must not be followed: the login cookie rides on the 303.
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            password: password.into(),
            session: Mutex::new(None),
        }
    }

    fn projects_url(&self) -> String {
        format!("{}/admin/api/projects", self.base_url)
    }

    /// Sign in and remember the new session cookie.
    async fn sign_in(&self, session: &mut Option<String>) -> Result<String, SourceError> {
        let response = self
            .client
            .post(format!("{}/admin/login", self.base_url))
            .form(&[("password", self.password.as_str())])
            .send()
            .await?;

        let status = response.status();
        let Some(token) = token_from_set_cookie(response.headers()) else {
            tracing::warn!(status = status.as_u16(), "Remote sign-in returned no session cookie");
            return Err(SourceError::SignIn);
        };
        tracing::debug!(base_url = %self.base_url, "Signed in to remote admin API");

        let cookie = format!("{SESSION_COOKIE}={token}");
        *session = Some(cookie.clone());
        Ok(cookie)
    }

    /// Send an authorized request built by `build`, re-authenticating once on 401.
    async fn send<F>(&self, build: F) -> Result<Response, SourceError>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder + Send + Sync,
    {
        let mut session = self.session.lock().await;
        let cookie = match session.as_ref() {
            Some(cookie) => cookie.clone(),
            None => self.sign_in(&mut session).await?,
        };

        let response = build(&self.client).header(COOKIE, cookie).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!("Remote session rejected, signing in again");
        let cookie = self.sign_in(&mut session).await?;
        Ok(build(&self.client).header(COOKIE, cookie).send().await?)
    }

    async fn save(&self, body: &SaveBody<'_>) -> Result<Response, SourceError> {
        let url = self.projects_url();
        self.send(|client| client.post(&url).json(body)).await
    }
}

/// Parse a `{status, ...}` reply and fail on `"error"`.
async fn status_reply(response: Response) -> Result<StatusResponse, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::HttpStatus(status.as_u16()));
    }
    let reply: StatusResponse = response.json().await?;
    if reply.is_error() {
        return Err(SourceError::Rejected(
            reply.error.unwrap_or_else(|| "unknown error".into()),
        ));
    }
    Ok(reply)
}

#[async_trait]
impl ProjectSource for HttpProjectSource {
    async fn fetch(&self) -> Result<Option<Vec<Project>>, SourceError> {
        let url = self.projects_url();
        let response = self.send(|client| client.get(&url)).await?;
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status().as_u16()));
        }
        Ok(Some(response.json().await?))
    }

    async fn insert(&self, draft: ProjectDraft) -> Result<ProjectId, SourceError> {
        let response = self.save(&SaveBody { id: None, draft: &draft }).await?;
        status_reply(response)
            .await?
            .id
            .ok_or_else(|| SourceError::Rejected("reply carried no project id".into()))
    }

    async fn replace(&self, id: &ProjectId, draft: ProjectDraft) -> Result<bool, SourceError> {
        let response = self
            .save(&SaveBody {
                id: Some(id),
                draft: &draft,
            })
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        status_reply(response).await?;
        Ok(true)
    }

    async fn remove(&self, id: &ProjectId) -> Result<(), SourceError> {
        let url = self.projects_url();
        let response = self
            .send(|client| client.delete(&url).query(&[("id", id.as_str())]))
            .await?;
        status_reply(response).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
