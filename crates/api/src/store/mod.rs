//! Project store: the in-memory snapshot of portfolio projects and its
//! synchronization with a backing [`ProjectSource`].
//!
//! Every mutation goes through the source and is followed by a reload, so the
//! snapshot always reflects what the source holds. When the write succeeded
//! but the reload did not, the snapshot is patched locally instead.

pub mod kv;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use portfolio_core::clock::Clock;
use portfolio_core::error::CoreError;
use portfolio_core::project::{default_project, format_date, Project, ProjectDraft};
use portfolio_core::types::ProjectId;
use tokio::sync::RwLock;

pub use kv::KvProjectSource;
pub use remote::HttpProjectSource;

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Failure talking to a backing source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored project list is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Remote returned HTTP {0}")]
    HttpStatus(u16),

    /// The remote replied with `{"status": "error"}`.
    #[error("Remote rejected the request: {0}")]
    Rejected(String),

    #[error("Could not sign in to the remote admin API")]
    SignIn,

    /// More than one stored record carries the id.
    #[error("Duplicate project id {0}")]
    DuplicateId(ProjectId),
}

/// Where the authoritative project list lives.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// The stored list, newest first. `None` when nothing was ever stored.
    async fn fetch(&self) -> Result<Option<Vec<Project>>, SourceError>;

    /// Store a new project and return the id it was given.
    async fn insert(&self, draft: ProjectDraft) -> Result<ProjectId, SourceError>;

    /// Replace the editable fields of `id`. `Ok(false)` when `id` is unknown.
    async fn replace(&self, id: &ProjectId, draft: ProjectDraft) -> Result<bool, SourceError>;

    /// Remove `id`. Removing an absent id succeeds.
    async fn remove(&self, id: &ProjectId) -> Result<(), SourceError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// ProjectStore
// ---------------------------------------------------------------------------

pub struct ProjectStore {
    source: Arc<dyn ProjectSource>,
    clock: Arc<dyn Clock>,
    snapshot: RwLock<Vec<Project>>,
}

impl ProjectStore {
    pub fn new(source: Arc<dyn ProjectSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Public listing. Never fails: an empty-never-written, unreachable, or
    /// malformed source yields the built-in default project.
    pub async fn load(&self) -> Vec<Project> {
        let list = match self.source.fetch().await {
            Ok(Some(list)) => list,
            Ok(None) => {
                tracing::debug!(source = self.source.name(), "No projects stored yet, using default");
                vec![default_project(self.clock.now())]
            }
            Err(err) => {
                tracing::warn!(
                    source = self.source.name(),
                    error = %err,
                    "Failed to load projects, using default"
                );
                vec![default_project(self.clock.now())]
            }
        };
        *self.snapshot.write().await = list.clone();
        list
    }

    /// Authoritative listing without fallback. A list that was never stored
    /// is empty.
    pub async fn reload(&self) -> Result<Vec<Project>, CoreError> {
        let list = self
            .source
            .fetch()
            .await
            .map_err(|e| self.persistence_failure("reload", e))?
            .unwrap_or_default();
        *self.snapshot.write().await = list.clone();
        Ok(list)
    }

    pub async fn find(&self, id: &ProjectId) -> Result<Option<Project>, CoreError> {
        Ok(self.reload().await?.into_iter().find(|p| &p.id == id))
    }

    /// The list as of the last load, reload, or mutation.
    pub async fn snapshot(&self) -> Vec<Project> {
        self.snapshot.read().await.clone()
    }

    pub async fn create(&self, draft: ProjectDraft) -> Result<ProjectId, CoreError> {
        let draft = draft.normalized();
        draft.validate()?;

        let id = self
            .source
            .insert(draft.clone())
            .await
            .map_err(|e| self.persistence_failure("create", e))?;
        tracing::info!(id = %id, title = %draft.title, "Project created");

        let local = draft.into_project(id.clone(), format_date(self.clock.now()));
        self.reconcile(move |list| list.insert(0, local)).await;
        Ok(id)
    }

    /// Replace every editable field of `id`. `id` and the creation date stay.
    pub async fn update(&self, id: &ProjectId, draft: ProjectDraft) -> Result<(), CoreError> {
        let draft = draft.normalized();
        draft.validate()?;

        let found = self
            .source
            .replace(id, draft.clone())
            .await
            .map_err(|e| self.persistence_failure("update", e))?;
        if !found {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: id.to_string(),
            });
        }
        tracing::info!(id = %id, "Project updated");

        self.reconcile(|list| {
            if let Some(project) = list.iter_mut().find(|p| &p.id == id) {
                project.apply(draft);
            }
        })
        .await;
        Ok(())
    }

    /// Remove `id`. Deleting an absent id is a no-op.
    pub async fn delete(&self, id: &ProjectId) -> Result<(), CoreError> {
        self.source
            .remove(id)
            .await
            .map_err(|e| self.persistence_failure("delete", e))?;
        tracing::info!(id = %id, "Project deleted");

        self.reconcile(|list| list.retain(|p| &p.id != id)).await;
        Ok(())
    }

    /// Refresh the snapshot from the source after a successful write, or
    /// apply `patch` to it when the source cannot be read back.
    async fn reconcile(&self, patch: impl FnOnce(&mut Vec<Project>)) {
        match self.source.fetch().await {
            Ok(list) => *self.snapshot.write().await = list.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(
                    source = self.source.name(),
                    error = %err,
                    "Reload after write failed, patching snapshot locally"
                );
                patch(&mut *self.snapshot.write().await);
            }
        }
    }

    fn persistence_failure(&self, action: &str, err: SourceError) -> CoreError {
        if let SourceError::DuplicateId(id) = &err {
            tracing::warn!(source = self.source.name(), action, id = %id, "Duplicate project id in storage");
            return CoreError::Conflict(format!("More than one project has id {id}"));
        }
        tracing::error!(source = self.source.name(), action, error = %err, "Project storage failure");
        CoreError::Persistence(err.to_string())
    }
}
