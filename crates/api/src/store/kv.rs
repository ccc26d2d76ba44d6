//! Project source backed by the local key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use portfolio_core::clock::Clock;
use portfolio_core::project::{format_date, generate_id, Project, ProjectDraft};
use portfolio_core::session::KEY_PROJECTS;
use portfolio_core::types::ProjectId;
use portfolio_db::repositories::KvRepo;
use portfolio_db::DbPool;
use tokio::sync::Mutex;

use super::{ProjectSource, SourceError};

/// The whole list is one JSON array under [`KEY_PROJECTS`], newest first.
pub struct KvProjectSource {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl KvProjectSource {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<Option<Vec<Project>>, SourceError> {
        match KvRepo::get(&self.pool, KEY_PROJECTS).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write(&self, list: &[Project]) -> Result<(), SourceError> {
        let raw = serde_json::to_string(list)?;
        KvRepo::set(&self.pool, KEY_PROJECTS, &raw, self.clock.now()).await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectSource for KvProjectSource {
    async fn fetch(&self) -> Result<Option<Vec<Project>>, SourceError> {
        self.read().await
    }

    async fn insert(&self, draft: ProjectDraft) -> Result<ProjectId, SourceError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.read().await?.unwrap_or_default();
        let now = self.clock.now();
        let id = generate_id(now, &list);
        list.insert(0, draft.into_project(id.clone(), format_date(now)));
        self.write(&list).await?;
        Ok(id)
    }

    async fn replace(&self, id: &ProjectId, draft: ProjectDraft) -> Result<bool, SourceError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.read().await?.unwrap_or_default();
        match list.iter().filter(|p| &p.id == id).count() {
            0 => return Ok(false),
            1 => {}
            _ => return Err(SourceError::DuplicateId(id.clone())),
        }
        if let Some(project) = list.iter_mut().find(|p| &p.id == id) {
            project.apply(draft);
        }
        self.write(&list).await?;
        Ok(true)
    }

    async fn remove(&self, id: &ProjectId) -> Result<(), SourceError> {
        let _guard = self.write_lock.lock().await;
        let Some(mut list) = self.read().await? else {
            return Ok(());
        };
        let before = list.len();
        list.retain(|p| &p.id != id);
        if list.len() != before {
            self.write(&list).await?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "kv"
    }
}
