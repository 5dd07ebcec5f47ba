//! In-Memory Nominee Repository
//!
//! Process-local nominee storage used by the `memory` storage backend and by
//! tests. A session holds the store lock for its whole lifetime and works on
//! a private copy, which replaces the shared state on commit.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::StorageProbe;
use crate::domain::{Nominee, NomineeRepository, NomineeSession};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Default)]
struct MemoryState {
    applications: BTreeSet<i64>,
    nominees: BTreeMap<i64, Nominee>,
}

/// In-memory implementation of the NomineeRepository.
#[derive(Clone, Default)]
pub struct InMemoryNomineeRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryNomineeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that knows the given loan applications.
    pub fn with_applications(application_ids: impl IntoIterator<Item = i64>) -> Self {
        let state = MemoryState {
            applications: application_ids.into_iter().collect(),
            nominees: BTreeMap::new(),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Number of stored nominees.
    pub async fn nominee_count(&self) -> usize {
        self.state.lock().await.nominees.len()
    }
}

#[async_trait]
impl NomineeRepository for InMemoryNomineeRepository {
    type Session = InMemoryNomineeSession;

    async fn begin(&self) -> Result<InMemoryNomineeSession, AppError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryNomineeSession { guard, working })
    }
}

#[async_trait]
impl StorageProbe for InMemoryNomineeRepository {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// A session over the in-memory store.
pub struct InMemoryNomineeSession {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl NomineeSession for InMemoryNomineeSession {
    async fn application_exists(&mut self, application_id: i64) -> Result<bool, AppError> {
        Ok(self.working.applications.contains(&application_id))
    }

    async fn find_by_application_id(
        &mut self,
        application_id: i64,
    ) -> Result<Vec<Nominee>, AppError> {
        Ok(self
            .working
            .nominees
            .values()
            .filter(|n| n.application_id == application_id)
            .cloned()
            .collect())
    }

    async fn find_by_id_and_application_id(
        &mut self,
        id: i64,
        application_id: i64,
    ) -> Result<Option<Nominee>, AppError> {
        Ok(self
            .working
            .nominees
            .get(&id)
            .filter(|n| n.application_id == application_id)
            .cloned())
    }

    async fn insert(&mut self, nominee: &Nominee) -> Result<Nominee, AppError> {
        let duplicate = self.working.nominees.contains_key(&nominee.id)
            || self
                .working
                .nominees
                .values()
                .any(|n| n.application_id == nominee.application_id);
        if duplicate {
            return Err(AppError::Conflict("Record already exists".into()));
        }

        let now = Utc::now();
        let mut created = nominee.clone();
        created.created_at = now;
        created.updated_at = now;
        self.working.nominees.insert(created.id, created.clone());

        Ok(created)
    }

    async fn save(&mut self, nominee: &Nominee) -> Result<Nominee, AppError> {
        let now = Utc::now();
        let mut saved = nominee.clone();
        saved.created_at = self
            .working
            .nominees
            .get(&nominee.id)
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        saved.updated_at = now;
        self.working.nominees.insert(saved.id, saved.clone());

        Ok(saved)
    }

    async fn update(&mut self, nominee: &Nominee) -> Result<Option<Nominee>, AppError> {
        let Some(existing) = self
            .working
            .nominees
            .get_mut(&nominee.id)
            .filter(|n| n.application_id == nominee.application_id)
        else {
            return Ok(None);
        };

        existing.apply(nominee.fields());
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id_and_application_id(
        &mut self,
        id: i64,
        application_id: i64,
    ) -> Result<u64, AppError> {
        let owned = self
            .working
            .nominees
            .get(&id)
            .is_some_and(|n| n.application_id == application_id);
        if !owned {
            return Ok(0);
        }

        self.working.nominees.remove(&id);
        Ok(1)
    }

    async fn delete_by_application_id(&mut self, application_id: i64) -> Result<u64, AppError> {
        let before = self.working.nominees.len();
        self.working
            .nominees
            .retain(|_, n| n.application_id != application_id);
        Ok((before - self.working.nominees.len()) as u64)
    }

    async fn commit(mut self) -> Result<(), AppError> {
        *self.guard = self.working;
        Ok(())
    }
}
