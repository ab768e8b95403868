//! In-memory [`UserStore`] for tests

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    models::{NewUser, User},
    repositories::UserStore,
};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    next_id: i64,
}

/// Vec-backed user store with switchable failure injection
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<Mutex<Inner>>,
    failing: Arc<AtomicBool>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`DatabaseError::Unavailable`]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(&self) -> DatabaseResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        self.check()?;
        let mut inner = self.lock();
        if inner.users.iter().any(|u| u.username == new_user.username) {
            return Err(DatabaseError::Conflict(format!(
                "username {} already exists",
                new_user.username
            )));
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: new_user.username.clone(),
            full_name: new_user.full_name.clone(),
            password_hash: new_user.password_hash.clone(),
            role: new_user.role,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        self.check()?;
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> DatabaseResult<Vec<User>> {
        self.check()?;
        Ok(self.lock().users.clone())
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        self.check()?;
        let mut inner = self.lock();
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        Ok(inner.users.len() != before)
    }
}
