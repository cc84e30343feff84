//! In-memory implementation of the UserRepository port for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{NewUser, User, UserId},
    ports::outbound::{StorageError, UserRepository},
};

const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<UserId, User>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

/// Users table backed by a `BTreeMap`, with the same email constraint as the
/// PostgreSQL schema. The check and the write happen under one lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table>,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like an unreachable database.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("connection refused".to_string()));
        }
        Ok(())
    }
}

fn unique_violation() -> StorageError {
    StorageError::UniqueViolation {
        constraint: EMAIL_CONSTRAINT.to_string(),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, StorageError> {
        self.check_available()?;
        let mut table = self.table.write().unwrap();

        if table.email_taken(user.email(), None) {
            return Err(unique_violation());
        }

        table.next_id += 1;
        let now = OffsetDateTime::now_utc();
        let stored = User {
            id: UserId::new(table.next_id),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<User>, StorageError> {
        self.check_available()?;
        Ok(self.table.read().unwrap().rows.values().cloned().collect())
    }

    async fn find(&self, id: UserId) -> Result<Option<User>, StorageError> {
        self.check_available()?;
        Ok(self.table.read().unwrap().rows.get(&id).cloned())
    }

    async fn update(&self, id: UserId, user: &NewUser) -> Result<Option<User>, StorageError> {
        self.check_available()?;
        let mut table = self.table.write().unwrap();

        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.email_taken(user.email(), Some(id)) {
            return Err(unique_violation());
        }

        let Some(stored) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        stored.name = user.name().to_string();
        stored.email = user.email().to_string();
        stored.updated_at = OffsetDateTime::now_utc();

        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, StorageError> {
        self.check_available()?;
        Ok(self.table.write().unwrap().rows.remove(&id).is_some())
    }
}
