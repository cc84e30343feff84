use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{NewUser, User, UserId};

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A write would have broken a unique constraint, e.g. a taken email.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },
    #[error("{0}")]
    Backend(String),
}

/// Persistent store for users.
///
/// Implementations must reject a write that gives two users the same email
/// with [`StorageError::UniqueViolation`], atomically with the write itself.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn insert(&self, user: &NewUser) -> Result<User, StorageError>;

    /// All users in insertion order.
    async fn list(&self) -> Result<Vec<User>, StorageError>;

    async fn find(&self, id: UserId) -> Result<Option<User>, StorageError>;

    /// Returns `None` if no user has this id.
    async fn update(&self, id: UserId, user: &NewUser) -> Result<Option<User>, StorageError>;

    /// Returns whether a user was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, StorageError>;
}
