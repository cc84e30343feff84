use async_trait::async_trait;

use crate::domain::{
    models::{User, UserId},
    UserCandidate, UserError,
};

/// User lifecycle operations exposed to inbound adapters.
#[async_trait]
pub trait UserService: Send + Sync + 'static {
    async fn create_user(&self, candidate: UserCandidate) -> Result<User, UserError>;

    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// Replaces both fields of an existing user.
    async fn update_user(&self, id: UserId, candidate: UserCandidate) -> Result<User, UserError>;

    async fn delete_user(&self, id: UserId) -> Result<(), UserError>;
}
