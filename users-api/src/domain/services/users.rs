use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::domain::{
    models::{NewUser, User, UserId},
    normalize_and_validate,
    ports::{
        inbound::UserService,
        outbound::{StorageError, UserRepository},
    },
    UserCandidate, UserError,
};

pub struct UserServiceImpl<R> {
    repository: Arc<R>,
}

impl<R> UserServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

/// Maps a failed write of `user` into the domain error kind.
fn write_error(err: StorageError, user: &NewUser) -> UserError {
    match err {
        StorageError::UniqueViolation { .. } => UserError::Conflict {
            email: user.email().to_string(),
        },
        StorageError::Backend(msg) => UserError::Persistence(msg),
    }
}

fn read_error(err: StorageError) -> UserError {
    UserError::persistence(err.to_string())
}

#[async_trait]
impl<R: UserRepository> UserService for UserServiceImpl<R> {
    #[instrument(name = "user_service.create_user", skip(self))]
    async fn create_user(&self, candidate: UserCandidate) -> Result<User, UserError> {
        let new_user = normalize_and_validate(candidate)?;

        let user = self
            .repository
            .insert(&new_user)
            .await
            .map_err(|err| write_error(err, &new_user))?;

        info!(user_id = %user.id, "created user");
        Ok(user)
    }

    #[instrument(name = "user_service.list_users", skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        let users = self.repository.list().await.map_err(read_error)?;

        debug!("listed {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "user_service.get_user", skip(self))]
    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find(id)
            .await
            .map_err(read_error)?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(name = "user_service.update_user", skip(self))]
    async fn update_user(&self, id: UserId, candidate: UserCandidate) -> Result<User, UserError> {
        // An unknown id wins over an invalid body.
        self.get_user(id).await?;

        let new_user = normalize_and_validate(candidate)?;

        let user = self
            .repository
            .update(id, &new_user)
            .await
            .map_err(|err| write_error(err, &new_user))?
            .ok_or(UserError::NotFound(id))?;

        info!(user_id = %user.id, "updated user");
        Ok(user)
    }

    #[instrument(name = "user_service.delete_user", skip(self))]
    async fn delete_user(&self, id: UserId) -> Result<(), UserError> {
        let deleted = self.repository.delete(id).await.map_err(read_error)?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        info!(user_id = %id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::InMemoryUserRepository;
    use crate::domain::{RawField, ValidationError};

    fn service() -> UserServiceImpl<InMemoryUserRepository> {
        UserServiceImpl::new(Arc::new(InMemoryUserRepository::new()))
    }

    #[tokio::test]
    async fn create_stores_normalized_fields() {
        let service = service();

        let user = service
            .create_user(UserCandidate::new(" João ", "JOAO@Email.com "))
            .await
            .unwrap();

        assert_eq!(user.name, "João");
        assert_eq!(user.email, "joao@email.com");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn emails_differing_in_case_and_padding_conflict() {
        let service = service();
        service
            .create_user(UserCandidate::new("A", "dup@x.com"))
            .await
            .unwrap();

        let err = service
            .create_user(UserCandidate::new("B", "  DUP@X.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Conflict { email } if email == "dup@x.com"));
    }

    #[tokio::test]
    async fn concurrent_creates_with_same_email_admit_one() {
        let service = service();

        let (first, second) = tokio::join!(
            service.create_user(UserCandidate::new("A", "race@x.com")),
            service.create_user(UserCandidate::new("B", " RACE@x.com")),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(UserError::Conflict { email }) if email == "race@x.com"))
                .count(),
            1
        );
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_candidate_never_reaches_storage() {
        let service = service();

        let err = service
            .create_user(UserCandidate {
                name: RawField::NotAString,
                email: "test@email.com".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UserError::Validation(ValidationError::NotAString("name"))
        ));
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found_even_with_bad_body() {
        let service = service();

        let err = service
            .update_user(
                UserId::new(99999),
                UserCandidate {
                    name: "Non-existent User".into(),
                    email: RawField::Missing,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NotFound(id) if id == UserId::new(99999)));
    }

    #[tokio::test]
    async fn update_renormalizes_and_refreshes_updated_at() {
        let service = service();
        let created = service
            .create_user(UserCandidate::new("João", "joao@email.com"))
            .await
            .unwrap();

        let updated = service
            .update_user(
                created.id,
                UserCandidate::new(" João Atualizado ", "JoaoAtualizado@email.com"),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "João Atualizado");
        assert_eq!(updated.email, "joaoatualizado@email.com");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_keeping_own_email_is_not_a_conflict() {
        let service = service();
        let created = service
            .create_user(UserCandidate::new("A", "a@x.com"))
            .await
            .unwrap();

        let updated = service
            .update_user(created.id, UserCandidate::new("A2", "A@X.COM"))
            .await
            .unwrap();

        assert_eq!(updated.email, "a@x.com");
    }

    #[tokio::test]
    async fn update_taking_another_users_email_conflicts() {
        let service = service();
        service
            .create_user(UserCandidate::new("A", "a@x.com"))
            .await
            .unwrap();
        let b = service
            .create_user(UserCandidate::new("B", "b@x.com"))
            .await
            .unwrap();

        let err = service
            .update_user(b.id, UserCandidate::new("B", "a@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Conflict { .. }));
        assert_eq!(service.get_user(b.id).await.unwrap().email, "b@x.com");
    }

    #[tokio::test]
    async fn repeated_update_is_idempotent() {
        let service = service();
        let created = service
            .create_user(UserCandidate::new("A", "a@x.com"))
            .await
            .unwrap();

        let first = service
            .update_user(created.id, UserCandidate::new("Same", "same@x.com"))
            .await
            .unwrap();
        let second = service
            .update_user(created.id, UserCandidate::new("Same", "same@x.com"))
            .await
            .unwrap();

        assert_eq!((&first.name, &first.email), (&second.name, &second.email));
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn deleted_user_is_gone() {
        let service = service();
        let created = service
            .create_user(UserCandidate::new("A", "a@x.com"))
            .await
            .unwrap();

        service.delete_user(created.id).await.unwrap();

        assert!(matches!(
            service.get_user(created.id).await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_user(created.id).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn storage_outage_is_a_persistence_error() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = UserServiceImpl::new(repository.clone());
        repository.set_unavailable(true);

        assert!(matches!(
            service.list_users().await,
            Err(UserError::Persistence(_))
        ));
        assert!(matches!(
            service.create_user(UserCandidate::new("A", "a@x.com")).await,
            Err(UserError::Persistence(_))
        ));
    }
}
