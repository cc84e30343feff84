use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::PostgresUserRepository,
    domain::{ports::inbound::UserService, services::UserServiceImpl},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }

    /// Wires the user service to PostgreSQL through `db_pool`.
    pub fn with_postgres(db_pool: PgPool) -> Self {
        let repository = Arc::new(PostgresUserRepository::new(db_pool));
        Self::new(Arc::new(UserServiceImpl::new(repository)))
    }
}
