mod users;

pub use users::PostgresUserRepository;
