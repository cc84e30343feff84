mod users;

pub use users::UserServiceImpl;
