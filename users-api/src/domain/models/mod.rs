mod ids;
mod user;

pub use ids::*;
pub use user::*;
