pub mod cached_user;
pub mod user;

pub use cached_user::CachedUser;
pub use user::{UserDocument, UserFields, UserRecord};
