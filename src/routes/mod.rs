pub mod health;
pub mod screen;
pub mod users;

pub use health::health_check;
pub use screen::{current_screen, screen_event};
pub use users::{create_user, delete_user, get_user, list_users, update_user};
