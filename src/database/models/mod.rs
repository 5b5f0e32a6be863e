pub mod admin_user;
pub mod photo;
pub mod street;
pub mod suggestion;

pub use admin_user::AdminUser;
pub use photo::StreetPhoto;
pub use street::{Street, StreetStatus};
pub use suggestion::StreetSuggestion;
