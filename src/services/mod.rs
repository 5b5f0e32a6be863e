pub mod admin_service;
pub mod photo_service;
pub mod street_service;
pub mod suggestion_service;

pub use admin_service::AdminService;
pub use photo_service::PhotoService;
pub use street_service::StreetService;
pub use suggestion_service::SuggestionService;
