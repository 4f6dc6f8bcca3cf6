pub mod handlers;
pub mod service;

pub use handlers::alert_config;
pub use service::AlertService;
