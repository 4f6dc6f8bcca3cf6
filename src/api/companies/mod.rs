pub mod dto;
pub mod handlers;
pub mod service;

pub use handlers::company_config;
pub use service::CompanyService;
