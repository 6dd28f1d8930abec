pub mod payment_service;
pub mod user_service;
