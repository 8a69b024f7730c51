pub mod app_key;
pub mod registration;

pub use app_key::generate_app_key;
pub use registration::RegistrationFlow;
