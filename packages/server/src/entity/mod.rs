pub mod app;
pub mod app_install;
pub mod app_open;
