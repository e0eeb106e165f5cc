// Library surface for headless/integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod quotes;
pub mod runtime;
pub mod score;
pub mod session;
pub mod ui;
