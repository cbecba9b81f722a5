// Library surface for headless/integration tests and reuse.
// Terminal setup stays in main.rs.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod catch_game;
pub mod celebration;
pub mod clock;
pub mod config;
pub mod course;
pub mod diagnosis;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod progress;
pub mod quiz;
pub mod random;
pub mod rewards;
pub mod runtime;
pub mod ui;
