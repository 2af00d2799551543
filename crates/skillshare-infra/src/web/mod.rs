mod config;
pub use self::config::*;
mod web_app;
pub use self::web_app::*;

pub mod controllers;
pub mod extracts;
pub mod responses;
pub mod routing;
