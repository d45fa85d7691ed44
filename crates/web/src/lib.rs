pub mod app;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
