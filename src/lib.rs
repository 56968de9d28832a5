pub mod app;
pub mod auth;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod ui;
