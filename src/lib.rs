pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod filter;
pub mod form;
pub mod handlers;
pub mod list;
pub mod meta;
pub mod middleware;
pub mod view;

pub use app::app;
pub use handlers::AppState;
