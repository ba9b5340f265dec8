//! Library Management System
//!
//! A terminal application for running a small library: readers browse,
//! borrow, return, like and rate books; administrators maintain the catalog
//! and the user base. Data lives in a local SQLite database.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;
pub mod tui;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
