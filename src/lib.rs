//! School remarks server library.
//!
//! Store access, role-scoped aggregation, session handling and the HTTP API
//! behind the school remarks dashboard.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
