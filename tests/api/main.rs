//! API integration test suite.
//!
//! Drives the real actix app against an in-memory SQLite database migrated with
//! the production migrator. Each test gets its own database.
//!
//! Run with: cargo test --test api

mod test_helpers;

mod test_access;
mod test_approvals;
mod test_assignments;
mod test_marks;
mod test_search;
