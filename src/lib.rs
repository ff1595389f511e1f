//! Library exports for bookshelf, shared between the binary and tests.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod gateway;
pub mod models;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
