//! HTTP client for the card server

pub mod pack_client;

pub use pack_client::{PackClient, DEFAULT_SERVER_URL};
