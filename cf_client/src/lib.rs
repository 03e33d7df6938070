//! Internal modules for the four-in-a-row client.
//!
//! This library provides the HTTP API client, command parsing, text
//! rendering and configuration used by the cf_client binary.

pub mod api_client;
pub mod commands;
pub mod config;
pub mod render;
