//! Live Lookup Bridge Library
//!
//! Answers a helpdesk's live lookup requests by searching an external user
//! directory and rendering the matches as `<livelookup>` XML.
//!
//! # Modules
//!
//! - `domain`: Search term derivation, rendering, models and errors.
//! - `integrations`: External service clients.
//! - `config`: Configuration management.
//! - `directory_client`: User-directory search client.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Request and directory data models.
//! - `query`: Search term derivation.
//! - `render`: Live lookup XML rendering.
//! - `routes`: Router assembly.

pub mod domain;
pub mod integrations;

pub mod config;
pub mod directory_client;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod query;
pub mod render;
pub mod routes;
