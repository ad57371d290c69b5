//! Dialer Info Library
//!
//! Looks up incoming and outgoing callers against the rental-management API
//! and renders the result for an in-app screen and a floating call overlay.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `call_events`: Call event listener.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `lookup_client`: Caller lookup API client.
//! - `models`: Lookup API data models.
//! - `normalizer`: Phone number normalization.
//! - `overlay`: Overlay service and its state.
//! - `overlay_view`: Overlay rendering.
//! - `redact`: Log redaction for phone numbers.
//! - `resolver`: Caller status resolution and expiry countdown.
//! - `routes`: HTTP routing.
//! - `screen`: In-app screen rendering.
//! - `webhook_handler`: Call event webhook handler.
//! - `webhook_models`: Call event payload models.

pub mod api;
pub mod core;
pub mod integrations;

pub mod call_events;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod lookup_client;
pub mod models;
pub mod normalizer;
pub mod overlay;
pub mod overlay_view;
pub mod redact;
pub mod resolver;
pub mod routes;
pub mod screen;
pub mod webhook_handler;
pub mod webhook_models;
