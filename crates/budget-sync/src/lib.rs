//! Asana webhook service that keeps a project's budget summary in sync.
//!
//! This crate provides:
//! - REST client for the Asana API
//! - Webhook handshake and event envelope handling
//! - Budget-vs-actual-cost aggregation across a project's tasks
//! - HTTP server for webhook handling (standalone service)

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Many async API methods can fail

pub mod aggregator;
pub mod client;
pub mod config;
pub mod models;
pub mod server;
pub mod webhooks;

pub use client::AsanaClient;
pub use config::Config;
pub use models::{CustomField, ProjectSummary, Task, TaskCompact};
pub use webhooks::{WebhookEnvelope, WebhookEvent};
