//! HealthyMeal API
//!
//! This crate provides an HTTP API service for AI-assisted recipe generation.
//! Recipe text is produced by a hosted chat-completion gateway (or a
//! deterministic mock for offline development); accepted drafts are persisted
//! through an opaque storage provider.
//!
//! # Modules
//! - `client`: API client and generation flow state machine for UI consumers
//! - `controller`: Handles HTTP requests
//! - `entities`: Defines core data structures
//! - `error`: Provides error handling and custom error types
//! - `middleware`: Request logging, authentication and error envelope
//! - `routes`: Defines API endpoints and routing
//! - `service`: Implements business logic and services
//! - `utils`: Configuration and startup helpers

rust_i18n::i18n!("locales", fallback = "en");

pub mod client;
pub mod controller;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod utils;

pub use error::{AppError, Result};
