//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, stdio, etc).
//!
//! # Architecture
//!
//! - **config**: Server configuration (TOML + environment)
//! - **settings**: Layered search settings, resolved per call
//! - **error**: Error types and Result alias
//! - **types**: Search outcome and source citations
//! - **normalize**: Provider reply normalization
//! - **bridge**: Search execution (direct HTTP or helper process)
//! - **xdg**: XDG directory handling
//! - **services**: Unified service container

pub mod bridge;
pub mod config;
pub mod error;
pub mod normalize;
pub mod services;
pub mod settings;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{GrokSearchError, Result, SearchError};
pub use services::Services;
pub use settings::{Settings, SettingsLayer};
pub use types::{SearchOutcome, SourceEntry};
