//! Core engine for template-bootstrap
//!
//! - **config**: template profiles (placeholder constants and layout)
//! - **error**: error types with contextual help messages and exit codes
//! - **params**: user-supplied identity, defaults and validation
//! - **plan**: derived names and the ordered replacement plan
//! - **pipeline**: runs the filesystem steps in order

pub mod config;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod plan;
