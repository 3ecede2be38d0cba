//! # API Shared
//!
//! Shared definitions for the hospital onboarding APIs.
//!
//! Contains:
//! - Wire types for the HTTP surface (`wire` module), which double as OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `hospital-core` to render records and by `api-rest` for responses.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
