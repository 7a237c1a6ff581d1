//! HTTP/REST API layer for Parley.
//!
//! Axum-based API with caller identity in the `User` header, envelope
//! response format, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
