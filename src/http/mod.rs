//! HTTP server module for the coverage backend.
//!
//! This module provides an axum-based HTTP server that exposes the coverage
//! engine as a REST API. It reuses the existing service layer, repository
//! pattern, and DTOs from the core library; no statistics logic lives here.

pub mod dto;

pub mod error;

pub mod handlers;

pub mod router;

pub mod state;

pub use router::create_router;

pub use state::AppState;
