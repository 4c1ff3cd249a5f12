//! # PhenoSat Rust Backend
//!
//! Satellite scene coverage and vegetation index statistics engine.
//!
//! This crate aggregates per-site satellite-imagery metadata (scene acquisition
//! dates, cloud-cover fractions, per-scene vegetation index values) into summary
//! statistics describing temporal data availability and vegetation condition.
//! Remote scene queries, file persistence, and map rendering are external
//! collaborators; this crate only consumes scene records they already resolved.
//!
//! ## Features
//!
//! - **Catalog Loading**: Parse site catalogs and scene collections from JSON
//! - **Scene Filtering**: Partition scene histories into all/clear subsets by cloud cover
//! - **Gap Analysis**: Maximum gap, above-threshold gap count, and weighted gap score
//!   per subset policy
//! - **Vegetation Index**: Time series assembly, outlier flagging, and summary statistics
//! - **HTTP API**: RESTful endpoints for catalog upload and coverage reports
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for sites, scenes, and reports
//! - [`config`]: Engine configuration value object (thresholds, site selection)
//! - [`models`]: Catalog parsing and scene-record validation
//! - [`services`]: Statistics computation and per-site report assembly
//! - [`db`]: Repository pattern over site/scene storage
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod config;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
