//! Site and scene storage.
//!
//! This module abstracts the "Scene Record Source" behind the Repository
//! pattern: the engine consumes scene collections through the
//! [`repository::SiteRepository`] trait, and external collaborators (remote
//! STAC clients, file loaders) plug in behind it.
//!
//! The crate ships one implementation: [`local::LocalRepository`], an
//! in-memory store used for unit testing and local development (feature
//! `local-repo`).

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod repository;

#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "local-repo")]
pub use local::LocalRepository;
pub use repository::{RepositoryError, RepositoryResult, SiteRepository};
