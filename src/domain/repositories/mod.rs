//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`MappingRepository`] - Short key mappings and click counts
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod mapping_repository;

pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
