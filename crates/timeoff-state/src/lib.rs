#![doc = include_str!("../README.md")]

/// This module provides a generic repository interface for storing and retrieving items.
pub mod repository;

pub use repository::{validate_collection_name, Repository, RepositoryError, RepositoryItem};
