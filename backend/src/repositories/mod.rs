//! Persistence layer for the service's entities.

pub mod account_repository;
