//! Module for core business logic services.
//!
//! Services orchestrate validation, hashing, persistence and token issuance
//! on top of the repositories.

pub mod account_service;
