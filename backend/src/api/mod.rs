//! Shared API plumbing used by every HTTP handler.

pub mod common;
