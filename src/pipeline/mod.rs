//! Term scoring pipeline
//!
//! This module provides the collaborator traits, the configuration and its
//! validation, stage observers and the runner that ties them together.

pub mod config;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod traits;
pub mod validation;
