//! Common utilities shared across the Jira realm crates.

#![warn(clippy::pedantic)]

/// Module for logging configuration
pub mod config;

/// Module for tracing subscriber setup
pub mod observability;

/// Module for secret types that prevent accidental logging
pub mod secret;
