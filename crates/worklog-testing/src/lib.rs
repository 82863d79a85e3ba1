//! Testing infrastructure for worklog integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `MockHttpClient`: Scripted transport that records every request
//! - `fixtures`: GitHub, GitLab and Jira response builders
//! - `assertions`: Custom assertions over report JSON
//! - `TestWorld`: Temp directory, config file and CLI runner

pub mod assertions;
pub mod fixtures;
pub mod mock;
pub mod world;

pub use mock::MockHttpClient;
pub use world::TestWorld;
