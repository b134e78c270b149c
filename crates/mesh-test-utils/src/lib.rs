//! Shared test utilities for the meshsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: device identities and configuration documents of every
//!   schema version
//! - [`dir`]: [`dir::TestConfigDir`], a temporary directory holding one
//!   configuration file

pub mod dir;
pub mod fixtures;
