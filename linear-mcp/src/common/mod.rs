//! Common utilities shared across the library

pub mod env_loader;
