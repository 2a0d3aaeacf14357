//! System utilities for configuration

pub mod config;

pub use config::*;
