//! # JSON:API Store Sample Library
//!
//! This library exposes the sample application's modules for integration testing.

pub mod backend;
pub mod lifecycle;
pub mod model;
