//! Test Module
//!
//! Crate-level test suite for the DayChat engine.
//!
//! ## Test Categories
//! - `brain_tests`: Analyzer scenarios, context tracking, bundled response document
//! - `integration_tests`: Full conversations through `ChatEngine`
//! - `property_tests`: Invariants over arbitrary messages and analyses

pub mod integration_tests;
