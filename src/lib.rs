//! Assessment Flow - module-sequenced health-check assessments
//!
//! A session selects product modules, answers each module's questions in
//! selection order, and exports the aggregated report as a spreadsheet and a
//! paginated document.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
