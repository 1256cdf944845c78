//! Core of the SAPRE precatórios dashboard: the simulated record store, the
//! filter engine, the report builder and the file exporter. The desktop UI
//! lives in the `sapre-dashboard` binary.

pub mod config;
pub mod data;
pub mod error;

pub use error::{Error, Result};
