#![doc(test(attr(deny(warnings))))]

//! Finance Core turns recurring income, expense and investment entries
//! into monthly totals and year-by-year net worth projections, and
//! persists the underlying state for the bundled CLI.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod simulation;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
