// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod drill;
pub mod history;
pub mod metrics;
pub mod results_log;
pub mod runtime;
pub mod text_store;

/// Display refresh cadence for live elapsed/WPM readouts
pub const TICK_RATE_MS: u64 = 1000;
