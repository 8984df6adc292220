pub mod api;
pub mod config;
pub mod errors;
pub mod installer;
pub mod plan;
pub mod preview;
pub mod report;
pub mod scaffold;
pub mod templates;
mod transactions;
