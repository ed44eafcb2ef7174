//! Record/replay infrastructure for deterministic runs.
//!
//! A cassette is a YAML list of port interactions. Recording wraps the live
//! adapters and captures every call; replaying serves the captured outputs
//! in order, so a whole run can be reproduced without network access.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
