//! Adapter implementations for port traits.
//!
//! - `live/` - Real HTTP implementations
//! - `recording/` - Record interactions to cassettes
//! - `replaying/` - Replay interactions from cassettes

pub mod live;
pub mod recording;
pub mod replaying;

/// Cassette port names.
pub(crate) mod port_names {
    pub const QUOTE_SOURCE: &str = "quote_source";
    pub const PHOTO_LIBRARY: &str = "photo_library";
    pub const FONT_SOURCE: &str = "font_source";
    pub const FILE_HOST: &str = "file_host";
}
