//! Playlist parsing and serialization.
//!
//! This module converts a merged M3U document into ordered
//! [`PlaylistEntry`] values and serializes the surviving entries back to an
//! M3U document in original document order.
//!
//! # Example
//!
//! ```
//! use iptv_checker::playlist::{parse_playlist, render_playlist};
//!
//! let doc = "#EXTM3U\n#EXTINF:-1 group-title=\"News\",CNN\nhttp://a.example/cnn\n";
//! let entries = parse_playlist(doc);
//! assert_eq!(entries.len(), 1);
//! assert_eq!(render_playlist(&entries), doc);
//! ```

mod entry;
mod parser;
mod writer;

pub use entry::{DEFAULT_GROUP, DEFAULT_NAME, PlaylistEntry};
pub(crate) use parser::display_name;
pub use parser::parse_playlist;
pub use writer::{PLAYLIST_HEADER, WriteError, render_playlist, write_playlist};
