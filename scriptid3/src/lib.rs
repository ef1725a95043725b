//! Read, edit, and rewrite ID3v2 tags.
//!
//! scriptid3 is the tag engine behind scriptable tag editors. It parses the ID3v2 tag at the start
//! of a file (versions 2.2, 2.3, and 2.4), exposes its frames as structured values that can be
//! addressed with a [`FrameQuery`], and writes a new tag in front of the untouched remainder of the
//! file.
//!
//! # Examples
//!
//! ## Editing a file
//!
//! ```rust,no_run
//! # fn main() -> scriptid3::error::Result<()> {
//! use scriptid3::{FrameQuery, ParsedFile};
//!
//! let mut file = ParsedFile::open("song.mp3")?;
//!
//! // Text frames may hold multiple values
//! let artist = FrameQuery::new("TPE1")?;
//! for value in file.get(&artist)? {
//! 	println!("Artist: {value}");
//! }
//!
//! // User defined frames are addressed by their description
//! let mood = FrameQuery::new("TXXX")?.description("MOOD");
//! file.set(&mood, vec![String::from("calm")], None)?;
//!
//! // Comments by their description and language
//! let comment = FrameQuery::new("COMM")?.language(*b"eng");
//! file.delete(&comment);
//!
//! // The file is replaced atomically
//! file.save()?;
//! # Ok(()) }
//! ```
//!
//! ## Working in memory
//!
//! ```rust
//! # fn main() -> scriptid3::error::Result<()> {
//! use scriptid3::config::WriteOptions;
//! use scriptid3::{FrameQuery, ParsedFile};
//!
//! let bytes = b"ID3\x03\x00\x00\x00\x00\x00\x0FTIT2\x00\x00\x00\x05\x00\x00\x00Testaudio";
//! let mut file = ParsedFile::from_bytes(bytes.to_vec())?;
//!
//! let title = FrameQuery::new("TIT2")?;
//! assert_eq!(file.get(&title)?, vec!["Test"]);
//!
//! file.set(&title, vec![String::from("NewTitle")], None)?;
//!
//! let rewritten = file.to_bytes(WriteOptions::default())?;
//! assert!(rewritten.ends_with(b"NewTitleaudio"));
//! # Ok(()) }
//! ```
//!
//! # Notes on writing
//!
//! * Tags are written in the version they were read in, see [`Id3v2Tag::convert_version`]
//! * Unsynchronisation is never applied, and neither an extended header nor a footer are written
//! * Padding is dropped unless requested with [`WriteOptions::preferred_padding`](config::WriteOptions::preferred_padding)
//! * Frames that can't be interpreted (unknown, compressed, encrypted) are written back byte for byte

pub mod config;
pub mod error;
pub(crate) mod macros;
pub mod util;

mod file;
mod frame;
mod header;
mod items;
mod read;
mod tag;
mod write;

pub use file::ParsedFile;
pub use frame::header::{FrameHeader, FrameId};
pub use frame::{Frame, FrameFlags};
pub use header::{ExtendedHeader, Id3v2Header, Id3v2TagFlags, Id3v2Version};
pub use items::{
	AttachedPictureFrame, CommentFrame, ExtendedTextFrame, ExtendedUrlFrame, OpaqueFrame,
	TextInformationFrame, UnsynchronizedTextFrame, UrlLinkFrame,
};
pub use tag::{FrameQuery, Id3v2Tag};
pub use util::text::TextEncoding;
pub use write::rewrite;
