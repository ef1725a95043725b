//! Contains the errors that can arise within scriptid3
//!
//! The primary error is [`Id3Error`]. The type of error is determined by [`ErrorKind`].

use crate::header::Id3v2Version;
pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Id3Error>`
pub type Result<T> = std::result::Result<T, Id3Error>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Header
	/// The input does not start with an `ID3` identifier
	NotId3,
	/// The tag declares a major version other than 2, 3 or 4
	UnsupportedVersion(u8, u8),
	/// A synchsafe integer has a byte with its high bit set
	MalformedSize,
	/// A compressed ID3v2.2 tag was encountered
	///
	/// No compression scheme was ever decided for ID3v2.2, so these tags cannot be read.
	CompressedTag,
	/// The extended header declares a size that does not fit in the tag
	BadExtendedHeaderSize,

	// Frame
	/// A frame (or the tag itself) extends past the available data
	TruncatedFrame,
	/// A frame ID contains invalid characters (must be within `'A'..='Z'` or `'0'..='9'`)
	BadFrameId(Vec<u8>),
	/// A text encoding byte outside of the range allowed by the tag version
	InvalidEncoding(u8),
	/// A comment or lyrics frame has a language that isn't 3 ASCII characters
	InvalidLanguage([u8; 3]),
	/// An ID3v2.2 picture has an image format that cannot be expressed
	BadPictureFormat(String),

	// Text
	/// Text could not be decoded with its declared encoding
	MalformedText(&'static str),
	/// Text could not be represented in the requested encoding
	TextEncode(TextEncodingError),

	// Values
	/// A number does not fit in its on-disk representation
	ValueTooLarge,
	/// The requested operation does not apply to the frame
	UnsupportedFrameOperation(String),
	/// No frame matched the query
	NotPresent(String),
	/// The values provided for a frame are not valid for its kind
	InvalidFrameValue(&'static str),
	/// A frame cannot be written in the target version
	IncompatibleFrame {
		/// The frame ID
		id: String,
		/// The version being written
		version: Id3v2Version,
	},
	/// A lossless version conversion was requested, but some frames would be lost
	IncompatibleFrames(Vec<String>),

	// Conversions for external errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// Errors that could occur within scriptid3
pub struct Id3Error {
	pub(crate) kind: ErrorKind,
}

impl Id3Error {
	/// Create an `Id3Error` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::error::{ErrorKind, Id3Error};
	///
	/// let not_id3 = Id3Error::new(ErrorKind::NotId3);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::error::{ErrorKind, Id3Error};
	///
	/// let not_id3 = Id3Error::new(ErrorKind::NotId3);
	/// if let ErrorKind::NotId3 = not_id3.kind() {
	/// 	println!("No tag here");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for Id3Error {}

impl Debug for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<TextEncodingError> for Id3Error {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for Id3Error {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<TryReserveError> for Id3Error {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<tempfile::PersistError> for Id3Error {
	fn from(input: tempfile::PersistError) -> Self {
		Self {
			kind: ErrorKind::Io(input.error),
		}
	}
}

impl Display for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),
			ErrorKind::TextEncode(ref err) => write!(f, "Text encoding: {err}"),

			// Header
			ErrorKind::NotId3 => write!(f, "No ID3v2 tag found"),
			ErrorKind::UnsupportedVersion(major, minor) => write!(
				f,
				"Found an invalid version (v2.{major}.{minor}), expected any major revision in: \
				 (2, 3, 4)"
			),
			ErrorKind::MalformedSize => {
				write!(f, "Encountered a synchsafe integer with its high bit set")
			},
			ErrorKind::CompressedTag => write!(f, "Encountered a compressed ID3v2.2 tag"),
			ErrorKind::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},

			// Frame
			ErrorKind::TruncatedFrame => write!(f, "Frame extends past the end of the tag"),
			ErrorKind::BadFrameId(ref frame_id) => {
				write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}")
			},
			ErrorKind::InvalidEncoding(byte) => {
				write!(f, "Found an invalid text encoding byte: {byte}")
			},
			ErrorKind::InvalidLanguage(lang) => write!(
				f,
				"Invalid frame language found: {lang:?} (expected 3 ascii characters)"
			),
			ErrorKind::BadPictureFormat(ref format) => {
				write!(f, "Picture: Found unexpected format \"{format}\"")
			},

			// Text
			ErrorKind::MalformedText(message) => write!(f, "Text decoding: {message}"),

			// Values
			ErrorKind::ValueTooLarge => {
				write!(f, "Value is too large to be stored as a synchsafe integer")
			},
			ErrorKind::UnsupportedFrameOperation(ref id) => {
				write!(f, "Operation is not supported for frame `{id}`")
			},
			ErrorKind::NotPresent(ref id) => write!(f, "Frame `{id}` is not present in the tag"),
			ErrorKind::InvalidFrameValue(message) => write!(f, "Invalid frame value: {message}"),
			ErrorKind::IncompatibleFrame { ref id, version } => {
				write!(f, "Frame `{id}` cannot be written to an {version} tag")
			},
			ErrorKind::IncompatibleFrames(ref ids) => write!(
				f,
				"The following frames are incompatible with the target version: {}",
				ids.join(", ")
			),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
		}
	}
}
