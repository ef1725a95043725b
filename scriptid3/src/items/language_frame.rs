use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::FrameFlags;
use crate::frame::header::{FrameHeader, FrameId};
use crate::header::Id3v2Version;
use crate::macros::err;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// The language used for frames created without one
pub(crate) const DEFAULT_LANGUAGE: [u8; 3] = *b"eng";

// Generic struct for a text frame that has a language
//
// This exists to deduplicate some code between `CommentFrame` and `UnsynchronizedTextFrame`
struct LanguageFrame {
	encoding: TextEncoding,
	language: [u8; 3],
	description: String,
	content: String,
}

impl LanguageFrame {
	fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let encoding = TextEncoding::read(reader, version)?;

		let mut language = [0; 3];
		if reader.read_exact(&mut language).is_err() {
			err!(TruncatedFrame);
		}

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		let content = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(encoding)
				.bom(description.bom),
		)?;

		Ok(Self {
			encoding,
			language,
			description: description.content,
			content: content.content,
		})
	}

	// The language is written back untouched, validation only happens when a frame is created
	fn create_bytes(
		encoding: TextEncoding,
		language: [u8; 3],
		description: &str,
		content: &str,
		lossy: bool,
	) -> Result<Vec<u8>> {
		let mut bytes = vec![encoding as u8];

		bytes.extend(language);
		bytes.extend(encoding.encode(description, true, lossy)?);
		bytes.extend(encoding.encode(content, false, lossy)?);

		Ok(bytes)
	}
}

/// Verify that `language` is 3 ASCII letters
///
/// # Errors
///
/// `language` contains anything other than `'a'..='z'` and `'A'..='Z'`
pub(crate) fn verify_language(language: [u8; 3]) -> Result<()> {
	if language.iter().any(|c| !c.is_ascii_alphabetic()) {
		err!(InvalidLanguage(language));
	}

	Ok(())
}

macro_rules! impl_language_frame {
	($(#[$meta:meta])* $name:ident, $id:literal) => {
		$(#[$meta])*
		#[derive(Clone, Debug, PartialEq, Eq)]
		pub struct $name {
			pub(crate) header: FrameHeader,
			/// The encoding of the description and content
			pub encoding: TextEncoding,
			/// ISO-639-2 language code (3 bytes)
			pub language: [u8; 3],
			/// Unique content description
			pub description: String,
			/// The actual frame content
			pub content: String,
		}

		impl From<LanguageFrame> for $name {
			fn from(value: LanguageFrame) -> Self {
				Self {
					header: FrameHeader::new(FrameId::Valid(String::from($id)), FrameFlags::default()),
					encoding: value.encoding,
					language: value.language,
					description: value.description,
					content: value.content,
				}
			}
		}

		impl $name {
			#[doc = concat!("Create a new [`", stringify!($name), "`]")]
			pub fn new(
				encoding: TextEncoding,
				language: [u8; 3],
				description: String,
				content: String,
			) -> Self {
				LanguageFrame {
					encoding,
					language,
					description,
					content,
				}
				.into()
			}

			/// Get the ID for the frame
			pub fn id(&self) -> &FrameId {
				&self.header.id
			}

			/// Get the flags for the frame
			pub fn flags(&self) -> FrameFlags {
				self.header.flags
			}

			/// Set the flags for the frame
			pub fn set_flags(&mut self, flags: FrameFlags) {
				self.header.flags = flags;
			}

			#[doc = concat!("Read a [`", stringify!($name), "`] from a frame body")]
			///
			/// NOTE: This expects the frame header to have already been skipped
			///
			/// # Errors
			///
			/// * The body ends before the language
			/// * Unable to decode the text
			///
			/// ID3v2.2:
			///
			/// * The encoding is not [`TextEncoding::Latin1`] or [`TextEncoding::UTF16`]
			pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags, version: Id3v2Version) -> Result<Self>
			where
				R: Read,
			{
				let mut frame: Self = LanguageFrame::parse(reader, version)?.into();
				frame.header.flags = frame_flags;
				Ok(frame)
			}

			#[doc = concat!("Convert a [`", stringify!($name), "`] to a byte vec")]
			///
			/// NOTE: This does not include a frame header
			///
			/// # Errors
			///
			/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
			pub fn as_bytes(&self, version: Id3v2Version, write_options: WriteOptions) -> Result<Vec<u8>> {
				LanguageFrame::create_bytes(
					self.encoding.for_version(version),
					self.language,
					&self.description,
					&self.content,
					write_options.lossy_text_encoding,
				)
			}
		}
	};
}

impl_language_frame!(
	/// An ID3v2 comment frame
	///
	/// Similar to `TXXX` and `WXXX` frames, comments are told apart by their descriptions
	/// (and languages).
	CommentFrame,
	"COMM"
);

impl_language_frame!(
	/// An ID3v2 unsynchronized lyrics/text frame
	///
	/// Similar to `TXXX` and `WXXX` frames, USLT frames are told apart by their descriptions
	/// (and languages).
	UnsynchronizedTextFrame,
	"USLT"
);
