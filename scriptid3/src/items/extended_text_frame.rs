use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::FrameFlags;
use crate::frame::header::{FrameHeader, FrameId};
use crate::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// An extended ID3v2 text frame
///
/// This is used in the `TXXX` frame, where the frames
/// are told apart by descriptions, rather than their [`FrameId`]s.
/// This means for each `ExtendedTextFrame` in the tag, the description
/// must be unique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedTextFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description and content
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl ExtendedTextFrame {
	/// Create a new [`ExtendedTextFrame`]
	pub fn new(encoding: TextEncoding, description: String, content: String) -> Self {
		let header = FrameHeader::new(FrameId::Valid(String::from("TXXX")), FrameFlags::default());
		Self {
			header,
			encoding,
			description,
			content,
		}
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

	/// Read an [`ExtendedTextFrame`] from a frame body
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to decode the text
	///
	/// ID3v2.2:
	///
	/// * The encoding is not [`TextEncoding::Latin1`] or [`TextEncoding::UTF16`]
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let encoding = TextEncoding::read(reader, version)?;

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;

		// The content may omit its BOM, reusing the one from the description
		let content = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(encoding)
				.bom(description.bom),
		)?;

		let mut frame = Self::new(encoding, description.content, content.content);
		frame.header.flags = frame_flags;
		Ok(frame)
	}

	/// Convert an [`ExtendedTextFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub fn as_bytes(&self, version: Id3v2Version, write_options: WriteOptions) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);
		let lossy = write_options.lossy_text_encoding;

		let mut bytes = vec![encoding as u8];
		bytes.extend(encoding.encode(&self.description, true, lossy)?);
		bytes.extend(encoding.encode(&self.content, false, lossy)?);

		Ok(bytes)
	}
}
