use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::FrameFlags;
use crate::frame::header::{FrameHeader, FrameId};
use crate::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// An extended ID3v2 URL frame
///
/// This is used in the `WXXX` frame, where the frames
/// are told apart by descriptions, rather than their [`FrameId`]s.
/// The URL itself is always Latin-1, only the description uses the frame encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedUrlFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The URL
	pub content: String,
}

impl ExtendedUrlFrame {
	/// Create a new [`ExtendedUrlFrame`]
	pub fn new(encoding: TextEncoding, description: String, content: String) -> Self {
		let header = FrameHeader::new(FrameId::Valid(String::from("WXXX")), FrameFlags::default());
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

	/// Read an [`ExtendedUrlFrame`] from a frame body
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to decode the text
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let encoding = TextEncoding::read(reader, version)?;

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		let content = decode_text(
			reader,
			TextDecodeOptions::new().encoding(TextEncoding::Latin1),
		)?;

		let mut frame = Self::new(encoding, description.content, content.content);
		frame.header.flags = frame_flags;
		Ok(frame)
	}

	/// Convert an [`ExtendedUrlFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the description or URL cannot be encoded
	pub fn as_bytes(&self, version: Id3v2Version, write_options: WriteOptions) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);
		let lossy = write_options.lossy_text_encoding;

		let mut bytes = vec![encoding as u8];
		bytes.extend(encoding.encode(&self.description, true, lossy)?);
		bytes.extend(TextEncoding::Latin1.encode(&self.content, false, lossy)?);

		Ok(bytes)
	}
}
