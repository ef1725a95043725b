use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::FrameFlags;
use crate::frame::header::{FrameHeader, FrameId};
use crate::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_multi, decode_text};

use std::io::Read;

/// An ID3v2 text frame
///
/// ID3v2.4 allows any number of values, separated by the terminator of the frame's encoding.
/// Earlier versions only hold a single value, so multiple values are joined with `/` when
/// writing them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextInformationFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The values, in order
	pub values: Vec<String>,
}

impl TextInformationFrame {
	/// Create a new [`TextInformationFrame`]
	pub fn new(id: FrameId, encoding: TextEncoding, values: Vec<String>) -> Self {
		Self {
			header: FrameHeader::new(id, FrameFlags::default()),
			encoding,
			values,
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// Read a [`TextInformationFrame`] from a frame body
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
	pub fn parse<R>(
		reader: &mut R,
		id: FrameId,
		frame_flags: FrameFlags,
		version: Id3v2Version,
	) -> Result<Self>
	where
		R: Read,
	{
		let encoding = TextEncoding::read(reader, version)?;

		// Anything after the first terminator is ignored before ID3v2.4
		let values = if version == Id3v2Version::V4 {
			let mut raw = Vec::new();
			reader.read_to_end(&mut raw)?;
			decode_multi(&raw, encoding)?
		} else {
			let value = decode_text(
				reader,
				TextDecodeOptions::new().encoding(encoding).terminated(true),
			)?;
			vec![value.content]
		};

		Ok(TextInformationFrame {
			header: FrameHeader::new(id, frame_flags),
			encoding,
			values,
		})
	}

	/// Convert a [`TextInformationFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub fn as_bytes(&self, version: Id3v2Version, write_options: WriteOptions) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);
		let lossy = write_options.lossy_text_encoding;

		let mut content = vec![encoding as u8];
		if version == Id3v2Version::V4 {
			for (i, value) in self.values.iter().enumerate() {
				if i > 0 {
					content.resize(content.len() + encoding.terminator_len(), 0);
				}

				content.extend(encoding.encode(value, false, lossy)?);
			}
		} else {
			content.extend(encoding.encode(&self.values.join("/"), false, lossy)?);
		}

		Ok(content)
	}
}
