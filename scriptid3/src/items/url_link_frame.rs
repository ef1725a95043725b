use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::FrameFlags;
use crate::frame::header::{FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// An ID3v2 URL frame
///
/// URLs are always Latin-1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlLinkFrame {
	pub(crate) header: FrameHeader,
	/// The URL
	pub content: String,
}

impl UrlLinkFrame {
	/// Create a new [`UrlLinkFrame`]
	pub fn new(id: FrameId, content: impl Into<String>) -> Self {
		UrlLinkFrame {
			header: FrameHeader::new(id, FrameFlags::default()),
			content: content.into(),
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// Read an [`UrlLinkFrame`] from a frame body
	///
	/// NOTE: This expects the frame header to have already been skipped
	pub fn parse<R>(reader: &mut R, id: FrameId, frame_flags: FrameFlags) -> Result<Self>
	where
		R: Read,
	{
		let url = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::Latin1)
				.terminated(true),
		)?;

		Ok(UrlLinkFrame {
			header: FrameHeader::new(id, frame_flags),
			content: url.content,
		})
	}

	/// Convert an [`UrlLinkFrame`] to a byte vec
	///
	/// # Errors
	///
	/// The URL cannot be represented in Latin-1, and [`WriteOptions::lossy_text_encoding()`] is disabled
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		TextEncoding::Latin1
			.encode(&self.content, false, write_options.lossy_text_encoding)
			.map_err(Into::into)
	}
}
