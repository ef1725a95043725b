use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::FrameFlags;
use crate::frame::header::{FrameHeader, FrameId};
use crate::header::Id3v2Version;
use crate::macros::err;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::{Read, Write as _};

use byteorder::{ReadBytesExt as _, WriteBytesExt as _};

/// An ID3v2 attached picture frame
///
/// ID3v2.2 stores a 3 character image format in place of the MIME type. `PNG` and `JPG` are
/// mapped to `image/png` and `image/jpeg`, any other format is kept as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachedPictureFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The MIME type of the picture, may be empty
	pub mime_type: String,
	/// The picture type byte (`3` is the front cover)
	pub picture_type: u8,
	/// The picture description
	pub description: String,
	/// The picture data
	pub data: Vec<u8>,
}

impl AttachedPictureFrame {
	/// Create a new [`AttachedPictureFrame`]
	pub fn new(
		encoding: TextEncoding,
		mime_type: String,
		picture_type: u8,
		description: String,
		data: Vec<u8>,
	) -> Self {
		let header = FrameHeader::new(FrameId::Valid(String::from("APIC")), FrameFlags::default());
		Self {
			header,
			encoding,
			mime_type,
			picture_type,
			description,
			data,
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// Get an [`AttachedPictureFrame`] from ID3v2 A/PIC bytes
	///
	/// NOTE: This expects *only* the frame content
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * Unable to decode any of the text
	pub fn parse<R>(reader: &mut R, frame_flags: FrameFlags, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let encoding = TextEncoding::read(reader, version)?;

		let mime_type = if version == Id3v2Version::V2 {
			let mut format = [0; 3];
			if reader.read_exact(&mut format).is_err() {
				err!(TruncatedFrame);
			}

			match &format {
				b"PNG" => String::from("image/png"),
				b"JPG" => String::from("image/jpeg"),
				_ => String::from_utf8_lossy(&format).into_owned(),
			}
		} else {
			decode_text(
				reader,
				TextDecodeOptions::new()
					.encoding(TextEncoding::Latin1)
					.terminated(true),
			)?
			.content
		};

		let Ok(picture_type) = reader.read_u8() else {
			err!(TruncatedFrame);
		};

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?
		.content;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let mut frame = Self::new(encoding, mime_type, picture_type, description, data);
		frame.header.flags = frame_flags;
		Ok(frame)
	}

	/// The 3 character image format used in place of the MIME type by ID3v2.2
	pub(crate) fn v2_format(&self) -> Option<&str> {
		match self.mime_type.as_str() {
			"image/png" => Some("PNG"),
			"image/jpeg" | "image/jpg" => Some("JPG"),
			other if other.len() == 3 && other.is_ascii() => Some(other),
			_ => None,
		}
	}

	/// Convert an [`AttachedPictureFrame`] to a ID3v2 A/PIC byte Vec
	///
	/// NOTE: This does not include the frame header
	///
	/// # Errors
	///
	/// * Too much data was provided
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	///
	/// ID3v2.2:
	///
	/// * The MIME type has no 3 character image format
	pub fn as_bytes(&self, version: Id3v2Version, write_options: WriteOptions) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);
		let lossy = write_options.lossy_text_encoding;

		let mut data = vec![encoding as u8];

		if version == Id3v2Version::V2 {
			let Some(format) = self.v2_format() else {
				err!(BadPictureFormat(self.mime_type.clone()));
			};

			data.write_all(format.as_bytes())?;
		} else {
			data.write_all(&TextEncoding::Latin1.encode(&self.mime_type, true, lossy)?)?;
		}

		data.write_u8(self.picture_type)?;
		data.write_all(&encoding.encode(&self.description, true, lossy)?)?;
		data.write_all(&self.data)?;

		if data.len() as u64 > u64::from(u32::MAX) {
			err!(TooMuchData);
		}

		Ok(data)
	}
}
