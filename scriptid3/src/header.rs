use crate::error::Result;
use crate::macros::err;
use crate::util::synchsafe::decode_synchsafe;

use std::fmt::{Display, Formatter};
use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

/// The size of the tag header, and of the footer if present
pub(crate) const HEADER_SIZE: usize = 10;

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The major version byte written in the tag header
	pub fn major(self) -> u8 {
		match self {
			Id3v2Version::V2 => 2,
			Id3v2Version::V3 => 3,
			Id3v2Version::V4 => 4,
		}
	}

	/// Get a version from its major version byte
	pub fn from_major(major: u8) -> Option<Self> {
		match major {
			2 => Some(Id3v2Version::V2),
			3 => Some(Id3v2Version::V3),
			4 => Some(Id3v2Version::V4),
			_ => None,
		}
	}

	/// The size of a frame header in this version
	pub(crate) fn frame_header_size(self) -> usize {
		match self {
			Id3v2Version::V2 => 6,
			Id3v2Version::V3 | Id3v2Version::V4 => 10,
		}
	}
}

impl Display for Id3v2Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2.{}", self.major())
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not the tag is unsynchronised
	///
	/// In ID3v2.2 and ID3v2.3 this applies to the entire tag body. In ID3v2.4 it means every
	/// frame is unsynchronised. This is never set on written tags.
	pub unsynchronisation: bool,
	/// Whether an extended header follows the tag header (ID3v2.3+)
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage (ID3v2.3+)
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4 only)
	pub footer: bool,
}

impl Id3v2TagFlags {
	/// Parse the flags byte of a tag header
	///
	/// # Errors
	///
	/// The ID3v2.2 compression bit is set
	pub fn parse(byte: u8, version: Id3v2Version) -> Result<Self> {
		// ID3v2.2 reserved this bit for compression, but no scheme was ever decided
		if version == Id3v2Version::V2 && byte & 0x40 == 0x40 {
			err!(CompressedTag);
		}

		let not_v2 = version != Id3v2Version::V2;
		Ok(Self {
			unsynchronisation: byte & 0x80 == 0x80,
			extended_header: not_v2 && byte & 0x40 == 0x40,
			experimental: not_v2 && byte & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && byte & 0x10 == 0x10,
		})
	}

	/// Get the byte representation of the flags for `version`
	pub fn as_byte(&self, version: Id3v2Version) -> u8 {
		let mut byte = 0;

		if self.unsynchronisation {
			byte |= 0x80;
		}

		if version == Id3v2Version::V2 {
			return byte;
		}

		if self.extended_header {
			byte |= 0x40;
		}

		if self.experimental {
			byte |= 0x20;
		}

		if self.footer && version == Id3v2Version::V4 {
			byte |= 0x10;
		}

		byte
	}
}

/// The 10 byte header found at the start of every ID3v2 tag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Header {
	/// The major version
	pub version: Id3v2Version,
	/// The revision (minor version), carried but not interpreted
	pub revision: u8,
	/// The tag flags
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
}

impl Id3v2Header {
	/// Parse a tag header
	///
	/// # Errors
	///
	/// * The data doesn't start with `ID3` ([`ErrorKind::NotId3`](crate::error::ErrorKind::NotId3))
	/// * The major version isn't 2, 3 or 4
	/// * The size isn't a valid synchsafe integer
	/// * The tag is a compressed ID3v2.2 tag
	pub fn parse<R>(bytes: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; HEADER_SIZE];
		if bytes.read_exact(&mut header).is_err() || &header[..3] != b"ID3" {
			err!(NotId3);
		}

		let Some(version) = Id3v2Version::from_major(header[3]) else {
			err!(UnsupportedVersion(header[3], header[4]));
		};

		let flags = Id3v2TagFlags::parse(header[5], version)?;
		let size = decode_synchsafe([header[6], header[7], header[8], header[9]])?;

		Ok(Id3v2Header {
			version,
			revision: header[4],
			flags,
			size,
		})
	}

	/// The total size of the tag, including the header and footer
	pub fn full_tag_size(&self) -> u64 {
		let footer = if self.flags.footer { HEADER_SIZE } else { 0 };
		u64::from(self.size) + (HEADER_SIZE + footer) as u64
	}
}

/// An extended header, kept as raw bytes
///
/// The extended header is only read for size accounting. It is never written back, since
/// its CRC and padding fields would no longer be valid for a rewritten tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedHeader {
	/// The raw extended header, including its size field
	pub raw: Vec<u8>,
	/// The padding size declared by an ID3v2.3 extended header
	pub padding_size: Option<u32>,
}

impl ExtendedHeader {
	/// Parse the extended header at the start of a (resynchronised) tag body
	pub(crate) fn parse(body: &[u8], version: Id3v2Version) -> Result<Self> {
		if body.len() < 4 {
			err!(BadExtendedHeaderSize);
		}

		let size_bytes = [body[0], body[1], body[2], body[3]];
		let (total_len, padding_size) = match version {
			Id3v2Version::V2 => err!(BadExtendedHeaderSize),
			// The ID3v2.3 size excludes the size field itself, and is either 6 or 10 (with CRC)
			Id3v2Version::V3 => {
				let size = BigEndian::read_u32(&size_bytes);
				if size != 6 && size != 10 {
					err!(BadExtendedHeaderSize);
				}

				let total_len = size as usize + 4;
				let padding_size = (body.len() >= 10).then(|| BigEndian::read_u32(&body[6..10]));
				(total_len, padding_size)
			},
			Id3v2Version::V4 => {
				let size = decode_synchsafe(size_bytes)? as usize;
				if size < 6 {
					err!(BadExtendedHeaderSize);
				}

				(size, None)
			},
		};

		if total_len > body.len() {
			err!(BadExtendedHeaderSize);
		}

		log::trace!("Skipping extended header of size {}", total_len);

		Ok(Self {
			raw: body[..total_len].to_vec(),
			padding_size,
		})
	}

	/// The number of bytes the extended header occupies in the tag body
	pub fn len(&self) -> usize {
		self.raw.len()
	}
}
