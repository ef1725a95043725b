//! Text encodings used by ID3v2 frames

use crate::error::{ErrorKind, Id3Error, Result};
use crate::header::Id3v2Version;
use crate::macros::err;

use std::io::Read;

use byteorder::ReadBytesExt;

/// Errors that can occur while encoding text
#[derive(Copy, Clone, Debug)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
}

impl TextEncodingError {
	/// The target text encoding
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The character index in the provided string up to which the encoding was valid
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}
}

impl core::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"cannot represent character {} in {}",
			self.valid_up_to,
			self.encoding.name()
		)
	}
}

impl core::error::Error for TextEncodingError {}

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian (ID3v2.4 only)
	UTF16BE = 2,
	/// UTF-8 (ID3v2.4 only)
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::util::text::TextEncoding;
	///
	/// assert_eq!(TextEncoding::from_u8(3), Some(TextEncoding::UTF8));
	/// assert_eq!(TextEncoding::from_u8(4), None);
	/// ```
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// Read the encoding byte of a frame body
	///
	/// ID3v2.2 only defines Latin-1 and UTF-16. Later versions are read leniently, since
	/// plenty of ID3v2.3 writers emit UTF-8.
	pub(crate) fn read<R>(reader: &mut R, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let Ok(byte) = reader.read_u8() else {
			err!(TruncatedFrame);
		};

		match Self::from_u8(byte) {
			Some(encoding @ (Self::Latin1 | Self::UTF16)) => Ok(encoding),
			Some(encoding) if version != Id3v2Version::V2 => Ok(encoding),
			_ => err!(InvalidEncoding(byte)),
		}
	}

	/// A human readable name for the encoding
	pub fn name(self) -> &'static str {
		match self {
			TextEncoding::Latin1 => "Latin-1",
			TextEncoding::UTF16 => "UTF-16",
			TextEncoding::UTF8 => "UTF-8",
			TextEncoding::UTF16BE => "UTF-16 BE",
		}
	}

	/// The size of the string terminator for this encoding
	pub fn terminator_len(self) -> usize {
		match self {
			TextEncoding::Latin1 | TextEncoding::UTF8 => 1,
			TextEncoding::UTF16 | TextEncoding::UTF16BE => 2,
		}
	}

	/// Whether `text` can be stored in this encoding without loss
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::util::text::TextEncoding;
	///
	/// assert!(TextEncoding::Latin1.can_represent("Café"));
	/// assert!(!TextEncoding::Latin1.can_represent("東京"));
	/// assert!(TextEncoding::UTF16.can_represent("東京"));
	/// ```
	pub fn can_represent(self, text: &str) -> bool {
		match self {
			TextEncoding::Latin1 => text.chars().all(|c| c as u32 <= 255),
			_ => true,
		}
	}

	/// Whether the encoding can be written to a tag of `version`
	pub fn is_supported_in(self, version: Id3v2Version) -> bool {
		match self {
			TextEncoding::Latin1 | TextEncoding::UTF16 => true,
			TextEncoding::UTF16BE | TextEncoding::UTF8 => version == Id3v2Version::V4,
		}
	}

	/// ID3v2.4 introduced two new text encodings.
	///
	/// When writing older versions, we just substitute with UTF-16.
	pub(crate) fn for_version(self, version: Id3v2Version) -> Self {
		if self.is_supported_in(version) {
			return self;
		}

		log::warn!(
			"Text encoding {} is not supported in {}, substituting with UTF-16",
			self.name(),
			version
		);
		Self::UTF16
	}

	/// Decode an entire buffer in this encoding
	///
	/// Trailing terminators are removed.
	///
	/// # Errors
	///
	/// The bytes are not valid for the encoding ([`ErrorKind::MalformedText`])
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::util::text::TextEncoding;
	///
	/// # fn main() -> scriptid3::error::Result<()> {
	/// let decoded = TextEncoding::UTF16.decode(&[0xFF, 0xFE, b'H', 0, b'i', 0, 0, 0])?;
	/// assert_eq!(decoded, "Hi");
	/// # Ok(()) }
	/// ```
	pub fn decode(self, raw: &[u8]) -> Result<String> {
		decode_text(&mut &raw[..], TextDecodeOptions::new().encoding(self)).map(|r| r.content)
	}

	/// Encode `text` in this encoding
	///
	/// UTF-16 is always written little endian, preceded by a byte order mark.
	///
	/// # Errors
	///
	/// `text` cannot be represented in Latin-1, and `lossy` is false
	pub fn encode(
		self,
		text: &str,
		terminated: bool,
		lossy: bool,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		let mut out = match self {
			TextEncoding::Latin1 => latin1_encode(text, lossy)?,
			TextEncoding::UTF16 => utf16_encode(text, u16::to_le_bytes, true),
			TextEncoding::UTF16BE => utf16_encode(text, u16::to_be_bytes, false),
			TextEncoding::UTF8 => text.as_bytes().to_vec(),
		};

		if terminated {
			out.resize(out.len() + self.terminator_len(), 0);
		}

		Ok(out)
	}
}

#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct DecodeTextResult {
	pub(crate) content: String,
	pub(crate) bytes_read: usize,
	pub(crate) bom: [u8; 2],
}

/// Specify how to decode the provided text
///
/// By default, this will:
///
/// * Use [`TextEncoding::UTF8`] as the encoding
/// * Not expect the text to be null terminated
/// * Have no byte order mark
#[derive(Copy, Clone, Debug)]
pub(crate) struct TextDecodeOptions {
	pub encoding: TextEncoding,
	pub terminated: bool,
	pub bom: [u8; 2],
}

impl TextDecodeOptions {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn encoding(mut self, encoding: TextEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	pub(crate) fn terminated(mut self, terminated: bool) -> Self {
		self.terminated = terminated;
		self
	}

	/// The byte order to assume for UTF-16 strings without a BOM of their own
	pub(crate) fn bom(mut self, bom: [u8; 2]) -> Self {
		self.bom = bom;
		self
	}
}

impl Default for TextDecodeOptions {
	fn default() -> Self {
		Self {
			encoding: TextEncoding::UTF8,
			terminated: false,
			bom: [0, 0],
		}
	}
}

pub(crate) fn decode_text<R>(reader: &mut R, options: TextDecodeOptions) -> Result<DecodeTextResult>
where
	R: Read,
{
	let mut raw_bytes;
	let bytes_read;

	if options.terminated {
		let (bytes, terminator_len) = read_to_terminator(reader, options.encoding);

		bytes_read = bytes.len() + terminator_len;
		raw_bytes = bytes;
	} else {
		raw_bytes = Vec::new();
		reader.read_to_end(&mut raw_bytes)?;

		bytes_read = raw_bytes.len();
		trim_end_terminators(&mut raw_bytes, options.encoding);
	}

	let (content, bom) = decode_raw(&raw_bytes, options.encoding, options.bom)?;

	Ok(DecodeTextResult {
		content,
		bytes_read,
		bom,
	})
}

/// Decode a buffer holding any number of terminated strings
///
/// Trailing terminators do not produce empty values, and an empty buffer is a single empty
/// value. UTF-16 strings after the first may omit their BOM, inheriting the
/// byte order of the string before them.
pub(crate) fn decode_multi(raw: &[u8], encoding: TextEncoding) -> Result<Vec<String>> {
	let mut segments = split_terminated(raw, encoding);
	while segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
		segments.pop();
	}

	let mut values = Vec::with_capacity(segments.len());
	let mut bom = [0, 0];
	for segment in segments {
		let (value, segment_bom) = decode_raw(segment, encoding, bom)?;
		bom = segment_bom;
		values.push(value);
	}

	Ok(values)
}

fn split_terminated(raw: &[u8], encoding: TextEncoding) -> Vec<&[u8]> {
	let mut segments = Vec::new();

	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => {
			segments.extend(raw.split(|b| *b == 0));
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			let mut start = 0;
			let mut pos = 0;
			while pos + 1 < raw.len() {
				if raw[pos] == 0 && raw[pos + 1] == 0 {
					segments.push(&raw[start..pos]);
					start = pos + 2;
				}
				pos += 2;
			}
			segments.push(&raw[start..]);
		},
	}

	segments
}

fn decode_raw(raw: &[u8], encoding: TextEncoding, bom: [u8; 2]) -> Result<(String, [u8; 2])> {
	if raw.is_empty() {
		return Ok((String::new(), bom));
	}

	match encoding {
		TextEncoding::Latin1 => Ok((latin1_decode(raw), bom)),
		TextEncoding::UTF8 => {
			let text = std::str::from_utf8(raw)
				.map_err(|_| Id3Error::new(ErrorKind::MalformedText("Expected a UTF-8 string")))?;
			Ok((trim_end_nulls(text).to_owned(), bom))
		},
		TextEncoding::UTF16BE => Ok((utf16_decode_bytes(raw, u16::from_be_bytes)?, bom)),
		TextEncoding::UTF16 => {
			let (content, bom) = match raw {
				[0xFF, 0xFE, rest @ ..] => (rest, [0xFF, 0xFE]),
				[0xFE, 0xFF, rest @ ..] => (rest, [0xFE, 0xFF]),
				_ => (raw, bom),
			};

			let text = match bom {
				[0xFF, 0xFE] => utf16_decode_bytes(content, u16::from_le_bytes)?,
				[0xFE, 0xFF] => utf16_decode_bytes(content, u16::from_be_bytes)?,
				_ => err!(MalformedText("UTF-16 string has no byte order mark")),
			};

			Ok((text, bom))
		},
	}
}

pub(crate) fn read_to_terminator<R>(reader: &mut R, encoding: TextEncoding) -> (Vec<u8>, usize)
where
	R: Read,
{
	let mut text_bytes = Vec::new();
	let mut terminator_len = 0;

	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => {
			while let Ok(byte) = reader.read_u8() {
				if byte == 0 {
					terminator_len = 1;
					break;
				}

				text_bytes.push(byte)
			}
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			while let (Ok(b1), Ok(b2)) = (reader.read_u8(), reader.read_u8()) {
				if b1 == 0 && b2 == 0 {
					terminator_len = 2;
					break;
				}

				text_bytes.push(b1);
				text_bytes.push(b2)
			}
		},
	}

	(text_bytes, terminator_len)
}

fn trim_end_terminators(raw: &mut Vec<u8>, encoding: TextEncoding) {
	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => {
			while raw.last() == Some(&0) {
				raw.pop();
			}
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			while raw.len() >= 2 && raw.len() % 2 == 0 && raw.ends_with(&[0, 0]) {
				raw.truncate(raw.len() - 2);
			}
		},
	}
}

fn latin1_decode(bytes: &[u8]) -> String {
	let text = bytes.iter().map(|c| char::from(*c)).collect::<String>();
	trim_end_nulls(&text).to_owned()
}

fn latin1_encode(text: &str, lossy: bool) -> std::result::Result<Vec<u8>, TextEncodingError> {
	text.chars()
		.enumerate()
		.map(|(index, c)| match u8::try_from(u32::from(c)) {
			Ok(byte) => Ok(byte),
			Err(_) if lossy => Ok(b'?'),
			Err(_) => Err(TextEncodingError {
				encoding: TextEncoding::Latin1,
				valid_up_to: index,
			}),
		})
		.collect()
}

fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.len() % 2 != 0 {
		err!(MalformedText("UTF-16 string has an odd length"));
	}

	let words = bytes
		.chunks_exact(2)
		.map(|c| endianness([c[0], c[1]]))
		.collect::<Vec<u16>>();

	String::from_utf16(&words)
		.map(|text| trim_end_nulls(&text).to_owned())
		.map_err(|_| Id3Error::new(ErrorKind::MalformedText("Given an invalid UTF-16 string")))
}

fn trim_end_nulls(text: &str) -> &str {
	text.trim_end_matches('\0')
}

fn utf16_encode(text: &str, endianness: fn(u16) -> [u8; 2], bom: bool) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	encoded
}
