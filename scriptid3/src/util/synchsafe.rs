//! Synchsafe integers and unsynchronization
//!
//! ID3v2 sizes are stored using only the low 7 bits of each byte, so a tag can never contain
//! an accidental MPEG frame sync (`0xFF` followed by a byte `>= 0xE0`) inside its header.
//! Frame *content* is protected the same way by unsynchronization, which stuffs a `0x00`
//! after any `0xFF` that could be misread.

use crate::error::Result;
use crate::macros::err;

use std::io::Read;

/// The largest value that fits in a 4 byte synchsafe integer (2^28 - 1)
pub const MAX_SYNCHSAFE: u32 = 0x0FFF_FFFF;

/// Decode a 4 byte synchsafe integer
///
/// # Errors
///
/// Any byte has its high bit set ([`ErrorKind::MalformedSize`](crate::error::ErrorKind::MalformedSize))
///
/// # Examples
///
/// ```rust
/// use scriptid3::util::synchsafe::decode_synchsafe;
///
/// # fn main() -> scriptid3::error::Result<()> {
/// assert_eq!(decode_synchsafe([0x00, 0x00, 0x02, 0x00])?, 256);
/// assert!(decode_synchsafe([0x00, 0x00, 0x80, 0x00]).is_err());
/// # Ok(()) }
/// ```
pub fn decode_synchsafe(bytes: [u8; 4]) -> Result<u32> {
	if bytes.iter().any(|b| b & 0x80 != 0) {
		err!(MalformedSize);
	}

	Ok(u32::from_be_bytes(bytes).unsynch())
}

/// Encode an integer as a 4 byte synchsafe integer
///
/// # Errors
///
/// `value` > [`MAX_SYNCHSAFE`] ([`ErrorKind::ValueTooLarge`](crate::error::ErrorKind::ValueTooLarge))
///
/// # Examples
///
/// ```rust
/// use scriptid3::util::synchsafe::encode_synchsafe;
///
/// # fn main() -> scriptid3::error::Result<()> {
/// assert_eq!(encode_synchsafe(256)?, [0x00, 0x00, 0x02, 0x00]);
/// assert!(encode_synchsafe(0x1000_0000).is_err());
/// # Ok(()) }
/// ```
pub fn encode_synchsafe(value: u32) -> Result<[u8; 4]> {
	value.synch().map(u32::to_be_bytes)
}

/// An integer that can be converted to and from its synchsafe form
pub trait SynchsafeInteger: Sized {
	/// Spread the value over 7 bits per byte
	///
	/// # Errors
	///
	/// `self` doesn't fit in <`INTEGER_TYPE::BITS - size_of::<INTEGER_TYPE>()`> bits
	fn synch(self) -> Result<Self>;

	/// Collapse a synchsafe value back into an ordinary integer
	///
	/// The high bit of each byte is ignored.
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		if self > MAX_SYNCHSAFE {
			err!(ValueTooLarge);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3) | ((self & 0x7F_0000) >> 2) | ((self & 0x7F00) >> 1) | (self & 0x7F)
	}
}

impl SynchsafeInteger for u16 {
	fn synch(self) -> Result<Self> {
		if self > 0x3FFF {
			err!(ValueTooLarge);
		}

		Ok((self & 0x7F) | ((self & (0x7F << 7)) << 1))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00) >> 1) | (self & 0x7F)
	}
}

/// Apply unsynchronization to `content`
///
/// A `0x00` is inserted after every `0xFF` that is followed by a byte `>= 0xE0` or by `0x00`,
/// as well as after a trailing `0xFF`, so the result can be reversed with [`resynchronize`].
///
/// # Examples
///
/// ```rust
/// use scriptid3::util::synchsafe::unsynchronize;
///
/// let content = [0xFF, 0xE0, 0x12, 0xFF, 0x00, 0xFF, 0x12];
/// assert_eq!(
/// 	unsynchronize(&content),
/// 	[0xFF, 0x00, 0xE0, 0x12, 0xFF, 0x00, 0x00, 0xFF, 0x12]
/// );
/// ```
pub fn unsynchronize(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());

	let mut iter = content.iter().copied().peekable();
	while let Some(byte) = iter.next() {
		out.push(byte);

		if byte != 0xFF {
			continue;
		}

		match iter.peek() {
			Some(&next) if next >= 0xE0 || next == 0x00 => out.push(0x00),
			None => out.push(0x00),
			_ => {},
		}
	}

	out
}

/// Remove unsynchronization from `content`
///
/// Every `0x00` directly following a `0xFF` is dropped. See [`UnsynchronizedStream`] to do the
/// same while reading.
///
/// # Examples
///
/// ```rust
/// use scriptid3::util::synchsafe::resynchronize;
///
/// let content = [0xFF, 0x00, 0xE0, 0xFF, 0x12];
/// assert_eq!(resynchronize(&content), [0xFF, 0xE0, 0xFF, 0x12]);
/// ```
pub fn resynchronize(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());

	// Reading from a slice never fails
	let _ = UnsynchronizedStream::new(content).read_to_end(&mut out);

	out
}

/// A reader that removes unsynchronization on the fly
///
/// # Examples
///
/// ```rust
/// use std::io::{Cursor, Read};
/// use scriptid3::util::synchsafe::UnsynchronizedStream;
///
/// # fn main() -> scriptid3::error::Result<()> {
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
///
/// let mut reader = UnsynchronizedStream::new(Cursor::new(content));
///
/// let mut resynchronized = Vec::new();
/// reader.read_to_end(&mut resynchronized)?;
///
/// assert_eq!(resynchronized, [0xFF, 0x1A, 0xFF, 0x15]);
/// # Ok(()) }
/// ```
pub struct UnsynchronizedStream<R> {
	reader: R,
	previous_ff: bool,
}

impl<R> UnsynchronizedStream<R> {
	/// Create a new [`UnsynchronizedStream`]
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			previous_ff: false,
		}
	}

	/// Extract the reader, discarding the [`UnsynchronizedStream`]
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl<R: Read> Read for UnsynchronizedStream<R> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		loop {
			let read = self.reader.read(buf)?;
			if read == 0 {
				return Ok(0);
			}

			// Compact the chunk in place, dropping the stuffed bytes
			let mut written = 0;
			for i in 0..read {
				let byte = buf[i];
				if self.previous_ff && byte == 0x00 {
					self.previous_ff = false;
					continue;
				}

				self.previous_ff = byte == 0xFF;
				buf[written] = byte;
				written += 1;
			}

			// The chunk only held a stuffed byte, keep going so 0 still means EOF
			if written > 0 {
				return Ok(written);
			}
		}
	}
}
