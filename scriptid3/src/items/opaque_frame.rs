use crate::frame::FrameFlags;
use crate::frame::header::{FrameHeader, FrameId};

/// A frame whose body is carried untouched
///
/// Unknown frames, frames with an [`FrameId::Outdated`] ID, and frames that are compressed,
/// encrypted or grouped end up here. The body is written back exactly as it was read, along with
/// the frame's flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueFrame {
	pub(crate) header: FrameHeader,
	/// The raw frame body
	pub data: Vec<u8>,
}

impl OpaqueFrame {
	/// Create a new [`OpaqueFrame`]
	pub fn new(id: FrameId, flags: FrameFlags, data: Vec<u8>) -> Self {
		Self {
			header: FrameHeader::new(id, flags),
			data,
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// The body, as it will be written
	pub fn as_bytes(&self) -> Vec<u8> {
		self.data.clone()
	}

	/// Inflate the body of a compressed frame
	///
	/// Returns `None` if the frame isn't compressed, or is also encrypted.
	///
	/// # Errors
	///
	/// * The body is too short to hold the data length and group identifier
	/// * The body is not valid zlib data
	/// * The inflated data exceeds [`GlobalOptions::allocation_limit`](crate::config::GlobalOptions::allocation_limit)
	#[cfg(feature = "id3v2_compression_support")]
	pub fn decompressed(&self) -> crate::error::Result<Option<Vec<u8>>> {
		use crate::config::global_options;
		use crate::macros::err;
		use crate::util::synchsafe::resynchronize;

		use std::borrow::Cow;
		use std::io::Read as _;

		let flags = self.header.flags;
		if !flags.compression || flags.encryption {
			return Ok(None);
		}

		let body = if flags.unsynchronisation {
			Cow::Owned(resynchronize(&self.data))
		} else {
			Cow::Borrowed(self.data.as_slice())
		};

		// ID3v2.3 writes the decompressed size before the group identifier, ID3v2.4 writes it after
		let skip = 4 + usize::from(flags.grouping_identity);
		if body.len() < skip {
			err!(TruncatedFrame);
		}

		log::trace!("Decompressing frame {}", self.header.id);

		let limit = global_options().allocation_limit;

		let mut decompressed = Vec::new();
		flate2::read::ZlibDecoder::new(&body[skip..])
			.take((limit as u64).saturating_add(1))
			.read_to_end(&mut decompressed)?;

		if decompressed.len() > limit {
			err!(TooMuchData);
		}

		Ok(Some(decompressed))
	}
}

#[cfg(test)]
mod tests {
	use crate::frame::FrameFlags;
	use crate::frame::header::FrameId;
	use crate::items::OpaqueFrame;

	#[test_log::test]
	#[cfg(feature = "id3v2_compression_support")]
	fn decompress_grouped() {
		use flate2::Compression;
		use flate2::write::ZlibEncoder;

		use std::io::Write as _;

		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(b"\x00Compressed title").unwrap();
		let compressed = encoder.finish().unwrap();

		// ID3v2.4 ordering: group identifier, then the data length indicator
		let mut body = vec![0x07, 0, 0, 0, 17];
		body.extend(compressed);

		let flags = FrameFlags {
			grouping_identity: true,
			compression: true,
			data_length_indicator: true,
			..FrameFlags::default()
		};
		let frame = OpaqueFrame::new(FrameId::new("TIT2").unwrap(), flags, body);

		assert_eq!(
			frame.decompressed().unwrap().as_deref(),
			Some(&b"\x00Compressed title"[..])
		);
	}

	#[test_log::test]
	#[cfg(feature = "id3v2_compression_support")]
	fn decompressed_size_is_limited() {
		use crate::config::{GlobalOptions, apply_global_options};
		use crate::error::ErrorKind;

		use flate2::Compression;
		use flate2::write::ZlibEncoder;

		use std::io::Write as _;

		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(&[0; 1024]).unwrap();

		let mut body = vec![0, 0, 0x08, 0];
		body.extend(encoder.finish().unwrap());

		let flags = FrameFlags {
			compression: true,
			..FrameFlags::default()
		};
		let frame = OpaqueFrame::new(FrameId::new("PRIV").unwrap(), flags, body);

		apply_global_options(GlobalOptions::new().allocation_limit(512));
		let limited = frame.decompressed();
		apply_global_options(GlobalOptions::default());

		assert!(matches!(limited.unwrap_err().kind(), ErrorKind::TooMuchData));
		assert_eq!(frame.decompressed().unwrap().map(|d| d.len()), Some(1024));
	}

	#[test_log::test]
	#[cfg(feature = "id3v2_compression_support")]
	fn not_compressed() {
		let frame = OpaqueFrame::new(
			FrameId::new("PRIV").unwrap(),
			FrameFlags::default(),
			vec![1, 2, 3],
		);

		assert!(frame.decompressed().unwrap().is_none());
		assert_eq!(frame.as_bytes(), vec![1, 2, 3]);
	}
}
