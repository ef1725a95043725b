use super::content::parse_content;
use super::header::parse::{ParsedHeader, parse_header};
use super::Frame;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::header::{Id3v2TagFlags, Id3v2Version};
use crate::items::OpaqueFrame;
use crate::macros::{err, try_vec};
use crate::util::synchsafe::resynchronize;

/// Read the next frame from `reader`, advancing it past the frame
///
/// `reader` must be restricted to the (tag-wide resynchronised) frame area of the tag, so a
/// frame declaring a size past its end is truncated. Returns `None` once padding is reached.
pub(crate) fn read_frame(
	reader: &mut &[u8],
	version: Id3v2Version,
	tag_flags: Id3v2TagFlags,
	parse_options: ParseOptions,
) -> Result<Option<Frame>> {
	let Some(ParsedHeader { id, mut flags, size }) = parse_header(reader, version)? else {
		return Ok(None);
	};

	let size = size as usize;
	if size > reader.len() {
		log::debug!(
			"Frame {} declares {} bytes, only {} remain",
			id,
			size,
			reader.len()
		);
		err!(TruncatedFrame);
	}

	let (body, rest) = reader.split_at(size);
	*reader = rest;

	// Everything decoded from the frame is bounded by this allocation
	let mut content = try_vec![0; size];
	content.copy_from_slice(body);

	// ID3v2.4 unsynchronises frames individually, the tag flag only says they all are
	if version == Id3v2Version::V4 && tag_flags.unsynchronisation {
		flags.unsynchronisation = true;
	}

	if size == 0
		|| id.is_outdated()
		|| flags.compression
		|| flags.encryption
		|| flags.grouping_identity
	{
		log::trace!("Keeping frame {} as-is (size: {}, flags: {:?})", id, size, flags);
		return Ok(Some(Frame::Opaque(OpaqueFrame::new(id, flags, content))));
	}

	if flags.unsynchronisation {
		content = resynchronize(&content);
	}

	if flags.data_length_indicator {
		if content.len() < 4 {
			err!(TruncatedFrame);
		}

		content.drain(..4);
	}

	// Everything but the status flags was undone above
	parse_content(&content, id, flags.status_only(), version, parse_options).map(Some)
}

#[cfg(test)]
mod tests {
	use super::read_frame;
	use crate::config::{GlobalOptions, ParseOptions, apply_global_options};
	use crate::error::ErrorKind;
	use crate::frame::Frame;
	use crate::header::{Id3v2TagFlags, Id3v2Version};

	fn read(bytes: &[u8], version: Id3v2Version) -> Frame {
		read_frame(
			&mut &bytes[..],
			version,
			Id3v2TagFlags::default(),
			ParseOptions::new(),
		)
		.unwrap()
		.unwrap()
	}

	#[test_log::test]
	fn unsynchronised_frame_with_data_length() {
		// Latin-1 "\xFF", unsynchronised and preceded by a data length indicator
		let frame = read(
			b"TPE1\x00\x00\x00\x07\x00\x03\x00\x00\x00\x02\x00\xFF\x00",
			Id3v2Version::V4,
		);

		let Frame::Text(text) = frame else {
			panic!("Expected a text frame");
		};
		assert_eq!(text.values, vec!["\u{FF}"]);
		assert!(!text.header.flags.unsynchronisation);
		assert!(!text.header.flags.data_length_indicator);
	}

	#[test_log::test]
	fn protected_frames_are_opaque() {
		let frame = read(b"TIT2\x00\x00\x00\x03\x00\x80\xDE\xAD\xBE", Id3v2Version::V3);

		let Frame::Opaque(opaque) = frame else {
			panic!("Expected an opaque frame");
		};
		assert!(opaque.header.flags.compression);
		assert_eq!(opaque.data, b"\xDE\xAD\xBE");
	}

	#[test_log::test]
	fn empty_and_unknown_frames() {
		let empty = read(b"TIT2\x00\x00\x00\x00\x00\x00", Id3v2Version::V3);
		assert!(empty.is_opaque());

		let unknown = read(b"XYZW\x00\x00\x00\x02\x00\x00\x01\x02", Id3v2Version::V4);
		assert!(unknown.is_opaque());

		let outdated = read(b"CRM\x00\x00\x01\x00", Id3v2Version::V2);
		assert!(outdated.is_opaque());
		assert!(outdated.id().is_outdated());
	}

	#[test_log::test]
	fn truncated() {
		let err = read_frame(
			&mut &b"TIT2\x00\x00\x00\x10\x00\x00\x00Test"[..],
			Id3v2Version::V3,
			Id3v2TagFlags::default(),
			ParseOptions::new(),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::TruncatedFrame));
	}

	#[test_log::test]
	fn allocation_limit() {
		apply_global_options(GlobalOptions::new().allocation_limit(16));

		let mut frame = b"PRIV\x00\x00\x00\x20\x00\x00".to_vec();
		frame.extend([0x01; 32]);

		let err = read_frame(
			&mut &frame[..],
			Id3v2Version::V3,
			Id3v2TagFlags::default(),
			ParseOptions::new(),
		)
		.unwrap_err();

		// A frame at the limit is still fine
		let small = read(b"PRIV\x00\x00\x00\x10\x00\x00owner\x00abcdefghij", Id3v2Version::V3);

		apply_global_options(GlobalOptions::default());

		assert!(matches!(err.kind(), ErrorKind::TooMuchData));
		assert!(small.is_opaque());
	}
}
