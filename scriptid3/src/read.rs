use crate::config::ParseOptions;
use crate::error::Result;
use crate::frame::read::read_frame;
use crate::header::{ExtendedHeader, HEADER_SIZE, Id3v2Header, Id3v2Version};
use crate::macros::err;
use crate::tag::Id3v2Tag;
use crate::util::alloc::VecFallibleCapacity;
use crate::util::synchsafe::UnsynchronizedStream;

use std::borrow::Cow;
use std::io::Read;

/// Parse the ID3v2 tag at the start of `bytes`
///
/// Returns the tag, and the offset of the first byte following it.
pub(crate) fn parse_id3v2(bytes: &[u8], parse_options: ParseOptions) -> Result<(Id3v2Tag, usize)> {
	let header = Id3v2Header::parse(&mut &bytes[..])?;

	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {}",
		header.size,
		header.version
	);

	let Ok(tag_extent) = usize::try_from(header.full_tag_size()) else {
		err!(TooMuchData);
	};
	if bytes.len() < tag_extent {
		log::debug!(
			"Tag declares {} bytes, the input only has {}",
			tag_extent,
			bytes.len()
		);
		err!(TruncatedFrame);
	}

	let body = &bytes[HEADER_SIZE..HEADER_SIZE + header.size as usize];

	// ID3v2.4 unsynchronises each frame on its own
	let body = if header.flags.unsynchronisation && header.version != Id3v2Version::V4 {
		let mut resynchronized = Vec::try_with_capacity_stable(body.len())?;
		UnsynchronizedStream::new(body).read_to_end(&mut resynchronized)?;
		Cow::Owned(resynchronized)
	} else {
		Cow::Borrowed(body)
	};

	let mut reader = &body[..];

	let mut extended_header = None;
	if header.flags.extended_header {
		let extended = ExtendedHeader::parse(reader, header.version)?;
		reader = &reader[extended.len()..];
		extended_header = Some(extended);
	}

	let mut tag = Id3v2Tag::new(header.version);
	tag.revision = header.revision;
	tag.flags = header.flags;
	tag.extended_header = extended_header;

	let frame_header_size = header.version.frame_header_size();
	loop {
		if reader.is_empty() || reader[0] == 0 {
			break;
		}

		if reader.len() < frame_header_size {
			err!(TruncatedFrame);
		}

		match read_frame(&mut reader, header.version, header.flags, parse_options)? {
			Some(frame) => tag.frames.push(frame),
			None => break,
		}
	}

	tag.padding_size = reader.len();
	if reader.iter().any(|b| *b != 0) {
		log::warn!(
			"Found non-zero bytes in the {} bytes of padding, they will be discarded",
			reader.len()
		);
	}

	log::debug!(
		"Read {} frames, {} bytes of padding",
		tag.frames.len(),
		tag.padding_size
	);

	Ok((tag, tag_extent))
}
