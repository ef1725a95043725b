use super::FrameId;
use crate::error::Result;
use crate::frame::FrameFlags;
use crate::header::Id3v2Version;
use crate::util::synchsafe::decode_synchsafe;

use std::io::Read;

/// A parsed frame header, along with the declared size of the frame body
pub(crate) struct ParsedHeader {
	pub(crate) id: FrameId,
	pub(crate) flags: FrameFlags,
	pub(crate) size: u32,
}

pub(crate) fn parse_header<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<ParsedHeader>>
where
	R: Read,
{
	match version {
		Id3v2Version::V2 => parse_v2_header(reader),
		Id3v2Version::V3 | Id3v2Version::V4 => parse_v3_v4_header(reader, version),
	}
}

fn parse_v2_header<R>(reader: &mut R) -> Result<Option<ParsedHeader>>
where
	R: Read,
{
	let mut header = [0; 6];
	if reader.read_exact(&mut header).is_err() {
		return Ok(None);
	}

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(None);
	}

	let id_bytes = &header[..3];
	FrameId::verify_id(id_bytes)?;

	let id_str = String::from_utf8_lossy(id_bytes);
	let id = FrameId::upgraded(&id_str)?;

	// V2 doesn't store flags
	Ok(Some(ParsedHeader {
		id,
		flags: FrameFlags::default(),
		size: u32::from_be_bytes([0, header[3], header[4], header[5]]),
	}))
}

fn parse_v3_v4_header<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<ParsedHeader>>
where
	R: Read,
{
	let mut header = [0; 10];
	if reader.read_exact(&mut header).is_err() {
		return Ok(None);
	}

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(None);
	}

	let size_bytes = [header[4], header[5], header[6], header[7]];
	let size = match version {
		Id3v2Version::V4 => decode_synchsafe(size_bytes)?,
		_ => u32::from_be_bytes(size_bytes),
	};

	// Some apps make v3 tags with v2 frame IDs.
	// The actual frame header is v3 though
	let id = if header[3] == 0 && version == Id3v2Version::V3 {
		log::warn!("Found a v2 frame ID in a v3 tag, attempting to upgrade");

		let id_bytes = &header[..3];
		FrameId::verify_id(id_bytes)?;
		FrameId::upgraded(&String::from_utf8_lossy(id_bytes))?
	} else {
		let id_bytes = &header[..4];
		FrameId::verify_id(id_bytes)?;
		FrameId::new(String::from_utf8_lossy(id_bytes))?
	};

	let flags = u16::from_be_bytes([header[8], header[9]]);
	let flags = match version {
		Id3v2Version::V4 => FrameFlags::parse_id3v24(flags),
		_ => FrameFlags::parse_id3v23(flags),
	};

	Ok(Some(ParsedHeader { id, flags, size }))
}
