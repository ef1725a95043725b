use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::{Frame, FrameFlags};
use crate::header::Id3v2Version;
use crate::macros::err;
use crate::util::synchsafe::SynchsafeInteger;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

pub(super) fn create_items<W>(
	writer: &mut W,
	frames: &[Frame],
	version: Id3v2Version,
	write_options: WriteOptions,
) -> Result<()>
where
	W: Write,
{
	for frame in frames {
		let id = frame.id().for_version(version)?;

		// Opaque bodies still carry whatever their format flags describe
		let (value, flags) = match frame {
			Frame::Opaque(opaque) => (opaque.as_bytes(), frame.flags()),
			_ => (
				frame.as_bytes(version, write_options)?,
				frame.flags().status_only(),
			),
		};

		log::trace!(
			"Writing {} frame {} ({} bytes)",
			frame.name(),
			id,
			value.len()
		);

		write_frame(writer, id, flags, &value, version)?;
	}

	Ok(())
}

fn write_frame<W>(
	writer: &mut W,
	name: &str,
	flags: FrameFlags,
	value: &[u8],
	version: Id3v2Version,
) -> Result<()>
where
	W: Write,
{
	let Ok(len) = u32::try_from(value.len()) else {
		err!(TooMuchData);
	};

	writer.write_all(name.as_bytes())?;

	match version {
		// ID3v2.2 has a 24-bit size, and no flags
		Id3v2Version::V2 => {
			if len > 0x00FF_FFFF {
				err!(ValueTooLarge);
			}

			writer.write_u24::<BigEndian>(len)?;
		},
		Id3v2Version::V3 => {
			writer.write_u32::<BigEndian>(len)?;
			writer.write_u16::<BigEndian>(flags.as_id3v23_bytes())?;
		},
		Id3v2Version::V4 => {
			writer.write_u32::<BigEndian>(len.synch()?)?;
			writer.write_u16::<BigEndian>(flags.as_id3v24_bytes())?;
		},
	}

	writer.write_all(value)?;

	Ok(())
}
