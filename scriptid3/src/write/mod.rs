mod frame;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::header::Id3v2TagFlags;
use crate::macros::{err, try_vec};
use crate::tag::Id3v2Tag;
use crate::util::synchsafe::SynchsafeInteger;

use std::io::{Cursor, Seek, SeekFrom, Write};

use byteorder::{BigEndian, WriteBytesExt};

/// Build a new file image from `original`, replacing the tag that occupies its first `tag_extent` bytes
///
/// Everything from `tag_extent` onward is copied untouched. If `tag` is `None`, the tag is removed.
/// A `tag_extent` of `0` means there was no tag, and the new one is prepended.
///
/// # Errors
///
/// * `tag_extent` is past the end of `original`
/// * The tag could not be encoded, see [`Id3v2Tag::dump_to`]
///
/// # Examples
///
/// ```rust
/// use scriptid3::config::WriteOptions;
/// use scriptid3::{FrameQuery, Id3v2Tag, Id3v2Version, rewrite};
///
/// # fn main() -> scriptid3::error::Result<()> {
/// let mut tag = Id3v2Tag::new(Id3v2Version::V3);
/// tag.set(&FrameQuery::new("TIT2")?, vec![String::from("Title")], None)?;
///
/// let audio = b"\xFF\xFBaudio";
/// let image = rewrite(audio, 0, Some(&tag), WriteOptions::default())?;
///
/// assert!(image.starts_with(b"ID3\x03"));
/// assert!(image.ends_with(audio));
/// # Ok(()) }
/// ```
pub fn rewrite(
	original: &[u8],
	tag_extent: usize,
	tag: Option<&Id3v2Tag>,
	write_options: WriteOptions,
) -> Result<Vec<u8>> {
	let Some(remainder) = original.get(tag_extent..) else {
		err!(TruncatedFrame);
	};

	let mut image = match tag {
		Some(tag) => create_tag(tag, write_options)?,
		None => {
			log::debug!("Stripping ID3v2 tag");
			Vec::new()
		},
	};

	image.reserve(remainder.len());
	image.extend_from_slice(remainder);

	Ok(image)
}

pub(crate) fn create_tag(tag: &Id3v2Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	let version = tag.version;
	log::debug!("Writing {} tag with {} frames", version, tag.frames.len());

	let mut id3v2 = create_tag_header(tag)?;
	let header_len = id3v2.get_ref().len();

	// Write the items
	frame::create_items(&mut id3v2, &tag.frames, version, write_options)?;

	let mut len = id3v2.get_ref().len() - header_len;

	let padding_len = write_options.preferred_padding.unwrap_or(0) as usize;
	len += padding_len;

	let Ok(len) = u32::try_from(len) else {
		err!(TooMuchData);
	};

	// Go back to the start and write the final size
	id3v2.seek(SeekFrom::Start(6))?;
	id3v2.write_u32::<BigEndian>(len.synch()?)?;

	if padding_len == 0 {
		log::trace!("No padding requested, writing tag as-is");
		return Ok(id3v2.into_inner());
	}

	log::trace!("Padding tag with {} bytes", padding_len);

	id3v2.seek(SeekFrom::End(0))?;
	id3v2.write_all(&try_vec![0; padding_len])?;

	Ok(id3v2.into_inner())
}

fn create_tag_header(tag: &Id3v2Tag) -> Result<Cursor<Vec<u8>>> {
	let mut header = Cursor::new(Vec::new());

	header.write_all(b"ID3")?;

	// Revision is always 0
	header.write_all(&[tag.version.major(), 0])?;

	// Unsynchronisation is never applied, and neither an extended header nor a footer are written
	let flags = Id3v2TagFlags {
		experimental: tag.flags.experimental,
		..Id3v2TagFlags::default()
	};

	header.write_u8(flags.as_byte(tag.version))?;
	header.write_u32::<BigEndian>(0)?;

	Ok(header)
}
