pub(crate) mod content;
pub(crate) mod header;
pub(crate) mod read;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::util::text::TextEncoding;
use crate::items::{
	AttachedPictureFrame, CommentFrame, ExtendedTextFrame, ExtendedUrlFrame, OpaqueFrame,
	TextInformationFrame, UnsynchronizedTextFrame, UrlLinkFrame,
};
use header::{FrameHeader, FrameId};

macro_rules! define_frames {
	(
		$(#[$meta:meta])*
		pub enum Frame {
			$(
				$(#[$field_meta:meta])+
				$variant:ident($type:ty),
			)*
		}
	) => {
		$(#[$meta])*
		pub enum Frame {
			$(
				$(#[$field_meta])+
				$variant($type),
			)*
		}

		impl Frame {
			/// Get the header of the frame
			pub fn header(&self) -> &FrameHeader {
				match self {
					$(
						Frame::$variant(frame) => &frame.header,
					)*
				}
			}

			/// Get the ID of the frame
			pub fn id(&self) -> &FrameId {
				&self.header().id
			}

			/// Get the flags for the frame
			pub fn flags(&self) -> FrameFlags {
				self.header().flags
			}

			/// Set the flags for the frame
			pub fn set_flags(&mut self, flags: FrameFlags) {
				match self {
					$(
						Frame::$variant(frame) => frame.header.flags = flags,
					)*
				}
			}

			/// Used in log messages and errors
			pub(crate) fn name(&self) -> &'static str {
				match self {
					$(
						Frame::$variant(_) => stringify!($variant),
					)*
				}
			}
		}

		$(
			impl From<$type> for Frame {
				fn from(value: $type) -> Self {
					Frame::$variant(value)
				}
			}
		)*
	}
}

define_frames! {
	/// Represents an ID3v2 frame
	///
	/// ## Outdated Frames
	///
	/// ID3v2.2 frame IDs are 3 characters. When reading these tags, [`upgrade_v2`](crate::util::upgrade::upgrade_v2)
	/// is used, which has a list of all of the IDs that have a 4 character equivalent. Any ID that fails to be
	/// converted is stored as [`FrameId::Outdated`] in an [`OpaqueFrame`], and can only be written back
	/// to an ID3v2.2 tag.
	#[non_exhaustive]
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub enum Frame {
		/// Represents a "T..." (excluding TXXX) frame
		Text(TextInformationFrame),
		/// Represents a "W..." (excluding WXXX) frame
		Url(UrlLinkFrame),
		/// Represents a "TXXX" frame
		UserText(ExtendedTextFrame),
		/// Represents a "WXXX" frame
		UserUrl(ExtendedUrlFrame),
		/// Represents a "COMM" frame
		Comment(CommentFrame),
		/// Represents a "USLT" frame
		UnsynchronizedText(UnsynchronizedTextFrame),
		/// Represents an "APIC" or "PIC" frame
		Picture(AttachedPictureFrame),
		/// A frame that is carried without being interpreted
		///
		/// NOTES:
		///
		/// * This is used for unknown frames, and frames with no structured representation here
		/// * This is used for **all** frames with an ID of [`FrameId::Outdated`]
		/// * This is used for frames that are compressed, encrypted, or grouped
		Opaque(OpaqueFrame),
	}
}

impl Frame {
	/// Extract the string from the [`FrameId`]
	pub fn id_str(&self) -> &str {
		self.id().as_str()
	}

	/// Whether the frame is carried as raw bytes
	pub fn is_opaque(&self) -> bool {
		matches!(self, Frame::Opaque(_))
	}

	/// The text encoding of the frame, if it has one
	pub fn encoding(&self) -> Option<TextEncoding> {
		match self {
			Frame::Text(TextInformationFrame { encoding, .. })
			| Frame::UserText(ExtendedTextFrame { encoding, .. })
			| Frame::UserUrl(ExtendedUrlFrame { encoding, .. })
			| Frame::Comment(CommentFrame { encoding, .. })
			| Frame::UnsynchronizedText(UnsynchronizedTextFrame { encoding, .. })
			| Frame::Picture(AttachedPictureFrame { encoding, .. }) => Some(*encoding),
			Frame::Url(_) | Frame::Opaque(_) => None,
		}
	}

	pub(crate) fn encoding_mut(&mut self) -> Option<&mut TextEncoding> {
		match self {
			Frame::Text(TextInformationFrame { encoding, .. })
			| Frame::UserText(ExtendedTextFrame { encoding, .. })
			| Frame::UserUrl(ExtendedUrlFrame { encoding, .. })
			| Frame::Comment(CommentFrame { encoding, .. })
			| Frame::UnsynchronizedText(UnsynchronizedTextFrame { encoding, .. })
			| Frame::Picture(AttachedPictureFrame { encoding, .. }) => Some(encoding),
			Frame::Url(_) | Frame::Opaque(_) => None,
		}
	}

	/// Encode the frame body for a tag of `version`
	pub(crate) fn as_bytes(
		&self,
		version: Id3v2Version,
		write_options: WriteOptions,
	) -> Result<Vec<u8>> {
		Ok(match self {
			Frame::Text(tif) => tif.as_bytes(version, write_options)?,
			Frame::Url(link) => link.as_bytes(write_options)?,
			Frame::UserText(content) => content.as_bytes(version, write_options)?,
			Frame::UserUrl(content) => content.as_bytes(version, write_options)?,
			Frame::Comment(comment) => comment.as_bytes(version, write_options)?,
			Frame::UnsynchronizedText(lf) => lf.as_bytes(version, write_options)?,
			Frame::Picture(attached_picture) => attached_picture.as_bytes(version, write_options)?,
			Frame::Opaque(frame) => frame.as_bytes(),
		})
	}
}

/// Various flags to describe the content of an item
///
/// The status flags (preservation and read-only) are kept on every frame. The format flags
/// (grouping, compression, encryption, unsynchronisation and the data length indicator) only
/// survive on [`OpaqueFrame`]s, whose body still carries the data they describe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The frame body starts with a group identifier byte
	pub grouping_identity: bool,
	/// Frame is zlib compressed
	pub compression: bool,
	/// Frame is encrypted, its body starts with an encryption method symbol
	pub encryption: bool,
	/// Frame is unsynchronised (ID3v2.4 only)
	///
	/// See [`unsynchronize`](crate::util::synchsafe::unsynchronize) for an explanation.
	pub unsynchronisation: bool,
	/// Frame body starts with a 4 byte synchsafe data length indicator (ID3v2.4 only)
	pub data_length_indicator: bool,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: flags & 0x0020 == 0x0020,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}

	/// Get the ID3v2.4 byte representation of the flags
	pub fn as_id3v24_bytes(&self) -> u16 {
		[
			(self.tag_alter_preservation, 0x4000),
			(self.file_alter_preservation, 0x2000),
			(self.read_only, 0x1000),
			(self.grouping_identity, 0x0040),
			(self.compression, 0x0008),
			(self.encryption, 0x0004),
			(self.unsynchronisation, 0x0002),
			(self.data_length_indicator, 0x0001),
		]
		.into_iter()
		.filter(|(set, _)| *set)
		.fold(0, |flags, (_, bit)| flags | bit)
	}

	/// Get the ID3v2.3 byte representation of the flags
	///
	/// NOTE: ID3v2.3 has no per-frame unsynchronisation or data length indicator
	pub fn as_id3v23_bytes(&self) -> u16 {
		[
			(self.tag_alter_preservation, 0x8000),
			(self.file_alter_preservation, 0x4000),
			(self.read_only, 0x2000),
			(self.compression, 0x0080),
			(self.encryption, 0x0040),
			(self.grouping_identity, 0x0020),
		]
		.into_iter()
		.filter(|(set, _)| *set)
		.fold(0, |flags, (_, bit)| flags | bit)
	}

	/// Whether any flag that changes how the body is stored is set
	pub fn has_format_flags(&self) -> bool {
		self.grouping_identity
			|| self.compression
			|| self.encryption
			|| self.unsynchronisation
			|| self.data_length_indicator
	}

	/// The flags with only the status flags kept
	pub fn status_only(self) -> Self {
		FrameFlags {
			tag_alter_preservation: self.tag_alter_preservation,
			file_alter_preservation: self.file_alter_preservation,
			read_only: self.read_only,
			..FrameFlags::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::FrameFlags;

	#[test_log::test]
	fn flags_round_trip() {
		let v4 = FrameFlags::parse_id3v24(0x504B);
		assert!(v4.tag_alter_preservation);
		assert!(v4.read_only);
		assert!(v4.grouping_identity);
		assert!(v4.compression);
		assert!(v4.unsynchronisation);
		assert!(v4.data_length_indicator);
		assert!(!v4.encryption);
		assert_eq!(v4.as_id3v24_bytes(), 0x504B);

		let v3 = FrameFlags::parse_id3v23(0xA0E0);
		assert!(v3.tag_alter_preservation && v3.read_only);
		assert!(v3.compression && v3.encryption && v3.grouping_identity);
		assert_eq!(v3.as_id3v23_bytes(), 0xA0E0);

		let status = v4.status_only();
		assert!(!status.has_format_flags());
		assert_eq!(status.as_id3v24_bytes(), 0x5000);
	}
}
