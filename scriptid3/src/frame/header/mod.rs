pub(super) mod parse;

use crate::error::{ErrorKind, Id3Error, Result};
use crate::frame::FrameFlags;
use crate::header::Id3v2Version;
use crate::util::upgrade::{downgrade_v2, upgrade_v2};

use std::fmt::{Display, Formatter};

/// An ID3v2 frame header
///
/// These are rarely constructed by hand. Usually they are created in the background
/// when making a new [`Frame`](crate::Frame).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct FrameHeader {
	pub(crate) id: FrameId,
	pub flags: FrameFlags,
}

impl FrameHeader {
	/// Create a new [`FrameHeader`]
	///
	/// NOTE: Once the header is created, the ID becomes immutable.
	pub const fn new(id: FrameId, flags: FrameFlags) -> Self {
		Self { id, flags }
	}

	/// Get the ID of the frame
	pub const fn id(&self) -> &FrameId {
		&self.id
	}
}

/// An ID3v2 frame ID
///
/// IDs are always stored in their 4 character form. ID3v2.2 IDs are upgraded when read, and
/// downgraded again when an ID3v2.2 tag is written.
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub enum FrameId {
	/// A 4 character ID
	Valid(String),
	/// An ID3v2.2 ID without a 4 character equivalent
	///
	/// These can only be written back to an ID3v2.2 tag.
	Outdated(String),
}

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// NOTE: This will not upgrade IDs, see [`FrameId::upgraded`].
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 3 or 4)
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::FrameId;
	///
	/// # fn main() -> scriptid3::error::Result<()> {
	/// let id_valid = FrameId::new("TPE1")?;
	/// assert!(id_valid.is_valid());
	///
	/// let id_outdated = FrameId::new("TP1")?;
	/// assert!(id_outdated.is_outdated());
	///
	/// assert!(FrameId::new("tpe1").is_err());
	/// # Ok(()) }
	/// ```
	pub fn new<I>(id: I) -> Result<Self>
	where
		I: Into<String>,
	{
		let id = id.into();
		Self::verify_id(id.as_bytes())?;

		match id.len() {
			3 => Ok(FrameId::Outdated(id)),
			4 => Ok(FrameId::Valid(id)),
			_ => Err(Id3Error::new(ErrorKind::BadFrameId(id.into_bytes()))),
		}
	}

	/// Create a `FrameId`, upgrading ID3v2.2 IDs where possible
	///
	/// # Errors
	///
	/// See [`FrameId::new`]
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::FrameId;
	///
	/// # fn main() -> scriptid3::error::Result<()> {
	/// assert_eq!(FrameId::upgraded("TT2")?, FrameId::new("TIT2")?);
	/// assert!(FrameId::upgraded("XYZ")?.is_outdated());
	/// # Ok(()) }
	/// ```
	pub fn upgraded(id: &str) -> Result<Self> {
		match upgrade_v2(id) {
			Some(upgraded) => Ok(FrameId::Valid(upgraded.to_owned())),
			None => Self::new(id),
		}
	}

	/// Whether this frame ID represents an outdated (ID3v2.2) ID
	pub fn is_outdated(&self) -> bool {
		matches!(self, FrameId::Outdated(_))
	}

	/// Whether this frame ID represents a valid (ID3v2.3 or ID3v2.4) ID
	pub fn is_valid(&self) -> bool {
		matches!(self, FrameId::Valid(_))
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		match self {
			FrameId::Valid(v) | FrameId::Outdated(v) => v,
		}
	}

	/// The ID as it must be written in a tag of `version`
	///
	/// # Errors
	///
	/// The ID has no representation in `version`
	pub(crate) fn for_version(&self, version: Id3v2Version) -> Result<&str> {
		match (self, version) {
			(FrameId::Valid(id), Id3v2Version::V2) => downgrade_v2(id),
			(FrameId::Outdated(id), Id3v2Version::V2) => Some(id.as_str()),
			(FrameId::Valid(id), _) => Some(id.as_str()),
			(FrameId::Outdated(_), _) => None,
		}
		.ok_or_else(|| {
			Id3Error::new(ErrorKind::IncompatibleFrame {
				id: self.as_str().to_owned(),
				version,
			})
		})
	}

	pub(crate) fn verify_id(id: &[u8]) -> Result<()> {
		if id.iter().any(|c| !c.is_ascii_uppercase() && !c.is_ascii_digit()) {
			return Err(Id3Error::new(ErrorKind::BadFrameId(id.to_vec())));
		}

		Ok(())
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
