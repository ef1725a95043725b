mod query;

pub use query::FrameQuery;

use crate::config::WriteOptions;
use crate::error::{ErrorKind, Id3Error, Result};
use crate::frame::Frame;
use crate::frame::header::FrameId;
use crate::header::{ExtendedHeader, Id3v2TagFlags, Id3v2Version};
use crate::items::{
	AttachedPictureFrame, CommentFrame, DEFAULT_LANGUAGE, ExtendedTextFrame, ExtendedUrlFrame,
	TextInformationFrame, UnsynchronizedTextFrame, UrlLinkFrame, verify_language,
};
use crate::macros::err;
use crate::util::text::TextEncoding;
use crate::util::upgrade::id_supported_in;

use std::io::Write;

/// The structured kinds of frames that can be created from plain values
#[derive(Copy, Clone, PartialEq, Eq)]
enum ValueKind {
	Text,
	Url,
	UserText,
	UserUrl,
	Comment,
	Lyrics,
}

impl ValueKind {
	fn for_id(id: &FrameId) -> Option<Self> {
		let FrameId::Valid(id) = id else {
			return None;
		};

		match id.as_str() {
			"TXXX" => Some(ValueKind::UserText),
			"WXXX" => Some(ValueKind::UserUrl),
			"COMM" => Some(ValueKind::Comment),
			"USLT" => Some(ValueKind::Lyrics),
			"GRP1" | "MVNM" | "MVIN" => Some(ValueKind::Text),
			i if i.starts_with('T') => Some(ValueKind::Text),
			i if i.starts_with('W') => Some(ValueKind::Url),
			_ => None,
		}
	}
}

/// An ID3v2 tag
///
/// Frames are kept in the order they were read. Unlike the frames themselves, the tag is never
/// upgraded, it is written back in [`Id3v2Tag::version`] unless converted with
/// [`Id3v2Tag::convert_version`].
///
/// ## Addressing frames
///
/// Frames are addressed with a [`FrameQuery`]. See its docs for the matching rules.
///
/// ## Multiple values
///
/// ID3v2.4 text frames can hold any number of values. Older versions only hold one, so when
/// such a tag is written, the values are joined with `/`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Id3v2Tag {
	/// The version the tag will be written in
	pub version: Id3v2Version,
	/// The revision read from the tag header
	pub revision: u8,
	/// The flags read from the tag header
	pub flags: Id3v2TagFlags,
	/// The extended header, if one was read
	pub extended_header: Option<ExtendedHeader>,
	/// The number of padding bytes following the frames
	pub padding_size: usize,
	pub(crate) frames: Vec<Frame>,
}

impl IntoIterator for Id3v2Tag {
	type Item = Frame;
	type IntoIter = std::vec::IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.into_iter()
	}
}

impl<'a> IntoIterator for &'a Id3v2Tag {
	type Item = &'a Frame;
	type IntoIter = std::slice::Iter<'a, Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.iter()
	}
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self::new(Id3v2Version::V4)
	}
}

impl Id3v2Tag {
	/// Create a new empty `Id3v2Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::{Id3v2Tag, Id3v2Version};
	///
	/// let tag = Id3v2Tag::new(Id3v2Version::V3);
	/// assert!(tag.is_empty());
	/// ```
	pub fn new(version: Id3v2Version) -> Self {
		Self {
			version,
			revision: 0,
			flags: Id3v2TagFlags::default(),
			extended_header: None,
			padding_size: 0,
			frames: Vec::new(),
		}
	}

	/// All frames, in order
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// All frames matching `query`, in order
	pub fn get_frames<'a>(&'a self, query: &'a FrameQuery) -> impl Iterator<Item = &'a Frame> + 'a {
		self.frames.iter().filter(move |frame| query.matches(frame))
	}

	/// Get the values of every frame matching `query`
	///
	/// Text frames produce all of their values. URL, user text, comment, and lyrics frames
	/// produce their content.
	///
	/// # Errors
	///
	/// * No frame matches ([`ErrorKind::NotPresent`])
	/// * A matching frame is a picture or is opaque ([`ErrorKind::UnsupportedFrameOperation`])
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::{FrameQuery, Id3v2Tag};
	///
	/// # fn main() -> scriptid3::error::Result<()> {
	/// let mut tag = Id3v2Tag::default();
	///
	/// let genre = FrameQuery::new("TCON")?;
	/// assert!(tag.get(&genre).is_err());
	///
	/// tag.set(&genre, vec![String::from("Rock"), String::from("Pop")], None)?;
	/// assert_eq!(tag.get(&genre)?, vec!["Rock", "Pop"]);
	/// # Ok(()) }
	/// ```
	pub fn get(&self, query: &FrameQuery) -> Result<Vec<String>> {
		let mut values = Vec::new();
		let mut found = false;

		for frame in self.get_frames(query) {
			found = true;
			match frame {
				Frame::Text(f) => values.extend(f.values.iter().cloned()),
				Frame::Url(f) => values.push(f.content.clone()),
				Frame::UserText(f) => values.push(f.content.clone()),
				Frame::UserUrl(f) => values.push(f.content.clone()),
				Frame::Comment(f) => values.push(f.content.clone()),
				Frame::UnsynchronizedText(f) => values.push(f.content.clone()),
				Frame::Picture(_) | Frame::Opaque(_) => {
					err!(UnsupportedFrameOperation(frame.id_str().to_owned()))
				},
			}
		}

		if !found {
			err!(NotPresent(query.to_string()));
		}

		Ok(values)
	}

	/// Set the values of the frame addressed by `query`
	///
	/// The first matching frame is replaced in place, and any further matches are removed. If
	/// nothing matches, a new frame is appended.
	///
	/// The encoding is chosen as follows:
	///
	/// * `encoding`, if provided (UTF-8 and UTF-16 BE are substituted with UTF-16 before ID3v2.4)
	/// * The encoding of the replaced frame, if it can represent the new values
	/// * UTF-8 for ID3v2.4, otherwise Latin-1 if it can represent the new values, or UTF-16
	///
	/// Unlike [`Id3v2Tag::get`] and [`Id3v2Tag::delete`], a query without a description or
	/// language doesn't match every `TXXX`/`WXXX`/`COMM`/`USLT` frame. The description defaults
	/// to an empty string and the language to `eng`, so only that exact frame is replaced.
	///
	/// # Errors
	///
	/// * The query ID has no structured representation ([`ErrorKind::UnsupportedFrameOperation`])
	/// * `values` is empty, or has more than one value for a frame that only holds one
	/// * The query language is not 3 ASCII letters
	pub fn set(
		&mut self,
		query: &FrameQuery,
		values: Vec<String>,
		encoding: Option<TextEncoding>,
	) -> Result<()> {
		let Some(kind) = ValueKind::for_id(query.id()) else {
			err!(UnsupportedFrameOperation(query.id().to_string()));
		};

		if values.is_empty() {
			err!(InvalidFrameValue("At least one value is required"));
		}

		if kind != ValueKind::Text && kind != ValueKind::UserText && values.len() > 1 {
			err!(InvalidFrameValue("This frame can only hold a single value"));
		}

		if let Some(language) = query.get_language() {
			verify_language(language)?;
		}

		let query = &match kind {
			ValueKind::UserText | ValueKind::UserUrl => query
				.clone()
				.description(query.get_description().unwrap_or_default()),
			ValueKind::Comment | ValueKind::Lyrics => query
				.clone()
				.description(query.get_description().unwrap_or_default())
				.language(query.get_language().unwrap_or(DEFAULT_LANGUAGE)),
			ValueKind::Text | ValueKind::Url => query.clone(),
		};

		let position = self.frames.iter().position(|frame| query.matches(frame));
		let existing = match position {
			Some(position) => {
				let existing = self.frames[position].clone();

				let mut index = 0;
				self.frames.retain(|frame| {
					let keep = index <= position || !query.matches(frame);
					index += 1;
					keep
				});

				Some(existing)
			},
			None => None,
		};

		let encoding = self.choose_encoding(
			encoding,
			existing.as_ref().and_then(Frame::encoding),
			&values,
		);

		// Languages match regardless of case, a replaced frame keeps its own
		let existing_language = match &existing {
			Some(Frame::Comment(f)) => Some(f.language),
			Some(Frame::UnsynchronizedText(f)) => Some(f.language),
			_ => None,
		};

		let description = query.get_description().unwrap_or_default().to_owned();
		let language = existing_language
			.or(query.get_language())
			.unwrap_or(DEFAULT_LANGUAGE);

		let mut values = values;
		let mut frame: Frame = match kind {
			ValueKind::Text => {
				TextInformationFrame::new(query.id().clone(), encoding, values).into()
			},
			ValueKind::UserText => {
				ExtendedTextFrame::new(encoding, description, values.join("/")).into()
			},
			ValueKind::Url => UrlLinkFrame::new(query.id().clone(), values.remove(0)).into(),
			ValueKind::UserUrl => {
				ExtendedUrlFrame::new(encoding, description, values.remove(0)).into()
			},
			ValueKind::Comment => {
				CommentFrame::new(encoding, language, description, values.remove(0)).into()
			},
			ValueKind::Lyrics => {
				UnsynchronizedTextFrame::new(encoding, language, description, values.remove(0))
					.into()
			},
		};

		match (existing, position) {
			(Some(existing), Some(position)) => {
				frame.set_flags(existing.flags().status_only());
				log::debug!("Replacing {} frame {}", existing.name(), query);
				self.frames[position] = frame;
			},
			_ => {
				log::debug!("Adding frame {}", query);
				self.frames.push(frame);
			},
		}

		Ok(())
	}

	fn choose_encoding(
		&self,
		requested: Option<TextEncoding>,
		existing: Option<TextEncoding>,
		values: &[String],
	) -> TextEncoding {
		let representable = |encoding: TextEncoding| values.iter().all(|v| encoding.can_represent(v));

		if let Some(requested) = requested {
			return requested.for_version(self.version);
		}

		if let Some(existing) = existing {
			if existing.is_supported_in(self.version) && representable(existing) {
				return existing;
			}
		}

		match self.version {
			Id3v2Version::V4 => TextEncoding::UTF8,
			_ if representable(TextEncoding::Latin1) => TextEncoding::Latin1,
			_ => TextEncoding::UTF16,
		}
	}

	/// Remove every frame matching `query`
	///
	/// Returns the number of frames removed.
	pub fn delete(&mut self, query: &FrameQuery) -> usize {
		let before = self.frames.len();
		self.frames.retain(|frame| !query.matches(frame));

		let removed = before - self.frames.len();
		log::debug!("Removed {} frames matching {}", removed, query);
		removed
	}

	/// Insert a [`Frame`]
	///
	/// This will replace any frame of the same ID, description, and language. Opaque
	/// frames and pictures are always appended.
	///
	/// Returns the replaced frame, if any.
	pub fn insert(&mut self, frame: Frame) -> Option<Frame> {
		let query = match &frame {
			Frame::Picture(_) | Frame::Opaque(_) => None,
			Frame::UserText(f) => Some(FrameQuery::for_id(f.id()).description(f.description.clone())),
			Frame::UserUrl(f) => Some(FrameQuery::for_id(f.id()).description(f.description.clone())),
			Frame::Comment(f) => Some(
				FrameQuery::for_id(f.id())
					.description(f.description.clone())
					.language(f.language),
			),
			Frame::UnsynchronizedText(f) => Some(
				FrameQuery::for_id(f.id())
					.description(f.description.clone())
					.language(f.language),
			),
			Frame::Text(_) | Frame::Url(_) => Some(FrameQuery::for_id(frame.id())),
		};

		if let Some(position) = query.and_then(|q| self.frames.iter().position(|f| q.matches(f))) {
			return Some(std::mem::replace(&mut self.frames[position], frame));
		}

		self.frames.push(frame);
		None
	}

	/// Insert a picture, replacing any picture of the same type
	///
	/// Returns the replaced picture, if any.
	pub fn insert_picture(&mut self, picture: AttachedPictureFrame) -> Option<Frame> {
		let position = self.frames.iter().position(|frame| {
			matches!(frame, Frame::Picture(p) if p.picture_type == picture.picture_type)
		});

		match position {
			Some(position) => Some(std::mem::replace(
				&mut self.frames[position],
				Frame::Picture(picture),
			)),
			None => {
				self.frames.push(Frame::Picture(picture));
				None
			},
		}
	}

	/// Convert the tag to another version
	///
	/// Frames that cannot be represented in `version` are those whose ID doesn't exist there,
	/// opaque frames whose flags change the layout of their body, and pictures without an
	/// ID3v2.2 image format when converting to ID3v2.2.
	///
	/// # Errors
	///
	/// Some frames cannot be represented in `version`, and `force` is false
	/// ([`ErrorKind::IncompatibleFrames`]). With `force`, those frames are dropped instead.
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::{FrameQuery, Id3v2Tag, Id3v2Version};
	///
	/// # fn main() -> scriptid3::error::Result<()> {
	/// let mut tag = Id3v2Tag::new(Id3v2Version::V4);
	/// tag.set(&FrameQuery::new("TIT2")?, vec![String::from("Title")], None)?;
	/// tag.set(&FrameQuery::new("TDRC")?, vec![String::from("2024")], None)?;
	///
	/// // TDRC doesn't exist in ID3v2.3
	/// assert!(tag.convert_version(Id3v2Version::V3, false).is_err());
	///
	/// tag.convert_version(Id3v2Version::V3, true)?;
	/// assert_eq!(tag.len(), 1);
	/// # Ok(()) }
	/// ```
	pub fn convert_version(&mut self, version: Id3v2Version, force: bool) -> Result<()> {
		if version == self.version {
			return Ok(());
		}

		let incompatible = self
			.frames
			.iter()
			.filter(|frame| !frame_supported_in(frame, version))
			.map(|frame| frame.id_str().to_owned())
			.collect::<Vec<_>>();

		if !incompatible.is_empty() {
			if !force {
				return Err(Id3Error::new(ErrorKind::IncompatibleFrames(incompatible)));
			}

			log::warn!(
				"Dropping frames not supported in {}: {}",
				version,
				incompatible.join(", ")
			);
			self.frames.retain(|frame| frame_supported_in(frame, version));
		}

		for frame in &mut self.frames {
			if let Some(encoding) = frame.encoding_mut() {
				*encoding = encoding.for_version(version);
			}
		}

		log::debug!("Converted tag from {} to {}", self.version, version);
		self.version = version;
		Ok(())
	}

	/// Write the tag to `writer`
	///
	/// # Errors
	///
	/// * A frame cannot be written in [`Id3v2Tag::version`] ([`ErrorKind::IncompatibleFrame`])
	/// * The text of a frame cannot be encoded
	/// * The tag is too large
	pub fn dump_to<W: Write>(&self, writer: &mut W, write_options: WriteOptions) -> Result<()> {
		let bytes = crate::write::create_tag(self, write_options)?;
		writer.write_all(&bytes)?;
		Ok(())
	}
}

fn frame_supported_in(frame: &Frame, version: Id3v2Version) -> bool {
	match frame.id() {
		FrameId::Outdated(_) if version != Id3v2Version::V2 => return false,
		FrameId::Valid(id) if !id_supported_in(id, version) => return false,
		_ => {},
	}

	match frame {
		Frame::Opaque(_) => !frame.flags().has_format_flags(),
		Frame::Picture(picture) => version != Id3v2Version::V2 || picture.v2_format().is_some(),
		_ => true,
	}
}
