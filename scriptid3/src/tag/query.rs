use crate::error::Result;
use crate::frame::Frame;
use crate::frame::header::FrameId;

use std::fmt::{Display, Formatter};

/// Addresses frames within an [`Id3v2Tag`](crate::Id3v2Tag)
///
/// Most frames are addressed by their ID alone. `TXXX` and `WXXX` frames are further told apart
/// by their description, and `COMM`/`USLT` frames by their description and language.
///
/// A description or language that isn't set matches any frame, except when setting values,
/// see [`Id3v2Tag::set`](crate::Id3v2Tag::set).
///
/// # Examples
///
/// ```rust
/// use scriptid3::FrameQuery;
///
/// # fn main() -> scriptid3::error::Result<()> {
/// // ID3v2.2 IDs are upgraded
/// let title = FrameQuery::new("TT2")?;
/// assert_eq!(title.id().as_str(), "TIT2");
///
/// let comment = FrameQuery::new("COMM")?.description("").language(*b"eng");
/// assert_eq!(comment.to_string(), "COMM::eng");
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameQuery {
	id: FrameId,
	description: Option<String>,
	language: Option<[u8; 3]>,
}

impl FrameQuery {
	/// Create a query matching every frame with `id`
	///
	/// # Errors
	///
	/// `id` is not a valid frame ID, see [`FrameId::new`]
	pub fn new(id: &str) -> Result<Self> {
		Ok(Self {
			id: FrameId::upgraded(id)?,
			description: None,
			language: None,
		})
	}

	pub(crate) fn for_id(id: &FrameId) -> Self {
		Self {
			id: id.clone(),
			description: None,
			language: None,
		}
	}

	/// Only match frames with this description
	#[must_use]
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Only match frames with this language
	#[must_use]
	pub fn language(mut self, language: [u8; 3]) -> Self {
		self.language = Some(language);
		self
	}

	/// The frame ID being queried
	pub fn id(&self) -> &FrameId {
		&self.id
	}

	/// The description to match, if any
	pub fn get_description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// The language to match, if any
	pub fn get_language(&self) -> Option<[u8; 3]> {
		self.language
	}

	/// Whether `frame` is addressed by this query
	pub fn matches(&self, frame: &Frame) -> bool {
		if frame.id() != &self.id {
			return false;
		}

		match frame {
			Frame::UserText(f) => self.description_matches(&f.description),
			Frame::UserUrl(f) => self.description_matches(&f.description),
			Frame::Comment(f) => {
				self.description_matches(&f.description) && self.language_matches(f.language)
			},
			Frame::UnsynchronizedText(f) => {
				self.description_matches(&f.description) && self.language_matches(f.language)
			},
			_ => true,
		}
	}

	fn description_matches(&self, description: &str) -> bool {
		self.description.as_deref().is_none_or(|d| d == description)
	}

	fn language_matches(&self, language: [u8; 3]) -> bool {
		self.language.is_none_or(|l| l.eq_ignore_ascii_case(&language))
	}
}

impl Display for FrameQuery {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.id)?;

		if self.description.is_none() && self.language.is_none() {
			return Ok(());
		}

		write!(f, ":{}", self.description.as_deref().unwrap_or_default())?;
		if let Some(language) = self.language {
			write!(f, ":{}", String::from_utf8_lossy(&language))?;
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::FrameQuery;
	use crate::frame::Frame;
	use crate::items::{CommentFrame, ExtendedTextFrame};
	use crate::util::text::TextEncoding;

	fn comment(language: &[u8; 3], description: &str) -> Frame {
		Frame::Comment(CommentFrame::new(
			TextEncoding::Latin1,
			*language,
			String::from(description),
			String::from("content"),
		))
	}

	#[test_log::test]
	fn comment_queries() {
		let english = comment(b"eng", "");
		let german = comment(b"deu", "note");

		let any = FrameQuery::new("COMM").unwrap();
		assert!(any.matches(&english) && any.matches(&german));

		let by_language = FrameQuery::new("COMM").unwrap().language(*b"ENG");
		assert!(by_language.matches(&english));
		assert!(!by_language.matches(&german));

		let by_description = FrameQuery::new("COMM").unwrap().description("note");
		assert!(!by_description.matches(&english));
		assert!(by_description.matches(&german));
	}

	#[test_log::test]
	fn user_text_queries() {
		let frame = Frame::UserText(ExtendedTextFrame::new(
			TextEncoding::UTF8,
			String::from("MOOD"),
			String::from("calm"),
		));

		assert!(FrameQuery::new("TXXX").unwrap().matches(&frame));
		assert!(FrameQuery::new("TXX").unwrap().description("MOOD").matches(&frame));
		assert!(!FrameQuery::new("TXXX").unwrap().description("mood").matches(&frame));
		assert!(!FrameQuery::new("TIT2").unwrap().matches(&frame));
	}

	#[test_log::test]
	fn display() {
		assert_eq!(FrameQuery::new("TIT2").unwrap().to_string(), "TIT2");
		assert_eq!(
			FrameQuery::new("TXXX").unwrap().description("MOOD").to_string(),
			"TXXX:MOOD"
		);
	}
}
