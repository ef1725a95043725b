use crate::config::{ParseOptions, WriteOptions};
use crate::error::{ErrorKind, Id3Error, Result};
use crate::header::Id3v2Version;
use crate::read::parse_id3v2;
use crate::tag::{FrameQuery, Id3v2Tag};
use crate::util::text::TextEncoding;
use crate::write::rewrite;

use std::io::Write;
use std::path::{Path, PathBuf};

/// A file with its ID3v2 tag parsed
///
/// The whole file is read into memory. The bytes following the tag are never interpreted, they
/// are copied as-is when the file is saved.
///
/// # Examples
///
/// ```rust,no_run
/// use scriptid3::{FrameQuery, ParsedFile};
///
/// # fn main() -> scriptid3::error::Result<()> {
/// let mut file = ParsedFile::open_or_new("song.mp3")?;
///
/// let title = FrameQuery::new("TIT2")?;
/// file.set(&title, vec![String::from("New title")], None)?;
/// file.save()?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct ParsedFile {
	tag: Option<Id3v2Tag>,
	tag_extent: usize,
	original: Vec<u8>,
	path: Option<PathBuf>,
	had_tag: bool,
}

impl ParsedFile {
	/// Read and parse the file at `path`
	///
	/// # Errors
	///
	/// * The file could not be read
	/// * The file has no ID3v2 tag ([`ErrorKind::NotId3`])
	/// * The tag is malformed
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with_options(path, ParseOptions::default())
	}

	/// Read and parse the file at `path` with the given [`ParseOptions`]
	///
	/// # Errors
	///
	/// See [`ParsedFile::open`]
	pub fn open_with_options(path: impl AsRef<Path>, parse_options: ParseOptions) -> Result<Self> {
		let path = path.as_ref();
		log::debug!("Opening {}", path.display());

		let mut file = Self::from_bytes_with_options(std::fs::read(path)?, parse_options)?;
		file.path = Some(path.to_path_buf());
		Ok(file)
	}

	/// Read and parse the file at `path`, starting an empty ID3v2.4 tag if it has none
	///
	/// # Errors
	///
	/// * The file could not be read
	/// * The tag is malformed
	pub fn open_or_new(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_or_new_with_options(path, ParseOptions::default())
	}

	/// Read and parse the file at `path` with the given [`ParseOptions`], starting an empty
	/// ID3v2.4 tag if it has none
	///
	/// # Errors
	///
	/// See [`ParsedFile::open_or_new`]
	pub fn open_or_new_with_options(
		path: impl AsRef<Path>,
		parse_options: ParseOptions,
	) -> Result<Self> {
		let path = path.as_ref();
		let bytes = std::fs::read(path)?;

		let (tag, tag_extent, had_tag) = match parse_id3v2(&bytes, parse_options) {
			Ok((tag, tag_extent)) => (tag, tag_extent, true),
			Err(e) if matches!(e.kind(), ErrorKind::NotId3) => {
				log::debug!("No tag found in {}, starting a new one", path.display());
				(Id3v2Tag::default(), 0, false)
			},
			Err(e) => return Err(e),
		};

		Ok(Self {
			tag: Some(tag),
			tag_extent,
			original: bytes,
			path: Some(path.to_path_buf()),
			had_tag,
		})
	}

	/// Parse a file that is already in memory
	///
	/// # Errors
	///
	/// * `bytes` doesn't start with an ID3v2 tag ([`ErrorKind::NotId3`])
	/// * The tag is malformed
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		Self::from_bytes_with_options(bytes, ParseOptions::default())
	}

	/// Parse a file that is already in memory with the given [`ParseOptions`]
	///
	/// # Errors
	///
	/// See [`ParsedFile::from_bytes`]
	pub fn from_bytes_with_options(bytes: Vec<u8>, parse_options: ParseOptions) -> Result<Self> {
		let (tag, tag_extent) = parse_id3v2(&bytes, parse_options)?;

		Ok(Self {
			tag: Some(tag),
			tag_extent,
			original: bytes,
			path: None,
			had_tag: true,
		})
	}

	/// The tag, if it hasn't been removed
	pub fn tag(&self) -> Option<&Id3v2Tag> {
		self.tag.as_ref()
	}

	/// A mutable reference to the tag, if it hasn't been removed
	pub fn tag_mut(&mut self) -> Option<&mut Id3v2Tag> {
		self.tag.as_mut()
	}

	/// Replace the tag
	pub fn set_tag(&mut self, tag: Id3v2Tag) {
		self.tag = Some(tag);
	}

	/// Remove the tag, it will be stripped from the file on save
	///
	/// Returns the removed tag.
	pub fn remove_tag(&mut self) -> Option<Id3v2Tag> {
		self.tag.take()
	}

	/// Remove the tag if it is of `version`, or regardless of its version if `version` is `None`
	///
	/// Returns whether the tag was removed.
	pub fn purge(&mut self, version: Option<Id3v2Version>) -> bool {
		let purge = match (&self.tag, version) {
			(None, _) => false,
			(Some(_), None) => true,
			(Some(tag), Some(version)) => tag.version == version,
		};

		if purge {
			log::debug!("Purging tag");
			self.tag = None;
		}

		purge
	}

	/// The size of the tag on disk, and the offset of the first byte that follows it
	pub fn tag_extent(&self) -> usize {
		self.tag_extent
	}

	/// Everything following the tag on disk
	pub fn remainder(&self) -> &[u8] {
		&self.original[self.tag_extent..]
	}

	/// The path the file was read from, if any
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Get the values addressed by `query`, see [`Id3v2Tag::get`]
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::get`]. With no tag, this is always [`ErrorKind::NotPresent`].
	pub fn get(&self, query: &FrameQuery) -> Result<Vec<String>> {
		match &self.tag {
			Some(tag) => tag.get(query),
			None => Err(Id3Error::new(ErrorKind::NotPresent(query.to_string()))),
		}
	}

	/// Set the values addressed by `query`, see [`Id3v2Tag::set`]
	///
	/// A new ID3v2.4 tag is started if the tag was removed.
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::set`]
	pub fn set(
		&mut self,
		query: &FrameQuery,
		values: Vec<String>,
		encoding: Option<TextEncoding>,
	) -> Result<()> {
		self.tag
			.get_or_insert_with(Id3v2Tag::default)
			.set(query, values, encoding)
	}

	/// Remove the frames addressed by `query`, see [`Id3v2Tag::delete`]
	pub fn delete(&mut self, query: &FrameQuery) -> usize {
		self.tag.as_mut().map_or(0, |tag| tag.delete(query))
	}

	/// Convert the tag to `version`, see [`Id3v2Tag::convert_version`]
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::convert_version`]
	pub fn convert_version(&mut self, version: Id3v2Version, force: bool) -> Result<()> {
		match &mut self.tag {
			Some(tag) => tag.convert_version(version, force),
			None => Ok(()),
		}
	}

	/// Build the complete file, with the current tag followed by the untouched remainder
	///
	/// # Errors
	///
	/// See [`rewrite`]
	pub fn to_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		rewrite(
			&self.original,
			self.tag_extent,
			self.tag.as_ref(),
			write_options,
		)
	}

	/// Write the file back to the path it was read from
	///
	/// # Errors
	///
	/// See [`ParsedFile::save_with_options`]
	pub fn save(&mut self) -> Result<()> {
		self.save_with_options(WriteOptions::default())
	}

	/// Write the file back to the path it was read from with the given [`WriteOptions`]
	///
	/// A file that had no tag, and still has nothing to write, is left alone.
	///
	/// The file is replaced atomically, see [`ParsedFile::save_to_path`].
	///
	/// # Errors
	///
	/// * The file wasn't read from a path
	/// * The tag could not be encoded
	/// * The file could not be written
	pub fn save_with_options(&mut self, write_options: WriteOptions) -> Result<()> {
		let Some(path) = self.path.clone() else {
			return Err(Id3Error::new(ErrorKind::Io(std::io::Error::new(
				std::io::ErrorKind::InvalidInput,
				"the file was not read from a path",
			))));
		};

		if !self.had_tag && self.tag.as_ref().is_none_or(Id3v2Tag::is_empty) {
			log::debug!("Nothing to write to {}", path.display());
			return Ok(());
		}

		let image = self.to_bytes(write_options)?;
		write_atomic(&path, &image)?;

		let remainder_len = self.original.len() - self.tag_extent;
		self.tag_extent = image.len() - remainder_len;
		self.original = image;
		self.had_tag = self.tag.is_some();

		Ok(())
	}

	/// Write the file to `path`
	///
	/// The new contents are written to a temporary file in the same directory, which then
	/// replaces `path`. If anything fails, `path` is left untouched and the temporary file is
	/// removed. An existing file at `path` keeps its permissions.
	///
	/// # Errors
	///
	/// * The tag could not be encoded
	/// * The file could not be written
	pub fn save_to_path(&self, path: impl AsRef<Path>, write_options: WriteOptions) -> Result<()> {
		let image = self.to_bytes(write_options)?;
		write_atomic(path.as_ref(), &image)
	}
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	log::debug!("Writing {} bytes to {}", contents.len(), path.display());

	// Dropping the temporary file before `persist` deletes it
	let mut temp = tempfile::NamedTempFile::new_in(dir)?;
	temp.write_all(contents)?;

	if let Ok(metadata) = std::fs::metadata(path) {
		temp.as_file().set_permissions(metadata.permissions())?;
	}

	temp.as_file().sync_all()?;
	temp.persist(path)?;

	Ok(())
}
