/// Options to control how scriptid3 writes a tag
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) lossy_text_encoding: bool,
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: None,
			lossy_text_encoding: false,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// By default, written tags carry no padding, so the file shrinks to exactly the frames
	/// that are present.
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::config::WriteOptions;
	///
	/// // Leave some room for future edits
	/// let options = WriteOptions::new().preferred_padding(1024);
	///
	/// // ...Or no padding at all
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}

	/// Whether to replace characters that cannot be represented in Latin-1
	///
	/// When enabled, such characters are written as `?`. Otherwise, encoding fails with
	/// [`ErrorKind::TextEncode`](crate::error::ErrorKind::TextEncode).
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::config::WriteOptions;
	///
	/// let options = WriteOptions::new().lossy_text_encoding(true);
	/// ```
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: None,
	/// 	lossy_text_encoding: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
