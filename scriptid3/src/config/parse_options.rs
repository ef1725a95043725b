/// Options to control how scriptid3 parses a tag
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_pictures: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	read_pictures: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_pictures: true,
		}
	}

	/// Whether or not to decode attached pictures
	///
	/// When disabled, `APIC` frames are kept as opaque frames. They are still written back
	/// untouched, only the picture data is never interpreted.
	///
	/// # Examples
	///
	/// ```rust
	/// use scriptid3::config::ParseOptions;
	///
	/// // Only text is being edited, no need to look at the pictures
	/// let parsing_options = ParseOptions::new().read_pictures(false);
	/// ```
	pub fn read_pictures(&mut self, read_pictures: bool) -> Self {
		self.read_pictures = read_pictures;
		*self
	}
}
