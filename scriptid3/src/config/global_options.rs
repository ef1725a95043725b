use std::cell::Cell;

thread_local! {
	static GLOBAL_OPTIONS: Cell<GlobalOptions> = const { Cell::new(GlobalOptions::new()) };
}

pub(crate) fn global_options() -> GlobalOptions {
	GLOBAL_OPTIONS.with(Cell::get)
}

/// Options that control all interactions with scriptid3 for the current thread
///
/// # Examples
///
/// ```rust
/// use scriptid3::config::{GlobalOptions, apply_global_options};
///
/// // Refuse to allocate more than 1 MiB for a single frame
/// let global_options = GlobalOptions::new().allocation_limit(1024 * 1024);
/// apply_global_options(global_options);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
#[non_exhaustive]
pub struct GlobalOptions {
	pub(crate) allocation_limit: usize,
}

impl GlobalOptions {
	/// Default allocation limit for any single frame body
	///
	/// A single ID3v2 tag cannot exceed 256 MiB, so this leaves room for large pictures.
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 64 * 1024 * 1024;

	/// Creates a new `GlobalOptions`, alias for `Default` implementation
	///
	/// See also: [`GlobalOptions::default`]
	#[must_use]
	pub const fn new() -> Self {
		Self {
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The maximum number of bytes to allocate for any single frame
	///
	/// Frames declaring a larger body fail with [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData).
	/// The same limit applies to inflating a compressed frame and to the padding of a written tag.
	pub fn allocation_limit(mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		self
	}
}

impl Default for GlobalOptions {
	fn default() -> Self {
		Self::new()
	}
}

/// Applies the given `GlobalOptions` to the current thread
pub fn apply_global_options(options: GlobalOptions) {
	GLOBAL_OPTIONS.with(|global_options| global_options.set(options));
}
