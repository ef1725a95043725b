mod attached_picture_frame;
mod extended_text_frame;
mod extended_url_frame;
mod language_frame;
mod opaque_frame;
mod text_information_frame;
mod url_link_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use extended_text_frame::ExtendedTextFrame;
pub use extended_url_frame::ExtendedUrlFrame;
pub use language_frame::{CommentFrame, UnsynchronizedTextFrame};
pub use opaque_frame::OpaqueFrame;
pub use text_information_frame::TextInformationFrame;
pub use url_link_frame::UrlLinkFrame;
pub(crate) use language_frame::{DEFAULT_LANGUAGE, verify_language};
