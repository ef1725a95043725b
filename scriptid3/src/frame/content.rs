use crate::config::ParseOptions;
use crate::error::Result;
use crate::frame::header::FrameId;
use crate::frame::{Frame, FrameFlags};
use crate::header::Id3v2Version;
use crate::items::{
	AttachedPictureFrame, CommentFrame, ExtendedTextFrame, ExtendedUrlFrame, OpaqueFrame,
	TextInformationFrame, UnsynchronizedTextFrame, UrlLinkFrame,
};

#[rustfmt::skip]
pub(super) fn parse_content(
	content: &[u8],
	id: FrameId,
	flags: FrameFlags,
	version: Id3v2Version,
	parse_options: ParseOptions,
) -> Result<Frame> {
	log::trace!("Parsing frame content for ID: {}", id);

	let reader = &mut &content[..];
	Ok(match id.as_str() {
		// The ID was previously upgraded, but the content remains unchanged, so version is necessary
		"APIC" if parse_options.read_pictures => {
			Frame::Picture(AttachedPictureFrame::parse(reader, flags, version)?)
		},
		"TXXX" => Frame::UserText(ExtendedTextFrame::parse(reader, flags, version)?),
		"WXXX" => Frame::UserUrl(ExtendedUrlFrame::parse(reader, flags, version)?),
		"COMM" => Frame::Comment(CommentFrame::parse(reader, flags, version)?),
		"USLT" => Frame::UnsynchronizedText(UnsynchronizedTextFrame::parse(reader, flags, version)?),
		i if i.starts_with('T') => Frame::Text(TextInformationFrame::parse(reader, id, flags, version)?),
		// Apple proprietary frames
		// GRP1 (Grouping), MVNM (Movement Name), MVIN (Movement Number)
		"GRP1" | "MVNM" | "MVIN" => Frame::Text(TextInformationFrame::parse(reader, id, flags, version)?),
		i if i.starts_with('W') => Frame::Url(UrlLinkFrame::parse(reader, id, flags)?),
		// APIC when pictures are skipped, and any unknown frames
		_ => Frame::Opaque(OpaqueFrame::new(id, flags, content.to_vec())),
	})
}
