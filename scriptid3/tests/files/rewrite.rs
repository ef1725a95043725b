use crate::util::{AUDIO, file, strings, v2_frame, v3_frame, v4_frame};

use scriptid3::config::{GlobalOptions, ParseOptions, WriteOptions, apply_global_options};
use scriptid3::error::ErrorKind;
use scriptid3::{Frame, FrameQuery, Id3v2Tag, Id3v2Version, ParsedFile, rewrite};

fn title() -> FrameQuery {
	FrameQuery::new("TIT2").unwrap()
}

#[test_log::test]
fn replace_title_v3() {
	let original = file(3, &[v3_frame("TIT2", 0, b"\x00Test")]);

	let mut parsed = ParsedFile::from_bytes(original).unwrap();
	assert_eq!(parsed.tag_extent(), 25);
	assert_eq!(parsed.remainder(), AUDIO);
	assert_eq!(parsed.get(&title()).unwrap(), vec!["Test"]);

	parsed.set(&title(), strings(&["NewTitle"]), None).unwrap();

	let rewritten = parsed.to_bytes(WriteOptions::default()).unwrap();
	assert_eq!(
		rewritten,
		file(3, &[v3_frame("TIT2", 0, b"\x00NewTitle")])
	);

	let reparsed = ParsedFile::from_bytes(rewritten).unwrap();
	assert_eq!(reparsed.get(&title()).unwrap(), vec!["NewTitle"]);
	assert_eq!(reparsed.remainder(), AUDIO);
}

#[test_log::test]
fn untagged_input() {
	let err = ParsedFile::from_bytes(AUDIO.to_vec()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NotId3));

	let mut tag = Id3v2Tag::default();
	tag.set(&title(), strings(&["Title"]), None).unwrap();

	let rewritten = rewrite(AUDIO, 0, Some(&tag), WriteOptions::default()).unwrap();
	assert_eq!(rewritten, file(4, &[v4_frame("TIT2", 0, b"\x03Title")]));
}

#[test_log::test]
fn strip_tag() {
	let original = file(3, &[v3_frame("TIT2", 0, b"\x00Test")]);

	let mut parsed = ParsedFile::from_bytes(original).unwrap();
	assert!(parsed.purge(Some(Id3v2Version::V3)));

	assert_eq!(parsed.to_bytes(WriteOptions::default()).unwrap(), AUDIO);
}

#[test_log::test]
fn uninterpreted_frames_are_kept() {
	let private = v3_frame("PRIV", 0, b"owner\0\x01\x02");
	// Encrypted, the body can't be read
	let encrypted = v3_frame("TALB", 0x0040, b"\x01abcd");
	let unknown = v3_frame("XYZW", 0x8000, b"\xFF\x00\xFF");

	let original = file(
		3,
		&[
			v3_frame("TIT2", 0, b"\x00Test"),
			private.clone(),
			encrypted.clone(),
			unknown.clone(),
		],
	);

	let mut parsed = ParsedFile::from_bytes(original).unwrap();

	let tag = parsed.tag().unwrap();
	assert_eq!(tag.len(), 4);
	assert!(tag.frames()[1..].iter().all(Frame::is_opaque));
	assert!(tag.frames()[2].flags().encryption);

	parsed.set(&title(), strings(&["NewTitle"]), None).unwrap();

	let rewritten = parsed.to_bytes(WriteOptions::default()).unwrap();
	assert_eq!(
		rewritten,
		file(
			3,
			&[
				v3_frame("TIT2", 0, b"\x00NewTitle"),
				private,
				encrypted,
				unknown,
			]
		)
	);
}

#[test_log::test]
fn rewrite_is_idempotent() {
	let original = file(
		4,
		&[
			v4_frame("TCON", 0, b"\x03Rock\x00Pop"),
			v4_frame("COMM", 0, b"\x00engdesc\x00A comment"),
			v4_frame("PRIV", 0, b"owner\0\x01\x02"),
		],
	);

	let first = ParsedFile::from_bytes(original.clone())
		.unwrap()
		.to_bytes(WriteOptions::default())
		.unwrap();
	assert_eq!(first, original);

	let second = ParsedFile::from_bytes(first.clone())
		.unwrap()
		.to_bytes(WriteOptions::default())
		.unwrap();
	assert_eq!(first, second);
}

#[test_log::test]
fn padding() {
	let original = file(3, &[v3_frame("TIT2", 0, b"\x00Test")]);
	let parsed = ParsedFile::from_bytes(original.clone()).unwrap();

	let padded = parsed
		.to_bytes(WriteOptions::new().preferred_padding(16))
		.unwrap();
	assert_eq!(padded.len(), original.len() + 16);
	assert!(padded.ends_with(AUDIO));

	let reparsed = ParsedFile::from_bytes(padded).unwrap();
	assert_eq!(reparsed.tag().unwrap().padding_size, 16);
	assert_eq!(reparsed.get(&title()).unwrap(), vec!["Test"]);

	// Padding is dropped again by default
	assert_eq!(reparsed.to_bytes(WriteOptions::default()).unwrap(), original);
}

#[test_log::test]
fn v2_tag() {
	let picture = v2_frame("PIC", b"\x00PNG\x03\x00\x89PNG");
	let original = file(
		2,
		&[
			v2_frame("TT2", b"\x00Title"),
			picture,
			v2_frame("CRM", b"abc"),
		],
	);

	let mut parsed = ParsedFile::from_bytes(original.clone()).unwrap();
	assert_eq!(parsed.tag().unwrap().version, Id3v2Version::V2);
	assert_eq!(
		parsed.get(&FrameQuery::new("TT2").unwrap()).unwrap(),
		vec!["Title"]
	);

	let tag = parsed.tag().unwrap();
	let Frame::Picture(picture) = &tag.frames()[1] else {
		panic!("expected a picture");
	};
	assert_eq!(picture.mime_type, "image/png");
	assert_eq!(picture.picture_type, 3);
	assert_eq!(picture.data, b"\x89PNG");
	assert!(tag.frames()[2].is_opaque());

	assert_eq!(parsed.to_bytes(WriteOptions::default()).unwrap(), original);

	// CRM has no ID3v2.3 equivalent
	let err = parsed.convert_version(Id3v2Version::V3, false).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::IncompatibleFrames(ids) if ids == &["CRM"]));

	parsed.convert_version(Id3v2Version::V3, true).unwrap();

	let reparsed =
		ParsedFile::from_bytes(parsed.to_bytes(WriteOptions::default()).unwrap()).unwrap();
	let tag = reparsed.tag().unwrap();
	assert_eq!(tag.version, Id3v2Version::V3);
	assert_eq!(
		tag.frames().iter().map(Frame::id_str).collect::<Vec<_>>(),
		vec!["TIT2", "APIC"]
	);
	assert_eq!(reparsed.remainder(), AUDIO);
}

#[test_log::test]
fn pictures_can_be_skipped() {
	let original = file(
		3,
		&[v3_frame("APIC", 0, b"\x00image/png\x00\x03\x00\x89PNG")],
	);

	let parsed =
		ParsedFile::from_bytes_with_options(original.clone(), ParseOptions::new().read_pictures(false))
			.unwrap();
	assert!(parsed.tag().unwrap().frames()[0].is_opaque());
	assert_eq!(parsed.to_bytes(WriteOptions::default()).unwrap(), original);
}

#[test_log::test]
fn queries_by_description_and_language() {
	let original = file(
		4,
		&[
			v4_frame("TXXX", 0, b"\x03MOOD\x00calm"),
			v4_frame("TXXX", 0, b"\x03TEMPO\x00slow"),
			v4_frame("COMM", 0, b"\x03engnote\x00English"),
			v4_frame("COMM", 0, b"\x03deunote\x00Deutsch"),
		],
	);

	let mut parsed = ParsedFile::from_bytes(original).unwrap();

	let mood = FrameQuery::new("TXXX").unwrap().description("MOOD");
	assert_eq!(parsed.get(&mood).unwrap(), vec!["calm"]);

	let german = FrameQuery::new("COMM")
		.unwrap()
		.description("note")
		.language(*b"DEU");
	assert_eq!(parsed.get(&german).unwrap(), vec!["Deutsch"]);

	let all_comments = FrameQuery::new("COMM").unwrap();
	assert_eq!(
		parsed.get(&all_comments).unwrap(),
		vec!["English", "Deutsch"]
	);

	assert_eq!(parsed.delete(&german), 1);
	assert_eq!(parsed.get(&all_comments).unwrap(), vec!["English"]);

	let missing = FrameQuery::new("TXXX").unwrap().description("KEY");
	let err = parsed.get(&missing).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NotPresent(q) if q == "TXXX:KEY"));
}

#[test_log::test]
fn set_leaves_other_user_frames() {
	let original = file(
		4,
		&[
			v4_frame("TXXX", 0, b"\x03MOOD\x00calm"),
			v4_frame("TXXX", 0, b"\x03REPLAYGAIN_TRACK_GAIN\x00-6.50 dB"),
		],
	);

	let mut parsed = ParsedFile::from_bytes(original).unwrap();
	parsed
		.set(&FrameQuery::new("TXXX").unwrap(), strings(&["x"]), None)
		.unwrap();

	let reparsed =
		ParsedFile::from_bytes(parsed.to_bytes(WriteOptions::default()).unwrap()).unwrap();
	assert_eq!(reparsed.tag().unwrap().len(), 3);

	let user_text = |description: &str| {
		reparsed
			.get(&FrameQuery::new("TXXX").unwrap().description(description))
			.unwrap()
	};
	assert_eq!(user_text("MOOD"), vec!["calm"]);
	assert_eq!(user_text("REPLAYGAIN_TRACK_GAIN"), vec!["-6.50 dB"]);
	assert_eq!(user_text(""), vec!["x"]);
}

#[test_log::test]
fn footer_is_dropped_on_write() {
	let title = v4_frame("TIT2", 0, b"\x03Test");

	let mut original = b"ID3\x04\x00\x10\x00\x00\x00\x0F".to_vec();
	original.extend(&title);
	original.extend(b"3DI\x04\x00\x10\x00\x00\x00\x0F");
	original.extend(AUDIO);

	let parsed = ParsedFile::from_bytes(original).unwrap();
	assert_eq!(parsed.tag_extent(), 35);
	assert_eq!(parsed.remainder(), AUDIO);

	assert_eq!(
		parsed.to_bytes(WriteOptions::default()).unwrap(),
		file(4, &[title])
	);
}

#[test_log::test]
fn frames_over_the_allocation_limit() {
	let original = file(3, &[v3_frame("PRIV", 0, &[1; 4096])]);

	apply_global_options(GlobalOptions::new().allocation_limit(16));
	let limited = ParsedFile::from_bytes(original.clone());
	apply_global_options(GlobalOptions::default());

	assert!(matches!(limited.unwrap_err().kind(), ErrorKind::TooMuchData));
	assert!(ParsedFile::from_bytes(original).is_ok());
}
