use crate::util::{AUDIO, file, strings, v2_frame, v3_frame};

use scriptid3::config::{ParseOptions, WriteOptions};
use scriptid3::error::ErrorKind;
use scriptid3::{AttachedPictureFrame, FrameQuery, ParsedFile, TextEncoding};

use std::path::Path;

fn title() -> FrameQuery {
	FrameQuery::new("TIT2").unwrap()
}

fn entries(dir: &Path) -> usize {
	std::fs::read_dir(dir).unwrap().count()
}

#[test_log::test]
fn save_in_place() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("song.mp3");
	std::fs::write(&path, file(3, &[v3_frame("TIT2", 0, b"\x00Test")])).unwrap();

	let mut parsed = ParsedFile::open(&path).unwrap();
	assert_eq!(parsed.path(), Some(path.as_path()));

	parsed.set(&title(), strings(&["NewTitle"]), None).unwrap();
	parsed.save().unwrap();

	assert_eq!(
		std::fs::read(&path).unwrap(),
		file(3, &[v3_frame("TIT2", 0, b"\x00NewTitle")])
	);
	// The temporary file was renamed over the original
	assert_eq!(entries(dir.path()), 1);

	// The extent follows the new tag
	assert_eq!(parsed.tag_extent(), 29);
	assert_eq!(parsed.remainder(), AUDIO);

	let reopened = ParsedFile::open(&path).unwrap();
	assert_eq!(reopened.get(&title()).unwrap(), vec!["NewTitle"]);
}

#[test_log::test]
fn save_over_padded_tag() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("song.mp3");

	// Declares 16 bytes, the frame only takes 15
	let mut original = b"ID3\x03\x00\x00\x00\x00\x00\x10".to_vec();
	original.extend(v3_frame("TIT2", 0, b"\x00Test"));
	original.push(0);
	original.extend(AUDIO);
	std::fs::write(&path, &original).unwrap();

	let mut parsed = ParsedFile::open(&path).unwrap();
	assert_eq!(parsed.tag_extent(), 26);
	assert_eq!(parsed.tag().unwrap().padding_size, 1);

	parsed.set(&title(), strings(&["NewTitle"]), None).unwrap();
	parsed.save().unwrap();

	let saved = std::fs::read(&path).unwrap();
	assert_eq!(saved, file(3, &[v3_frame("TIT2", 0, b"\x00NewTitle")]));
	assert!(saved.ends_with(&original[26..]));

	let reopened = ParsedFile::open(&path).unwrap();
	assert_eq!(reopened.get(&title()).unwrap(), vec!["NewTitle"]);
}

#[test_log::test]
fn add_tag_to_untagged_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("song.mp3");
	std::fs::write(&path, AUDIO).unwrap();

	let err = ParsedFile::open(&path).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NotId3));

	// Nothing to write, the file stays untagged
	let mut parsed = ParsedFile::open_or_new(&path).unwrap();
	assert_eq!(parsed.tag_extent(), 0);
	parsed.save().unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), AUDIO);

	parsed.set(&title(), strings(&["Title"]), None).unwrap();
	parsed.save().unwrap();

	let reopened = ParsedFile::open(&path).unwrap();
	assert_eq!(reopened.get(&title()).unwrap(), vec!["Title"]);
	assert_eq!(reopened.remainder(), AUDIO);
}

#[test_log::test]
fn open_or_new_with_options() {
	let dir = tempfile::tempdir().unwrap();
	let tagged = dir.path().join("tagged.mp3");
	let untagged = dir.path().join("untagged.mp3");

	std::fs::write(
		&tagged,
		file(
			3,
			&[v3_frame("APIC", 0, b"\x00image/png\x00\x03\x00\x89PNG")],
		),
	)
	.unwrap();
	std::fs::write(&untagged, AUDIO).unwrap();

	let options = ParseOptions::new().read_pictures(false);

	let parsed = ParsedFile::open_or_new_with_options(&tagged, options).unwrap();
	assert!(parsed.tag().unwrap().frames()[0].is_opaque());

	let parsed = ParsedFile::open_or_new_with_options(&untagged, options).unwrap();
	assert!(parsed.tag().unwrap().is_empty());
	assert_eq!(parsed.tag_extent(), 0);
	assert_eq!(parsed.remainder(), AUDIO);
}

#[test_log::test]
fn remove_tag_from_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("song.mp3");
	std::fs::write(&path, file(3, &[v3_frame("TIT2", 0, b"\x00Test")])).unwrap();

	let mut parsed = ParsedFile::open(&path).unwrap();
	assert!(parsed.remove_tag().is_some());
	parsed.save().unwrap();

	assert_eq!(std::fs::read(&path).unwrap(), AUDIO);
	assert_eq!(parsed.tag_extent(), 0);
}

#[test_log::test]
fn failed_save_leaves_file_untouched() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("song.mp3");
	let original = file(
		2,
		&[
			v2_frame("TT2", b"\x00Title"),
			v2_frame("PIC", b"\x00PNG\x03\x00\x89PNG"),
		],
	);
	std::fs::write(&path, &original).unwrap();

	let mut parsed = ParsedFile::open(&path).unwrap();

	// WebP has no ID3v2.2 image format
	let webp = AttachedPictureFrame::new(
		TextEncoding::Latin1,
		String::from("image/webp"),
		3,
		String::new(),
		b"RIFF".to_vec(),
	);
	assert!(parsed.tag_mut().unwrap().insert_picture(webp).is_some());

	let err = parsed.save().unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::BadPictureFormat(mime) if mime == "image/webp"));

	assert_eq!(std::fs::read(&path).unwrap(), original);
	assert_eq!(entries(dir.path()), 1);
}

#[test_log::test]
fn save_copy() {
	let dir = tempfile::tempdir().unwrap();
	let copy = dir.path().join("copy.mp3");

	let mut parsed =
		ParsedFile::from_bytes(file(3, &[v3_frame("TIT2", 0, b"\x00Test")])).unwrap();
	parsed.set(&title(), strings(&["Copy"]), None).unwrap();

	// Only files read from disk have somewhere to be saved
	let err = parsed.save().unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Io(_)));

	parsed
		.save_to_path(&copy, WriteOptions::default())
		.unwrap();

	let reopened = ParsedFile::open(&copy).unwrap();
	assert_eq!(reopened.get(&title()).unwrap(), vec!["Copy"]);
	assert_eq!(reopened.remainder(), AUDIO);
}
