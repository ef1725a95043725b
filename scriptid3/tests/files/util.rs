use scriptid3::util::synchsafe::encode_synchsafe;

/// The audio that follows every test tag
pub const AUDIO: &[u8] = b"\xFF\xFB\x90\x00audio";

/// Build a complete file, a tag with `frames` followed by [`AUDIO`]
pub fn file(major: u8, frames: &[Vec<u8>]) -> Vec<u8> {
	let body = frames.concat();

	let mut file = vec![b'I', b'D', b'3', major, 0, 0];
	file.extend(encode_synchsafe(body.len() as u32).unwrap());
	file.extend(body);
	file.extend(AUDIO);
	file
}

/// An ID3v2.2 frame
pub fn v2_frame(id: &str, body: &[u8]) -> Vec<u8> {
	let mut frame = id.as_bytes().to_vec();
	frame.extend(&(body.len() as u32).to_be_bytes()[1..]);
	frame.extend(body);
	frame
}

/// An ID3v2.3 frame
pub fn v3_frame(id: &str, flags: u16, body: &[u8]) -> Vec<u8> {
	let mut frame = id.as_bytes().to_vec();
	frame.extend((body.len() as u32).to_be_bytes());
	frame.extend(flags.to_be_bytes());
	frame.extend(body);
	frame
}

/// An ID3v2.4 frame
pub fn v4_frame(id: &str, flags: u16, body: &[u8]) -> Vec<u8> {
	let mut frame = id.as_bytes().to_vec();
	frame.extend(encode_synchsafe(body.len() as u32).unwrap());
	frame.extend(flags.to_be_bytes());
	frame.extend(body);
	frame
}

pub fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|v| (*v).to_owned()).collect()
}
