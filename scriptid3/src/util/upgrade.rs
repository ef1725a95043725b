//! Mapping frame IDs between ID3v2 versions
//!
//! ID3v2.2 uses 3 character IDs, which are upgraded to their 4 character equivalent when read
//! and downgraded again when an ID3v2.2 tag is written. Some 4 character IDs only exist in one
//! of ID3v2.3 or ID3v2.4.

use crate::header::Id3v2Version;

use std::collections::HashMap;
use std::sync::OnceLock;

/// Upgrade an ID3v2.2 key to its 4 character equivalent
///
/// # Examples
///
/// ```rust
/// use scriptid3::util::upgrade::upgrade_v2;
///
/// assert_eq!(upgrade_v2("TT2"), Some("TIT2"));
/// assert_eq!(upgrade_v2("TYE"), Some("TYER"));
/// assert_eq!(upgrade_v2("CRM"), None);
/// ```
pub fn upgrade_v2(key: &str) -> Option<&'static str> {
	v2_to_v4().get(key).copied()
}

/// Downgrade a 4 character key to its ID3v2.2 equivalent
///
/// # Examples
///
/// ```rust
/// use scriptid3::util::upgrade::downgrade_v2;
///
/// assert_eq!(downgrade_v2("APIC"), Some("PIC"));
/// assert_eq!(downgrade_v2("TDRC"), None);
/// ```
pub fn downgrade_v2(key: &str) -> Option<&'static str> {
	v4_to_v2().get(key).copied()
}

/// Frames that only exist in ID3v2.3 (and ID3v2.2, via upgrade)
pub const V3_ONLY_FRAMES: &[&str] = &[
	"EQUA", "IPLS", "RVAD", "TDAT", "TIME", "TORY", "TRDA", "TSIZ", "TYER",
];

/// Frames introduced in ID3v2.4
///
/// The sort order frames (`TSOA`, `TSOP`, `TSOT`) are left out, since they are commonly
/// written to ID3v2.3 tags as well.
pub const V4_ONLY_FRAMES: &[&str] = &[
	"ASPI", "EQU2", "RVA2", "SEEK", "SIGN", "TDEN", "TDOR", "TDRC", "TDRL", "TDTG", "TIPL",
	"TMCL", "TMOO", "TPRO", "TSST",
];

/// Whether a frame with the (4 character) `id` can be stored in a tag of `version`
///
/// # Examples
///
/// ```rust
/// use scriptid3::Id3v2Version;
/// use scriptid3::util::upgrade::id_supported_in;
///
/// assert!(id_supported_in("TIT2", Id3v2Version::V2));
/// assert!(!id_supported_in("TDRC", Id3v2Version::V3));
/// assert!(!id_supported_in("TYER", Id3v2Version::V4));
/// assert!(id_supported_in("TSOP", Id3v2Version::V3));
/// ```
pub fn id_supported_in(id: &str, version: Id3v2Version) -> bool {
	match version {
		Id3v2Version::V2 => downgrade_v2(id).is_some(),
		Id3v2Version::V3 => !V4_ONLY_FRAMES.contains(&id),
		Id3v2Version::V4 => !V3_ONLY_FRAMES.contains(&id),
	}
}

macro_rules! gen_mappings {
	($($v2_key:literal <=> $v4_key:literal),+ $(,)?) => {
		const MAPPINGS: &[(&str, &str)] = &[$(($v2_key, $v4_key)),+];

		fn v2_to_v4() -> &'static HashMap<&'static str, &'static str> {
			static INSTANCE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
			INSTANCE.get_or_init(|| MAPPINGS.iter().copied().collect())
		}

		fn v4_to_v2() -> &'static HashMap<&'static str, &'static str> {
			static INSTANCE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
			INSTANCE.get_or_init(|| MAPPINGS.iter().map(|&(v2, v4)| (v4, v2)).collect())
		}
	};
}

gen_mappings!(
	// Standard frames
	"BUF" <=> "RBUF",
	"CNT" <=> "PCNT",
	"COM" <=> "COMM",
	"CRA" <=> "AENC",
	"EQU" <=> "EQUA",
	"ETC" <=> "ETCO",
	"GEO" <=> "GEOB",
	"IPL" <=> "IPLS",
	"LNK" <=> "LINK",
	"MCI" <=> "MCDI",
	"MLL" <=> "MLLT",
	"PIC" <=> "APIC",
	"POP" <=> "POPM",
	"REV" <=> "RVRB",
	"RVA" <=> "RVAD",
	"SLT" <=> "SYLT",
	"STC" <=> "SYTC",
	"TAL" <=> "TALB",
	"TBP" <=> "TBPM",
	"TCM" <=> "TCOM",
	"TCO" <=> "TCON",
	"TCR" <=> "TCOP",
	"TDA" <=> "TDAT",
	"TDY" <=> "TDLY",
	"TEN" <=> "TENC",
	"TFT" <=> "TFLT",
	"TIM" <=> "TIME",
	"TKE" <=> "TKEY",
	"TLA" <=> "TLAN",
	"TLE" <=> "TLEN",
	"TMT" <=> "TMED",
	"TOA" <=> "TOPE",
	"TOF" <=> "TOFN",
	"TOL" <=> "TOLY",
	"TOR" <=> "TORY",
	"TOT" <=> "TOAL",
	"TP1" <=> "TPE1",
	"TP2" <=> "TPE2",
	"TP3" <=> "TPE3",
	"TP4" <=> "TPE4",
	"TPA" <=> "TPOS",
	"TPB" <=> "TPUB",
	"TRC" <=> "TSRC",
	"TRD" <=> "TRDA",
	"TRK" <=> "TRCK",
	"TSI" <=> "TSIZ",
	"TSS" <=> "TSSE",
	"TT1" <=> "TIT1",
	"TT2" <=> "TIT2",
	"TT3" <=> "TIT3",
	"TXT" <=> "TEXT",
	"TXX" <=> "TXXX",
	"TYE" <=> "TYER",
	"UFI" <=> "UFID",
	"ULT" <=> "USLT",
	"WAF" <=> "WOAF",
	"WAR" <=> "WOAR",
	"WAS" <=> "WOAS",
	"WCM" <=> "WCOM",
	"WCP" <=> "WCOP",
	"WPB" <=> "WPUB",
	"WXX" <=> "WXXX",

	// iTunes non-standard frames
	"TCP" <=> "TCMP",
	"TS2" <=> "TSO2",
	"TSA" <=> "TSOA",
	"TSC" <=> "TSOC",
	"TSP" <=> "TSOP",
	"TST" <=> "TSOT",

	// Podcast
	"PCS" <=> "PCST",
	"TCT" <=> "TCAT",
	"TDS" <=> "TDES",
	"TID" <=> "TGID",
	"WFD" <=> "WFED",

	// Identifiers
	"MVI" <=> "MVIN",
	"MVN" <=> "MVNM",
	"GP1" <=> "GRP1",
	"TDR" <=> "TDRL",
);

#[cfg(test)]
mod tests {
	use super::{MAPPINGS, downgrade_v2, id_supported_in, upgrade_v2};
	use crate::header::Id3v2Version;

	#[test_log::test]
	fn sort_order_frames_in_every_version() {
		for id in ["TSOA", "TSOP", "TSOT"] {
			assert!(id_supported_in(id, Id3v2Version::V2));
			assert!(id_supported_in(id, Id3v2Version::V3));
			assert!(id_supported_in(id, Id3v2Version::V4));
		}
	}

	#[test_log::test]
	fn mappings_are_bijective() {
		for (v2, v4) in MAPPINGS {
			assert_eq!(upgrade_v2(v2), Some(*v4));
			assert_eq!(downgrade_v2(v4), Some(*v2), "{v4} maps to multiple IDs");
		}
	}
}
