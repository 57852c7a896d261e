//! Location name helpers: base64 detection and zone derivation.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// Zone reported when a location name has no zone prefix.
pub const UNKNOWN_ZONE: &str = "Unknown";

/// Names this short are never treated as encoded.
const MIN_ENCODED_LEN: usize = 10;

/// Standard alphabet, accepting names with or without `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a location name that was stored base64 encoded.
///
/// A name is decoded only when it is longer than 10 characters, consists
/// solely of base64 alphabet characters, and decodes to printable ASCII.
/// Anything else is returned unchanged.
///
/// ```rust
/// # use binscope_core::decode_location_name;
/// assert_eq!(decode_location_name("QmluLUEtMDEtMDI="), "Bin-A-01-02");
/// assert_eq!(decode_location_name("A-01-02"), "A-01-02");
/// ```
#[must_use]
pub fn decode_location_name(name: &str) -> String {
    try_decode(name).unwrap_or_else(|| name.to_string())
}

fn try_decode(name: &str) -> Option<String> {
    if name.len() <= MIN_ENCODED_LEN || !name.bytes().all(is_base64_byte) {
        return None;
    }

    let bytes = LENIENT.decode(name).ok()?;
    if bytes.is_empty() || !bytes.iter().all(|b| (0x20..=0x7E).contains(b)) {
        return None;
    }

    String::from_utf8(bytes).ok()
}

const fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

/// Derive the zone from a location name: the text before the first `-`.
///
/// ```rust
/// # use binscope_core::zone_of;
/// assert_eq!(zone_of("A-12-B"), "A");
/// assert_eq!(zone_of("NOZONE"), "Unknown");
/// ```
#[must_use]
pub fn zone_of(name: &str) -> String {
    match name.split_once('-') {
        Some((zone, _)) if !zone.is_empty() => zone.to_string(),
        _ => UNKNOWN_ZONE.to_string(),
    }
}
