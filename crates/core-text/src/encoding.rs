//! Encoding selection and byte decoding at the input boundary.
//!
//! `ptee` decodes at the edge and operates on a single unified `String`
//! representation in its core. Invalid byte sequences are replaced with
//! U+FFFD and streaming continues; there is no abort path for bad input
//! bytes.

use std::fmt;

/// Text encoding used for both decoding stdin and encoding sink output.
#[derive(Debug, Clone, Copy)]
pub struct Encoding(&'static encoding_rs::Encoding);

#[derive(Debug, thiserror::Error)]
#[error("unknown encoding: {0}")]
pub struct UnknownEncoding(pub String);

impl Encoding {
    pub const UTF8: Encoding = Encoding(encoding_rs::UTF_8);

    /// Resolve an encoding by its IANA/WHATWG label (case-insensitive),
    /// e.g. "utf-8", "latin1", "shift_jis".
    pub fn from_label(name: &str) -> Result<Self, UnknownEncoding> {
        encoding_rs::Encoding::for_label(name.as_bytes())
            .map(Encoding)
            .ok_or_else(|| UnknownEncoding(name.to_string()))
    }

    /// Decode a chunk of bytes, replacing malformed sequences with U+FFFD.
    /// Returns the decoded text and whether any replacement occurred.
    pub fn decode(&self, bytes: &[u8]) -> (String, bool) {
        let (cow, _encoding_used, had_errors) = self.0.decode(bytes);
        (cow.into_owned(), had_errors)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::UTF8
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_utf8() {
        assert_eq!(Encoding::default().name(), "UTF-8");
    }

    #[test]
    fn resolves_common_labels() {
        assert!(Encoding::from_label("utf-8").is_ok());
        assert!(Encoding::from_label("UTF8").is_ok());
        assert!(Encoding::from_label("latin1").is_ok());
    }

    #[test]
    fn rejects_unknown_label() {
        let err = Encoding::from_label("not-a-real-encoding").unwrap_err();
        assert_eq!(err.0, "not-a-real-encoding");
    }

    #[test]
    fn decodes_valid_utf8_without_replacement() {
        let (s, had_errors) = Encoding::UTF8.decode("héllo".as_bytes());
        assert_eq!(s, "héllo");
        assert!(!had_errors);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let bytes = [b'a', 0xFF, b'b'];
        let (s, had_errors) = Encoding::UTF8.decode(&bytes);
        assert!(had_errors);
        assert!(s.contains('\u{FFFD}'));
        assert!(s.starts_with('a'));
        assert!(s.ends_with('b'));
    }
}
