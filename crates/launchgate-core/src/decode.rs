//! Decoding of OS-provided argument and path byte buffers.
//!
//! Endpoint Security hands us NUL-terminated byte buffers in the platform's
//! native encoding (UTF-8 on macOS). Decoding must be total: the engine
//! compares the result against fixed policy constants, so malformed bytes
//! decode lossily into a string that can never match, rather than failing.

use std::borrow::Cow;

/// Decode one OS byte buffer as text.
///
/// Truncates at the first NUL (C-string semantics), then decodes as UTF-8
/// with replacement characters for malformed sequences. Never fails.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8_round_trips() {
        assert_eq!(decode(b"/usr/libexec/xpcproxy"), "/usr/libexec/xpcproxy");
    }

    #[test]
    fn trailing_nul_is_stripped() {
        assert_eq!(decode(b"/bin/ls\0"), "/bin/ls");
    }

    #[test]
    fn truncates_at_first_interior_nul() {
        assert_eq!(decode(b"/bin/ls\0garbage"), "/bin/ls");
    }

    #[test]
    fn empty_buffer_decodes_to_empty() {
        assert_eq!(decode(b""), "");
        assert_eq!(decode(b"\0"), "");
    }

    #[test]
    fn malformed_bytes_decode_lossily() {
        // Invalid UTF-8 becomes replacement characters, never a panic.
        let decoded = decode(&[0x2f, 0x62, 0xff, 0xfe, 0x69, 0x6e]);
        assert!(decoded.contains('\u{fffd}'));
    }

    #[test]
    fn malformed_bytes_never_match_a_policy_path() {
        // A buffer that is byte-wise "close" to a real path but invalid UTF-8
        // must decode to something that cannot equal the original path.
        let mut bytes = b"/System/Applications/Music.app/Contents/MacOS/Music".to_vec();
        bytes[3] = 0xff;
        assert_ne!(
            decode(&bytes),
            "/System/Applications/Music.app/Contents/MacOS/Music"
        );
    }
}
