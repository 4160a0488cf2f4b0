//! Lossy text decoding.

use encoding_rs::UTF_8;
use std::fs;
use std::io;
use std::path::Path;

/// Decode bytes as UTF-8, replacing malformed sequences with U+FFFD and
/// dropping a leading byte-order mark.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let (text, _had_errors) = UTF_8.decode_with_bom_removal(bytes);
    text.into_owned()
}

/// Read a whole file as text. Only I/O failures are errors; undecodable
/// bytes never are.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_lossy(&bytes))
}

#[cfg(test)]
mod tests {
    use super::{decode_lossy, read_file_lossy};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn replaces_invalid_bytes() {
        let text = decode_lossy(b"ok \xff\xfe done");
        assert!(text.starts_with("ok "));
        assert!(text.contains('\u{FFFD}'));
        assert!(text.ends_with(" done"));
    }

    #[test]
    fn strips_utf8_bom() {
        assert_eq!(decode_lossy(b"\xef\xbb\xbfhello"), "hello");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().expect("tmp");
        assert!(read_file_lossy(&tmp.path().join("absent.txt")).is_err());

        fs::write(tmp.path().join("present.txt"), "text").expect("write");
        assert_eq!(read_file_lossy(&tmp.path().join("present.txt")).expect("read"), "text");
    }
}
