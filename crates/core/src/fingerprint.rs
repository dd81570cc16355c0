//! Content-based video file fingerprinting.
//!
//! Implements the hash the subtitle service uses for exact-match lookups:
//! the file size plus the wrapping sums of the first and last 64 KiB of the
//! file interpreted as little-endian u64 words, truncated to 64 bits and
//! rendered as a 16-digit lowercase hex string. The byte windows and the
//! summation order are a published third-party contract and must not change.

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use thiserror::Error;

/// Size of each hashed byte window.
const WINDOW_SIZE: u64 = 65536;

/// Smallest file the hash is defined for (two full windows).
pub const MIN_FILE_SIZE: u64 = WINDOW_SIZE * 2;

/// Errors that can occur while fingerprinting a file.
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("file too small to fingerprint ({size} bytes): {path}")]
    TooSmall { path: String, size: u64 },

    #[error("i/o error while fingerprinting {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A 64-bit content fingerprint, rendered as 16 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the fingerprint of a video file.
///
/// Fails with [`FingerprintError::TooSmall`] for files under 128 KiB; any
/// read failure surfaces as [`FingerprintError::Io`]. Callers decide whether
/// a missing fingerprint is fatal — searching by name alone is still valid.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, FingerprintError> {
    let display = path.display().to_string();

    let mut file = File::open(path).map_err(|e| io_error(&display, e))?;
    let size = file
        .metadata()
        .map_err(|e| io_error(&display, e))?
        .len();

    if size < MIN_FILE_SIZE {
        return Err(FingerprintError::TooSmall {
            path: display,
            size,
        });
    }

    let mut hash = size;
    hash = hash.wrapping_add(sum_window(&mut file).map_err(|e| io_error(&display, e))?);

    file.seek(SeekFrom::End(-(WINDOW_SIZE as i64)))
        .map_err(|e| io_error(&display, e))?;
    hash = hash.wrapping_add(sum_window(&mut file).map_err(|e| io_error(&display, e))?);

    Ok(Fingerprint(format!("{:016x}", hash)))
}

/// Sum one 64 KiB window as little-endian u64 words, wrapping on overflow.
fn sum_window(file: &mut File) -> Result<u64, std::io::Error> {
    let mut buf = vec![0u8; WINDOW_SIZE as usize];
    file.read_exact(&mut buf)?;

    let mut sum = 0u64;
    for chunk in buf.chunks_exact(8) {
        let word = u64::from_le_bytes(chunk.try_into().expect("chunks_exact yields 8-byte slices"));
        sum = sum.wrapping_add(word);
    }
    Ok(sum)
}

fn io_error(path: &str, source: std::io::Error) -> FingerprintError {
    FingerprintError::Io {
        path: path.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// 140000 bytes of `i % 251` — the pinned reference input.
    fn pattern_bytes() -> Vec<u8> {
        (0..140000usize).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_known_reference_value() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "reference.mkv", &pattern_bytes());

        let fp = fingerprint_file(&path).unwrap();
        assert_eq!(fp.as_str(), "e39a4f0fc67d3f73");
    }

    #[test]
    fn test_all_zero_file_hashes_to_its_size() {
        // Both window sums are zero, so the hash is just the byte size.
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "zeros.mp4", &vec![0u8; MIN_FILE_SIZE as usize]);

        let fp = fingerprint_file(&path).unwrap();
        assert_eq!(fp.as_str(), "0000000000020000");
    }

    #[test]
    fn test_deterministic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "video.mp4", &pattern_bytes());

        let first = fingerprint_file(&path).unwrap();
        let second = fingerprint_file(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_content_different_names() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "release-a.mkv", &pattern_bytes());
        let b = write_file(&dir, "totally.different.name.avi", &pattern_bytes());

        assert_eq!(fingerprint_file(&a).unwrap(), fingerprint_file(&b).unwrap());
    }

    #[test]
    fn test_too_small_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "tiny.mp4", &vec![1u8; (MIN_FILE_SIZE - 1) as usize]);

        let err = fingerprint_file(&path).unwrap_err();
        assert!(matches!(err, FingerprintError::TooSmall { size, .. } if size == MIN_FILE_SIZE - 1));
    }

    #[test]
    fn test_minimum_size_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "exact.mp4", &vec![7u8; MIN_FILE_SIZE as usize]);

        assert!(fingerprint_file(&path).is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = fingerprint_file(Path::new("/nonexistent/video.mkv")).unwrap_err();
        assert!(matches!(err, FingerprintError::Io { .. }));
    }

    #[test]
    fn test_fingerprint_is_16_hex_digits() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "video.mp4", &pattern_bytes());

        let fp = fingerprint_file(&path).unwrap();
        assert_eq!(fp.as_str().len(), 16);
        assert!(fp
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
