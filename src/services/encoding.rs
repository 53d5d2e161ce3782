use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;

use crate::error::{BuildError, Result};

pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| BuildError::io(path, e))?;
    Ok(decode(path, &bytes))
}

/// UTF-8 (with or without BOM) passes through; anything else is guessed.
pub fn decode(path: &Path, bytes: &[u8]) -> String {
    // BOM UTF-8 (EF BB BF)
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    let (text, _, had_errors) = encoding.decode(bytes);
    tracing::warn!(
        path = %path.display(),
        encoding = encoding.name(),
        lossy = had_errors,
        "source file is not UTF-8, decoded with guessed encoding"
    );

    text.into_owned()
}
