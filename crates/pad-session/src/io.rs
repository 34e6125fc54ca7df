/// Byte-level file I/O: encoding detection, decoding into a snapshot, and writing save payloads.
use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use pad_session_core::encoding::{detect_line_ending, normalize_line_endings};
use pad_session_core::{SavePayload, TextEncoding, TextSnapshot};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Guesses the encoding of raw bytes: BOM first, then UTF-8 validity, then `chardetng`.
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(UTF8_BOM) {
        return TextEncoding::Utf8Bom;
    }
    if bytes.starts_with(UTF16LE_BOM) {
        return TextEncoding::Utf16Le;
    }
    if bytes.starts_with(UTF16BE_BOM) {
        return TextEncoding::Utf16Be;
    }

    if std::str::from_utf8(bytes).is_ok() {
        return if bytes.is_ascii() {
            TextEncoding::Ascii
        } else {
            TextEncoding::Utf8
        };
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    TextEncoding::Legacy(detector.guess(None, true).name())
}

/// Resolves a user-supplied encoding name.
///
/// Unicode labels map to their own tags; anything else must be a label
/// `encoding_rs` knows, and is stored under its canonical name.
///
/// # Errors
///
/// Returns an error for unknown labels.
pub fn parse_encoding(name: &str) -> Result<TextEncoding> {
    if let Some(encoding) = TextEncoding::from_unicode_label(name) {
        return Ok(encoding);
    }
    let encoding = encoding_rs::Encoding::for_label(name.trim().as_bytes())
        .with_context(|| format!("unknown encoding: {name}"))?;
    Ok(TextEncoding::Legacy(encoding.name()))
}

/// Decodes raw bytes with `encoding`, dropping a matching BOM.
///
/// # Errors
///
/// Returns an error if the bytes are not valid in that encoding.
pub fn decode_bytes(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    let decoded: Option<Cow<'_, str>> = match encoding {
        TextEncoding::Utf8 | TextEncoding::Ascii => std::str::from_utf8(bytes).ok().map(Cow::from),
        TextEncoding::Utf8Bom => {
            let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            std::str::from_utf8(content).ok().map(Cow::from)
        }
        TextEncoding::Utf16Le => {
            let content = bytes.strip_prefix(UTF16LE_BOM).unwrap_or(bytes);
            encoding_rs::UTF_16LE.decode_without_bom_handling_and_without_replacement(content)
        }
        TextEncoding::Utf16Be => {
            let content = bytes.strip_prefix(UTF16BE_BOM).unwrap_or(bytes);
            encoding_rs::UTF_16BE.decode_without_bom_handling_and_without_replacement(content)
        }
        TextEncoding::Legacy(name) => {
            let legacy = encoding_rs::Encoding::for_label(name.as_bytes())
                .with_context(|| format!("unknown encoding: {name}"))?;
            legacy.decode_without_bom_handling_and_without_replacement(bytes)
        }
    };

    decoded
        .map(Cow::into_owned)
        .with_context(|| format!("content is not valid {encoding}"))
}

/// Encodes text with `encoding`, writing a BOM for the BOM-carrying encodings.
///
/// # Errors
///
/// Returns an error if the text has characters the encoding cannot represent.
pub fn encode_text(text: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    match encoding {
        // ASCII is detected for UTF-8 files that happen to hold no other chars.
        TextEncoding::Utf8 | TextEncoding::Ascii => Ok(text.as_bytes().to_vec()),
        TextEncoding::Utf8Bom => Ok([UTF8_BOM, text.as_bytes()].concat()),
        // encoding_rs only encodes to byte-oriented encodings, so UTF-16 is done by hand.
        TextEncoding::Utf16Le => Ok(UTF16LE_BOM
            .iter()
            .copied()
            .chain(text.encode_utf16().flat_map(u16::to_le_bytes))
            .collect()),
        TextEncoding::Utf16Be => Ok(UTF16BE_BOM
            .iter()
            .copied()
            .chain(text.encode_utf16().flat_map(u16::to_be_bytes))
            .collect()),
        TextEncoding::Legacy(name) => {
            let legacy = encoding_rs::Encoding::for_label(name.as_bytes())
                .with_context(|| format!("unknown encoding: {name}"))?;
            let (encoded, _, had_errors) = legacy.encode(text);
            anyhow::ensure!(!had_errors, "text cannot be represented in {name}");
            Ok(encoded.into_owned())
        }
    }
}

/// Reads a file into a snapshot with `\n` line breaks and its detected format.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_snapshot(path: &Path) -> Result<TextSnapshot> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let encoding = detect_encoding(&bytes);
    let raw = decode_bytes(&bytes, encoding)
        .with_context(|| format!("decoding {}", path.display()))?;
    let line_ending = detect_line_ending(&raw);
    tracing::debug!(
        "Loaded {} ({encoding}, {line_ending}, {} bytes)",
        path.display(),
        bytes.len()
    );
    Ok(TextSnapshot::new(
        normalize_line_endings(&raw),
        encoding,
        line_ending,
    ))
}

/// Encodes and writes a save payload to `path`.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_payload(path: &Path, payload: &SavePayload) -> Result<()> {
    let bytes = encode_text(&payload.text, payload.encoding)
        .with_context(|| format!("encoding {}", path.display()))?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use pad_session_core::LineEnding;

    use super::*;

    #[test]
    fn test_detect_ascii_and_utf8() {
        assert_eq!(detect_encoding(b"hello"), TextEncoding::Ascii);
        assert_eq!(detect_encoding("héllo".as_bytes()), TextEncoding::Utf8);
    }

    #[test]
    fn test_detect_boms() {
        assert_eq!(detect_encoding(b"\xEF\xBB\xBFhi"), TextEncoding::Utf8Bom);
        assert_eq!(detect_encoding(b"\xFF\xFEh\x00"), TextEncoding::Utf16Le);
        assert_eq!(detect_encoding(b"\xFE\xFF\x00h"), TextEncoding::Utf16Be);
    }

    #[test]
    fn test_detect_legacy_falls_back_to_chardetng() {
        let bytes = b"caf\xE9 cr\xE8me br\xFBl\xE9e";
        assert!(matches!(detect_encoding(bytes), TextEncoding::Legacy(_)));
    }

    #[test]
    fn test_parse_encoding() {
        assert_eq!(parse_encoding("UTF-8").unwrap(), TextEncoding::Utf8);
        assert_eq!(parse_encoding("utf-16be").unwrap(), TextEncoding::Utf16Be);
        assert_eq!(
            parse_encoding("latin1").unwrap(),
            TextEncoding::Legacy("windows-1252")
        );
        assert!(parse_encoding("klingon").is_err());
    }

    #[test]
    fn test_utf16_encode_decode() {
        let bytes = encode_text("hé", TextEncoding::Utf16Le).unwrap();
        assert_eq!(bytes, vec![0xFF, 0xFE, b'h', 0x00, 0xE9, 0x00]);
        assert_eq!(decode_bytes(&bytes, TextEncoding::Utf16Le).unwrap(), "hé");

        let bytes = encode_text("hé", TextEncoding::Utf16Be).unwrap();
        assert_eq!(bytes, vec![0xFE, 0xFF, 0x00, b'h', 0x00, 0xE9]);
        assert_eq!(decode_bytes(&bytes, TextEncoding::Utf16Be).unwrap(), "hé");
    }

    #[test]
    fn test_utf8_bom_is_stripped_and_restored() {
        let bytes = encode_text("x", TextEncoding::Utf8Bom).unwrap();
        assert_eq!(bytes, b"\xEF\xBB\xBFx");
        assert_eq!(decode_bytes(&bytes, TextEncoding::Utf8Bom).unwrap(), "x");
    }

    #[test]
    fn test_encode_rejects_unrepresentable_text() {
        assert!(encode_text("日本", TextEncoding::Legacy("windows-1252")).is_err());
    }

    #[test]
    fn test_ascii_encodes_as_utf8() {
        assert_eq!(encode_text("café", TextEncoding::Ascii).unwrap(), "café".as_bytes());
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(decode_bytes(b"\xFF\xFF", TextEncoding::Utf8).is_err());
    }

    #[test]
    fn test_load_snapshot_normalizes_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        std::fs::write(&path, b"one\r\ntwo\r\n").unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.content(), "one\ntwo\n");
        assert_eq!(snapshot.encoding(), TextEncoding::Ascii);
        assert_eq!(snapshot.line_ending(), LineEnding::CrLf);
    }

    #[test]
    fn test_write_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let payload = SavePayload {
            text: "a\r\nb".to_string(),
            encoding: TextEncoding::Utf8Bom,
            line_ending: LineEnding::CrLf,
        };
        write_payload(&path, &payload).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\xEF\xBB\xBFa\r\nb");
    }
}
