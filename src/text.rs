//! Whitespace tokenizer and the header check shared by the plain-text formats.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{PixelCause, PixmapError};
use crate::format::ImageFormat;

/// Split text into non-empty tokens on space, CR and LF.
///
/// Runs of delimiters collapse; empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split([' ', '\r', '\n'])
        .filter(|t| !t.is_empty())
        .collect()
}

/// Borrow raw input as UTF-8 text.
pub(crate) fn as_text(data: &[u8]) -> Result<&str, PixmapError> {
    core::str::from_utf8(data).map_err(PixmapError::NotText)
}

/// Parsed plain-text header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TextHeader {
    pub width: u32,
    pub height: u32,
    /// Max color value, or the declared color count for XPM2. 1 for P1.
    pub max_color: u32,
    /// Number of tokens the header consumed.
    pub size: usize,
}

/// Validate `tag width height [max]` at the start of `tokens`.
pub(crate) fn parse_header(
    tokens: &[&str],
    tag: &'static str,
    has_max_color: bool,
) -> Result<TextHeader, PixmapError> {
    let found = tokens.first().copied().unwrap_or("");
    if !found.eq_ignore_ascii_case(tag) {
        return Err(PixmapError::FormatMismatch {
            expected: tag,
            found: found.to_string(),
        });
    }

    let width = parse_dimension(tokens.get(1).copied(), "width")?;
    let height = parse_dimension(tokens.get(2).copied(), "height")?;

    if !has_max_color {
        return Ok(TextHeader {
            width,
            height,
            max_color: 1,
            size: 3,
        });
    }

    let max_color = match tokens.get(3) {
        Some(t) => t.parse::<u32>().map_err(|_| {
            PixmapError::MalformedHeader(format!("max color value '{t}' is not an integer"))
        })?,
        None => return Err(PixmapError::MalformedHeader(missing("max color value"))),
    };

    Ok(TextHeader {
        width,
        height,
        max_color,
        size: 4,
    })
}

fn parse_dimension(token: Option<&str>, what: &str) -> Result<u32, PixmapError> {
    let token = token.ok_or_else(|| PixmapError::MalformedHeader(missing(what)))?;
    match token.parse::<u32>() {
        Ok(0) => Err(PixmapError::MalformedHeader(format!(
            "{what} must be positive, found 0"
        ))),
        Ok(v) => Ok(v),
        Err(_) => Err(PixmapError::MalformedHeader(format!(
            "{what} '{token}' is not a positive integer"
        ))),
    }
}

fn missing(what: &str) -> String {
    format!("missing {what}")
}

/// Parse one decimal sample in `0..=max`.
pub(crate) fn parse_sample(token: &str, max: u32, format: ImageFormat) -> Result<u32, PixmapError> {
    let value = token.parse::<u32>().map_err(|source| {
        PixmapError::pixel_data(
            format,
            PixelCause::InvalidNumber {
                token: token.to_string(),
                source,
            },
        )
    })?;
    if value > max {
        return Err(PixmapError::pixel_data(
            format,
            PixelCause::OutOfRange { value, max },
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_collapses_delimiters() {
        assert_eq!(tokenize("P3\r\n 2  1\n\n255 "), ["P3", "2", "1", "255"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \r\n ").is_empty());
    }

    #[test]
    fn tab_is_not_a_delimiter() {
        assert_eq!(tokenize("a\tb c"), ["a\tb", "c"]);
    }

    #[test]
    fn header_sizes() {
        let p1 = parse_header(&["p1", "2", "3"], "P1", false).unwrap();
        assert_eq!(
            p1,
            TextHeader {
                width: 2,
                height: 3,
                max_color: 1,
                size: 3
            }
        );
        let p2 = parse_header(&["P2", "4", "5", "255"], "P2", true).unwrap();
        assert_eq!(p2.size, 4);
        assert_eq!(p2.max_color, 255);
    }

    #[test]
    fn header_tag_mismatch() {
        match parse_header(&["P2", "1", "1", "255"], "P3", true) {
            Err(PixmapError::FormatMismatch { expected, found }) => {
                assert_eq!(expected, "P3");
                assert_eq!(found, "P2");
            }
            other => panic!("expected FormatMismatch, got {other:?}"),
        }
        assert!(matches!(
            parse_header(&[], "P1", false),
            Err(PixmapError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn header_rejects_bad_dimensions() {
        for tokens in [
            &["P3", "0", "1", "255"][..],
            &["P3", "1", "-1", "255"],
            &["P3", "x", "1", "255"],
            &["P3", "1"],
            &["P3", "1", "1"],
            &["P3", "1", "1", "2.5"],
        ] {
            assert!(
                matches!(
                    parse_header(tokens, "P3", true),
                    Err(PixmapError::MalformedHeader(_))
                ),
                "{tokens:?}"
            );
        }
    }

    #[test]
    fn sample_range() {
        assert_eq!(parse_sample("255", 255, ImageFormat::P2).unwrap(), 255);
        assert!(matches!(
            parse_sample("256", 255, ImageFormat::P2),
            Err(PixmapError::PixelDataError {
                cause: PixelCause::OutOfRange {
                    value: 256,
                    max: 255
                },
                ..
            })
        ));
        assert!(matches!(
            parse_sample("abc", 255, ImageFormat::P3),
            Err(PixmapError::PixelDataError {
                cause: PixelCause::InvalidNumber { .. },
                ..
            })
        ));
    }
}
