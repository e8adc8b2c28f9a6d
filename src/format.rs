use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::PixmapError;

/// Supported interchange formats, selected by their case-insensitive tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// `p1`: plain-text bitmap, one bit per pixel.
    P1,
    /// `p2`: plain-text greymap, 8-bit.
    P2,
    /// `p3`: plain-text pixmap, 8-bit RGB.
    P3,
    /// `xpm`: XPM2 indexed pixmap.
    Xpm,
    /// `sxl`: palette lines followed by `;`-separated index rows.
    Sixel,
    /// `bmp`: Windows bitmap container.
    Bmp,
    /// `b64`: base64 text of a BMP container.
    Base64,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 7] = [
        Self::P1,
        Self::P2,
        Self::P3,
        Self::Xpm,
        Self::Sixel,
        Self::Bmp,
        Self::Base64,
    ];

    /// Canonical lowercase tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::P1 => "p1",
            Self::P2 => "p2",
            Self::P3 => "p3",
            Self::Xpm => "xpm",
            Self::Sixel => "sxl",
            Self::Bmp => "bmp",
            Self::Base64 => "b64",
        }
    }

    /// Whether encoded output is raw bytes rather than text.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Bmp)
    }
}

impl FromStr for ImageFormat {
    type Err = PixmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| PixmapError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("P3".parse::<ImageFormat>().unwrap(), ImageFormat::P3);
        assert_eq!("Xpm".parse::<ImageFormat>().unwrap(), ImageFormat::Xpm);
        assert_eq!("SXL".parse::<ImageFormat>().unwrap(), ImageFormat::Sixel);
        for f in ImageFormat::ALL {
            assert_eq!(f.tag().parse::<ImageFormat>().unwrap(), f);
        }
    }

    #[test]
    fn unknown_tag_is_named() {
        match "foo".parse::<ImageFormat>() {
            Err(PixmapError::UnsupportedFormat(tag)) => assert_eq!(tag, "foo"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn padded_tag_is_not_trimmed() {
        match " p3 ".parse::<ImageFormat>() {
            Err(PixmapError::UnsupportedFormat(tag)) => assert_eq!(tag, " p3 "),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }
}
