use crate::error::PixmapError;
use crate::pixel::Color;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the decoded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), PixmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(PixmapError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(PixmapError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(PixmapError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        self.check_memory(width, height)
    }

    fn check_memory(&self, width: u32, height: u32) -> Result<(), PixmapError> {
        let Some(max_mem) = self.max_memory_bytes else {
            return Ok(());
        };
        let bytes = (u64::from(width) * u64::from(height)).checked_mul(size_of::<Color>() as u64);
        match bytes {
            Some(bytes) if bytes <= max_mem => Ok(()),
            Some(bytes) => Err(PixmapError::LimitExceeded(alloc::format!(
                "allocation {bytes} bytes exceeds memory limit {max_mem}"
            ))),
            None => Err(PixmapError::LimitExceeded(alloc::format!(
                "allocation for {width}x{height} exceeds memory limit {max_mem}"
            ))),
        }
    }
}

/// Apply optional limits to freshly parsed header dimensions.
pub(crate) fn check(limits: Option<&Limits>, width: u32, height: u32) -> Result<(), PixmapError> {
    match limits {
        Some(limits) => limits.check(width, height),
        None => Ok(()),
    }
}
