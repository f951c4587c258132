use crate::foundation::error::{PlayheadError, PlayheadResult};

/// Pixel dimensions of a draw surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> PlayheadResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlayheadError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// One rendered frame as tightly packed RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Whether r/g/b are already multiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRgba {
    pub fn validate(&self) -> PlayheadResult<()> {
        let expected = (u64::from(self.width) * u64::from(self.height) * 4) as usize;
        if self.data.len() != expected {
            return Err(PlayheadError::validation(
                "frame data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dims() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(10, 0).is_err());
        assert!(Canvas::new(10, 10).is_ok());
    }

    #[test]
    fn frame_validate_checks_len() {
        let frame = FrameRgba {
            width: 2,
            height: 2,
            data: vec![0u8; 16],
            premultiplied: true,
        };
        assert!(frame.validate().is_ok());

        let short = FrameRgba {
            data: vec![0u8; 15],
            ..frame
        };
        assert!(short.validate().is_err());
    }
}
