use std::path::Path;

use crate::{
    capture::encoder::{ensure_parent_dir, flatten_to_opaque_rgba8},
    foundation::core::FrameRgba,
    foundation::error::{PlayheadError, PlayheadResult},
};

/// Write one captured frame as an opaque PNG, flattening alpha over
/// `bg_rgba`. The still-frame counterpart to a video capture session.
pub fn write_png(frame: &FrameRgba, path: impl AsRef<Path>, bg_rgba: [u8; 4]) -> PlayheadResult<()> {
    frame.validate()?;

    let mut flat = vec![0u8; frame.data.len()];
    flatten_to_opaque_rgba8(&mut flat, &frame.data, frame.premultiplied, bg_rgba)?;

    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let img = image::RgbaImage::from_raw(frame.width, frame.height, flat)
        .ok_or_else(|| PlayheadError::validation("frame buffer does not match its dimensions"))?;
    img.save(path).map_err(|e| {
        PlayheadError::capture_failed(format!(
            "failed to write png '{}': {e}",
            path.display()
        ))
    })
}
