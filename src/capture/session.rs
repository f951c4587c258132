use crate::{
    capture::encoder::{CaptureConfig, FfmpegEncoder},
    foundation::core::FrameRgba,
    foundation::error::{PlayheadError, PlayheadResult},
    player::surface::DrawSurface,
};

/// Destination for captured frames.
///
/// The default sink pipes frames to the system `ffmpeg`; tests inject their
/// own to exercise the recording lifecycle without encoding anything.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &FrameRgba) -> PlayheadResult<()>;

    /// Finalize the artifact. Consumes the sink; a session finalizes at most
    /// once.
    fn finish(self: Box<Self>) -> PlayheadResult<()>;
}

impl FrameSink for FfmpegEncoder {
    fn write_frame(&mut self, frame: &FrameRgba) -> PlayheadResult<()> {
        self.encode_frame(frame)
    }

    fn finish(self: Box<Self>) -> PlayheadResult<()> {
        (*self).finish()
    }
}

/// A bounded interval of recording: every captured tick's rendered frame is
/// streamed into the sink, and the artifact is finalized exactly once when
/// elapsed time exceeds the animation's duration (or the recording is
/// cancelled into the same path).
pub struct CaptureSession {
    sink: Option<Box<dyn FrameSink>>,
    frames: u64,
}

impl CaptureSession {
    /// Session encoding MP4 through the system `ffmpeg` binary, flattening
    /// frames over an opaque black background.
    pub fn to_mp4(cfg: CaptureConfig) -> PlayheadResult<Self> {
        let encoder = FfmpegEncoder::new(cfg, [0, 0, 0, 255])?;
        Ok(Self::with_sink(Box::new(encoder)))
    }

    pub fn with_sink(sink: Box<dyn FrameSink>) -> Self {
        Self {
            sink: Some(sink),
            frames: 0,
        }
    }

    pub fn frames_captured(&self) -> u64 {
        self.frames
    }

    /// Read back the surface's rendered pixels and append them to the
    /// artifact.
    pub fn capture_from(&mut self, surface: &mut dyn DrawSurface) -> PlayheadResult<()> {
        let frame = surface.read_pixels()?;
        let sink = self.sink.as_mut().ok_or_else(|| {
            PlayheadError::capture_failed("capture session is already finalized")
        })?;
        sink.write_frame(&frame)?;
        self.frames += 1;
        Ok(())
    }

    /// Finalize the artifact, returning how many frames it holds.
    pub fn finish(mut self) -> PlayheadResult<u64> {
        if let Some(sink) = self.sink.take() {
            sink.finish()?;
        }
        Ok(self.frames)
    }
}
