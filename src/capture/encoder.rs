use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    foundation::core::FrameRgba,
    foundation::error::{PlayheadError, PlayheadResult},
};

/// Settings for one video capture artifact.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl CaptureConfig {
    pub fn validate(&self) -> PlayheadResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlayheadError::validation(
                "capture width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(PlayheadError::validation("capture fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // Default settings target yuv420p output for maximum compatibility.
            return Err(PlayheadError::validation(
                "capture width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }

    pub fn with_out_path(mut self, out_path: impl Into<PathBuf>) -> Self {
        self.out_path = out_path.into();
        self
    }
}

/// 60 fps MP4 capture settings, overwriting any existing artifact.
pub fn default_mp4_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
) -> CaptureConfig {
    CaptureConfig {
        width,
        height,
        fps: 60,
        out_path: out_path.into(),
        overwrite: true,
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> PlayheadResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA8 frames to the system `ffmpeg` binary for MP4 encoding.
///
/// The system binary is used deliberately, rather than native FFmpeg
/// bindings, to avoid dev header/lib requirements on the host.
pub struct FfmpegEncoder {
    cfg: CaptureConfig,
    bg_rgba: [u8; 4],
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    pub fn new(cfg: CaptureConfig, bg_rgba: [u8; 4]) -> PlayheadResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(PlayheadError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(PlayheadError::capture_failed(
                "ffmpeg is required for MP4 capture, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .args(ffmpeg_args(&cfg))
            .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            PlayheadError::capture_failed(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            PlayheadError::capture_failed("failed to open ffmpeg stdin (unexpected)")
        })?;

        Ok(Self {
            scratch: vec![0u8; (cfg.width * cfg.height * 4) as usize],
            cfg,
            bg_rgba,
            child,
            stdin: Some(stdin),
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRgba) -> PlayheadResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(PlayheadError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        frame.validate()?;

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(PlayheadError::capture_failed(
                "ffmpeg encoder is already finalized",
            ));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            PlayheadError::capture_failed(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    pub fn finish(mut self) -> PlayheadResult<()> {
        drop(self.stdin.take());

        let output = self.child.wait_with_output().map_err(|e| {
            PlayheadError::capture_failed(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PlayheadError::capture_failed(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

fn ffmpeg_args(cfg: &CaptureConfig) -> Vec<String> {
    let mut args: Vec<String> = vec![if cfg.overwrite { "-y" } else { "-n" }.to_string()];
    args.extend(
        [
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]
        .map(|a: &str| a.to_string()),
    );
    args
}

/// Composite RGBA8 pixels over an opaque background for the encoder.
pub(crate) fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> PlayheadResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PlayheadError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg_rgba[0]);
    let bg_g = u16::from(bg_rgba[1]);
    let bg_b = u16::from(bg_rgba[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            d[3] = 255;
            continue;
        }

        let inv = 255u16 - a;

        let (r, g, b) = if src_is_premul {
            (
                u16::from(s[0]) + mul_div255(bg_r, inv),
                u16::from(s[1]) + mul_div255(bg_g, inv),
                u16::from(s[2]) + mul_div255(bg_b, inv),
            )
        } else {
            (
                mul_div255(u16::from(s[0]), a) + mul_div255(bg_r, inv),
                mul_div255(u16::from(s[1]), a) + mul_div255(bg_g, inv),
                mul_div255(u16::from(s[2]), a) + mul_div255(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(width: u32, height: u32, fps: u32) -> CaptureConfig {
        CaptureConfig {
            width,
            height,
            fps,
            out_path: PathBuf::from("target/capture/out.mp4"),
            overwrite: true,
        }
    }

    #[test]
    fn config_validation_catches_bad_values() {
        assert!(cfg(0, 10, 60).validate().is_err());
        assert!(cfg(10, 10, 0).validate().is_err());
        assert!(cfg(11, 10, 60).validate().is_err());
        assert!(cfg(10, 11, 60).validate().is_err());
        assert!(cfg(16, 16, 60).validate().is_ok());
    }

    #[test]
    fn default_config_targets_sixty_fps() {
        let c = default_mp4_config("export.mp4", 640, 360);
        assert_eq!(c.fps, 60);
        assert!(c.overwrite);
    }

    #[test]
    fn ffmpeg_args_embed_geometry_and_rate() {
        let args = ffmpeg_args(&cfg(640, 360, 30));
        assert_eq!(args[0], "-y");
        assert!(args.contains(&"640x360".to_string()));
        assert!(args.contains(&"30".to_string()));
        assert!(args.contains(&"libx264".to_string()));
    }

    #[test]
    fn flatten_premul_over_black_produces_expected_rgb() {
        // Premultiplied red @ 50% alpha is already 128,0,0.
        let src = vec![128u8, 0, 0, 128];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
        assert_eq!(dst, vec![128u8, 0, 0, 255]);
    }

    #[test]
    fn flatten_straight_over_black_produces_expected_rgb() {
        // Straight red @ 50% alpha becomes 128,0,0 over black.
        let src = vec![255u8, 0, 0, 128];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
        assert_eq!(dst, vec![128u8, 0, 0, 255]);
    }

    #[test]
    fn flatten_rejects_mismatched_buffers() {
        let src = vec![0u8; 8];
        let mut dst = vec![0u8; 4];
        assert!(flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).is_err());
    }
}
