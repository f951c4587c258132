//! Playhead is a playback runtime for parametric animations.
//!
//! An animation is a set of named scalar parameters drawn by an injected
//! surface. Some parameters are *free* (set by direct user input, bounded),
//! some are *derived* (a pure function of elapsed time). The [`Player`] owns
//! the current time and parameter state and runs the per-frame loop:
//!
//! 1. **Advance**: on [`Player::tick`], move `t` forward by the wall-clock
//!    delta and wrap at the configured duration.
//! 2. **Derive**: recompute every derived parameter at the new `t`.
//! 3. **Gate**: compare the resulting [`FrameState`] against the last
//!    rendered one and skip the draw entirely when nothing observable
//!    changed (recording forces every frame).
//! 4. **Capture** (optional): stream rendered frames into a
//!    [`CaptureSession`], finalized into an MP4 via the system `ffmpeg`
//!    binary once elapsed time exceeds the duration.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single logical thread**: the whole controller runs on the host's
//!   per-frame callback; `tick` never blocks.
//! - **Exclusive state ownership**: the UI and draw surfaces only ever see
//!   snapshots or shared references, never a mutable alias into the
//!   controller's state.
#![forbid(unsafe_code)]

mod animation;
mod capture;
mod foundation;
mod player;
mod render;

pub use animation::ease::{Easing, range, smoothstep, smoothstep01, smoothstep_integral};
pub use animation::param::{ComputeFn, ParamKind, ParamSet, ParamSpec};
pub use animation::state::{FrameState, STATE_EPSILON};
pub use animation::transition::{Segment, Transition};
pub use capture::encoder::{
    CaptureConfig, FfmpegEncoder, default_mp4_config, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use capture::session::{CaptureSession, FrameSink};
pub use capture::still::write_png;
pub use foundation::core::{Canvas, FrameRgba};
pub use foundation::error::{PlayheadError, PlayheadResult};
pub use player::controller::{PlaybackMode, Player, PlayerConfig};
pub use player::fps::FpsMeter;
pub use player::offline::{OfflineOpts, record_offline};
pub use player::surface::{DrawSurface, SurfaceFactory};
pub use render::cpu::{CpuSurface, PaintFn};
