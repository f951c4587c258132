use crate::{
    capture::session::CaptureSession,
    foundation::error::{PlayheadError, PlayheadResult},
    player::controller::{PlaybackMode, Player},
};

/// Options for [`record_offline`].
#[derive(Clone, Copy, Debug)]
pub struct OfflineOpts {
    /// Synthetic tick cadence; matching the capture config's fps makes the
    /// exported artifact frame-accurate.
    pub fps: u32,
}

impl Default for OfflineOpts {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

/// Drive a full recording session without a host frame callback.
///
/// Starts the session on `player` and feeds it evenly spaced wall-clock
/// ticks until elapsed time exceeds the duration and the session finalizes.
/// Replaces the browser-style per-frame callback for headless export.
#[tracing::instrument(skip(player, session))]
pub fn record_offline(
    player: &mut Player,
    session: CaptureSession,
    opts: OfflineOpts,
) -> PlayheadResult<()> {
    if opts.fps == 0 {
        return Err(PlayheadError::invalid_argument("offline fps must be non-zero"));
    }

    player.start_recording(session)?;

    let step_ms = 1000.0 / f64::from(opts.fps);
    // One anchor tick, duration/step advancing ticks, plus slack for the
    // finalizing overshoot.
    let budget = (player.duration_secs() * 1000.0 / step_ms).ceil() as u64 + 8;

    let mut wall_ms = 0.0;
    let mut ticks: u64 = 0;
    while player.mode() == PlaybackMode::Recording {
        player.tick(wall_ms)?;
        wall_ms += step_ms;
        ticks += 1;
        if ticks > budget {
            return Err(PlayheadError::playback(
                "recording did not finalize within its tick budget",
            ));
        }
    }
    Ok(())
}
