use crate::{
    animation::{param::ParamSet, state::FrameState},
    capture::session::CaptureSession,
    foundation::core::{Canvas, FrameRgba},
    foundation::error::{PlayheadError, PlayheadResult},
    player::fps::FpsMeter,
    player::surface::{DrawSurface, SurfaceFactory},
};

/// Who is driving time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PlaybackMode {
    /// Time and free parameters are user-controlled; derived parameters are
    /// still recomputed on every manual time change.
    User,
    /// Time advances automatically from wall-clock deltas.
    Playing,
    /// Like `Playing`, but every tick is drawn and captured, and the session
    /// finalizes once elapsed time exceeds the configured duration.
    Recording,
}

/// Static configuration for one animation's player.
#[derive(Clone, Copy, Debug)]
pub struct PlayerConfig {
    /// Loop length in seconds; time wraps to 0 past this point.
    pub duration_secs: f64,
    pub canvas: Canvas,
    /// When false the time scrubber is ignored, but automatic playback and
    /// recording still function.
    pub enable_time_control: bool,
}

impl PlayerConfig {
    pub fn new(duration_secs: f64, canvas: Canvas) -> Self {
        Self {
            duration_secs,
            canvas,
            enable_time_control: true,
        }
    }

    pub fn with_time_control(mut self, enabled: bool) -> Self {
        self.enable_time_control = enabled;
        self
    }

    pub fn validate(&self) -> PlayheadResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(PlayheadError::validation(
                "duration must be a positive finite number of seconds",
            ));
        }
        Canvas::new(self.canvas.width, self.canvas.height)?;
        Ok(())
    }
}

/// The per-animation playback runtime.
///
/// Owns the authoritative [`FrameState`], advances time on [`tick`],
/// derives time-driven parameters, and invokes the draw surface only when
/// the observable state changed since the last render. A recording session
/// forces every tick to draw and streams the rendered frames into its sink.
///
/// [`tick`]: Player::tick
pub struct Player {
    config: PlayerConfig,
    params: ParamSet,
    factory: Box<dyn SurfaceFactory>,
    surface: Box<dyn DrawSurface>,
    mode: PlaybackMode,
    /// Draw-time state, exclusively owned by the controller.
    current: FrameState,
    /// What observers see; refreshed on publish and on user edits.
    ui: FrameState,
    last_rendered: Option<FrameState>,
    prev_wall_time_ms: Option<f64>,
    fps_meter: FpsMeter,
    fps: f64,
    capture: Option<CaptureSession>,
}

impl Player {
    pub fn new(
        config: PlayerConfig,
        params: ParamSet,
        factory: impl SurfaceFactory + 'static,
    ) -> PlayheadResult<Self> {
        config.validate()?;
        let mut factory: Box<dyn SurfaceFactory> = Box::new(factory);
        let surface = factory.create(config.canvas)?;
        let initial = params.initial_state();
        Ok(Self {
            config,
            params,
            factory,
            surface,
            mode: PlaybackMode::User,
            current: initial.clone(),
            ui: initial,
            last_rendered: None,
            prev_wall_time_ms: None,
            fps_meter: FpsMeter::new(),
            fps: 0.0,
            capture: None,
        })
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn duration_secs(&self) -> f64 {
        self.config.duration_secs
    }

    pub fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Read-only view of the draw-time state.
    pub fn current(&self) -> &FrameState {
        &self.current
    }

    /// Read-only view of the UI-facing state snapshot.
    pub fn ui_state(&self) -> &FrameState {
        &self.ui
    }

    /// Latest published frames-per-second estimate (0 until first publish).
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// One scheduled unit of work; `wall_time_ms` comes from the host's
    /// per-frame callback. Correct under any positive delta.
    pub fn tick(&mut self, wall_time_ms: f64) -> PlayheadResult<()> {
        // Snapshot before a possible finalize so the tick that ends a
        // session still draws like a recording tick.
        let entered_recording = self.mode == PlaybackMode::Recording;

        if self.mode != PlaybackMode::User {
            if let Some(prev) = self.prev_wall_time_ms {
                let delta_ms = wall_time_ms - prev;
                if let Some(fps) = self.fps_meter.push(delta_ms) {
                    self.fps = fps;
                    self.ui = self.current.clone();
                }
                let t = self.current.t() + delta_ms / 1000.0;
                self.current.set_t(t);
                if t > self.config.duration_secs {
                    if self.mode == PlaybackMode::Recording {
                        self.finalize_capture()?;
                    }
                    self.current.set_t(0.0);
                }
            }
            let derived = self.params.compute_derived(self.current.t());
            self.current.merge(derived);
        }
        self.prev_wall_time_ms = Some(wall_time_ms);

        let changed = self
            .last_rendered
            .as_ref()
            .is_none_or(|last| !last.approx_eq(&self.current));
        if entered_recording || changed {
            self.surface.draw(&self.current)?;
            if let Some(session) = self.capture.as_mut()
                && let Err(err) = session.capture_from(self.surface.as_mut())
            {
                // Never leave the controller stuck in Recording.
                self.capture = None;
                self.mode = PlaybackMode::User;
                return Err(err);
            }
        }
        self.last_rendered = Some(self.current.clone());
        Ok(())
    }

    /// Switch to automatic playback. No-op unless in `User` mode.
    pub fn play(&mut self) {
        if self.mode == PlaybackMode::User {
            self.mode = PlaybackMode::Playing;
        }
    }

    /// Hand time back to the user. No-op unless playing.
    pub fn pause(&mut self) {
        if self.mode == PlaybackMode::Playing {
            self.mode = PlaybackMode::User;
        }
    }

    /// Toggle between `Playing` and `User`. No-op while recording.
    pub fn toggle_playback(&mut self) {
        match self.mode {
            PlaybackMode::Playing => self.mode = PlaybackMode::User,
            PlaybackMode::User => self.mode = PlaybackMode::Playing,
            PlaybackMode::Recording => {}
        }
    }

    /// Rewind to `t = 0` and recompute derived parameters there. Forces
    /// `Playing` back to `User`; free parameter values are untouched.
    /// Idempotent, and a no-op while recording.
    pub fn reset(&mut self) {
        if self.mode == PlaybackMode::Recording {
            return;
        }
        if self.mode == PlaybackMode::Playing {
            self.mode = PlaybackMode::User;
        }
        self.ui.set_t(0.0);
        self.ui.merge(self.params.compute_derived(0.0));
        self.current = self.ui.clone();
        // Surfaces may treat the t == 0 draw as a reinitialize signal.
        self.last_rendered = None;
    }

    /// Scrub elapsed time. Honored only in `User` mode with time control
    /// enabled; derived parameters follow the new time immediately.
    pub fn set_time(&mut self, t: f64) {
        if self.mode != PlaybackMode::User || !self.config.enable_time_control {
            return;
        }
        self.ui.set_t(t);
        self.ui.merge(self.params.compute_derived(t));
        self.current = self.ui.clone();
    }

    /// Edit a parameter.
    ///
    /// A derived parameter, or any edit made in `User` mode, updates the
    /// UI-facing state (a derived edit outside `User` mode is a visual
    /// preview that the next time change overwrites). A free parameter
    /// edited while playback is time-driven only updates the internal
    /// draw-time value, so user edits don't fight the animation loop.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> PlayheadResult<()> {
        let spec = self.params.get(name).ok_or_else(|| {
            PlayheadError::validation(format!("unknown parameter '{name}'"))
        })?;
        if spec.is_derived() || self.mode == PlaybackMode::User {
            self.ui.set(name, value);
            if self.mode == PlaybackMode::User {
                self.current = self.ui.clone();
            }
        } else {
            self.current.set(name, value);
        }
        Ok(())
    }

    /// Resize the canvas: discards the current surface, asks the factory
    /// for a new one, and forces a redraw on the next tick. A same-size
    /// resize is a no-op.
    pub fn resize(&mut self, canvas: Canvas) -> PlayheadResult<()> {
        if canvas == self.config.canvas {
            return Ok(());
        }
        Canvas::new(canvas.width, canvas.height)?;
        self.surface = self.factory.create(canvas)?;
        self.config.canvas = canvas;
        self.last_rendered = None;
        Ok(())
    }

    /// Begin a recording session: rewind to `t = 0`, drop the wall-clock
    /// anchor so the first recorded frame measures a fresh delta, and stream
    /// every subsequent tick's frame into the session until elapsed time
    /// exceeds the duration.
    #[tracing::instrument(skip_all)]
    pub fn start_recording(&mut self, session: CaptureSession) -> PlayheadResult<()> {
        if self.mode == PlaybackMode::Recording {
            return Err(PlayheadError::playback(
                "a recording session is already active",
            ));
        }
        self.mode = PlaybackMode::Recording;
        self.current.set_t(0.0);
        self.prev_wall_time_ms = None;
        self.last_rendered = None;
        self.capture = Some(session);
        Ok(())
    }

    /// End a recording session early.
    ///
    /// Recording ends via the same duration-exceeded path as normal looping:
    /// time is forced to the duration so the next tick's positive delta
    /// pushes past it and finalizes the session exactly as a natural loop
    /// end would. No-op outside `Recording`.
    pub fn cancel_recording(&mut self) {
        if self.mode != PlaybackMode::Recording {
            return;
        }
        self.current.set_t(self.config.duration_secs);
    }

    /// Render the current state and read back the pixels, independent of
    /// the tick loop. Used for still-frame export.
    pub fn export_frame(&mut self) -> PlayheadResult<FrameRgba> {
        self.surface.draw(&self.current)?;
        self.last_rendered = Some(self.current.clone());
        self.surface.read_pixels()
    }

    fn finalize_capture(&mut self) -> PlayheadResult<()> {
        // Leave Recording even if the sink fails to finalize.
        self.mode = PlaybackMode::User;
        if let Some(session) = self.capture.take() {
            let frames = session.finish()?;
            tracing::debug!(frames, "recording finalized");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::param::ParamSpec;
    use std::cell::Cell;
    use std::rc::Rc;

    struct TestSurface {
        canvas: Canvas,
        draws: Rc<Cell<usize>>,
        last_t: Rc<Cell<f64>>,
    }

    impl DrawSurface for TestSurface {
        fn canvas(&self) -> Canvas {
            self.canvas
        }

        fn draw(&mut self, state: &FrameState) -> PlayheadResult<()> {
            self.draws.set(self.draws.get() + 1);
            self.last_t.set(state.t());
            Ok(())
        }

        fn read_pixels(&mut self) -> PlayheadResult<FrameRgba> {
            Ok(FrameRgba {
                width: self.canvas.width,
                height: self.canvas.height,
                data: vec![0u8; (self.canvas.width * self.canvas.height * 4) as usize],
                premultiplied: true,
            })
        }
    }

    struct Probe {
        draws: Rc<Cell<usize>>,
        last_t: Rc<Cell<f64>>,
    }

    fn player_with(duration: f64, specs: Vec<ParamSpec>) -> (Player, Probe) {
        let draws = Rc::new(Cell::new(0));
        let last_t = Rc::new(Cell::new(f64::NAN));
        let probe = Probe {
            draws: draws.clone(),
            last_t: last_t.clone(),
        };
        let factory = move |canvas: Canvas| -> PlayheadResult<Box<dyn DrawSurface>> {
            Ok(Box::new(TestSurface {
                canvas,
                draws: draws.clone(),
                last_t: last_t.clone(),
            }))
        };
        let player = Player::new(
            PlayerConfig::new(duration, Canvas { width: 8, height: 8 }),
            ParamSet::new(specs).unwrap(),
            factory,
        )
        .unwrap();
        (player, probe)
    }

    #[test]
    fn construction_starts_in_user_mode_at_initial_state() {
        let (player, _) = player_with(
            6.0,
            vec![ParamSpec::free("r", 0.0, 1.0).with_default(0.5)],
        );
        assert_eq!(player.mode(), PlaybackMode::User);
        assert_eq!(player.current().t(), 0.0);
        assert_eq!(player.current().get("r"), Some(0.5));
    }

    #[test]
    fn playing_ticks_advance_time_and_leave_free_params_alone() {
        let (mut player, _) = player_with(
            6.0,
            vec![ParamSpec::free("r", 0.0, 1.0).with_default(0.5)],
        );
        player.play();
        player.tick(0.0).unwrap();
        player.tick(16.0).unwrap();
        assert!((player.current().t() - 0.016).abs() < 1e-9);
        player.tick(32.0).unwrap();
        assert!((player.current().t() - 0.032).abs() < 1e-9);
        assert_eq!(player.current().get("r"), Some(0.5));
    }

    #[test]
    fn unchanged_state_skips_the_draw() {
        let (mut player, probe) = player_with(6.0, vec![ParamSpec::free("r", 0.0, 1.0)]);
        player.tick(0.0).unwrap();
        assert_eq!(probe.draws.get(), 1);
        // User mode, nothing changed: no more draws.
        player.tick(16.0).unwrap();
        player.tick(32.0).unwrap();
        assert_eq!(probe.draws.get(), 1);
    }

    #[test]
    fn sub_epsilon_time_advance_skips_the_draw() {
        let (mut player, probe) = player_with(6.0, vec![]);
        player.play();
        player.tick(0.0).unwrap();
        assert_eq!(probe.draws.get(), 1);
        // 0.005 ms wall delta -> 5e-6 s advance, inside the state epsilon.
        player.tick(0.005).unwrap();
        assert_eq!(probe.draws.get(), 1);
        player.tick(16.0).unwrap();
        assert_eq!(probe.draws.get(), 2);
    }

    #[test]
    fn time_wraps_past_the_duration_on_the_same_tick() {
        let (mut player, _) = player_with(6.0, vec![]);
        player.play();
        player.tick(0.0).unwrap();
        player.tick(5990.0).unwrap();
        assert!((player.current().t() - 5.99).abs() < 1e-9);
        player.tick(6010.0).unwrap();
        assert_eq!(player.current().t(), 0.0);
    }

    #[test]
    fn reset_is_idempotent_and_rewinds_derived_params() {
        let (mut player, _) = player_with(
            6.0,
            vec![
                ParamSpec::free("r", 0.0, 1.0).with_default(0.5),
                ParamSpec::derived("theta", 0.0, 10.0, std::sync::Arc::new(|t| t * 2.0)),
            ],
        );
        // A user-mode edit survives reset; only time and derived values rewind.
        player.set_parameter("r", 0.25).unwrap();
        player.play();
        player.tick(0.0).unwrap();
        player.tick(1000.0).unwrap();
        assert_eq!(player.current().get("theta"), Some(2.0));

        player.reset();
        assert_eq!(player.mode(), PlaybackMode::User);
        let once = player.current().clone();
        player.reset();
        assert!(player.current().approx_eq(&once));
        assert_eq!(player.current().t(), 0.0);
        assert_eq!(player.current().get("theta"), Some(0.0));
        assert_eq!(player.current().get("r"), Some(0.25));
    }

    #[test]
    fn reset_forces_a_draw_at_time_zero() {
        let (mut player, probe) = player_with(6.0, vec![]);
        player.tick(0.0).unwrap();
        assert_eq!(probe.draws.get(), 1);
        player.reset();
        player.tick(16.0).unwrap();
        assert_eq!(probe.draws.get(), 2);
        assert_eq!(probe.last_t.get(), 0.0);
    }

    #[test]
    fn scrubbing_recomputes_derived_params() {
        let (mut player, _) = player_with(
            6.0,
            vec![ParamSpec::derived(
                "theta",
                0.0,
                10.0,
                std::sync::Arc::new(|t| t * 2.0),
            )],
        );
        player.set_time(1.5);
        assert_eq!(player.current().t(), 1.5);
        assert_eq!(player.current().get("theta"), Some(3.0));
    }

    #[test]
    fn scrubbing_is_ignored_without_time_control() {
        let draws = Rc::new(Cell::new(0));
        let last_t = Rc::new(Cell::new(f64::NAN));
        let factory = {
            let draws = draws.clone();
            let last_t = last_t.clone();
            move |canvas: Canvas| -> PlayheadResult<Box<dyn DrawSurface>> {
                Ok(Box::new(TestSurface {
                    canvas,
                    draws: draws.clone(),
                    last_t: last_t.clone(),
                }))
            }
        };
        let mut player = Player::new(
            PlayerConfig::new(6.0, Canvas { width: 8, height: 8 }).with_time_control(false),
            ParamSet::empty(),
            factory,
        )
        .unwrap();
        player.set_time(3.0);
        assert_eq!(player.current().t(), 0.0);
    }

    #[test]
    fn free_edits_while_playing_stay_out_of_the_ui_state() {
        let (mut player, _) = player_with(6.0, vec![ParamSpec::free("r", 0.0, 1.0)]);
        player.play();
        player.set_parameter("r", 0.75).unwrap();
        assert_eq!(player.current().get("r"), Some(0.75));
        assert_eq!(player.ui_state().get("r"), Some(0.0));

        player.pause();
        player.set_parameter("r", 0.25).unwrap();
        assert_eq!(player.current().get("r"), Some(0.25));
        assert_eq!(player.ui_state().get("r"), Some(0.25));
    }

    #[test]
    fn unknown_parameter_edits_are_rejected() {
        let (mut player, _) = player_with(6.0, vec![]);
        assert!(player.set_parameter("nope", 1.0).is_err());
    }

    struct NullSink;

    impl crate::capture::session::FrameSink for NullSink {
        fn write_frame(&mut self, _frame: &FrameRgba) -> PlayheadResult<()> {
            Ok(())
        }

        fn finish(self: Box<Self>) -> PlayheadResult<()> {
            Ok(())
        }
    }

    #[test]
    fn toggle_and_reset_are_noops_while_recording() {
        let (mut player, _) = player_with(6.0, vec![]);
        player.set_time(3.0);
        player
            .start_recording(CaptureSession::with_sink(Box::new(NullSink)))
            .unwrap();
        // Starting a session rewinds to t = 0 ahead of the first tick.
        assert_eq!(player.current().t(), 0.0);
        player.toggle_playback();
        player.reset();
        assert_eq!(player.mode(), PlaybackMode::Recording);
        assert!(player.start_recording(CaptureSession::with_sink(Box::new(NullSink))).is_err());
    }

    #[test]
    fn resize_reacquires_the_surface_and_forces_a_draw() {
        let (mut player, probe) = player_with(6.0, vec![]);
        player.tick(0.0).unwrap();
        assert_eq!(probe.draws.get(), 1);
        player.resize(Canvas { width: 16, height: 16 }).unwrap();
        assert_eq!(player.canvas().width, 16);
        player.tick(16.0).unwrap();
        assert_eq!(probe.draws.get(), 2);
    }
}
