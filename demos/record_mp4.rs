//! Headless MP4 export of the pulsing-disk animation.
//!
//! Drives a full recording session with synthetic wall-clock ticks and
//! streams the frames to the system ffmpeg. Skips politely when ffmpeg is
//! not installed.

use playhead::{
    Canvas, CaptureSession, CpuSurface, DrawSurface, OfflineOpts, PaintFn, ParamSet, ParamSpec,
    PlayheadResult, Player, PlayerConfig, Segment, Transition, default_mp4_config,
    is_ffmpeg_on_path, record_offline,
};
use vello_cpu::kurbo::{Circle, Rect, Shape};

const SIZE: u32 = 256;

fn make_paint() -> PaintFn {
    Box::new(|ctx, state| {
        let w = f64::from(SIZE);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(2, 1, 21, 255));
        ctx.fill_rect(&Rect::new(0.0, 0.0, w, w));

        let r = state.get("r").unwrap_or(0.1);
        let disk = Circle::new((w / 2.0, w / 2.0), r * w * 0.45);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 95, 95, 255));
        ctx.fill_path(&disk.to_path(0.1));
        Ok(())
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    if !is_ffmpeg_on_path() {
        eprintln!("ffmpeg not found on PATH; skipping mp4 export");
        return Ok(());
    }

    let radius = Transition::new(vec![
        Segment::smoothstep(1.0, 3.0, 1.0).starting_at(0.1),
        Segment::smoothstep(4.0, 6.0, 0.1),
    ])?;
    let params = ParamSet::new(vec![ParamSpec::derived(
        "r",
        0.005,
        1.0,
        radius.into_compute(),
    )])?;

    let factory = |canvas: Canvas| -> PlayheadResult<Box<dyn DrawSurface>> {
        Ok(Box::new(CpuSurface::new(canvas, make_paint())?))
    };
    let mut player = Player::new(
        PlayerConfig::new(
            6.0,
            Canvas {
                width: SIZE,
                height: SIZE,
            },
        ),
        params,
        factory,
    )?;

    let out = std::path::PathBuf::from("target")
        .join("demos")
        .join("pulse_disk.mp4");
    let session = CaptureSession::to_mp4(default_mp4_config(&out, SIZE, SIZE))?;
    record_offline(&mut player, session, OfflineOpts::default())?;
    println!("wrote {}", out.display());

    Ok(())
}
