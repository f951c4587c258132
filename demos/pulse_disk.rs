//! Still-frame export of a pulsing disk.
//!
//! The disk radius is a derived parameter: a two-segment smoothstep
//! transition eases it 0.1 -> 1.0 -> 0.1 over a six second loop. Frames are
//! scrubbed in user mode and written as PNGs.

use playhead::{
    Canvas, CpuSurface, DrawSurface, PaintFn, ParamSet, ParamSpec, PlayheadResult, Player,
    PlayerConfig, Segment, Transition, write_png,
};
use vello_cpu::kurbo::{Circle, Rect, Shape};

const SIZE: u32 = 256;

fn make_paint() -> PaintFn {
    Box::new(|ctx, state| {
        let w = f64::from(SIZE);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(2, 1, 21, 255));
        ctx.fill_rect(&Rect::new(0.0, 0.0, w, w));

        let r = state.get("r").unwrap_or(0.1);
        let radius = r * w * 0.45;
        let disk = Circle::new((w / 2.0, w / 2.0), radius);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 95, 95, 255));
        ctx.fill_path(&disk.to_path(0.1));
        Ok(())
    })
}

fn build_player() -> PlayheadResult<Player> {
    let radius = Transition::new(vec![
        Segment::smoothstep(1.0, 3.0, 1.0).starting_at(0.1),
        Segment::smoothstep(4.0, 6.0, 0.1),
    ])?;

    let params = ParamSet::new(vec![
        ParamSpec::derived("r", 0.005, 1.0, radius.into_compute()).with_step(0.005),
    ])?;

    let factory = |canvas: Canvas| -> PlayheadResult<Box<dyn DrawSurface>> {
        Ok(Box::new(CpuSurface::new(canvas, make_paint())?))
    };

    Player::new(
        PlayerConfig::new(
            6.0,
            Canvas {
                width: SIZE,
                height: SIZE,
            },
        ),
        params,
        factory,
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut player = build_player()?;
    let out_dir = std::path::PathBuf::from("target").join("demos");

    for t in [0.0, 1.5, 2.0, 3.0, 5.0] {
        player.set_time(t);
        let frame = player.export_frame()?;
        let out = out_dir.join(format!("pulse_disk_t{t:.1}.png"));
        write_png(&frame, &out, [0, 0, 0, 255])?;
        println!("wrote {}", out.display());
    }

    Ok(())
}
