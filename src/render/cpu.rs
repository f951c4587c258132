use crate::{
    animation::state::FrameState,
    foundation::core::{Canvas, FrameRgba},
    foundation::error::{PlayheadError, PlayheadResult},
    player::surface::DrawSurface,
};

/// Paints one frame into a CPU raster context from the current state.
///
/// The closure owns whatever state the drawing recipe needs across frames;
/// it lives exactly as long as the surface it was created for.
pub type PaintFn = Box<dyn FnMut(&mut vello_cpu::RenderContext, &FrameState) -> PlayheadResult<()>>;

/// Reference draw surface backed by `vello_cpu` rasterization.
///
/// Owns the pixmap for the surface lifetime; [`DrawSurface::read_pixels`]
/// serves the premultiplied RGBA8 contents for capture or still export.
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    paint: PaintFn,
}

impl CpuSurface {
    pub fn new(canvas: Canvas, paint: PaintFn) -> PlayheadResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PlayheadError::validation("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PlayheadError::validation("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(PlayheadError::validation(
                "surface width/height must be non-zero",
            ));
        }

        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            paint,
        })
    }
}

impl DrawSurface for CpuSurface {
    fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    fn draw(&mut self, state: &FrameState) -> PlayheadResult<()> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        (self.paint)(&mut ctx, state)?;
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    fn read_pixels(&mut self) -> PlayheadResult<FrameRgba> {
        Ok(FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}
