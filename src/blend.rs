use crate::core::{MaskChannel, Raster};
use crate::error::{TilestackError, TilestackResult};

/// Mask argument to [`blend`]: either a standalone single-channel field or a
/// full RGBA raster, of which only the alpha channel is read.
#[derive(Clone, Copy, Debug)]
pub enum BlendMask<'a> {
    Field(&'a MaskChannel),
    Alpha(&'a Raster),
}

impl BlendMask<'_> {
    fn dimensions(&self) -> (u32, u32) {
        match self {
            BlendMask::Field(m) => (m.width(), m.height()),
            BlendMask::Alpha(r) => (r.width(), r.height()),
        }
    }

    #[inline]
    fn value(&self, pixel: usize) -> f32 {
        match self {
            BlendMask::Field(m) => m.values()[pixel],
            BlendMask::Alpha(r) => r.pixels()[pixel * 4 + 3],
        }
    }
}

/// Blend `top` onto `bottom` through `mask`, with a global `opacity` and an
/// optional blend mode tag.
///
/// Mode `None` is the plain masked blend: per RGB channel
/// `out = (1-m)*bottom + m*top`, and alpha combines via the "over" operator
/// restricted by the mask (`intersect = top_a * m`,
/// `out_a = 1 - (1-bottom_a)*(1-intersect)`).
///
/// Mode `"hard light"` branches per RGB channel on the top value: below 0.5
/// it darkens with `2*bottom*top`, at or above 0.5 it lightens with
/// `1 - 2*(1-bottom)*(1-top)`. Alpha combines exactly as in the plain mode.
///
/// `opacity == 0` short-circuits to a copy of `bottom`. After the
/// mode-specific step, opacity is applied as a final lerp on the RGB
/// channels; alpha carries opacity only through the mask/mode step.
pub fn blend(
    bottom: &Raster,
    top: &Raster,
    mask: &BlendMask<'_>,
    opacity: f32,
    mode: Option<&str>,
) -> TilestackResult<Raster> {
    if !bottom.same_dimensions(top) || mask.dimensions() != (bottom.width(), bottom.height()) {
        return Err(TilestackError::Other(anyhow::anyhow!(
            "blend expects bottom, top and mask to share one raster geometry"
        )));
    }

    let mut out = bottom.clone();
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity == 0.0 {
        return Ok(out);
    }

    let pixel_count = (bottom.width() as usize) * (bottom.height() as usize);
    let bottom_px = bottom.pixels();
    let top_px = top.pixels();
    let out_px = out.pixels_mut();

    match mode {
        None => {
            for i in 0..pixel_count {
                let p = i * 4;
                let m = mask.value(i);
                for c in 0..3 {
                    out_px[p + c] = (1.0 - m) * bottom_px[p + c] + m * top_px[p + c];
                }
                let intersect = top_px[p + 3] * m;
                out_px[p + 3] = 1.0 - (1.0 - bottom_px[p + 3]) * (1.0 - intersect);
            }
        }
        Some("hard light") => {
            for i in 0..pixel_count {
                let p = i * 4;
                for c in 0..3 {
                    let (b, t) = (bottom_px[p + c], top_px[p + c]);
                    out_px[p + c] = if t < 0.5 {
                        2.0 * b * t
                    } else {
                        1.0 - 2.0 * (1.0 - b) * (1.0 - t)
                    };
                }
                let intersect = top_px[p + 3] * mask.value(i);
                out_px[p + 3] = 1.0 - (1.0 - bottom_px[p + 3]) * (1.0 - intersect);
            }
        }
        Some(other) => {
            return Err(TilestackError::UnsupportedBlendMode(other.to_string()));
        }
    }

    if opacity < 1.0 {
        for (o, b) in out_px.chunks_exact_mut(4).zip(bottom_px.chunks_exact(4)) {
            for c in 0..3 {
                o[c] = (1.0 - opacity) * b[c] + opacity * o[c];
            }
        }
    }

    Ok(out)
}
