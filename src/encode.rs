//! PNG boundary helpers. Encoding sits outside the compositing core: these
//! exist because real resolvers and callers traffic in PNG tiles, and the
//! 8-bit quantization (saturating, via [`Raster::to_rgba8`]) happens here.

use std::io::Cursor;

use crate::core::Raster;
use crate::error::{TilestackError, TilestackResult};

pub fn encode_png(raster: &Raster) -> TilestackResult<Vec<u8>> {
    let image = image::RgbaImage::from_raw(raster.width(), raster.height(), raster.to_rgba8())
        .ok_or_else(|| anyhow::anyhow!("raster buffer does not match its dimensions"))?;

    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| TilestackError::Other(anyhow::Error::new(e)))?;
    Ok(out.into_inner())
}

pub fn decode_png(bytes: &[u8]) -> TilestackResult<Raster> {
    let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| TilestackError::Other(anyhow::Error::new(e)))?
        .to_rgba8();
    Raster::from_rgba8(image.width(), image.height(), image.as_raw())
}
