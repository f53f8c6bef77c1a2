use crate::error::{TilestackError, TilestackResult};

/// Tile address in the usual row/column/zoom scheme. The compositor never
/// interprets it; it is passed through to the resolver verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TileCoord {
    pub row: u32,
    pub column: u32,
    pub zoom: u32,
}

impl TileCoord {
    pub fn new(row: u32, column: u32, zoom: u32) -> Self {
        Self { row, column, zoom }
    }
}

/// Straight (non-premultiplied) RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_normalized(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

/// A width x height RGBA raster with interleaved f32 channels, straight
/// alpha, nominally in [0,1]. All compositing math happens in this float
/// space; values may transiently leave [0,1] (tone curves can overshoot)
/// and are only saturated when quantized back to bytes by [`Raster::to_rgba8`].
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<f32>, // rgba interleaved, len = width * height * 4
}

impl Raster {
    /// Fully transparent raster (all channels zero).
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0.0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Constant-color raster matching the given dimensions.
    pub fn from_color(width: u32, height: u32, color: Rgba) -> Self {
        let px = color.to_normalized();
        let n = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(n * 4);
        for _ in 0..n {
            pixels.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> TilestackResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| anyhow::anyhow!("raster size overflow"))?;
        if bytes.len() != expected {
            return Err(TilestackError::Other(anyhow::anyhow!(
                "expected {expected} bytes for a {width}x{height} rgba8 raster, got {}",
                bytes.len()
            )));
        }
        let pixels = bytes.iter().map(|&b| f32::from(b) / 255.0).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn same_dimensions(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.pixels
    }

    /// RGBA value at (x, y) in float space. Panics out of bounds; callers
    /// are tests and debug paths.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        assert!(x < self.width && y < self.height);
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Quantize to packed rgba8. Saturating: out-of-range float values clamp
    /// to [0,1] rather than wrapping.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// Quantized RGBA value at (x, y), mostly for fixture assertions.
    pub fn pixel_rgba8(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixel(x, y).map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Single-channel [0,1] field controlling per-pixel blend strength.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskChannel {
    width: u32,
    height: u32,
    values: Vec<f32>, // len = width * height
}

impl MaskChannel {
    pub fn constant(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; (width as usize) * (height as usize)],
        }
    }

    pub fn from_grey8(width: u32, height: u32, bytes: &[u8]) -> TilestackResult<Self> {
        let expected = (width as usize) * (height as usize);
        if bytes.len() != expected {
            return Err(TilestackError::Other(anyhow::anyhow!(
                "expected {expected} bytes for a {width}x{height} grey8 mask, got {}",
                bytes.len()
            )));
        }
        let values = bytes.iter().map(|&b| f32::from(b) / 255.0).collect();
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Greyscale interpretation of an RGBA raster using integer Rec.601
    /// luma: (299*r + 587*g + 114*b) / 1000 on the quantized bytes.
    pub fn from_rgba_luma(raster: &Raster) -> Self {
        let bytes = raster.to_rgba8();
        let values = bytes
            .chunks_exact(4)
            .map(|px| {
                let luma = (299 * u32::from(px[0]) + 587 * u32::from(px[1]) + 114 * u32::from(px[2]))
                    / 1000;
                (luma as f32) / 255.0
            })
            .collect();
        Self {
            width: raster.width(),
            height: raster.height(),
            values,
        }
    }

    /// The alpha channel of an RGBA raster as a mask field.
    pub fn from_alpha(raster: &Raster) -> Self {
        let values = raster.pixels().chunks_exact(4).map(|px| px[3]).collect();
        Self {
            width: raster.width(),
            height: raster.height(),
            values,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}
