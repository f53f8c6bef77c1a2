use crate::core::Raster;
use crate::error::{TilestackError, TilestackResult};

/// Coefficients of the quadratic tone curve f(x) = a*x^2 + b*x + c.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveCoeffs {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl CurveCoeffs {
    /// Solve for the unique quadratic through the three tonal anchors:
    /// f(black/255) = 0, f(grey/255) = 0.5, f(white/255) = 1.
    ///
    /// The 3x3 linear system is solved in closed form via divided
    /// differences (exact for three points). Anchors that are not pairwise
    /// distinct leave the system without a unique solution and are rejected.
    pub fn solve(black: u8, grey: u8, white: u8) -> TilestackResult<Self> {
        if black == grey || grey == white || black == white {
            return Err(TilestackError::DegenerateCurve(format!(
                "control points must be pairwise distinct: {black}, {grey}, {white}"
            )));
        }

        let x1 = f64::from(black) / 255.0;
        let x2 = f64::from(grey) / 255.0;
        let x3 = f64::from(white) / 255.0;
        let (y1, y2, y3) = (0.0, 0.5, 1.0);

        let d21 = (y2 - y1) / (x2 - x1);
        let d32 = (y3 - y2) / (x3 - x2);
        let a = (d32 - d21) / (x3 - x1);
        let b = d21 - a * (x1 + x2);
        let c = y1 - a * x1 * x1 - b * x1;

        Ok(Self {
            a: a as f32,
            b: b as f32,
            c: c as f32,
        })
    }

    pub fn eval(self, x: f32) -> f32 {
        self.a * x * x + self.b * x + self.c
    }
}

/// Map the R, G, B channels elementwise through the curve; alpha passes
/// through untouched. No clamping here: overshoot is legal in float space
/// and is saturated at quantization time.
pub fn apply_curve(raster: &mut Raster, co: CurveCoeffs) {
    for px in raster.pixels_mut().chunks_exact_mut(4) {
        px[0] = co.eval(px[0]);
        px[1] = co.eval(px[1]);
        px[2] = co.eval(px[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba;

    #[test]
    fn solve_hits_all_three_anchors() {
        let co = CurveCoeffs::solve(0, 128, 255).unwrap();
        assert!(co.eval(0.0).abs() < 1e-6);
        assert!((co.eval(128.0 / 255.0) - 0.5).abs() < 1e-6);
        assert!((co.eval(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn solve_with_skewed_anchors_still_interpolates() {
        let co = CurveCoeffs::solve(32, 100, 220).unwrap();
        assert!(co.eval(32.0 / 255.0).abs() < 1e-6);
        assert!((co.eval(100.0 / 255.0) - 0.5).abs() < 1e-6);
        assert!((co.eval(220.0 / 255.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn repeated_anchors_are_degenerate() {
        assert!(matches!(
            CurveCoeffs::solve(100, 100, 200),
            Err(TilestackError::DegenerateCurve(_))
        ));
        assert!(matches!(
            CurveCoeffs::solve(0, 200, 200),
            Err(TilestackError::DegenerateCurve(_))
        ));
        assert!(matches!(
            CurveCoeffs::solve(50, 128, 50),
            Err(TilestackError::DegenerateCurve(_))
        ));
    }

    #[test]
    fn apply_leaves_alpha_untouched() {
        let mut r = Raster::from_color(2, 2, Rgba::new(128, 128, 128, 0x88));
        let co = CurveCoeffs::solve(0, 64, 255).unwrap();
        apply_curve(&mut r, co);
        for px in r.pixels().chunks_exact(4) {
            assert!((px[3] - 136.0 / 255.0).abs() < 1e-6);
            assert!(px[0] != 128.0 / 255.0); // rgb did move
        }
    }

    #[test]
    fn overshoot_is_not_clamped_in_float_space() {
        // A curve with a hump above 1.0 between grey and white.
        let co = CurveCoeffs::solve(0, 20, 255).unwrap();
        let mut r = Raster::from_color(1, 1, Rgba::new(128, 128, 128, 255));
        apply_curve(&mut r, co);
        assert!(r.pixels()[0] > 1.0);
        // Quantization saturates.
        assert_eq!(r.pixel_rgba8(0, 0)[0], 255);
    }
}
