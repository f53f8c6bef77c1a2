use crate::core::Rgba;
use crate::error::{TilestackError, TilestackResult};

/// Parse an HTML-style hex color into an RGBA quadruple.
///
/// Accepted forms (always yielding four bytes):
///   `#rgb` expands to `#rrggbb` with full alpha,
///   `#rgba` expands to `#rrggbbaa`,
///   `#rrggbb` implies full alpha,
///   `#rrggbbaa` carries explicit alpha.
pub fn parse_color(text: &str) -> TilestackResult<Rgba> {
    let Some(digits) = text.strip_prefix('#') else {
        return Err(TilestackError::invalid_color(format!(
            "color must start with '#': \"{text}\""
        )));
    };

    let nibbles = digits
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| {
            TilestackError::invalid_color(format!(
                "color must be made of valid hex digits: \"{text}\""
            ))
        })?;

    match nibbles.as_slice() {
        [r, g, b] => Ok(Rgba::new(r * 0x11, g * 0x11, b * 0x11, 0xFF)),
        [r, g, b, a] => Ok(Rgba::new(r * 0x11, g * 0x11, b * 0x11, a * 0x11)),
        [r1, r2, g1, g2, b1, b2] => {
            Ok(Rgba::new(r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2, 0xFF))
        }
        [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Rgba::new(
            r1 << 4 | r2,
            g1 << 4 | g2,
            b1 << 4 | b2,
            a1 << 4 | a2,
        )),
        _ => Err(TilestackError::invalid_color(format!(
            "color must have three, four, six or eight hex digits: \"{text}\""
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(text: &str) -> Rgba {
        parse_color(text).unwrap()
    }

    #[test]
    fn white_in_every_form() {
        let white = Rgba::new(0xFF, 0xFF, 0xFF, 0xFF);
        assert_eq!(c("#fff"), white);
        assert_eq!(c("#ffff"), white);
        assert_eq!(c("#ffffff"), white);
        assert_eq!(c("#ffffffff"), white);
    }

    #[test]
    fn black_in_every_form() {
        let black = Rgba::new(0x00, 0x00, 0x00, 0xFF);
        assert_eq!(c("#000"), black);
        assert_eq!(c("#000f"), black);
        assert_eq!(c("#000000"), black);
        assert_eq!(c("#000000ff"), black);
    }

    #[test]
    fn null_is_fully_transparent() {
        let null = Rgba::new(0x00, 0x00, 0x00, 0x00);
        assert_eq!(c("#0000"), null);
        assert_eq!(c("#00000000"), null);
    }

    #[test]
    fn orange_with_and_without_alpha() {
        assert_eq!(c("#f90"), Rgba::new(0xFF, 0x99, 0x00, 0xFF));
        assert_eq!(c("#ff9900"), Rgba::new(0xFF, 0x99, 0x00, 0xFF));
        assert_eq!(c("#ff9900ff"), Rgba::new(0xFF, 0x99, 0x00, 0xFF));
        assert_eq!(c("#f908"), Rgba::new(0xFF, 0x99, 0x00, 0x88));
        assert_eq!(c("#ff990088"), Rgba::new(0xFF, 0x99, 0x00, 0x88));
    }

    #[test]
    fn missing_hash_is_rejected() {
        assert!(matches!(
            parse_color("hello"),
            Err(TilestackError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_color("ffffff"),
            Err(TilestackError::InvalidColor(_))
        ));
    }

    #[test]
    fn bad_lengths_are_rejected() {
        for text in ["#00", "#00000", "#0000000", "#000000000", "#"] {
            assert!(
                matches!(parse_color(text), Err(TilestackError::InvalidColor(_))),
                "expected InvalidColor for {text}"
            );
        }
    }

    #[test]
    fn non_hex_digits_are_rejected() {
        for text in ["#foo", "#bear", "#monkey", "#dedboeuf"] {
            assert!(
                matches!(parse_color(text), Err(TilestackError::InvalidColor(_))),
                "expected InvalidColor for {text}"
            );
        }
    }
}
