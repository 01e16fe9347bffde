//! Fill specifications: solid color or two-stop linear gradient

use crate::color::{Color, ColorError};

/// Gradient axis
///
/// Backgrounds interpolate across the full canvas width; text fills
/// interpolate down the text bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A fill: one color (solid) or an ordered two-stop linear gradient
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Solid(Color),
    Gradient { start: Color, end: Color },
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    pub fn gradient(start: Color, end: Color) -> Self {
        Paint::Gradient { start, end }
    }

    /// Parse `"RRGGBB"` (solid) or `"RRGGBB:RRGGBB"` (gradient), each part
    /// with an optional `#` prefix
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        match input.split_once(':') {
            Some((first, second)) => Ok(Paint::Gradient {
                start: Color::parse(first)?,
                end: Color::parse(second)?,
            }),
            None => Ok(Paint::Solid(Color::parse(input)?)),
        }
    }

    /// The gradient start color, or the solid color itself
    pub fn start(&self) -> Color {
        match *self {
            Paint::Solid(c) => c,
            Paint::Gradient { start, .. } => start,
        }
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Paint::Gradient { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_solid_and_gradient() {
        assert_eq!(
            Paint::parse("#FF0000").unwrap(),
            Paint::Solid(Color::RED)
        );
        assert_eq!(
            Paint::parse("#FF0000:#0000FF").unwrap(),
            Paint::Gradient {
                start: Color::RED,
                end: Color::BLUE
            }
        );
        assert_eq!(
            Paint::parse("ff0000:0000ff").unwrap(),
            Paint::Gradient {
                start: Color::RED,
                end: Color::BLUE
            }
        );
    }

    #[test]
    fn parse_rejects_bad_parts() {
        assert!(Paint::parse("#FF0000:").is_err());
        assert!(Paint::parse(":#FF0000").is_err());
        assert!(Paint::parse("#FF0000:#XYZ").is_err());
    }
}
