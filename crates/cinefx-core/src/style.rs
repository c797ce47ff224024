//! Typed style values and the names shared with the stylesheet.
//!
//! The effects engine writes these as plain strings into the document, the
//! renderer parses them back. Both sides go through the types here so the
//! formats cannot drift apart.

use std::fmt;
use std::str::FromStr;

/// Class names used to tag elements.
pub mod class {
    pub const SPOTLIGHT: &str = "spotlight";
    pub const PARTICLES: &str = "particles";
    pub const PARTICLE: &str = "particle";
    pub const SHOOTING_STAR: &str = "shooting-star";
    pub const FEATURE_ITEM: &str = "feature-item";
}

/// Style properties written by the effects.
pub mod property {
    pub const SPOTLIGHT_X: &str = "--x";
    pub const SPOTLIGHT_Y: &str = "--y";
    pub const LEFT: &str = "left";
    pub const TOP: &str = "top";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const ANIMATION_DURATION: &str = "animation-duration";
    pub const ANIMATION_DELAY: &str = "animation-delay";
    pub const TRANSFORM: &str = "transform";
}

/// Error returned when a style string does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized style value {input:?}")]
pub struct ParseStyleError {
    input: String,
}

impl ParseStyleError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// A length with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Percent of viewport width.
    Vw(f64),
    /// Percent of viewport height.
    Vh(f64),
    Px(f64),
    Percent(f64),
}

impl Length {
    pub fn value(self) -> f64 {
        match self {
            Length::Vw(v) | Length::Vh(v) | Length::Px(v) | Length::Percent(v) => v,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Vw(v) => write!(f, "{v}vw"),
            Length::Vh(v) => write!(f, "{v}vh"),
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for Length {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let units: [(&str, fn(f64) -> Length); 4] = [
            ("vw", Length::Vw),
            ("vh", Length::Vh),
            ("px", Length::Px),
            ("%", Length::Percent),
        ];
        units
            .iter()
            .find_map(|(suffix, ctor)| {
                s.strip_suffix(suffix)
                    .and_then(|num| num.trim().parse::<f64>().ok())
                    .map(ctor)
            })
            .ok_or_else(|| ParseStyleError::new(s))
    }
}

/// A time value in seconds, as used by `animation-duration`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Seconds(pub f64);

impl Seconds {
    /// Whole milliseconds, rounded to nearest.
    pub fn as_millis(self) -> u64 {
        (self.0 * 1000.0).round().max(0.0) as u64
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl FromStr for Seconds {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(ms) = s.strip_suffix("ms") {
            return ms
                .trim()
                .parse::<f64>()
                .map(|v| Seconds(v / 1000.0))
                .map_err(|_| ParseStyleError::new(s));
        }
        s.strip_suffix('s')
            .and_then(|num| num.trim().parse::<f64>().ok())
            .map(Seconds)
            .ok_or_else(|| ParseStyleError::new(s))
    }
}

/// Perspective tilt applied to a hovered card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    pub perspective_px: f64,
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
    pub scale: f64,
}

impl fmt::Display for TiltTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            self.perspective_px,
            self.rotate_x_deg,
            self.rotate_y_deg,
            s = self.scale,
        )
    }
}

impl FromStr for TiltTransform {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseStyleError::new(s);
        let mut perspective = None;
        let mut rotate_x = None;
        let mut rotate_y = None;
        let mut scale = None;

        for function in s.split(')').map(str::trim).filter(|f| !f.is_empty()) {
            let (name, args) = function.split_once('(').ok_or_else(err)?;
            let number = |suffix: &str| {
                args.trim()
                    .strip_suffix(suffix)
                    .and_then(|n| n.trim().parse::<f64>().ok())
            };
            match name.trim() {
                "perspective" => perspective = number("px"),
                "rotateX" => rotate_x = number("deg"),
                "rotateY" => rotate_y = number("deg"),
                "scale3d" => {
                    // Only uniform scaling is ever written.
                    scale = args
                        .split(',')
                        .next()
                        .and_then(|n| n.trim().parse::<f64>().ok());
                }
                _ => return Err(err()),
            }
        }

        Ok(TiltTransform {
            perspective_px: perspective.ok_or_else(err)?,
            rotate_x_deg: rotate_x.ok_or_else(err)?,
            rotate_y_deg: rotate_y.ok_or_else(err)?,
            scale: scale.ok_or_else(err)?,
        })
    }
}
