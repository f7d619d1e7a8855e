//! Visual feedback derived from a card's horizontal offset.
//!
//! Everything here is a pure function of the offset: the card's tilt and fade,
//! the "match"/"nope" label opacities, and the styling of the two control
//! buttons. All mappings are piecewise linear and clamp outside their input
//! range.

use serde::Serialize;

/// Offset at which the card reaches its maximum tilt and fades out completely.
const TILT_RANGE: f64 = 200.0;

/// Maximum tilt magnitude in degrees.
const MAX_TILT: f64 = 15.0;

/// Offset at which the card starts fading.
const FADE_START: f64 = 100.0;

/// Offset at which a label starts to appear.
pub const LABEL_START: f64 = 20.0;

/// Offset at which a label is fully opaque.
pub const LABEL_FULL: f64 = 100.0;

/// Offset at which a control button is fully engaged.
const BUTTON_ENGAGED: f64 = 70.0;

/// Offset past which a control button stops changing.
const BUTTON_SATURATED: f64 = 150.0;

/// Offset at which the opposite button is fully dimmed.
const BUTTON_DIMMED: f64 = 100.0;

/// Piecewise linear interpolation with clamping.
///
/// `input` must be ascending and the same length as `output`. Values outside
/// the input range take the nearest end of `output`.
///
/// # Example
///
/// ```
/// use unimatch::gesture::feedback::interpolate;
///
/// let stops = [-200.0, -100.0, 0.0, 100.0, 200.0];
/// let opacity = [0.0, 1.0, 1.0, 1.0, 0.0];
/// assert_eq!(interpolate(150.0, &stops, &opacity), 0.5);
/// assert_eq!(interpolate(-900.0, &stops, &opacity), 0.0);
/// ```
#[must_use]
pub fn interpolate(x: f64, input: &[f64], output: &[f64]) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    let (Some(&first), Some(&last)) = (input.first(), input.last()) else {
        return 0.0;
    };
    if x <= first {
        return output[0];
    }
    if x >= last {
        return output[output.len() - 1];
    }
    for i in 1..input.len() {
        if x <= input[i] {
            let (x0, x1) = (input[i - 1], input[i]);
            let (y0, y1) = (output[i - 1], output[i]);
            if (x1 - x0).abs() < f64::EPSILON {
                return y1;
            }
            return y0 + (x - x0) / (x1 - x0) * (y1 - y0);
        }
    }
    output[output.len() - 1]
}

/// An sRGB colour with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Linear blend toward `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| {
            let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = value.round().clamp(0.0, 255.0) as u8;
            value
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// CSS `rgba()` notation.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
    }
}

const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

/// Pose of a card at a given offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardPose {
    pub offset: f64,
    /// Tilt in degrees, positive clockwise.
    pub rotation: f64,
    pub opacity: f64,
    pub like_label_opacity: f64,
    pub reject_label_opacity: f64,
}

impl CardPose {
    /// Computes the pose for a horizontal offset.
    #[must_use]
    pub fn at(offset: f64) -> Self {
        Self {
            offset,
            rotation: interpolate(offset, &[-TILT_RANGE, TILT_RANGE], &[-MAX_TILT, MAX_TILT]),
            opacity: interpolate(
                offset,
                &[-TILT_RANGE, -FADE_START, 0.0, FADE_START, TILT_RANGE],
                &[0.0, 1.0, 1.0, 1.0, 0.0],
            ),
            like_label_opacity: interpolate(offset, &[LABEL_START, LABEL_FULL], &[0.0, 1.0]),
            reject_label_opacity: interpolate(offset, &[-LABEL_FULL, -LABEL_START], &[1.0, 0.0]),
        }
    }

    /// Pose of a card at rest with a fixed tilt.
    #[must_use]
    pub const fn resting(rotation: f64) -> Self {
        Self {
            offset: 0.0,
            rotation,
            opacity: 1.0,
            like_label_opacity: 0.0,
            reject_label_opacity: 0.0,
        }
    }
}

/// Styling of one control button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ButtonStyle {
    pub scale: f64,
    pub opacity: f64,
    /// Gradient stops of the button background.
    pub background: (Rgba, Rgba),
    pub foreground: Rgba,
    pub border: Rgba,
    /// Glow strength in `[0, 1]`; 1 is a 30px halo.
    pub glow: f64,
    /// Icon tilt in degrees.
    pub icon_rotation: f64,
}

/// Base and hot colours for one button.
struct ButtonColors {
    light: (u8, u8, u8),
    dark: (u8, u8, u8),
}

const REJECT_COLORS: ButtonColors = ButtonColors {
    light: (220, 38, 38),
    dark: (185, 28, 28),
};

const LIKE_COLORS: ButtonColors = ButtonColors {
    light: (22, 163, 74),
    dark: (21, 128, 61),
};

impl ButtonStyle {
    /// Style for a button engaged to `engagement` in `[0, 1]`.
    fn blend(colors: &ButtonColors, engagement: f64, scale: f64, opacity: f64, icon_rotation: f64) -> Self {
        let (lr, lg, lb) = colors.light;
        let (dr, dg, db) = colors.dark;
        let idle = (Rgba::new(lr, lg, lb, 0.2), Rgba::new(dr, dg, db, 0.4));
        let hot = (Rgba::new(lr, lg, lb, 1.0), Rgba::new(dr, dg, db, 1.0));
        Self {
            scale,
            opacity,
            background: (idle.0.mix(hot.0, engagement), idle.1.mix(hot.1, engagement)),
            foreground: Rgba::new(lr, lg, lb, 1.0).mix(WHITE, engagement),
            border: Rgba::new(lr, lg, lb, 0.6).mix(Rgba::new(lr, lg, lb, 1.0), engagement),
            glow: engagement,
            icon_rotation,
        }
    }
}

/// Styling of both control buttons at a given offset.
///
/// Dragging left engages the reject button and dims the like button, and the
/// other way round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlFeedback {
    pub reject: ButtonStyle,
    pub like: ButtonStyle,
}

impl ControlFeedback {
    #[must_use]
    pub fn at(offset: f64) -> Self {
        let reject_stops = [-BUTTON_SATURATED, -BUTTON_ENGAGED, 0.0];
        let like_stops = [0.0, BUTTON_ENGAGED, BUTTON_SATURATED];

        let reject = ButtonStyle::blend(
            &REJECT_COLORS,
            interpolate(offset, &reject_stops, &[1.0, 1.0, 0.0]),
            interpolate(offset, &reject_stops, &[1.2, 1.2, 1.0]),
            interpolate(offset, &[0.0, BUTTON_DIMMED], &[1.0, 0.5]),
            interpolate(offset, &reject_stops, &[-90.0, 0.0, 0.0]),
        );
        let like = ButtonStyle::blend(
            &LIKE_COLORS,
            interpolate(offset, &like_stops, &[0.0, 1.0, 1.0]),
            interpolate(offset, &like_stops, &[1.0, 1.2, 1.2]),
            interpolate(offset, &[-BUTTON_DIMMED, 0.0], &[0.5, 1.0]),
            interpolate(offset, &like_stops, &[0.0, 0.0, -12.0]),
        );
        Self { reject, like }
    }

    /// Feedback with no card being dragged.
    #[must_use]
    pub fn neutral() -> Self {
        Self::at(0.0)
    }
}
