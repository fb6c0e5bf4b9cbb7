//! Star colors from the B−V color index.
//!
//! Piecewise polynomial approximation of blackbody color. Each channel has its
//! own breakpoint table; the index is clamped to [-0.4, 2.0] first, and the
//! result is gamma-softened (1/2.2) and dimmed to 95% to avoid oversaturation.

use serde::{Deserialize, Serialize};

const BV_MIN: f64 = -0.4;
const BV_MAX: f64 = 2.0;
const GAMMA: f64 = 2.2;
const INTENSITY: f64 = 0.95;

/// Linear RGB triplet, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Neutral color used when a star has no usable color index.
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// How projected stars are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Every star is white.
    #[default]
    White,
    /// Color from the catalog B−V index, white when it is missing.
    BvIndex,
}

impl ColorMode {
    /// Display color for a star with the given (possibly missing) index.
    pub fn color_for(&self, bv: Option<f64>) -> Rgb {
        match (self, bv) {
            (ColorMode::BvIndex, Some(bv)) if bv.is_finite() => bv_to_rgb(bv),
            _ => Rgb::WHITE,
        }
    }
}

/// Convert a B−V color index to RGB.
pub fn bv_to_rgb(bv: f64) -> Rgb {
    let bv = bv.clamp(BV_MIN, BV_MAX);

    let r = red(bv);
    let g = green(bv);
    let b = blue(bv);

    let soften = |c: f64| (c.max(0.0).powf(1.0 / GAMMA) * INTENSITY) as f32;
    Rgb::new(soften(r), soften(g), soften(b))
}

/// Position of `bv` within `[lo, hi]`, 0 at `lo` and 1 at `hi`.
fn frac(bv: f64, lo: f64, hi: f64) -> f64 {
    (bv - lo) / (hi - lo)
}

fn red(bv: f64) -> f64 {
    if bv < 0.0 {
        let t = frac(bv, -0.4, 0.0);
        0.61 + 0.11 * t + 0.1 * t * t
    } else if bv < 0.4 {
        let t = frac(bv, 0.0, 0.4);
        0.83 + 0.17 * t
    } else {
        1.0
    }
}

fn green(bv: f64) -> f64 {
    if bv < 0.0 {
        let t = frac(bv, -0.4, 0.0);
        0.87 + 0.11 * t
    } else if bv < 0.4 {
        let t = frac(bv, 0.0, 0.4);
        0.87 + 0.11 * t
    } else if bv < 1.6 {
        let t = frac(bv, 0.4, 1.6);
        0.98 - 0.16 * t
    } else {
        // Clamped input tops out at 2.0, so this span is closed at both ends.
        let t = frac(bv, 1.6, 2.0);
        0.82 - 0.5 * t * t
    }
}

fn blue(bv: f64) -> f64 {
    if bv < 0.0 {
        1.0
    } else if bv < 0.4 {
        let t = frac(bv, 0.0, 0.4);
        1.0 - 0.47 * t + 0.1 * t * t
    } else if bv < 1.5 {
        let t = frac(bv, 0.4, 1.5);
        0.63 - 0.6 * t * t
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit_range(c: Rgb) -> bool {
        [c.r, c.g, c.b].iter().all(|v| (0.0..=1.0).contains(v))
    }

    #[test]
    fn clamps_out_of_range_indices() {
        assert_eq!(bv_to_rgb(-3.0), bv_to_rgb(-0.4));
        assert_eq!(bv_to_rgb(-0.41), bv_to_rgb(-0.4));
        assert_eq!(bv_to_rgb(2.5), bv_to_rgb(2.0));
        assert_eq!(bv_to_rgb(100.0), bv_to_rgb(2.0));
    }

    #[test]
    fn upper_end_of_green_table_is_defined() {
        let c = bv_to_rgb(2.0);
        assert!(c.g.is_finite() && c.g > 0.0, "{c:?}");
        // 0.82 - 0.5 = 0.32 before gamma
        let expected = (0.32_f64.powf(1.0 / 2.2) * 0.95) as f32;
        assert!(
            (c.g - expected).abs() < 1e-6,
            "g = {}, expected {}",
            c.g,
            expected
        );
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn hot_star_is_blue_white() {
        let c = bv_to_rgb(-0.2);
        assert!(in_unit_range(c));
        assert!(c.b > c.r, "{c:?}");
        assert_ne!(c, Rgb::WHITE);

        // red: t = 0.5 → 0.61 + 0.055 + 0.025 = 0.69
        let expected_r = (0.69_f64.powf(1.0 / 2.2) * 0.95) as f32;
        assert!(
            (c.r - expected_r).abs() < 1e-6,
            "r = {}, expected {}",
            c.r,
            expected_r
        );
        assert!((c.b - 0.95).abs() < 1e-6);
    }

    #[test]
    fn cool_star_is_red_orange() {
        let c = bv_to_rgb(1.5);
        assert!(in_unit_range(c));
        assert!(c.r > c.g && c.g > c.b, "{c:?}");
    }

    #[test]
    fn whole_range_stays_in_unit_interval() {
        let mut bv = -0.5;
        while bv <= 2.2 {
            let c = bv_to_rgb(bv);
            assert!(in_unit_range(c), "bv {bv}: {c:?}");
            bv += 0.01;
        }
    }

    #[test]
    fn color_mode_falls_back_to_white() {
        assert_eq!(ColorMode::White.color_for(Some(0.65)), Rgb::WHITE);
        assert_eq!(ColorMode::BvIndex.color_for(None), Rgb::WHITE);
        assert_eq!(ColorMode::BvIndex.color_for(Some(f64::NAN)), Rgb::WHITE);
        assert_eq!(ColorMode::BvIndex.color_for(Some(0.65)), bv_to_rgb(0.65));
    }
}
