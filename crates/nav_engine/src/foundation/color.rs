//! HSL colour helpers for tinting scene objects

use crate::foundation::math::Vec3;

/// Evaluate one RGB channel of an HSL colour.
///
/// `p` and `q` are the lightness-derived bounds and `t` the hue offset for
/// the channel, wrapped into `[0, 1]`.
pub fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert `(hue, saturation, lightness)`, each in `[0, 1]`, to RGB
pub fn hsl_to_rgb(hsl: &Vec3) -> Vec3 {
    let (h, s, l) = (hsl.x, hsl.y, hsl.z);

    if s <= 0.0 {
        return Vec3::new(l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vec3::new(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_primary_hues() {
        let red = hsl_to_rgb(&Vec3::new(0.0, 1.0, 0.5));
        assert_relative_eq!(red, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        let green = hsl_to_rgb(&Vec3::new(1.0 / 3.0, 1.0, 0.5));
        assert_relative_eq!(green, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        let blue = hsl_to_rgb(&Vec3::new(2.0 / 3.0, 1.0, 0.5));
        assert_relative_eq!(blue, Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_grey_when_unsaturated() {
        assert_relative_eq!(hsl_to_rgb(&Vec3::new(0.42, 0.0, 0.3)), Vec3::new(0.3, 0.3, 0.3));
    }

    #[test]
    fn test_pastel_tint_stays_in_gamut() {
        for step in 0..20 {
            let rgb = hsl_to_rgb(&Vec3::new(step as f32 / 20.0, 1.0, 0.75));
            for channel in rgb.iter() {
                assert!((0.5 - EPSILON..=1.0 + EPSILON).contains(channel));
            }
        }
    }
}
