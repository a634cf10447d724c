//! Structural similarity between two frames.

use super::Frame;
use crate::error::{Error, Result};

/// Side of the square averaging window.
const WINDOW: usize = 7;

/// Dynamic range of 8-bit samples.
const DATA_RANGE: f64 = 255.0;

const K1: f64 = 0.01;
const K2: f64 = 0.03;

/// Summed-area table over a single channel.
struct Integral {
    stride: usize,
    sums: Vec<f64>,
}

impl Integral {
    fn build(width: usize, height: usize, value: impl Fn(usize, usize) -> f64) -> Self {
        let stride = width + 1;
        let mut sums = vec![0.0; stride * (height + 1)];
        for y in 0..height {
            let mut row = 0.0;
            for x in 0..width {
                row += value(x, y);
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row;
            }
        }
        Self { stride, sums }
    }

    /// Sum over the window whose top-left corner is (`x`, `y`).
    fn window(&self, x: usize, y: usize) -> f64 {
        let (x1, y1) = (x + WINDOW, y + WINDOW);
        self.sums[y1 * self.stride + x1] - self.sums[y * self.stride + x1]
            - self.sums[y1 * self.stride + x]
            + self.sums[y * self.stride + x]
    }
}

/// Mean structural similarity of `a` and `b`.
///
/// Uses a 7x7 uniform window with sample covariance, evaluated at every
/// window position fully inside the frame, and averages over channels.
/// Identical frames score 1.0.
///
/// # Errors
///
/// Returns [`Error::FrameGeometry`] if the frames differ in shape or are
/// smaller than the window.
#[allow(clippy::cast_precision_loss)]
pub fn ssim(a: &Frame, b: &Frame) -> Result<f64> {
    if !a.same_shape(b) {
        return Err(Error::frame_geometry(format!(
            "cannot compare {}x{}x{} with {}x{}x{}",
            a.width(),
            a.height(),
            a.channels(),
            b.width(),
            b.height(),
            b.channels()
        )));
    }
    if a.width() < WINDOW || a.height() < WINDOW {
        return Err(Error::frame_geometry(format!(
            "frames must be at least {WINDOW}x{WINDOW}, got {}x{}",
            a.width(),
            a.height()
        )));
    }

    let (width, height) = (a.width(), a.height());
    let n = (WINDOW * WINDOW) as f64;
    let cov_norm = n / (n - 1.0);
    let c1 = (K1 * DATA_RANGE).powi(2);
    let c2 = (K2 * DATA_RANGE).powi(2);
    let positions = ((width - WINDOW + 1) * (height - WINDOW + 1)) as f64;

    let mut total = 0.0;
    for channel in 0..a.channels() {
        let x = |px: usize, py: usize| f64::from(a.sample(px, py, channel));
        let y = |px: usize, py: usize| f64::from(b.sample(px, py, channel));

        let sx = Integral::build(width, height, x);
        let sy = Integral::build(width, height, y);
        let sxx = Integral::build(width, height, |px, py| x(px, py) * x(px, py));
        let syy = Integral::build(width, height, |px, py| y(px, py) * y(px, py));
        let sxy = Integral::build(width, height, |px, py| x(px, py) * y(px, py));

        let mut channel_sum = 0.0;
        for wy in 0..=height - WINDOW {
            for wx in 0..=width - WINDOW {
                let ux = sx.window(wx, wy) / n;
                let uy = sy.window(wx, wy) / n;
                let vx = cov_norm * (sxx.window(wx, wy) / n - ux * ux);
                let vy = cov_norm * (syy.window(wx, wy) / n - uy * uy);
                let vxy = cov_norm * (sxy.window(wx, wy) / n - ux * uy);

                let numerator = (2.0 * ux * uy + c1) * (2.0 * vxy + c2);
                let denominator = (ux * ux + uy * uy + c1) * (vx + vy + c2);
                channel_sum += numerator / denominator;
            }
        }
        total += channel_sum / positions;
    }

    Ok(total / a.channels() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize, offset: u8) -> Frame {
        let data = (0..width * height)
            .map(|i| u8::try_from((i * 7) % 200).unwrap().saturating_add(offset))
            .collect();
        Frame::gray(width, height, data).unwrap()
    }

    fn checkerboard(width: usize, height: usize, invert: bool) -> Frame {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let on = ((x / 2 + y / 2) % 2 == 0) ^ invert;
                data.push(if on { 255 } else { 0 });
            }
        }
        Frame::gray(width, height, data).unwrap()
    }

    #[test]
    fn test_identical_frames_score_one() {
        let frame = gradient(16, 12, 0);
        let score = ssim(&frame, &frame).unwrap();
        assert!((score - 1.0).abs() < 1e-9, "score = {score}");
    }

    #[test]
    fn test_uniform_identical_frames_score_one() {
        let frame = Frame::filled(8, 8, 3, 128).unwrap();
        let score = ssim(&frame, &frame).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_shift_stays_similar() {
        let a = gradient(16, 16, 0);
        let b = gradient(16, 16, 2);
        let score = ssim(&a, &b).unwrap();
        assert!(score > 0.95, "score = {score}");
        assert!(score < 1.0);
    }

    #[test]
    fn test_inverted_pattern_is_dissimilar() {
        let a = checkerboard(16, 16, false);
        let b = checkerboard(16, 16, true);
        let score = ssim(&a, &b).unwrap();
        assert!(score < 0.0, "score = {score}");
    }

    #[test]
    fn test_symmetric() {
        let a = gradient(12, 12, 0);
        let b = checkerboard(12, 12, false);
        let ab = ssim(&a, &b).unwrap();
        let ba = ssim(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let a = Frame::filled(8, 8, 1, 0).unwrap();
        let b = Frame::filled(8, 8, 3, 0).unwrap();
        assert!(ssim(&a, &b).is_err());
    }

    #[test]
    fn test_too_small_is_error() {
        let a = Frame::filled(6, 10, 1, 0).unwrap();
        let err = ssim(&a, &a).unwrap_err();
        assert!(err.to_string().contains("at least 7x7"));
    }
}
