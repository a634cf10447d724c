//! Bandwidth reduction for drone inspection video.
//!
//! Inspection drones stream their point of view back to the ground station.
//! Long stretches of near-identical frames (hovering) and frames taken while
//! the drone itself is repositioning carry little inspection value, so they
//! can be dropped before the stream leaves the drone. This module holds the
//! per-frame decision logic; capture and encoding live elsewhere.

mod filter;
mod ssim;

pub use filter::{global_motion, FrameDecision, MotionGate, SimilarFrameFilter};
pub use ssim::ssim;

use crate::error::{Error, Result};

/// An uncompressed video frame of interleaved 8-bit samples.
///
/// Multi-channel frames are RGB(A) ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameGeometry`] if `channels` is not 1 to 4 or the
    /// buffer length does not equal `width * height * channels`.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::frame_geometry(format!(
                "{width}x{height}x{channels} frame needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A single-channel frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameGeometry`] if the buffer length is wrong.
    pub fn gray(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, 1, data)
    }

    /// A frame filled with one value in every sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameGeometry`] if `channels` is not 1 to 4 or the
    /// frame size overflows.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Result<Self> {
        let len = sample_count(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Raw interleaved samples.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Sample at (`x`, `y`) in `channel`; callers stay inside the frame.
    pub(crate) fn sample(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.data[(y * self.width + x) * self.channels + channel]
    }

    /// Whether `other` has the same width, height and channel count.
    #[must_use]
    pub fn same_shape(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Per-pixel luma (BT.601 weights for RGB, first channel otherwise).
    #[must_use]
    pub fn luma(&self) -> Vec<f64> {
        self.data
            .chunks_exact(self.channels)
            .map(|px| {
                if px.len() >= 3 {
                    0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2])
                } else {
                    f64::from(px[0])
                }
            })
            .collect()
    }
}

fn sample_count(width: usize, height: usize, channels: usize) -> Result<usize> {
    if !(1..=4).contains(&channels) {
        return Err(Error::frame_geometry(format!(
            "expected 1 to 4 channels, got {channels}"
        )));
    }
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or_else(|| {
            Error::frame_geometry(format!("{width}x{height}x{channels} frame is too large"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(Frame::new(2, 2, 3, vec![0; 12]).is_ok());
        let err = Frame::new(2, 2, 3, vec![0; 10]).unwrap_err();
        assert!(err.to_string().contains("needs 12 bytes, got 10"));
    }

    #[test]
    fn test_new_validates_channels() {
        assert!(Frame::new(1, 1, 0, vec![]).is_err());
        assert!(Frame::new(1, 1, 5, vec![0; 5]).is_err());
    }

    #[test]
    fn test_oversized_geometry_is_error() {
        let err = Frame::new(usize::MAX, 2, 1, vec![]).unwrap_err();
        assert!(matches!(err, Error::FrameGeometry { .. }));
        assert!(err.to_string().contains("too large"));

        assert!(Frame::new(usize::MAX / 2, 2, 3, vec![]).is_err());
        assert!(Frame::filled(usize::MAX, usize::MAX, 1, 0).is_err());
    }

    #[test]
    fn test_filled_validates_channels() {
        assert!(Frame::filled(4, 4, 0, 0).is_err());
        assert!(Frame::filled(4, 4, 5, 0).is_err());
        assert_eq!(Frame::filled(4, 4, 2, 7).unwrap().data(), &[7; 32][..]);
    }

    #[test]
    fn test_sample_indexing() {
        let frame = Frame::new(2, 1, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(frame.sample(0, 0, 1), 2);
        assert_eq!(frame.sample(1, 0, 0), 3);
    }

    #[test]
    fn test_luma_rgb_and_gray() {
        let rgb = Frame::new(1, 1, 3, vec![255, 255, 255]).unwrap();
        assert!((rgb.luma()[0] - 255.0).abs() < 1e-9);

        let gray = Frame::gray(2, 1, vec![10, 20]).unwrap();
        assert_eq!(gray.luma(), vec![10.0, 20.0]);
    }

    #[test]
    fn test_same_shape() {
        let a = Frame::filled(8, 8, 3, 0).unwrap();
        assert!(a.same_shape(&Frame::filled(8, 8, 3, 255).unwrap()));
        assert!(!a.same_shape(&Frame::filled(8, 8, 1, 0).unwrap()));
        assert!(!a.same_shape(&Frame::filled(8, 9, 3, 0).unwrap()));
    }
}
