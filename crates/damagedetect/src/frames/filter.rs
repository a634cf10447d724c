//! Keep/drop decisions over a frame stream.

use tracing::trace;

use super::{ssim, Frame};
use crate::error::{Error, Result};

/// Outcome of offering one frame to a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDecision {
    /// Whether the frame should be forwarded.
    pub keep: bool,
    /// Similarity to the previous frame, when there was one.
    pub similarity: Option<f64>,
}

/// Drops runs of near-identical frames.
///
/// When consecutive frames stay above `similarity_threshold`, only the first
/// `frame_threshold` frames of the run are kept. Any dissimilar frame ends
/// the run and is kept.
#[derive(Debug, Clone)]
pub struct SimilarFrameFilter {
    frame_threshold: usize,
    similarity_threshold: f64,
    previous: Option<Frame>,
    in_sequence: bool,
    frames_in_sequence: usize,
}

impl Default for SimilarFrameFilter {
    fn default() -> Self {
        Self::new(3, 0.95)
    }
}

impl SimilarFrameFilter {
    /// Create a filter.
    #[must_use]
    pub fn new(frame_threshold: usize, similarity_threshold: f64) -> Self {
        Self {
            frame_threshold,
            similarity_threshold,
            previous: None,
            in_sequence: false,
            frames_in_sequence: 0,
        }
    }

    /// Offer the next frame of the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be compared with the previous one.
    pub fn admit(&mut self, frame: &Frame) -> Result<FrameDecision> {
        let mut keep = true;
        let mut similarity = None;

        if let Some(previous) = &self.previous {
            let score = ssim(previous, frame)?;
            similarity = Some(score);

            if score > self.similarity_threshold {
                if self.in_sequence {
                    self.frames_in_sequence += 1;
                    keep = self.frames_in_sequence <= self.frame_threshold;
                } else {
                    self.in_sequence = true;
                    self.frames_in_sequence = 1;
                }
            } else {
                self.in_sequence = false;
                self.frames_in_sequence = 0;
            }
            trace!(
                similarity = score,
                run = self.frames_in_sequence,
                keep,
                "similar-frame decision"
            );
        }

        self.previous = Some(frame.clone());
        Ok(FrameDecision { keep, similarity })
    }

    /// Run a whole stream through the filter and return the kept indices.
    ///
    /// # Errors
    ///
    /// Returns the first comparison error.
    pub fn retained<'a>(
        &mut self,
        frames: impl IntoIterator<Item = &'a Frame>,
    ) -> Result<Vec<usize>> {
        let mut kept = Vec::new();
        for (index, frame) in frames.into_iter().enumerate() {
            if self.admit(frame)?.keep {
                kept.push(index);
            }
        }
        Ok(kept)
    }

    /// Forget the previous frame and any run in progress.
    pub fn reset(&mut self) {
        self.previous = None;
        self.in_sequence = false;
        self.frames_in_sequence = 0;
    }
}

/// Drops frames while the drone itself is moving.
///
/// Motion above `motion_threshold` for `frames_threshold` consecutive frames
/// closes the gate; it reopens on the second calm frame after such a run, or
/// on the first calm frame after a shorter one.
#[derive(Debug, Clone)]
pub struct MotionGate {
    frames_threshold: usize,
    motion_threshold: f64,
    motion_count: usize,
    open: bool,
}

impl MotionGate {
    /// Create a gate for a stream at `fps`.
    ///
    /// `period_threshold` is how many seconds of continuous motion close the
    /// gate. The resulting frame count is at least one.
    ///
    /// # Errors
    ///
    /// Returns an error if `fps` or `period_threshold` is not positive.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(fps: f64, period_threshold: f64, motion_threshold: f64) -> Result<Self> {
        if !(fps > 0.0 && period_threshold > 0.0) {
            return Err(Error::frame_geometry(format!(
                "fps ({fps}) and period threshold ({period_threshold}) must be positive"
            )));
        }
        let frames_threshold = ((fps * period_threshold).floor() as usize).max(1);
        Ok(Self {
            frames_threshold,
            motion_threshold,
            motion_count: 0,
            open: true,
        })
    }

    /// A gate with a 0.5 s period and a 0.15 motion threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if `fps` is not positive.
    pub fn with_defaults(fps: f64) -> Result<Self> {
        Self::new(fps, 0.5, 0.15)
    }

    /// Consecutive moving frames needed to close the gate.
    #[must_use]
    pub fn frames_threshold(&self) -> usize {
        self.frames_threshold
    }

    /// Offer the next frame's normalized motion (`0.0..=1.0`).
    pub fn admit(&mut self, motion: f64) -> bool {
        if motion > self.motion_threshold {
            self.motion_count += 1;
        } else {
            if self.motion_count < self.frames_threshold {
                self.open = true;
            }
            self.motion_count = 0;
        }

        if self.motion_count >= self.frames_threshold {
            self.open = false;
        }

        trace!(motion, run = self.motion_count, keep = self.open, "motion decision");
        self.open
    }
}

/// Estimate global (camera) motion between two frames.
///
/// Splits the frame into a `grid` x `grid` lattice, takes the mean absolute
/// luma change per cell and returns the median over cells scaled into
/// `0.0..=1.0`. The median ignores a few busy cells, so a moving subject
/// scores low while a panning camera scores high.
///
/// # Errors
///
/// Returns an error if the frames differ in shape or are smaller than the grid.
#[allow(clippy::cast_precision_loss)]
pub fn global_motion(previous: &Frame, next: &Frame, grid: usize) -> Result<f64> {
    if !previous.same_shape(next) {
        return Err(Error::frame_geometry("frames differ in shape"));
    }
    if grid == 0 || previous.width() < grid || previous.height() < grid {
        return Err(Error::frame_geometry(format!(
            "{}x{} frame cannot be split into a {grid}x{grid} grid",
            previous.width(),
            previous.height()
        )));
    }

    let width = previous.width();
    let (cell_w, cell_h) = (width / grid, previous.height() / grid);
    let a = previous.luma();
    let b = next.luma();

    let mut scores = Vec::with_capacity(grid * grid);
    for gy in 0..grid {
        for gx in 0..grid {
            let mut sum = 0.0;
            for y in gy * cell_h..(gy + 1) * cell_h {
                for x in gx * cell_w..(gx + 1) * cell_w {
                    let i = y * width + x;
                    sum += (a[i] - b[i]).abs();
                }
            }
            scores.push(sum / (cell_w * cell_h) as f64);
        }
    }

    Ok((median(&mut scores) / 255.0).min(1.0))
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
