//! Progressive probabilistic Hough transform for line segments.
//!
//! Edge points are visited in a pseudo-random (seeded, hence reproducible)
//! order. Each point votes in a `(theta, rho)` accumulator; as soon as one
//! of its cells reaches the vote threshold the corresponding line is
//! followed through the edge mask in both directions, tolerating gaps of
//! up to `max_line_gap` pixels. Followed pixels are removed from the mask
//! (and, for accepted segments, their votes are withdrawn) so the same
//! line is not reported twice.
//!
//! Line following uses 16-bit fixed point along the minor axis.

use std::f64::consts::PI;

use image::GrayImage;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

const SHIFT: u32 = 16;

/// A detected line segment in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    /// Angle of the segment in degrees, `atan2(y2 - y1, x2 - x1)` in image
    /// coordinates (y down), with the endpoints ordered left to right.
    ///
    /// The result lies in `(-90, 90]`: a segment rising to the right on
    /// screen has a negative angle.
    pub fn angle_degrees(&self) -> f64 {
        let (dx, dy) = if self.x2 < self.x1 || (self.x2 == self.x1 && self.y2 < self.y1) {
            (self.x1 - self.x2, self.y1 - self.y2)
        } else {
            (self.x2 - self.x1, self.y2 - self.y1)
        };
        (dy as f64).atan2(dx as f64).to_degrees()
    }

    /// Euclidean length in pixels, e.g. to weight or filter segments
    /// returned by [`detect_line_segments`](super::detect_line_segments).
    pub fn length(&self) -> f64 {
        let dx = (self.x2 - self.x1) as f64;
        let dy = (self.y2 - self.y1) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Detector settings, already validated by the caller.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HoughOptions {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f64,
    /// Angle resolution of the accumulator in radians.
    pub theta: f64,
    /// Minimum votes for a line candidate.
    pub threshold: u32,
    /// Segments shorter than this along both axes are discarded.
    pub min_line_length: u32,
    /// Maximum run of missing pixels bridged while following a line.
    pub max_line_gap: u32,
    /// Seed for the point visiting order.
    pub seed: u64,
}

/// Detect line segments among the non-zero pixels of `edges`.
pub(crate) fn probabilistic_hough(edges: &GrayImage, opts: &HoughOptions) -> Vec<LineSegment> {
    let (width, height) = edges.dimensions();
    let (w, h) = (width as i64, height as i64);

    let irho = 1.0 / opts.rho;
    let num_angle = ((PI / opts.theta).round() as usize).max(1);
    let num_rho = (((((w + h) * 2 + 1) as f64) / opts.rho).round() as usize).max(1);
    let rho_offset = (num_rho as i64 - 1) / 2;
    let max_rho = num_rho as i64 - 1;

    let trig: Vec<(f64, f64)> = (0..num_angle)
        .map(|n| {
            let angle = n as f64 * opts.theta;
            (angle.cos() * irho, angle.sin() * irho)
        })
        .collect();

    let rho_index = |x: i64, y: i64, n: usize| -> usize {
        let (c, s) = trig[n];
        ((x as f64 * c + y as f64 * s).round() as i64 + rho_offset).clamp(0, max_rho) as usize
    };

    let mut accum = vec![0i32; num_angle * num_rho];
    let mut mask = vec![false; width as usize * height as usize];
    let mut points = Vec::new();

    for (x, y, p) in edges.enumerate_pixels() {
        if p[0] != 0 {
            mask[y as usize * width as usize + x as usize] = true;
            points.push((x as i64, y as i64));
        }
    }

    let mut rng = StdRng::seed_from_u64(opts.seed);
    points.shuffle(&mut rng);

    let threshold = opts.threshold as i32;
    let min_len = opts.min_line_length as i64;
    let max_gap = opts.max_line_gap;
    let mut segments = Vec::new();

    for &(px, py) in &points {
        // Already consumed by another line
        if !mask[(py * w + px) as usize] {
            continue;
        }

        // Vote and find the strongest cell for this point
        let mut max_val = threshold - 1;
        let mut max_n = 0usize;
        for n in 0..num_angle {
            let cell = &mut accum[n * num_rho + rho_index(px, py, n)];
            *cell += 1;
            if *cell > max_val {
                max_val = *cell;
                max_n = n;
            }
        }
        if max_val < threshold {
            continue;
        }

        // Direction of the candidate line, stepping one pixel along the
        // major axis and a fixed-point fraction along the minor one.
        let a = -trig[max_n].1;
        let b = trig[max_n].0;
        let mut x0 = px;
        let mut y0 = py;
        let (dx0, dy0, x_major) = if a.abs() > b.abs() {
            y0 = (y0 << SHIFT) + (1 << (SHIFT - 1));
            let dy0 = (b * (1i64 << SHIFT) as f64 / a.abs()).round() as i64;
            (if a > 0.0 { 1 } else { -1 }, dy0, true)
        } else {
            x0 = (x0 << SHIFT) + (1 << (SHIFT - 1));
            let dx0 = (a * (1i64 << SHIFT) as f64 / b.abs()).round() as i64;
            (dx0, if b > 0.0 { 1 } else { -1 }, false)
        };
        let to_pixel = |x: i64, y: i64| {
            if x_major {
                (x, y >> SHIFT)
            } else {
                (x >> SHIFT, y)
            }
        };

        // Follow the line both ways to find its extent
        let mut line_end = [(px, py); 2];
        for (k, end) in line_end.iter_mut().enumerate() {
            let (dx, dy) = if k == 0 { (dx0, dy0) } else { (-dx0, -dy0) };
            let (mut x, mut y) = (x0, y0);
            let mut gap = 0u32;
            loop {
                let (j, i) = to_pixel(x, y);
                if j < 0 || j >= w || i < 0 || i >= h {
                    break;
                }
                if mask[(i * w + j) as usize] {
                    gap = 0;
                    *end = (j, i);
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
                x += dx;
                y += dy;
            }
        }

        let good_line = (line_end[1].0 - line_end[0].0).abs() >= min_len
            || (line_end[1].1 - line_end[0].1).abs() >= min_len;

        // Walk again up to each end, consuming the pixels
        for (k, &end) in line_end.iter().enumerate() {
            let (dx, dy) = if k == 0 { (dx0, dy0) } else { (-dx0, -dy0) };
            let (mut x, mut y) = (x0, y0);
            loop {
                let (j, i) = to_pixel(x, y);
                let idx = (i * w + j) as usize;
                if mask[idx] {
                    if good_line {
                        for n in 0..num_angle {
                            accum[n * num_rho + rho_index(j, i, n)] -= 1;
                        }
                    }
                    mask[idx] = false;
                }
                if (j, i) == end {
                    break;
                }
                x += dx;
                y += dy;
            }
        }

        if good_line {
            segments.push(LineSegment {
                x1: line_end[0].0 as i32,
                y1: line_end[0].1 as i32,
                x2: line_end[1].0 as i32,
                y2: line_end[1].1 as i32,
            });
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn options(threshold: u32, min_line_length: u32) -> HoughOptions {
        HoughOptions {
            rho: 1.0,
            theta: PI / 180.0,
            threshold,
            min_line_length,
            max_line_gap: 20,
            seed: 7,
        }
    }

    #[test]
    fn test_empty_image_has_no_lines() {
        let edges = GrayImage::new(64, 64);
        assert!(probabilistic_hough(&edges, &options(10, 10)).is_empty());
    }

    /// Paint a horizontal band `thickness` rows tall.
    fn horizontal_band(
        edges: &mut GrayImage,
        xs: impl Iterator<Item = u32> + Clone,
        y: u32,
        thickness: u32,
    ) {
        for dy in 0..thickness {
            for x in xs.clone() {
                edges.put_pixel(x, y + dy, Luma([255]));
            }
        }
    }

    #[test]
    fn test_detects_horizontal_line() {
        let mut edges = GrayImage::new(200, 60);
        horizontal_band(&mut edges, 10..190, 29, 3);
        let lines = probabilistic_hough(&edges, &options(30, 50));
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.angle_degrees().abs() < 1.5, "angle {}", line.angle_degrees());
        }
        let longest = lines.iter().map(LineSegment::length).fold(0.0, f64::max);
        assert!(longest >= 100.0, "longest {}", longest);
    }

    #[test]
    fn test_detects_vertical_line() {
        let mut edges = GrayImage::new(60, 200);
        for x in 19..22 {
            for y in 5..195 {
                edges.put_pixel(x, y, Luma([255]));
            }
        }
        let lines = probabilistic_hough(&edges, &options(30, 50));
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.angle_degrees().abs() > 88.5, "angle {}", line.angle_degrees());
        }
    }

    #[test]
    fn test_bridges_small_gaps() {
        let mut edges = GrayImage::new(240, 40);
        horizontal_band(&mut edges, (5..235).filter(|x| x % 20 < 15), 19, 3);
        let lines = probabilistic_hough(&edges, &options(30, 80));
        let longest = lines.iter().map(LineSegment::length).fold(0.0, f64::max);
        assert!(longest >= 100.0, "longest {}", longest);
    }

    #[test]
    fn test_short_segments_rejected() {
        let mut edges = GrayImage::new(100, 100);
        horizontal_band(&mut edges, 10..40, 50, 3);
        assert!(probabilistic_hough(&edges, &options(20, 50)).is_empty());
    }

    #[test]
    fn test_same_seed_same_result() {
        let mut edges = GrayImage::new(80, 80);
        for i in 0..70 {
            edges.put_pixel(5 + i, 10 + i / 3, Luma([255]));
            edges.put_pixel(5 + i, 60, Luma([255]));
        }
        let a = probabilistic_hough(&edges, &options(20, 40));
        let b = probabilistic_hough(&edges, &options(20, 40));
        assert_eq!(a, b);
    }

    #[test]
    fn test_coarse_rho_collapses_to_one_bin() {
        let mut edges = GrayImage::new(100, 100);
        horizontal_band(&mut edges, 10..90, 50, 3);
        let mut opts = options(5, 40);
        opts.rho = 1000.0;
        // Every point lands in the single distance bin; no out-of-range vote
        let lines = probabilistic_hough(&edges, &opts);
        assert!(lines.iter().all(|l| l.length() >= 40.0));
    }

    #[test]
    fn test_angle_orientation() {
        let rising = LineSegment {
            x1: 0,
            y1: 10,
            x2: 10,
            y2: 0,
        };
        assert!((rising.angle_degrees() + 45.0).abs() < 1e-9);

        // Endpoint order does not matter
        let reversed = LineSegment {
            x1: 10,
            y1: 0,
            x2: 0,
            y2: 10,
        };
        assert!((reversed.angle_degrees() + 45.0).abs() < 1e-9);
    }
}
