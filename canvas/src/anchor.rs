//! Connection anchor resolution.
//!
//! Picks the start point on the source shape and the end point on the target
//! shape for one connector. Every mode scores candidate pairs and keeps the
//! first pair with the strictly lowest score, so results are deterministic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::{Bounds, Point};
use crate::consts::{ALIGN_EPSILON, ALIGNMENT_BONUS, FACING_BONUS, MIDPOINT_BONUS, PERIMETER_STEP};
use crate::route::ConnectionStyle;

/// Candidate-set strategy for anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// Nearest pair of edge midpoints.
    #[default]
    Center,
    /// Shortest connector for the current style.
    Minimal,
    /// Midpoints and corners, biased toward midpoints facing the other shape.
    Vertex,
}

impl AnchorMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Minimal => "minimal",
            Self::Vertex => "vertex",
        }
    }
}

impl fmt::Display for AnchorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" => Ok(Self::Center),
            "minimal" => Ok(Self::Minimal),
            "vertex" => Ok(Self::Vertex),
            other => Err(format!("unknown anchor mode: {other}")),
        }
    }
}

/// Resolved endpoints of one connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPair {
    pub start: Point,
    pub end: Point,
}

/// Resolve anchors between two shape bounds.
#[must_use]
pub fn resolve(from: &Bounds, to: &Bounds, mode: AnchorMode, style: ConnectionStyle) -> AnchorPair {
    match mode {
        AnchorMode::Center => nearest(&from.midpoints(), &to.midpoints()),
        AnchorMode::Minimal => match style {
            ConnectionStyle::Straight => nearest(&perimeter_samples(from), &perimeter_samples(to)),
            ConnectionStyle::Curved => nearest(&from.midpoints(), &to.midpoints()),
            ConnectionStyle::Orthogonal | ConnectionStyle::Rounded => {
                best_pair(&from.midpoints(), &to.midpoints(), |_, a, _, b| {
                    let aligned = (a.x - b.x).abs() < ALIGN_EPSILON || (a.y - b.y).abs() < ALIGN_EPSILON;
                    a.distance(b) - if aligned { ALIGNMENT_BONUS } else { 0.0 }
                })
            }
        },
        AnchorMode::Vertex => vertex(from, to),
    }
}

/// Points along the perimeter every [`PERIMETER_STEP`] units: top edge left
/// to right, right edge top to bottom, bottom edge right to left, left edge
/// bottom to top.
#[must_use]
pub fn perimeter_samples(b: &Bounds) -> Vec<Point> {
    let steps = |len: f64| -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (len / PERIMETER_STEP).floor().max(0.0) as usize;
        n
    };
    #[allow(clippy::cast_precision_loss)]
    let at = |k: usize| k as f64 * PERIMETER_STEP;

    let (nx, ny) = (steps(b.width), steps(b.height));
    let mut out = Vec::with_capacity(2 * (nx + ny) + 4);
    out.extend((0..=nx).map(|k| Point::new(b.x + at(k), b.y)));
    out.extend((0..=ny).map(|k| Point::new(b.right(), b.y + at(k))));
    out.extend((0..=nx).map(|k| Point::new(b.right() - at(k), b.bottom())));
    out.extend((0..=ny).map(|k| Point::new(b.x, b.bottom() - at(k))));
    out
}

fn nearest(a: &[Point], b: &[Point]) -> AnchorPair {
    best_pair(a, b, |_, p, _, q| p.distance(q))
}

fn vertex(from: &Bounds, to: &Bounds) -> AnchorPair {
    let candidates = |b: &Bounds| -> Vec<Point> {
        let mut pts = b.midpoints().to_vec();
        pts.extend(b.corners());
        pts
    };
    let delta = from.center().to(to.center());

    best_pair(&candidates(from), &candidates(to), |i, a, j, b| {
        // Midpoint indices: 0 top, 1 right, 2 bottom, 3 left.
        let facing = if delta.x.abs() > delta.y.abs() {
            (delta.x > 0.0 && (i == 1 || j == 3)) || (delta.x < 0.0 && (i == 3 || j == 1))
        } else {
            (delta.y > 0.0 && (i == 2 || j == 0)) || (delta.y < 0.0 && (i == 0 || j == 2))
        };
        let mut score = a.distance(b);
        if facing {
            score -= FACING_BONUS;
        }
        if i < 4 {
            score -= MIDPOINT_BONUS;
        }
        if j < 4 {
            score -= MIDPOINT_BONUS;
        }
        score
    })
}

fn best_pair(a: &[Point], b: &[Point], score: impl Fn(usize, Point, usize, Point) -> f64) -> AnchorPair {
    let mut best: Option<(f64, AnchorPair)> = None;
    for (i, &p) in a.iter().enumerate() {
        for (j, &q) in b.iter().enumerate() {
            let s = score(i, p, j, q);
            if best.as_ref().is_none_or(|(top, _)| s < *top) {
                best = Some((s, AnchorPair { start: p, end: q }));
            }
        }
    }
    best.map_or(AnchorPair { start: Point::default(), end: Point::default() }, |(_, pair)| pair)
}

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;
