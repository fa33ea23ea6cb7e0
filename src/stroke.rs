/*
 * The $1 Unistroke Recognizer (rust version)
 *
 * Original authors:
 *
 *	    Jacob O. Wobbrock, Ph.D.
 * 	    The Information School
 *	    University of Washington
 *	    Seattle, WA 98195-2840
 *	    wobbrock@uw.edu
 *
 *	    Andrew D. Wilson, Ph.D.
 *	    Microsoft Research
 *	    One Microsoft Way
 *	    Redmond, WA 98052
 *	    awilson@microsoft.com
 *
 *	    Yang Li, Ph.D.
 *	    Department of Computer Science and Engineering
 *	    University of Washington
 *	    Seattle, WA 98195-2840
 *	    yangli@cs.washington.edu
 *
 * The academic publication for the $1 recognizer, and what should be
 * used to cite it, is:
 *
 *	Wobbrock, J.O., Wilson, A.D. and Li, Y. (2007). Gestures without
 *	  libraries, toolkits or training: A $1 recognizer for user interface
 *	  prototypes. Proceedings of the ACM Symposium on User Interface
 *	  Software and Technology (UIST '07). Newport, Rhode Island (October
 *	  7-10, 2007). New York: ACM Press, pp. 159-168.
 *
 * This software is distributed under the "New BSD License" agreement:
 *
 * Copyright (c) 2007-2012, Jacob O. Wobbrock, Andrew D. Wilson and Yang Li.
 * All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without
 * modification, are permitted provided that the following conditions are met:
 *    * Redistributions of source code must retain the above copyright
 *      notice, this list of conditions and the following disclaimer.
 *    * Redistributions in binary form must reproduce the above copyright
 *      notice, this list of conditions and the following disclaimer in the
 *      documentation and/or other materials provided with the distribution.
 *    * Neither the names of the University of Washington nor Microsoft,
 *	    nor the names of its contributors may be used to endorse or promote
 *	    products derived from this software without specific prior written
 *	    permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS
 * IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO,
 * THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
 * PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL Jacob O. Wobbrock OR Andrew D. Wilson
 * OR Yang Li BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
 * EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT
 * OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
 * INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
 * STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
 * OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
 * SUCH DAMAGE.
**/

use std::cmp::Ordering;

use crate::{
    error::StrokeError,
    geometry::{self, BoundingBox},
    point::Point,
    recognizer::{self, Match, RecognizerParameters},
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use tracing::trace;

/// Default number of points on the resampled path
pub const SAMPLING_RESOLUTION: usize = 64;
/// Default side of the square reference box strokes are scaled into
pub const SQUARE_SIZE: f32 = 250.0;
/// Golden ratio conjugate used by the best-angle search, (sqrt(5) - 1) / 2
const PHI: f32 = 0.618_034;

/// Implements a single-stroke gesture: a named path of points in drawing order.
///
/// Every transformation borrows the stroke and returns a new one with the same name,
/// so the raw input stays available after normalization.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stroke {
    /// Gesture class, used as a lookup key
    pub name: String,
    /// Gesture points, first to last
    pub points: Vec<Point>,
}

impl Stroke {
    /// Constructs a new stroke from a list of points and a name
    pub fn new(name: &str, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Constructs an empty stroke to be filled while the pointer is held down
    pub fn named(name: &str) -> Self {
        Self::new(name, Vec::new())
    }

    /// Appends a point unless it repeats the last one (the pointer did not move)
    pub fn push(&mut self, p: Point) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Orders strokes by name only, ignoring their points.
    /// Used to keep template libraries sorted.
    pub fn cmp_by_name(&self, other: &Stroke) -> Ordering {
        self.name.cmp(&other.name)
    }

    fn ensure_points(&self, operation: &'static str) -> Result<(), StrokeError> {
        if self.points.is_empty() {
            return Err(StrokeError::InvalidStroke { operation });
        }
        Ok(())
    }

    /// Builds a stroke with the same name and the given points
    fn with_points(&self, points: Vec<Point>) -> Stroke {
        Stroke {
            name: self.name.clone(),
            points,
        }
    }

    /// Computes the centroid of the stroke
    pub fn centroid(&self) -> Result<Point, StrokeError> {
        self.ensure_points("find the centroid")?;
        let sum = self.points.iter().fold(Point::ORIGIN, |acc, p| acc + *p);
        Ok(sum / self.points.len() as f32)
    }

    /// Computes the axis-aligned bounding box of the stroke
    pub fn bounding_box(&self) -> Result<BoundingBox, StrokeError> {
        BoundingBox::of(&self.points).ok_or(StrokeError::InvalidStroke {
            operation: "find the bounding box",
        })
    }

    /// Computes the path length of the stroke. Zero for less than two points.
    pub fn path_length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| geometry::euclidean_distance(&w[0], &w[1]))
            .sum()
    }

    /// Resamples the stroke into n points equally spaced along the path.
    ///
    /// The first point is always kept. Interpolated points become the start of the
    /// remaining part of their segment, so spacing is measured along the new path.
    pub fn resample(&self, n: usize) -> Result<Stroke, StrokeError> {
        self.ensure_points("resample the stroke")?;
        if n < 2 {
            return Err(StrokeError::InvalidSampleCount(n));
        }

        let first = self.points[0];
        let interval = self.path_length() / (n as f32 - 1.0);
        if interval <= 0.0 {
            // all the points coincide
            return Ok(self.with_points(vec![first; n]));
        }

        let mut new_points = Vec::with_capacity(n);
        new_points.push(first);

        let mut prev = first;
        let mut d = 0.0;
        let mut i = 1;
        while i < self.points.len() && new_points.len() < n {
            let current = self.points[i];
            let dist = geometry::euclidean_distance(&prev, &current);
            if d + dist >= interval {
                let t = (interval - d) / dist;
                let q = prev + (current - prev) * t;
                new_points.push(q);
                // the rest of the segment starts at q
                prev = q;
                d = 0.0;
            } else {
                d += dist;
                prev = current;
                i += 1;
            }
        }

        // sometimes we fall a rounding-error short of adding the last point, so add it if so
        let last = self.points[self.points.len() - 1];
        while new_points.len() < n {
            new_points.push(last);
        }
        Ok(self.with_points(new_points))
    }

    /// Angle in radians from the first point to the centroid
    pub fn indicative_angle(&self) -> Result<f32, StrokeError> {
        self.ensure_points("find the indicative angle")?;
        let c = self.centroid()?;
        let first = self.points[0];
        Ok((c.y - first.y).atan2(c.x - first.x))
    }

    /// Rotates the stroke by angle radians around its centroid
    pub fn rotate_by(&self, angle: f32) -> Result<Stroke, StrokeError> {
        self.ensure_points("rotate the stroke")?;
        let c = self.centroid()?;
        let (sin, cos) = angle.sin_cos();
        let points = self
            .points
            .iter()
            .map(|p| {
                let dx = p.x - c.x;
                let dy = p.y - c.y;
                Point::new(dx * cos - dy * sin + c.x, dx * sin + dy * cos + c.y)
            })
            .collect();
        Ok(self.with_points(points))
    }

    /// Performs non-uniform scaling so the bounding box spans size x size.
    ///
    /// Width and height are stretched independently. A stroke with a flat bounding box
    /// (zero width or height) produces infinite or NaN coordinates on that axis.
    pub fn scale_to(&self, size: f32) -> Result<Stroke, StrokeError> {
        self.ensure_points("scale the stroke")?;
        let bb = self.bounding_box()?;
        let (width, height) = (bb.width(), bb.height());
        let points = self
            .points
            .iter()
            .map(|p| Point::new(p.x * size / width, p.y * size / height))
            .collect();
        Ok(self.with_points(points))
    }

    /// Translates the stroke so that its centroid lands on origin
    pub fn translate_to(&self, origin: Point) -> Result<Stroke, StrokeError> {
        self.ensure_points("translate the stroke")?;
        let offset = origin - self.centroid()?;
        let points = self.points.iter().map(|p| *p + offset).collect();
        Ok(self.with_points(points))
    }

    /// Translates the stroke so that its centroid lands on (0, 0)
    pub fn translate_to_origin(&self) -> Result<Stroke, StrokeError> {
        self.translate_to(Point::ORIGIN)
    }

    /// Runs the standard $1 processing with default parameters:
    /// resample, rotate the indicative angle to zero, scale, and translate to origin.
    pub fn normalize(&self) -> Result<Stroke, StrokeError> {
        self.normalize_with(&RecognizerParameters::default())
    }

    /// Runs the standard $1 processing with the given parameters.
    /// The indicative angle is taken after resampling and before scaling,
    /// while the first point to centroid direction is still undistorted.
    pub fn normalize_with(&self, params: &RecognizerParameters) -> Result<Stroke, StrokeError> {
        let resampled = self.resample(params.num_points)?;
        let angle = resampled.indicative_angle()?;
        resampled
            .rotate_by(-angle)?
            .scale_to(params.square_size)?
            .translate_to(params.origin)
    }

    /// Average distance between corresponding points of the two strokes
    pub fn path_distance(&self, other: &Stroke) -> Result<f32, StrokeError> {
        if self.points.len() != other.points.len() {
            return Err(StrokeError::SizeMismatch {
                left: self.points.len(),
                right: other.points.len(),
            });
        }
        self.ensure_points("find the path distance")?;
        let sum: f32 = self
            .points
            .iter()
            .zip(&other.points)
            .map(|(a, b)| geometry::euclidean_distance(a, b))
            .sum();
        Ok(sum / self.points.len() as f32)
    }

    /// Path distance to other after rotating this stroke by angle radians
    pub fn distance_at_angle(&self, other: &Stroke, angle: f32) -> Result<f32, StrokeError> {
        self.rotate_by(angle)?.path_distance(other)
    }

    /// Minimizes the path distance to other over rotations in [angle_low, angle_high]
    /// with a golden-section search, stopping once the bracket is no wider than tolerance.
    ///
    /// The distance is assumed unimodal over the interval, which holds for small windows
    /// around strokes that already share their indicative angle.
    pub fn distance_at_best_angle(
        &self,
        other: &Stroke,
        angle_low: f32,
        angle_high: f32,
        tolerance: f32,
    ) -> Result<f32, StrokeError> {
        let (mut lo, mut hi) = (angle_low, angle_high);

        let mut x1 = PHI * lo + (1.0 - PHI) * hi;
        let mut f1 = self.distance_at_angle(other, x1)?;
        let mut x2 = (1.0 - PHI) * lo + PHI * hi;
        let mut f2 = self.distance_at_angle(other, x2)?;

        while (hi - lo).abs() > tolerance {
            if f1 < f2 {
                hi = x2;
                x2 = x1;
                f2 = f1;
                x1 = PHI * lo + (1.0 - PHI) * hi;
                f1 = self.distance_at_angle(other, x1)?;
            } else {
                lo = x1;
                x1 = x2;
                f1 = f2;
                x2 = (1.0 - PHI) * lo + PHI * hi;
                f2 = self.distance_at_angle(other, x2)?;
            }
            trace!(lo, hi, f1, f2, "golden section step");
        }
        Ok(f1.min(f2))
    }

    /// Finds the template closest to this stroke and scores the match.
    ///
    /// Both this stroke and the templates must already be normalized the same way.
    /// The search covers rotations of +-45 degrees with a 2 degree precision, and the
    /// score is 1 minus the distance over half the diagonal of a
    /// reference_size x reference_size square. Ties go to the earliest template.
    pub fn recognize(&self, templates: &[Stroke], reference_size: f32) -> Result<Match, StrokeError> {
        let params = RecognizerParameters {
            square_size: reference_size,
            ..RecognizerParameters::default()
        };
        recognizer::best_match(self, templates, &params)
    }
}
