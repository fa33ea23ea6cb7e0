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

use std::f32::consts::{FRAC_PI_4, PI};

use crate::{
    error::StrokeError,
    point::Point,
    stroke::{Stroke, SAMPLING_RESOLUTION, SQUARE_SIZE},
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use tracing::debug;

/// Knobs of the $1 pipeline. The defaults are the values from the paper.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecognizerParameters {
    /// Number of points strokes are resampled into
    pub num_points: usize,
    /// Side of the reference square strokes are scaled into; also the score reference
    pub square_size: f32,
    /// The best-angle search covers [-angle_range, angle_range] radians
    pub angle_range: f32,
    /// The best-angle search stops once its bracket is this narrow, in radians
    pub angle_precision: f32,
    /// Where normalized strokes are centered
    pub origin: Point,
}

impl Default for RecognizerParameters {
    fn default() -> Self {
        RecognizerParameters {
            num_points: SAMPLING_RESOLUTION,
            square_size: SQUARE_SIZE,
            // 45 degrees
            angle_range: FRAC_PI_4,
            // 2 degrees
            angle_precision: PI / 90.0,
            origin: Point::ORIGIN,
        }
    }
}

/// Result of a recognition: the closest template and how close it is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match {
    pub template: Stroke,
    /// Path distance at the best angle
    pub distance: f32,
    /// 1 for a perfect match, decreasing with distance
    pub score: f32,
}

impl Match {
    pub fn name(&self) -> &str {
        &self.template.name
    }
}

/// Converts a path distance into a score, relative to half the diagonal of a
/// reference_size x reference_size square.
pub fn score(distance: f32, reference_size: f32) -> f32 {
    let half_diagonal = 0.5 * (reference_size * reference_size + reference_size * reference_size).sqrt();
    1.0 - distance / half_diagonal
}

/// Main function of the $1 recognizer.
/// Normalizes a raw candidate and raw templates, then classifies the candidate against them.
pub fn classify(candidate: &Stroke, templates: &[Stroke], params: &RecognizerParameters) -> Result<Match, StrokeError> {
    if templates.is_empty() {
        return Err(StrokeError::NoTemplates);
    }
    let candidate = candidate.normalize_with(params)?;
    let templates = templates
        .iter()
        .map(|t| t.normalize_with(params))
        .collect::<Result<Vec<_>, _>>()?;
    best_match(&candidate, &templates, params)
}

/// Finds the template closest to an already normalized candidate.
/// Templates must be normalized with the same parameters.
pub fn best_match(candidate: &Stroke, templates: &[Stroke], params: &RecognizerParameters) -> Result<Match, StrokeError> {
    if templates.is_empty() {
        return Err(StrokeError::NoTemplates);
    }
    let mut distances = Vec::with_capacity(templates.len());
    for template in templates {
        distances.push(best_angle_distance(candidate, template, params)?);
    }
    pick_best(templates, &distances, params)
}

/// Same as [`best_match`], with the per-template searches spread over the rayon thread pool.
/// Distances are gathered in template order first, so ties resolve exactly as in the serial version.
#[cfg(feature = "rayon")]
pub fn best_match_parallel(candidate: &Stroke, templates: &[Stroke], params: &RecognizerParameters) -> Result<Match, StrokeError> {
    use rayon::prelude::*;

    if templates.is_empty() {
        return Err(StrokeError::NoTemplates);
    }
    let distances = templates
        .par_iter()
        .map(|template| best_angle_distance(candidate, template, params))
        .collect::<Result<Vec<_>, _>>()?;
    pick_best(templates, &distances, params)
}

fn best_angle_distance(candidate: &Stroke, template: &Stroke, params: &RecognizerParameters) -> Result<f32, StrokeError> {
    let d = candidate.distance_at_best_angle(template, -params.angle_range, params.angle_range, params.angle_precision)?;
    debug!(template = %template.name, distance = d, "template distance");
    Ok(d)
}

/// Picks the smallest distance, keeping the earliest template on ties.
/// NaN distances from degenerate templates never beat a real one.
fn pick_best(templates: &[Stroke], distances: &[f32], params: &RecognizerParameters) -> Result<Match, StrokeError> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &d) in distances.iter().enumerate() {
        let better = match best {
            None => true,
            Some((_, min)) => d < min || (min.is_nan() && !d.is_nan()),
        };
        if better {
            best = Some((i, d));
        }
    }
    let (index, distance) = best.ok_or(StrokeError::NoTemplates)?;
    let template = &templates[index];
    let score = score(distance, params.square_size);
    debug!(template = %template.name, distance, score, "best match");
    Ok(Match {
        template: template.clone(),
        distance,
        score,
    })
}
