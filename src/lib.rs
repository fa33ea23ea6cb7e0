//! The $1 single-stroke gesture recognizer.
//!
//! A [`Stroke`] is resampled, rotated so its indicative angle is zero, scaled into a
//! square and centered before being compared point by point with templates normalized
//! the same way. The remaining rotation is found with a golden-section search.
//!
//! ```
//! use one_recognizer::{Point, RecognizerParameters, Stroke, recognizer};
//!
//! let caret = Stroke::new("caret", vec![Point::new(0.0, 50.0), Point::new(25.0, 0.0), Point::new(50.0, 50.0)]);
//! let line = Stroke::new("line", vec![Point::new(0.0, 0.0), Point::new(40.0, 10.0), Point::new(80.0, 45.0)]);
//! let drawn = Stroke::new("", vec![Point::new(10.0, 110.0), Point::new(60.0, 10.0), Point::new(110.0, 110.0)]);
//!
//! let m = recognizer::classify(&drawn, &[caret, line], &RecognizerParameters::default()).unwrap();
//! assert_eq!(m.name(), "caret");
//! ```

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

pub use error::{LibraryError, StrokeError};
pub use geometry::BoundingBox;
pub use library::TemplateLibrary;
pub use point::Point;
pub use recognizer::{Match, RecognizerParameters};
pub use stroke::Stroke;

pub mod error;
pub mod geometry;
pub mod library;
pub mod point;
pub mod recognizer;
pub mod stroke;
