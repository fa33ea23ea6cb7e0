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

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use crate::{
    error::{LibraryError, StrokeError},
    point::Point,
    recognizer::RecognizerParameters,
    stroke::Stroke,
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use tracing::{info, warn};

/// Upper bound on capacity reserved from a count read in a library file
const MAX_PREALLOCATED: usize = 1024;

/// Saved template strokes, kept sorted by name.
///
/// Several templates may share a name (different ways of drawing the same gesture).
/// On disk the library is plain text: the stroke count, then for each stroke its name
/// on its own line, its point count, and one tab separated `x y` pair per line.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct TemplateLibrary {
    strokes: Vec<Stroke>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from strokes in any order. Strokes with equal names keep their relative order.
    pub fn from_strokes(mut strokes: Vec<Stroke>) -> Self {
        strokes.sort_by(Stroke::cmp_by_name);
        Self { strokes }
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn into_strokes(self) -> Vec<Stroke> {
        self.strokes
    }

    /// Names of the templates, in library order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strokes.iter().map(|s| s.name.as_str())
    }

    /// Whether a stroke name fits on a single line of the text format
    pub fn is_storable_name(name: &str) -> bool {
        !name.contains(['\n', '\r'])
    }

    /// Inserts a stroke after every stroke with a name that sorts before or equal to it
    pub fn insert(&mut self, stroke: Stroke) {
        let at = self.strokes.partition_point(|s| s.name <= stroke.name);
        self.strokes.insert(at, stroke);
    }

    /// First template with the given name
    pub fn find(&self, name: &str) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.name == name)
    }

    /// Removes every template with the given name and returns how many were removed
    pub fn remove_named(&mut self, name: &str) -> usize {
        let before = self.strokes.len();
        self.strokes.retain(|s| s.name != name);
        before - self.strokes.len()
    }

    /// Drops templates equal (same name and points) to an earlier one
    pub fn dedup(&mut self) {
        let mut kept: Vec<Stroke> = Vec::with_capacity(self.strokes.len());
        for stroke in self.strokes.drain(..) {
            if !kept.contains(&stroke) {
                kept.push(stroke);
            }
        }
        self.strokes = kept;
    }

    /// Normalizes every template, ready to be matched against a candidate normalized the same way
    pub fn normalized(&self, params: &RecognizerParameters) -> Result<Vec<Stroke>, StrokeError> {
        self.strokes.iter().map(|s| s.normalize_with(params)).collect()
    }

    /// Writes the library in the text format.
    /// Nothing is written if a stroke name contains a line break, since it could not be read back.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if let Some(stroke) = self.strokes.iter().find(|s| !Self::is_storable_name(&s.name)) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("stroke name {:?} spans several lines", stroke.name),
            ));
        }
        writeln!(writer, "{}", self.strokes.len())?;
        for stroke in &self.strokes {
            writeln!(writer, "{}", stroke.name)?;
            writeln!(writer, "{}", stroke.points.len())?;
            for p in &stroke.points {
                writeln!(writer, "{}\t{}", p.x, p.y)?;
            }
        }
        writer.flush()
    }

    /// Reads a library in the text format
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, LibraryError> {
        let mut lines = NumberedLines::new(reader);
        let count: usize = lines.parse_next("stroke count")?;
        // counts come from the file, only trust them as far as the lines actually present
        let mut strokes = Vec::with_capacity(count.min(MAX_PREALLOCATED));
        for _ in 0..count {
            // names are whole lines and may contain spaces
            let name = lines.next_line("stroke name")?;
            let num_points: usize = lines.parse_next("point count")?;
            let mut points = Vec::with_capacity(num_points.min(MAX_PREALLOCATED));
            for _ in 0..num_points {
                points.push(lines.parse_point()?);
            }
            strokes.push(Stroke { name, points });
        }
        Ok(Self::from_strokes(strokes))
    }

    /// Renders the library in the text format.
    /// Fails with `InvalidInput` if a stroke name contains a line break.
    pub fn to_text(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_text(text: &str) -> Result<Self, LibraryError> {
        Self::read_from(text.as_bytes())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let file = File::open(path.as_ref())?;
        let library = Self::read_from(BufReader::new(file))?;
        info!(path = %path.as_ref().display(), strokes = library.len(), "loaded template library");
        Ok(library)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let file = File::create(path.as_ref())?;
        self.write_to(BufWriter::new(file))?;
        info!(path = %path.as_ref().display(), strokes = self.len(), "saved template library");
        Ok(())
    }

    /// Loads the library at path, creating an empty library file there if none exists
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => Self::read_from(BufReader::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "no template library found, creating an empty one");
                let library = Self::new();
                library.save(path)?;
                Ok(library)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a> IntoIterator for &'a TemplateLibrary {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}

impl From<Vec<Stroke>> for TemplateLibrary {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self::from_strokes(strokes)
    }
}

/// Line reader that remembers the 1-based number of the last line read
struct NumberedLines<R> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line: 0 }
    }

    fn next_line(&mut self, what: &str) -> Result<String, LibraryError> {
        self.line += 1;
        match self.lines.next() {
            Some(line) => Ok(line?.trim_end_matches('\r').to_string()),
            None => Err(LibraryError::parse(self.line, format!("unexpected end of file, expected {what}"))),
        }
    }

    fn parse_next<T: FromStr>(&mut self, what: &str) -> Result<T, LibraryError> {
        let line = self.next_line(what)?;
        line.trim()
            .parse()
            .map_err(|_| LibraryError::parse(self.line, format!("invalid {what} {line:?}")))
    }

    fn parse_point(&mut self) -> Result<Point, LibraryError> {
        let line = self.next_line("point")?;
        let mut coords = line.split_whitespace().map(f32::from_str);
        match (coords.next(), coords.next(), coords.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) => Ok(Point::new(x, y)),
            _ => Err(LibraryError::parse(self.line, format!("invalid point {line:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stroke(name: &str, points: &[(f32, f32)]) -> Stroke {
        Stroke::new(name, points.iter().copied().map(Point::from).collect())
    }

    #[test]
    fn insert_keeps_name_order() {
        let mut library = TemplateLibrary::new();
        library.insert(stroke("square", &[(0.0, 0.0)]));
        library.insert(stroke("circle", &[(1.0, 0.0)]));
        library.insert(stroke("square", &[(2.0, 0.0)]));
        library.insert(stroke("arrow", &[(3.0, 0.0)]));
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["arrow", "circle", "square", "square"]);
        // duplicates stay in insertion order
        assert_eq!(library.as_slice()[2].points[0].x, 0.0);
        assert_eq!(library.as_slice()[3].points[0].x, 2.0);
    }

    #[test]
    fn find_and_remove() {
        let mut library = TemplateLibrary::from_strokes(vec![
            stroke("v", &[(0.0, 0.0)]),
            stroke("caret", &[(0.0, 0.0)]),
            stroke("v", &[(1.0, 1.0)]),
        ]);
        assert_eq!(library.find("v").map(|s| s.points[0]), Some(Point::new(0.0, 0.0)));
        assert!(library.find("x").is_none());
        assert_eq!(library.remove_named("v"), 2);
        assert_eq!(library.remove_named("v"), 0);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn dedup_removes_exact_copies_only() {
        let mut library = TemplateLibrary::from_strokes(vec![
            stroke("a", &[(0.0, 0.0)]),
            stroke("a", &[(0.0, 1.0)]),
            stroke("a", &[(0.0, 0.0)]),
        ]);
        library.dedup();
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn text_format_layout() {
        let library = TemplateLibrary::from_strokes(vec![stroke("check mark", &[(1.5, 2.0), (-3.0, 4.25)])]);
        assert_eq!(library.to_text().unwrap(), "1\ncheck mark\n2\n1.5\t2\n-3\t4.25\n");
    }

    #[test]
    fn reads_what_it_writes() {
        let library = TemplateLibrary::from_strokes(vec![
            stroke("zig zag", &[(0.1, 0.2), (10.0, -3.3333333), (1e-7, 123456.79)]),
            stroke("", &[]),
            stroke("dot", &[(5.0, 5.0)]),
        ]);
        let read = TemplateLibrary::from_text(&library.to_text().unwrap()).unwrap();
        assert_eq!(read, library);
    }

    #[test]
    fn reads_crlf_and_space_separated_points() {
        let read = TemplateLibrary::from_text("1\r\nline\r\n2\r\n0 0\r\n10   5\r\n").unwrap();
        assert_eq!(read.as_slice(), &[stroke("line", &[(0.0, 0.0), (10.0, 5.0)])]);
    }

    #[test]
    fn reports_bad_lines() {
        let err = TemplateLibrary::from_text("1\nline\n2\n0\t0\n1\tx\n").unwrap_err();
        assert!(matches!(err, LibraryError::Parse { line: 5, .. }), "{err}");

        let err = TemplateLibrary::from_text("two\n").unwrap_err();
        assert!(matches!(err, LibraryError::Parse { line: 1, .. }), "{err}");

        let err = TemplateLibrary::from_text("2\nline\n1\n0\t0\n").unwrap_err();
        assert!(matches!(err, LibraryError::Parse { line: 5, .. }), "{err}");
    }

    #[test]
    fn huge_counts_hit_end_of_file() {
        let err = TemplateLibrary::from_text("100000000000000\n").unwrap_err();
        assert!(matches!(err, LibraryError::Parse { line: 2, .. }), "{err}");

        let err = TemplateLibrary::from_text("18446744073709551615\n").unwrap_err();
        assert!(matches!(err, LibraryError::Parse { line: 2, .. }), "{err}");

        let err = TemplateLibrary::from_text("1\nx\n18446744073709551615\n").unwrap_err();
        assert!(matches!(err, LibraryError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn multi_line_names_are_not_written() {
        for name in ["two\nlines", "trailing\r", "\r\n"] {
            let library = TemplateLibrary::from_strokes(vec![stroke(name, &[(1.0, 2.0)])]);
            let mut buf = Vec::new();
            let err = library.write_to(&mut buf).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
            assert!(buf.is_empty());
            assert!(library.to_text().is_err());
            assert!(!TemplateLibrary::is_storable_name(name));
        }
        assert!(TemplateLibrary::is_storable_name("check mark"));
        assert!(TemplateLibrary::is_storable_name(""));
    }

    #[test]
    fn empty_library_text() {
        assert_eq!(TemplateLibrary::new().to_text().unwrap(), "0\n");
        assert!(TemplateLibrary::from_text("0\n").unwrap().is_empty());
    }

    #[test]
    fn normalizes_every_template() {
        let library = TemplateLibrary::from_strokes(vec![
            stroke("l", &[(0.0, 0.0), (0.0, 10.0), (5.0, 10.0)]),
            stroke("empty", &[]),
        ]);
        assert!(library.normalized(&RecognizerParameters::default()).is_err());
        let mut library = library;
        library.remove_named("empty");
        let normalized = library.normalized(&RecognizerParameters::default()).unwrap();
        assert_eq!(normalized[0].len(), 64);
        assert_eq!(normalized[0].name, "l");
    }
}
