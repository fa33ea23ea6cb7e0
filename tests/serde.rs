#![cfg(feature = "serde")]

use one_recognizer::{Point, RecognizerParameters, Stroke, TemplateLibrary};
use pretty_assertions::assert_eq;

#[test]
fn library_through_ron() {
    let library = TemplateLibrary::from_strokes(vec![
        Stroke::new("v", vec![Point::new(0.0, 0.0), Point::new(5.0, 10.0), Point::new(10.0, 0.0)]),
        Stroke::new("dash", vec![Point::new(0.0, 0.0), Point::new(8.0, 0.0)]),
    ]);
    let text = ron::ser::to_string_pretty(&library, ron::ser::PrettyConfig::default()).unwrap();
    assert!(text.contains("\"dash\""));
    let back: TemplateLibrary = ron::from_str(&text).unwrap();
    assert_eq!(back, library);
}

#[test]
fn parameters_through_ron() {
    let params = RecognizerParameters {
        num_points: 32,
        ..RecognizerParameters::default()
    };
    let text = ron::to_string(&params).unwrap();
    let back: RecognizerParameters = ron::from_str(&text).unwrap();
    assert_eq!(back, params);
}
