mod common;

use common::{circle, square};
use one_recognizer::{LibraryError, Point, RecognizerParameters, Stroke, TemplateLibrary};
use pretty_assertions::assert_eq;

#[test]
fn save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mystrokes.txt");

    let mut library = TemplateLibrary::new();
    library.insert(square("square", Point::new(3.5, 7.25), 120.0));
    library.insert(circle("circle", Point::new(0.0, 0.0), 33.3));
    library.save(&path).unwrap();

    let loaded = TemplateLibrary::load(&path).unwrap();
    assert_eq!(loaded, library);
    assert_eq!(loaded.names().collect::<Vec<_>>(), vec!["circle", "square"]);
}

#[test]
fn missing_library_is_created_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.txt");

    let library = TemplateLibrary::open_or_create(&path).unwrap();
    assert!(library.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "0\n");

    // a second open reads the file that was just created
    assert!(TemplateLibrary::open_or_create(&path).unwrap().is_empty());
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = TemplateLibrary::load(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, LibraryError::Io(_)));
}

#[test]
fn recognize_against_loaded_library() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mystrokes.txt");
    TemplateLibrary::from_strokes(vec![
        square("square", Point::new(0.0, 0.0), 100.0),
        circle("circle", Point::new(0.0, 0.0), 50.0),
    ])
    .save(&path)
    .unwrap();

    let library = TemplateLibrary::load(&path).unwrap();
    let params = RecognizerParameters::default();
    let templates = library.normalized(&params).unwrap();
    let query: Stroke = circle("", Point::new(500.0, 20.0), 12.0).normalize_with(&params).unwrap();
    let m = query.recognize(&templates, params.square_size).unwrap();
    assert_eq!(m.name(), "circle");
}
