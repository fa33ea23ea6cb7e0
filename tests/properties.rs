use one_recognizer::{Point, Stroke, StrokeError};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
}

fn stroke(max_points: usize) -> impl Strategy<Value = Stroke> {
    prop::collection::vec(point(), 1..max_points).prop_map(|points| Stroke::new("prop", points))
}

/// Loose absolute tolerance for f32 sums of coordinates up to 1000
const EPS: f32 = 0.05;

proptest! {
    #[test]
    fn resample_yields_requested_count(s in stroke(40), k in 2usize..130) {
        let r = s.resample(k).unwrap();
        prop_assert_eq!(r.len(), k);
        prop_assert_eq!(r.points[0], s.points[0]);
        prop_assert_eq!(&r.name, &s.name);
    }

    #[test]
    fn translate_puts_centroid_on_origin(s in stroke(40), origin in point()) {
        let c = s.translate_to(origin).unwrap().centroid().unwrap();
        prop_assert!(c.distance(&origin) < EPS, "{:?} vs {:?}", c, origin);
    }

    #[test]
    fn rotation_keeps_centroid(s in stroke(40), angle in -10.0f32..10.0) {
        let before = s.centroid().unwrap();
        let after = s.rotate_by(angle).unwrap().centroid().unwrap();
        prop_assert!(before.distance(&after) < EPS, "{:?} vs {:?}", before, after);
    }

    #[test]
    fn path_distance_is_symmetric(points in prop::collection::vec((point(), point()), 1..40)) {
        let (a, b): (Vec<Point>, Vec<Point>) = points.into_iter().unzip();
        let a = Stroke::new("a", a);
        let b = Stroke::new("b", b);
        prop_assert_eq!(a.path_distance(&b).unwrap(), b.path_distance(&a).unwrap());
    }

    #[test]
    fn path_distance_to_self_is_zero(s in stroke(40)) {
        prop_assert_eq!(s.path_distance(&s).unwrap(), 0.0);
    }

    #[test]
    fn path_distance_rejects_different_sizes(a in stroke(20), b in stroke(20)) {
        prop_assume!(a.len() != b.len());
        let is_mismatch = matches!(a.path_distance(&b), Err(StrokeError::SizeMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn transforms_keep_length_and_name(s in stroke(40), angle in -3.2f32..3.2) {
        prop_assert_eq!(s.rotate_by(angle).unwrap().len(), s.len());
        prop_assert_eq!(s.scale_to(250.0).unwrap().len(), s.len());
        prop_assert_eq!(&s.translate_to_origin().unwrap().name, &s.name);
    }

    #[test]
    fn bounding_box_contains_every_point(s in stroke(40)) {
        let bb = s.bounding_box().unwrap();
        for p in &s.points {
            prop_assert!(bb.min.x <= p.x && p.x <= bb.max.x);
            prop_assert!(bb.min.y <= p.y && p.y <= bb.max.y);
        }
        prop_assert!(s.points.iter().any(|p| p.x == bb.min.x));
        prop_assert!(s.points.iter().any(|p| p.y == bb.max.y));
    }
}
