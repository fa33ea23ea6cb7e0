#![allow(dead_code)]

use std::f32::consts::PI;

use one_recognizer::{Point, Stroke};

/// A square outline drawn clockwise from its top-left corner, with a slight hand wobble
pub fn square(name: &str, origin: Point, side: f32) -> Stroke {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(side, 0.0),
        Point::new(side, side),
        Point::new(0.0, side),
        Point::new(0.0, 0.0),
    ];
    let mut points = Vec::new();
    for (i, w) in corners.windows(2).enumerate() {
        for k in 0..12 {
            let t = k as f32 / 12.0;
            let wobble = 0.004 * side * ((i * 12 + k) as f32).sin();
            points.push(origin + w[0] + (w[1] - w[0]) * t + Point::new(wobble, -wobble));
        }
    }
    points.push(origin);
    Stroke::new(name, points)
}

/// A circle drawn clockwise, starting at its top
pub fn circle(name: &str, center: Point, radius: f32) -> Stroke {
    let points = (0..=48)
        .map(|i| {
            let a = -PI / 2.0 + i as f32 / 48.0 * 2.0 * PI;
            center + Point::new(radius * a.cos(), radius * a.sin())
        })
        .collect();
    Stroke::new(name, points)
}

/// A triangle drawn from its bottom-left corner
pub fn triangle(name: &str, origin: Point, side: f32) -> Stroke {
    let corners = [
        Point::new(0.0, side),
        Point::new(side / 2.0, 0.0),
        Point::new(side, side),
        Point::new(0.0, side),
    ];
    let mut points = Vec::new();
    for w in corners.windows(2) {
        for k in 0..10 {
            points.push(origin + w[0] + (w[1] - w[0]) * (k as f32 / 10.0));
        }
    }
    points.push(origin + corners[3]);
    Stroke::new(name, points)
}
