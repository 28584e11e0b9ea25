//! Synthetic point/view populations shared by the integration tests.

use nalgebra::Vector3;
use view_clusterer::{Point, View};

fn point(x: f32, y: f32, z: f32, views: &[usize]) -> Point {
    Point::new(Vector3::new(x, y, z), views.to_vec())
}

fn view(x: f32, y: f32, z: f32) -> View {
    View::new(Vector3::new(x, y, z))
}

/// A single point observed by two cameras on a short baseline.
pub fn two_camera_scene() -> (Vec<Point>, Vec<View>) {
    let points = vec![point(0.5, 0.0, 1.0, &[0, 1])];
    let views = vec![view(0.0, 0.0, 0.0), view(1.0, 0.0, 0.0)];
    (points, views)
}

/// Two camera pairs far apart, each pair observing its own point.
pub fn disjoint_pairs_scene() -> (Vec<Point>, Vec<View>) {
    let points = vec![
        point(0.05, 0.0, 1.0, &[0, 1]),
        point(10.05, 0.0, 1.0, &[2, 3]),
    ];
    let views = vec![
        view(0.0, 0.0, 0.0),
        view(0.1, 0.0, 0.0),
        view(10.0, 0.0, 0.0),
        view(10.1, 0.0, 0.0),
    ];
    (points, views)
}

/// Two groups of three cameras, each group sharing its own pair of points.
pub fn two_group_scene() -> (Vec<Point>, Vec<View>) {
    let points = vec![
        point(0.1, 0.0, 1.0, &[0, 1, 2]),
        point(0.2, 0.1, 1.0, &[0, 1, 2]),
        point(20.1, 0.0, 1.0, &[3, 4, 5]),
        point(20.2, 0.1, 1.0, &[3, 4, 5]),
    ];
    let views = vec![
        view(0.0, 0.0, 0.0),
        view(0.1, 0.0, 0.0),
        view(0.2, 0.0, 0.0),
        view(20.0, 0.0, 0.0),
        view(20.1, 0.0, 0.0),
        view(20.2, 0.0, 0.0),
    ];
    (points, views)
}

/// `count` cameras at the same position observing a shared point set.
pub fn colocated_scene(count: usize) -> (Vec<Point>, Vec<View>) {
    let all: Vec<usize> = (0..count).collect();
    let points = vec![
        point(0.0, 0.0, 1.0, &all),
        point(0.5, 0.0, 1.0, &all),
        point(1.0, 0.5, 1.0, &all),
    ];
    let views = (0..count).map(|_| view(0.0, 0.0, 0.0)).collect();
    (points, views)
}

/// A tight three-camera group plus one distant camera observing only its
/// own point.
pub fn fragment_scene() -> (Vec<Point>, Vec<View>) {
    let points = vec![
        point(0.1, 0.0, 1.0, &[0, 1, 2]),
        point(0.2, 0.1, 1.0, &[0, 1, 2]),
        point(40.0, 0.0, 1.0, &[3]),
    ];
    let views = vec![
        view(0.0, 0.0, 0.0),
        view(0.1, 0.0, 0.0),
        view(0.2, 0.0, 0.0),
        view(40.0, 0.0, 0.0),
    ];
    (points, views)
}
