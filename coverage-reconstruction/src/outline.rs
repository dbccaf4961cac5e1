use core::f64::consts::{FRAC_PI_2, PI};
use nalgebra::{Point2, Vector2};

/// Number of angular sectors of a shot outline unless configured otherwise.
pub const DEFAULT_NB_SLICES: usize = 36;

/// Open polygon approximating the ground area covered by a shot.
///
/// The path is star-shaped around the centroid of the covered points but not
/// necessarily convex. It is not closed: the last vertex does not repeat the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShotBoundaries {
    pub path: Vec<Point2<f64>>,
}

impl ShotBoundaries {
    /// Outlines a set of planar points.
    ///
    /// The plane around the centroid is cut into `nb_slices` equal angular
    /// sectors. Each sector contributes its point furthest from the centroid,
    /// or the centroid itself when it holds no point, and the path visits the
    /// sectors in order.
    ///
    /// No points (or no sectors) give an empty path.
    pub fn from_points(points: &[Point2<f64>], nb_slices: usize) -> Self {
        if points.is_empty() || nb_slices == 0 {
            return Self::default();
        }
        let n = points.len() as f64;
        let centroid = Point2::new(
            points.iter().map(|p| p.x).sum::<f64>() / n,
            points.iter().map(|p| p.y).sum::<f64>() / n,
        );

        let mut distances = vec![0.0; nb_slices];
        let mut path = vec![centroid; nb_slices];
        for &p in points {
            let offset = p - centroid;
            let slice = slice_index(offset, nb_slices);
            let distance = offset.norm_squared();
            if distance > distances[slice] {
                distances[slice] = distance;
                path[slice] = p;
            }
        }
        Self { path }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Sector of an offset from the centroid.
///
/// The right half-plane maps `atan(y / x)` from `[-π/2, π/2]` onto the first
/// half of the sectors, the left half-plane onto the second half. A vertical
/// offset takes `±π/2`.
fn slice_index(offset: Vector2<f64>, nb_slices: usize) -> usize {
    let alpha = if offset.x == 0.0 {
        if offset.y >= 0.0 {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        }
    } else {
        (offset.y / offset.x).atan()
    };
    let mut slice = (nb_slices as f64 / 2.0 * (alpha / PI + 0.5)) as usize;
    if offset.x < 0.0 {
        slice += nb_slices / 2;
    }
    slice % nb_slices
}
