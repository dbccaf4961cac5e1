use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// The vertical range is optional: the planar extent of a 2.5-D mesh only
/// carries `x` and `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundaries {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_max: Option<f64>,
}

impl Boundaries {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min: None,
            z_max: None,
        }
    }

    #[must_use]
    pub fn with_z(self, z_min: f64, z_max: f64) -> Self {
        Self {
            z_min: Some(z_min),
            z_max: Some(z_max),
            ..self
        }
    }

    /// Tight planar box over the `x`/`y` of the points, `None` if there are none.
    pub fn planar<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(
            Self::new(first.x, first.x, first.y, first.y),
            |b, p| Self::new(b.x_min.min(p.x), b.x_max.max(p.x), b.y_min.min(p.y), b.y_max.max(p.y)),
        ))
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// `(min, max)` along axis `0`, `1` or `2`, `None` for a missing vertical range.
    pub fn range(&self, axis: usize) -> Option<(f64, f64)> {
        match axis {
            0 => Some((self.x_min, self.x_max)),
            1 => Some((self.y_min, self.y_max)),
            2 => self.z_min.zip(self.z_max),
            _ => None,
        }
    }
}

/// Bounding box as reported by PDAL (`minx`, `maxx`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsRecord {
    pub minx: f64,
    pub maxx: f64,
    pub miny: f64,
    pub maxy: f64,
    #[serde(default)]
    pub minz: Option<f64>,
    #[serde(default)]
    pub maxz: Option<f64>,
}

impl From<BoundsRecord> for Boundaries {
    fn from(record: BoundsRecord) -> Self {
        Self {
            x_min: record.minx,
            x_max: record.maxx,
            y_min: record.miny,
            y_max: record.maxy,
            z_min: record.minz,
            z_max: record.maxz,
        }
    }
}
