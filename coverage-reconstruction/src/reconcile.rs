use coverage_mesh::Boundaries;
use float_ord::FloatOrd;
use log::*;
use nalgebra::Vector3;

const AXES: [&str; 3] = ["x", "y", "z"];

/// Maps native (point cloud) coordinates onto mesh coordinates.
///
/// Both frames share scale and orientation but not origin, so each axis is
/// shifted independently to bring the center of the native box onto the
/// center of the mesh box:
///
/// $$
/// f(v) = (v - c_{native}) + c_{mesh}, \quad c = (min + max) / 2
/// $$
///
/// An axis missing from either box (typically `z` for a planar mesh extent)
/// is left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateReconciler {
    native: Boundaries,
    mesh: Boundaries,
    native_center: Vector3<f64>,
    mesh_center: Vector3<f64>,
    discrepancies: [Option<f64>; 3],
}

impl CoordinateReconciler {
    pub fn new(native: Boundaries, mesh: Boundaries) -> Self {
        let mut native_center = Vector3::zeros();
        let mut mesh_center = Vector3::zeros();
        let mut discrepancies = [None; 3];
        for axis in 0..3 {
            if let (Some((n_min, n_max)), Some((m_min, m_max))) =
                (native.range(axis), mesh.range(axis))
            {
                native_center[axis] = (n_min + n_max) / 2.0;
                mesh_center[axis] = (m_min + m_max) / 2.0;
                let (native_size, mesh_size) = (n_max - n_min, m_max - m_min);
                discrepancies[axis] = Some((native_size - mesh_size) / mesh_size);
            }
        }
        Self {
            native,
            mesh,
            native_center,
            mesh_center,
            discrepancies,
        }
    }

    pub fn native(&self) -> &Boundaries {
        &self.native
    }

    pub fn mesh(&self) -> &Boundaries {
        &self.mesh
    }

    /// Translation added to native coordinates.
    pub fn offset(&self) -> Vector3<f64> {
        self.mesh_center - self.native_center
    }

    /// Relative size difference `(native - mesh) / mesh` per axis.
    pub fn discrepancies(&self) -> [Option<f64>; 3] {
        self.discrepancies
    }

    pub fn apply(&self, native: Vector3<f64>) -> Vector3<f64> {
        (native - self.native_center) + self.mesh_center
    }

    /// The native box expressed in mesh coordinates.
    pub fn apply_boundaries(&self, native: &Boundaries) -> Boundaries {
        let min = self.apply(Vector3::new(
            native.x_min,
            native.y_min,
            native.z_min.unwrap_or(0.0),
        ));
        let max = self.apply(Vector3::new(
            native.x_max,
            native.y_max,
            native.z_max.unwrap_or(0.0),
        ));
        Boundaries {
            x_min: min.x,
            x_max: max.x,
            y_min: min.y,
            y_max: max.y,
            z_min: native.z_min.map(|_| min.z),
            z_max: native.z_max.map(|_| max.z),
        }
    }

    /// Logs how much the two boxes differ in size, which hints at a gross
    /// misalignment of the two sources. Never fails.
    pub fn log_discrepancies(&self, warning_ratio: f64) {
        for (axis, discrepancy) in AXES.iter().zip(self.discrepancies) {
            if let Some(discrepancy) = discrepancy {
                info!(
                    "native/mesh bounding box size discrepancy on {}: {:.2}%",
                    axis,
                    discrepancy * 100.0
                );
            }
        }
        let worst = self
            .discrepancies
            .iter()
            .flatten()
            .map(|d| FloatOrd(d.abs()))
            .max();
        if let Some(FloatOrd(worst)) = worst {
            if !(worst <= warning_ratio) {
                warn!(
                    "native and mesh bounding boxes differ by up to {:.2}% in size, footprints may be misplaced",
                    worst * 100.0
                );
            }
        }
    }
}
