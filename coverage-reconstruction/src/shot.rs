use crate::ShotBoundaries;
use coverage_pinhole::{Camera, NormalizedPixel};
use log::*;
use nalgebra::{Point2, Point3, Rotation3, Vector3};
use std::sync::Arc;

/// A posed photo of the reconstruction.
///
/// The pose follows OpenSfM: a world point `X` lands in camera coordinates
/// at `R ⋅ (X - t)`, where `R` is built from the rotation vector `rotation`
/// (axis times angle in radians) and `t` is `translation`.
#[derive(Debug, Clone)]
pub struct Shot {
    image_name: String,
    camera: Arc<Camera>,
    translation: Vector3<f64>,
    rotation: Vector3<f64>,
    rotation_euler_xyz: Vector3<f64>,
    transform: Rotation3<f64>,
    boundaries: Option<ShotBoundaries>,
}

impl Shot {
    pub fn new(
        image_name: impl Into<String>,
        camera: Arc<Camera>,
        rotation: Vector3<f64>,
        translation: Vector3<f64>,
    ) -> Self {
        let mut shot = Self {
            image_name: image_name.into(),
            camera,
            translation,
            rotation: Vector3::zeros(),
            rotation_euler_xyz: Vector3::zeros(),
            transform: Rotation3::identity(),
            boundaries: None,
        };
        shot.set_rotation(rotation);
        shot
    }

    /// Replaces the rotation vector along with the cached rotation and Euler angles.
    pub fn set_rotation(&mut self, rotation: Vector3<f64>) {
        let transform = Rotation3::from_scaled_axis(rotation);
        // Extrinsic x, then y, then z: `R = Rz(c) ⋅ Ry(b) ⋅ Rx(a)`.
        let (a, b, c) = transform.euler_angles();
        self.rotation = rotation;
        self.transform = transform;
        self.rotation_euler_xyz = Vector3::new(a, b, c);
    }

    pub fn set_translation(&mut self, translation: Vector3<f64>) {
        self.translation = translation;
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.translation
    }

    pub fn rotation(&self) -> Vector3<f64> {
        self.rotation
    }

    pub fn rotation_euler_xyz(&self) -> Vector3<f64> {
        self.rotation_euler_xyz
    }

    /// The outline computed by [`Shot::compute_boundaries`], if it ran.
    pub fn boundaries(&self) -> Option<&ShotBoundaries> {
        self.boundaries.as_ref()
    }

    /// Translates the world point by `-translation`, then rotates it.
    pub fn camera_relative_coordinates(&self, world: &Point3<f64>) -> Vector3<f64> {
        self.transform * (world.coords - self.translation)
    }

    pub fn camera_pixel(&self, world: &Point3<f64>) -> NormalizedPixel {
        self.camera.project(self.camera_relative_coordinates(world))
    }

    /// Whether the world point is in front of the camera and projects inside the frame.
    pub fn sees(&self, world: &Point3<f64>) -> bool {
        let relative = self.camera_relative_coordinates(world);
        relative.z > 0.0 && self.camera.in_frame(self.camera.project(relative))
    }

    /// Outlines the planar footprint of the points this shot sees.
    pub fn compute_boundaries(&mut self, points: &[Point3<f64>], nb_slices: usize) {
        let visible: Vec<Point2<f64>> = points
            .iter()
            .filter(|p| self.sees(p))
            .map(|p| p.xy())
            .collect();
        if visible.is_empty() {
            warn!("shot {} sees no point of the mesh", self.image_name);
        } else {
            debug!("shot {} sees {} points", self.image_name, visible.len());
        }
        self.boundaries = Some(ShotBoundaries::from_points(&visible, nb_slices));
    }
}
