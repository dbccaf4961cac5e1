//! This crate provides the camera model used to decide which points of a surface
//! a photo covers. It is the simplified Brown model of OpenSfM: a single focal
//! length and two radial coefficients, projecting camera coordinates onto an image
//! rectangle whose longer side spans `[-0.5, 0.5]`.
//!
//! Cameras are built from the calibration records found in an OpenSfM/ODM
//! `cameras.json` file with [`Camera::from_record`].

mod camera;
mod distortion;
mod record;

pub use camera::*;
pub use distortion::*;
pub use nalgebra;
pub use record::*;

use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Point2;
use thiserror::Error;

/// A point on the normalized image plane, after distortion and focal scaling.
///
/// The frame is centered on the optical axis. Its longer side spans
/// `[-0.5, 0.5]` and the shorter side keeps the sensor aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
pub struct NormalizedPixel(pub Point2<f64>);

impl NormalizedPixel {
    pub fn new(u: f64, v: f64) -> Self {
        Self(Point2::new(u, v))
    }
}

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera {name} has different focal x/y {focal_x}/{focal_y}")]
    InconsistentFocal {
        name: String,
        focal_x: f64,
        focal_y: f64,
    },
    #[error("camera {name} has neither focal nor focal_x/focal_y")]
    MissingFocal { name: String },
}
