use crate::{Reconstruction, ReconstructionError, Shot, ShotBoundaries};
use coverage_mesh::Boundaries;
use coverage_pinhole::Camera;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// What the coverage viewer reads from `reconstruction_shots.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructionRecord {
    pub cameras: BTreeMap<String, CameraRecord>,
    pub shots: Vec<ShotRecord>,
    /// Planar extent of the mesh.
    pub boundaries: Boundaries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_boundaries: Option<Boundaries>,
    /// The native extent once mapped onto mesh coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconciled_boundaries: Option<Boundaries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub focal: f64,
    pub k1: f64,
    pub k2: f64,
}

impl From<&Camera> for CameraRecord {
    fn from(camera: &Camera) -> Self {
        Self {
            name: camera.name().to_owned(),
            width: camera.width(),
            height: camera.height(),
            focal: camera.focal(),
            k1: camera.k1(),
            k2: camera.k2(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotRecord {
    pub image_name: String,
    pub original_dimensions: OriginalDimensions,
    pub rotation: [f64; 3],
    #[serde(rename = "rotationEulerXYZ")]
    pub rotation_euler_xyz: [f64; 3],
    pub translation: [f64; 3],
    /// Name of the camera.
    pub camera: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<ShotBoundariesRecord>,
}

impl From<&Shot> for ShotRecord {
    fn from(shot: &Shot) -> Self {
        let camera = shot.camera();
        Self {
            image_name: shot.image_name().to_owned(),
            original_dimensions: OriginalDimensions {
                width: camera.width(),
                height: camera.height(),
            },
            rotation: shot.rotation().into(),
            rotation_euler_xyz: shot.rotation_euler_xyz().into(),
            translation: shot.translation().into(),
            camera: camera.name().to_owned(),
            boundaries: shot.boundaries().map(ShotBoundariesRecord::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotBoundariesRecord {
    pub path: Vec<[f64; 2]>,
}

impl From<&ShotBoundaries> for ShotBoundariesRecord {
    fn from(boundaries: &ShotBoundaries) -> Self {
        Self {
            path: boundaries.path.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}

impl From<&Reconstruction> for ReconstructionRecord {
    fn from(reconstruction: &Reconstruction) -> Self {
        let reconciler = reconstruction.reconciler();
        Self {
            cameras: reconstruction
                .cameras()
                .map(|camera| (camera.name().to_owned(), CameraRecord::from(camera)))
                .collect(),
            shots: reconstruction.shots().iter().map(ShotRecord::from).collect(),
            boundaries: *reconstruction.mesh().boundaries(),
            native_boundaries: reconciler.map(|r| *r.native()),
            reconciled_boundaries: reconciler.map(|r| r.apply_boundaries(r.native())),
        }
    }
}

impl ReconstructionRecord {
    pub fn to_writer(&self, writer: impl Write) -> Result<(), ReconstructionError> {
        serde_json::to_writer(writer, self).map_err(ReconstructionError::Serialize)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ReconstructionError> {
        serde_json::from_reader(reader).map_err(ReconstructionError::Deserialize)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReconstructionError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ReconstructionError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(|source| ReconstructionError::Io {
            path: path.to_owned(),
            source,
        })
    }
}
