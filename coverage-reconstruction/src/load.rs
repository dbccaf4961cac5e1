use crate::ReconstructionError;
use coverage_mesh::{Boundaries, BoundsRecord};
use coverage_pinhole::{CalibrationRecord, Camera};
use nalgebra::Vector3;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Pose of a shot as listed in ODM's `shots.geojson`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShotProperties {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub translation: [f64; 3],
    pub rotation: [f64; 3],
}

impl ShotProperties {
    pub fn translation(&self) -> Vector3<f64> {
        self.translation.into()
    }

    pub fn rotation(&self) -> Vector3<f64> {
        self.rotation.into()
    }
}

#[derive(Deserialize)]
struct ShotFeature {
    properties: ShotProperties,
}

#[derive(Deserialize)]
struct ShotCollection {
    features: Vec<ShotFeature>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReconstructionError> {
    let file = File::open(path).map_err(|source| ReconstructionError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ReconstructionError::Json {
        path: path.to_owned(),
        source,
    })
}

/// Cameras of an OpenSfM `cameras.json`, ordered by name.
pub fn read_cameras(path: impl AsRef<Path>) -> Result<Vec<Camera>, ReconstructionError> {
    let records: BTreeMap<String, CalibrationRecord> = read_json(path.as_ref())?;
    records
        .iter()
        .map(|(name, record)| Ok(Camera::from_record(name, record)?))
        .collect()
}

/// Shot poses in file order.
pub fn read_shot_properties(
    path: impl AsRef<Path>,
) -> Result<Vec<ShotProperties>, ReconstructionError> {
    let collection: ShotCollection = read_json(path.as_ref())?;
    Ok(collection
        .features
        .into_iter()
        .map(|feature| feature.properties)
        .collect())
}

/// Bounding box found at `pointer` in a JSON document such as the output of `pdal info`.
pub fn read_native_boundaries(
    path: impl AsRef<Path>,
    pointer: &str,
) -> Result<Boundaries, ReconstructionError> {
    let path = path.as_ref();
    let document: serde_json::Value = read_json(path)?;
    let bounds = document
        .pointer(pointer)
        .ok_or_else(|| ReconstructionError::MissingNativeBounds {
            path: path.to_owned(),
            pointer: pointer.to_owned(),
        })?;
    let record = BoundsRecord::deserialize(bounds).map_err(|source| ReconstructionError::Json {
        path: path.to_owned(),
        source,
    })?;
    Ok(record.into())
}
