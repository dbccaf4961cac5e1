use crate::DEFAULT_NB_SLICES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The settings for computing shot coverage of an ODM project.
///
/// Paths are relative to the project directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSettings {
    /// The number of angular sectors of a shot outline
    #[serde(default = "default_nb_slices")]
    pub nb_slices: usize,
    /// The relative bounding box size difference between native and mesh coordinates above which a warning is logged
    #[serde(default = "default_discrepancy_warning_ratio")]
    pub discrepancy_warning_ratio: f64,
    /// The OpenSfM camera calibrations
    #[serde(default = "default_cameras_file")]
    pub cameras_file: PathBuf,
    /// The GeoJSON collection of shot poses
    #[serde(default = "default_shots_file")]
    pub shots_file: PathBuf,
    /// The textured 2.5-D mesh
    #[serde(default = "default_mesh_file")]
    pub mesh_file: PathBuf,
    /// The PDAL info of the point cloud, holding the native bounding box
    #[serde(default = "default_native_bounds_file")]
    pub native_bounds_file: PathBuf,
    /// JSON pointer to the `minx`, `maxx`, ... record within the native bounds file
    #[serde(default = "default_native_bounds_pointer")]
    pub native_bounds_pointer: String,
}

impl Default for CoverageSettings {
    fn default() -> Self {
        Self {
            nb_slices: default_nb_slices(),
            discrepancy_warning_ratio: default_discrepancy_warning_ratio(),
            cameras_file: default_cameras_file(),
            shots_file: default_shots_file(),
            mesh_file: default_mesh_file(),
            native_bounds_file: default_native_bounds_file(),
            native_bounds_pointer: default_native_bounds_pointer(),
        }
    }
}

fn default_nb_slices() -> usize {
    DEFAULT_NB_SLICES
}

fn default_discrepancy_warning_ratio() -> f64 {
    0.05
}

fn default_cameras_file() -> PathBuf {
    "cameras.json".into()
}

fn default_shots_file() -> PathBuf {
    "odm_report/shots.geojson".into()
}

fn default_mesh_file() -> PathBuf {
    "odm_texturing_25d/odm_textured_model_geo.obj".into()
}

fn default_native_bounds_file() -> PathBuf {
    "odm_georeferencing/odm_georeferenced_model.info.json".into()
}

fn default_native_bounds_pointer() -> String {
    "/stats/bbox/native/bbox".into()
}
