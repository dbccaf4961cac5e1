//! Ground footprints of the shots of an ODM/OpenSfM reconstruction.
//!
//! A [`Reconstruction`] gathers the cameras, the posed shots and the 2.5-D
//! mesh of a project. For every shot, the mesh points it sees are outlined
//! into [`ShotBoundaries`], and the whole is exported as a
//! [`ReconstructionRecord`] for the coverage viewer.
//!
//! Shot poses and the mesh do not share the same origin: shot translations
//! are moved onto the mesh by a [`CoordinateReconciler`] built from the
//! native point cloud bounding box before anything is projected.

mod export;
mod load;
mod orthophoto;
mod outline;
mod reconcile;
mod settings;
mod shot;

pub use export::*;
pub use load::*;
pub use orthophoto::*;
pub use outline::*;
pub use reconcile::*;
pub use settings::*;
pub use shot::*;

use coverage_mesh::{Boundaries, MeshError, Wavefront25D};
use coverage_pinhole::{Camera, CameraError};
use itertools::Itertools;
use log::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Debug, Error)]
pub enum ReconstructionError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unable to serialize reconstruction: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("unable to parse reconstruction record: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("{matches} cameras found with size {width} x {height}, expected exactly one")]
    CameraResolution {
        width: u32,
        height: u32,
        matches: usize,
    },
    #[error("no bounding box at {pointer} in {path}")]
    MissingNativeBounds { path: PathBuf, pointer: String },
    #[error("expected \"xmin ymin xmax ymax\" in {path}")]
    MalformedCorners { path: PathBuf },
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// The only camera with the given pixel dimensions.
fn find_camera<'a>(
    cameras: impl Iterator<Item = &'a Arc<Camera>>,
    width: u32,
    height: u32,
) -> Result<Arc<Camera>, ReconstructionError> {
    cameras
        .filter(|camera| camera.width() == width && camera.height() == height)
        .exactly_one()
        .map(Arc::clone)
        .map_err(|matching| ReconstructionError::CameraResolution {
            width,
            height,
            matches: matching.count(),
        })
}

/// Cameras, shots and mesh of one project.
///
/// Shots are kept sorted by image name.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    cameras: BTreeMap<String, Arc<Camera>>,
    shots: Vec<Shot>,
    mesh: Wavefront25D,
    reconciler: Option<CoordinateReconciler>,
}

impl Reconstruction {
    pub fn builder(mesh: Wavefront25D) -> ReconstructionBuilder {
        ReconstructionBuilder::new(mesh)
    }

    /// Loads the project at `project_dir`, locating its files through `settings`.
    ///
    /// Shot translations are reconciled with the mesh as they are read.
    pub fn load(
        project_dir: impl AsRef<Path>,
        settings: &CoverageSettings,
    ) -> Result<Self, ReconstructionError> {
        let project_dir = project_dir.as_ref();

        let cameras = read_cameras(project_dir.join(&settings.cameras_file))?;
        info!("loaded {} cameras", cameras.len());

        let mesh = Wavefront25D::open(project_dir.join(&settings.mesh_file))?;
        let mut builder = ReconstructionBuilder::new(mesh);
        for camera in cameras {
            builder.add_camera(camera);
        }

        let native = read_native_boundaries(
            project_dir.join(&settings.native_bounds_file),
            &settings.native_bounds_pointer,
        )?;
        builder
            .reconcile_with(native)
            .log_discrepancies(settings.discrepancy_warning_ratio);

        let shots = read_shot_properties(project_dir.join(&settings.shots_file))?;
        for properties in &shots {
            builder.add_shot_properties(properties)?;
        }
        info!("loaded {} shots", shots.len());

        Ok(builder.finish_loading())
    }

    /// Cameras ordered by name.
    pub fn cameras(&self) -> impl Iterator<Item = &Camera> + '_ {
        self.cameras.values().map(|camera| &**camera)
    }

    pub fn camera(&self, name: &str) -> Option<&Camera> {
        self.cameras.get(name).map(|camera| &**camera)
    }

    pub fn camera_by_dimensions(
        &self,
        width: u32,
        height: u32,
    ) -> Result<Arc<Camera>, ReconstructionError> {
        find_camera(self.cameras.values(), width, height)
    }

    /// Shots in ascending image name order.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn shot(&self, image_name: &str) -> Option<&Shot> {
        self.shots
            .binary_search_by(|shot| shot.image_name().cmp(image_name))
            .ok()
            .map(|ix| &self.shots[ix])
    }

    pub fn mesh(&self) -> &Wavefront25D {
        &self.mesh
    }

    /// The mapping applied to shot translations, if native bounds were given.
    pub fn reconciler(&self) -> Option<&CoordinateReconciler> {
        self.reconciler.as_ref()
    }

    pub fn native_boundaries(&self) -> Option<&Boundaries> {
        self.reconciler.as_ref().map(CoordinateReconciler::native)
    }

    /// Outlines the mesh points seen by every shot.
    pub fn compute_shot_boundaries(&mut self, nb_slices: usize) {
        info!(
            "computing boundaries of {} shots over {} points",
            self.shots.len(),
            self.mesh.points().len()
        );
        let points = self.mesh.points();
        #[cfg(not(feature = "rayon"))]
        for shot in self.shots.iter_mut() {
            shot.compute_boundaries(points, nb_slices);
        }
        #[cfg(feature = "rayon")]
        self.shots.par_iter_mut().for_each(|shot| {
            shot.compute_boundaries(points, nb_slices);
        });
        let blind = self
            .shots
            .iter()
            .filter(|shot| shot.boundaries().map_or(true, ShotBoundaries::is_empty))
            .count();
        if blind > 0 {
            warn!("{} shots do not see the mesh", blind);
        }
    }

    pub fn to_record(&self) -> ReconstructionRecord {
        ReconstructionRecord::from(self)
    }
}

/// Assembles a [`Reconstruction`] one camera and one shot at a time.
#[derive(Debug, Clone)]
pub struct ReconstructionBuilder {
    cameras: BTreeMap<String, Arc<Camera>>,
    shots: Vec<Shot>,
    mesh: Wavefront25D,
    reconciler: Option<CoordinateReconciler>,
}

impl ReconstructionBuilder {
    pub fn new(mesh: Wavefront25D) -> Self {
        Self {
            cameras: BTreeMap::new(),
            shots: Vec::new(),
            mesh,
            reconciler: None,
        }
    }

    /// Registers a camera under its name, replacing any camera of the same name.
    pub fn add_camera(&mut self, camera: Camera) -> Arc<Camera> {
        let camera = Arc::new(camera);
        if let Some(previous) = self
            .cameras
            .insert(camera.name().to_owned(), Arc::clone(&camera))
        {
            warn!("camera {} registered twice", previous.name());
        }
        camera
    }

    pub fn camera_by_dimensions(
        &self,
        width: u32,
        height: u32,
    ) -> Result<Arc<Camera>, ReconstructionError> {
        find_camera(self.cameras.values(), width, height)
    }

    /// Translations of shots added from now on are mapped from `native`
    /// coordinates onto the mesh.
    pub fn reconcile_with(&mut self, native: Boundaries) -> &CoordinateReconciler {
        let reconciler = CoordinateReconciler::new(native, *self.mesh.boundaries());
        debug!("native to mesh offset: {:?}", reconciler.offset());
        self.reconciler.insert(reconciler)
    }

    /// Adds a shot read from `shots.geojson`, resolving its camera by dimensions.
    pub fn add_shot_properties(
        &mut self,
        properties: &ShotProperties,
    ) -> Result<(), ReconstructionError> {
        let camera = self.camera_by_dimensions(properties.width, properties.height)?;
        let translation = match &self.reconciler {
            Some(reconciler) => reconciler.apply(properties.translation()),
            None => properties.translation(),
        };
        self.add_shot(Shot::new(
            properties.filename.clone(),
            camera,
            properties.rotation(),
            translation,
        ));
        Ok(())
    }

    /// Adds a shot as is.
    pub fn add_shot(&mut self, shot: Shot) {
        self.shots.push(shot);
    }

    pub fn finish_loading(self) -> Reconstruction {
        let Self {
            cameras,
            mut shots,
            mesh,
            reconciler,
        } = self;
        shots.sort_by(|a, b| a.image_name().cmp(b.image_name()));
        Reconstruction {
            cameras,
            shots,
            mesh,
            reconciler,
        }
    }
}
