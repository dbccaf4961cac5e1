//! Textured 2.5-D surfaces as produced by ODM's `odm_texturing_25d` stage.
//!
//! A 2.5-D mesh has a single height per planar location, so its planar
//! [`Boundaries`] and a uniform [`Paving`] over them are enough to look up the
//! facets around any `(x, y)`.

mod boundaries;
mod paving;
mod wavefront;

pub use boundaries::*;
pub use nalgebra;
pub use paving::*;
pub use wavefront::*;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("unable to open mesh {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to read mesh: {0}")]
    Read(#[source] std::io::Error),
    #[error("cannot parse vertex on line {line}: \"{text}\"")]
    MalformedVertex { line: usize, text: String },
    #[error("cannot parse facet on line {line}: \"{text}\"")]
    MalformedFacet { line: usize, text: String },
    #[error("facet {facet} references vertex {vertex} but the mesh has {points} points")]
    FacetOutOfRange {
        facet: usize,
        vertex: usize,
        points: usize,
    },
    #[error("mesh has no vertex")]
    Empty,
}
