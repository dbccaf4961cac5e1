use crate::{Boundaries, MeshError, Paving};
use log::*;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Zero-based indices of the three vertices of a triangle.
pub type Facet = [usize; 3];

/// A 2.5-D surface (one height per planar location) loaded from a Wavefront
/// `.obj` file, with its planar extent and a paving over it.
#[derive(Debug, Clone)]
pub struct Wavefront25D {
    points: Vec<Point3<f64>>,
    facets: Vec<Facet>,
    boundaries: Boundaries,
    paving: Paving,
}

impl Wavefront25D {
    /// Builds the mesh and its paving, sized on the number of points.
    pub fn from_parts(points: Vec<Point3<f64>>, facets: Vec<Facet>) -> Result<Self, MeshError> {
        let boundaries = Boundaries::planar(&points).ok_or(MeshError::Empty)?;
        if let Some((facet, &vertex)) = facets
            .iter()
            .enumerate()
            .find_map(|(ix, f)| f.iter().find(|&&v| v >= points.len()).map(|v| (ix, v)))
        {
            return Err(MeshError::FacetOutOfRange {
                facet,
                vertex,
                points: points.len(),
            });
        }
        let paving = Paving::new(boundaries, points.len(), &points, &facets);
        Ok(Self {
            points,
            facets,
            boundaries,
            paving,
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MeshError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mesh = Self::from_reader(BufReader::new(file))?;
        info!(
            "loaded mesh {} with {} points and {} facets, paving {:?}",
            path.display(),
            mesh.points.len(),
            mesh.facets.len(),
            mesh.paving.dimensions()
        );
        Ok(mesh)
    }

    /// Reads `v x y z` and `f v/t/n v/t/n v/t/n` records, ignoring every other line.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, MeshError> {
        let mut points = vec![];
        let mut facets = vec![];
        for (ix, line) in reader.lines().enumerate() {
            let line = line.map_err(MeshError::Read)?;
            let line = line.trim();
            if let Some(coordinates) = line.strip_prefix("v ") {
                let point = parse_vertex(coordinates).ok_or_else(|| MeshError::MalformedVertex {
                    line: ix + 1,
                    text: line.to_owned(),
                })?;
                points.push(point);
            } else if line.starts_with("f ") {
                let facet = parse_facet(line).ok_or_else(|| MeshError::MalformedFacet {
                    line: ix + 1,
                    text: line.to_owned(),
                })?;
                facets.push(facet);
            }
        }
        Self::from_parts(points, facets)
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Planar extent of the points.
    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    pub fn paving(&self) -> &Paving {
        &self.paving
    }

    pub fn paving_dimensions(&self) -> (usize, usize) {
        self.paving.dimensions()
    }

    /// Facets having a vertex in the paving cell of the planar location.
    pub fn facets_at(&self, x: f64, y: f64) -> impl Iterator<Item = &Facet> + '_ {
        self.paving
            .facets_at(x, y)
            .iter()
            .map(move |&ix| &self.facets[ix])
    }
}

fn parse_vertex(coordinates: &str) -> Option<Point3<f64>> {
    let mut values = coordinates.split_whitespace().map(str::parse::<f64>);
    let x = values.next()?.ok()?;
    let y = values.next()?.ok()?;
    let z = values.next()?.ok()?;
    Some(Point3::new(x, y, z))
}

/// Parses a textured face line `f v/t/n v/t/n v/t/n`, keeping the vertex
/// indices and converting them from one-based to zero-based.
///
/// Anything else, including untextured faces, polygons and index `0`, yields `None`.
pub fn parse_facet(line: &str) -> Option<Facet> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != "f" {
        return None;
    }
    let mut facet = [0; 3];
    for vertex in facet.iter_mut() {
        *vertex = parse_facet_vertex(tokens.next()?)?;
    }
    if tokens.next().is_some() {
        return None;
    }
    Some(facet)
}

fn parse_facet_vertex(token: &str) -> Option<usize> {
    let mut parts = token.split('/');
    let indices = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    if !indices
        .iter()
        .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    indices[0].parse::<usize>().ok()?.checked_sub(1)
}
