use crate::ReconstructionError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Georeferenced extent of the orthophoto, as the viewer overlays it under the footprints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthophotoCorners {
    /// `[min, max]` easting
    pub x: [f64; 2],
    /// `[min, max]` northing
    pub y: [f64; 2],
}

impl OrthophotoCorners {
    /// Parses the first line of `odm_orthophoto_corners.txt`: `xmin ymin xmax ymax`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut values = text
            .lines()
            .next()?
            .split_whitespace()
            .map(str::parse::<f64>);
        let x_min = values.next()?.ok()?;
        let y_min = values.next()?.ok()?;
        let x_max = values.next()?.ok()?;
        let y_max = values.next()?.ok()?;
        Some(Self {
            x: [x_min, x_max],
            y: [y_min, y_max],
        })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ReconstructionError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ReconstructionError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text).ok_or_else(|| ReconstructionError::MalformedCorners {
            path: path.to_owned(),
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReconstructionError> {
        let path = path.as_ref();
        let json = serde_json::to_vec(self).map_err(ReconstructionError::Serialize)?;
        fs::write(path, json).map_err(|source| ReconstructionError::Io {
            path: path.to_owned(),
            source,
        })
    }
}
