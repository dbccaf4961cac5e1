use crate::{Boundaries, Facet};
use itertools::Itertools;
use nalgebra::Point3;

/// Number of cells along `x` and `y` covering `boundaries` with at least
/// `min_blocks` cells, keeping cells as square as the aspect ratio allows.
///
/// $$
/// r = w / h, \quad n_y = \lceil \sqrt{m / r} \rceil, \quad n_x = \lceil n_y ⋅ r \rceil
/// $$
///
/// A flat box gets a single row or column. Neither dimension exceeds
/// `min_blocks`, so a nearly flat box degrades to a single row or column too.
pub fn paving_sizes(boundaries: &Boundaries, min_blocks: usize) -> (usize, usize) {
    let min_blocks = min_blocks.max(1);
    let max = min_blocks as f64;
    let (width, height) = (boundaries.width(), boundaries.height());
    match (width > 0.0, height > 0.0) {
        (true, true) => {
            let ratio = width / height;
            let nb_y = (max / ratio).sqrt().ceil().clamp(1.0, max);
            let nb_x = (nb_y * ratio).ceil().clamp(1.0, max);
            (nb_x as usize, nb_y as usize)
        }
        (true, false) => (min_blocks, 1),
        (false, true) => (1, min_blocks),
        (false, false) => (1, 1),
    }
}

/// Uniform grid over the planar extent of a mesh, mapping each cell to the
/// facets having at least one vertex in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Paving {
    boundaries: Boundaries,
    dimensions: (usize, usize),
    cell_width: f64,
    cell_height: f64,
    /// Row-major, `cells[j * nb_x + i]`.
    cells: Vec<Vec<usize>>,
}

impl Paving {
    pub fn new(
        boundaries: Boundaries,
        min_blocks: usize,
        points: &[Point3<f64>],
        facets: &[Facet],
    ) -> Self {
        let dimensions = paving_sizes(&boundaries, min_blocks);
        let (nb_x, nb_y) = dimensions;
        let mut paving = Self {
            boundaries,
            dimensions,
            cell_width: boundaries.width() / nb_x as f64,
            cell_height: boundaries.height() / nb_y as f64,
            cells: vec![Vec::new(); nb_x * nb_y],
        };

        for (ix, facet) in facets.iter().enumerate() {
            let cells = facet
                .iter()
                .map(|&vertex| {
                    let p = &points[vertex];
                    paving.cell_of(p.x, p.y)
                })
                .unique()
                .collect_vec();
            for (i, j) in cells {
                paving.cells[j * nb_x + i].push(ix);
            }
        }
        paving
    }

    /// `(nb_x, nb_y)`.
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// Cell containing the planar location, clamped onto the grid.
    pub fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        let (nb_x, nb_y) = self.dimensions;
        (
            cell_index(x - self.boundaries.x_min, self.cell_width, nb_x),
            cell_index(y - self.boundaries.y_min, self.cell_height, nb_y),
        )
    }

    /// Facets registered under cell `(i, j)`, empty outside the grid.
    pub fn facets_in(&self, i: usize, j: usize) -> &[usize] {
        let (nb_x, nb_y) = self.dimensions;
        if i >= nb_x || j >= nb_y {
            return &[];
        }
        &self.cells[j * nb_x + i]
    }

    /// Facets registered under the cell containing the planar location.
    pub fn facets_at(&self, x: f64, y: f64) -> &[usize] {
        let (i, j) = self.cell_of(x, y);
        self.facets_in(i, j)
    }
}

fn cell_index(offset: f64, cell_size: f64, nb: usize) -> usize {
    if cell_size <= 0.0 || !offset.is_finite() || offset <= 0.0 {
        return 0;
    }
    ((offset / cell_size) as usize).min(nb - 1)
}
