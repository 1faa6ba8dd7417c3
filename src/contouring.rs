//! Contour bands and lines over a [`ScalarField`]
//!
//! Contour extraction itself is done by the [`contour`] crate. This module
//! only configures it for the field's grid and converts its geometry into
//! [`DataPath`]s in data coordinates.
//!
//! The library places each value at the centre of its grid cell, so the
//! origin is shifted back half a step to land cell centres on the grid
//! coordinates. It also pads the grid with values below every level, so any
//! region touching the grid edge closes along a frame half a cell outside the
//! outermost samples. All geometry is cut back to the sampled [`Extent`]:
//! - band rings are clamped onto it, collapsing the frame strip to zero area
//! - line rings are split where they leave it, giving open lines that stop
//!   at the grid edge
use contour::ContourBuilder;
use geo_types::LineString;

use crate::{
    error::{Error, Result},
    field::{Grid, ScalarField},
    render::DataPath,
};

/// Region of the field between two levels.
#[derive(Debug, Clone)]
pub struct FilledBand {
    /// Lower bound, inclusive
    pub lower: f64,
    /// Upper bound, exclusive
    pub upper: f64,
    /// Exterior rings and holes; fill with the even-odd rule
    pub path: DataPath,
}

/// Iso-lines of the field at a single level.
#[derive(Debug, Clone)]
pub struct LevelLines {
    /// Field value along the lines
    pub level: f64,
    /// One subpath per line
    pub path: DataPath,
}

/// The rectangle spanned by the grid samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    x: (f64, f64),
    y: (f64, f64),
    eps: f64,
}
impl Extent {
    /// Sample extent of `grid`
    #[must_use]
    pub fn of(grid: &Grid) -> Self {
        let first_last = |values: &[f64]| {
            (
                values.first().copied().unwrap_or_default(),
                values.last().copied().unwrap_or_default(),
            )
        };

        // Rounding tolerance, far below the half-cell frame offset
        let eps = 1e-6 * grid.x_step().min(grid.y_step());
        Self {
            x: first_last(grid.xs()),
            y: first_last(grid.ys()),
            eps,
        }
    }

    /// Horizontal span
    #[must_use]
    pub fn x(&self) -> (f64, f64) {
        self.x
    }

    /// Vertical span
    #[must_use]
    pub fn y(&self) -> (f64, f64) {
        self.y
    }

    /// Returns true if `point` lies inside or on the edge of the extent
    #[must_use]
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x.0 - self.eps
            && x <= self.x.1 + self.eps
            && y >= self.y.0 - self.eps
            && y <= self.y.1 + self.eps
    }

    /// Moves `point` onto the nearest point of the extent
    #[must_use]
    pub fn clamp(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x.clamp(self.x.0, self.x.1), y.clamp(self.y.0, self.y.1))
    }

    /// Splits a line into the runs of consecutive vertices inside the extent.
    ///
    /// A closed ring is rotated to start on an outside vertex first, so no run
    /// wraps around its end. Runs shorter than two points are dropped.
    fn inside_runs(&self, points: &[(f64, f64)], closed: bool) -> Vec<Vec<(f64, f64)>> {
        let mut points = points.to_vec();
        if closed {
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            if let Some(start) = points.iter().position(|p| !self.contains(*p)) {
                points.rotate_left(start);
            }
        }

        let mut runs = Vec::new();
        let mut run = Vec::new();
        for point in points {
            if self.contains(point) {
                run.push(self.clamp(point));
            } else if !run.is_empty() {
                runs.push(std::mem::take(&mut run));
            }
        }
        runs.push(run);

        runs.retain(|run| run.len() >= 2);
        runs
    }
}

/// Computes bands and lines for one field.
pub struct ContourGenerator<'a> {
    field: &'a ScalarField,
    builder: ContourBuilder,
    extent: Extent,
}
impl<'a> ContourGenerator<'a> {
    /// Configures the contouring library for `field`'s grid
    #[must_use]
    pub fn new(field: &'a ScalarField) -> Self {
        let grid = field.grid();
        let (dx, dy) = (grid.x_step(), grid.y_step());
        let x0 = grid.xs().first().copied().unwrap_or_default();
        let y0 = grid.ys().first().copied().unwrap_or_default();

        let builder = ContourBuilder::new(grid.nx(), grid.ny(), true)
            .x_origin(x0 - dx / 2.0)
            .y_origin(y0 - dy / 2.0)
            .x_step(dx)
            .y_step(dy);

        Self {
            field,
            builder,
            extent: Extent::of(grid),
        }
    }

    /// The sampled extent all geometry is cut back to
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The region where `lower <= z < upper`, within the sampled extent.
    ///
    /// # Errors
    /// Returns [`Error::Contour`] if the library rejects the field.
    pub fn filled(&self, lower: f64, upper: f64) -> Result<FilledBand> {
        let bands = self
            .builder
            .isobands(self.field.values(), &[lower, upper])
            .map_err(contour_error)?;

        let mut path = DataPath::default();
        for band in &bands {
            for polygon in &band.geometry().0 {
                path.push_ring(self.clamped_ring(polygon.exterior()));
                for hole in polygon.interiors() {
                    path.push_ring(self.clamped_ring(hole));
                }
            }
        }

        Ok(FilledBand { lower, upper, path })
    }

    /// The lines where `z == level`.
    ///
    /// Lines that reach the grid edge end there as open polylines.
    ///
    /// # Errors
    /// Returns [`Error::Contour`] if the library rejects the field.
    pub fn lines(&self, level: f64) -> Result<LevelLines> {
        let lines = self
            .builder
            .lines(self.field.values(), &[level])
            .map_err(contour_error)?;

        let mut path = DataPath::default();
        for line in &lines {
            for string in &line.geometry().0 {
                let points = ring_points(string);
                let closed = string.is_closed();

                if points.iter().all(|p| self.extent.contains(*p)) {
                    let points: Vec<_> = points.into_iter().map(|p| self.extent.clamp(p)).collect();
                    if closed {
                        path.push_ring(points);
                    } else {
                        path.push_polyline(points);
                    }
                    continue;
                }

                for run in self.extent.inside_runs(&points, closed) {
                    path.push_polyline(run);
                }
            }
        }

        Ok(LevelLines { level, path })
    }

    fn clamped_ring(&self, ring: &LineString<f64>) -> Vec<(f64, f64)> {
        ring.0
            .iter()
            .map(|c| self.extent.clamp((c.x, c.y)))
            .collect()
    }
}

fn ring_points(line: &LineString<f64>) -> Vec<(f64, f64)> {
    line.0.iter().map(|c| (c.x, c.y)).collect()
}

#[allow(clippy::needless_pass_by_value)]
fn contour_error(e: contour::Error) -> Error {
    Error::Contour(format!("{e:?}"))
}

/// All bands and lines needed to draw a contour plot.
#[derive(Debug, Clone)]
pub struct ContourSet {
    /// `levels.len() - 1` bands, lowest first
    pub bands: Vec<FilledBand>,
    /// One entry per level
    pub lines: Vec<LevelLines>,
}
impl ContourSet {
    /// Contours `field` at `levels`, which must be increasing.
    ///
    /// # Errors
    /// Returns an error if fewer than two levels are given or the library fails.
    pub fn compute(field: &ScalarField, levels: &[f64]) -> Result<Self> {
        if levels.len() < 2 {
            return Err(Error::InvalidConfig(
                "at least two contour levels are required".to_string(),
            ));
        }

        let generator = ContourGenerator::new(field);
        let bands = levels
            .windows(2)
            .map(|pair| generator.filled(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;
        let lines = levels
            .iter()
            .map(|level| generator.lines(*level))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Contoured {} bands and {} levels",
            bands.len(),
            lines.len()
        );
        Ok(Self { bands, lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    /// Cone peaking at 1.0 in the middle of the unit square
    fn cone(n: usize) -> ScalarField {
        let grid = Grid::new((0.0, 1.0), (0.0, 1.0), n);
        let values = grid
            .points()
            .map(|(x, y)| 1.0 - 2.0 * ((x - 0.5).powi(2) + (y - 0.5).powi(2)).sqrt())
            .collect();
        ScalarField::from_values(grid, values).unwrap()
    }

    #[test]
    fn test_lines_follow_level() {
        let field = cone(41);
        let generator = ContourGenerator::new(&field);

        // z = 0.5 is the circle of radius 0.25 around the centre
        let lines = generator.lines(0.5).unwrap();
        assert_eq!(lines.level, 0.5);
        assert!(!lines.path.is_empty());

        let points: Vec<_> = lines.path.points().collect();
        for (x, y) in &points {
            let r = ((x - 0.5).powi(2) + (y - 0.5).powi(2)).sqrt();
            assert!((r - 0.25).abs() < 0.05, "point ({x}, {y}) at radius {r}");
        }

        let (min_x, max_x) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| (lo.min(*x), hi.max(*x)));
        assert!(((min_x + max_x) / 2.0 - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_band_has_hole() {
        let field = cone(41);
        let generator = ContourGenerator::new(&field);

        // An annulus: everything between radius 0.25 and 0.375
        let band = generator.filled(0.25, 0.5).unwrap();
        assert_eq!((band.lower, band.upper), (0.25, 0.5));
        assert!(band.path.subpaths().len() >= 2);
        assert!(band.path.subpaths().iter().all(|s| s.closed));
    }

    #[test]
    fn test_level_above_field_is_empty() {
        let field = cone(11);
        let generator = ContourGenerator::new(&field);
        assert!(generator.lines(2.0).unwrap().path.is_empty());
    }

    #[test]
    fn test_compute_set() {
        let field = cone(21);
        let levels = field.levels(6).unwrap();
        let set = ContourSet::compute(&field, &levels).unwrap();
        assert_eq!(set.bands.len(), 5);
        assert_eq!(set.lines.len(), 6);
        assert_eq!(set.bands[4].upper, levels[5]);

        assert!(ContourSet::compute(&field, &levels[..1]).is_err());
    }

    #[test]
    fn test_lines_stop_at_grid_edge() {
        // z = x crosses 0.5 on a vertical line running edge to edge
        let grid = Grid::new((0.0, 1.0), (0.0, 1.0), 10);
        let values = grid.points().map(|(x, _)| x).collect();
        let field = ScalarField::from_values(grid, values).unwrap();

        let lines = ContourGenerator::new(&field).lines(0.5).unwrap();
        let subpaths = lines.path.subpaths();
        assert_eq!(subpaths.len(), 1);
        assert!(!subpaths[0].closed);

        let points = &subpaths[0].points;
        for (x, _) in points {
            assert_close!(*x, 0.5, eps = 1e-9);
        }
        let min_y = points.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);
        assert_close!(min_y, 0.0, eps = 1e-9);
        assert_close!(max_y, 1.0, eps = 1e-9);
    }

    #[test]
    fn test_geometry_within_grid() {
        // Positive everywhere, so every level region touches the grid edge
        let grid = Grid::new((0.1, 0.9), (0.2, 0.7), 25);
        let values = grid
            .points()
            .map(|(x, y)| 2.0 - ((x - 0.5).powi(2) + (y - 0.45).powi(2)).sqrt())
            .collect();
        let field = ScalarField::from_values(grid, values).unwrap();

        let levels = [0.0, 1.65, 1.7, 1.8, 1.9, field.max()];
        let set = ContourSet::compute(&field, &levels).unwrap();
        let extent = ContourGenerator::new(&field).extent();
        assert_eq!(extent.x(), (0.1, 0.9));

        // Level 0 only has the padding frame
        assert!(set.lines[0].path.is_empty());
        assert!(!set.bands[0].path.is_empty());

        let outside = set
            .bands
            .iter()
            .map(|band| &band.path)
            .chain(set.lines.iter().map(|lines| &lines.path))
            .flat_map(|path| path.points())
            .filter(|p| !extent.contains(*p))
            .count();
        assert_eq!(outside, 0);

        // 1.65 crosses the top and bottom edges: open lines, not a ring around the frame
        assert!(set.lines[1].path.subpaths().iter().all(|s| !s.closed));
        assert!(!set.lines[1].path.is_empty());
    }

    #[test]
    fn test_inside_runs_rotate_past_ring_end() {
        let grid = Grid::new((0.0, 1.0), (0.0, 1.0), 3);
        let extent = Extent::of(&grid);

        // Starts and ends inside, with one excursion outside in the middle
        let ring = vec![(0.5, 0.5), (0.9, 0.5), (1.5, 0.5), (0.9, 0.9), (0.5, 0.9), (0.5, 0.5)];
        let runs = extent.inside_runs(&ring, true);
        assert_eq!(runs, vec![vec![(0.9, 0.9), (0.5, 0.9), (0.5, 0.5), (0.9, 0.5)]]);

        let open = extent.inside_runs(&ring, false);
        assert_eq!(open.len(), 2);
    }
}
