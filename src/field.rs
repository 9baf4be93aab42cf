use super::*;

/// One field query result: electric and magnetic field vectors at a point,
/// and whether the point fell inside the grid bounding box.
#[derive(Clone, Copy, Debug)]
pub struct FieldSample {
    pub E: Vector,
    pub B: Vector,
    pub in_bounds: bool,
}

impl FieldSample {
    pub fn vacuum(in_bounds: bool) -> FieldSample {
        FieldSample {
            E: Vector::zero(),
            B: Vector::zero(),
            in_bounds,
        }
    }
}

/// Provider of interpolated electromagnetic field samples over a bounded volume.
///
/// Outside the bounding box, and for any component the provider was never
/// given, the field is zero. Implementations must be `Sync`: multiple
/// trackers may read one grid concurrently, and the grid is never mutated
/// after construction.
pub trait FieldGrid: Sync {
    /// Sample E and B at an arbitrary position with the selected weighting.
    fn field_at(&self, position: &Vector, weighting: FieldWeighting) -> FieldSample;

    /// Smallest cell dimension, used to bound the integration step in-grid.
    fn min_cell_dimension(&self) -> f64;

    /// Axis-aligned bounding box (lower corner, upper corner).
    fn bounds(&self) -> (Vector, Vector);

    /// Names of field components that were never supplied and are zero-filled.
    fn missing_components(&self) -> &[&'static str];

    /// Distance along a unit direction from a point to the bounding box, if
    /// the ray hits it. Used to take a single large step across vacuum.
    fn distance_to_bounds(&self, position: &Vector, direction: &Vector) -> Option<f64> {
        let (lower, upper) = self.bounds();
        let mut t_entry = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;
        for (p, d, lo, hi) in [
            (position.x, direction.x, lower.x, upper.x),
            (position.y, direction.y, lower.y, upper.y),
            (position.z, direction.z, lower.z, upper.z),
        ] {
            if d == 0. {
                if (p < lo) | (p > hi) {
                    return None;
                }
            } else {
                let t0 = (lo - p)/d;
                let t1 = (hi - p)/d;
                t_entry = t_entry.max(t0.min(t1));
                t_exit = t_exit.min(t0.max(t1));
            }
        }
        if (t_entry <= t_exit) & (t_exit > 0.) {
            Some(t_entry.max(0.))
        } else {
            None
        }
    }
}

/// Regular Cartesian field grid. Each of the six components is optional;
/// absent components read as zero everywhere.
pub struct CartesianFieldGrid {
    x: Array1<f64>,
    y: Array1<f64>,
    z: Array1<f64>,
    components: [Option<Array3<f64>>; 6],
    missing: Vec<&'static str>,
    min_cell: f64,
}

pub const COMPONENT_NAMES: [&str; 6] = ["E_x", "E_y", "E_z", "B_x", "B_y", "B_z"];

impl CartesianFieldGrid {
    /// Build a grid from axis sample positions and optional component lattices.
    /// Components are ordered (E_x, E_y, E_z, B_x, B_y, B_z), each of shape
    /// (x.len(), y.len(), z.len()). Axis samples must be evenly spaced:
    /// interpolation indexes by spacing rather than searching the lattice.
    pub fn new(
        x: Array1<f64>,
        y: Array1<f64>,
        z: Array1<f64>,
        components: [Option<Array3<f64>>; 6],
    ) -> Result<CartesianFieldGrid, ValidationError> {

        for (axis, name) in [(&x, "x"), (&y, "y"), (&z, "z")] {
            if axis.len() < 2 {
                return Err(ValidationError::BadGridAxis{name});
            }
            let spacing = (axis[axis.len() - 1] - axis[0])/((axis.len() - 1) as f64);
            let regular = axis.windows(2).into_iter()
                .all(|w| (w[1] > w[0]) & (((w[1] - w[0]) - spacing).abs() <= 1E-9*spacing.abs()));
            if !regular {
                return Err(ValidationError::BadGridAxis{name});
            }
        }

        let expected = (x.len(), y.len(), z.len());
        let mut missing = Vec::new();
        for (component, name) in components.iter().zip(COMPONENT_NAMES) {
            match component {
                Some(array) => {
                    if array.dim() != expected {
                        return Err(ValidationError::GridShapeMismatch{name, expected, actual: array.dim()});
                    }
                    if !array.iter().all(|value| value.is_finite()) {
                        return Err(ValidationError::NonFinite{name});
                    }
                }
                None => missing.push(name),
            }
        }

        let dx = x[1] - x[0];
        let dy = y[1] - y[0];
        let dz = z[1] - z[0];
        let min_cell = dx.min(dy).min(dz);

        Ok(CartesianFieldGrid {
            x,
            y,
            z,
            components,
            missing,
            min_cell,
        })
    }

    /// Uniform E and B over a box from lower to upper, sampled on a regular
    /// lattice of the given shape.
    pub fn uniform(
        lower: Vector,
        upper: Vector,
        shape: (usize, usize, usize),
        E: Vector,
        B: Vector,
    ) -> Result<CartesianFieldGrid, ValidationError> {
        let x = Array1::linspace(lower.x, upper.x, shape.0);
        let y = Array1::linspace(lower.y, upper.y, shape.1);
        let z = Array1::linspace(lower.z, upper.z, shape.2);
        let fill = |value: f64| Some(Array3::from_elem(shape, value));
        CartesianFieldGrid::new(x, y, z, [
            fill(E.x), fill(E.y), fill(E.z),
            fill(B.x), fill(B.y), fill(B.z),
        ])
    }

    /// Field-free grid over a box; every query returns zero fields. Useful
    /// for pure-ballistic reference images.
    pub fn empty(lower: Vector, upper: Vector) -> Result<CartesianFieldGrid, ValidationError> {
        let x = Array1::linspace(lower.x, upper.x, 2);
        let y = Array1::linspace(lower.y, upper.y, 2);
        let z = Array1::linspace(lower.z, upper.z, 2);
        CartesianFieldGrid::new(x, y, z, [None, None, None, None, None, None])
    }

    fn component_at(&self, index: usize, i: usize, j: usize, k: usize) -> f64 {
        match &self.components[index] {
            Some(array) => array[[i, j, k]],
            None => 0.,
        }
    }

    /// Fractional index of a position along one axis, clamped to the lattice.
    fn fractional_index(axis: &Array1<f64>, value: f64) -> f64 {
        let n = axis.len();
        let spacing = (axis[n - 1] - axis[0])/((n - 1) as f64);
        ((value - axis[0])/spacing).clamp(0., (n - 1) as f64)
    }
}

impl FieldGrid for CartesianFieldGrid {
    fn field_at(&self, position: &Vector, weighting: FieldWeighting) -> FieldSample {
        let (lower, upper) = self.bounds();
        let in_bounds = (position.x >= lower.x) & (position.x <= upper.x)
            & (position.y >= lower.y) & (position.y <= upper.y)
            & (position.z >= lower.z) & (position.z <= upper.z);

        if !in_bounds {
            return FieldSample::vacuum(false);
        }

        let fx = CartesianFieldGrid::fractional_index(&self.x, position.x);
        let fy = CartesianFieldGrid::fractional_index(&self.y, position.y);
        let fz = CartesianFieldGrid::fractional_index(&self.z, position.z);

        let mut values = [0.; 6];
        match weighting {
            FieldWeighting::NEAREST_NEIGHBOR => {
                let i = fx.round() as usize;
                let j = fy.round() as usize;
                let k = fz.round() as usize;
                for (index, value) in values.iter_mut().enumerate() {
                    *value = self.component_at(index, i, j, k);
                }
            }
            FieldWeighting::INTERPOLATED => {
                let i0 = (fx.floor() as usize).min(self.x.len() - 2);
                let j0 = (fy.floor() as usize).min(self.y.len() - 2);
                let k0 = (fz.floor() as usize).min(self.z.len() - 2);
                let tx = fx - i0 as f64;
                let ty = fy - j0 as f64;
                let tz = fz - k0 as f64;

                for (index, value) in values.iter_mut().enumerate() {
                    let mut accumulated = 0.;
                    for (di, wi) in [(0, 1. - tx), (1, tx)] {
                        for (dj, wj) in [(0, 1. - ty), (1, ty)] {
                            for (dk, wk) in [(0, 1. - tz), (1, tz)] {
                                accumulated += wi*wj*wk*self.component_at(index, i0 + di, j0 + dj, k0 + dk);
                            }
                        }
                    }
                    *value = accumulated;
                }
            }
        }

        FieldSample {
            E: Vector::new(values[0], values[1], values[2]),
            B: Vector::new(values[3], values[4], values[5]),
            in_bounds: true,
        }
    }

    fn min_cell_dimension(&self) -> f64 {
        self.min_cell
    }

    fn bounds(&self) -> (Vector, Vector) {
        let lower = Vector::new(self.x[0], self.y[0], self.z[0]);
        let n = (self.x.len() - 1, self.y.len() - 1, self.z.len() - 1);
        let upper = Vector::new(self.x[n.0], self.y[n.1], self.z[n.2]);
        (lower, upper)
    }

    fn missing_components(&self) -> &[&'static str] {
        &self.missing
    }
}
