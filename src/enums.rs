use super::*;

/// Field weighting scheme used when sampling the grid at a particle position.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug)]
pub enum FieldWeighting {
    /// Fields taken from the nearest grid point. Fast, but steps imprint the cell structure.
    NEAREST_NEIGHBOR,
    /// Trilinear interpolation between the eight surrounding grid points.
    INTERPOLATED,
}

impl fmt::Display for FieldWeighting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FieldWeighting::NEAREST_NEIGHBOR => write!(f, "Nearest-grid-point field weighting"),
            FieldWeighting::INTERPOLATED => write!(f, "Trilinear-interpolated field weighting"),
        }
    }
}

/// Aperture shape of a wire mesh, in the mesh plane.
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
pub enum Aperture {
    /// Circular aperture with the given diameter.
    CIRCULAR{diameter: f64},
    /// Rectangular aperture of width (along h) by height (along v).
    RECTANGULAR{width: f64, height: f64},
}

impl Aperture {
    /// Bounding rectangle (width, height) over which the wire lattice is spaced.
    pub fn bounding_extent(&self) -> (f64, f64) {
        match *self {
            Aperture::CIRCULAR{diameter} => (diameter, diameter),
            Aperture::RECTANGULAR{width, height} => (width, height),
        }
    }

    /// Whether an in-plane offset (h, v) lies inside the open aperture.
    pub fn contains(&self, h: f64, v: f64) -> bool {
        match *self {
            Aperture::CIRCULAR{diameter} => (h*h + v*v).sqrt() <= diameter/2.,
            Aperture::RECTANGULAR{width, height} => (h.abs() <= width/2.) & (v.abs() <= height/2.),
        }
    }
}

impl fmt::Display for Aperture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Aperture::CIRCULAR{diameter} => write!(f, "Circular aperture, diameter {} mm", diameter/MM),
            Aperture::RECTANGULAR{width, height} => write!(f, "Rectangular aperture, {} mm x {} mm", width/MM, height/MM),
        }
    }
}

/// Number of wires per mesh axis.
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
pub enum WireCount {
    /// The same number of wires along both axes.
    UNIFORM{n: usize},
    /// Independent wire counts: nh wires spaced along h, nv wires spaced along v.
    PER_AXIS{nh: usize, nv: usize},
}

impl WireCount {
    pub fn counts(&self) -> (usize, usize) {
        match *self {
            WireCount::UNIFORM{n} => (n, n),
            WireCount::PER_AXIS{nh, nv} => (nh, nv),
        }
    }
}

impl fmt::Display for WireCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WireCount::UNIFORM{n} => write!(f, "{} wires per axis", n),
            WireCount::PER_AXIS{nh, nv} => write!(f, "{} wires along h, {} along v", nh, nv),
        }
    }
}
