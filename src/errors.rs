use thiserror::Error;

/// Degenerate source/detector/direction geometry.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("source and detector positions coincide; the propagation axis is undefined")]
    DegenerateAxis,
    #[error("supplied {axis} direction is parallel to the source-detector axis")]
    ParallelDirection{axis: &'static str},
    #[error("supplied {axis} direction has zero length")]
    ZeroDirection{axis: &'static str},
}

/// Bad shapes, counts, extents or non-finite values in user input.
/// Raised synchronously at the call introducing the bad input.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{name} must be greater than zero, got {value}")]
    NonPositive{name: &'static str, value: f64},
    #[error("{name} must be non-negative, got {value}")]
    Negative{name: &'static str, value: f64},
    #[error("{name} must be a positive count, got 0")]
    ZeroCount{name: &'static str},
    #[error("{name} = {value} outside allowed range ({min}, {max}]")]
    OutOfRange{name: &'static str, value: f64, min: f64, max: f64},
    #[error("{name} contains a non-finite value")]
    NonFinite{name: &'static str},
    #[error("positions ({positions}) and velocities ({velocities}) have different lengths")]
    ShapeMismatch{positions: usize, velocities: usize},
    #[error("particle arrays are empty")]
    EmptyEnsemble,
    #[error("field component {name} has shape {actual:?}, expected {expected:?}")]
    GridShapeMismatch{name: &'static str, expected: (usize, usize, usize), actual: (usize, usize, usize)},
    #[error("grid axis {name} must be strictly increasing and evenly spaced, with at least 2 samples")]
    BadGridAxis{name: &'static str},
}

/// Operations invoked out of order on a Tracker.
#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("run() has already been called on this ensemble; reload particles first")]
    AlreadyRun,
    #[error("run() has not been called yet")]
    NotRun,
    #[error("no particles loaded; call create_particles or load_particles first")]
    NoParticles,
}

/// Umbrella error for the tracker public surface.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    State(#[from] StateError),
}
