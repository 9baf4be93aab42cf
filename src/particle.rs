use super::*;

/// Particle species: every particle in one tracker run shares this charge and mass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Charge in Coulombs.
    pub q: f64,
    /// Mass in kilograms.
    pub m: f64,
}

impl Species {
    pub fn new(q: f64, m: f64) -> Result<Species, ValidationError> {
        if !q.is_finite() | !m.is_finite() {
            return Err(ValidationError::NonFinite{name: "species charge/mass"});
        }
        if m <= 0. {
            return Err(ValidationError::NonPositive{name: "species mass", value: m});
        }
        Ok(Species {q, m})
    }

    pub fn proton() -> Species {
        Species {q: Q, m: MP}
    }

    pub fn electron() -> Species {
        Species {q: -Q, m: ME}
    }

    pub fn alpha() -> Species {
        Species {q: 2.*Q, m: MALPHA}
    }
}

/// One traced particle. The original state is retained for the mesh
/// pre-filter and for field-free reference projections.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vector,
    pub vel: Vector,
    pub pos_origin: Vector,
    pub vel_origin: Vector,
    /// Crossed the detector plane; pos/vel hold the interpolated crossing state.
    pub terminated: bool,
    /// Numerical blow-up during integration; excluded from results.
    pub failed: bool,
}

impl Particle {
    pub fn new(pos: Vector, vel: Vector) -> Particle {
        Particle {
            pos,
            vel,
            pos_origin: pos,
            vel_origin: vel,
            terminated: false,
            failed: false,
        }
    }
}

/// Draw directions uniformly in solid angle within a cone of half-angle
/// `max_theta` about the frame normal. Uniform-in-theta sampling would
/// over-concentrate particles near the axis, so cos(theta) is drawn
/// uniformly on [cos(max_theta), 1] instead.
pub fn sample_cone_directions<R: Rng + ?Sized>(rng: &mut R, n: usize, frame: &GeometryFrame, max_theta: f64) -> Vec<Vector> {
    let cos_max = max_theta.cos();
    (0..n).map(|_| {
        let cos_theta = 1. - rng.gen::<f64>()*(1. - cos_max);
        let sin_theta = (1. - cos_theta*cos_theta).sqrt();
        let phi = 2.*PI*rng.gen::<f64>();
        frame.normal.scale(cos_theta)
            .add(&frame.horizontal.scale(sin_theta*phi.cos()))
            .add(&frame.vertical.scale(sin_theta*phi.sin()))
    }).collect()
}

/// Generate an ensemble at the source point: cone directions uniform in solid
/// angle, speeds from the kinetic energy (optionally Gaussian-perturbed by a
/// fractional spread).
pub fn create_source_ensemble<R: Rng + ?Sized>(
    rng: &mut R,
    frame: &GeometryFrame,
    n: usize,
    energy: f64,
    energy_spread: Option<f64>,
    max_theta: f64,
    species: Species,
) -> Result<Vec<Particle>, ValidationError> {

    if n == 0 {
        return Err(ValidationError::ZeroCount{name: "particle count"});
    }
    if !energy.is_finite() {
        return Err(ValidationError::NonFinite{name: "energy"});
    }
    if energy <= 0. {
        return Err(ValidationError::NonPositive{name: "energy", value: energy});
    }
    if !max_theta.is_finite() | (max_theta <= 0.) | (max_theta > PI/2.) {
        return Err(ValidationError::OutOfRange{name: "max_theta", value: max_theta, min: 0., max: PI/2.});
    }
    if let Some(spread) = energy_spread {
        if !spread.is_finite() | (spread < 0.) {
            return Err(ValidationError::NonPositive{name: "energy_spread", value: spread});
        }
    }

    let directions = sample_cone_directions(rng, n, frame, max_theta);

    let energies: Vec<f64> = match energy_spread {
        Some(spread) if spread > 0. => {
            let normal = Normal::new(energy, spread*energy)
                .map_err(|_| ValidationError::NonFinite{name: "energy_spread"})?;
            //A wide spread can sample below zero; clamp to a sliver of the
            //nominal energy rather than producing an imaginary speed.
            (0..n).map(|_| normal.sample(rng).max(1E-6*energy)).collect()
        }
        _ => vec![energy; n],
    };

    Ok(directions.into_iter().zip(energies).map(|(dir, energy)| {
        let speed = (2.*energy/species.m).sqrt();
        Particle::new(frame.source, dir.scale(speed))
    }).collect())
}

/// Validate and ingest precomputed position/velocity arrays. No resampling.
pub fn load_ensemble(positions: &[Vector], velocities: &[Vector]) -> Result<Vec<Particle>, ValidationError> {
    if positions.len() != velocities.len() {
        return Err(ValidationError::ShapeMismatch{positions: positions.len(), velocities: velocities.len()});
    }
    if positions.is_empty() {
        return Err(ValidationError::EmptyEnsemble);
    }
    if !positions.iter().all(|p| p.is_finite()) {
        return Err(ValidationError::NonFinite{name: "positions"});
    }
    if !velocities.iter().all(|v| v.is_finite()) {
        return Err(ValidationError::NonFinite{name: "velocities"});
    }
    Ok(positions.iter().zip(velocities).map(|(&pos, &vel)| Particle::new(pos, vel)).collect())
}
