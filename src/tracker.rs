use super::*;

/// Fraction of the smallest grid cell a particle may cross per step while
/// inside the field bounding box.
fn default_grid_step_fraction() -> f64 {
    0.1
}

/// Simulation-level options for a Tracker.
#[derive(Deserialize, Clone, Debug)]
pub struct TrackerOptions {
    /// Optional override of the detector horizontal direction.
    #[serde(default)]
    pub detector_hdir: Option<Vector>,
    /// Optional override of the detector vertical direction.
    #[serde(default)]
    pub detector_vdir: Option<Vector>,
    #[serde(default = "default_grid_step_fraction")]
    pub grid_step_fraction: f64,
    /// Suppress the one-time warnings about missing field components.
    /// Per-instance, never process-global.
    #[serde(default)]
    pub suppress_field_warnings: bool,
    #[serde(default)]
    pub print: bool,
    /// Worker threads for the integration stage; 1 disables parallelism.
    #[serde(default = "num_threads_default")]
    pub num_threads: usize,
}

fn num_threads_default() -> usize {
    1
}

impl Default for TrackerOptions {
    fn default() -> TrackerOptions {
        TrackerOptions {
            detector_hdir: None,
            detector_vdir: None,
            grid_step_fraction: default_grid_step_fraction(),
            suppress_field_warnings: false,
            print: false,
            num_threads: 1,
        }
    }
}

/// Aggregate result of one `run()`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RunSummary {
    /// Particles integrated (after mesh pruning).
    pub total: usize,
    /// Particles that crossed the detector plane.
    pub terminated: usize,
    /// Particles still in flight at max_steps, or unable to ever reach the plane.
    pub lost: usize,
    /// Particles excluded for numerical blow-up.
    pub failed: usize,
}

enum Outcome {
    Terminated,
    Lost,
    Failed,
}

/// Traces one ensemble of charged particles from a source, through a field
/// grid and optional wire meshes, to the detector plane.
pub struct Tracker<'a, G: FieldGrid> {
    pub grid: &'a G,
    pub frame: GeometryFrame,
    pub options: TrackerOptions,
    pub species: Option<Species>,
    pub particles: Vec<Particle>,
    pub meshes: Vec<WireMesh>,
    pub has_run: bool,
    pub summary: Option<RunSummary>,
}

impl<'a, G: FieldGrid> Tracker<'a, G> {
    pub fn new(grid: &'a G, source: Vector, detector: Vector, options: TrackerOptions) -> Result<Tracker<'a, G>, TrackerError> {
        let frame = GeometryFrame::new(source, detector, options.detector_hdir, options.detector_vdir)?;
        if !options.grid_step_fraction.is_finite() | (options.grid_step_fraction <= 0.) {
            return Err(ValidationError::NonPositive{name: "grid_step_fraction", value: options.grid_step_fraction}.into());
        }
        Ok(Tracker {
            grid,
            frame,
            options,
            species: None,
            particles: Vec::new(),
            meshes: Vec::new(),
            has_run: false,
            summary: None,
        })
    }

    /// Generate a fresh ensemble at the source point (see
    /// `particle::create_source_ensemble`). Resets the run state.
    pub fn create_particles(&mut self, n: usize, energy: f64, energy_spread: Option<f64>, max_theta: f64, species: Species) -> Result<(), TrackerError> {
        self.create_particles_with_rng(&mut rand::thread_rng(), n, energy, energy_spread, max_theta, species)
    }

    /// As `create_particles`, with a caller-supplied RNG for reproducible ensembles.
    pub fn create_particles_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize, energy: f64, energy_spread: Option<f64>, max_theta: f64, species: Species) -> Result<(), TrackerError> {
        let particles = particle::create_source_ensemble(rng, &self.frame, n, energy, energy_spread, max_theta, species)?;
        self.load(particles, species);
        Ok(())
    }

    /// Ingest a precomputed ensemble. Resets the run state.
    pub fn load_particles(&mut self, positions: &[Vector], velocities: &[Vector], species: Species) -> Result<(), TrackerError> {
        let particles = particle::load_ensemble(positions, velocities)?;
        self.load(particles, species);
        Ok(())
    }

    fn load(&mut self, particles: Vec<Particle>, species: Species) {
        self.particles = particles;
        self.species = Some(species);
        self.has_run = false;
        self.summary = None;
    }

    /// Register a wire mesh and immediately prune the loaded ensemble against
    /// it by straight-line extrapolation. Returns the number of particles
    /// this mesh removed.
    pub fn add_wire_mesh(
        &mut self,
        location: f64,
        extent: Aperture,
        nwires: WireCount,
        wire_diameter: f64,
        hdir: Option<Vector>,
        vdir: Option<Vector>,
    ) -> Result<usize, TrackerError> {
        if self.species.is_none() {
            return Err(StateError::NoParticles.into());
        }
        if self.has_run {
            return Err(StateError::AlreadyRun.into());
        }
        let mesh = WireMesh::new(&self.frame, location, extent, nwires, wire_diameter, hdir, vdir)?;
        let removed = mesh.filter(&mut self.particles);
        self.meshes.push(mesh);
        Ok(removed)
    }

    /// Integrate every active particle to the detector plane.
    ///
    /// `dt` fixes the time step; `None` selects adaptive stepping - a small
    /// fraction of a grid cell inside the field bounding box, one large step
    /// across field-free space. May be called once per loaded ensemble.
    pub fn run(&mut self, field_weighting: FieldWeighting, dt: Option<f64>, max_steps: usize) -> Result<RunSummary, TrackerError> {
        let species = self.species.ok_or(StateError::NoParticles)?;
        if self.has_run {
            return Err(StateError::AlreadyRun.into());
        }
        if max_steps == 0 {
            return Err(ValidationError::ZeroCount{name: "max_steps"}.into());
        }
        if let Some(step) = dt {
            if !step.is_finite() | (step <= 0.) {
                return Err(ValidationError::NonPositive{name: "dt", value: step}.into());
            }
        }

        if !self.options.suppress_field_warnings {
            for name in self.grid.missing_components() {
                warn!("field component {} was never supplied; treating as zero", name);
            }
        }

        if self.options.print {
            println!("Tracing {} particles ({})...", self.particles.len(), field_weighting);
        }

        let bar = if self.options.print {
            let bar = ProgressBar::new(self.particles.len() as u64);
            bar.set_style(ProgressStyle::default_bar()
                .template("[{elapsed_precise}][{bar:40.cyan/blue}][{eta_precise}] {percent}%")
                .progress_chars("#>-"));
            bar
        } else {
            ProgressBar::hidden()
        };

        let grid = self.grid;
        let frame = self.frame;
        let weighting = field_weighting;
        let step_fraction = self.options.grid_step_fraction;

        let trace = |particle: &mut Particle| {
            let outcome = integrate_particle(grid, &frame, species, weighting, dt, max_steps, step_fraction, particle);
            bar.tick();
            bar.inc(1);
            outcome
        };

        let outcomes: Vec<Outcome> = if self.options.num_threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.num_threads)
                .build()
                .expect("Error: could not initialize rayon thread pool.");
            pool.install(|| self.particles.par_iter_mut().map(&trace).collect())
        } else {
            self.particles.iter_mut().map(&trace).collect()
        };

        bar.finish_and_clear();

        let mut summary = RunSummary {
            total: outcomes.len(),
            terminated: 0,
            lost: 0,
            failed: 0,
        };
        for outcome in &outcomes {
            match outcome {
                Outcome::Terminated => summary.terminated += 1,
                Outcome::Lost => summary.lost += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        if summary.lost > 0 {
            warn!("{} of {} particles did not reach the detector plane within {} steps and are excluded", summary.lost, summary.total, max_steps);
        }
        if summary.failed > 0 {
            warn!("{} of {} particles hit numerical blow-up during integration and are excluded", summary.failed, summary.total);
        }

        self.has_run = true;
        self.summary = Some(summary);
        Ok(summary)
    }

    /// Particles that crossed the detector plane, with interpolated crossing states.
    pub fn terminated_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|particle| particle.terminated)
    }
}

/// March one particle to the detector plane with the Boris scheme: half
/// electric kick, magnetic rotation, half electric kick.
fn integrate_particle<G: FieldGrid>(
    grid: &G,
    frame: &GeometryFrame,
    species: Species,
    weighting: FieldWeighting,
    dt: Option<f64>,
    max_steps: usize,
    step_fraction: f64,
    particle: &mut Particle,
) -> Outcome {

    let q_over_m = species.q/species.m;
    let mut distance = frame.detector_plane_distance(&particle.pos);
    if distance >= 0. {
        //Loaded at or beyond the detector plane; no crossing can be detected.
        return Outcome::Lost;
    }

    for _ in 0..max_steps {
        let speed = particle.vel.magnitude();
        if speed == 0. {
            return Outcome::Lost;
        }
        let sample = grid.field_at(&particle.pos, weighting);

        let step = match dt {
            Some(fixed) => fixed,
            None => {
                if sample.in_bounds {
                    step_fraction*grid.min_cell_dimension()/speed
                } else {
                    //Field-free space: one step to the nearer of the grid
                    //bounding box or the detector plane, overshooting slightly
                    //so the entry or crossing actually happens.
                    let direction = particle.vel.scale(1./speed);
                    let time_to_grid = grid.distance_to_bounds(&particle.pos, &direction)
                        .map(|d| d/speed)
                        .filter(|&t| t > 0.);
                    let approach_speed = particle.vel.dot(&frame.normal);
                    let time_to_detector = if approach_speed > 0. {
                        Some(-distance/approach_speed)
                    } else {
                        None
                    };
                    match (time_to_grid, time_to_detector) {
                        (Some(tg), Some(td)) => tg.min(td)*(1. + 1E-6),
                        (Some(tg), None) => tg*(1. + 1E-6),
                        (None, Some(td)) => td*(1. + 1E-6),
                        //Receding from both the grid and the detector.
                        (None, None) => return Outcome::Lost,
                    }
                }
            }
        };

        //Boris push
        let half_kick = sample.E.scale(q_over_m*step/2.);
        let v_minus = particle.vel.add(&half_kick);
        let t = sample.B.scale(q_over_m*step/2.);
        let s = t.scale(2./(1. + t.dot(&t)));
        let v_prime = v_minus.add(&v_minus.cross(&t));
        let v_plus = v_minus.add(&v_prime.cross(&s));
        let vel_new = v_plus.add(&half_kick);
        let pos_new = particle.pos.add(&vel_new.scale(step));

        if !pos_new.is_finite() | !vel_new.is_finite() {
            particle.failed = true;
            return Outcome::Failed;
        }

        let distance_new = frame.detector_plane_distance(&pos_new);
        if (distance < 0.) & (distance_new >= 0.) {
            //Interpolate to the exact plane crossing rather than taking the
            //nearest sample; this accuracy sets the image sharpness.
            let fraction = distance/(distance - distance_new);
            particle.pos = particle.pos.lerp(&pos_new, fraction);
            particle.vel = particle.vel.lerp(&vel_new, fraction);
            particle.terminated = true;
            return Outcome::Terminated;
        }

        particle.pos = pos_new;
        particle.vel = vel_new;
        distance = distance_new;
    }

    Outcome::Lost
}
