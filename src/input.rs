use super::*;

/// A scalar-or-pair TOML field: `extent = 2.0` or `extent = [2.0, 3.0]`.
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(untagged)]
pub enum ScalarOrPair {
    Scalar(f64),
    Pair([f64; 2]),
}

impl ScalarOrPair {
    /// A single value denotes a circular aperture of that diameter; a pair
    /// denotes rectangular width x height.
    pub fn to_aperture(&self, length_unit: f64) -> Aperture {
        match *self {
            ScalarOrPair::Scalar(diameter) => Aperture::CIRCULAR{diameter: diameter*length_unit},
            ScalarOrPair::Pair([width, height]) => Aperture::RECTANGULAR{width: width*length_unit, height: height*length_unit},
        }
    }
}

/// `nwires = 10` or `nwires = [10, 15]`.
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(untagged)]
pub enum CountOrPair {
    Count(usize),
    Pair([usize; 2]),
}

impl CountOrPair {
    pub fn to_wire_count(&self) -> WireCount {
        match *self {
            CountOrPair::Count(n) => WireCount::UNIFORM{n},
            CountOrPair::Pair([nh, nv]) => WireCount::PER_AXIS{nh, nv},
        }
    }
}

///This helper function is a workaround to issue #368 in serde
fn default_max_steps() -> usize {
    100000
}

///This helper function is a workaround to issue #368 in serde
fn default_field_weighting() -> FieldWeighting {
    FieldWeighting::INTERPOLATED
}

///This helper function is a workaround to issue #368 in serde
fn default_grid_shape() -> [usize; 3] {
    [2, 2, 2]
}

///This helper function is a workaround to issue #368 in serde
fn default_length_unit() -> String {
    "MM".to_string()
}

/// Simulation-level options from the input file.
#[derive(Deserialize, Clone, Debug)]
pub struct Options {
    pub name: String,
    #[serde(default = "default_field_weighting")]
    pub field_weighting: FieldWeighting,
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(flatten)]
    pub tracker: TrackerOptions,
}

/// Source/detector geometry, in multiples of `length_unit`.
#[derive(Deserialize, Clone, Debug)]
pub struct GeometryInput {
    #[serde(default = "default_length_unit")]
    pub length_unit: String,
    pub source: [f64; 3],
    pub detector: [f64; 3],
}

/// Species as a preset name ("proton", "electron", "alpha") or explicit
/// charge (in elementary charges) and mass (in amu).
#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum SpeciesInput {
    Named(String),
    Custom{charge: f64, mass: f64},
}

impl SpeciesInput {
    pub fn to_species(&self) -> Result<Species> {
        match self {
            SpeciesInput::Named(name) => match name.to_lowercase().as_str() {
                "proton" | "p" | "h+" => Ok(Species::proton()),
                "electron" | "e" | "e-" => Ok(Species::electron()),
                "alpha" | "he++" => Ok(Species::alpha()),
                _ => bail!("Input error: unknown species {}. Use proton, electron, alpha, or {{charge, mass}}.", name),
            },
            SpeciesInput::Custom{charge, mass} => Ok(Species::new(charge*Q, mass*AMU)?),
        }
    }
}

/// Source ensemble parameters: energy in eV, cone half-angle in degrees.
#[derive(Deserialize, Clone, Debug)]
pub struct ParticleParameters {
    pub nparticles: usize,
    pub energy: f64,
    #[serde(default)]
    pub energy_spread: Option<f64>,
    pub max_theta: f64,
    pub species: SpeciesInput,
}

/// One wire mesh, lengths in multiples of the geometry `length_unit`.
#[derive(Deserialize, Clone, Debug)]
pub struct MeshInput {
    pub location: f64,
    pub extent: ScalarOrPair,
    pub nwires: CountOrPair,
    pub wire_diameter: f64,
    #[serde(default)]
    pub hdir: Option<[f64; 3]>,
    #[serde(default)]
    pub vdir: Option<[f64; 3]>,
}

/// Uniform-field region: E in V/m and B in T over a box. Components that are
/// absent stay absent in the grid and zero-fill with a warning.
#[derive(Deserialize, Clone, Debug)]
pub struct FieldInput {
    pub lower: [f64; 3],
    pub upper: [f64; 3],
    #[serde(default = "default_grid_shape")]
    pub shape: [usize; 3],
    #[serde(default)]
    pub E: Option<[f64; 3]>,
    #[serde(default)]
    pub B: Option<[f64; 3]>,
}

/// Radiograph histogram: half-extents in multiples of `length_unit`.
#[derive(Deserialize, Clone, Debug)]
pub struct RadiographInput {
    pub size: [f64; 2],
    pub bins: [usize; 2],
    #[serde(default)]
    pub ignore_grid: bool,
}

/// RustPRad's internal representation of an input file.
#[derive(Deserialize, Clone, Debug)]
pub struct InputFile {
    pub options: Options,
    pub geometry: GeometryInput,
    pub particles: ParticleParameters,
    #[serde(default)]
    pub meshes: Vec<MeshInput>,
    pub field: FieldInput,
    pub radiograph: RadiographInput,
}

impl InputFile {
    pub fn new(string: &str) -> Result<InputFile> {
        toml::from_str(string).context("Could not parse TOML input file.")
    }

    pub fn length_unit(&self) -> Result<f64> {
        parse_length_unit(&self.geometry.length_unit)
    }
}

/// Multiply all coordinates by the value of the geometry unit.
pub fn parse_length_unit(length_unit: &str) -> Result<f64> {
    match length_unit {
        "MICRON" => Ok(MICRON),
        "MM" => Ok(MM),
        "CM" => Ok(CM),
        "M" => Ok(1.),
        _ => length_unit.parse().context(format!(
            "Input error: could not parse length unit {}. Use a valid float or one of MICRON, MM, CM, M.",
            length_unit
        )),
    }
}

pub fn vector_from(components: [f64; 3], length_unit: f64) -> Vector {
    Vector::new(components[0]*length_unit, components[1]*length_unit, components[2]*length_unit)
}

impl FieldInput {
    /// Build the uniform-field grid described by this input. The field region
    /// is specified in the geometry length unit.
    pub fn build_grid(&self, length_unit: f64) -> Result<CartesianFieldGrid> {
        let lower = vector_from(self.lower, length_unit);
        let upper = vector_from(self.upper, length_unit);
        let shape = (self.shape[0], self.shape[1], self.shape[2]);

        let x = Array1::linspace(lower.x, upper.x, shape.0);
        let y = Array1::linspace(lower.y, upper.y, shape.1);
        let z = Array1::linspace(lower.z, upper.z, shape.2);

        let fill = |field: &Option<[f64; 3]>, axis: usize| {
            field.map(|components| Array3::from_elem(shape, components[axis]))
        };
        let components = [
            fill(&self.E, 0), fill(&self.E, 1), fill(&self.E, 2),
            fill(&self.B, 0), fill(&self.B, 1), fill(&self.B, 2),
        ];
        Ok(CartesianFieldGrid::new(x, y, z, components)?)
    }
}
