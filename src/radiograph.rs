use super::*;

/// Synthetic radiograph: bin edges along the detector h and v axes and the
/// particle-count matrix, row-major over (h-bin, v-bin).
#[derive(Serialize, Clone, Debug)]
pub struct Radiograph {
    pub h_edges: Array1<f64>,
    pub v_edges: Array1<f64>,
    pub intensity: Array2<f64>,
}

impl Radiograph {
    pub fn total_counts(&self) -> f64 {
        self.intensity.sum()
    }
}

/// Project every terminated particle into detector-plane (h, v) coordinates
/// and bin into a 2D histogram over h in [-size.0, size.0], v in
/// [-size.1, size.1].
///
/// With `ignore_grid`, positions are recomputed by pure ballistic propagation
/// from each surviving particle's initial state, which images the bare source
/// profile for comparison against the deflected radiograph.
pub fn synthetic_radiograph<G: FieldGrid>(
    tracker: &Tracker<G>,
    size: (f64, f64),
    bins: (usize, usize),
    ignore_grid: bool,
) -> Result<Radiograph, TrackerError> {

    if !tracker.has_run {
        return Err(StateError::NotRun.into());
    }
    if (bins.0 == 0) | (bins.1 == 0) {
        return Err(ValidationError::ZeroCount{name: "bins"}.into());
    }
    if !size.0.is_finite() | (size.0 <= 0.) {
        return Err(ValidationError::NonPositive{name: "size (h)", value: size.0}.into());
    }
    if !size.1.is_finite() | (size.1 <= 0.) {
        return Err(ValidationError::NonPositive{name: "size (v)", value: size.1}.into());
    }

    let h_edges = Array1::linspace(-size.0, size.0, bins.0 + 1);
    let v_edges = Array1::linspace(-size.1, size.1, bins.1 + 1);
    let mut intensity = Array2::<f64>::zeros(bins);

    let delta_h = 2.*size.0/(bins.0 as f64);
    let delta_v = 2.*size.1/(bins.1 as f64);

    let mut survivors = 0usize;
    for particle in tracker.terminated_particles() {
        let position = if ignore_grid {
            match tracker.frame.ballistic_detector_crossing(&particle.pos_origin, &particle.vel_origin) {
                Some(crossing) => crossing,
                None => continue,
            }
        } else {
            particle.pos
        };
        survivors += 1;

        let (h, v) = tracker.frame.detector_plane_coordinates(&position);
        let h_index = ((h + size.0)/delta_h).floor() as i64;
        let v_index = ((v + size.1)/delta_v).floor() as i64;

        let inside_h = (h_index >= 0) & (h_index < bins.0 as i64);
        let inside_v = (v_index >= 0) & (v_index < bins.1 as i64);
        if inside_h & inside_v {
            intensity[[h_index as usize, v_index as usize]] += 1.;
        }
    }

    if survivors == 0 {
        warn!("no particles survived to the detector plane; radiograph is all zeros");
    }

    Ok(Radiograph {
        h_edges,
        v_edges,
        intensity,
    })
}
