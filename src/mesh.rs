use super::*;

/// A wire mesh between source and detector, anchored on the propagation axis.
///
/// The wires form a rectangular lattice spaced evenly across the aperture's
/// bounding rectangle, even when the aperture is circular. Blocking is tested
/// against each particle's original straight-line trajectory: meshes sit near
/// the source, where field deflection over that short flight is negligible.
#[derive(Clone, Debug)]
pub struct WireMesh {
    /// Mesh anchor on the propagation axis.
    pub center: Vector,
    /// Mesh plane normal, h x v. Equals the frame normal unless h/v were overridden.
    pub plane_normal: Vector,
    pub horizontal: Vector,
    pub vertical: Vector,
    pub aperture: Aperture,
    pub nwires: WireCount,
    pub wire_diameter: f64,
    /// Wire centerlines parallel to v, positioned along h.
    h_centers: Vec<f64>,
    /// Wire centerlines parallel to h, positioned along v.
    v_centers: Vec<f64>,
}

/// Evenly spaced, centered wire positions across one axis of the bounding rectangle.
fn wire_centers(extent: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![0.];
    }
    let spacing = extent/((count - 1) as f64);
    (0..count).map(|i| -extent/2. + spacing*(i as f64)).collect()
}

impl WireMesh {
    pub fn new(
        frame: &GeometryFrame,
        location: f64,
        aperture: Aperture,
        nwires: WireCount,
        wire_diameter: f64,
        hdir: Option<Vector>,
        vdir: Option<Vector>,
    ) -> Result<WireMesh, TrackerError> {

        if !location.is_finite() | (location < 0.) {
            return Err(ValidationError::Negative{name: "mesh location", value: location}.into());
        }
        if !wire_diameter.is_finite() | (wire_diameter <= 0.) {
            return Err(ValidationError::NonPositive{name: "wire_diameter", value: wire_diameter}.into());
        }
        match aperture {
            Aperture::CIRCULAR{diameter} => {
                if !diameter.is_finite() | (diameter <= 0.) {
                    return Err(ValidationError::NonPositive{name: "aperture diameter", value: diameter}.into());
                }
            }
            Aperture::RECTANGULAR{width, height} => {
                if !width.is_finite() | (width <= 0.) {
                    return Err(ValidationError::NonPositive{name: "aperture width", value: width}.into());
                }
                if !height.is_finite() | (height <= 0.) {
                    return Err(ValidationError::NonPositive{name: "aperture height", value: height}.into());
                }
            }
        }
        let (nh, nv) = nwires.counts();
        if nh == 0 {
            return Err(ValidationError::ZeroCount{name: "nwires along h"}.into());
        }
        if nv == 0 {
            return Err(ValidationError::ZeroCount{name: "nwires along v"}.into());
        }

        //Mesh plane basis follows the frame unless overridden, with the same
        //orthogonalization rules as the frame itself.
        let horizontal = match hdir {
            Some(h) => GeometryFrame::new(frame.source, frame.detector, Some(h), None)?.horizontal,
            None => frame.horizontal,
        };
        let vertical = match vdir {
            Some(v) => GeometryFrame::new(frame.source, frame.detector, None, Some(v))?.vertical,
            None => frame.vertical,
        };
        let plane_normal = horizontal.cross(&vertical).normalized();

        let (width, height) = aperture.bounding_extent();

        Ok(WireMesh {
            center: frame.point_on_axis(location),
            plane_normal,
            horizontal,
            vertical,
            aperture,
            nwires,
            wire_diameter,
            h_centers: wire_centers(width, nh),
            v_centers: wire_centers(height, nv),
        })
    }

    /// Whether the original straight-line trajectory from (position, velocity)
    /// is intercepted by this mesh. Trajectories that never cross the mesh
    /// plane cannot reach the detector either and count as blocked.
    pub fn blocks(&self, position: &Vector, velocity: &Vector) -> bool {
        let approach_speed = velocity.dot(&self.plane_normal);
        if approach_speed <= 0. {
            return true;
        }
        let time = self.center.sub(position).dot(&self.plane_normal)/approach_speed;
        if time < 0. {
            return true;
        }

        let crossing = position.add(&velocity.scale(time));
        let relative = crossing.sub(&self.center);
        let h = relative.dot(&self.horizontal);
        let v = relative.dot(&self.vertical);

        if !self.aperture.contains(h, v) {
            return true;
        }

        let radius = self.wire_diameter/2.;
        let near_h_wire = self.h_centers.iter().any(|&center| (h - center).abs() < radius);
        let near_v_wire = self.v_centers.iter().any(|&center| (v - center).abs() < radius);

        near_h_wire | near_v_wire
    }

    /// Compact an ensemble in place, removing blocked particles; returns the
    /// number removed.
    pub fn filter(&self, particles: &mut Vec<Particle>) -> usize {
        let before = particles.len();
        particles.retain(|particle| !self.blocks(&particle.pos_origin, &particle.vel_origin));
        before - particles.len()
    }
}
