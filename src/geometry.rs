use super::*;

/// Directions whose projection onto the detector plane is shorter than this
/// are treated as parallel to the propagation axis.
const PARALLEL_TOLERANCE: f64 = 1E-10;

/// Orthonormal projection basis derived from the source and detector positions.
///
/// `normal` always points from source to detector. `horizontal` and `vertical`
/// are unit vectors spanning the detector plane. If both are supplied by the
/// user, `vertical` is orthogonalized only against `normal`, not against
/// `horizontal` - a non-orthogonal {h, v} pair is allowed so the two detector
/// axes can be tilted independently.
#[derive(Clone, Copy, Debug)]
pub struct GeometryFrame {
    pub source: Vector,
    pub detector: Vector,
    pub normal: Vector,
    pub horizontal: Vector,
    pub vertical: Vector,
    pub source_to_detector: f64,
}

impl GeometryFrame {
    pub fn new(source: Vector, detector: Vector, hdir: Option<Vector>, vdir: Option<Vector>) -> Result<GeometryFrame, GeometryError> {

        let axis = detector.sub(&source);
        let source_to_detector = axis.magnitude();
        if source_to_detector == 0. {
            return Err(GeometryError::DegenerateAxis);
        }
        let normal = axis.scale(1./source_to_detector);

        let horizontal = match hdir {
            Some(h) => project_off_axis(h, &normal, "horizontal")?,
            None => {
                //Global x projected onto the detector plane; fall back to global y
                //when the propagation axis is along x.
                let x_ref = Vector::new(1., 0., 0.);
                match project_off_axis(x_ref, &normal, "horizontal") {
                    Ok(h) => h,
                    Err(_) => project_off_axis(Vector::new(0., 1., 0.), &normal, "horizontal")?,
                }
            }
        };

        let vertical = match vdir {
            //User-supplied v is projected off n only, never off h.
            Some(v) => project_off_axis(v, &normal, "vertical")?,
            None => normal.cross(&horizontal).normalized(),
        };

        Ok(GeometryFrame {
            source,
            detector,
            normal,
            horizontal,
            vertical,
            source_to_detector,
        })
    }

    /// Signed distance from a point to the detector plane, along the normal.
    /// Negative on the source side of the plane.
    pub fn detector_plane_distance(&self, point: &Vector) -> f64 {
        point.sub(&self.detector).dot(&self.normal)
    }

    /// In-plane (h, v) coordinates of a point, relative to the detector center.
    pub fn detector_plane_coordinates(&self, point: &Vector) -> (f64, f64) {
        let relative = point.sub(&self.detector);
        (relative.dot(&self.horizontal), relative.dot(&self.vertical))
    }

    /// Point on the propagation axis at the given distance downstream of the source.
    pub fn point_on_axis(&self, distance: f64) -> Vector {
        self.source.add(&self.normal.scale(distance))
    }

    /// Straight-line crossing of the detector plane from (position, velocity),
    /// ignoring all field effects. None if the trajectory never reaches the plane.
    pub fn ballistic_detector_crossing(&self, position: &Vector, velocity: &Vector) -> Option<Vector> {
        let approach_speed = velocity.dot(&self.normal);
        if approach_speed <= 0. {
            return None;
        }
        let time = -self.detector_plane_distance(position)/approach_speed;
        if time < 0. {
            return None;
        }
        Some(position.add(&velocity.scale(time)))
    }
}

/// Project a direction onto the plane orthogonal to the axis and normalize.
fn project_off_axis(direction: Vector, axis: &Vector, name: &'static str) -> Result<Vector, GeometryError> {
    let magnitude = direction.magnitude();
    if magnitude == 0. {
        return Err(GeometryError::ZeroDirection{axis: name});
    }
    let unit = direction.scale(1./magnitude);
    let projected = unit.sub(&axis.scale(unit.dot(axis)));
    if projected.magnitude() < PARALLEL_TOLERANCE {
        return Err(GeometryError::ParallelDirection{axis: name});
    }
    Ok(projected.normalized())
}
