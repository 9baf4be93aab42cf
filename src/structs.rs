use super::*;

/// 3D vector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Vector {
        Vector {
            x,
            y,
            z
        }
    }

    pub fn zero() -> Vector {
        Vector::new(0., 0., 0.)
    }

    /// Calculates vector magnitude.
    pub fn magnitude(&self) -> f64 {
        (self.x*self.x + self.y*self.y + self.z*self.z).sqrt()
    }

    /// Normalizes vector components to magnitude 1.
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        self.x /= magnitude;
        self.y /= magnitude;
        self.z /= magnitude;
    }

    /// Returns a unit vector along this vector.
    pub fn normalized(&self) -> Vector {
        let magnitude = self.magnitude();
        Vector::new(self.x/magnitude, self.y/magnitude, self.z/magnitude)
    }

    /// Add this vector and another and return a new vector.
    pub fn add(&self, other: &Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Subtract another vector from this one and return a new vector.
    pub fn sub(&self, other: &Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Multiply each component by a scalar and return a new vector.
    pub fn scale(&self, scalar: f64) -> Vector {
        Vector::new(self.x*scalar, self.y*scalar, self.z*scalar)
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x*other.x + self.y*other.y + self.z*other.z
    }

    /// Right-handed cross product self x other.
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y*other.z - self.z*other.y,
            self.z*other.x - self.x*other.z,
            self.x*other.y - self.y*other.x,
        )
    }

    /// Linear interpolation between this vector and another at fraction t in [0, 1].
    pub fn lerp(&self, other: &Vector, t: f64) -> Vector {
        Vector::new(
            self.x + (other.x - self.x)*t,
            self.y + (other.y - self.y)*t,
            self.z + (other.z - self.z)*t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() & self.y.is_finite() & self.z.is_finite()
    }
}
