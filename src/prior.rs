use nalgebra as na;
use serde::{Deserialize, Serialize};

/// A scalar that may or may not have been supplied.
///
/// Absence is its own state. A prior of `0.0` is a real value and is never
/// confused with an unset field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prior(Option<f64>);

impl Prior {
    pub fn new(value: f64) -> Prior {
        Prior(Some(value))
    }
    pub fn unset() -> Prior {
        Prior(None)
    }
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
    pub fn value(&self) -> Option<f64> {
        self.0
    }
    pub fn set(&mut self, value: f64) {
        self.0 = Some(value);
    }
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl From<f64> for Prior {
    fn from(value: f64) -> Self {
        Prior::new(value)
    }
}

/// Externally supplied estimate of a camera's pose.
///
/// `position` is (x, y, z). `rotation` holds a 3x3 matrix in row-major order.
/// Any subset of the twelve fields may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraExtrinsicsPrior {
    pub position: [Prior; 3],
    pub rotation: [Prior; 9],
}

impl CameraExtrinsicsPrior {
    /// Builds a prior with every field set.
    pub fn from_pose(position: &na::Vector3<f64>, rotation: &na::Matrix3<f64>) -> Self {
        let mut prior = Self::default();
        prior.set_position(position);
        prior.set_rotation(rotation);
        prior
    }

    pub fn set_position(&mut self, position: &na::Vector3<f64>) {
        for (p, v) in self.position.iter_mut().zip(position.iter()) {
            p.set(*v);
        }
    }

    pub fn set_rotation(&mut self, rotation: &na::Matrix3<f64>) {
        for r in 0..3 {
            for c in 0..3 {
                self.rotation[r * 3 + c].set(rotation[(r, c)]);
            }
        }
    }

    /// The position vector, only when all three components are set.
    pub fn position_vector(&self) -> Option<na::Vector3<f64>> {
        let [x, y, z] = self.position;
        Some(na::Vector3::new(x.value()?, y.value()?, z.value()?))
    }

    /// The rotation matrix, only when all nine entries are set.
    pub fn rotation_matrix(&self) -> Option<na::Matrix3<f64>> {
        let mut row_major = [0.0; 9];
        for (dst, p) in row_major.iter_mut().zip(self.rotation.iter()) {
            *dst = p.value()?;
        }
        Some(na::Matrix3::from_row_slice(&row_major))
    }

    pub fn has_position(&self) -> bool {
        self.position.iter().all(Prior::is_set)
    }

    pub fn has_rotation(&self) -> bool {
        self.rotation.iter().all(Prior::is_set)
    }

    pub fn is_complete(&self) -> bool {
        self.has_position() && self.has_rotation()
    }

    pub fn is_empty(&self) -> bool {
        self.position.iter().chain(self.rotation.iter()).all(|p| !p.is_set())
    }
}
