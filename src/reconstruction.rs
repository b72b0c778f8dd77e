use std::collections::BTreeMap;

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::prior::CameraExtrinsicsPrior;

pub type ViewId = u32;

/// Camera pose setters the merge writes through.
pub trait CameraPose {
    fn set_position(&mut self, position: &na::Vector3<f64>);
    /// Takes a row-major rotation matrix as given. No orthonormality check.
    fn set_orientation_from_rotation_matrix(&mut self, rotation: &na::Matrix3<f64>);
}

/// A view owns one camera pose, an estimated flag and a stored prior.
pub trait PriorView {
    type Camera: CameraPose;

    fn name(&self) -> &str;
    fn mutable_camera(&mut self) -> &mut Self::Camera;
    fn is_estimated(&self) -> bool;
    fn set_estimated(&mut self, estimated: bool);
    fn camera_extrinsics_prior(&self) -> &CameraExtrinsicsPrior;
    fn set_camera_extrinsics_prior(&mut self, prior: CameraExtrinsicsPrior);
}

/// Ordered, mutable access to a reconstruction's views.
pub trait ViewCollection {
    type View: PriorView;

    /// View ids in the reconstruction's enumeration order.
    fn view_ids(&self) -> Vec<ViewId>;
    fn view(&self, view_id: ViewId) -> Option<&Self::View>;
    fn mutable_view(&mut self, view_id: ViewId) -> Option<&mut Self::View>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: na::Vector3<f64>,
    /// World-to-camera rotation, stored verbatim.
    pub orientation: na::Matrix3<f64>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: na::Vector3::zeros(),
            orientation: na::Matrix3::identity(),
        }
    }
}

impl Camera {
    /// Angle-axis of the orientation. Meaningful only for proper rotations.
    pub fn rvec(&self) -> na::Vector3<f64> {
        na::Rotation3::from_matrix_unchecked(self.orientation).scaled_axis()
    }
}

impl CameraPose for Camera {
    fn set_position(&mut self, position: &na::Vector3<f64>) {
        self.position = *position;
    }
    fn set_orientation_from_rotation_matrix(&mut self, rotation: &na::Matrix3<f64>) {
        self.orientation = *rotation;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct View {
    name: String,
    camera: Camera,
    estimated: bool,
    extrinsics_prior: CameraExtrinsicsPrior,
}

impl View {
    pub fn new(name: &str) -> View {
        View {
            name: name.to_string(),
            ..Default::default()
        }
    }
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

impl PriorView for View {
    type Camera = Camera;

    fn name(&self) -> &str {
        &self.name
    }
    fn mutable_camera(&mut self) -> &mut Camera {
        &mut self.camera
    }
    fn is_estimated(&self) -> bool {
        self.estimated
    }
    fn set_estimated(&mut self, estimated: bool) {
        self.estimated = estimated;
    }
    fn camera_extrinsics_prior(&self) -> &CameraExtrinsicsPrior {
        &self.extrinsics_prior
    }
    fn set_camera_extrinsics_prior(&mut self, prior: CameraExtrinsicsPrior) {
        self.extrinsics_prior = prior;
    }
}

/// In-memory reconstruction. Views enumerate in ascending id order, which is
/// also insertion order since ids are handed out sequentially.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reconstruction {
    views: BTreeMap<ViewId, View>,
    next_view_id: ViewId,
}

impl Reconstruction {
    pub fn new() -> Reconstruction {
        Self::default()
    }

    pub fn add_view(&mut self, name: &str) -> ViewId {
        let view_id = self.next_view_id;
        self.views.insert(view_id, View::new(name));
        self.next_view_id += 1;
        view_id
    }

    pub fn num_views(&self) -> usize {
        self.views.len()
    }

    /// First view carrying `name`. Duplicate names are not disambiguated.
    pub fn view_id_from_name(&self, name: &str) -> Option<ViewId> {
        self.views
            .iter()
            .find(|(_, v)| v.name == name)
            .map(|(id, _)| *id)
    }
}

impl ViewCollection for Reconstruction {
    type View = View;

    fn view_ids(&self) -> Vec<ViewId> {
        self.views.keys().copied().collect()
    }
    fn view(&self, view_id: ViewId) -> Option<&View> {
        self.views.get(&view_id)
    }
    fn mutable_view(&mut self, view_id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&view_id)
    }
}
