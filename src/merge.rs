use serde::Serialize;

use crate::prior::CameraExtrinsicsPrior;
use crate::reconstruction::{CameraPose, PriorView, ViewCollection};
use crate::store::PriorStore;

/// Which parts of a pose a merge wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub position_written: bool,
    pub rotation_written: bool,
}

impl MergeOutcome {
    pub fn any(&self) -> bool {
        self.position_written || self.rotation_written
    }
}

/// Writes the fully present parts of `prior` into `camera`.
///
/// The position is written only when x, y and z are all set, and the rotation
/// only when all nine entries are set. The two are independent. Rotation
/// entries go to the camera as a row-major matrix without any normalization.
pub fn apply_extrinsics_prior<C: CameraPose + ?Sized>(
    prior: &CameraExtrinsicsPrior,
    camera: &mut C,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    if let Some(position) = prior.position_vector() {
        camera.set_position(&position);
        outcome.position_written = true;
    }
    if let Some(rotation) = prior.rotation_matrix() {
        camera.set_orientation_from_rotation_matrix(&rotation);
        outcome.rotation_written = true;
    }
    outcome
}

/// Merges the view's own stored prior into its camera.
pub fn set_view_extrinsics_from_prior<V: PriorView>(view: &mut V) -> MergeOutcome {
    let prior = *view.camera_extrinsics_prior();
    apply_extrinsics_prior(&prior, view.mutable_camera())
}

/// Runs [`set_view_extrinsics_from_prior`] on every view in enumeration order.
///
/// Returns how many views had at least one part of their pose written.
pub fn set_extrinsics_from_priors<R: ViewCollection>(reconstruction: &mut R) -> usize {
    let mut updated = 0;
    for view_id in reconstruction.view_ids() {
        let Some(view) = reconstruction.mutable_view(view_id) else {
            continue;
        };
        let outcome = set_view_extrinsics_from_prior(view);
        log::debug!("view {} ({}): {:?}", view_id, view.name(), outcome);
        if outcome.any() {
            updated += 1;
        }
    }
    updated
}

/// Result of a name-keyed merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameMergeReport {
    /// Views whose name has an entry in the store.
    pub matched: usize,
    /// Matched views whose pose had at least one part written.
    pub updated: usize,
    /// Names of views with no entry in the store, in enumeration order.
    pub unmatched: Vec<String>,
}

/// Stores each view's prior from `store` by view name and merges it.
///
/// Views without an entry keep their stored prior and pose. With
/// `mark_estimated`, a view is flagged estimated only when the merge
/// actually wrote to its pose.
pub fn merge_store_by_name<R: ViewCollection>(
    store: &PriorStore,
    reconstruction: &mut R,
    mark_estimated: bool,
) -> NameMergeReport {
    let mut report = NameMergeReport::default();
    for view_id in reconstruction.view_ids() {
        let Some(view) = reconstruction.mutable_view(view_id) else {
            continue;
        };
        let Some(prior) = store.get(view.name()) else {
            log::debug!("no prior for {}", view.name());
            report.unmatched.push(view.name().to_string());
            continue;
        };
        report.matched += 1;
        view.set_camera_extrinsics_prior(*prior);
        let outcome = set_view_extrinsics_from_prior(view);
        if outcome.any() {
            report.updated += 1;
            if mark_estimated {
                view.set_estimated(true);
            }
        } else {
            log::warn!("prior for {} has no complete position or rotation", view.name());
        }
    }
    report
}
