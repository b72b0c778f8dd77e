use camera_extrinsics_prior::{CameraExtrinsicsPrior, Prior};
use nalgebra as na;

#[test]
fn test_zero_is_not_unset() {
    let zero = Prior::new(0.0);
    assert!(zero.is_set());
    assert_eq!(zero.value(), Some(0.0));
    assert!(!Prior::unset().is_set());
    assert_ne!(zero, Prior::default());
}

#[test]
fn test_default_prior_is_empty() {
    let prior = CameraExtrinsicsPrior::default();
    assert!(prior.is_empty());
    assert!(prior.position_vector().is_none());
    assert!(prior.rotation_matrix().is_none());
}

#[test]
fn test_partial_rotation_has_no_matrix() {
    let mut prior = CameraExtrinsicsPrior::default();
    for p in prior.rotation.iter_mut().take(8) {
        p.set(1.0);
    }
    assert!(!prior.has_rotation());
    assert!(prior.rotation_matrix().is_none());

    prior.rotation[8].set(1.0);
    assert!(prior.has_rotation());
    assert!(!prior.is_complete());
}

#[test]
fn test_from_pose_is_row_major() {
    let r = na::Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
    let prior = CameraExtrinsicsPrior::from_pose(&na::Vector3::new(0.1, 0.2, 0.3), &r);
    assert!(prior.is_complete());
    let values: Vec<f64> = prior.rotation.iter().filter_map(|p| p.value()).collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    assert_eq!(prior.rotation_matrix(), Some(r));
}

#[test]
fn test_prior_json_uses_null_for_unset() {
    let mut prior = CameraExtrinsicsPrior::default();
    prior.position[0] = Prior::new(1.5);
    let j = serde_json::to_value(prior).unwrap();
    assert_eq!(j["position"][0], serde_json::json!(1.5));
    assert!(j["position"][1].is_null());
    let back: CameraExtrinsicsPrior = serde_json::from_value(j).unwrap();
    assert_eq!(back, prior);
}
