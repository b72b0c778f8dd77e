use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::prior::CameraExtrinsicsPrior;

/// Priors keyed by image identifier, usually the image file name.
///
/// Matching keys against view names is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorStore {
    priors: BTreeMap<String, CameraExtrinsicsPrior>,
}

impl PriorStore {
    pub fn new() -> PriorStore {
        Self::default()
    }

    /// Inserts a prior. A duplicate key replaces the earlier one and the
    /// replaced prior is returned.
    pub fn insert(
        &mut self,
        image_id: &str,
        prior: CameraExtrinsicsPrior,
    ) -> Option<CameraExtrinsicsPrior> {
        let old = self.priors.insert(image_id.to_string(), prior);
        if old.is_some() {
            log::warn!("duplicate extrinsics prior for {}, keeping the last one", image_id);
        }
        old
    }

    pub fn get(&self, image_id: &str) -> Option<&CameraExtrinsicsPrior> {
        self.priors.get(image_id)
    }

    pub fn contains(&self, image_id: &str) -> bool {
        self.priors.contains_key(image_id)
    }

    pub fn len(&self) -> usize {
        self.priors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CameraExtrinsicsPrior)> {
        self.priors.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, CameraExtrinsicsPrior)> for PriorStore {
    fn from_iter<I: IntoIterator<Item = (String, CameraExtrinsicsPrior)>>(iter: I) -> Self {
        let mut store = PriorStore::new();
        for (image_id, prior) in iter {
            store.insert(&image_id, prior);
        }
        store
    }
}
