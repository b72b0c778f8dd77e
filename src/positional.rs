//! Positional-bind ingestion.
//!
//! Records are matched to views purely by order: the n-th record goes to the
//! n-th view id supplied. The identifier in each record is read and dropped.
//!
//! **Precondition:** the caller's view order must match the file's record
//! order exactly. Nothing here checks names, so a mismatch silently assigns
//! poses to the wrong cameras. Use [`crate::io::read_prior_store`] when the
//! file's identifiers should drive the association.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtrinsicsError, Result};
use crate::io::ExtrinsicsReader;
use crate::merge::apply_extrinsics_prior;
use crate::reconstruction::{PriorView, ViewCollection, ViewId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindStatus {
    /// Every view received a record.
    Complete,
    /// The input ended early; `missing` views were left untouched.
    Truncated { missing: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindReport {
    pub applied: usize,
    pub status: BindStatus,
}

impl BindReport {
    pub fn is_complete(&self) -> bool {
        self.status == BindStatus::Complete
    }
    pub fn is_truncated(&self) -> bool {
        matches!(self.status, BindStatus::Truncated { .. })
    }
}

/// Binds records in `text` to `view_ids` by position.
///
/// Fails with [`ExtrinsicsError::CountMismatch`] before touching any view when
/// the declared count differs from `view_ids.len()`, and with
/// [`ExtrinsicsError::UnknownView`] when an id is not in `reconstruction`.
/// Each bound view gets the record's position and rotation and is marked
/// estimated. A malformed record aborts the bind; views bound before it keep
/// their new pose.
pub fn bind_positionally_str<R: ViewCollection>(
    text: &str,
    view_ids: &[ViewId],
    reconstruction: &mut R,
) -> Result<BindReport> {
    let mut reader = ExtrinsicsReader::new(text)?;
    log::info!(
        "positional bind: {} views, {} declared records",
        view_ids.len(),
        reader.declared_count()
    );
    if reader.declared_count() != view_ids.len() {
        log::error!(
            "number of views ({}) and records in the extrinsics file ({}) do not match",
            view_ids.len(),
            reader.declared_count()
        );
        return Err(ExtrinsicsError::CountMismatch {
            declared: reader.declared_count(),
            expected: view_ids.len(),
        });
    }
    if let Some(view_id) = view_ids
        .iter()
        .find(|id| reconstruction.view(**id).is_none())
    {
        return Err(ExtrinsicsError::UnknownView(*view_id));
    }

    let mut applied = 0;
    for &view_id in view_ids {
        let Some((_, prior)) = reader.next_record()? else {
            break;
        };
        let view = reconstruction
            .mutable_view(view_id)
            .ok_or(ExtrinsicsError::UnknownView(view_id))?;
        view.set_estimated(true);
        apply_extrinsics_prior(&prior, view.mutable_camera());
        applied += 1;
    }

    let status = if applied < view_ids.len() {
        let missing = view_ids.len() - applied;
        log::warn!("extrinsics input truncated, {} views left without a prior", missing);
        BindStatus::Truncated { missing }
    } else {
        BindStatus::Complete
    };
    Ok(BindReport { applied, status })
}

/// Reads `stream` to the end and binds it with [`bind_positionally_str`].
pub fn bind_positionally<S: Read, R: ViewCollection>(
    mut stream: S,
    view_ids: &[ViewId],
    reconstruction: &mut R,
) -> Result<BindReport> {
    let mut text = String::new();
    stream.read_to_string(&mut text)?;
    bind_positionally_str(&text, view_ids, reconstruction)
}

/// Binds an extrinsics file to the reconstruction's own view enumeration order.
pub fn read_extrinsics_file<P: AsRef<Path>, R: ViewCollection>(
    extrinsics_file: P,
    reconstruction: &mut R,
) -> Result<BindReport> {
    let path = extrinsics_file.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        log::error!("cannot read the extrinsics file from {}", path.display());
        ExtrinsicsError::Io(e)
    })?;
    let view_ids = reconstruction.view_ids();
    bind_positionally(file, &view_ids, reconstruction)
}
