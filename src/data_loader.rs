use std::path::PathBuf;

use glob::glob;

use crate::error::{ExtrinsicsError, Result};
use crate::reconstruction::Reconstruction;

fn img_filter(rp: glob::GlobResult) -> Option<PathBuf> {
    if let Ok(p) = rp {
        let lower = p.as_os_str().to_string_lossy().to_lowercase();
        for ext in &[".png", ".jpg", ".jpeg"] {
            if lower.ends_with(ext) {
                return Some(p);
            }
        }
    }
    None
}

/// Builds a reconstruction with one view per image matched by `pattern`.
///
/// Paths are sorted before views are added, so the view enumeration order is
/// the lexicographic path order. Each view is named after its file name.
pub fn reconstruction_from_glob(pattern: &str) -> Result<Reconstruction> {
    let img_paths = glob(pattern).map_err(|e| {
        ExtrinsicsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    })?;
    let mut sorted_path: Vec<PathBuf> = img_paths.into_iter().filter_map(img_filter).collect();
    sorted_path.sort();
    log::trace!("{} images match {}", sorted_path.len(), pattern);

    let mut reconstruction = Reconstruction::new();
    for path in &sorted_path {
        if let Some(name) = path.file_name() {
            reconstruction.add_view(&name.to_string_lossy());
        }
    }
    Ok(reconstruction)
}
