//! Output naming and directory handling module

use std::fs;
use std::path::Path;

use crate::error::SliceResult;

pub mod naming;

pub use naming::NamingScheme;

/// Create the output directory (and any parents) if missing.
///
/// Idempotent: an already-existing directory is not an error. The engine
/// only ever appends new files here; overwrite semantics for individual
/// segment files are delegated to the transcoder.
pub fn ensure_output_dir(dir: &Path) -> SliceResult<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}
