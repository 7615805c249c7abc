//! Browser hand-off for the generated page.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Open `path` in the default browser. Returns `false` when no browser could
/// be launched; the file path is printed so it can be opened by hand.
pub fn open_in_browser(path: &Path) -> bool {
    open_with(path, |target| open::that(target))
}

fn open_with(path: &Path, opener: impl FnOnce(&Path) -> io::Result<()>) -> bool {
    let target = absolute(path);
    match opener(&target) {
        Ok(()) => {
            info!("Opened {} in the default browser", target.display());
            true
        }
        Err(e) => {
            warn!("Could not open a browser: {e}");
            println!("Open this file manually: {}", target.display());
            false
        }
    }
}

/// Open a previously rendered visualization.
pub fn open_existing(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::MissingOutput(path.to_path_buf()));
    }
    open_in_browser(path);
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
