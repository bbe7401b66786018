//! Opening the output folder for the operator.

use std::io;
use std::path::Path;
use std::process::Command;

/// Shows a folder to the operator.
pub trait FolderRevealer {
    fn reveal(&self, dir: &Path) -> io::Result<()>;
}

/// Opens the folder with the platform file manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRevealer;

impl SystemRevealer {
    fn program() -> &'static str {
        if cfg!(target_os = "windows") {
            "explorer"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        }
    }
}

impl FolderRevealer for SystemRevealer {
    fn reveal(&self, dir: &Path) -> io::Result<()> {
        // explorer exits non-zero even on success, so only spawning is checked
        Command::new(Self::program()).arg(dir).spawn().map(|_| ())
    }
}
