//! Opening and revealing files with the platform's native tools.

use std::path::Path;

use crate::OpsError;

/// Open a file with the system's default application, detached from the
/// calling process.
pub fn open_file(path: &Path) -> Result<(), OpsError> {
    open::that_detached(path)?;
    Ok(())
}

/// Reveal a file in the system file manager, selecting it where the
/// platform supports selection.
pub fn reveal_in_file_manager(path: &Path) -> Result<(), OpsError> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg("-R").arg(path).spawn()?;
        Ok(())
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer")
            .arg(format!("/select,{}", path.display()))
            .spawn()?;
        Ok(())
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        // Most Linux file managers cannot select a single file, so open
        // the containing directory instead.
        let parent = path.parent().unwrap_or(path);
        open::that_detached(parent)?;
        Ok(())
    }

    #[cfg(not(any(unix, target_os = "windows")))]
    {
        let _ = path;
        Err(OpsError::UnsupportedPlatform)
    }
}
