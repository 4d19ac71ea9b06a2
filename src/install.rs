//! Makes `utoob` runnable from any directory by linking the current
//! executable into the user's bin directory.

use anyhow::{Context, Result, anyhow};
use directories::BaseDirs;
use std::{
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

pub const COMMAND_NAME: &str = "utoob";

/// `$XDG_BIN_HOME` / `~/.local/bin` where the platform knows it, otherwise
/// `~/.local/bin` under the home directory.
pub fn user_bin_dir() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not determine a home directory"))?;
    Ok(dirs
        .executable_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs.home_dir().join(".local").join("bin")))
}

pub fn install_globally() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    let bin_dir = user_bin_dir()?;
    let target = install_to(&exe, &bin_dir)?;

    println!("Installed globally to: {}", target.display());
    println!("You can now run '{COMMAND_NAME}' from anywhere!");
    let path_var = env::var_os("PATH").unwrap_or_default();
    let shell = env::var("SHELL").unwrap_or_default();
    if let Some(advice) = path_advice(&bin_dir, &path_var, &shell) {
        println!("\n{advice}");
    }
    Ok(target)
}

/// Links (or, off unix, copies) `exe` to `<bin_dir>/utoob`, replacing
/// whatever was there before.
pub fn install_to(exe: &Path, bin_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(bin_dir).with_context(|| format!("Creating {}", bin_dir.display()))?;
    let target = bin_dir.join(COMMAND_NAME);

    if fs::symlink_metadata(&target).is_ok() {
        fs::remove_file(&target).with_context(|| format!("Removing {}", target.display()))?;
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(exe, &target).with_context(|| {
            format!("Linking {} -> {}", target.display(), exe.display())
        })?;
    }
    #[cfg(not(unix))]
    {
        fs::copy(exe, &target)
            .with_context(|| format!("Copying {} -> {}", exe.display(), target.display()))?;
    }

    tracing::info!(link = %target.display(), exe = %exe.display(), "installed command");
    Ok(target)
}

/// Shell-specific hint when `bin_dir` is missing from `PATH`.
pub fn path_advice(bin_dir: &Path, path_var: &OsStr, shell: &str) -> Option<String> {
    if env::split_paths(path_var).any(|entry| entry == bin_dir) {
        return None;
    }
    let rc_file = if shell.contains("zsh") {
        "~/.zshrc"
    } else {
        "~/.bashrc"
    };
    Some(format!(
        "Note: {} is not on your PATH. Add this to your {rc_file}:\n    export PATH=\"{}:$PATH\"\nThen run: source {rc_file}",
        bin_dir.display(),
        bin_dir.display(),
    ))
}
