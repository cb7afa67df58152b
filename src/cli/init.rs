//! Write an example settings file.
//!
//! # Examples
//!
//! ```bash
//! recently init                   # ./recently.toml
//! recently init --path ~/project  # ~/project/recently.toml
//! recently init --force           # overwrite an existing file
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::EXAMPLE_SETTINGS;
use crate::constants::LOCAL_CONFIG_FILES;
use crate::utils::fs::atomic_write;

/// Create `recently.toml` with a commented example argument set.
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Directory to create the settings file in (defaults to the current directory)
    #[arg(short, long)]
    pub(crate) path: Option<PathBuf>,

    /// Overwrite an existing settings file
    #[arg(short, long)]
    pub(crate) force: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists and `--force` was not given, or if
    /// it cannot be written.
    pub async fn execute(self) -> Result<()> {
        let target = self.write()?;

        println!("{} Initialized {}", "✓".green(), target.display());
        println!("\n{}", "Next steps:".cyan());
        println!("  Edit the [arguments] sets, then run {}", "recently run".bright_white());
        Ok(())
    }

    fn write(&self) -> Result<PathBuf> {
        let target_dir = self.path.clone().unwrap_or_else(|| PathBuf::from("."));
        let settings_path = target_dir.join(LOCAL_CONFIG_FILES[0]);

        if settings_path.exists() && !self.force {
            return Err(anyhow!(
                "Settings file already exists at {}. Use --force to overwrite",
                settings_path.display()
            ));
        }

        atomic_write(&settings_path, EXAMPLE_SETTINGS.as_bytes())?;
        Ok(settings_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_settings() {
        let temp_dir = TempDir::new().unwrap();
        let cmd = InitCommand {
            path: Some(temp_dir.path().to_path_buf()),
            force: false,
        };

        cmd.execute().await.unwrap();

        let content = fs::read_to_string(temp_dir.path().join("recently.toml")).unwrap();
        assert_eq!(content, EXAMPLE_SETTINGS);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recently.toml");
        fs::write(&path, "# mine\n").unwrap();

        let cmd = InitCommand {
            path: Some(temp_dir.path().to_path_buf()),
            force: false,
        };
        let err = cmd.execute().await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

        let cmd = InitCommand {
            path: Some(temp_dir.path().to_path_buf()),
            force: true,
        };
        cmd.execute().await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), EXAMPLE_SETTINGS);
    }

    #[tokio::test]
    async fn test_init_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let cmd = InitCommand {
            path: Some(nested.clone()),
            force: false,
        };

        cmd.execute().await.unwrap();
        assert!(nested.join("recently.toml").is_file());
    }
}
