//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["pointing.toml", ".pointing.toml"];

/// Environment prefix; sections are separated by `__`
const ENV_PREFIX: &str = "POINTING_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `POINTING_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./pointing.toml` or `./.pointing.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/pointing-quorum/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut files = Vec::new();
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                files.push(global_path);
            }
        }
        if let Some(project_path) = Self::project_config_path() {
            files.push(project_path);
        }
        if let Some(path) = config_path {
            files.push(path.clone());
        }

        Self::figment(&files)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only the given files over the defaults, lowest priority first
    pub fn load_files(files: &[PathBuf]) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(files).extract().map_err(Box::new)
    }

    fn figment(files: &[PathBuf]) -> Figment {
        files.iter().fold(
            Figment::new().merge(Serialized::defaults(FileConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/pointing-quorum/config.toml if set,
    /// otherwise falls back to ~/.config/pointing-quorum/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pointing-quorum").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./pointing.toml or ./.pointing.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
