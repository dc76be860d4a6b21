//! Host configuration loaded with figment
//!
//! Sources are merged in precedence order (later sources override earlier
//! ones):
//! 1. Built-in defaults
//! 2. One configuration file: the `--config` path, or the first of
//!    `inplace.toml`, `inplace.yaml`, `inplace.yml`, `inplace.json` found in
//!    the working directory
//! 3. `INPLACE_` environment variables, `__` separating nested keys
//!    (`INPLACE_ROUTES__MOUNT=/admin`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use inplace_fields::{ConventionalRouter, CurrencyFormat, FormatterRegistry, InPlaceContext};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{CliError, Result};
use crate::logging::Pretty;

/// File names probed during discovery, in priority order
const CONFIG_FILES: &[&str] = &["inplace.toml", "inplace.yaml", "inplace.yml", "inplace.json"];

/// Environment prefix for overrides
const ENV_PREFIX: &str = "INPLACE_";

/// Route-mapping settings for the conventional router
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path prefix prepended to every generated url
    pub mount: String,
    /// Controllers route mappings may name; empty accepts any
    pub controllers: Vec<String>,
}

/// Everything the host needs to build an [`InPlaceContext`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub routes: RoutesConfig,
    pub currency: CurrencyFormat,
}

impl HostConfig {
    /// Load from the current directory, honoring an explicit file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|source| CliError::Read {
            path: PathBuf::from("."),
            source,
        })?;
        Self::load_from(&cwd, explicit)
    }

    /// Load with `dir` as the discovery root.
    pub fn load_from(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(HostConfig::default()));

        let file = match explicit {
            Some(path) if !path.exists() => {
                return Err(CliError::ConfigNotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => discover(dir),
        };
        if let Some(path) = file {
            trace!("Loading config file: {}", path.display());
            figment = figment.merge(file_provider(&path)?);
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: HostConfig = figment.extract()?;
        debug!("host configuration: {}", Pretty(&config));
        Ok(config)
    }

    pub fn router(&self) -> ConventionalRouter {
        ConventionalRouter::new()
            .with_mount(self.routes.mount.clone())
            .with_controllers(self.routes.controllers.iter().cloned())
    }

    pub fn formatters(&self) -> FormatterRegistry {
        FormatterRegistry::with_currency(self.currency.clone())
    }

    /// Context wired with this configuration's router and formatters.
    pub fn context(&self) -> InPlaceContext {
        InPlaceContext::builder()
            .with_router(self.router())
            .with_formatters(self.formatters())
            .build()
    }
}

fn discover(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn file_provider(path: &Path) -> Result<Figment> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(CliError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
