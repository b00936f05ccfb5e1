//! Optional defaults from a `slipway.toml`.
//!
//! Every field is optional; whatever the file does not provide falls
//! through to a prompt or a built-in default. Precedence is
//! flag > file > default.

use snafu::prelude::*;

use crate::{
    ConfigParseSnafu, ConfigReadSnafu, DeployContext, Error, ACCOUNT_ID_PLACEHOLDER,
    DEFAULT_APP_NAME, DEFAULT_PORT, DEFAULT_REGION,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub account_id: Option<String>,
    pub app_name: Option<String>,
    pub port: Option<u16>,
}

impl FileConfig {
    /// Reads the config file if present. A missing file is not an error,
    /// a malformed one is.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config file at {path:?}");
            return Ok(Self::default());
        }
        log::debug!("reading defaults from {path:?}");
        let contents = std::fs::read_to_string(path).context(ConfigReadSnafu {
            path: path.to_path_buf(),
        })?;
        toml::from_str(&contents).context(ConfigParseSnafu {
            path: path.to_path_buf(),
        })
    }
}

/// Context values known ahead of the prompts, from flags or the config
/// file. `None` fields are asked for interactively (region, profile) or
/// filled with built-in defaults (the rest).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub account_id: Option<String>,
    pub app_name: Option<String>,
    pub port: Option<u16>,
}

impl From<FileConfig> for Overrides {
    fn from(file: FileConfig) -> Self {
        Overrides {
            region: file.region,
            profile: file.profile,
            account_id: file.account_id,
            app_name: file.app_name,
            port: file.port,
        }
    }
}

impl Overrides {
    /// Field-wise `or`: `self` wins, `fallback` fills the gaps.
    pub fn or(self, fallback: Overrides) -> Overrides {
        Overrides {
            region: self.region.or(fallback.region),
            profile: self.profile.or(fallback.profile),
            account_id: self.account_id.or(fallback.account_id),
            app_name: self.app_name.or(fallback.app_name),
            port: self.port.or(fallback.port),
        }
    }

    /// Finalizes into a [`DeployContext`], filling remaining gaps with
    /// the built-in defaults.
    pub fn into_context(self) -> DeployContext {
        DeployContext {
            region: self.region.unwrap_or_else(|| DEFAULT_REGION.to_owned()),
            profile: self.profile,
            account_id: self
                .account_id
                .unwrap_or_else(|| ACCOUNT_ID_PLACEHOLDER.to_owned()),
            app_name: self.app_name.unwrap_or_else(|| DEFAULT_APP_NAME.to_owned()),
            port: self.port.unwrap_or(DEFAULT_PORT),
        }
    }
}
