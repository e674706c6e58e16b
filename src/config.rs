//! Widget configuration, read with the [`config`] crate.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `Widget.toml` (or an explicit file), then `WIDGET_*` environment variables.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, WidgetError};
use crate::transport::Credentials;

/// How fetched records are laid out.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// One `last, first` line per record.
    #[default]
    Compact,
    /// First name / last name / email columns.
    Table,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WidgetConfig {
    pub instance_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub table_name: String,
    pub limit: u32,
    pub default_query: String,
    pub initial_name: String,
    pub list_style: ListStyle,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            instance_url: "http://localhost:8080".to_string(),
            username: None,
            password: None,
            table_name: "sys_user".to_string(),
            limit: 10,
            default_query: "first_name=Fred".to_string(),
            initial_name: "ServiceNow User".to_string(),
            list_style: ListStyle::Compact,
        }
    }
}

impl WidgetConfig {
    /// Load from `Widget.toml` in the working directory, if present.
    pub fn load() -> Result<Self> {
        Self::build(config::File::with_name("Widget").required(false))
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("instance_url", defaults.instance_url)?
            .set_default("table_name", defaults.table_name)?
            .set_default("limit", i64::from(defaults.limit))?
            .set_default("default_query", defaults.default_query)?
            .set_default("initial_name", defaults.initial_name)?
            .set_default("list_style", "compact")?
            .add_source(file)
            .add_source(config::Environment::with_prefix("WIDGET"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        tracing::trace!(instance = %config.instance_url, table = %config.table_name, "config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.instance_url).map_err(|err| {
            WidgetError::invalid_config(format!(
                "instance_url '{}' is not a valid URL: {err}",
                self.instance_url
            ))
        })?;
        if self.table_name.trim().is_empty() {
            return Err(WidgetError::invalid_config("table_name must not be empty"));
        }
        Ok(())
    }

    /// Basic-auth credentials, when both parts are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}
