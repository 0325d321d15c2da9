//! Configuration for the accounts module.
//!
//! Layered as: defaults, then the optional YAML file, then `ACCOUNTS__*`
//! environment variables (`ACCOUNTS__DATABASE__URL`, ...).

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::domain::visibility::InactivityPolicy;

pub const ENV_PREFIX: &str = "ACCOUNTS__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountsConfig {
    pub database: DatabaseConfig,
    pub visibility: VisibilityConfig,
    pub logging: LoggingConfig,
}

impl AccountsConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    /// Returns an error if the given file is missing or malformed, or if a
    /// value has the wrong type or an unknown key.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file does not exist: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }
}

/// Store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite://accounts.db?mode=rwc` or `postgres://...`.
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Apply pending migrations right after connecting.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_url() -> String {
    "sqlite://accounts.db?mode=rwc".to_owned()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_run_migrations() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
            run_migrations: default_run_migrations(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Months without login after which a user is flagged inactive.
    #[serde(default = "default_inactivity_months")]
    pub inactivity_months: u8,
}

fn default_inactivity_months() -> u8 {
    InactivityPolicy::default().months
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            inactivity_months: default_inactivity_months(),
        }
    }
}

impl VisibilityConfig {
    #[must_use]
    pub fn policy(&self) -> InactivityPolicy {
        InactivityPolicy {
            months: self.inactivity_months,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `accounts=debug,sea_orm=warn`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

fn default_level() -> String {
    "info".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = AccountsConfig::default();
        assert_eq!(cfg.database.url, "sqlite://accounts.db?mode=rwc");
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.connect_timeout, Duration::from_secs(5));
        assert!(cfg.database.run_migrations);
        assert_eq!(cfg.visibility.inactivity_months, 6);
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.logging.json);
    }

    #[test]
    fn visibility_config_builds_policy() {
        let cfg = VisibilityConfig {
            inactivity_months: 3,
        };
        assert_eq!(cfg.policy(), InactivityPolicy { months: 3 });
    }

    #[test]
    fn load_without_file_yields_defaults() {
        figment::Jail::expect_with(|_jail| {
            let cfg = AccountsConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg, AccountsConfig::default());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "accounts.yaml",
                r#"
database:
  url: "sqlite::memory:"
  connect_timeout: 250ms
visibility:
  inactivity_months: 12
"#,
            )?;
            jail.set_env("ACCOUNTS__VISIBILITY__INACTIVITY_MONTHS", "3");
            jail.set_env("ACCOUNTS__LOGGING__JSON", "true");

            let cfg = AccountsConfig::load(Some(Path::new("accounts.yaml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.database.url, "sqlite::memory:");
            assert_eq!(cfg.database.connect_timeout, Duration::from_millis(250));
            assert_eq!(cfg.database.max_connections, 10);
            assert_eq!(cfg.visibility.inactivity_months, 3);
            assert!(cfg.logging.json);
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("accounts.yaml", "database:\n  uri: oops\n")?;
            assert!(AccountsConfig::load(Some(Path::new("accounts.yaml"))).is_err());
            Ok(())
        });
    }
}
