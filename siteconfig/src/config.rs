//! Site configuration assembled from the hosting environment.

use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, warn};

use crate::connstr;

/// Process-wide configuration cell, filled once and immutable afterwards.
static SITE_CONFIG: OnceLock<SiteConfig> = OnceLock::new();

/// Template file loaded before each page's template file.
pub const PREPEND_TEMPLATE_FILE: &str = "_init.php";

/// Template file loaded after each page's template file.
pub const APPEND_TEMPLATE_FILE: &str = "_main.php";

/// Database connection parameters for the MySQL in-app instance.
///
/// An empty field means the environment did not provide it; the record is
/// always well-formed and absence is never an error here. The consuming
/// runtime owns validation. Does not implement `Serialize`; the exportable
/// view is [`Report`](crate::report::Report).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database host, e.g. `tcp:127.0.0.1`.
    pub host: String,
    /// Database name.
    pub name: String,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: String,
    /// Database port, sourced from `WEBSITE_MYSQL_PORT`.
    pub port: String,
}

// The password stays out of debug output.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field(
                "password",
                &if self.password.is_empty() { "" } else { "<redacted>" },
            )
            .field("port", &self.port)
            .finish()
    }
}

/// A diagnostic finding about a resolved configuration.
///
/// Warnings are informational only; an incomplete database configuration is
/// still a well-formed configuration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the affected field, e.g. `db.host`.
    pub field: String,
    /// What is missing.
    pub message: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.field, self.message)
    }
}

/// Resolved site configuration.
///
/// Built once at process start and handed to the consuming runtime, either
/// owned or through the process-wide cell ([`SiteConfig::global`] /
/// [`SiteConfig::install`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Debug mode; surfaces additional diagnostics in the consuming runtime.
    /// Keep this off for live sites.
    pub debug: bool,
    /// Database connection parameters.
    pub db: DatabaseConfig,
    /// Template file loaded before each page's template file.
    pub prepend_template_file: String,
    /// Template file loaded after each page's template file.
    pub append_template_file: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            debug: false,
            db: DatabaseConfig::default(),
            prepend_template_file: PREPEND_TEMPLATE_FILE.to_string(),
            append_template_file: APPEND_TEMPLATE_FILE.to_string(),
        }
    }
}

impl SiteConfig {
    /// Resolve the configuration from environment `(name, value)` pairs.
    ///
    /// A pure transform: one pass over the input, no I/O, and no failure
    /// path, since absent or malformed variables degrade to empty fields.
    /// Resolving the same snapshot twice yields equal configurations.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let found = connstr::extract(vars);

        match &found.variable {
            Some(name) => debug!("Using connection string from {}", name),
            None => warn!(
                "No {}* variable in the environment; database configuration is empty",
                connstr::CONNSTR_PREFIX
            ),
        }

        let db = DatabaseConfig {
            host: found.connection.data_source,
            name: found.connection.database,
            user: found.connection.user_id,
            password: found.connection.password,
            port: found.port,
        };
        debug!(
            "Resolved database configuration: host={}, name={}, user={}, port={}",
            db.host, db.name, db.user, db.port
        );

        Self {
            db,
            ..Self::default()
        }
    }

    /// Resolve the configuration from the current process environment.
    ///
    /// `std::env::vars()` yields variables in an implementation-defined
    /// order, so if several `MYSQLCONNSTR_localdb*` variables are set the
    /// one that wins is unspecified.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Process-wide configuration, resolved from the environment on first
    /// use and cached for the lifetime of the process.
    pub fn global() -> &'static SiteConfig {
        SITE_CONFIG.get_or_init(Self::from_env)
    }

    /// Install this configuration as the process-wide one.
    ///
    /// Lets the startup path adjust fields (typically `debug`) before the
    /// configuration freezes. The first installation wins; the cached
    /// configuration is returned either way.
    pub fn install(self) -> &'static SiteConfig {
        SITE_CONFIG.get_or_init(|| self)
    }

    /// List the database fields the environment left empty.
    ///
    /// Informational only; this exists so operators can see at a glance
    /// what a deployment is missing.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let from_connstr = [
            ("db.host", &self.db.host),
            ("db.name", &self.db.name),
            ("db.user", &self.db.user),
            ("db.password", &self.db.password),
        ];
        for (field, value) in from_connstr {
            if value.is_empty() {
                warnings.push(ConfigWarning {
                    field: field.to_string(),
                    message: "missing from the connection string".to_string(),
                });
            }
        }

        if self.db.port.is_empty() {
            warnings.push(ConfigWarning {
                field: "db.port".to_string(),
                message: format!("{} is not set", connstr::PORT_VAR),
            });
        }

        warnings
    }
}
