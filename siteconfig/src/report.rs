//! Redacted snapshot of a resolved configuration.
//!
//! The report is what `config-doctor` prints: everything an operator needs
//! to check a deployment, with the password reduced to a presence flag.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{ConfigWarning, SiteConfig};

/// Database summary with the password replaced by a presence flag.
#[derive(Debug, Clone, Serialize)]
pub struct DbSummary {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password_set: bool,
    pub port: String,
}

/// Point-in-time snapshot of a [`SiteConfig`], safe to print or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub resolved_at: DateTime<Utc>,
    pub debug: bool,
    pub db: DbSummary,
    pub prepend_template_file: String,
    pub append_template_file: String,
    pub warnings: Vec<ConfigWarning>,
}

impl Report {
    /// Snapshot `config` as of now.
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            resolved_at: Utc::now(),
            debug: config.debug,
            db: DbSummary {
                host: config.db.host.clone(),
                name: config.db.name.clone(),
                user: config.db.user.clone(),
                password_set: !config.db.password.is_empty(),
                port: config.db.port.clone(),
            },
            prepend_template_file: config.prepend_template_file.clone(),
            append_template_file: config.append_template_file.clone(),
            warnings: config.warnings(),
        }
    }

    /// Render the report for a terminal.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Site configuration as of {}\n",
            self.resolved_at.to_rfc3339()
        ));
        out.push_str(&format!("  debug:             {}\n", self.debug));
        out.push_str(&format!("  db host:           {}\n", or_not_set(&self.db.host)));
        out.push_str(&format!("  db name:           {}\n", or_not_set(&self.db.name)));
        out.push_str(&format!("  db user:           {}\n", or_not_set(&self.db.user)));
        out.push_str(&format!(
            "  db password:       {}\n",
            if self.db.password_set { "set" } else { "(not set)" }
        ));
        out.push_str(&format!("  db port:           {}\n", or_not_set(&self.db.port)));
        out.push_str(&format!("  prepend template:  {}\n", self.prepend_template_file));
        out.push_str(&format!("  append template:   {}\n", self.append_template_file));

        if self.warnings.is_empty() {
            out.push_str("\nNo warnings.\n");
        } else {
            out.push_str(&format!("\n{} warning(s):\n", self.warnings.len()));
            for warning in &self.warnings {
                out.push_str(&format!("  {}\n", warning));
            }
        }
        out
    }
}

fn or_not_set(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}
