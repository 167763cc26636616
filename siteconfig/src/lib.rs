//! Site configuration bootstrap.
//!
//! Resolves the site's configuration from the hosting environment at process
//! start: the debug flag, the MySQL connection parameters Azure App Service
//! advertises for its in-app database, and the template files wrapped around
//! page rendering. Resolution never fails: anything the environment does not
//! provide stays an empty string, and validation belongs to the consuming
//! runtime.

pub mod config;
pub mod connstr;
pub mod report;

pub use config::{ConfigWarning, DatabaseConfig, SiteConfig};
pub use connstr::{ConnectionString, Extraction};
pub use report::{DbSummary, Report};
