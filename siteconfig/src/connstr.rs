//! Azure App Service connection-string extraction.
//!
//! With MySQL in-app enabled, App Service advertises the database through
//! environment variables: the connection string appears under a name
//! prefixed with `MYSQLCONNSTR_localdb`, and the port separately under
//! `WEBSITE_MYSQL_PORT`.

/// Name prefix of the environment variable carrying the connection string.
pub const CONNSTR_PREFIX: &str = "MYSQLCONNSTR_localdb";

/// Name of the environment variable carrying the database port.
pub const PORT_VAR: &str = "WEBSITE_MYSQL_PORT";

/// Connection parameters in the wire format of a `MYSQLCONNSTR_*` value.
///
/// Field names mirror the recognized keys of the format. Every field
/// defaults to the empty string; parsing cannot fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionString {
    pub data_source: String,
    pub database: String,
    pub user_id: String,
    pub password: String,
}

impl ConnectionString {
    /// Parse a semicolon-delimited `key=value` connection string.
    ///
    /// The value is split on `;` and each segment at its first `=`, so
    /// values may themselves contain `=`. Keys match exactly (case-sensitive,
    /// no trimming); segments without `=` or with an unrecognized key are
    /// skipped, and a repeated key keeps its last value. Values containing
    /// `;` are not representable in this format.
    pub fn parse(value: &str) -> Self {
        let mut conn = Self::default();
        for segment in value.split(';') {
            if let Some((key, val)) = segment.split_once('=') {
                match key {
                    "Data Source" => conn.data_source = val.to_string(),
                    "Database" => conn.database = val.to_string(),
                    "User Id" => conn.user_id = val.to_string(),
                    "Password" => conn.password = val.to_string(),
                    _ => {}
                }
            }
        }
        conn
    }
}

/// What a scan of an environment snapshot found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Name of the matched connection-string variable, if one was found.
    pub variable: Option<String>,
    /// Parsed connection string; all fields empty when nothing matched.
    pub connection: ConnectionString,
    /// Value of [`PORT_VAR`]; empty when the variable is unset.
    pub port: String,
}

/// Scan environment `(name, value)` pairs for the database settings.
///
/// The first name starting with [`CONNSTR_PREFIX`] supplies the connection
/// string and the first occurrence of [`PORT_VAR`] supplies the port, in a
/// single pass over the input. Absent variables leave the corresponding
/// fields empty; nothing here can fail.
pub fn extract<I, K, V>(vars: I) -> Extraction
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut variable = None;
    let mut raw = None;
    let mut port = None;

    for (name, value) in vars {
        let name = name.as_ref();
        if raw.is_none() && name.starts_with(CONNSTR_PREFIX) {
            variable = Some(name.to_string());
            raw = Some(value.as_ref().to_string());
        } else if port.is_none() && name == PORT_VAR {
            port = Some(value.as_ref().to_string());
        }
        if raw.is_some() && port.is_some() {
            break;
        }
    }

    Extraction {
        variable,
        connection: raw
            .map(|value| ConnectionString::parse(&value))
            .unwrap_or_default(),
        port: port.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "Data Source=tcp:myhost;Database=mydb;User Id=admin;Password=secret";

    #[test]
    fn test_parse_canonical() {
        let conn = ConnectionString::parse(CANONICAL);
        assert_eq!(conn.data_source, "tcp:myhost");
        assert_eq!(conn.database, "mydb");
        assert_eq!(conn.user_id, "admin");
        assert_eq!(conn.password, "secret");
    }

    #[test]
    fn test_parse_is_order_independent() {
        let reordered = "Password=secret;User Id=admin;Data Source=tcp:myhost;Database=mydb";
        assert_eq!(ConnectionString::parse(reordered), ConnectionString::parse(CANONICAL));
    }

    #[test]
    fn test_parse_missing_database_segment() {
        let conn = ConnectionString::parse("Data Source=tcp:myhost;User Id=admin;Password=secret");
        assert_eq!(conn.database, "");
        assert_eq!(conn.data_source, "tcp:myhost");
        assert_eq!(conn.user_id, "admin");
        assert_eq!(conn.password, "secret");
    }

    #[test]
    fn test_parse_garbage_yields_empty_fields() {
        assert_eq!(ConnectionString::parse(""), ConnectionString::default());
        assert_eq!(ConnectionString::parse("not a connection string"), ConnectionString::default());
        assert_eq!(ConnectionString::parse(";;;"), ConnectionString::default());
    }

    #[test]
    fn test_parse_single_field_without_terminator() {
        let conn = ConnectionString::parse("Database=mydb");
        assert_eq!(conn.database, "mydb");
        assert_eq!(conn.data_source, "");
    }

    #[test]
    fn test_parse_value_may_contain_equals() {
        let conn = ConnectionString::parse("Database=mydb;Password=c2VjcmV0==");
        assert_eq!(conn.password, "c2VjcmV0==");
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let conn = ConnectionString::parse("Database=first;Database=second");
        assert_eq!(conn.database, "second");
    }

    #[test]
    fn test_parse_keys_match_exactly() {
        // Wrong case, padding, or a key embedded in a longer token is skipped.
        let conn = ConnectionString::parse("database=x;Data Source =x; User Id=x;MyPassword=x");
        assert_eq!(conn, ConnectionString::default());
    }

    #[test]
    fn test_extract_nothing_matches() {
        let vars = [("PATH", "/usr/bin"), ("HOME", "/home/site")];
        assert_eq!(extract(vars), Extraction::default());
    }

    #[test]
    fn test_extract_first_matching_variable_wins() {
        let vars = [
            ("MYSQLCONNSTR_localdb_A", "Database=first"),
            ("MYSQLCONNSTR_localdb_B", "Database=second"),
        ];
        let found = extract(vars);
        assert_eq!(found.variable.as_deref(), Some("MYSQLCONNSTR_localdb_A"));
        assert_eq!(found.connection.database, "first");
    }

    #[test]
    fn test_extract_first_port_occurrence_wins() {
        let vars = [("WEBSITE_MYSQL_PORT", "55117"), ("WEBSITE_MYSQL_PORT", "3306")];
        assert_eq!(extract(vars).port, "55117");
    }

    #[test]
    fn test_extract_prefix_rules() {
        // A prefix match anywhere but the start does not count, nor does a
        // different MYSQLCONNSTR_ name; the bare prefix itself does.
        let no_match = [
            ("XMYSQLCONNSTR_localdb", CANONICAL),
            ("MYSQLCONNSTR_otherdb", CANONICAL),
        ];
        assert_eq!(extract(no_match).variable, None);

        let bare = [("MYSQLCONNSTR_localdb", CANONICAL)];
        let found = extract(bare);
        assert_eq!(found.variable.as_deref(), Some("MYSQLCONNSTR_localdb"));
        assert_eq!(found.connection.data_source, "tcp:myhost");
    }

    #[test]
    fn test_extract_port_is_independent_of_connection_string() {
        let port_only = [("WEBSITE_MYSQL_PORT", "55117")];
        let found = extract(port_only);
        assert_eq!(found.port, "55117");
        assert_eq!(found.variable, None);
        assert_eq!(found.connection, ConnectionString::default());

        let connstr_only = [("MYSQLCONNSTR_localdb", CANONICAL)];
        assert_eq!(extract(connstr_only).port, "");
    }

    #[test]
    fn test_extract_finds_both_in_one_pass() {
        let vars = [
            ("HOME", "/home/site"),
            ("WEBSITE_MYSQL_PORT", "55117"),
            ("PATH", "/usr/bin"),
            ("MYSQLCONNSTR_localdb", CANONICAL),
        ];
        let found = extract(vars);
        assert_eq!(found.port, "55117");
        assert_eq!(found.connection.database, "mydb");
    }
}
