use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::capability::Capability;

/// A SQL dialect/database product identity.
///
/// A flavor carries the dialect-level facts that differ between products:
/// identifier casing in the catalog, sequence-access syntax, and which
/// optional capabilities the product supports at the protocol level.
/// A specific driver version may still degrade below the protocol level;
/// that is the capability probe's job, not the flavor's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Oracle Database
    Oracle,
    /// PostgreSQL
    Postgres,
    /// Microsoft SQL Server
    SqlServer,
    /// Apache Derby
    Derby,
    /// HSQLDB
    Hsql,
    /// Anything else; conservative defaults
    Generic,
}

impl Flavor {
    /// Whether the catalog stores unquoted identifiers in upper case.
    #[must_use]
    pub fn stores_upper_case_identifiers(self) -> bool {
        matches!(self, Flavor::Oracle | Flavor::Derby | Flavor::Hsql)
    }

    /// SQL to read the next value from a sequence.
    #[must_use]
    pub fn sequence_next_value_sql(self, sequence_name: &str) -> String {
        match self {
            Flavor::Oracle => format!("select {sequence_name}.nextval from dual"),
            Flavor::Postgres => format!("select nextval('{sequence_name}')"),
            Flavor::SqlServer | Flavor::Generic => {
                format!("select next value for {sequence_name}")
            }
            Flavor::Derby | Flavor::Hsql => format!("values next value for {sequence_name}"),
        }
    }

    /// SQL to drop a sequence. Derby requires a trailing `restrict`.
    #[must_use]
    pub fn drop_sequence_sql(self, sequence_name: &str) -> String {
        match self {
            Flavor::Derby => format!("drop sequence {sequence_name} restrict"),
            _ => format!("drop sequence {sequence_name}"),
        }
    }

    /// SQL to drop a table.
    #[must_use]
    pub fn drop_table_sql(self, table_name: &str) -> String {
        format!("drop table {table_name}")
    }

    /// SQL returning the database server's current time as one row/column.
    #[must_use]
    pub fn current_time_sql(self) -> &'static str {
        match self {
            Flavor::Oracle => "select systimestamp from dual",
            Flavor::Postgres => "select now()",
            Flavor::SqlServer => "select sysdatetime()",
            Flavor::Derby | Flavor::Hsql => "values current_timestamp",
            Flavor::Generic => "select current_timestamp",
        }
    }

    /// Whether this dialect supports `capability` at the protocol level.
    ///
    /// The generic flavor claims nothing beyond a server clock: with an
    /// unknown product there is no sequence syntax or catalog layout to
    /// rely on.
    #[must_use]
    pub fn protocol_supports(self, capability: Capability) -> bool {
        match capability {
            Capability::ServerClock => true,
            Capability::Sequences | Capability::SchemaIntrospection => {
                !matches!(self, Flavor::Generic)
            }
        }
    }
}
