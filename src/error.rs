use thiserror::Error;

/// Errors surfaced by the library.
///
/// Every message is written to stand on its own: it names the flag, the
/// capability, or the clock values involved, because these errors are
/// typically read by an operator debugging a deployment rather than caught
/// and rewrapped.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Malformed SQL template or identifier text.
    #[error("Template error: {0}")]
    Template(String),

    /// Mismatch between a template's markers and the supplied bindings.
    #[error("Binding error: {0}")]
    Binding(String),

    /// The driver lacks an optional capability required by the operation.
    #[error("Capability error: {0}")]
    Capability(String),

    /// An operation was blocked by an unset `Options` flag.
    #[error("Policy error: {0}")]
    Policy(String),

    /// Application and database clocks diverge beyond the error threshold.
    #[error(
        "Clock skew of {skew_ms} ms between database ({database}) and application ({application}); \
         check the time zone configuration on both hosts"
    )]
    ClockSkew {
        /// Database server clock reading.
        database: chrono::NaiveDateTime,
        /// Application clock reading.
        application: chrono::NaiveDateTime,
        /// Absolute difference in milliseconds.
        skew_ms: i64,
    },

    /// The referenced table/sequence does not exist. Drivers raise this
    /// variant for the "does not exist" error class so quiet drops can
    /// distinguish it from permission or connectivity failures.
    #[error("Object does not exist: {0}")]
    ObjectMissing(String),

    /// SQL execution failed in the underlying driver.
    #[error("SQL execution error: {0}")]
    Execution(String),

    /// The underlying connection failed outside of statement execution.
    #[error("Connection error: {0}")]
    Connection(String),
}
