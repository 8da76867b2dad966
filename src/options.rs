use serde::Deserialize;

/// Session-scoped policy flags gating unsafe or leaky operations.
///
/// Constructed once per [`Database`](crate::Database) session, immutable
/// thereafter, and consulted by the lifecycle gate on every guarded call.
/// Everything defaults to off; the unsafe paths are discoverable but never
/// accidental.
/// ```rust
/// use sql_flavor::prelude::*;
///
/// let options = Options::default()
///     .with_allow_manual_transaction_control(true)
///     .with_sql_parameter_logging(true);
/// assert!(options.allow_manual_transaction_control);
/// assert!(!options.allow_connection_access);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Permit [`Database::underlying_driver`](crate::Database::underlying_driver).
    pub allow_connection_access: bool,
    /// Permit [`Database::commit_now`](crate::Database::commit_now) and
    /// [`Database::rollback_now`](crate::Database::rollback_now).
    pub allow_manual_transaction_control: bool,
    /// Log bound parameter values at debug level before execution.
    pub sql_parameter_logging: bool,
    /// Include SQL text in execution error messages. Off by default so
    /// query text does not leak into operator-facing logs.
    pub sql_in_exception_messages: bool,
}

impl Options {
    #[must_use]
    pub fn with_allow_connection_access(mut self, allow: bool) -> Self {
        self.allow_connection_access = allow;
        self
    }

    #[must_use]
    pub fn with_allow_manual_transaction_control(mut self, allow: bool) -> Self {
        self.allow_manual_transaction_control = allow;
        self
    }

    #[must_use]
    pub fn with_sql_parameter_logging(mut self, enabled: bool) -> Self {
        self.sql_parameter_logging = enabled;
        self
    }

    #[must_use]
    pub fn with_sql_in_exception_messages(mut self, enabled: bool) -> Self {
        self.sql_in_exception_messages = enabled;
        self
    }
}
