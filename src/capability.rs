use std::collections::HashMap;
use std::sync::Mutex;

/// Optional driver-level features.
///
/// A closed set: flavors declare what the product supports at the protocol
/// level, and the probe checks whether the concrete driver actually
/// provides it (two driver versions of the same flavor may differ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Catalog metadata queries (current schema, table lookup).
    SchemaIntrospection,
    /// Sequence objects and next-value access.
    Sequences,
    /// Reading the database server's clock.
    ServerClock,
}

impl Capability {
    /// Short human-readable label used in error messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Capability::SchemaIntrospection => "schema introspection",
            Capability::Sequences => "sequences",
            Capability::ServerClock => "server clock access",
        }
    }
}

/// Session-owned cache of probe outcomes keyed by (driver class, capability).
///
/// Owned by the session, not global, so two drivers active in one process
/// never see each other's probe results. Absence of a capability is a
/// normal outcome, never an error.
#[derive(Debug, Default)]
pub struct CapabilityCache {
    probed: Mutex<HashMap<(String, Capability), bool>>,
}

impl CapabilityCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome for `(driver_class, capability)`, running
    /// `probe` once on the first call. The lock is held across the probe so
    /// each key is computed once; probes are idempotent, so this guard is
    /// about avoiding duplicate work, not correctness.
    pub fn supports_with<F>(&self, driver_class: &str, capability: Capability, probe: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        let mut probed = self.probed.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(&known) = probed.get(&(driver_class.to_string(), capability)) {
            return known;
        }
        let outcome = probe();
        probed.insert((driver_class.to_string(), capability), outcome);
        outcome
    }
}
