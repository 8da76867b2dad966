//! Parameterized SQL templating and multi-dialect execution.
//!
//! Compile SQL text containing mixed positional (`?`) and named (`:foo`)
//! parameter markers into a reusable [`SqlTemplate`], resolve it against
//! [`Bindings`], and run it through a [`Database`] session whose
//! [`Flavor`] supplies dialect-specific syntax, whose [`Options`] gate the
//! unsafe escape hatches, and whose capability probe degrades gracefully
//! when a driver lacks an optional feature.
//!
//! ```rust
//! use sql_flavor::prelude::*;
//! use sql_flavor::test_utils::StubDriver;
//!
//! let mut db = Database::new(StubDriver::new(), Flavor::Postgres, Options::default());
//! let rows = db.execute(
//!     "insert into account (id, name) values (?, :name)",
//!     &Bindings::Positional(vec![SqlValue::Int(1), SqlValue::Text("alice".into())]),
//! )?;
//! # let _ = rows;
//! # Ok::<(), sql_flavor::DatabaseError>(())
//! ```

pub mod binding;
pub mod capability;
pub mod driver;
pub mod error;
pub mod flavor;
pub mod options;
pub mod results;
pub mod session;
pub mod template;
pub mod types;
pub mod when;

pub mod prelude;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use binding::{Bindings, BoundParameter, bind};
pub use capability::{Capability, CapabilityCache};
pub use driver::{Driver, SchemaIntrospection};
pub use error::DatabaseError;
pub use flavor::Flavor;
pub use options::Options;
pub use results::{ResultSet, Row};
pub use session::{DEFAULT_SKEW_ERROR_MS, DEFAULT_SKEW_WARN_MS, Database};
pub use template::{Marker, MarkerKind, SqlTemplate};
pub use types::{SqlType, SqlValue};
pub use when::When;
