//! Convenient imports for common functionality.

pub use crate::binding::{Bindings, BoundParameter, bind};
pub use crate::capability::Capability;
pub use crate::driver::{Driver, SchemaIntrospection};
pub use crate::error::DatabaseError;
pub use crate::flavor::Flavor;
pub use crate::options::Options;
pub use crate::results::{ResultSet, Row};
pub use crate::session::Database;
pub use crate::template::{Marker, MarkerKind, SqlTemplate};
pub use crate::types::{SqlType, SqlValue};
pub use crate::when::When;
