//! # Metadata Model
//!
//! Immutable value types describing what build units provide and require.
//!
//! ## Modules
//!
//! - [`version`] - Versions and OSGi-style version ranges
//! - [`capability`] - Capabilities, requirements and filters
//! - [`satisfy`] - Requirement satisfaction
//! - [`unit`] - Units and their classification
//! - [`project`] - Build modules owning units

pub mod capability;
pub mod project;
pub mod satisfy;
pub mod unit;
pub mod version;

pub use capability::{Capability, Filter, Requirement};
pub use project::Project;
pub use satisfy::satisfies;
pub use unit::{Unit, UnitBuilder, UnitKind};
pub use version::{Version, VersionError, VersionRange, parse_version};
