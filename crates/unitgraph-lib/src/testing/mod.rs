//! Test support for unitgraph
//!
//! Shared by the unit tests, the integration tests under `tests/` and the
//! end-to-end crate (through the `test-utils` feature):
//! - Short unit and requirement builders for common OSGi shapes
//! - Temporary manifest directories with automatic cleanup

pub mod filesystem;
pub mod units;

pub use filesystem::ManifestFixture;
pub use units::{build_input, bundle, feature, fragment, needs_bundle, needs_package};
