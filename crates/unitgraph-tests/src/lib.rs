pub mod fixtures;

// Re-export key testing utilities
pub use fixtures::{BuildFixture, SAMPLE_JSON, SAMPLE_TOML, SAMPLE_YAML};
