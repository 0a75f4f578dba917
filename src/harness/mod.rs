pub mod discovery;
pub mod suite;
pub mod types;

pub use discovery::{discover, select_document};
pub use suite::{run_fixture, run_harness};
pub use types::{FixtureCase, HarnessConfig, HarnessError, HarnessResult};
