// Library root: re-exports the report pipeline so integration tests and the
// binary share one code path.

pub mod report;
pub mod snapshot;
