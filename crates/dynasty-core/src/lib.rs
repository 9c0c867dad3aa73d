// Shared foundation for the dynasty calculators: rule tables and their
// loading from disk.

pub mod config;
