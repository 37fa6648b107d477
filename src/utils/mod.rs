//! Common utilities and helpers

pub mod time;

pub use time::TimeParser;
