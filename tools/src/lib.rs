//! # soar-tools
//!
//! The static tool table shared by the stdio and HTTP transports.
//! Each tool is one-to-one with a Splunk SOAR REST call; this crate only
//! describes and builds those calls, it never performs I/O.

pub mod args;
pub mod call;
pub mod registry;

pub use args::{ArgumentError, Arguments};
pub use call::{Method, RestCall};
pub use registry::{all, find, ArgKind, ArgSpec, CallBuilder, ToolSpec};
