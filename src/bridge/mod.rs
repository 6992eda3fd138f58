//! Bridge tool (adb) invocation layer
//!
//! Everything the bridge does is "build an argument list, run the external
//! process, capture or stream its line-oriented text output". The output is
//! treated as opaque except for the device-list table.

pub mod client;
pub mod parser;

pub use client::*;
pub use parser::*;
