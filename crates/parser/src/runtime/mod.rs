//! Runtime module — logging init, config load, and the stdin parse loop.

pub mod boot;
pub mod run;
