//! Kisan application library: CLI definitions, command handlers and
//! terminal rendering used by the `kisan` binary.

pub mod cli;
pub mod commands;
pub mod render;
