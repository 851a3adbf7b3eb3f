//! Kaizen starter project bootstrapper.
//!
//! Downloads the Kaizen project archive, installs the files its manifest
//! whitelists into a target directory, adds the base stylesheet from a second
//! archive and runs the vendor library installer.
//!
//! The public API is organised into four layers:
//!
//! - **[`archive`]** manifest-driven selective extraction (the core)
//! - **[`fetch`]** / **[`exec`]** the network and process seams
//! - **[`steps`]** named, sequential units of work wired to the core
//! - **[`commands`]** top-level subcommand orchestration (`install`, `serve`, ...)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod fetch;
pub mod logging;
pub mod preview;
pub mod steps;
