//! Embeddable core library for fcmkit.
//!
//! Provides a clap-free, I/O-abstracted entry point for the plugin's two
//! install hooks, suitable for calling from a CLI or a host build tool.
//!
//! # Ports
//!
//! All file access goes through the traits re-exported from `fcmkit-edit`:
//! - [`RepoView`]: read and probe project files
//! - [`WritePort`]: replace file contents
//!
//! The [`adapters`] module provides a dry-run overlay and a change tracker.
//!
//! # Entry points
//!
//! - [`run_after_plugin_install`](pipeline::run_after_plugin_install): runpath patch
//! - [`run_after_prepare`](pipeline::run_after_prepare): plists and Podfile
//! - [`run_all`](pipeline::run_all): both, in that order

pub mod adapters;
pub mod locator;
pub mod pipeline;
pub mod project;
pub mod settings;

pub use fcmkit_edit::{FsProject, ProjectIo, RepoView, WritePort};
