//! Reference documentation for management commands, generated from the
//! command registry's manifest.
//!
//! The pipeline is:
//!
//! 1. obtain the manifest, either by running the external generator
//!    ([`generator::fetch_manifest`]) or from a file
//!    ([`manifest::Manifest::load`]);
//! 2. build and filter the commands ([`select::select_commands`]);
//! 3. render them ([`output::render_document`]).
//!
//! # Example
//!
//! ```
//! use command_api_docgen::manifest::Manifest;
//! use command_api_docgen::output::{RenderOptions, render_document};
//! use command_api_docgen::select::select_commands;
//!
//! let manifest = Manifest::from_json_str(r#"[
//!     {"sig": ["mon", "compact"], "desc": "compact the store",
//!      "module": "mon", "perm": "rw", "flags": 0}
//! ]"#).unwrap();
//!
//! let selection = select_commands(manifest).unwrap();
//! let doc = render_document(&selection.commands, &RenderOptions::default());
//! assert!(doc.contains("mon compact\n^^^^^^^^^^^\n"));
//! assert!(doc.contains("    ceph mon compact\n"));
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod output;
pub mod select;

pub use error::{DocgenError, Result};
