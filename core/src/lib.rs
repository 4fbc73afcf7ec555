//! Typed model of management command descriptors.
//!
//! The command registry exports every command as a raw JSON record: a
//! signature mixing literal words and parameter descriptors, help text, the
//! owning module, a permission string and a flag bitmask. This crate turns
//! those records into validated types:
//!
//! - [`FlagSet`]: decoded [`Flag`] bitmask with canonical text rendering.
//! - [`Parameter`]: a typed parameter ([`ParamType`]) with derived help text
//!   and example values, built from a raw [`ParamSpec`].
//! - [`Command`]: literal prefix, ordered parameters and derived example
//!   invocation, built from a raw [`CommandSpec`].
//!
//! Malformed records surface as [`ModelError`].
//!
//! # Example
//!
//! ```
//! use command_api_core::*;
//!
//! let spec: CommandSpec = serde_json::from_str(r#"{
//!     "sig": ["osd", "pool", "rename",
//!             {"type": "CephPoolname", "name": "srcpool"},
//!             {"type": "CephPoolname", "name": "destpool"}],
//!     "desc": "rename <srcpool> to <destpool>",
//!     "module": "osd",
//!     "perm": "rw",
//!     "flags": 4
//! }"#).unwrap();
//!
//! let cmd = Command::from_spec(spec).unwrap();
//! assert_eq!(cmd.prefix(), "osd pool rename");
//! assert_eq!(cmd.bash_example(), "ceph osd pool rename poolname poolname");
//! assert!(cmd.flags.contains(Flag::Deprecated));
//! ```

mod command;
mod error;
mod flags;
mod param;
mod types;

pub use command::{Command, CommandSpec, INVOCATION_PROGRAM, SigToken};
pub use error::{ModelError, Result};
pub use flags::{Flag, FlagSet};
pub use param::{ParamSpec, Parameter};
pub use types::{ParamType, ValueKind};
