//! Parameter type tags.
//!
//! Every parameter descriptor in the manifest names one of a fixed set of
//! type tags. [`ParamType`] models that closed set together with the static
//! tables derived from it: the primitive value kind, which decides how a
//! parameter is spelled on the command line, and the literal used when
//! synthesizing example invocations.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Primitive kind of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Integer.
    Int,
    /// Free-form or structured string.
    Str,
    /// Boolean switch.
    Bool,
    /// Floating point number.
    Float,
}

/// Type tag of a command parameter.
///
/// # Examples
///
/// ```
/// use command_api_core::{ParamType, ValueKind};
///
/// let ty: ParamType = "CephIPAddr".parse().unwrap();
/// assert_eq!(ty, ParamType::IpAddr);
/// assert_eq!(ty.example_literal(), "0.0.0.0");
/// assert_eq!(ty.value_kind(), ValueKind::Str);
/// assert_eq!(ty.to_string(), "CephIPAddr");
///
/// assert!("CephWhatever".parse::<ParamType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Int,
    String,
    Choices,
    Pgid,
    OsdName,
    Poolname,
    Objectname,
    Uuid,
    EntityAddr,
    IpAddr,
    Name,
    Bool,
    Float,
    Filepath,
}

impl ParamType {
    /// Every known type tag.
    pub const ALL: [ParamType; 14] = [
        ParamType::Int,
        ParamType::String,
        ParamType::Choices,
        ParamType::Pgid,
        ParamType::OsdName,
        ParamType::Poolname,
        ParamType::Objectname,
        ParamType::Uuid,
        ParamType::EntityAddr,
        ParamType::IpAddr,
        ParamType::Name,
        ParamType::Bool,
        ParamType::Float,
        ParamType::Filepath,
    ];

    /// Returns the tag as spelled in the manifest.
    pub const fn tag(self) -> &'static str {
        match self {
            ParamType::Int => "CephInt",
            ParamType::String => "CephString",
            ParamType::Choices => "CephChoices",
            ParamType::Pgid => "CephPgid",
            ParamType::OsdName => "CephOsdName",
            ParamType::Poolname => "CephPoolname",
            ParamType::Objectname => "CephObjectname",
            ParamType::Uuid => "CephUUID",
            ParamType::EntityAddr => "CephEntityAddr",
            ParamType::IpAddr => "CephIPAddr",
            ParamType::Name => "CephName",
            ParamType::Bool => "CephBool",
            ParamType::Float => "CephFloat",
            ParamType::Filepath => "CephFilepath",
        }
    }

    /// Returns the primitive value kind.
    pub const fn value_kind(self) -> ValueKind {
        match self {
            ParamType::Int => ValueKind::Int,
            ParamType::Bool => ValueKind::Bool,
            ParamType::Float => ValueKind::Float,
            _ => ValueKind::Str,
        }
    }

    /// Returns the canonical example value for this type.
    pub const fn example_literal(self) -> &'static str {
        match self {
            ParamType::Int => "1",
            ParamType::String => "string",
            ParamType::Choices => "choice",
            ParamType::Pgid => "0",
            ParamType::OsdName => "osd.0",
            ParamType::Poolname => "poolname",
            ParamType::Objectname => "objectname",
            ParamType::Uuid => "uuid",
            ParamType::EntityAddr => "entityaddr",
            ParamType::IpAddr => "0.0.0.0",
            ParamType::Name => "name",
            ParamType::Bool => "true",
            ParamType::Float => "0.0",
            ParamType::Filepath => "/path/to/file",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ParamType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamType::ALL
            .into_iter()
            .find(|ty| ty.tag() == s)
            .ok_or_else(|| ModelError::UnknownParamType {
                param: None,
                tag: s.to_string(),
            })
    }
}
