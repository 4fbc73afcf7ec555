//! Command parameters.
//!
//! [`ParamSpec`] is the raw descriptor exactly as the manifest spells it;
//! [`Parameter`] is the validated form the rest of the pipeline works with.
//! A parameter knows how to describe itself in one line of help text and how
//! to synthesize an example token for the command's example invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::types::{ParamType, ValueKind};

/// Name reserved for the scoping parameter; never given a synthetic value.
const RESERVED_WHO: &str = "who";

/// Raw parameter descriptor from the manifest.
///
/// Only `type` and `name` are mandatory. `n`, `req` and `who` are kept as raw
/// JSON values because the generator is loose about their encoding; see
/// [`Parameter::from_spec`] for how they are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Type tag, e.g. `"CephInt"`.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Parameter name.
    pub name: String,
    /// Scoping field. Accepted syntactically, must be absent or null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who: Option<Value>,
    /// Arity marker; `"N"` means repeatable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<Value>,
    /// Requiredness; only the string `"false"` makes the parameter optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req: Option<Value>,
    /// `|`-delimited numeric range, lower bound first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// `|`-delimited set of allowed values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<String>,
    /// Allowed-character constraint for free-form strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goodchars: Option<String>,
}

/// A validated command parameter.
///
/// # Examples
///
/// ```
/// use command_api_core::{ParamType, Parameter};
///
/// let pool = Parameter::new("pool", ParamType::Poolname);
/// assert!(pool.required);
/// assert_eq!(pool.help(), "CephPoolname");
/// assert_eq!(pool.bash_example(true), "poolname");
/// assert_eq!(pool.bash_example(false), "--pool=poolname");
///
/// let ids = Parameter::new("ids", ParamType::String).allow_repeat();
/// assert_eq!(ids.help(), "(can be repeated)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Type tag.
    pub param_type: ParamType,
    /// Parameter name.
    pub name: String,
    /// May occur multiple times.
    pub repeatable: bool,
    /// Must be supplied.
    pub required: bool,
    /// Numeric range entries, lower bound first. Empty when unconstrained.
    pub range: Vec<String>,
    /// Allowed string values. Empty when unconstrained.
    pub strings: Vec<String>,
    /// Allowed-character constraint.
    pub goodchars: Option<String>,
}

impl Parameter {
    /// Creates a required, non-repeatable parameter with no constraints.
    pub fn new(name: &str, param_type: ParamType) -> Self {
        Self {
            param_type,
            name: name.to_string(),
            repeatable: false,
            required: true,
            range: Vec::new(),
            strings: Vec::new(),
            goodchars: None,
        }
    }

    /// Validates a raw descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedWho`] when `who` is set to anything
    /// but null, and [`ModelError::UnknownParamType`] for an unknown tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_api_core::{ModelError, ParamSpec, Parameter};
    ///
    /// let spec: ParamSpec = serde_json::from_str(
    ///     r#"{"type": "CephInt", "name": "size", "range": "1|10", "req": "false"}"#,
    /// ).unwrap();
    /// let param = Parameter::from_spec(spec).unwrap();
    /// assert!(!param.required);
    /// assert_eq!(param.range, vec!["1", "10"]);
    ///
    /// let scoped: ParamSpec = serde_json::from_str(
    ///     r#"{"type": "CephString", "name": "id", "who": "osd"}"#,
    /// ).unwrap();
    /// assert!(matches!(
    ///     Parameter::from_spec(scoped),
    ///     Err(ModelError::UnsupportedWho { .. })
    /// ));
    /// ```
    pub fn from_spec(spec: ParamSpec) -> Result<Self> {
        if spec.who.is_some() {
            return Err(ModelError::UnsupportedWho { param: spec.name });
        }

        let param_type = spec
            .type_tag
            .parse::<ParamType>()
            .map_err(|_| ModelError::UnknownParamType {
                param: Some(spec.name.clone()),
                tag: spec.type_tag.clone(),
            })?;

        Ok(Self {
            param_type,
            repeatable: matches!(&spec.n, Some(Value::String(n)) if n == "N"),
            required: !matches!(&spec.req, Some(Value::String(req)) if req == "false"),
            range: split_pipe_list(spec.range.as_deref()),
            strings: split_pipe_list(spec.strings.as_deref()),
            goodchars: spec.goodchars.filter(|g| !g.is_empty()),
            name: spec.name,
        })
    }

    /// Marks as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Marks as repeatable.
    pub fn allow_repeat(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Sets the numeric range, lower bound first.
    pub fn with_range(mut self, range: &[&str]) -> Self {
        self.range = range.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the allowed values.
    pub fn with_strings(mut self, strings: &[&str]) -> Self {
        self.strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the allowed-character constraint.
    pub fn with_goodchars(mut self, goodchars: &str) -> Self {
        self.goodchars = Some(goodchars.to_string());
        self
    }

    /// One-line description of the accepted values.
    ///
    /// Lists the type tag (omitted for plain strings), the range, the
    /// allowed values, the character constraint and the repetition marker,
    /// in that order. Falls back to `(string)` when none apply.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_api_core::{ParamType, Parameter};
    ///
    /// let p = Parameter::new("pg_num", ParamType::Int).with_range(&["0", "65535"]);
    /// assert_eq!(p.help(), "CephInt range= ``0..65535``");
    ///
    /// let p = Parameter::new("mode", ParamType::Choices).with_strings(&["on", "off"]);
    /// assert_eq!(p.help(), "CephChoices strings=(on off)");
    ///
    /// assert_eq!(Parameter::new("key", ParamType::String).help(), "(string)");
    /// ```
    pub fn help(&self) -> String {
        let mut fragments = Vec::new();
        if self.param_type != ParamType::String {
            fragments.push(self.param_type.tag().to_string());
        }
        if !self.range.is_empty() {
            fragments.push(format!("range= ``{}``", self.range.join("..")));
        }
        if !self.strings.is_empty() {
            fragments.push(format!("strings=({})", self.strings.join(" ")));
        }
        if let Some(goodchars) = &self.goodchars {
            fragments.push(format!("goodchars= ``{goodchars}``"));
        }
        if self.repeatable {
            fragments.push("(can be repeated)".to_string());
        }

        if fragments.is_empty() {
            return "(string)".to_string();
        }
        fragments.join(" ")
    }

    /// Representative value for this parameter.
    ///
    /// The first allowed value for choices, else the range's lower bound,
    /// else the type's example literal.
    pub fn example_value(&self) -> &str {
        if self.param_type == ParamType::Choices {
            if let Some(first) = self.strings.first() {
                return first;
            }
        }
        if let Some(lower) = self.range.first() {
            return lower;
        }
        self.param_type.example_literal()
    }

    /// Example token for this parameter in an invocation.
    ///
    /// Boolean-valued parameters are always a bare `--name` switch. In `simple` mode other
    /// parameters read positionally: the chosen value for choices,
    /// `my_<name>` for plain strings, the type's example literal otherwise.
    /// Without `simple` every parameter is spelled `--name=value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_api_core::{ParamType, Parameter};
    ///
    /// let format = Parameter::new("format", ParamType::Choices).with_strings(&["json", "plain"]);
    /// assert_eq!(format.bash_example(true), "json");
    /// assert_eq!(format.bash_example(false), "--format=json");
    ///
    /// let force = Parameter::new("force", ParamType::Bool);
    /// assert_eq!(force.bash_example(true), "--force");
    /// assert_eq!(force.bash_example(false), "--force");
    ///
    /// let key = Parameter::new("key", ParamType::String);
    /// assert_eq!(key.bash_example(true), "my_key");
    /// assert_eq!(key.bash_example(false), "--key=string");
    /// ```
    pub fn bash_example(&self, simple: bool) -> String {
        if self.param_type.value_kind() == ValueKind::Bool {
            return format!("--{}", self.name);
        }
        if !simple {
            return format!("--{}={}", self.name, self.example_value());
        }

        match self.param_type {
            ParamType::Choices if !self.strings.is_empty() => self.example_value().to_string(),
            ParamType::String if self.name != RESERVED_WHO => format!("my_{}", self.name),
            other => other.example_literal().to_string(),
        }
    }
}

fn split_pipe_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) if !raw.is_empty() => raw.split('|').map(String::from).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn spec(value: Value) -> ParamSpec {
        serde_json::from_value(value).expect("valid descriptor")
    }

    #[test]
    fn test_from_spec_defaults() {
        let param = Parameter::from_spec(spec(json!({"type": "CephString", "name": "key"})))
            .unwrap();

        assert_eq!(param, Parameter::new("key", ParamType::String));
    }

    #[test]
    fn test_from_spec_req_only_false_string_is_optional() {
        let optional =
            Parameter::from_spec(spec(json!({"type": "CephInt", "name": "a", "req": "false"})))
                .unwrap();
        let explicit =
            Parameter::from_spec(spec(json!({"type": "CephInt", "name": "b", "req": "true"})))
                .unwrap();
        let boolean =
            Parameter::from_spec(spec(json!({"type": "CephInt", "name": "c", "req": false})))
                .unwrap();

        assert!(!optional.required);
        assert!(explicit.required);
        assert!(boolean.required);
    }

    #[test]
    fn test_from_spec_repeatable_marker() {
        let many = Parameter::from_spec(spec(json!({"type": "CephString", "name": "ids", "n": "N"})))
            .unwrap();
        let one = Parameter::from_spec(spec(json!({"type": "CephString", "name": "id", "n": 1})))
            .unwrap();

        assert!(many.repeatable);
        assert!(!one.repeatable);
    }

    #[test]
    fn test_from_spec_null_who_is_accepted() {
        let param =
            Parameter::from_spec(spec(json!({"type": "CephString", "name": "id", "who": null})))
                .unwrap();
        assert_eq!(param.name, "id");
    }

    #[test]
    fn test_from_spec_rejects_who() {
        let err = Parameter::from_spec(spec(
            json!({"type": "CephString", "name": "target", "who": "mon"}),
        ))
        .unwrap_err();

        assert_eq!(
            err,
            ModelError::UnsupportedWho {
                param: "target".to_string()
            }
        );
    }

    #[test]
    fn test_from_spec_rejects_unknown_type() {
        let err = Parameter::from_spec(spec(json!({"type": "CephBlob", "name": "data"})))
            .unwrap_err();

        assert_eq!(
            err,
            ModelError::UnknownParamType {
                param: Some("data".to_string()),
                tag: "CephBlob".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "unknown parameter type 'CephBlob' for parameter 'data'"
        );
    }

    #[test]
    fn test_from_spec_empty_lists() {
        let param = Parameter::from_spec(spec(
            json!({"type": "CephInt", "name": "x", "range": "", "strings": "", "goodchars": ""}),
        ))
        .unwrap();

        assert!(param.range.is_empty());
        assert!(param.strings.is_empty());
        assert!(param.goodchars.is_none());
    }

    #[test]
    fn test_help_bool_lists_only_type() {
        assert_eq!(Parameter::new("force", ParamType::Bool).help(), "CephBool");
    }

    #[test]
    fn test_help_all_fragments() {
        let param = Parameter::new("name", ParamType::String)
            .with_goodchars("[A-Za-z0-9-_.]")
            .allow_repeat();
        assert_eq!(
            param.help(),
            "goodchars= ``[A-Za-z0-9-_.]`` (can be repeated)"
        );

        let param = Parameter::new("weight", ParamType::Float)
            .with_range(&["0.0", "1.0"])
            .allow_repeat();
        assert_eq!(
            param.help(),
            "CephFloat range= ``0.0..1.0`` (can be repeated)"
        );
    }

    #[test]
    fn test_example_value_precedence() {
        let choices = Parameter::new("mode", ParamType::Choices)
            .with_strings(&["off", "on"])
            .with_range(&["5"]);
        assert_eq!(choices.example_value(), "off");

        let ranged = Parameter::new("size", ParamType::Int).with_range(&["3", "9"]);
        assert_eq!(ranged.example_value(), "3");

        let bare_choices = Parameter::new("mode", ParamType::Choices);
        assert_eq!(bare_choices.example_value(), "choice");

        let addr = Parameter::new("addr", ParamType::IpAddr);
        assert_eq!(addr.example_value(), "0.0.0.0");
    }

    #[test]
    fn test_bash_example_simple_ignores_range() {
        let ranged = Parameter::new("size", ParamType::Int).with_range(&["3", "9"]);
        assert_eq!(ranged.bash_example(true), "1");
        assert_eq!(ranged.bash_example(false), "--size=3");
    }

    #[test]
    fn test_bash_example_who_gets_type_literal() {
        let who = Parameter::new("who", ParamType::String);
        assert_eq!(who.bash_example(true), "string");
        assert_eq!(who.bash_example(false), "--who=string");
    }

    #[test]
    fn test_bash_example_choices_without_values() {
        let bare = Parameter::new("mode", ParamType::Choices);
        assert_eq!(bare.bash_example(true), "choice");
        assert_eq!(bare.bash_example(false), "--mode=choice");
    }

    #[test]
    fn test_examples_are_repeatable() {
        let param = Parameter::new("osd", ParamType::OsdName).optional();
        assert_eq!(param.bash_example(true), param.bash_example(true));
        assert_eq!(param.example_value(), param.example_value());
        assert_eq!(param.bash_example(true), "osd.0");
    }
}
