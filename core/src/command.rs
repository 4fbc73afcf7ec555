//! Commands.
//!
//! A command's signature interleaves literal tokens (`osd pool create`) with
//! parameter descriptors. [`Command::from_spec`] separates the two, validates
//! the parameters and orders them required-first.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::flags::FlagSet;
use crate::param::{ParamSpec, Parameter};

/// Leading token of every example invocation.
pub const INVOCATION_PROGRAM: &str = "ceph";

/// Commands with more parameters than this are documented with explicit
/// `--name=value` examples.
const MAX_SIMPLE_PARAMS: usize = 3;

/// One element of a raw signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SigToken {
    /// Fixed word of the invocation prefix.
    Literal(String),
    /// Parameter slot.
    Param(ParamSpec),
}

// Objects go straight to `ParamSpec` so a bad descriptor reports the
// offending field instead of a generic no-variant-matched error.
impl<'de> Deserialize<'de> for SigToken {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(word) => Ok(SigToken::Literal(word)),
            value @ Value::Object(_) => ParamSpec::deserialize(value)
                .map(SigToken::Param)
                .map_err(|e| de::Error::custom(format!("invalid parameter descriptor: {e}"))),
            other => Err(de::Error::custom(format!(
                "signature entry must be a string or a parameter object, got {other}"
            ))),
        }
    }
}

/// Raw command record from the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Literal tokens and parameter descriptors, in invocation order.
    pub sig: Vec<SigToken>,
    /// Help text.
    pub desc: String,
    /// Owning module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Required permission, e.g. `"rw"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perm: Option<String>,
    /// Flag bitmask; see [`FlagSet`]. Any integer is accepted, negative
    /// masks included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<i64>,
    /// Polling hint. Carried by the generator, unused here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Value>,
}

/// A validated command.
///
/// # Examples
///
/// ```
/// use command_api_core::{Command, ParamType, Parameter};
///
/// let cmd = Command::new(&["osd", "pool", "get"], "get pool parameter")
///     .with_param(Parameter::new("var", ParamType::Choices).with_strings(&["size", "min_size"]))
///     .with_param(Parameter::new("pool", ParamType::Poolname));
///
/// assert_eq!(cmd.prefix(), "osd pool get");
/// assert!(cmd.is_reasonably_simple());
/// assert_eq!(cmd.bash_example(), "ceph osd pool get size poolname");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Literal signature tokens, in order.
    pub sig: Vec<String>,
    /// Parameters, required ones first.
    pub params: Vec<Parameter>,
    /// Help text.
    pub help: String,
    /// Owning module.
    pub module: Option<String>,
    /// Required permission.
    pub perm: Option<String>,
    /// Behavioral flags.
    pub flags: FlagSet,
}

impl Command {
    /// Creates a command with no parameters, module, permission or flags.
    pub fn new(sig: &[&str], help: &str) -> Self {
        Self {
            sig: sig.iter().map(|s| s.to_string()).collect(),
            params: Vec::new(),
            help: help.to_string(),
            module: None,
            perm: None,
            flags: FlagSet::default(),
        }
    }

    /// Validates a raw command record.
    ///
    /// # Errors
    ///
    /// Propagates any parameter error as [`ModelError::InCommand`], tagged
    /// with the command's prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_api_core::{Command, CommandSpec};
    ///
    /// let spec: CommandSpec = serde_json::from_str(r#"{
    ///     "sig": ["mon", "remove", {"type": "CephString", "name": "name"}],
    ///     "desc": "remove monitor named <name>",
    ///     "module": "mon",
    ///     "perm": "rw",
    ///     "flags": 0
    /// }"#).unwrap();
    ///
    /// let cmd = Command::from_spec(spec).unwrap();
    /// assert_eq!(cmd.sig, vec!["mon", "remove"]);
    /// assert_eq!(cmd.bash_example(), "ceph mon remove my_name");
    /// ```
    pub fn from_spec(spec: CommandSpec) -> Result<Self> {
        let mut sig = Vec::new();
        let mut param_specs = Vec::new();
        for token in spec.sig {
            match token {
                SigToken::Literal(word) => sig.push(word),
                SigToken::Param(param) => param_specs.push(param),
            }
        }

        let mut params = param_specs
            .into_iter()
            .map(Parameter::from_spec)
            .collect::<Result<Vec<_>>>()
            .map_err(|source| ModelError::InCommand {
                command: sig.join(" "),
                source: Box::new(source),
            })?;
        sort_required_first(&mut params);

        Ok(Self {
            sig,
            params,
            help: spec.desc,
            module: spec.module,
            perm: spec.perm,
            // Two's complement keeps every bit, so `-1` sets all flags.
            flags: FlagSet::from_bits(spec.flags.unwrap_or(0) as u64),
        })
    }

    /// Adds a parameter, keeping required parameters first.
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        sort_required_first(&mut self.params);
        self
    }

    /// Sets the owning module.
    pub fn with_module(mut self, module: &str) -> Self {
        self.module = Some(module.to_string());
        self
    }

    /// Sets the required permission.
    pub fn with_perm(mut self, perm: &str) -> Self {
        self.perm = Some(perm.to_string());
        self
    }

    /// Sets the flags from a raw bitmask.
    pub fn with_flags(mut self, bits: u64) -> Self {
        self.flags = FlagSet::from_bits(bits);
        self
    }

    /// Literal signature tokens joined by spaces.
    pub fn prefix(&self) -> String {
        self.sig.join(" ")
    }

    /// Whether the example invocation can use positional-looking tokens.
    ///
    /// True for at most three parameters, none of them repeatable.
    pub fn is_reasonably_simple(&self) -> bool {
        self.params.len() <= MAX_SIMPLE_PARAMS && !self.params.iter().any(|p| p.repeatable)
    }

    /// Example command line for this command.
    pub fn bash_example(&self) -> String {
        let simple = self.is_reasonably_simple();
        let mut words = vec![INVOCATION_PROGRAM.to_string(), self.prefix()];
        words.extend(self.params.iter().map(|p| p.bash_example(simple)));
        words.join(" ")
    }
}

// Stable, so declaration order survives within each group.
fn sort_required_first(params: &mut [Parameter]) {
    params.sort_by_key(|p| !p.required);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::flags::Flag;
    use crate::types::ParamType;

    fn spec(value: Value) -> CommandSpec {
        serde_json::from_value(value).expect("valid command record")
    }

    #[test]
    fn test_no_params_command() {
        let cmd = Command::from_spec(spec(json!({
            "sig": ["mon", "compact"],
            "desc": "cause compaction of monitor's leveldb/rocksdb storage",
            "module": "mon",
            "perm": "rw",
            "flags": 0
        })))
        .unwrap();

        assert_eq!(cmd.prefix(), "mon compact");
        assert!(cmd.params.is_empty());
        assert!(cmd.flags.is_empty());
        assert_eq!(cmd.bash_example(), "ceph mon compact");
        assert_eq!(cmd.module.as_deref(), Some("mon"));
        assert_eq!(cmd.perm.as_deref(), Some("rw"));
    }

    #[test]
    fn test_literals_keep_order_around_params() {
        let cmd = Command::from_spec(spec(json!({
            "sig": [
                "osd",
                {"type": "CephOsdName", "name": "id"},
                "tell",
                {"type": "CephString", "name": "args", "n": "N"}
            ],
            "desc": "interleaved"
        })))
        .unwrap();

        assert_eq!(cmd.sig, vec!["osd", "tell"]);
        let names: Vec<&str> = cmd.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "args"]);
    }

    #[test]
    fn test_required_params_first_stable() {
        let cmd = Command::from_spec(spec(json!({
            "sig": [
                "osd", "pool", "create",
                {"type": "CephInt", "name": "a", "req": "false"},
                {"type": "CephInt", "name": "b"},
                {"type": "CephInt", "name": "c", "req": "false"},
                {"type": "CephInt", "name": "d"},
                {"type": "CephInt", "name": "e", "req": "true"}
            ],
            "desc": "ordering"
        })))
        .unwrap();

        let names: Vec<&str> = cmd.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "e", "a", "c"]);
        assert!(cmd.params.iter().take(3).all(|p| p.required));
        assert!(cmd.params.iter().skip(3).all(|p| !p.required));
    }

    #[test]
    fn test_simplicity_boundaries() {
        let three = Command::new(&["x"], "")
            .with_param(Parameter::new("a", ParamType::Int))
            .with_param(Parameter::new("b", ParamType::Int))
            .with_param(Parameter::new("c", ParamType::Int));
        assert!(three.is_reasonably_simple());

        let four = three.clone().with_param(Parameter::new("d", ParamType::Int));
        assert!(!four.is_reasonably_simple());

        let repeated = Command::new(&["x"], "")
            .with_param(Parameter::new("a", ParamType::String).allow_repeat());
        assert!(!repeated.is_reasonably_simple());

        assert!(Command::new(&["x"], "").is_reasonably_simple());
    }

    #[test]
    fn test_verbose_example_for_complex_command() {
        let cmd = Command::new(&["osd", "pool", "set"], "")
            .with_param(Parameter::new("pool", ParamType::Poolname))
            .with_param(Parameter::new("var", ParamType::Choices).with_strings(&["size", "pg_num"]))
            .with_param(Parameter::new("val", ParamType::String))
            .with_param(Parameter::new("yes_i_really_mean_it", ParamType::Bool).optional());

        assert_eq!(
            cmd.bash_example(),
            "ceph osd pool set --pool=poolname --var=size --val=string --yes_i_really_mean_it"
        );
    }

    #[test]
    fn test_simple_example_mixes_literals() {
        let cmd = Command::new(&["osd", "out"], "")
            .with_param(Parameter::new("ids", ParamType::String))
            .with_param(Parameter::new("force", ParamType::Bool).optional());

        assert_eq!(cmd.bash_example(), "ceph osd out my_ids --force");
    }

    #[test]
    fn test_flags_decoded_and_poll_ignored() {
        let cmd = Command::from_spec(spec(json!({
            "sig": ["pg", "stat"],
            "desc": "show placement group status",
            "flags": Flag::Poll.bit() | Flag::Mgr.bit(),
            "poll": true
        })))
        .unwrap();

        assert_eq!(cmd.flags.to_string(), "mgr, poll");
        assert!(cmd.module.is_none());
    }

    #[test]
    fn test_param_error_names_command() {
        let err = Command::from_spec(spec(json!({
            "sig": ["auth", "get", {"type": "CephString", "name": "entity", "who": "client"}],
            "desc": "scoped"
        })))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "command 'auth get': parameter 'entity' sets unsupported field 'who'"
        );
    }

    #[test]
    fn test_negative_mask_sets_every_flag() {
        let cmd = Command::from_spec(spec(json!({
            "sig": ["osd", "crush", "dump"],
            "desc": "",
            "flags": -1
        })))
        .unwrap();

        assert!(cmd.flags.contains(Flag::Hidden));
        assert_eq!(
            cmd.flags.to_string(),
            "deprecated, hidden, mgr, no_forward, obsolete, poll"
        );
    }

    #[test]
    fn test_descriptor_error_names_missing_field() {
        let result: std::result::Result<CommandSpec, _> = serde_json::from_value(json!({
            "sig": ["osd", "out", {"type": "CephOsdName"}],
            "desc": "mark osd out"
        }));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("invalid parameter descriptor"), "{message}");
        assert!(message.contains("missing field `name`"), "{message}");

        let result: std::result::Result<CommandSpec, _> = serde_json::from_value(json!({
            "sig": ["osd", "out", {"name": "ids"}],
            "desc": "mark osd out"
        }));
        assert!(result.unwrap_err().to_string().contains("missing field `type`"));
    }

    #[test]
    fn test_non_string_literal_rejected() {
        let result: std::result::Result<CommandSpec, _> =
            serde_json::from_value(json!({"sig": ["osd", 7], "desc": ""}));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("must be a string or a parameter object"), "{message}");
    }

    #[test]
    fn test_missing_desc_fails_to_deserialize() {
        let result: std::result::Result<CommandSpec, _> =
            serde_json::from_value(json!({"sig": ["mon", "stat"]}));
        assert!(result.is_err());
    }
}
