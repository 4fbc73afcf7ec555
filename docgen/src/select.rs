//! Selection and ordering of documented commands.

use command_api_core::{Command, CommandSpec, Flag, ModelError};
use tracing::debug;

use crate::error::Result;

/// Commands chosen for documentation, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Visible commands sorted by signature.
    pub commands: Vec<Command>,
    /// Number of commands dropped because they are hidden.
    pub hidden: usize,
}

/// Builds every command, drops hidden ones and sorts the rest by signature.
///
/// The sort key is the list of literal signature tokens, compared
/// lexicographically. Signatures are unique in a well-formed manifest.
///
/// # Errors
///
/// Returns [`InvalidManifest`](crate::DocgenError::InvalidManifest) for the
/// first record that fails validation; nothing is selected in that case.
///
/// # Examples
///
/// ```
/// use command_api_docgen::manifest::Manifest;
/// use command_api_docgen::select::select_commands;
///
/// let manifest = Manifest::from_json_str(r#"[
///     {"sig": ["osd", "tree"], "desc": "print OSD tree"},
///     {"sig": ["mon", "sync", "force"], "desc": "internal", "flags": 36},
///     {"sig": ["mon", "stat"], "desc": "summarize monitor status"}
/// ]"#).unwrap();
///
/// let selection = select_commands(manifest).unwrap();
/// let prefixes: Vec<String> = selection.commands.iter().map(|c| c.prefix()).collect();
/// assert_eq!(prefixes, vec!["mon stat", "osd tree"]);
/// assert_eq!(selection.hidden, 1);
/// ```
pub fn select_commands(specs: impl IntoIterator<Item = CommandSpec>) -> Result<Selection> {
    let built = specs
        .into_iter()
        .map(Command::from_spec)
        .collect::<std::result::Result<Vec<_>, ModelError>>()?;
    let total = built.len();

    let mut commands: Vec<Command> = built
        .into_iter()
        .filter(|command| !command.flags.contains(Flag::Hidden))
        .collect();
    let hidden = total - commands.len();

    commands.sort_by(|a, b| a.sig.cmp(&b.sig));

    debug!(total, hidden, selected = commands.len(), "Selected commands");
    Ok(Selection { commands, hidden })
}
