//! Output formatting for the command reference.
//!
//! Rendering reads a fixed set of fields from each command, captured by
//! [`CommandView`]: heading, wrapped help, example invocation, parameter
//! name/help pairs, module, permission and flags text. The reST renderer
//! lays those out one section per command; the JSON format emits the views
//! themselves for use with external templates.

use command_api_core::Command;
use serde::Serialize;

/// Default column for word wrapping.
pub const DEFAULT_WRAP_WIDTH: usize = 70;

/// First line of every generated reST document.
pub const GENERATED_BANNER: &str = ".. This file is automatically generated. do not modify";

const HEADING_RULE: char = '^';
const EXAMPLE_INDENT: &str = "    ";
const PARAM_HELP_INDENT: usize = 2;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// reStructuredText reference page.
    #[default]
    Rst,
    /// JSON array of [`CommandView`]s.
    Json,
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Column at which help text is wrapped.
    pub wrap_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

/// A parameter as it appears in the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamView {
    pub name: String,
    /// Wrapped help fragment.
    pub help: String,
}

/// Everything the reference shows for one command.
///
/// # Examples
///
/// ```
/// use command_api_core::Command;
/// use command_api_docgen::output::{CommandView, RenderOptions};
///
/// let cmd = Command::new(&["mon", "compact"], "compact the store")
///     .with_module("mon")
///     .with_perm("rw");
/// let view = CommandView::new(&cmd, &RenderOptions::default());
///
/// assert_eq!(view.heading, "mon compact");
/// assert_eq!(view.example, "ceph mon compact");
/// assert!(view.params.is_empty());
/// assert_eq!(view.flags, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandView {
    /// Section heading: the command prefix.
    pub heading: String,
    /// Wrapped help text.
    pub help: String,
    /// Example invocation.
    pub example: String,
    /// Parameters, required first.
    pub params: Vec<ParamView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perm: Option<String>,
    /// Rendered flag set, absent when no flag is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

impl CommandView {
    /// Captures the fields of `command` shown in the reference.
    pub fn new(command: &Command, options: &RenderOptions) -> Self {
        Self {
            heading: command.prefix(),
            help: wrap_text(&command.help, options.wrap_width),
            example: command.bash_example(),
            params: command
                .params
                .iter()
                .map(|param| ParamView {
                    name: param.name.clone(),
                    help: wrap_text(&param.help(), options.wrap_width),
                })
                .collect(),
            module: command.module.clone(),
            perm: command.perm.clone(),
            flags: (!command.flags.is_empty()).then(|| command.flags.to_string()),
        }
    }
}

/// Renders the command sequence in the requested format.
///
/// Commands are emitted in the order given.
pub fn format_commands(
    commands: &[Command],
    options: &RenderOptions,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Rst => Ok(render_document(commands, options)),
        OutputFormat::Json => {
            let views: Vec<CommandView> = commands
                .iter()
                .map(|command| CommandView::new(command, options))
                .collect();
            serde_json::to_string_pretty(&views)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
    }
}

/// Renders the complete reST reference page.
pub fn render_document(commands: &[Command], options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push_str("\n\n");
    for command in commands {
        out.push_str(&render_view(&CommandView::new(command, options)));
    }
    out
}

/// Renders one command section, ending with a blank line.
///
/// # Examples
///
/// ```
/// use command_api_core::{Command, ParamType, Parameter};
/// use command_api_docgen::output::{RenderOptions, render_command};
///
/// let cmd = Command::new(&["osd", "down"], "set osd(s) down")
///     .with_param(Parameter::new("ids", ParamType::String).allow_repeat())
///     .with_module("osd")
///     .with_perm("rw");
///
/// let text = render_command(&cmd, &RenderOptions::default());
/// assert!(text.starts_with("osd down\n^^^^^^^^\n\nset osd(s) down\n"));
/// assert!(text.contains("    ceph osd down --ids=string\n"));
/// assert!(text.contains("* **ids**: (can be repeated)\n"));
/// assert!(!text.contains("Command Flags:"));
/// ```
pub fn render_command(command: &Command, options: &RenderOptions) -> String {
    render_view(&CommandView::new(command, options))
}

fn render_view(view: &CommandView) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n{}\n\n", view.heading, underline(&view.heading)));

    if !view.help.is_empty() {
        out.push_str(&format!("{}\n\n", view.help));
    }

    out.push_str("Example command:\n\n");
    out.push_str(".. code-block:: bash\n\n");
    out.push_str(&format!("{EXAMPLE_INDENT}{}\n\n", view.example));

    if !view.params.is_empty() {
        out.push_str("Parameters:\n\n");
        for param in &view.params {
            out.push_str(&format!(
                "* **{}**: {}\n",
                param.name,
                indent_continuation(&param.help, PARAM_HELP_INDENT)
            ));
        }
        out.push('\n');
    }

    if let Some(ref module) = view.module {
        out.push_str(&format!("Ceph Module:\n\n* *{module}*\n\n"));
    }

    if let Some(ref perm) = view.perm {
        out.push_str(&format!("Required Permissions:\n\n* *{perm}*\n\n"));
    }

    if let Some(ref flags) = view.flags {
        out.push_str(&format!("Command Flags:\n\n* *{flags}*\n\n"));
    }

    out
}

fn underline(heading: &str) -> String {
    std::iter::repeat_n(HEADING_RULE, heading.chars().count()).collect()
}

/// Greedy word wrap.
///
/// Existing line breaks are kept. Lines may break at whitespace or after the
/// hyphen of a hyphenated word such as `read-only`. A word longer than
/// `width` is split so that no line exceeds `width` characters. Whitespace
/// at a break is dropped; whitespace inside a line is kept as written.
///
/// # Examples
///
/// ```
/// use command_api_docgen::output::wrap_text;
///
/// assert_eq!(wrap_text("one two three four", 9), "one two\nthree\nfour");
/// assert_eq!(wrap_text("first\n\nsecond", 70), "first\n\nsecond");
/// assert_eq!(wrap_text("a long-standing issue", 10), "a long-\nstanding\nissue");
/// ```
pub fn wrap_text(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    // Reversed so the next chunk is always at the end.
    let mut chunks = split_chunks(line);
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        if !lines.is_empty() && chunks.last().is_some_and(|chunk| is_blank(chunk)) {
            chunks.pop();
        }

        let mut current: Vec<Vec<char>> = Vec::new();
        let mut current_len = 0;
        while chunks
            .last()
            .is_some_and(|chunk| current_len + chunk.len() <= width)
        {
            if let Some(chunk) = chunks.pop() {
                current_len += chunk.len();
                current.push(chunk);
            }
        }

        if let Some(chunk) = chunks.last_mut().filter(|chunk| chunk.len() > width) {
            let space = if width == 0 { 1 } else { width - current_len };
            current.push(split_long_word(chunk, space));
        }

        if current.last().is_some_and(|chunk| is_blank(chunk)) {
            current.pop();
        }
        if !current.is_empty() {
            lines.push(current.concat().into_iter().collect());
        }
    }

    lines.join("\n")
}

// Takes the piece of an over-long word that fits in `space`, preferring to
// end on a hyphen when one falls inside it.
fn split_long_word(chunk: &mut Vec<char>, space: usize) -> Vec<char> {
    let mut end = space.min(chunk.len());
    if let Some(hyphen) = chunk[..end].iter().rposition(|c| *c == '-') {
        if hyphen > 0 && chunk[..hyphen].iter().any(|c| *c != '-') {
            end = hyphen + 1;
        }
    }
    chunk.drain(..end).collect()
}

// Splits a line into breakable chunks: whitespace runs, words, pieces of
// hyphenated words ending in their hyphen, and `--` dashes between words.
fn split_chunks(line: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = line.chars().collect();
    let word = |i: usize| chars.get(i).is_some_and(|c| c.is_alphanumeric() || *c == '_');
    let letter = |i: usize| chars.get(i).is_some_and(|c| c.is_alphabetic() || *c == '_');
    let punct = |i: usize| word(i) || chars.get(i).is_some_and(|c| "!\"'&.,?".contains(*c));
    // Length of a run of two or more dashes at `i` that leads into a word.
    let dash_run = |i: usize| {
        let n = chars[i..].iter().take_while(|c| **c == '-').count();
        (n >= 2 && word(i + n)).then_some(n)
    };
    let hyphen_break = |i: usize| {
        let behind = (i >= 2 && letter(i - 2) && letter(i - 1))
            || (i >= 3 && letter(i - 3) && chars[i - 2] == '-' && letter(i - 1));
        let ahead =
            letter(i + 1) && (letter(i + 2) || (chars.get(i + 2) == Some(&'-') && letter(i + 3)));
        chars[i] == '-' && behind && ahead
    };

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = if is_wrap_space(chars[start]) {
            start + chars[start..].iter().take_while(|c| is_wrap_space(**c)).count()
        } else if let Some(n) = dash_run(start).filter(|_| start > 0 && punct(start - 1)) {
            start + n
        } else {
            let mut end = start + 1;
            loop {
                if end == chars.len() || is_wrap_space(chars[end]) {
                    break end;
                }
                if hyphen_break(end) {
                    break end + 1;
                }
                if punct(end - 1) && dash_run(end).is_some() {
                    break end;
                }
                end += 1;
            }
        };
        chunks.push(chars[start..end].to_vec());
        start = end;
    }
    chunks
}

fn is_wrap_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

fn is_blank(chunk: &[char]) -> bool {
    chunk.iter().copied().all(is_wrap_space)
}

// Continuation lines line up under the bullet text; blank lines stay empty.
fn indent_continuation(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    let mut lines = text.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
    }
    out
}
