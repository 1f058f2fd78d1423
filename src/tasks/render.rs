//! Evaluating a parsed template against an invocation.

use std::collections::BTreeMap;
use std::path::Path;

use super::invocation::Invocation;
use super::template::{Node, Template};

/// Why rendering failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// `arg()` number `position` (1-based) had no value and no default.
    MissingArgument { position: usize },
}

/// Inputs available to placeholders.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub invocation: &'a Invocation,
    /// Variables for `env.NAME`.
    pub env: &'a BTreeMap<String, String>,
    /// Value of `config_root`.
    pub config_root: &'a Path,
    /// Append arguments no `arg()` consumed.
    pub append_unused: bool,
}

/// Render a template.
///
/// Placeholders are evaluated left to right; each `arg()` takes the next
/// positional argument. Leftover positionals are appended, space-separated
/// and shell-quoted, when `append_unused` is set.
pub fn render(template: &Template, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let mut out = String::new();
    let mut positionals = ctx.invocation.positionals.iter();
    let mut arg_index = 0;

    for node in template.nodes() {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Arg(arg) => {
                arg_index += 1;
                let value = positionals
                    .next()
                    .or(arg.default.as_ref())
                    .ok_or(RenderError::MissingArgument {
                        position: arg_index,
                    })?;
                out.push_str(value);
            }
            Node::Flag(flag) => {
                let value = if ctx.invocation.flags.contains(&flag.name) {
                    "true"
                } else {
                    flag.default.as_deref().unwrap_or("false")
                };
                out.push_str(value);
            }
            Node::Option(option) => {
                let value = ctx
                    .invocation
                    .options
                    .get(&option.name)
                    .or(option.default.as_ref())
                    .map(String::as_str)
                    .unwrap_or("");
                out.push_str(value);
            }
            Node::Env(name) => {
                if let Some(value) = ctx.env.get(name) {
                    out.push_str(value);
                }
            }
            Node::ConfigRoot => out.push_str(&ctx.config_root.display().to_string()),
        }
    }

    if ctx.append_unused {
        let rest: Vec<String> = positionals.map(|a| shell_quote(a)).collect();
        if !rest.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&rest.join(" "));
        }
    }

    Ok(out)
}

/// Quote a word for a POSIX shell when it contains special characters.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,@+%".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
