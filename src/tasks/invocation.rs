//! Splitting task arguments into positionals, flags, and options.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::parse_bool;

/// Structured arguments for one task invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Positional arguments in order.
    pub positionals: Vec<String>,
    /// Flags passed as `--name` (or `--name=true`).
    pub flags: BTreeSet<String>,
    /// Options passed as `--name=value` or `--name value`.
    pub options: BTreeMap<String, String>,
}

/// Names a task template declares.
#[derive(Debug, Clone, Default)]
pub struct Declared<'a> {
    pub flags: BTreeSet<&'a str>,
    pub options: BTreeSet<&'a str>,
}

impl Invocation {
    /// Parse raw arguments against the declared flag and option names.
    ///
    /// `--x` is a flag only when `flag(name="x")` is declared, and an option
    /// only when `option(name="x")` is declared; anything else, and every
    /// argument after a bare `--`, is positional.
    pub fn parse(args: &[String], declared: &Declared<'_>) -> Result<Self, String> {
        let mut invocation = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if arg == "--" {
                invocation.positionals.extend(iter.by_ref().cloned());
                break;
            }

            let Some(body) = arg.strip_prefix("--").filter(|b| !b.is_empty()) else {
                invocation.positionals.push(arg.clone());
                continue;
            };
            let (name, inline_value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            if declared.options.contains(name) {
                let value = match inline_value {
                    Some(v) => v.to_string(),
                    None => iter
                        .next()
                        .cloned()
                        .ok_or_else(|| format!("option --{} requires a value", name))?,
                };
                invocation.options.insert(name.to_string(), value);
            } else if declared.flags.contains(name) {
                let on = match inline_value {
                    Some(v) => parse_bool(v)
                        .ok_or_else(|| format!("flag --{} expects true or false, got '{}'", name, v))?,
                    None => true,
                };
                if on {
                    invocation.flags.insert(name.to_string());
                } else {
                    invocation.flags.remove(name);
                }
            } else {
                invocation.positionals.push(arg.clone());
            }
        }

        Ok(invocation)
    }
}
