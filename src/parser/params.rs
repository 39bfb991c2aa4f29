//! Definition-line parsing: tokenize the parameter list, then rewrite the
//! ordered records into the wrapper's formals.
//!
//! Rewrites applied, in order:
//!
//! | Catalogue                  | Wrapper                                          |
//! |----------------------------|--------------------------------------------------|
//! | `self`                     | dropped                                          |
//! | `self, output, i=None`     | `input, output`                                  |
//! | `i` / `i=None`             | `input`                                          |
//! | `callback=None`            | `wd=NULL, verbose_mode=FALSE, compress_rasters=FALSE` |
//! | `True` / `False` / `None`  | `TRUE` / `FALSE` / `NULL`                        |
//! | `And` / `Not` / `Or`       | `and` / `not` / `or`                             |

use crate::error::ParseError;
use crate::model::{DefaultValue, Param};

/// A `def` line after parsing and rewriting.
#[derive(Debug, PartialEq, Eq)]
pub struct Definition {
    /// Name as written in the catalogue
    pub name: String,
    /// Name the dispatcher knows the tool by
    pub tool_name: String,
    pub params: Vec<Param>,
}

/// A token from the parameter list before rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawParam {
    name: String,
    default: Option<String>,
}

impl RawParam {
    fn is(&self, name: &str, default: Option<&str>) -> bool {
        self.name == name && self.default.as_deref() == default
    }
}

/// Catalogue names that are Python keywords in title case.
const KEYWORD_TOOLS: &[&str] = &["And", "Not", "Or"];

/// Parse a trimmed `def name(params):` line. `line_no` is 1-based.
pub fn parse_definition(line: &str, line_no: usize) -> Result<Definition, ParseError> {
    let malformed = || ParseError::MalformedDefinition {
        line: line_no,
        text: line.to_string(),
    };

    let rest = line.strip_prefix("def").ok_or_else(malformed)?.trim_start();
    let open = rest.find('(').ok_or_else(malformed)?;
    let close = rest.rfind(')').ok_or_else(malformed)?;
    if close < open {
        return Err(malformed());
    }

    let name = rest[..open].trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(malformed());
    }

    let tokens = split_params(&rest[open + 1..close]).ok_or_else(malformed)?;
    let raw = tokens
        .iter()
        .map(|t| raw_param(t))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(malformed)?;

    let tool_name = if KEYWORD_TOOLS.contains(&name) {
        name.to_lowercase()
    } else {
        name.to_string()
    };

    Ok(Definition {
        name: name.to_string(),
        tool_name,
        params: rewrite(raw),
    })
}

/// Split a parameter list on top-level commas.
///
/// Commas inside string literals or brackets do not split. Returns `None`
/// when a quote or bracket is left open.
fn split_params(list: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;

    for ch in list.chars() {
        if let Some(q) = quote {
            current.push(ch);
            // Backslash escapes only matter inside a string literal.
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                current.push(ch);
            }
            ',' if depth == 0 => {
                tokens.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    if quote.is_some() || depth != 0 {
        return None;
    }
    tokens.push(current);

    Some(
        tokens
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    )
}

/// Classify a token as `name` or `name=default`. Annotations are dropped.
fn raw_param(token: &str) -> Option<RawParam> {
    let (lhs, default) = match token.split_once('=') {
        Some((lhs, rhs)) => (lhs, Some(rhs.trim().to_string())),
        None => (token, None),
    };
    let name = lhs.split(':').next().unwrap_or(lhs).trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some(RawParam {
        name: name.to_string(),
        default,
    })
}

/// Apply the renaming table to the ordered records.
fn rewrite(mut raw: Vec<RawParam>) -> Vec<Param> {
    let has_receiver = raw.first().is_some_and(|p| p.is("self", None));
    if has_receiver {
        raw.remove(0);
        if raw.len() >= 2 && raw[0].is("output", None) && raw[1].is("i", Some("None")) {
            raw.swap(0, 1);
        }
    }

    let mut params = Vec::with_capacity(raw.len() + 2);
    for p in raw {
        match (p.name.as_str(), p.default.as_deref()) {
            ("i", None) | ("i", Some("None")) => params.push(Param::positional("input")),
            ("callback", Some("None")) => params.extend(implicit_options()),
            (name, Some(default)) => {
                params.push(Param::keyword(name, DefaultValue::from_python(default)))
            }
            (name, None) => params.push(Param::positional(name)),
        }
    }
    params
}

/// Options every tool accepts through the dispatcher.
fn implicit_options() -> [Param; 3] {
    [
        Param::keyword("wd", DefaultValue::Null),
        Param::keyword("verbose_mode", DefaultValue::Bool(false)),
        Param::keyword("compress_rasters", DefaultValue::Bool(false)),
    ]
}
