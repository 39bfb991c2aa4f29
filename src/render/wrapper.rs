//! R wrapper function emission.
//!
//! Each wrapper maps its formals onto `--flag` arguments and hands them to
//! `wbt_run_tool`:
//!
//! - no default → `--name=value` always (paths go through `wbt_file_path`)
//! - `TRUE`/`FALSE` default → bare `--name` when the value is true
//! - any other default → `--name=value` when the value is not `NULL`
//! - `verbose_mode` → never forwarded

use crate::model::{render_params, DefaultValue, Param, ToolFunction, VERBOSE_OPTION};
use std::fmt::Write;

/// How a single parameter is forwarded.
#[derive(Debug, PartialEq, Eq)]
pub enum Forward {
    Always,
    IfTrue,
    IfNotNull,
    Never,
}

pub fn forward_rule(param: &Param) -> Forward {
    if param.name == VERBOSE_OPTION {
        return Forward::Never;
    }
    match &param.default {
        None => Forward::Always,
        Some(DefaultValue::Bool(_)) => Forward::IfTrue,
        Some(DefaultValue::Null | DefaultValue::Literal(_)) => Forward::IfNotNull,
    }
}

/// Append the wrapper definition for `func`, named `wrapper_name`.
pub fn render_wrapper(out: &mut String, func: &ToolFunction, wrapper_name: &str) {
    let _ = writeln!(
        out,
        "{} <- function({}) {{",
        wrapper_name,
        render_params(&func.params)
    );
    out.push_str("  wbt_init()\n");
    out.push_str("  args <- \"\"\n");

    for param in &func.params {
        let name = &param.name;
        match forward_rule(param) {
            Forward::Always => {
                let _ = writeln!(
                    out,
                    "  args <- paste(args, paste0(\"--{name}=\", wbt_file_path({name})))"
                );
            }
            Forward::IfTrue => {
                let _ = writeln!(out, "  if ({name}) {{");
                let _ = writeln!(out, "    args <- paste(args, \"--{name}\")");
                out.push_str("  }\n");
            }
            Forward::IfNotNull => {
                let _ = writeln!(out, "  if (!is.null({name})) {{");
                let _ = writeln!(out, "    args <- paste(args, paste0(\"--{name}=\", {name}))");
                out.push_str("  }\n");
            }
            Forward::Never => {}
        }
    }

    let _ = writeln!(out, "  tool_name <- \"{}\"", func.tool_name);
    let _ = writeln!(out, "  wbt_run_tool(tool_name, args, {VERBOSE_OPTION})");
    out.push_str("}\n\n\n");
}
