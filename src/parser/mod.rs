//! Catalogue parser: a line-by-line scan of `whitebox_tools.py`.
//!
//! Lines before `GeneratorConfig::skip_lines` are never classified. After
//! that, each trimmed line is either a toolbox header, a `def` (followed by
//! its docstring, which the scan consumes) or ignored.

pub mod docstring;
pub mod params;

use crate::config::GeneratorConfig;
use crate::error::ParseError;
use crate::model::{Catalogue, Section, ToolFunction};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Anything shaped like a toolbox banner: `# Some Tools #`.
static RE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[[:blank:]]+([^#[:blank:]].*?)[[:blank:]]+#$").unwrap());

/// Where the next function goes.
enum Target {
    None,
    Section(usize),
    Unmapped { header: String, line: usize },
}

/// Parse a catalogue into sections of rewritten functions.
pub fn parse(input: &str, config: &GeneratorConfig) -> Result<Catalogue, ParseError> {
    let lines: Vec<&str> = input.lines().collect();
    let mut catalogue = Catalogue::default();
    let mut target = Target::None;

    let mut idx = config.skip_lines;
    while idx < lines.len() {
        let line = lines[idx].trim();
        let line_no = idx + 1;

        if let Some(entry) = config.toolbox(line) {
            // A repeated header continues the file it already opened.
            let pos = match catalogue
                .sections
                .iter()
                .position(|s| s.file_name == entry.file_name)
            {
                Some(pos) => pos,
                None => {
                    catalogue.sections.push(Section {
                        header: line.to_string(),
                        file_name: entry.file_name.to_string(),
                        examples: entry.examples,
                        functions: Vec::new(),
                    });
                    catalogue.sections.len() - 1
                }
            };
            debug!(header = line, file = entry.file_name, "toolbox");
            target = Target::Section(pos);
        } else if RE_HEADER.is_match(line) {
            debug!(header = line, line = line_no, "unmapped toolbox header");
            target = Target::Unmapped {
                header: line.to_string(),
                line: line_no,
            };
        } else if line.starts_with("def ") {
            let def = params::parse_definition(line, line_no)?;
            let ds = docstring::scan(&lines, idx + 1, &def.name, line_no)?;

            let section = match &target {
                Target::Section(pos) => &mut catalogue.sections[*pos],
                Target::None => {
                    return Err(ParseError::NoToolbox {
                        function: def.name,
                        line: line_no,
                    })
                }
                Target::Unmapped { header, line } => {
                    return Err(ParseError::UnmappedToolbox {
                        function: def.name,
                        line: line_no,
                        header: header.clone(),
                        header_line: *line,
                    })
                }
            };

            debug!(function = %def.name, line = line_no, "definition");
            section.functions.push(ToolFunction {
                name: def.name,
                tool_name: def.tool_name,
                line: line_no,
                params: def.params,
                doc: ds.doc,
            });
            idx = ds.end;
        }

        idx += 1;
    }

    Ok(catalogue)
}
