//! Bounded docstring scan following a definition line.

use crate::error::ParseError;
use crate::model::DocBlock;

const DELIMITER: &str = "\"\"\"";

/// Marker separating a parameter name from its description.
const PARAM_MARKER: &str = "--";

/// Result of scanning one docstring.
#[derive(Debug)]
pub struct Docstring {
    pub doc: DocBlock,
    /// Index of the line holding the closing delimiter
    pub end: usize,
}

/// Scan `lines[start..]` for the docstring of `function` (defined on 1-based `def_line`).
///
/// The scan stops at the closing delimiter. Reaching end of file, or another
/// definition, before the delimiter is an error.
pub fn scan(
    lines: &[&str],
    start: usize,
    function: &str,
    def_line: usize,
) -> Result<Docstring, ParseError> {
    let mut doc = DocBlock::default();

    for (idx, raw) in lines.iter().enumerate().skip(start) {
        let line = raw.trim();

        if line == DELIMITER {
            return Ok(Docstring { doc, end: idx });
        }

        if let Some(rest) = line.strip_prefix(DELIMITER) {
            // One-line docstring: """Summary."""
            if let Some(summary) = rest.strip_suffix(DELIMITER) {
                doc.description = Some(summary.trim_end().to_string());
                return Ok(Docstring { doc, end: idx });
            }
            doc.description = Some(rest.trim_end().to_string());
            continue;
        }

        if line.starts_with("def ") {
            break;
        }

        if line.contains(PARAM_MARKER) && !line.starts_with("callback") {
            doc.params.push(param_line(line));
        }
    }

    Err(ParseError::UnterminatedDocstring {
        function: function.to_string(),
        line: def_line,
    })
}

/// `i -- Input file (50%).` → `input Input file (50 percent).`
fn param_line(line: &str) -> String {
    let line = match line.strip_prefix("i --") {
        Some(rest) => format!("input --{}", rest),
        None => line.to_string(),
    };
    // roxygen treats a bare % as the start of an Rd comment
    line.replace("-- ", "").replace('%', " percent")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn captures_summary_and_params() {
        let src = lines(
            r#"    def slope(self, dem, output, callback=None):
        """Calculates a slope raster from an input DEM.

        Keyword arguments:

        dem -- Input raster DEM file.
        output -- Output raster file.
        callback -- Custom function for handling tool text outputs.
        """
        args = []"#,
        );
        let ds = scan(&src, 1, "slope", 1).unwrap();
        assert_eq!(
            ds.doc.description.as_deref(),
            Some("Calculates a slope raster from an input DEM.")
        );
        assert_eq!(
            ds.doc.params,
            vec!["dem Input raster DEM file.", "output Output raster file."]
        );
        assert_eq!(ds.end, 8);
    }

    #[test]
    fn short_input_and_percent_are_rewritten() {
        let src = lines("\"\"\"Filter.\ni -- Input file.\nsig -- Threshold in %.\n\"\"\"");
        let ds = scan(&src, 0, "filter", 1).unwrap();
        assert_eq!(
            ds.doc.params,
            vec!["input Input file.", "sig Threshold in  percent."]
        );
    }

    #[test]
    fn one_line_docstring_terminates() {
        let src = lines("def f(self):\n    \"\"\"Does a thing.\"\"\"\n    return 1");
        let ds = scan(&src, 1, "f", 1).unwrap();
        assert_eq!(ds.doc.description.as_deref(), Some("Does a thing."));
        assert_eq!(ds.end, 1);
    }

    #[test]
    fn end_of_file_is_an_error() {
        let src = lines("\"\"\"Never closed.\ndem -- Input.");
        let err = scan(&src, 0, "broken", 9).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedDocstring {
                function: "broken".to_string(),
                line: 9
            }
        );
    }

    #[test]
    fn next_definition_is_an_error() {
        let src = lines("\"\"\"Open.\ndef other(self):\n\"\"\"Other.\n\"\"\"");
        assert!(scan(&src, 0, "open", 1).is_err());
    }
}
