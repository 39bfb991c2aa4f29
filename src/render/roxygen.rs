//! roxygen2 documentation block emission.

use crate::model::ToolFunction;
use std::fmt::Write;

/// Documentation for the options added by the `callback` expansion.
const IMPLICIT_PARAM_DOCS: &[&str] = &[
    "wd Changes the working directory.",
    "verbose_mode Sets verbose mode. If verbose mode is False, tools will not print output messages.",
    "compress_rasters Sets the flag used by WhiteboxTools to determine whether to use compression for output rasters.",
];

/// Append the `#'` block that precedes a wrapper.
///
/// `example` is the wrapper name to show in an `@examples` section, if any.
pub fn render_docs(out: &mut String, func: &ToolFunction, example: Option<&str>) {
    let _ = writeln!(out, "#' {}", func.title());
    out.push_str("#'\n");

    if let Some(ref desc) = func.doc.description {
        let _ = writeln!(out, "#' {}", desc);
        out.push_str("#'\n");
    }

    for param in func.doc.params.iter().map(String::as_str).chain(IMPLICIT_PARAM_DOCS.iter().copied()) {
        let _ = writeln!(out, "#' @param {}", param);
    }

    out.push_str("#'\n");
    out.push_str("#' @return Returns the tool text outputs.\n");
    out.push_str("#' @export\n");

    if let Some(wrapper) = example {
        out.push_str("#'\n");
        out.push_str("#' @examples\n");
        out.push_str("#' \\dontrun{\n");
        out.push_str("#' dem <- system.file(\"extdata\", \"DEM.tif\", package=\"whitebox\")\n");
        let _ = writeln!(out, "#' {}(input = dem, output = 'output.tif')", wrapper);
        out.push_str("#' }\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocBlock;

    fn func(description: Option<&str>, params: &[&str]) -> ToolFunction {
        ToolFunction {
            name: "absolute_value".to_string(),
            tool_name: "absolute_value".to_string(),
            line: 1,
            params: Vec::new(),
            doc: DocBlock {
                description: description.map(str::to_string),
                params: params.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn full_block_with_example() {
        let mut out = String::new();
        render_docs(
            &mut out,
            &func(
                Some("Calculates the absolute value of every cell in a raster."),
                &["input Input raster file.", "output Output raster file."],
            ),
            Some("wbt_absolute_value"),
        );
        let expected = r#"#' Absolute value
#'
#' Calculates the absolute value of every cell in a raster.
#'
#' @param input Input raster file.
#' @param output Output raster file.
#' @param wd Changes the working directory.
#' @param verbose_mode Sets verbose mode. If verbose mode is False, tools will not print output messages.
#' @param compress_rasters Sets the flag used by WhiteboxTools to determine whether to use compression for output rasters.
#'
#' @return Returns the tool text outputs.
#' @export
#'
#' @examples
#' \dontrun{
#' dem <- system.file("extdata", "DEM.tif", package="whitebox")
#' wbt_absolute_value(input = dem, output = 'output.tif')
#' }
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn no_summary_no_example() {
        let mut out = String::new();
        render_docs(&mut out, &func(None, &[]), None);
        assert!(out.starts_with("#' Absolute value\n#'\n#' @param wd "));
        assert!(out.ends_with("#' @export\n"));
        assert!(!out.contains("@examples"));
    }
}
