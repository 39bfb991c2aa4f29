//! testthat stub emission.

use crate::model::ToolFunction;
use std::fmt::Write;

/// Text every successful tool run prints.
pub const SUCCESS_MARKER: &str = "Elapsed Time";

/// `test-wbt_slope.R`
pub fn test_file_name(wrapper_name: &str) -> String {
    format!("test-{}.R", wrapper_name)
}

/// Render a test that runs the wrapper on the bundled sample DEM.
pub fn render_test(func: &ToolFunction, wrapper_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "context(\"{}\")\n", wrapper_name);
    let _ = writeln!(out, "test_that(\"{}\", {{\n", r_escape(&func.label()));
    out.push_str("  skip_on_cran()\n");
    out.push_str("  skip_if_not(check_whitebox_binary())\n");
    out.push_str("  dem <- system.file(\"extdata\", \"DEM.tif\", package = \"whitebox\")\n");
    let _ = writeln!(
        out,
        "  ret <- {}(input = dem, output = \"output.tif\")",
        wrapper_name
    );
    let _ = writeln!(out, "  expect_match(ret, \"{}\")\n", SUCCESS_MARKER);
    out.push_str("})\n");
    out
}

/// Escape text for a double-quoted R string.
fn r_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
