//! Generator configuration: toolbox table, preamble size, naming and layout.

use std::path::{Path, PathBuf};

/// Lines at the top of `whitebox_tools.py` that belong to the runner class
/// rather than the tool catalogue.
pub const DEFAULT_SKIP_LINES: usize = 567;

/// Where the prebuilt Linux bundle is published.
pub const DEFAULT_BUNDLE_URL: &str =
    "https://www.whiteboxgeo.com/WBT_Linux/WhiteboxTools_linux_amd64.zip";

/// Generator work directory inside the package root.
pub const DEFAULT_WORK_DIR: &str = "PY2R";

/// Name of the catalogue inside the bundle and in the work directory.
pub const CATALOGUE_FILE: &str = "whitebox_tools.py";

/// One row of the toolbox table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolboxEntry {
    pub header: &'static str,
    pub file_name: &'static str,
    pub examples: bool,
}

const fn toolbox(header: &'static str, file_name: &'static str, examples: bool) -> ToolboxEntry {
    ToolboxEntry {
        header,
        file_name,
        examples,
    }
}

/// Header text → output script. Matched by exact equality on the trimmed line.
pub const TOOLBOXES: &[ToolboxEntry] = &[
    toolbox("# Data Tools #", "data_tools.R", false),
    toolbox("# GIS Analysis #", "gis_analysis.R", false),
    toolbox("# Geomorphometric Analysis #", "terrain_analysis.R", false),
    toolbox("# Hydrological Analysis #", "hydro_analysis.R", false),
    toolbox("# Image Processing Tools #", "image_analysis.R", false),
    toolbox("# LiDAR Tools #", "lidar_analysis.R", false),
    toolbox("# Machine Learning #", "machine_learning.R", false),
    toolbox("# Math and Stats Tools #", "math_stat_analysis.R", true),
    toolbox("# Precision Agriculture #", "precision_agriculture.R", false),
    toolbox("# Stream Network Analysis #", "stream_network_analysis.R", false),
];

/// Tools whose sample-raster invocation does not produce the usual report.
pub const TEST_EXCLUSIONS: &[&str] = &[
    "raster_histogram",
    "attribute_correlation",
    "conditional_evaluation",
    "crispness_index",
    "ks_test_for_normality",
    "rescale_value_range",
    "trend_surface",
];

/// Tools that get a test stub but no roxygen example.
pub const EXAMPLE_EXCLUSIONS: &[&str] = &["raster_histogram"];

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub skip_lines: usize,
    pub toolboxes: Vec<ToolboxEntry>,
    /// Prepended to the tool name to form the R function name
    pub wrapper_prefix: String,
    pub test_exclusions: Vec<String>,
    pub example_exclusions: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            skip_lines: DEFAULT_SKIP_LINES,
            toolboxes: TOOLBOXES.to_vec(),
            wrapper_prefix: "wbt_".to_string(),
            test_exclusions: TEST_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            example_exclusions: EXAMPLE_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    /// Look up a trimmed line in the toolbox table.
    pub fn toolbox(&self, header: &str) -> Option<&ToolboxEntry> {
        self.toolboxes.iter().find(|t| t.header == header)
    }

    pub fn wrapper_name(&self, tool_name: &str) -> String {
        format!("{}{}", self.wrapper_prefix, tool_name)
    }

    pub fn wants_test(&self, tool_name: &str) -> bool {
        !self.test_exclusions.iter().any(|t| t == tool_name)
    }

    pub fn wants_example(&self, tool_name: &str) -> bool {
        !self.example_exclusions.iter().any(|t| t == tool_name)
    }
}

/// Directory layout of an R package checkout with the generator inside it.
///
/// ```text
/// <root>/WhiteboxTools_linux_amd64.zip   downloaded bundle
/// <root>/WBT/                            unpacked bundle
/// <root>/<work>/whitebox_tools.py        catalogue copy
/// <root>/<work>/scripts/*.R              generated toolbox scripts
/// <root>/<work>/tests/*.R                generated test stubs
/// <root>/R/                              package functions
/// <root>/tests/testthat/                 package tests
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub work: PathBuf,
}

impl Layout {
    pub fn new(root: &Path, work_dir: &Path) -> Self {
        Layout {
            root: root.to_path_buf(),
            work: root.join(work_dir),
        }
    }

    pub fn archive(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn bundle_dir(&self) -> PathBuf {
        self.root.join("WBT")
    }

    pub fn tool_binary(&self) -> PathBuf {
        self.bundle_dir().join("whitebox_tools")
    }

    pub fn catalogue(&self) -> PathBuf {
        self.work.join(CATALOGUE_FILE)
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.work.join("scripts")
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.work.join("tests")
    }

    pub fn package_functions_dir(&self) -> PathBuf {
        self.root.join("R")
    }

    pub fn package_tests_dir(&self) -> PathBuf {
        self.root.join("tests").join("testthat")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolbox_lookup_is_exact() {
        let config = GeneratorConfig::default();
        assert_eq!(
            config.toolbox("# LiDAR Tools #").map(|t| t.file_name),
            Some("lidar_analysis.R")
        );
        assert!(config.toolbox("# LiDAR Tools#").is_none());
        assert!(config.toolbox("# lidar tools #").is_none());
    }

    #[test]
    fn toolbox_files_are_unique() {
        let mut names: Vec<_> = TOOLBOXES.iter().map(|t| t.file_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TOOLBOXES.len());
    }

    #[test]
    fn only_math_and_stats_has_examples() {
        let with_examples: Vec<_> = TOOLBOXES.iter().filter(|t| t.examples).collect();
        assert_eq!(with_examples.len(), 1);
        assert_eq!(with_examples[0].file_name, "math_stat_analysis.R");
    }

    #[test]
    fn layout_paths() {
        let layout = Layout::new(Path::new("/pkg"), Path::new("PY2R"));
        assert_eq!(layout.catalogue(), Path::new("/pkg/PY2R/whitebox_tools.py"));
        assert_eq!(layout.package_tests_dir(), Path::new("/pkg/tests/testthat"));
        assert_eq!(layout.tool_binary(), Path::new("/pkg/WBT/whitebox_tools"));
    }

    #[test]
    fn exclusions() {
        let config = GeneratorConfig::default();
        assert!(!config.wants_test("trend_surface"));
        assert!(config.wants_test("absolute_value"));
        assert!(!config.wants_example("raster_histogram"));
        assert_eq!(config.wrapper_name("slope"), "wbt_slope");
    }
}
