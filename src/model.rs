//! Intermediate representation of a parsed tool catalogue, independent of the R output.

/// Options appended to every tool by the `callback=None` expansion.
/// They are handled by the dispatcher rather than documented per tool.
pub const IMPLICIT_OPTIONS: &[&str] = &["wd", VERBOSE_OPTION, "compress_rasters"];

/// The verbosity switch. Consumed by `wbt_run_tool`, never forwarded as a flag.
pub const VERBOSE_OPTION: &str = "verbose_mode";

/// Complete parsed catalogue, sections in first-seen order.
#[derive(Debug, Default)]
pub struct Catalogue {
    pub sections: Vec<Section>,
}

impl Catalogue {
    /// All functions across every section, in source order per section.
    pub fn functions(&self) -> impl Iterator<Item = &ToolFunction> {
        self.sections.iter().flat_map(|s| s.functions.iter())
    }
}

/// One toolbox: a header line and the output file its functions land in.
#[derive(Debug)]
pub struct Section {
    /// Trimmed header text, e.g. `# Data Tools #`
    pub header: String,
    /// Output script name, e.g. `data_tools.R`
    pub file_name: String,
    /// Whether functions here get roxygen examples and test stubs
    pub examples: bool,
    pub functions: Vec<ToolFunction>,
}

/// A single tool function from the catalogue.
#[derive(Debug)]
pub struct ToolFunction {
    /// Name as spelled in the catalogue (`And`, `slope`)
    pub name: String,
    /// Name passed to the dispatcher (`and`, `slope`)
    pub tool_name: String,
    /// 1-based line of the `def`
    pub line: usize,
    /// Rewritten parameters, in emission order
    pub params: Vec<Param>,
    pub doc: DocBlock,
}

impl ToolFunction {
    /// Human-readable title: underscores to spaces, first letter upper-cased.
    pub fn title(&self) -> String {
        let spaced = self.name.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Summary without its trailing period, falling back to the title.
    pub fn label(&self) -> String {
        match self.doc.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => desc.strip_suffix('.').unwrap_or(desc).to_string(),
            _ => self.title(),
        }
    }

    /// `input, output` plus nothing but the implicit options.
    pub fn is_input_output_only(&self) -> bool {
        let positional: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.default.is_none())
            .map(|p| p.name.as_str())
            .collect();
        positional == ["input", "output"]
            && self.params.iter().any(|p| p.name == VERBOSE_OPTION)
            && self
                .params
                .iter()
                .filter(|p| p.default.is_some())
                .all(|p| IMPLICIT_OPTIONS.contains(&p.name.as_str()))
    }

    /// Rewritten signature, e.g. `slope(dem, output, units="degrees")`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.tool_name, render_params(&self.params))
    }
}

/// Render a parameter list as R formals.
pub fn render_params(params: &[Param]) -> String {
    params
        .iter()
        .map(Param::to_r)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A parameter record after rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub default: Option<DefaultValue>,
}

impl Param {
    pub fn positional(name: &str) -> Self {
        Param {
            name: name.to_string(),
            default: None,
        }
    }

    pub fn keyword(name: &str, default: DefaultValue) -> Self {
        Param {
            name: name.to_string(),
            default: Some(default),
        }
    }

    /// `name` or `name=DEFAULT` in R syntax.
    pub fn to_r(&self) -> String {
        match &self.default {
            Some(d) => format!("{}={}", self.name, d.to_r()),
            None => self.name.clone(),
        }
    }
}

/// A default value literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    Null,
    /// Any other literal, kept verbatim (`"degrees"`, `1.0`)
    Literal(String),
}

impl DefaultValue {
    /// Translate a Python literal. Only whole tokens are translated.
    pub fn from_python(token: &str) -> Self {
        match token {
            "True" => DefaultValue::Bool(true),
            "False" => DefaultValue::Bool(false),
            "None" => DefaultValue::Null,
            other => DefaultValue::Literal(other.to_string()),
        }
    }

    pub fn to_r(&self) -> String {
        match self {
            DefaultValue::Bool(true) => "TRUE".to_string(),
            DefaultValue::Bool(false) => "FALSE".to_string(),
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::Literal(s) => s.clone(),
        }
    }
}

/// Docstring content captured after a definition.
#[derive(Debug, Default)]
pub struct DocBlock {
    /// Text after the opening `"""`
    pub description: Option<String>,
    /// Parameter lines with the `-- ` marker removed, e.g. `dem Input raster DEM file.`
    pub params: Vec<String>,
}
