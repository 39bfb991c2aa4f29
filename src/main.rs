//! py2r: generate the whitebox R package's tool wrappers from the
//! WhiteboxTools Python catalogue.
//!
//! - `py2r sync`: download and unpack the tool bundle, generate, install into `R/` and `tests/testthat/`
//! - `py2r generate <catalogue> -o scripts -t tests`: generation only
//! - `py2r functions <catalogue>`: print rewritten signatures
//! - `py2r example <tool>`: print a usage example scraped from the tool's help

mod config;
mod error;
mod example;
mod fetch;
mod install;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{
    GeneratorConfig, Layout, DEFAULT_BUNDLE_URL, DEFAULT_SKIP_LINES, DEFAULT_WORK_DIR,
};
use example::fixups::FixupTable;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "py2r",
    about = "Generate R wrappers, roxygen docs and testthat stubs from whitebox_tools.py"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Download the bundle, regenerate every script and install into the package (default)
    Sync {
        /// R package root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Generator work directory, relative to the root
        #[arg(long, default_value = DEFAULT_WORK_DIR)]
        work_dir: PathBuf,

        /// Tool bundle URL
        #[arg(long, default_value = DEFAULT_BUNDLE_URL)]
        url: String,

        /// Catalogue lines to skip before the first toolbox
        #[arg(long, default_value_t = DEFAULT_SKIP_LINES)]
        skip_lines: usize,
    },

    /// Generate scripts and tests from a catalogue, without network or install
    Generate {
        /// Path to whitebox_tools.py
        catalogue: PathBuf,

        /// Directory for toolbox scripts
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Directory for test stubs
        #[arg(short = 't', long)]
        tests: PathBuf,

        #[arg(long, default_value_t = DEFAULT_SKIP_LINES)]
        skip_lines: usize,
    },

    /// Print each rewritten signature, one per line
    Functions {
        catalogue: PathBuf,

        #[arg(long, default_value_t = DEFAULT_SKIP_LINES)]
        skip_lines: usize,
    },

    /// Print a usage example built from the tool binary's help text
    Example {
        /// Tool name, e.g. slope
        tool: String,

        /// R package root holding the unpacked bundle
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Path to the whitebox_tools binary [default: <root>/WBT/whitebox_tools]
        #[arg(long)]
        exe: Option<PathBuf>,

        /// JSON fixup table replacing the built-in one
        #[arg(long)]
        fixups: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Command::Sync {
        root: PathBuf::from("."),
        work_dir: PathBuf::from(DEFAULT_WORK_DIR),
        url: DEFAULT_BUNDLE_URL.to_string(),
        skip_lines: DEFAULT_SKIP_LINES,
    });

    match command {
        Command::Sync {
            root,
            work_dir,
            url,
            skip_lines,
        } => sync_mode(&Layout::new(&root, &work_dir), &url, skip_lines),
        Command::Generate {
            catalogue,
            output,
            tests,
            skip_lines,
        } => generate_mode(&catalogue, &output, &tests, skip_lines).map(|_| ()),
        Command::Functions {
            catalogue,
            skip_lines,
        } => functions_mode(&catalogue, skip_lines),
        Command::Example {
            tool,
            root,
            exe,
            fixups,
        } => {
            let exe = exe
                .unwrap_or_else(|| Layout::new(&root, Path::new(DEFAULT_WORK_DIR)).tool_binary());
            example_mode(&tool, &exe, fixups.as_deref())
        }
    }
}

/// Log to stderr so stdout stays clean for `functions` and `example`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Full pipeline: fetch, unpack, generate, install.
fn sync_mode(layout: &Layout, url: &str, skip_lines: usize) -> Result<()> {
    let archive = layout.archive(fetch::archive_name(url)?);
    fetch::ensure_archive(url, &archive)?;
    fetch::unpack(&archive, &layout.root, &layout.bundle_dir())?;

    let bundled = layout.bundle_dir().join(config::CATALOGUE_FILE);
    let catalogue = layout.catalogue();
    fs::create_dir_all(&layout.work)
        .with_context(|| format!("failed to create {}", layout.work.display()))?;
    fs::copy(&bundled, &catalogue).with_context(|| {
        format!(
            "failed to copy {} to {}",
            bundled.display(),
            catalogue.display()
        )
    })?;

    generate_mode(
        &catalogue,
        &layout.scripts_dir(),
        &layout.tests_dir(),
        skip_lines,
    )?;

    install::copy_r_files(&layout.scripts_dir(), &layout.package_functions_dir())?;
    install::copy_r_files(&layout.tests_dir(), &layout.package_tests_dir())?;
    Ok(())
}

/// Parse, render, write. Returns the paths written.
fn generate_mode(
    catalogue: &Path,
    scripts_dir: &Path,
    tests_dir: &Path,
    skip_lines: usize,
) -> Result<Vec<PathBuf>> {
    let config = GeneratorConfig::default().with_skip_lines(skip_lines);
    let parsed = read_catalogue(catalogue, &config)?;
    let generated = render::render(&parsed, &config);
    let written = render::write(&generated, scripts_dir, tests_dir)?;
    info!(
        functions = parsed.functions().count(),
        scripts = generated.scripts.len(),
        tests = generated.tests.len(),
        "generated"
    );
    Ok(written)
}

fn functions_mode(catalogue: &Path, skip_lines: usize) -> Result<()> {
    let config = GeneratorConfig::default().with_skip_lines(skip_lines);
    let parsed = read_catalogue(catalogue, &config)?;
    for func in parsed.functions() {
        println!("{}", func.signature());
    }
    Ok(())
}

fn example_mode(tool: &str, exe: &Path, fixups: Option<&Path>) -> Result<()> {
    let table = match fixups {
        Some(path) => FixupTable::load(path)?,
        None => FixupTable::builtin()?,
    };
    let config = GeneratorConfig::default();
    let help = example::tool_help(exe, tool)?;
    let call = example::synthesize(tool, &config.wrapper_name(tool), &help, &table)?;
    println!("{}", call);
    Ok(())
}

fn read_catalogue(path: &Path, config: &GeneratorConfig) -> Result<model::Catalogue> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parser::parse(&content, config).map_err(|e| {
        let what = if e.is_configuration() {
            "toolbox table does not cover"
        } else {
            "failed to parse"
        };
        let msg = format!("{} {} (line {})", what, path.display(), e.line());
        anyhow::Error::new(e).context(msg)
    })
}
