// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Eurolabel — multilingual food label preview and print-ready PDF export.
//
// Entry point. Initialises logging, loads configuration, builds a session from
// the input file and flags, and runs one command.

mod input;
mod services;
mod state;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use eurolabel_core::human_errors::{HumanError, humanize_error};
use eurolabel_core::{FieldId, LabelError, Language, PaperSize, Result};
use eurolabel_export::SurfaceHandle;
use tracing::{error, info};

use input::{Edit, LabelInput, parse_assignment};
use services::app_services::AppServices;
use state::LabelSession;

#[derive(Parser)]
#[command(name = "eurolabel")]
#[command(version)]
#[command(about = "Lay out EU food labels in four languages and export print-ready PDFs")]
#[command(long_about = None)]
struct Cli {
    /// Extra font file for rendering (repeatable), e.g. a CJK face
    #[arg(long, global = true, value_name = "FILE")]
    font: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the label for one language and size to SVG or PNG
    Preview {
        #[command(flatten)]
        label: LabelArgs,

        /// Language to show (EN, DE, FR, IT)
        #[arg(short, long)]
        lang: Option<Language>,

        /// Paper size (10x10cm, 10x15cm)
        #[arg(short, long)]
        size: Option<PaperSize>,

        /// Translate the content before rendering
        #[arg(short, long)]
        translate: bool,

        /// Pixel density for PNG output, relative to the on-screen size
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// Output file; the extension selects the format
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Translate the content and print the result as JSON
    Translate {
        #[command(flatten)]
        label: LabelArgs,
    },

    /// Export print-ready PDFs
    Export {
        #[command(flatten)]
        label: LabelArgs,

        /// Export only this language
        #[arg(short, long, conflicts_with = "all")]
        lang: Option<Language>,

        /// Export every translated language
        #[arg(short, long)]
        all: bool,

        /// Paper size (10x10cm, 10x15cm)
        #[arg(short, long)]
        size: Option<PaperSize>,

        /// Translate the content before exporting
        #[arg(short, long)]
        translate: bool,

        /// Directory for the PDFs
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Show the configuration, or write the defaults to disk
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Where the label content comes from.
#[derive(Args)]
struct LabelArgs {
    /// JSON file with `content` and `enabled` objects
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Set a field, e.g. `productName=牛肉干` or `nutrition.salt=2.1`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Print a field that is off by default
    #[arg(long, value_name = "FIELD")]
    enable: Vec<FieldId>,

    /// Leave out an optional field
    #[arg(long, value_name = "FIELD")]
    disable: Vec<FieldId>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "command failed");
            print_human(&humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut services = AppServices::init();
    services.add_fonts(cli.font);

    match cli.command {
        Commands::Preview {
            label,
            lang,
            size,
            translate,
            scale,
            out,
        } => {
            let mut session = open_session(&services, &label)?;
            if translate {
                translate_or_warn(&services, &mut session).await;
            }
            let language = lang.unwrap_or(session.language());
            let size = size.unwrap_or(session.size());
            let handle = session.show(language, size).await?;
            write_preview(&services, &handle, scale, &out)?;
            info!(path = %out.display(), %language, %size, "preview written");
        }

        Commands::Translate { label } => {
            let mut session = open_session(&services, &label)?;
            let translator = services.translator()?;
            session.translate(&translator).await?;
            println!("{}", serde_json::to_string_pretty(session.translations())?);
        }

        Commands::Export {
            label,
            lang,
            all,
            size,
            translate,
            out_dir,
        } => {
            let mut session = open_session(&services, &label)?;
            if translate {
                translate_or_warn(&services, &mut session).await;
            }
            if let Some(size) = size {
                session.show(session.language(), size).await?;
            }
            let exporter = services.exporter(out_dir)?;

            if all {
                let report = session.export_all(&exporter).await?;
                for file in report.files() {
                    println!("{}  {}", file.path.display(), file.sha256);
                }
                for (language, err) in report.failures() {
                    eprintln!("{language}: {err}");
                    print_human(&humanize_error(err));
                }
            } else {
                let language = lang.unwrap_or(session.language());
                let file = session.export_one(&exporter, language).await?;
                println!("{}  {}", file.path.display(), file.sha256);
            }
        }

        Commands::Config { init } => {
            if init {
                services.save_config(Default::default())?;
                println!("{}", services.config_path().display());
            } else {
                println!("{}", serde_json::to_string_pretty(services.config())?);
            }
        }
    }

    Ok(())
}

/// Build a session from the input file, then `--set`, `--enable` and
/// `--disable` in that order.
fn open_session(services: &AppServices, args: &LabelArgs) -> Result<LabelSession> {
    let mut edits = match &args.input {
        Some(path) => LabelInput::from_path(path)?.edits()?,
        None => Vec::new(),
    };
    for assignment in &args.set {
        edits.push(parse_assignment(assignment)?);
    }
    edits.extend(args.enable.iter().map(|&id| Edit::Enable(id, true)));
    edits.extend(args.disable.iter().map(|&id| Edit::Enable(id, false)));

    let mut session = LabelSession::new(services.config());
    session.apply(edits)?;
    Ok(session)
}

/// Translation failures are reported but do not stop the command; the label
/// falls back to the source content.
async fn translate_or_warn(services: &AppServices, session: &mut LabelSession) {
    let result = match services.translator() {
        Ok(translator) => session.translate(&translator).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        print_human(&humanize_error(&err));
    }
}

fn write_preview(
    services: &AppServices,
    handle: &SurfaceHandle,
    scale: f32,
    out: &Path,
) -> Result<()> {
    let extension = out
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("svg") => std::fs::write(out, &handle.markup)?,
        Some("png") => {
            let background = services.config().background_rgb();
            let raster = services.rasterizer()?.capture(handle, scale, background)?;
            std::fs::write(out, raster.to_png_bytes()?)?;
        }
        other => {
            return Err(LabelError::UnknownKey(format!(
                "preview format '{}' (use .svg or .png)",
                other.unwrap_or("")
            )));
        }
    }
    Ok(())
}

fn print_human(human: &HumanError) {
    eprintln!("{}", human.message);
    eprintln!("  {}", human.suggestion);
}
