use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use cover_letter_pdf::fonts::FontConfig;
use cover_letter_pdf::style::StyleSheet;
use cover_letter_pdf::{layout, sample, CoverLetter, PdfBuilder, Settings, ThemeVariant};
use env_logger::Env;
use log::{info, LevelFilter};

/// Renders cover letters to PDF from the resume builder's JSON exports.
///
/// Fonts are looked up in `--fonts-dir`, then `COVER_LETTER_FONTS_DIR`, then
/// `assets/fonts` next to the binary and in the library crate.
#[derive(Parser)]
#[command(author, version, about = "Cover letter PDF renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a cover letter JSON file to PDF.
    Render {
        /// Cover letter JSON (`{"profile": {...}, "content": "..."}`).
        #[arg(long, short)]
        letter: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the normalized letter and derived styles as JSON.
    Inspect {
        /// Cover letter JSON.
        #[arg(long, short)]
        letter: PathBuf,
        /// Settings JSON as stored by the front end.
        #[arg(long, short)]
        settings: Option<PathBuf>,
    },

    /// Render the built-in sample letter.
    Sample {
        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Settings JSON as stored by the front end.
    #[arg(long, short)]
    settings: Option<PathBuf>,
    /// Output file.
    #[arg(long, short, default_value = "cover_letter.pdf")]
    output: PathBuf,
    /// Theme override (`default` or `minimal`).
    #[arg(long)]
    theme: Option<String>,
    /// Directory holding `<Family>-Regular.ttf` and friends.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_env(Env::new().filter("COVER_LETTER_LOG"))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render { letter, render } => {
            read_letter(&letter).and_then(|letter| run_render(&letter, &render))
        }
        Commands::Inspect { letter, settings } => run_inspect(&letter, settings.as_deref()),
        Commands::Sample { render } => run_render(&sample::sample_cover_letter(), &render),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn read_letter(path: &Path) -> Result<CoverLetter, Box<dyn Error>> {
    let json = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read letter {}: {}", path.display(), err))?;
    Ok(CoverLetter::from_json(&json)?)
}

fn read_settings(path: Option<&Path>) -> Result<Settings, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let json = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read settings {}: {}", path.display(), err))?;
    Ok(Settings::from_json(&json)?)
}

fn run_render(letter: &CoverLetter, args: &RenderArgs) -> Result<(), Box<dyn Error>> {
    let mut settings = read_settings(args.settings.as_deref())?;
    if let Some(theme) = &args.theme {
        settings = settings.with_theme(ThemeVariant::from_setting(theme));
    }

    let document = cover_letter_pdf::build_document(letter, &settings);
    let pdf = PdfBuilder::new()
        .with_font_config(FontConfig::new().with_directory(args.fonts_dir.clone()))
        .render(&document)?;

    fs::write(&args.output, &pdf.bytes)?;
    info!(
        "Generated {} ({} bytes, {} theme)",
        args.output.display(),
        pdf.bytes.len(),
        settings.cover_letter_theme.as_str()
    );
    Ok(())
}

fn run_inspect(letter: &Path, settings: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let letter = read_letter(letter)?;
    let settings = read_settings(settings)?;
    let normalized = letter.normalize();
    let sheet = StyleSheet::for_settings(&settings);

    let report = serde_json::json!({
        "title": layout::document_title(&normalized.personal.name),
        "letter": normalized,
        "style": sheet,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
