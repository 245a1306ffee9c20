//! Font family lookup and loading.
//!
//! Families are loaded from TrueType files named `<Family>-Regular.ttf`,
//! `<Family>-Bold.ttf`, `<Family>-Italic.ttf` and `<Family>-BoldItalic.ttf`.  Directories
//! are searched in this order: the directory from [`FontConfig`], the
//! `COVER_LETTER_FONTS_DIR` environment variable, `assets/fonts` next to the executable
//! and `assets/fonts` in the crate manifest directory.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Environment variable pointing at a fonts directory.
pub const FONTS_DIR_ENV: &str = "COVER_LETTER_FONTS_DIR";

/// Family used when the requested one is not allowed or not installed.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Families the front end offers for English letters.
pub const ENGLISH_FONT_FAMILIES: &[&str] = &[
    "Roboto",
    "Lato",
    "Montserrat",
    "OpenSans",
    "Raleway",
    "Caladea",
    "Lora",
    "RobotoSlab",
    "PlayfairDisplay",
    "Merriweather",
];

const FONT_STYLES: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

/// Returns `family` when it is on the allow-list, the default family otherwise.
pub fn validate_family(family: &str) -> &str {
    if ENGLISH_FONT_FAMILIES.contains(&family) {
        family
    } else {
        DEFAULT_FONT_FAMILY_NAME
    }
}

/// Where to look for font files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontConfig {
    directory: Option<PathBuf>,
}

impl FontConfig {
    /// Creates a configuration relying on the environment and bundled locations only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `directory` before every other location.
    pub fn with_directory(mut self, directory: impl Into<Option<PathBuf>>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Returns the explicitly configured directory, if any.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        let mut push = |candidate: PathBuf| {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        };

        if let Some(directory) = &self.directory {
            push(directory.clone());
        }

        if let Some(path) = env::var_os(FONTS_DIR_ENV).filter(|value| !value.is_empty()) {
            push(PathBuf::from(path));
        }

        if let Ok(current_exe) = env::current_exe() {
            if let Some(bin_dir) = current_exe.parent() {
                push(bin_dir.join("assets/fonts"));
            }
        }

        push(bundled_fonts_source_dir());
        candidates
    }

    /// Finds the first directory holding every style of `family`.
    pub fn resolve_directory(&self, family: &str) -> Result<PathBuf, Error> {
        let mut attempts = Vec::new();

        for candidate in self.candidates() {
            if !candidate.is_dir() {
                attempts.push(format!("{} (directory missing)", candidate.display()));
                continue;
            }

            let missing = missing_font_files(&candidate, family);
            if missing.is_empty() {
                return Ok(candidate);
            }
            attempts.push(format!(
                "{} (missing files [{}])",
                candidate.display(),
                missing.join(", ")
            ));
        }

        Err(Error::new(
            format!(
                "Unable to locate font family '{}'. Checked: {}. Set {} to a directory holding the font files.",
                family,
                attempts.join(", "),
                FONTS_DIR_ENV
            ),
            io::Error::new(io::ErrorKind::NotFound, "font files not found"),
        ))
    }

    /// Loads `family`, falling back to the default family when its files are missing.
    pub fn load_family(&self, family: &str) -> Result<FontFamily<FontData>, Error> {
        match self.load_exact(family) {
            Ok(loaded) => Ok(loaded),
            Err(err) if family != DEFAULT_FONT_FAMILY_NAME && fonts_missing(&err) => {
                warn!(
                    "Font family '{}' unavailable ({}); falling back to '{}'.",
                    family, err, DEFAULT_FONT_FAMILY_NAME
                );
                self.load_exact(DEFAULT_FONT_FAMILY_NAME)
            }
            Err(err) => Err(err),
        }
    }

    fn load_exact(&self, family: &str) -> Result<FontFamily<FontData>, Error> {
        let directory = self.resolve_directory(family)?;
        debug!("Loading font family '{}' from {}", family, directory.display());

        fonts::from_files(&directory, family, None).map_err(|err| {
            Error::new(
                format!(
                    "Failed to load font family '{}' from {}: {}",
                    family,
                    directory.display(),
                    err
                ),
                io::Error::new(io::ErrorKind::Other, err.to_string()),
            )
        })
    }

    /// Indicates whether `family` can be loaded without falling back.
    pub fn family_available(&self, family: &str) -> bool {
        self.resolve_directory(family).is_ok()
    }
}

/// Location of the fonts shipped alongside the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

/// Indicates whether the default family is installed in any searched location.
pub fn default_fonts_available() -> bool {
    FontConfig::new().family_available(DEFAULT_FONT_FAMILY_NAME)
}

fn font_file_names(family: &str) -> impl Iterator<Item = String> + '_ {
    FONT_STYLES
        .iter()
        .map(move |style| format!("{}-{}.ttf", family, style))
}

fn missing_font_files(directory: &Path, family: &str) -> Vec<String> {
    font_file_names(family)
        .filter(|name| !directory.join(name).is_file())
        .collect()
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}
