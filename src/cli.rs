//! Command-line interface for icon-classes.
//!
//! Subcommands classify class strings, check glyph names, and list the
//! registered fonts. Output goes to any `Write` so it can be captured in tests.

use anyhow::Result;
use clap::{Parser, Subcommand};
use icon_classes_config::LogLevel;
use icon_classes_engine::{ClassifyOptions, Fallback, FontSelector, IconContext};
use std::io::Write;
use std::path::PathBuf;

/// icon-classes - resolve icon font class strings
#[derive(Parser, Debug)]
#[command(name = "icon-classes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (default: ~/.config/icon-classes/config.yaml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve classes into their canonical form
    Classify {
        /// Class strings; all arguments are classified together
        #[arg(required = true)]
        input: Vec<String>,

        /// Drop tokens no slot accepts
        #[arg(long)]
        strict: bool,

        /// Only accept prefixed pattern/choice matches
        #[arg(long)]
        no_infer: bool,

        /// Print nothing instead of the fallback on failure
        #[arg(long, conflicts_with = "fallback")]
        no_fallback: bool,

        /// Classes to try instead of the configured fallback
        #[arg(long, value_name = "CLASSES")]
        fallback: Option<String>,

        /// Restrict to these fonts (one name forces that font)
        #[arg(long = "font", value_name = "NAME")]
        fonts: Vec<String>,

        /// Show the font and per-slot breakdown
        #[arg(long)]
        explain: bool,
    },

    /// Check whether a glyph name belongs to a registered font
    Check {
        /// Glyph, with or without prefix
        glyph: String,

        /// Restrict to these fonts
        #[arg(long = "font", value_name = "NAME")]
        fonts: Vec<String>,
    },

    /// List registered fonts in precedence order
    Fonts,
}

/// Run a parsed command against a ready context. Returns the exit code.
pub fn run(command: &Commands, context: &IconContext, out: &mut impl Write) -> Result<i32> {
    match command {
        Commands::Classify {
            input,
            strict,
            no_infer,
            no_fallback,
            fallback,
            fonts,
            explain,
        } => {
            let opts = ClassifyOptions {
                infer: !no_infer,
                strict: *strict,
                fallback: match (*no_fallback, fallback) {
                    (true, _) => Fallback::Disabled,
                    (false, Some(classes)) => Fallback::Explicit(classes.clone()),
                    (false, None) => Fallback::Configured,
                },
                font: font_selector(fonts),
            };
            if *explain {
                explain_classification(context, input, &opts, out)?;
            }
            writeln!(out, "{}", context.classify(input, &opts))?;
            Ok(0)
        }
        Commands::Check { glyph, fonts } => {
            let limit = (!fonts.is_empty()).then_some(fonts.as_slice());
            if context.is_valid_icon(glyph, limit) {
                writeln!(out, "valid")?;
                Ok(0)
            } else {
                writeln!(out, "invalid")?;
                Ok(1)
            }
        }
        Commands::Fonts => {
            for font in context.registry().fonts() {
                writeln!(
                    out,
                    "{:>4}  {}  [{}]  {} glyphs",
                    font.sort(),
                    font.name(),
                    font.prefixes().join(", "),
                    font.glyph_count()
                )?;
            }
            Ok(0)
        }
    }
}

fn font_selector(fonts: &[String]) -> Option<FontSelector> {
    match fonts {
        [] => None,
        [name] => Some(FontSelector::Name(name.clone())),
        names => Some(FontSelector::Names(names.to_vec())),
    }
}

fn explain_classification(
    context: &IconContext,
    input: &[String],
    opts: &ClassifyOptions,
    out: &mut impl Write,
) -> Result<()> {
    match context.classify_detailed(input, opts) {
        Ok(result) => {
            writeln!(out, "font: {}", result.font.name())?;
            for (slot, values) in result.slots.iter().filter(|(_, v)| !v.is_empty()) {
                writeln!(out, "  {}: {}", slot, values.join(" "))?;
            }
            if !result.unclassified.is_empty() {
                writeln!(out, "  (unclassified): {}", result.unclassified.join(" "))?;
            }
        }
        Err(failure) => writeln!(out, "failed: {failure}")?,
    }
    Ok(())
}
