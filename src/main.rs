//! chordid - chord-ID analysis from the command line
//!
//! Subcommands:
//! - `chordid report <ID>...` - Print a JSON analysis per chord-ID
//! - `chordid note <NOTE>` - Print MIDI number, frequency and spellings
//! - `chordid scale <NAME> <ROOT>` - Print the notes of a scale

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chordid::{chord_report_with, EnharmonicOptions, Favor, Note, Scale, Settings};
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(name = "chordid")]
#[command(about = "Analyse chord-IDs, notes and scales")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a JSON report for each chord-ID
    Report {
        /// Chord-IDs such as C^maj7 or ^min9
        #[arg(required = true)]
        ids: Vec<String>,

        /// YAML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Describe a note such as C#4
    Note {
        note: String,
    },

    /// List the notes of a scale
    Scale {
        /// Scale name, e.g. "harmonic minor" (unknown names use major)
        name: String,

        /// Base note, e.g. A3
        root: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the output; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Report {
            ids,
            config,
            pretty,
        } => report(&ids, config.as_deref(), pretty),
        Commands::Note { note } => describe_note(&note),
        Commands::Scale { name, root } => list_scale(&name, &root),
    }
}

fn report(ids: &[String], config: Option<&Path>, pretty: bool) -> Result<()> {
    let settings = match config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    debug!(?settings, "report settings");

    for id in ids {
        let report =
            chord_report_with(id, &settings).with_context(|| format!("analysing {}", id))?;
        let json = if pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{}", json);
    }
    Ok(())
}

fn describe_note(text: &str) -> Result<()> {
    let note: Note = text.parse()?;
    println!("note: {}", note);
    println!("midi: {}", note.midi());
    println!("frequency: {:.3} Hz", note.frequency());
    for (label, favor) in [
        ("natural", Favor::Natural),
        ("sharp", Favor::Sharp),
        ("flat", Favor::Flat),
    ] {
        let spelled = note.enharmonic_equiv(EnharmonicOptions::favoring(favor));
        println!("{}: {}", label, spelled);
    }
    Ok(())
}

fn list_scale(name: &str, root: &str) -> Result<()> {
    let root: Note = root.parse()?;
    let scale = Scale::generate(name, root);
    let notes: Vec<String> = scale.notes().iter().map(|n| n.to_string()).collect();
    println!("{}", notes.join(" "));
    Ok(())
}
