// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use midigen::arrangement::{generate, status_line, suggestion_text, RandomRootChooser, STRUCTURE_PRESETS};
use midigen::config::{SectionConfig, SongFile};
use midigen::music::{harmony::format_suggestions, suggest, Mode, Note, Scale};

/// MIDIGEN - Modal Melody Generator
#[derive(Parser)]
#[command(name = "midigen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a MIDI file
    #[command(group(ArgGroup::new("layout").args(["config", "structure"]).multiple(true)))]
    Generate {
        /// Song file (YAML, or TOML with a .toml extension)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Tempo in BPM (20-300)
        #[arg(long)]
        bpm: Option<u32>,

        /// Structure template, section labels joined by '-'
        #[arg(short, long)]
        structure: Option<String>,

        /// Pick each later section's root from the previous section's suggestions
        #[arg(long)]
        random_notes: bool,

        /// Seed for random roots
        #[arg(long)]
        seed: Option<u64>,

        /// Section as NOTE:MODE:LENGTH, once per structure label in order
        /// (needs --structure or --config)
        #[arg(long = "section", value_parser = parse_section, requires = "layout")]
        sections: Vec<SectionConfig>,

        /// Directory the MIDI file is written into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Show harmonic suggestions for a root and mode
    Suggest {
        note: String,
        mode: String,
    },

    /// Show the scale for a root and mode
    Scale {
        note: String,
        mode: String,
    },

    /// List notes, modes and structure presets
    List,

    /// Write a default song file
    Init {
        /// Output path (.yaml or .toml)
        file: PathBuf,

        /// Structure template
        #[arg(short, long, default_value = STRUCTURE_PRESETS[0])]
        structure: String,
    },
}

fn parse_section(s: &str) -> std::result::Result<SectionConfig, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [note, mode, length] = parts.as_slice() else {
        return Err(format!("expected NOTE:MODE:LENGTH, got '{}'", s));
    };
    let length = length
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid length '{}': {}", length, e))?;
    Ok(SectionConfig::new(note.trim(), mode.trim(), length))
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "midigen=debug" } else { "midigen=info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    config: Option<PathBuf>,
    bpm: Option<u32>,
    structure: Option<String>,
    random_notes: bool,
    seed: Option<u64>,
    sections: Vec<SectionConfig>,
    output_dir: PathBuf,
) -> Result<ExitCode> {
    let mut file = match &config {
        Some(path) => SongFile::load(path)?,
        None => {
            let structure = structure.as_deref().unwrap_or(STRUCTURE_PRESETS[0]);
            SongFile::for_structure(structure)
        }
    };

    if let Some(structure) = structure {
        file.song.structure = structure;
    }
    if let Some(bpm) = bpm {
        file.song.bpm = bpm;
    }
    if random_notes {
        file.song.random_notes = true;
    }
    if seed.is_some() {
        file.song.seed = seed;
    }
    if !sections.is_empty() {
        file.sections = sections;
    }

    for index in 0..file.sections.len() {
        if let Ok(text) = suggestion_text(&file, index) {
            debug!("{}", text);
        }
    }

    let mut chooser = RandomRootChooser::from_seed(file.song.seed);
    let result = generate(&file, &mut chooser, &output_dir);
    println!("{}", status_line(&result));

    match result {
        Ok(song) => {
            if file.song.random_notes {
                println!("Section roots: {}", song.notes.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn print_suggestions(note: &str, mode: &str) -> Result<()> {
    let mode = Mode::parse(mode).map(Mode::name).unwrap_or(mode);
    let suggestions = suggest(note, mode)?;
    println!("Suggestions for {} {}:", note, mode);
    println!("{}", format_suggestions(&suggestions));
    Ok(())
}

fn print_scale(note: &str, mode: &str) -> Result<()> {
    let root = Note::parse(note)?;
    let mode = Mode::parse(mode)?;
    let scale = Scale::new(root.middle_octave_pitch(), mode)?;
    let names: Vec<&str> = scale
        .pitches()
        .iter()
        .map(|&p| Note::from_pitch_class(p % 12).name())
        .collect();
    println!("{}", scale);
    println!("Notes:   {}", names.join(" "));
    println!("Pitches: {:?}", scale.pitches());
    Ok(())
}

fn print_list() {
    let notes: Vec<&str> = Note::ALL.iter().map(|n| n.name()).collect();
    println!("Notes: {}", notes.join(", "));
    println!();
    println!("Modes:");
    for mode in Mode::ALL {
        println!("  {}", mode.name());
    }
    println!();
    println!("Structures:");
    for (i, preset) in STRUCTURE_PRESETS.iter().enumerate() {
        println!("  {}: {}", i, preset);
    }
}

fn write_song_file(path: PathBuf, structure: &str) -> Result<()> {
    if path.exists() {
        return Err(anyhow!("Refusing to overwrite existing file: {:?}", path));
    }
    SongFile::for_structure(structure)
        .save(&path)
        .with_context(|| format!("Failed to create song file: {:?}", path))?;
    println!("Song file written: {}", path.display());
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            config,
            bpm,
            structure,
            random_notes,
            seed,
            sections,
            output_dir,
        } => run_generate(config, bpm, structure, random_notes, seed, sections, output_dir),
        Commands::Suggest { note, mode } => {
            print_suggestions(&note, &mode)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Scale { note, mode } => {
            print_scale(&note, &mode)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List => {
            print_list();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { file, structure } => {
            write_song_file(file, &structure)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
