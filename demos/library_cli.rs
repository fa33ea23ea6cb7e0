//! Command-line front end for a $1 template library file.
//!
//! Strokes are given as text files of whitespace-separated `x y` coordinates, in drawing order.

use std::{fs, path::{Path, PathBuf}};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use one_recognizer::{Point, RecognizerParameters, Stroke, TemplateLibrary};
use ron::ser::{to_string_pretty, PrettyConfig};
use tracing_subscriber::EnvFilter;

/// Strokes with fewer points are too short to save or recognize
const MIN_STROKE_POINTS: usize = 10;

#[derive(Parser)]
#[command(about = "Manage a $1 template library and recognize strokes against it")]
struct Cli {
    /// Template library file
    #[arg(long, short, default_value = "mystrokes.txt")]
    library: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the saved strokes
    List,
    /// Save a stroke under a name
    Add { name: String, points: PathBuf },
    /// Delete every stroke with the given name
    Remove { name: String },
    /// Print the points of a saved stroke
    Show { name: String },
    /// Find the saved stroke closest to a drawn one
    Recognize { points: PathBuf },
    /// Print a stroke after resampling, rotation, scaling and translation
    Normalize {
        points: PathBuf,
        /// Where to center the normalized stroke, as X,Y
        #[arg(long, value_parser = parse_origin, default_value = "0,0")]
        origin: Point,
    },
    /// Print the library as RON
    ExportRon,
}

fn parse_origin(s: &str) -> Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or("expected X,Y")?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok(Point::new(x, y))
}

fn read_stroke(name: &str, path: &Path) -> Result<Stroke> {
    let text = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let coords = text
        .split_whitespace()
        .map(|t| t.parse::<f32>().with_context(|| format!("invalid coordinate {t:?}")))
        .collect::<Result<Vec<_>>>()?;
    if coords.len() % 2 != 0 {
        bail!("{} has an odd number of coordinates", path.display());
    }
    let mut stroke = Stroke::named(name);
    for xy in coords.chunks(2) {
        stroke.push(Point::new(xy[0], xy[1]));
    }
    if stroke.len() < MIN_STROKE_POINTS {
        bail!("the stroke is too short ({} points, at least {MIN_STROKE_POINTS} needed)", stroke.len());
    }
    Ok(stroke)
}

fn print_points(stroke: &Stroke) {
    for p in &stroke.points {
        println!("{}\t{}", p.x, p.y);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut library = TemplateLibrary::open_or_create(&cli.library)?;
    let params = RecognizerParameters::default();

    match cli.command {
        Command::List => {
            for name in library.names() {
                println!("{name}");
            }
        }
        Command::Add { name, points } => {
            if !TemplateLibrary::is_storable_name(&name) {
                bail!("the stroke name must fit on one line");
            }
            let stroke = read_stroke(&name, &points)?;
            library.insert(stroke);
            library.dedup();
            library.save(&cli.library)?;
            println!("The stroke \"{name}\" has been saved to {}", cli.library.display());
        }
        Command::Remove { name } => {
            let removed = library.remove_named(&name);
            library.save(&cli.library)?;
            println!("Removed {removed} stroke(s) named \"{name}\" from {}", cli.library.display());
        }
        Command::Show { name } => match library.find(&name) {
            Some(stroke) => print_points(stroke),
            None => bail!("the stroke \"{name}\" does not exist"),
        },
        Command::Recognize { points } => {
            if library.is_empty() {
                bail!("there is no saved stroke");
            }
            let candidate = read_stroke("", &points)?.normalize_with(&params)?;
            let templates = library.normalized(&params)?;
            let m = candidate.recognize(&templates, params.square_size)?;
            println!("{} (Score = {:.2})", m.name(), m.score);
        }
        Command::Normalize { points, origin } => {
            let params = RecognizerParameters { origin, ..params };
            print_points(&read_stroke("", &points)?.normalize_with(&params)?);
        }
        Command::ExportRon => {
            println!("{}", to_string_pretty(&library, PrettyConfig::default())?);
        }
    }
    Ok(())
}
