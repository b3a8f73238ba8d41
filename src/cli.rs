use crate::config::load_config;
use crate::dataset::parse_people;
use crate::layout::compute_layout;
use crate::layout_dump;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kintree", version, about = "Genealogical chart layout engine")]
pub struct Args {
    /// Person document (.json, JSON5 tolerated) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout JSON. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (footprints and spacing overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Available width the top-level row is centered in
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.layout.viewport_width = width;
    }

    let input = read_input(args.input.as_deref())?;
    let people = parse_people(&input)?;
    let layout = compute_layout(&people, &config.layout);

    match args.output.as_deref() {
        Some(path) => layout_dump::write_layout_dump(path, &layout)?,
        None => {
            let json = layout_dump::to_json_string(&layout)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
