//! CLI logic for the argmap tool.
//!
//! Reads a script, lays the map out and writes either the script with the
//! new positions or an outline of the box layout.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use argmap::{ArgmapError, MapBuilder};

use error_adapter::{ScriptReport, render};

/// Run the argmap CLI application
///
/// # Errors
///
/// Returns `ArgmapError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
pub fn run(args: &Args) -> Result<(), ArgmapError> {
    info!(
        input_path = args.input,
        format:? = args.format;
        "Processing argument map"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = MapBuilder::new(app_config);
    let mut map = builder.parse(&source)?;

    for warning in map.warnings() {
        warn!("{}", render(&ScriptReport::new(warning, &source)));
    }

    let output = match args.format {
        OutputFormat::Dsl if args.keep_positions => builder.serialize(&map),
        OutputFormat::Dsl => {
            builder.layout(&mut map)?;
            builder.serialize(&map)
        }
        OutputFormat::Outline => builder.layout(&mut map)?.to_string(),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, with_newline(output))?;
            info!(output_file = path.as_str(); "Output written");
        }
        None => io::stdout().write_all(with_newline(output).as_bytes())?,
    }

    Ok(())
}

fn with_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
