//! BatchResize CLI
//!
//! Asks for a folder (or takes it as an argument), resizes every image in it
//! and writes the results to a `resized` folder inside it.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use console::style;
use tracing::debug;

use batchresize::{init_logging, BatchRequest, BatchResizer, Config, ConsoleReporter};

const PROMPT: &str = "Enter the path to the folder containing your images: ";

/// BatchResize - resize every image in a folder
#[derive(Parser)]
#[command(
    name = "batchresize",
    version,
    about = "Resize every image in a folder to a fixed size and format",
    long_about = "Reads every file directly inside INPUT, resizes the valid images \
                  (800x600 JPEG unless a config file says otherwise) and writes them \
                  to a 'resized' folder inside INPUT. Files that are not images are skipped."
)]
struct Cli {
    /// Folder containing the images (prompted for when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Configuration file path (.toml or .yaml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", style("Error").red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => Config::default(),
    };

    // Initialize logging based on verbosity
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logging(log_level, config.logging.json);

    let input = match cli.input {
        Some(path) => Some(path),
        None => prompt_for_input(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let Some(input) = input else {
        println!("No input folder provided. Exiting.");
        return Ok(());
    };

    let mut resizer = BatchResizer::new(ConsoleReporter::stdout());

    // Check the folder before the output folder is created inside it
    if let Some(status) = resizer.preflight(&input)? {
        debug!("Input rejected: {:?}", status);
        return Ok(());
    }

    let request = BatchRequest::from_settings(&input, &config.batch)?;
    let status = resizer.run(&request)?;
    debug!("Batch status: {:?}", status);

    print_completion(&request.output_path);
    Ok(())
}

/// Ask for the input folder; an empty answer or closed stdin means none
fn prompt_for_input<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<PathBuf>> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(trimmed)))
    }
}

fn print_completion(output_folder: &Path) {
    println!();
    println!(
        "✅ Batch resizing complete! Resized images are in: {}",
        output_folder.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_trims_input() {
        let mut input = io::Cursor::new("  /tmp/photos  \n");
        let mut output = Vec::new();
        let path = prompt_for_input(&mut input, &mut output).unwrap();

        assert_eq!(path, Some(PathBuf::from("/tmp/photos")));
        assert_eq!(String::from_utf8(output).unwrap(), PROMPT);
    }

    #[test]
    fn test_prompt_empty_or_eof() {
        let mut output = Vec::new();
        assert_eq!(
            prompt_for_input(&mut io::Cursor::new("   \n"), &mut output).unwrap(),
            None
        );
        assert_eq!(
            prompt_for_input(&mut io::Cursor::new(""), &mut output).unwrap(),
            None
        );
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["batchresize", "photos", "-v"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("photos")));
        assert!(cli.verbose);

        assert!(Cli::try_parse_from(["batchresize", "-v", "-q"]).is_err());
    }
}
