// SPDX-License-Identifier: MIT
//
// pdfcomp — compare two PDF or image files page-by-page.
//
// Entry point. Initialises logging, parses arguments, loads both documents,
// runs the comparison, and maps the outcome onto the process exit contract:
// 0 = within tolerance, 1 = error, 2 = difference exceeds tolerance.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pdfcomp_compare::compare;
use pdfcomp_core::{CompareError, ComparisonOptions, HighlightMethod};
use pdfcomp_document::density::DEFAULT_DENSITY;
use pdfcomp_document::Document;

#[derive(Parser)]
#[command(name = "pdfcomp", version, about = "A utility to compare PDF and image files")]
struct Args {
    /// First document to compare
    first: PathBuf,

    /// Second document to compare
    second: PathBuf,

    /// Absolute tolerance on the difference score
    #[arg(short, long, default_value_t = 0.0, value_name = "VALUE")]
    tolerance: f64,

    /// Density to read the documents in
    #[arg(short, long, default_value = DEFAULT_DENSITY, value_name = "VALUE")]
    density: String,

    /// Folder to save difference image(s) to
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Fuzziness to use for comparison
    #[arg(short, long, default_value_t = 0.0, value_name = "VALUE")]
    fuzz: f64,

    /// Filename prefix for difference images
    #[arg(short, long, default_value = "", value_name = "VALUE")]
    prefix: String,

    /// Highlighting algorithm to use (0 = simple, 1 = difference, 2 = double compare)
    #[arg(short, long, default_value_t = 0, value_name = "VALUE")]
    method: u8,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(
        first = %args.first.display(),
        second = %args.second.display(),
        "pdfcomp starting"
    );

    // The method selector is validated before any document is loaded.
    let Some(method) = HighlightMethod::from_selector(args.method) else {
        eprintln!("Invalid method specified ({})", args.method);
        return ExitCode::from(1);
    };

    let Ok(mut first) = Document::load(&args.first, &args.density) else {
        eprintln!("Failed to parse file: '{}'", args.first.display());
        return ExitCode::from(1);
    };

    let Ok(mut second) = Document::load(&args.second, &args.density) else {
        eprintln!("Failed to parse file: '{}'", args.second.display());
        return ExitCode::from(1);
    };

    let options = ComparisonOptions {
        fuzz: args.fuzz,
        tolerance: args.tolerance,
        method,
        prefix: args.prefix,
        output: args.output.clone(),
    };

    let difference = match compare(&mut first, &mut second, &options) {
        Ok(value) => value,
        Err(CompareError::BadDirectory(directory)) => {
            eprintln!(
                "Given output directory ('{}') is not valid",
                directory.display()
            );
            return ExitCode::from(1);
        }
        Err(CompareError::MismatchingPages { first, second }) => {
            eprintln!("Given PDFs have differing page count ({first}/{second})");
            return ExitCode::from(1);
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };

    if difference > args.tolerance {
        eprintln!("Difference exceeds tolerance: {difference}");
        return ExitCode::from(2);
    }

    println!("Given PDFs are equal");
    ExitCode::SUCCESS
}
