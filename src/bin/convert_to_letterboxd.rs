use std::{env, path::PathBuf, process};

use senscritique2letterboxd::{
    config::DEFAULT_OUTPUT_FILE,
    converter::{self, DEFAULT_INPUT_FILE},
    error::Error,
    logging,
};

fn print_usage() {
    eprintln!("Usage: convert-to-letterboxd [input-file] [output-file]");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  convert-to-letterboxd");
    eprintln!("  convert-to-letterboxd my-export.csv");
    eprintln!("  convert-to-letterboxd input.csv output.csv");
}

fn main() {
    logging::setup_logging();

    let input: PathBuf = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_INPUT_FILE.to_string())
        .into();
    let output: PathBuf = env::args()
        .nth(2)
        .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string())
        .into();

    log::info!("Converting SensCritique CSV to Letterboxd format...");
    log::info!("Input:  {}", input.display());
    log::info!("Output: {}", output.display());

    match converter::convert_csv(&input, &output) {
        Ok(report) => {
            log::info!(
                "Generated {} with {} movies (out of {})",
                output.display(),
                report.rows_written,
                report.records_read
            );
            log::info!("Ready for manual import at https://letterboxd.com/import/");
        }
        Err(e @ Error::MissingInput(_)) => {
            log::error!("{}", e);
            print_usage();
            process::exit(1);
        }
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
