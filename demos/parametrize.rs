// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  parametrize.rs - Parametrization demo for EESchema symbol libraries.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::fs;
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use symparam::config::Config;
use symparam::library::SymbolLibrary;
use symparam::parametrize::{parametrize, read_rows, Options};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Library to use as a basis for parametrization.
    library: String,
    /// CSV file with one row per generated symbol.
    csv: String,
    /// Name stem for the output library and documentation files.
    output_name: String,
    /// Fail on rows whose symbol is not in the base library.
    #[arg(long)]
    strict: bool,
    /// Optional TOML file with field-handling rules.
    #[arg(long)]
    config: Option<String>,
}

fn main() -> ExitCode {
    simple_logger::SimpleLogger::new().init().unwrap();

    let args = Args::parse();

    let base = match SymbolLibrary::from_path(&args.library) {
        Ok(lib) => lib,
        Err(error) => {
            eprintln!("Error loading library {:?}: {}", &args.library, error);
            return ExitCode::FAILURE;
        }
    };

    let rows = match File::open(&args.csv).map_err(Into::into).and_then(read_rows) {
        Ok(rows) => rows,
        Err(error) => {
            eprintln!("Error reading CSV {:?}: {}", &args.csv, error);
            return ExitCode::FAILURE;
        }
    };

    let config = match &args.config {
        Some(path) => match Config::from_path(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Error loading config {:?}: {}", path, error);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    // Table overrides are keyed by the output name.
    let table = Path::new(&args.output_name)
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let rules = config.rules_for(&table);

    let options = Options {
        strict: args.strict,
        ..Options::default()
    };

    let run = match parametrize(&base, &rows, &rules, &options) {
        Ok(run) => run,
        Err(error) => {
            eprintln!("Parametrization failed: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let doc_text = match run.doc_text() {
        Ok(text) => text,
        Err(error) => {
            eprintln!("Error building documentation index: {}", error);
            return ExitCode::FAILURE;
        }
    };

    // Both outputs are written only after the whole run has succeeded.
    let lib_path = format!("{}.lib", args.output_name);
    let dcm_path = format!("{}.dcm", args.output_name);
    if let Err(error) = fs::write(&lib_path, run.library_text()) {
        eprintln!("Error writing {:?}: {}", lib_path, error);
        return ExitCode::FAILURE;
    }
    if let Err(error) = fs::write(&dcm_path, doc_text) {
        eprintln!("Error writing {:?}: {}", dcm_path, error);
        return ExitCode::FAILURE;
    }

    println!(
        "Wrote {} symbols to {} ({} rows skipped)",
        run.symbols().len(),
        lib_path,
        run.skipped().len()
    );
    for skip in run.skipped() {
        println!("  row {}: no symbol '{}'", skip.row, skip.symbol);
    }

    ExitCode::SUCCESS
}
