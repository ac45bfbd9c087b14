// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/lib.rs - Parser, editor, and parametrization library for EESchema
 *  symbol libraries.
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

/*!
 * # `symparam` Crate
 *
 * A library for parsing, editing, and batch-parametrizing legacy KiCad
 * EESchema symbol libraries (`.lib`).
 *
 * This crate provides a full pipeline for stamping tabular part data onto
 * library symbols:
 *
 * 1. [tokens]: Splits library lines into tokens and handles quoting/escaping.
 * 2. [symbol]: A mutable, line-oriented symbol record with field accessors.
 * 3. [library]: Loads `DEF`/`ENDDEF` spans from a library file and writes
 *    them back.
 * 4. [config]: Field-handling rules (ignore/rename/prefix/show) with
 *    per-table overrides.
 * 5. [parametrize]: Clones a base symbol per CSV row and applies the rules,
 *    producing a new library plus a `.dcm` documentation index.
 *
 * ## Usage Example
 *
 * ```no_run
 * use std::fs;
 * use std::fs::File;
 *
 * use symparam::config::Config;
 * use symparam::library::SymbolLibrary;
 * use symparam::parametrize::{parametrize, read_rows, Options};
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     // Load the base library and the part table
 *     let base = SymbolLibrary::from_path("mosfets.lib")?;
 *     let rows = read_rows(File::open("mosfets.csv")?)?;
 *
 *     // Resolve the field-handling rules for this output
 *     let config = Config::from_path("parametrize.toml")?;
 *     let rules = config.rules_for("mosfets");
 *
 *     // Generate one symbol per row
 *     let run = parametrize(&base, &rows, &rules, &Options::default())?;
 *
 *     // Write both outputs only once the whole run has succeeded
 *     fs::write("mosfets-parts.lib", run.library_text())?;
 *     fs::write("mosfets-parts.dcm", run.doc_text()?)?;
 *
 *     for skip in run.skipped() {
 *         eprintln!("row {} skipped: no symbol '{}'", skip.row, skip.symbol);
 *     }
 *
 *     Ok(())
 * }
 * ```
 */

pub mod config;
pub mod error;
pub mod library;
pub mod parametrize;
pub mod symbol;
pub mod tokens;

pub use error::{Error, Result};
