// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/parametrize.rs - Batch parametrization of symbol libraries.
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
 * # `parametrize` Module
 *
 * This module stamps CSV rows onto cloned copies of base-library symbols.
 *
 * Each row names a base symbol in its key column; the symbol is deep-cloned
 * and every other column is written into the clone as a field, subject to the
 * configured [Rules]. The result serializes to a new library file plus a
 * documentation index (`.dcm`) listing every output symbol that carries a
 * `Description` field.
 *
 * ## Usage Example
 *
 * ```no_run
 * use std::fs::File;
 *
 * use symparam::config::Rules;
 * use symparam::library::SymbolLibrary;
 * use symparam::parametrize::{parametrize, read_rows, Options};
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let base = SymbolLibrary::from_path("base.lib")?;
 *     let rows = read_rows(File::open("parts.csv")?)?;
 *
 *     let run = parametrize(&base, &rows, &Rules::default(), &Options::default())?;
 *
 *     std::fs::write("parts.lib", run.library_text())?;
 *     std::fs::write("parts.dcm", run.doc_text()?)?;
 *
 *     Ok(())
 * }
 * ```
 */

use std::io;

use log::warn;

use crate::config::Rules;
use crate::error::{Error, Result};
use crate::library::SymbolLibrary;
use crate::symbol::Symbol;

/// Version header emitted at the top of the documentation index.
pub const DOC_HEADER: &str = "EESchema-DOCLIB Version 2.0";

/// Placeholder value for columns present in the dataset but left empty.
pub const EMPTY_VALUE: &str = "~";

/// One dataset row: column values in their original column order.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Vec<(String, String)>,
}

impl Row {
    /// The (column, value) pairs in dataset column order.
    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }

    /// Looks a value up by column name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Reads CSV data with a header row into [Row]s.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let columns = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(Row { columns });
    }
    Ok(rows)
}

/// Engine policy knobs.
#[derive(Debug, Clone)]
pub struct Options {
    /// Fail the whole run on an unresolved row instead of skipping it.
    pub strict: bool,
    /// Column naming the base symbol to clone.
    pub key_column: String,
    /// Column the output is sorted by, for deterministic ordering.
    pub sort_column: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strict: false,
            key_column: "Symbol".to_string(),
            sort_column: "Name".to_string(),
        }
    }
}

/// A row that did not resolve to a base symbol and was skipped.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    /// 1-based dataset row number, in the original (unsorted) row order.
    pub row: usize,
    /// The unresolved symbol name.
    pub symbol: String,
}

/// The result of a parametrization run.
#[derive(Debug)]
pub struct ParametrizedLibrary {
    library: SymbolLibrary,
    skipped: Vec<SkippedRow>,
}

impl ParametrizedLibrary {
    /// The generated symbols, in output order.
    pub fn symbols(&self) -> &[Symbol] {
        self.library.symbols()
    }

    /// Rows skipped because their symbol was not in the base library.
    /// Always empty after a strict run.
    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Serializes the generated library, version header included.
    pub fn library_text(&self) -> String {
        self.library.serialize()
    }

    /// Serializes the documentation index: a `$CMP` block per output symbol
    /// that has a `Description` field. Symbols without one are omitted.
    pub fn doc_text(&self) -> Result<String> {
        let mut out = String::new();
        out.push_str(DOC_HEADER);
        out.push('\n');
        for symbol in self.library.symbols() {
            if symbol.has_field("Description") {
                out.push_str(&format!("$CMP {}\n", symbol.name()?));
                out.push_str(&format!("D {}\n", symbol.get_field("Description")?));
                out.push_str("$ENDCMP\n");
            }
        }
        Ok(out)
    }
}

/// Runs the engine: one cloned, field-stamped symbol per resolved row.
///
/// Rows are processed in a stable sort by `options.sort_column` so the output
/// order is deterministic regardless of dataset order. In non-strict mode an
/// unresolved row is skipped with a warning and recorded in the result; in
/// strict mode it aborts the run with [Error::SymbolNotFound] before anything
/// is produced.
pub fn parametrize(
    base: &SymbolLibrary,
    rows: &[Row],
    rules: &Rules,
    options: &Options,
) -> Result<ParametrizedLibrary> {
    let index = base.index_by_name()?;

    let mut ordered: Vec<(usize, &Row)> = rows.iter().enumerate().collect();
    ordered.sort_by_key(|(_, row)| row.get(&options.sort_column).unwrap_or("").to_string());

    let mut symbols = Vec::new();
    let mut skipped = Vec::new();

    for (row_index, row) in ordered {
        let symbol_name = row.get(&options.key_column).unwrap_or("");
        let base_symbol = match index.get(symbol_name) {
            Some(symbol) => *symbol,
            None => {
                if options.strict {
                    return Err(Error::SymbolNotFound(symbol_name.to_string()));
                }
                warn!(
                    "row {}: symbol '{}' not found in base library, skipping",
                    row_index + 1,
                    symbol_name
                );
                skipped.push(SkippedRow {
                    row: row_index + 1,
                    symbol: symbol_name.to_string(),
                });
                continue;
            }
        };

        let mut symbol = base_symbol.clone();
        for (column, value) in row.columns() {
            if column == &options.key_column || rules.ignore_fields.contains(column) {
                continue;
            }

            let field = rules
                .translate_fields
                .get(column)
                .map(String::as_str)
                .unwrap_or(column);

            let value = if value.is_empty() {
                EMPTY_VALUE.to_string()
            } else if let Some(prefix) = rules.prepend_fields.get(field) {
                format!("{}{}", prefix, value)
            } else {
                value.clone()
            };

            symbol.set_or_add_field(field, &value)?;
            if rules.visible_fields.contains(field) {
                symbol.set_visible(field, true)?;
            }
        }

        symbols.push(symbol);
    }

    Ok(ParametrizedLibrary {
        library: SymbolLibrary::from_symbols(symbols),
        skipped,
    })
}
