// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/library.rs - Loader and serializer for EESchema symbol libraries.
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
 * # `library` Module
 *
 * This module scans EESchema library text for `DEF`/`ENDDEF` spans and turns
 * each span into a [Symbol]. Markers must pair up: a `DEF` inside an open
 * symbol or an `ENDDEF` outside one aborts the load with a structural error
 * naming the source and line.
 *
 * ## Usage Example
 *
 * ```no_run
 * use symparam::library::SymbolLibrary;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let lib = SymbolLibrary::from_path("transistors.lib")?;
 *
 *     for symbol in lib.symbols() {
 *         println!("Symbol: {}", symbol.name()?);
 *     }
 *
 *     Ok(())
 * }
 * ```
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Version header emitted at the top of every serialized library.
pub const LIBRARY_HEADER: &str = "EESchema-LIBRARY Version 2.3";

/// An ordered collection of symbols loaded from one library file.
#[derive(Debug, Clone)]
pub struct SymbolLibrary {
    symbols: Vec<Symbol>,
}

impl SymbolLibrary {
    /// Loads a library from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse_str(&path.to_string_lossy(), &text)
    }

    /// Parses library text. `source_name` identifies the input in structural
    /// error messages, typically its filename.
    ///
    /// Each symbol's lines are trimmed of surrounding whitespace; everything
    /// outside `DEF`/`ENDDEF` spans (version header, comments) is dropped.
    pub fn parse_str(source_name: &str, text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();

        let mut symbols = Vec::new();
        let mut start: Option<usize> = None;
        for (lineno, line) in lines.iter().enumerate() {
            if line.trim_start().starts_with("DEF ") {
                if start.is_some() {
                    return Err(Error::NestedDef {
                        source_name: source_name.to_string(),
                        line: lineno + 1,
                    });
                }
                start = Some(lineno);
            } else if line.trim_start().starts_with("ENDDEF") {
                match start.take() {
                    Some(first) => {
                        let span = lines[first..=lineno]
                            .iter()
                            .map(|l| l.trim().to_string())
                            .collect();
                        symbols.push(Symbol::from_lines(span));
                    }
                    None => {
                        return Err(Error::StrayEndDef {
                            source_name: source_name.to_string(),
                            line: lineno + 1,
                        });
                    }
                }
            }
        }

        Ok(Self { symbols })
    }

    /// Builds a library from symbols produced elsewhere, e.g. by the
    /// parametrization engine.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// The symbols in this library, in file order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Builds a name-to-symbol index for keyed lookup.
    pub fn index_by_name(&self) -> Result<HashMap<String, &Symbol>> {
        let mut index = HashMap::with_capacity(self.symbols.len());
        for symbol in &self.symbols {
            index.insert(symbol.name()?, symbol);
        }
        Ok(index)
    }

    /// Serializes the whole library: version header plus each symbol.
    ///
    /// Reloading the output reproduces an equivalent symbol sequence; the
    /// incidental whitespace of untouched drawing lines survives because
    /// symbols keep their lines verbatim after the initial trim.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str(LIBRARY_HEADER);
        out.push('\n');
        for symbol in &self.symbols {
            out.push_str(&symbol.serialize());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIB: &str = "\
EESchema-LIBRARY Version 2.3
#encoding utf-8
DEF AO6400 Q 0 0 Y N 1 F N
F0 \"Q\" 300 50 60 H V C CNN
F1 \"AO6400\" 400 -50 60 H V C CNN
DRAW
P 2 0 1 0  -150 -200  -150 200 N
ENDDRAW
ENDDEF
#
DEF BSS138 Q 0 0 Y N 1 F N
F0 \"Q\" 0 0 50 H V C CNN
F1 \"BSS138\" 0 0 50 H V C CNN
ENDDEF
#End Library
";

    #[test]
    fn loads_each_span_as_a_symbol() {
        let lib = SymbolLibrary::parse_str("two.lib", LIB).unwrap();
        assert_eq!(lib.symbols().len(), 2);
        assert_eq!(lib.symbols()[0].name().unwrap(), "AO6400");
        assert_eq!(lib.symbols()[1].name().unwrap(), "BSS138");
    }

    #[test]
    fn span_includes_both_markers_and_trims_lines() {
        let lib = SymbolLibrary::parse_str("two.lib", LIB).unwrap();
        let lines = lib.symbols()[0].lines();
        assert_eq!(lines[0], "DEF AO6400 Q 0 0 Y N 1 F N");
        assert_eq!(lines[lines.len() - 1], "ENDDEF");
    }

    #[test]
    fn nested_def_is_a_structural_error() {
        let bad = "DEF A X 0 0 Y N 1 F N\nDEF B X 0 0 Y N 1 F N\nENDDEF\n";
        match SymbolLibrary::parse_str("bad.lib", bad) {
            Err(Error::NestedDef { source_name, line }) => {
                assert_eq!(source_name, "bad.lib");
                assert_eq!(line, 2);
            }
            other => panic!("expected NestedDef, got {:?}", other),
        }
    }

    #[test]
    fn stray_enddef_is_a_structural_error() {
        match SymbolLibrary::parse_str("bad.lib", "# comment\nENDDEF\n") {
            Err(Error::StrayEndDef { source_name, line }) => {
                assert_eq!(source_name, "bad.lib");
                assert_eq!(line, 2);
            }
            other => panic!("expected StrayEndDef, got {:?}", other),
        }
    }

    #[test]
    fn unterminated_def_span_is_dropped() {
        let lib = SymbolLibrary::parse_str("trunc.lib", "DEF A X 0 0 Y N 1 F N\nF0 \"X\" 0 0\n")
            .unwrap();
        assert!(lib.symbols().is_empty());
    }

    #[test]
    fn index_by_name() {
        let lib = SymbolLibrary::parse_str("two.lib", LIB).unwrap();
        let index = lib.index_by_name().unwrap();
        assert!(index.contains_key("BSS138"));
        assert_eq!(index["AO6400"].get_field("Reference").unwrap(), "Q");
    }

    #[test]
    fn serialize_round_trips() {
        let lib = SymbolLibrary::parse_str("two.lib", LIB).unwrap();
        let text = lib.serialize();
        assert!(text.starts_with(LIBRARY_HEADER));

        let reloaded = SymbolLibrary::parse_str("reloaded.lib", &text).unwrap();
        assert_eq!(reloaded.symbols().len(), lib.symbols().len());
        for (a, b) in lib.symbols().iter().zip(reloaded.symbols()) {
            assert_eq!(a.lines(), b.lines());
            assert_eq!(a.name().unwrap(), b.name().unwrap());
        }
    }
}
