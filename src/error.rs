// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/error.rs - Error types for the symparam library.
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

use thiserror::Error;

/// Errors raised while loading, editing, or parametrizing a symbol library.
#[derive(Debug, Error)]
pub enum Error {
    /// A `DEF` marker was seen while a previous symbol was still open.
    #[error("{source_name}:{line}: nested DEF")]
    NestedDef {
        /// Name of the input the library text came from.
        source_name: String,
        /// 1-based line number of the offending marker.
        line: usize,
    },

    /// An `ENDDEF` marker was seen with no symbol open.
    #[error("{source_name}:{line}: unexpected ENDDEF")]
    StrayEndDef {
        /// Name of the input the library text came from.
        source_name: String,
        /// 1-based line number of the offending marker.
        line: usize,
    },

    /// A symbol record carries no `DEF` header line.
    #[error("symbol has no DEF header")]
    MissingDef,

    /// A field lookup or update targeted a field the symbol does not have.
    #[error("field '{0}' not found in symbol")]
    FieldNotFound(String),

    /// A dataset row named a base symbol that is not in the library.
    #[error("symbol '{0}' not found in base library")]
    SymbolNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
