// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/config.rs - Field-handling configuration for parametrization runs.
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
 * # `config` Module
 *
 * Field-handling rules for parametrization runs, loaded from a TOML file.
 *
 * ```toml
 * ignore_fields = ["Notes"]
 * visible_fields = ["Value"]
 *
 * [translate_fields]
 * "Part Number" = "Name"
 *
 * [prepend_fields]
 * Footprint = "Footprints:"
 *
 * [tables.resistors]
 * ignore_fields = ["-Notes", "Tolerance"]
 * ```
 *
 * The four global options apply to every output; a `[tables.<name>]` section
 * overrides them for the output of that name. List options merge by
 * appending, with a leading `-` on an entry subtracting a previously-added
 * one; map options merge key-wise with the table value winning.
 */

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// One set of the four field-handling rule collections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Dataset columns to skip entirely.
    pub ignore_fields: Vec<String>,
    /// Column name to output field name translations.
    pub translate_fields: BTreeMap<String, String>,
    /// Prefix to prepend to non-empty values, keyed by output field name.
    pub prepend_fields: BTreeMap<String, String>,
    /// Output fields to force visible.
    pub visible_fields: Vec<String>,
}

/// Top-level configuration: global rules plus per-table overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub global: RuleSet,
    /// Partial overrides keyed by output name.
    pub tables: BTreeMap<String, RuleSet>,
}

/// The effective, fully merged rules for one output.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    pub ignore_fields: BTreeSet<String>,
    pub translate_fields: BTreeMap<String, String>,
    pub prepend_fields: BTreeMap<String, String>,
    pub visible_fields: BTreeSet<String>,
}

impl Config {
    /// Loads a configuration from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Resolves the effective rules for the output named `table`.
    ///
    /// Outputs with no table section get the global rules as-is.
    pub fn rules_for(&self, table: &str) -> Rules {
        let overlay = self.tables.get(table);
        Rules {
            ignore_fields: merge_list(
                &self.global.ignore_fields,
                overlay.map(|t| t.ignore_fields.as_slice()).unwrap_or(&[]),
            ),
            translate_fields: merge_map(
                &self.global.translate_fields,
                overlay.map(|t| &t.translate_fields),
            ),
            prepend_fields: merge_map(
                &self.global.prepend_fields,
                overlay.map(|t| &t.prepend_fields),
            ),
            visible_fields: merge_list(
                &self.global.visible_fields,
                overlay.map(|t| t.visible_fields.as_slice()).unwrap_or(&[]),
            ),
        }
    }
}

/// Merges list-valued rules: entries apply in order, base first, and an
/// entry prefixed with `-` removes a previously-added entry of that name.
fn merge_list(base: &[String], overlay: &[String]) -> BTreeSet<String> {
    let mut merged = BTreeSet::new();
    for entry in base.iter().chain(overlay) {
        match entry.strip_prefix('-') {
            Some(name) => {
                merged.remove(name);
            }
            None => {
                merged.insert(entry.clone());
            }
        }
    }
    merged
}

/// Merges map-valued rules key-wise; overlay values overwrite base values.
fn merge_map(
    base: &BTreeMap<String, String>,
    overlay: Option<&BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    let mut merged = base.clone();
    if let Some(overlay) = overlay {
        for (key, value) in overlay {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
