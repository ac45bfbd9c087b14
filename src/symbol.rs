// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/symbol.rs - Mutable symbol records for EESchema symbol libraries.
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
 * # `symbol` Module
 *
 * An in-memory, line-oriented representation of one symbol record.
 *
 * A symbol owns the raw text lines between its `DEF` and `ENDDEF` markers,
 * both inclusive. Field lines (`F0`, `F1`, ...) are edited through the
 * accessors here; everything else, in particular the drawing body between
 * `DRAW` and `ENDDRAW`, is opaque payload that serializes back verbatim.
 *
 * Field lines have a fixed positional layout:
 *
 * ```text
 * F<n> "<value>" <x> <y> <size> <orient> <V|I> <hjust> <vjust+style> ["<name>"]
 * ```
 *
 * Indices 0 through 3 are the reserved Reference, Name, Footprint, and
 * Datasheet fields and are matched by index. Indices 4 and up are custom
 * fields, matched by their trailing quoted name token.
 */

use crate::error::{Error, Result};
use crate::tokens::{quote, quote_if_needed, tokenize, unquote};

// Positional token slots on a field line.
const TOK_VALUE: usize = 1;
const TOK_VISIBILITY: usize = 6;
const TOK_FIELD_NAME: usize = 9;

/// Reserved field names for indices `F0` through `F3`, in index order.
pub const RESERVED_FIELDS: [&str; 4] = ["Reference", "Name", "Footprint", "Datasheet"];

/// One symbol record: a `DEF` header, field lines, and an opaque drawing body.
#[derive(Debug, Clone)]
pub struct Symbol {
    lines: Vec<String>,
}

impl Symbol {
    /// Wraps a list of already-trimmed lines as a symbol.
    ///
    /// The loader guarantees line 0 is the `DEF` header; symbols built by
    /// hand (e.g. in tests) must uphold the same layout.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// The raw lines of this symbol, header and drawing body included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The symbol's name, read from its `Name` field.
    pub fn name(&self) -> Result<String> {
        self.get_field("Name")
    }

    fn find_def(&self) -> Result<usize> {
        self.lines
            .iter()
            .position(|line| line.starts_with("DEF "))
            .ok_or(Error::MissingDef)
    }

    /// Finds the line index of the field named `name`, along with the index
    /// of the last field line seen. The latter is where a new field would be
    /// inserted after, and is reported even when the lookup misses.
    fn find_field_or_last(&self, name: &str) -> (Option<usize>, Option<usize>) {
        let mut last = None;
        for (lineno, line) in self.lines.iter().enumerate() {
            if !line.starts_with('F') {
                continue;
            }
            last = Some(lineno);

            let matched = match RESERVED_FIELDS.iter().position(|&r| r == name) {
                Some(index) => {
                    let tag = format!("F{}", index);
                    line.split_whitespace().next() == Some(tag.as_str())
                }
                None => {
                    let tokens = tokenize(line);
                    tokens.len() > TOK_FIELD_NAME && tokens[TOK_FIELD_NAME] == quote(name)
                }
            };
            if matched {
                return (Some(lineno), last);
            }
        }
        (None, last)
    }

    fn find_field(&self, name: &str) -> Result<usize> {
        self.find_field_or_last(name)
            .0
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    /// Whether the symbol has a field named `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.find_field_or_last(name).0.is_some()
    }

    /// Returns the unquoted value of the field named `name`.
    pub fn get_field(&self, name: &str) -> Result<String> {
        let lineno = self.find_field(name)?;
        let tokens = tokenize(&self.lines[lineno]);
        let value = tokens
            .get(TOK_VALUE)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))?;
        Ok(unquote(value))
    }

    /// Rewrites the value of an existing field.
    ///
    /// `Name` and `Reference` are routed through [Symbol::set_name] and
    /// [Symbol::set_reference] so the `DEF` header token stays consistent
    /// with the field line. Fails with [Error::FieldNotFound] if the field
    /// does not exist; see [Symbol::set_or_add_field] for create-or-update.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "Name" => self.set_name(value),
            "Reference" => self.set_reference(value),
            _ => self.set_field_raw(name, value),
        }
    }

    /// Rewrites a field's value token without the Name/Reference routing.
    fn set_field_raw(&mut self, name: &str, value: &str) -> Result<()> {
        let lineno = self.find_field(name)?;
        let mut tokens = tokenize(&self.lines[lineno]);
        if tokens.len() <= TOK_VALUE {
            return Err(Error::FieldNotFound(name.to_string()));
        }
        tokens[TOK_VALUE] = quote(value);
        self.lines[lineno] = tokens.join(" ");
        Ok(())
    }

    /// Updates an existing field, or appends a new one after the last field
    /// line with the next unused index.
    ///
    /// New fields get position (0,0), size 50, invisible, and carry `name`
    /// as their quoted trailing name token.
    pub fn set_or_add_field(&mut self, name: &str, value: &str) -> Result<()> {
        let (found, last) = self.find_field_or_last(name);
        if found.is_some() {
            return self.set_field(name, value);
        }

        let (insert_after, id) = match last {
            Some(lineno) => {
                let tokens = tokenize(&self.lines[lineno]);
                // A malformed index tag falls back to the last reserved slot,
                // so the new field still lands in the custom range.
                let id: usize = tokens[0][1..].parse().unwrap_or(3);
                (lineno, id + 1)
            }
            // Degenerate symbol with no field lines at all.
            None => (self.find_def()?, 0),
        };

        let line = format!(
            "F{} {} 0 0 50 H I L CNN {}",
            id,
            quote(value),
            quote(name)
        );
        self.lines.insert(insert_after + 1, line);
        Ok(())
    }

    /// Sets the visibility flag of an existing field to `V` or `I`.
    pub fn set_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        let lineno = self.find_field(name)?;
        let mut tokens = tokenize(&self.lines[lineno]);
        if tokens.len() <= TOK_VISIBILITY {
            return Err(Error::FieldNotFound(name.to_string()));
        }
        tokens[TOK_VISIBILITY] = if visible { "V" } else { "I" }.to_string();
        self.lines[lineno] = tokens.join(" ");
        Ok(())
    }

    /// Renames the symbol, updating the `F1` field line and the name token
    /// of the `DEF` header together.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.set_field_raw("Name", name)?;
        self.set_def_token(1, name)
    }

    /// Changes the reference-designator prefix, updating the `F0` field line
    /// and the reference token of the `DEF` header together.
    pub fn set_reference(&mut self, reference: &str) -> Result<()> {
        self.set_field_raw("Reference", reference)?;
        self.set_def_token(2, reference)
    }

    fn set_def_token(&mut self, position: usize, value: &str) -> Result<()> {
        let lineno = self.find_def()?;
        let mut tokens = tokenize(&self.lines[lineno]);
        let token = tokens.get_mut(position).ok_or(Error::MissingDef)?;
        *token = quote_if_needed(value);
        self.lines[lineno] = tokens.join(" ");
        Ok(())
    }

    /// Serializes the symbol back to library text, newline-joined.
    pub fn serialize(&self) -> String {
        self.lines.join("\n")
    }
}
