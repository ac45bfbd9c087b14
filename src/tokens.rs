// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/tokens.rs - Tokenizer and quoting codec for EESchema library lines.
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
 * # `tokens` Module
 *
 * Splits one line of EESchema library text into whitespace-separated tokens
 * and converts values to and from their quoted textual form.
 *
 * Tokens keep their surrounding quotes; use [unquote] to get the raw value
 * back. Quote state is toggled by an unescaped `"`, and a `\` takes the next
 * character literally, so quoted tokens may contain spaces and escaped quotes.
 */

/// Splits a line into tokens on unescaped, unquoted whitespace.
///
/// Quotes are kept in the output tokens. An adjacent `""` pair produces an
/// empty token. An unterminated quote at end-of-line is tolerated: the token
/// accumulated so far is emitted as-is rather than failing, since libraries
/// in the wild occasionally carry malformed field lines.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;
    let mut in_tok = false;

    for ch in line.chars() {
        if escaped {
            escaped = false;
            current.push(ch);
        } else if ch == '\\' {
            escaped = true;
            current.push(ch);
        } else if ch.is_whitespace() && !quoted {
            if in_tok {
                tokens.push(std::mem::take(&mut current));
                in_tok = false;
            } else {
                current.clear();
            }
        } else if ch == '"' {
            in_tok = true;
            quoted = !quoted;
            current.push(ch);
        } else {
            in_tok = true;
            current.push(ch);
        }
    }
    if in_tok {
        tokens.push(current);
    }

    tokens
}

/// Wraps a value in double quotes, escaping any `"` or `\` inside it.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Quotes a value only if it contains whitespace or a quote character.
///
/// Header tokens (symbol name, reference prefix) are written bare unless
/// quoting is actually required.
pub fn quote_if_needed(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '"') {
        quote(value)
    } else {
        value.to_string()
    }
}

/// Strips one pair of surrounding quotes, if present, and resolves escapes.
pub fn unquote(token: &str) -> String {
    let inner = token
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(token);

    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for ch in inner.chars() {
        if escaped {
            escaped = false;
            out.push(ch);
        } else if ch == '\\' {
            escaped = true;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_field_line() {
        assert_eq!(
            tokenize("F0 \"Q\" 300 50 60 H V C CNN"),
            vec!["F0", "\"Q\"", "300", "50", "60", "H", "V", "C", "CNN"]
        );
    }

    #[test]
    fn tokenize_named_field_line() {
        assert_eq!(
            tokenize("F5 \"785-1067-1-ND\" -50 -750 60 H I C CNN \"Supplier 1 Part Number\""),
            vec![
                "F5",
                "\"785-1067-1-ND\"",
                "-50",
                "-750",
                "60",
                "H",
                "I",
                "C",
                "CNN",
                "\"Supplier 1 Part Number\""
            ]
        );
    }

    #[test]
    fn tokenize_collapses_repeated_whitespace() {
        assert_eq!(
            tokenize("F3  \"http://aosmd.com/res/data_sheets/AO6400.pdf\" 250    -850 60 H I C CNN  "),
            vec![
                "F3",
                "\"http://aosmd.com/res/data_sheets/AO6400.pdf\"",
                "250",
                "-850",
                "60",
                "H",
                "I",
                "C",
                "CNN"
            ]
        );
    }

    #[test]
    fn tokenize_empty_quotes() {
        assert_eq!(tokenize("F4 \"\" 0 0"), vec!["F4", "\"\"", "0", "0"]);
    }

    #[test]
    fn tokenize_escaped_quote_stays_in_token() {
        assert_eq!(tokenize(r#""a\"b" c"#), vec![r#""a\"b""#, "c"]);
    }

    #[test]
    fn tokenize_unterminated_quote_is_lenient() {
        assert_eq!(tokenize("F1 \"half a token"), vec!["F1", "\"half a token"]);
    }

    #[test]
    fn quote_always_wraps() {
        assert_eq!(quote("785-1067-1-ND"), "\"785-1067-1-ND\"");
        assert_eq!(quote("Supplier 1 Part Number"), "\"Supplier 1 Part Number\"");
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn quote_if_needed_leaves_bare_words() {
        assert_eq!(quote_if_needed("CNN"), "CNN");
        assert_eq!(
            quote_if_needed("Supplier 1 Part Number"),
            "\"Supplier 1 Part Number\""
        );
    }

    #[test]
    fn unquote_round_trip() {
        for value in ["plain", "has space", "a\"quote", "back\\slash", ""] {
            assert_eq!(unquote(&quote(value)), value);
        }
    }

    #[test]
    fn round_trip_through_tokenizer() {
        let name = "Supplier 1 Part Number";
        let line = format!("F5 \"x\" 0 0 50 H I L CNN {}", quote(name));
        let tokens = tokenize(&line);
        assert_eq!(unquote(&tokens[9]), name);
    }
}
