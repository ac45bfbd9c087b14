// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  pipeline.rs - End-to-end tests for the symparam pipeline.
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

use symparam::config::Config;
use symparam::library::SymbolLibrary;
use symparam::parametrize::{parametrize, read_rows, Options};

const BASE_LIB: &str = "\
EESchema-LIBRARY Version 2.3
#encoding utf-8
#
# AO6400
#
DEF AO6400 Q 0 0 Y N 1 F N
F0 \"Q\" 300 50 60 H V C CNN
F1 \"AO6400\" 400 -50 60 H V C CNN
F2 \"Footprints:TSOP_6_950_3100X1700_AO\" 50 -600 60 H I C CNN
F3 \"http://aosmd.com/res/data_sheets/AO6400.pdf\" 250 -850 60 H I C CNN
F4 \"Digi-Key\" -700 -700 60 H I C CNN \"Supplier 1\"
F5 \"785-1067-1-ND\" -50 -750 60 H I C CNN \"Supplier 1 Part Number\"
DRAW
P 2 0 1 0  -150 -200  -150 200 N
P 6 0 1 0  300 250  0 250  0 150  -100 150  -100 200  -100 100 N
X D 1 0 450 200 D 50 50 1 1 P
X G 3 -350 -200 200 R 50 50 1 1 P
ENDDRAW
ENDDEF
#
#End Library
";

const CSV_DATA: &str = "\
Symbol,Name,Description,Supplier 1 Part Number
AO6400,AO6400-RT,30V N-channel MOSFET,785-1067-2-ND
AO6400,AO6400-CT,30V N-channel MOSFET,785-1067-1-ND
";

const CONFIG: &str = r#"
visible_fields = ["Supplier 1 Part Number"]

[tables.mosfets]
visible_fields = ["-Supplier 1 Part Number"]
"#;

#[test]
fn csv_to_library_and_doc_index() {
    let base = SymbolLibrary::parse_str("base.lib", BASE_LIB).unwrap();
    let rows = read_rows(CSV_DATA.as_bytes()).unwrap();
    let config: Config = toml::from_str(CONFIG).unwrap();

    let run = parametrize(
        &base,
        &rows,
        &config.rules_for("parts"),
        &Options::default(),
    )
    .unwrap();

    assert_eq!(run.symbols().len(), 2);
    assert!(run.skipped().is_empty());

    // Output is sorted by Name: -CT before -RT.
    let first = &run.symbols()[0];
    assert_eq!(first.name().unwrap(), "AO6400-CT");
    assert_eq!(
        first.get_field("Supplier 1 Part Number").unwrap(),
        "785-1067-1-ND"
    );
    // Untouched fields come through from the base symbol.
    assert_eq!(first.get_field("Supplier 1").unwrap(), "Digi-Key");

    // The generated library reloads to the same symbols, drawing body intact.
    let reloaded = SymbolLibrary::parse_str("out.lib", &run.library_text()).unwrap();
    assert_eq!(reloaded.symbols().len(), 2);
    for (a, b) in run.symbols().iter().zip(reloaded.symbols()) {
        assert_eq!(a.lines(), b.lines());
    }
    assert!(
        run.library_text()
            .contains("P 6 0 1 0  300 250  0 250  0 150  -100 150  -100 200  -100 100 N")
    );

    let doc = run.doc_text().unwrap();
    assert_eq!(
        doc,
        "EESchema-DOCLIB Version 2.0\n\
         $CMP AO6400-CT\nD 30V N-channel MOSFET\n$ENDCMP\n\
         $CMP AO6400-RT\nD 30V N-channel MOSFET\n$ENDCMP\n"
    );
}

#[test]
fn table_override_changes_visibility_rules() {
    let base = SymbolLibrary::parse_str("base.lib", BASE_LIB).unwrap();
    let csv = "Symbol,Name,Supplier 1 Part Number\nAO6400,AO6400-T,XYZ-1-ND\n";
    let rows = read_rows(csv.as_bytes()).unwrap();
    let config: Config = toml::from_str(CONFIG).unwrap();

    fn f5(run: &symparam::parametrize::ParametrizedLibrary) -> String {
        run.symbols()[0]
            .lines()
            .iter()
            .find(|l| l.starts_with("F5 "))
            .unwrap()
            .clone()
    }

    // Global rules force the supplier part number visible.
    let run = parametrize(
        &base,
        &rows,
        &config.rules_for("parts"),
        &Options::default(),
    )
    .unwrap();
    assert_eq!(
        f5(&run),
        "F5 \"XYZ-1-ND\" -50 -750 60 H V C CNN \"Supplier 1 Part Number\""
    );

    // The mosfets table removes that rule, so the field stays invisible.
    let run = parametrize(
        &base,
        &rows,
        &config.rules_for("mosfets"),
        &Options::default(),
    )
    .unwrap();
    assert_eq!(
        f5(&run),
        "F5 \"XYZ-1-ND\" -50 -750 60 H I C CNN \"Supplier 1 Part Number\""
    );
}

#[test]
fn strict_mode_produces_no_output() {
    let base = SymbolLibrary::parse_str("base.lib", BASE_LIB).unwrap();
    let rows = read_rows("Symbol,Name\nMISSING,X1\nAO6400,X2\n".as_bytes()).unwrap();

    let options = Options {
        strict: true,
        ..Options::default()
    };
    let result = parametrize(&base, &rows, &Default::default(), &options);
    assert!(matches!(
        result,
        Err(symparam::Error::SymbolNotFound(name)) if name == "MISSING"
    ));
}
