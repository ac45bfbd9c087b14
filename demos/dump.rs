// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  dump.rs - Library inspection demo for EESchema symbol libraries.
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

use clap::Parser;

use symparam::library::SymbolLibrary;
use symparam::symbol::RESERVED_FIELDS;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The library file to read.
    file: String,
}

fn main() {
    let args = Args::parse();

    let lib = match SymbolLibrary::from_path(&args.file) {
        Ok(lib) => lib,
        Err(error) => {
            eprintln!("Error loading library {:?}: {}", &args.file, error);
            return;
        }
    };

    println!("{} symbols", lib.symbols().len());
    for symbol in lib.symbols() {
        match symbol.name() {
            Ok(name) => println!("Symbol: {}", name),
            Err(error) => {
                println!("Symbol: <unnamed> ({})", error);
                continue;
            }
        }
        for field in RESERVED_FIELDS {
            if let Ok(value) = symbol.get_field(field) {
                println!("  {}: {}", field, value);
            }
        }
    }
}
