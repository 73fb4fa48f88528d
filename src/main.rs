/*
 * This file is part of imeiguard.
 *
 * Copyright (C) 2025 imeiguard contributors
 *
 * imeiguard is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * imeiguard is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with imeiguard. If not, see <https://www.gnu.org/licenses/>.
 */

use clap::Parser;
use tracing::error;

use imeiguard::cli::{self, Cli};
use imeiguard::logger;

fn main() {
    let args = Cli::parse();
    logger::init_tracing(args.verbose);

    match cli::run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
