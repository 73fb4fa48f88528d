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

//! imeiguard - IMEI and serial checks for phone shop intake
//!
//! This library wires the `ig-core` engine to configuration, an audit log,
//! inventory duplicate lookups and the command line front-end.

pub mod cli;
pub mod config;
pub mod inventory;
pub mod logger;

pub use ig_core::{Engine, IntakeReport, Severity, SuspicionReport};
