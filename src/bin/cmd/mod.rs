// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod convert_enums;
mod inspect;
mod locate;
mod pybind;
mod swig;

pub use convert_enums::ConvertEnumsCmd;
pub use inspect::InspectCmd;
pub use locate::LocateCmd;
pub use pybind::PybindCmd;
pub use swig::SwigCmd;
