//! Type allocation code reference data and resolution

mod builtin;
mod resolver;
mod table;

pub use resolver::resolve_tac;
pub use table::{validate_tac_entry, TacSource, TacTable};
