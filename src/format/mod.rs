//! Rich-text formatting core
//!
//! Everything that decides *what* a formatting action does lives here,
//! independent of any widget: the format data model ([`state`]), toggle
//! resolution ([`toggle`]), selection-aware application ([`apply`]), and
//! intent dispatch ([`controller`]).

pub mod apply;
pub mod controller;
pub mod state;
pub mod toggle;

pub use controller::{dispatch, Intent};
pub use state::{Alignment, CharFormat, FontWeight, FormatPatch, Rgb};
