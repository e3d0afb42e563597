mod palette;
mod selection;

pub use palette::{Factor, Palette};
pub use selection::{FactorSelection, SelectionMode, matches_query};
