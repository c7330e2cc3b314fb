//! Track-list supplier: scans a directory into the ordered track list the
//! player is handed at startup.

mod display;
mod model;
mod scan;

pub use display::display_from_fields;
pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
