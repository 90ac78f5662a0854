//! Palette of the `ferrum-config` output.
//!
//! - FERRUM_RED: tags in front of messages, table names and ids
//! - FERRUM_DIM: data file paths in `tables`

use colored::Color;

pub(crate) const FERRUM_RED: Color = Color::TrueColor {
    r: 255,
    g: 87,
    b: 87,
};

pub(crate) const FERRUM_DIM: Color = Color::TrueColor {
    r: 150,
    g: 150,
    b: 150,
};
