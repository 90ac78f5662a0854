//! Formatting for the lines `ferrum-config` prints.
//!
//! Status lines look like `[load  ] 3 row(s) in Sample from data/Sample.dat`:
//! a bold tag naming the command that speaks, then the text.

use colored::Colorize;

use crate::cli::colors::FERRUM_RED;

/// Width the tag is padded to, so the messages line up.
const TAG_WIDTH: usize = 6;

pub fn highlight_argument(argument: &str) -> String {
    //! Table names, ids and error kinds, colored but not bold.

    argument.color(FERRUM_RED).to_string()
}

pub fn system_message(tag: &str, message: String) -> String {
    //! Prefix `message` with the bracketed `tag` (`load`, `get`, `json`...).

    let tag = format!("{:width$}", tag.color(FERRUM_RED).bold(), width = TAG_WIDTH);

    format!("[{}] {}", tag, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_message_keeps_tag_and_text() {
        colored::control::set_override(false);

        assert_eq!(system_message("load", "done".to_string()), "[load  ] done");
        assert_eq!(highlight_argument("Sample"), "Sample");
    }
}
