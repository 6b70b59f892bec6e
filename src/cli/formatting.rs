//! Formatting utilities for CLI output.
//!
//! Provides help text listings, aligned tables and the styling used for
//! errors and emphasis.

use super::types::CommandMetadata;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::YELLOW, text, Colors::RESET)
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Renders the help listing for a group of commands.
///
/// `usage` is the group's usage line; `color` toggles ANSI styling.
pub fn format_command_list(usage: &str, commands: &[CommandMetadata], color: bool) -> String {
    let style = |format: fn(&str) -> String, text: &str| {
        if color { format(text) } else { text.to_string() }
    };

    let width = commands
        .iter()
        .map(|command| command.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        format!("{} {usage}", style(format_header, "Usage:")),
        String::new(),
        style(format_header, "Commands:"),
    ];

    for command in commands {
        let padding = " ".repeat(width - command.name.chars().count());
        lines.push(format!(
            "  {}{padding}  {}",
            style(format_command, &command.name),
            style(format_description, &command.description)
        ));
    }

    let examples: Vec<&String> = commands.iter().flat_map(|command| &command.examples).collect();
    if !examples.is_empty() {
        lines.push(String::new());
        lines.push(style(format_header, "Examples:"));
        lines.extend(examples.into_iter().map(|example| format!("  {example}")));
    }

    lines.join("\n")
}

/// Pads every column of `rows` to a common width.
///
/// Each column is as wide as its widest cell, but never narrower than
/// `min_width`. Columns are joined by `separator` and trailing whitespace is
/// dropped.
pub fn align_table<R, C>(rows: &[R], min_width: usize, separator: &str) -> Vec<String>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let columns = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);

    let widths: Vec<usize> = (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.as_ref().get(column))
                .map(|cell| cell.as_ref().chars().count())
                .fold(min_width, usize::max)
        })
        .collect();

    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .as_ref()
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
                .collect();
            cells.join(separator).trim_end().to_string()
        })
        .collect()
}
