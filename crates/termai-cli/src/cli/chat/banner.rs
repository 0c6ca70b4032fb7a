//! Bordered panels for the chat screen.
//!
//! Panels are sized to their content: the widest line, title or subtitle
//! decides the width. The title sits in the top border and the subtitle in
//! the bottom border.

use console::{Style, measure_text_width, style};

/// Build a rounded-corner panel. Returned text has no trailing newline.
///
/// `lines` may carry their own styling; widths are measured without ANSI
/// escapes.
pub fn panel(title: &str, subtitle: Option<&str>, lines: &[String], border: &Style) -> String {
    let widest_line = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0);
    let label_width = |label: &str| measure_text_width(label) + 4;
    let inner = (widest_line + 2)
        .max(label_width(title))
        .max(subtitle.map(label_width).unwrap_or(0));

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(edge('╭', '╮', Some(title), inner, border));
    for line in lines {
        let pad = inner - 2 - measure_text_width(line);
        out.push(format!(
            "{} {}{} {}",
            border.apply_to('│'),
            line,
            " ".repeat(pad),
            border.apply_to('│')
        ));
    }
    out.push(edge('╰', '╯', subtitle, inner, border));
    out.join("\n")
}

/// One horizontal border with an optional centered label.
fn edge(left: char, right: char, label: Option<&str>, inner: usize, border: &Style) -> String {
    let Some(label) = label else {
        return border
            .apply_to(format!("{left}{}{right}", "─".repeat(inner)))
            .to_string();
    };

    let label_width = measure_text_width(label) + 2;
    let fill = inner - label_width;
    let before = fill / 2;
    let after = fill - before;
    format!(
        "{} {} {}",
        border.apply_to(format!("{left}{}", "─".repeat(before))),
        label,
        border.apply_to(format!("{}{right}", "─".repeat(after)))
    )
}

/// Startup panel.
pub fn welcome_panel() -> String {
    panel(
        "Welcome",
        None,
        &[
            style("Terminal AI Assistant").cyan().bold().to_string(),
            style("Type your query or 'exit' to quit").italic().to_string(),
        ],
        &Style::new().blue(),
    )
}

/// Header printed above each streamed answer.
pub fn response_header(model: &str) -> String {
    panel(
        "AI Response",
        Some(&format!("Model: {model}")),
        &[],
        &Style::new().green(),
    )
}
