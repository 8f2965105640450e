// Display formatting utilities

use crossterm::style::Color;

/// Format a delay in milliseconds, `∞` for cards that never show
pub fn format_delay(delay: Option<f64>) -> String {
    match delay {
        Some(secs) => format!("{:>5}", (secs * 1000.0).round() as i64),
        None => format!("{:>5}", "∞"),
    }
}

/// Block character for an opacity between 0 and 1
pub fn opacity_glyph(opacity: f64) -> char {
    const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];
    let step = (opacity.clamp(0.0, 1.0) * (SHADES.len() - 1) as f64).round() as usize;
    SHADES[step]
}

/// Colour for a delay relative to the longest delay on the grid
pub fn delay_color(delay: Option<f64>, max_delay: f64) -> Color {
    match delay {
        None => Color::DarkGrey,
        Some(secs) if secs <= 0.0 => Color::Green,
        Some(secs) if max_delay > 0.0 && secs / max_delay < 0.5 => Color::Cyan,
        Some(_) => Color::Yellow,
    }
}

/// Column headers for a grid
pub fn column_headers(cols: usize, width: usize) -> String {
    let mut line = String::from("    ");
    for col in 0..cols {
        line.push_str(&format!(" {:>width$}", col, width = width));
    }
    line
}

/// Row prefix for grid rows
pub fn row_prefix(row: usize) -> String {
    format!("{:2}: ", row)
}
