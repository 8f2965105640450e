// Display module - terminal rendering of delay and opacity grids
// Server-side demos and tests share these so grids always look the same

pub mod formatters;

pub use formatters::{column_headers, delay_color, format_delay, opacity_glyph, row_prefix};

use crate::reveal::Playback;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

/// Print the delay (ms) of every card, coloured by how early it shows
pub fn display_delays<W: Write>(out: &mut W, playback: &Playback, title: Option<&str>) -> io::Result<()> {
    let grid = playback.grid;
    let heading = match title {
        Some(title) => title.to_string(),
        None => format!(
            "Reveal delays - {}x{} grid, stage {}, generation {}",
            grid.rows, grid.cols, playback.stage, playback.generation
        ),
    };
    queue!(out, Print(format!("{}\r\n", heading)))?;
    queue!(out, Print(format!("{}\r\n", column_headers(grid.cols, 5))))?;

    let max_delay = playback
        .transitions
        .iter()
        .filter_map(|t| t.delay)
        .fold(0.0, f64::max);
    let mut delays = vec![vec![None; grid.cols]; grid.rows];
    for transition in &playback.transitions {
        delays[transition.cell.row][transition.cell.col] = Some(transition.delay);
    }

    for (row, cells) in delays.iter().enumerate() {
        queue!(out, Print(row_prefix(row)))?;
        for cell in cells {
            let delay = cell.flatten();
            queue!(
                out,
                SetForegroundColor(delay_color(delay, max_delay)),
                Print(format!(" {}", format_delay(delay))),
                ResetColor
            )?;
        }
        queue!(out, Print("\r\n"))?;
    }

    let completion = playback
        .get(playback.completion_index)
        .map(|t| format!("({}, {})", t.cell.row, t.cell.col))
        .unwrap_or_else(|| "-".to_string());
    queue!(
        out,
        Print(format!(
            "Completion at playback index {} of {} {}\r\n",
            playback.completion_index,
            playback.len(),
            completion
        ))
    )?;
    out.flush()
}

/// Print the opacity of every card `elapsed` seconds into the playback
pub fn display_opacity<W: Write>(out: &mut W, playback: &Playback, elapsed: f64) -> io::Result<()> {
    queue!(
        out,
        Print(format!(
            "t={:>6.2}s  stage {}  generation {}\r\n",
            elapsed, playback.stage, playback.generation
        ))
    )?;
    for row in playback.opacity_grid(elapsed) {
        for opacity in row {
            let glyph = opacity_glyph(opacity);
            let color = if opacity >= 1.0 { Color::White } else { Color::Grey };
            queue!(
                out,
                SetForegroundColor(color),
                Print(format!("{}{}", glyph, glyph)),
                ResetColor
            )?;
        }
        queue!(out, Print("\r\n"))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::grid::{AnimationPattern, ViewportSize};
    use crate::reveal::{RevealScheduler, Stage};

    fn rendered<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(render: F) -> String {
        let mut out = Vec::new();
        render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_display_delays_basic() {
        let config = RevealConfig {
            animation_pattern: AnimationPattern::Random,
            seed: Some(3),
            ..RevealConfig::default()
        };
        let scheduler = RevealScheduler::new(&config, ViewportSize::default());
        let text = rendered(|out| display_delays(out, scheduler.playback(), None));

        assert!(text.contains("4x4 grid, stage initial"));
        assert!(text.contains("∞"));
        assert!(text.contains("Completion at playback index 14 of 16"));
    }

    #[test]
    fn test_display_opacity_after_playback() {
        let config = RevealConfig {
            animation_pattern: AnimationPattern::TopLeft,
            ..RevealConfig::default()
        };
        let mut scheduler = RevealScheduler::new(&config, ViewportSize::default());
        let playback = scheduler.request_stage(Stage::Reveal).clone();
        let text = rendered(|out| display_opacity(out, &playback, playback.total_duration()));
        assert_eq!(text.matches("██").count(), 16);
    }
}
