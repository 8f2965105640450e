// Delay calculator - decides when each card of the grid becomes visible
//
// Every function here is a pure function of its inputs, except that the
// random pattern draws from the caller's rng.

use crate::config::{CardCell, GridConfig};
use crate::reveal::Stage;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationPattern {
    /// Distance from the geometric center of the grid
    #[default]
    Center,
    /// Manhattan distance from the top-left corner
    TopLeft,
    /// Random delays around an anchor cell
    Random,
    /// Any pattern name we don't know. Every card gets delay 0.
    #[serde(other)]
    Unknown,
}

impl AnimationPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationPattern::Center => "center",
            AnimationPattern::TopLeft => "topLeft",
            AnimationPattern::Random => "random",
            AnimationPattern::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AnimationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationPattern {
    type Err = std::convert::Infallible;

    /// Never fails: unrecognised names map to `Unknown`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "center" => AnimationPattern::Center,
            "topleft" | "top_left" | "top-left" => AnimationPattern::TopLeft,
            "random" => AnimationPattern::Random,
            _ => AnimationPattern::Unknown,
        })
    }
}

/// Delay before a card starts its transition, in seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Delay {
    Finite(f64),
    /// The card never becomes visible in the current stage
    Infinite,
}

impl Delay {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Delay::Infinite)
    }

    pub fn seconds(&self) -> Option<f64> {
        match self {
            Delay::Finite(secs) => Some(*secs),
            Delay::Infinite => None,
        }
    }

    /// Total order: finite delays by value, `Infinite` after all of them
    pub fn total_cmp(&self, other: &Delay) -> Ordering {
        match (self, other) {
            (Delay::Finite(a), Delay::Finite(b)) => a.total_cmp(b),
            (Delay::Finite(_), Delay::Infinite) => Ordering::Less,
            (Delay::Infinite, Delay::Finite(_)) => Ordering::Greater,
            (Delay::Infinite, Delay::Infinite) => Ordering::Equal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellDelay {
    pub cell: CardCell,
    pub delay: Delay,
}

/// Anchor of the random pattern: the explicit start cell when it lies inside
/// the grid, otherwise the floored grid center
pub fn anchor_cell(grid: GridConfig, start_cell: Option<CardCell>) -> CardCell {
    start_cell
        .filter(|cell| grid.contains(*cell))
        .unwrap_or_else(|| CardCell::new(grid.rows / 2, grid.cols / 2))
}

/// Compute the delay of a single card
pub fn calculate_delay<R: Rng + ?Sized>(
    cell: CardCell,
    grid: GridConfig,
    pattern: AnimationPattern,
    start_cell: Option<CardCell>,
    delay_unit: f64,
    stage: Stage,
    rng: &mut R,
) -> Delay {
    let rows = grid.rows as f64;
    let cols = grid.cols as f64;
    let row = cell.row as f64;
    let col = cell.col as f64;

    match pattern {
        AnimationPattern::Center => {
            let center_row = (rows - 1.0) / 2.0;
            let center_col = (cols - 1.0) / 2.0;
            let distance = ((row - center_row).powi(2) + (col - center_col).powi(2)).sqrt();
            // initial: outside-in, otherwise inside-out
            if stage == Stage::Initial {
                Delay::Finite((rows.max(cols) - distance) * delay_unit)
            } else {
                Delay::Finite(distance * delay_unit)
            }
        }
        AnimationPattern::TopLeft => {
            let max_distance = rows + cols - 2.0;
            let distance = row + col;
            // initial: bottom-right first, otherwise top-left first
            if stage == Stage::Initial {
                Delay::Finite((max_distance - distance) * delay_unit)
            } else {
                Delay::Finite(distance * delay_unit)
            }
        }
        AnimationPattern::Random => {
            if cell == anchor_cell(grid, start_cell) {
                return Delay::Finite(0.0);
            }
            match stage {
                Stage::Initial => Delay::Infinite,
                Stage::Reveal => Delay::Finite(rng.gen::<f64>() * delay_unit * rows.max(cols)),
                Stage::Done => Delay::Finite(0.0),
            }
        }
        AnimationPattern::Unknown => Delay::Finite(0.0),
    }
}

/// Compute the delay of every card in the grid, sorted ascending by delay.
///
/// The sort is stable, so cards with equal delays keep row-major order. The
/// position in the returned list is the card's playback index.
pub fn compute_cells<R: Rng + ?Sized>(
    grid: GridConfig,
    pattern: AnimationPattern,
    start_cell: Option<CardCell>,
    delay_unit: f64,
    stage: Stage,
    rng: &mut R,
) -> Vec<CellDelay> {
    let mut cells: Vec<CellDelay> = grid
        .cells()
        .map(|cell| CellDelay {
            cell,
            delay: calculate_delay(cell, grid, pattern, start_cell, delay_unit, stage, &mut *rng),
        })
        .collect();

    cells.sort_by(|a, b| a.delay.total_cmp(&b.delay));
    cells
}
