// Reveal scheduler - owns the stage and the current playback
//
// Every change of stage, grid, pattern, delay unit or duration rebuilds the
// whole playback and bumps the generation. Finish notifications carry the
// generation they were scheduled under; anything older is dropped.

use crate::config::{CardCell, GridConfig, RevealConfig};
use crate::grid::{
    compute_cells, grid_geometry, container_scale, AnimationPattern, CardGeometry, CardStyle,
    GridResolver, ViewportSize,
};
use crate::host::{resolve_aspect_ratio, ImageMetrics, ViewportProvider, DEFAULT_IMAGE_ASPECT_RATIO};
use crate::reveal::stage::Stage;
use crate::reveal::transition::CellTransition;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub type ListenerId = u64;

/// Events published to listeners registered on the scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealEvent {
    StageChanged { from: Stage, to: Stage },
    /// A new playback replaced the previous one
    Recomputed { generation: u64 },
    /// The reveal sequence finished (or was skipped straight to done)
    Completed { generation: u64 },
}

/// Result of feeding a "transition finished" notification to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Notification belongs to a superseded playback
    Stale,
    /// This card already reported
    Duplicate,
    /// No card with that playback index
    OutOfRange,
    Recorded,
    /// The completion threshold was reached: stage is now `Done`
    Completed,
}

/// Number of trailing cards whose finish ends the sequence
pub fn cards_to_done(grid: GridConfig, delay_unit: f64, remain_cards: Option<usize>) -> usize {
    let total = grid.cell_count();
    remain_cards.unwrap_or_else(|| {
        let scaled = (grid.cell_count() as f64 * delay_unit).floor();
        if scaled.is_finite() && scaled > 0.0 {
            (scaled as usize).min(total)
        } else {
            0
        }
    })
}

/// Playback index whose finish completes the sequence: `N - K`, with `K`
/// kept within `1..=N` so the index always names a real card
pub fn completion_index(total: usize, cards_to_done: usize) -> usize {
    total.saturating_sub(cards_to_done.clamp(1, total.max(1)))
}

/// Everything the host needs to play one generation
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    pub generation: u64,
    pub stage: Stage,
    pub grid: GridConfig,
    /// Transitions in playback order
    pub transitions: Vec<CellTransition>,
    pub completion_index: usize,
    /// The container shows the background image directly
    pub show_background: bool,
}

impl Playback {
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CellTransition> {
        self.transitions.get(index)
    }

    pub fn transition_for(&self, cell: CardCell) -> Option<&CellTransition> {
        self.transitions.iter().find(|t| t.cell == cell)
    }

    /// Time at which the last transition finishes
    pub fn total_duration(&self) -> f64 {
        self.transitions
            .iter()
            .map(CellTransition::finish_time)
            .fold(0.0, f64::max)
    }

    /// Opacity of every card `elapsed` seconds in, as a `rows x cols` matrix
    pub fn opacity_grid(&self, elapsed: f64) -> Vec<Vec<f64>> {
        let mut grid = vec![vec![0.0; self.grid.cols]; self.grid.rows];
        for transition in &self.transitions {
            grid[transition.cell.row][transition.cell.col] = transition.opacity_at(elapsed);
        }
        grid
    }
}

/// Static layout of a frame: container fit plus every card's geometry
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub background_image: String,
    pub show_background: bool,
    pub aspect_ratio: f64,
    pub container_scale: f64,
    pub style: CardStyle,
    pub cards: Vec<CardGeometry>,
}

pub struct RevealScheduler {
    resolver: GridResolver,
    viewport: ViewportSize,
    grid: GridConfig,
    pattern: AnimationPattern,
    start_cell: Option<CardCell>,
    delay_unit: f64,
    duration: f64,
    remain_cards: Option<usize>,
    background_image: String,
    aspect_ratio: f64,
    style: CardStyle,

    stage: Stage,
    generation: u64,
    playback: Playback,
    finished: Vec<bool>,
    finished_count: usize,
    completed: bool,

    rng: StdRng,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&RevealEvent)>)>,
    next_listener_id: ListenerId,
}

impl std::fmt::Debug for RevealScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealScheduler")
            .field("grid", &self.grid)
            .field("pattern", &self.pattern)
            .field("delay_unit", &self.delay_unit)
            .field("stage", &self.stage)
            .field("generation", &self.generation)
            .field("finished_count", &self.finished_count)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn sanitize_seconds(value: f64, what: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("⚠️ {} of {} is not a usable duration, using 0", what, value);
        0.0
    }
}

impl RevealScheduler {
    /// Build a scheduler from configuration. The rng is seeded from
    /// `config.seed` when present, otherwise from OS entropy.
    pub fn new(config: &RevealConfig, viewport: ViewportSize) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, viewport, rng)
    }

    pub fn with_rng(config: &RevealConfig, viewport: ViewportSize, rng: StdRng) -> Self {
        let resolver = GridResolver::new(Some(config.grid_size), config.card_size);
        let grid = resolver.resolve(viewport);
        let stage = config.stage;

        let mut scheduler = Self {
            resolver,
            viewport,
            grid,
            pattern: config.animation_pattern,
            start_cell: config.start_cell,
            delay_unit: sanitize_seconds(config.delay_between_cards, "delayBetweenCards"),
            duration: sanitize_seconds(config.animation_duration, "animationDuration"),
            remain_cards: config.remain_cards,
            background_image: config.background_image.clone(),
            aspect_ratio: DEFAULT_IMAGE_ASPECT_RATIO,
            style: config.card_style(),
            stage,
            generation: 0,
            playback: Playback {
                generation: 0,
                stage,
                grid,
                transitions: Vec::new(),
                completion_index: 0,
                show_background: stage == Stage::Done,
            },
            finished: Vec::new(),
            finished_count: 0,
            completed: false,
            rng,
            listeners: Vec::new(),
            next_listener_id: 1,
        };
        scheduler.recompute();
        scheduler
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    pub fn pattern(&self) -> AnimationPattern {
        self.pattern
    }

    pub fn delay_unit(&self) -> f64 {
        self.delay_unit
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn finished_count(&self) -> usize {
        self.finished_count
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// `K` for the current grid and delay unit
    pub fn cards_to_done(&self) -> usize {
        cards_to_done(self.grid, self.delay_unit, self.remain_cards)
    }

    /// Register a listener for every scheduler event
    pub fn add_event_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&RevealEvent) + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Register a callback fired once per completed reveal sequence
    pub fn on_animation_complete<F>(&mut self, mut callback: F) -> ListenerId
    where
        F: FnMut() + 'static,
    {
        self.add_event_listener(move |event| {
            if let RevealEvent::Completed { .. } = event {
                callback();
            }
        })
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: RevealEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Rebuild the playback from current inputs and start a new generation
    fn recompute(&mut self) {
        self.generation += 1;

        let cells = compute_cells(
            self.grid,
            self.pattern,
            self.start_cell,
            self.delay_unit,
            self.stage,
            &mut self.rng,
        );
        let hidden = self.stage == Stage::Done;
        let transitions: Vec<CellTransition> = cells
            .iter()
            .enumerate()
            .map(|(index, cell_delay)| {
                CellTransition::new(index, cell_delay.cell, cell_delay.delay, hidden, self.duration)
            })
            .collect();

        let total = transitions.len();
        self.playback = Playback {
            generation: self.generation,
            stage: self.stage,
            grid: self.grid,
            completion_index: completion_index(total, self.cards_to_done()),
            show_background: self.stage == Stage::Done,
            transitions,
        };
        self.finished = vec![false; total];
        self.finished_count = 0;
        self.completed = false;

        debug!(
            "🎬 Recomputed generation {}: stage={} grid={}x{} pattern={} completion_index={}",
            self.generation,
            self.stage,
            self.grid.rows,
            self.grid.cols,
            self.pattern,
            self.playback.completion_index
        );
        self.emit(RevealEvent::Recomputed {
            generation: self.generation,
        });
    }

    fn enter_stage(&mut self, stage: Stage) {
        let from = self.stage;
        self.stage = stage;
        self.recompute();
        self.emit(RevealEvent::StageChanged { from, to: stage });
    }

    fn complete(&mut self) {
        self.completed = true;
        info!("✅ Reveal sequence complete (generation {})", self.generation);
        self.emit(RevealEvent::Completed {
            generation: self.generation,
        });
    }

    /// External stage request. Overwrites the current stage and restarts
    /// scheduling; requesting `Done` completes immediately. Requesting the
    /// stage that is already current changes nothing.
    pub fn request_stage(&mut self, stage: Stage) -> &Playback {
        if stage == self.stage {
            debug!("Stage {} already current, nothing to do", stage);
            return &self.playback;
        }

        self.enter_stage(stage);
        if stage == Stage::Done {
            self.complete();
        }
        &self.playback
    }

    /// Per-card "transition finished" notification from the host.
    ///
    /// Reaching the completion index while revealing moves the stage to
    /// `Done` and fires completion.
    pub fn notify_finished(&mut self, generation: u64, index: usize) -> NotifyOutcome {
        if generation != self.generation {
            debug!(
                "Dropping stale finish for card {} (generation {}, current {})",
                index, generation, self.generation
            );
            return NotifyOutcome::Stale;
        }
        match self.finished.get_mut(index) {
            None => return NotifyOutcome::OutOfRange,
            Some(true) => {
                debug!("Dropping duplicate finish for card {}", index);
                return NotifyOutcome::Duplicate;
            }
            Some(flag) => *flag = true,
        }
        self.finished_count += 1;

        if index == self.playback.completion_index && self.stage == Stage::Reveal && !self.completed {
            self.enter_stage(Stage::Done);
            self.complete();
            return NotifyOutcome::Completed;
        }
        NotifyOutcome::Recorded
    }

    pub fn set_pattern(&mut self, pattern: AnimationPattern) -> &Playback {
        if pattern != self.pattern {
            self.pattern = pattern;
            self.recompute();
        }
        &self.playback
    }

    pub fn set_start_cell(&mut self, start_cell: Option<CardCell>) -> &Playback {
        if let Some(cell) = start_cell {
            if !self.grid.contains(cell) {
                warn!(
                    "⚠️ Start cell ({}, {}) is outside the {}x{} grid, using the center",
                    cell.row, cell.col, self.grid.rows, self.grid.cols
                );
            }
        }
        if start_cell != self.start_cell {
            self.start_cell = start_cell;
            self.recompute();
        }
        &self.playback
    }

    pub fn set_delay_unit(&mut self, delay_unit: f64) -> &Playback {
        let delay_unit = sanitize_seconds(delay_unit, "delayBetweenCards");
        if delay_unit != self.delay_unit {
            self.delay_unit = delay_unit;
            self.recompute();
        }
        &self.playback
    }

    pub fn set_duration(&mut self, duration: f64) -> &Playback {
        let duration = sanitize_seconds(duration, "animationDuration");
        if duration != self.duration {
            self.duration = duration;
            self.recompute();
        }
        &self.playback
    }

    /// Override `K`. Only moves the completion index; the running playback
    /// keeps its generation.
    pub fn set_remain_cards(&mut self, remain_cards: Option<usize>) {
        self.remain_cards = remain_cards;
        self.playback.completion_index = completion_index(self.playback.len(), self.cards_to_done());
    }

    /// Replace the grid sizing inputs
    pub fn set_grid_source(&mut self, resolver: GridResolver) -> &Playback {
        self.resolver = resolver;
        self.apply_grid(self.resolver.resolve(self.viewport));
        &self.playback
    }

    pub fn set_viewport(&mut self, viewport: ViewportSize) -> &Playback {
        self.viewport = viewport;
        self.apply_grid(self.resolver.resolve(viewport));
        &self.playback
    }

    /// Pull the current size from a viewport provider
    pub fn sync_viewport(&mut self, provider: &dyn ViewportProvider) -> &Playback {
        self.set_viewport(provider.current_size())
    }

    fn apply_grid(&mut self, grid: GridConfig) {
        if grid != self.grid {
            debug!(
                "Grid resized from {}x{} to {}x{}",
                self.grid.rows, self.grid.cols, grid.rows, grid.cols
            );
            self.grid = grid;
            self.recompute();
        }
    }

    pub fn set_background_image(&mut self, source: &str, metrics: &dyn ImageMetrics) {
        self.background_image = source.to_string();
        self.aspect_ratio = resolve_aspect_ratio(metrics, source);
    }

    pub fn set_style(&mut self, style: CardStyle) {
        self.style = style;
    }

    /// Layout of the current frame
    pub fn layout(&self) -> FrameLayout {
        FrameLayout {
            background_image: self.background_image.clone(),
            show_background: self.stage == Stage::Done,
            aspect_ratio: self.aspect_ratio,
            container_scale: container_scale(self.viewport, self.aspect_ratio),
            style: self.style.clone(),
            cards: grid_geometry(self.grid, &self.style),
        }
    }
}
