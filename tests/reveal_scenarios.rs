//! Integration tests: full reveal sequences driven through the public API
use e_reveal::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

const ALL_PATTERNS: [AnimationPattern; 3] = [
    AnimationPattern::Center,
    AnimationPattern::TopLeft,
    AnimationPattern::Random,
];
const ALL_STAGES: [Stage; 3] = [Stage::Initial, Stage::Reveal, Stage::Done];

fn config(pattern: AnimationPattern, rows: usize, cols: usize) -> RevealConfig {
    RevealConfig {
        grid_size: GridConfig::new(rows, cols),
        animation_pattern: pattern,
        seed: Some(1234),
        ..RevealConfig::default()
    }
}

fn record_events(scheduler: &mut RevealScheduler) -> Rc<RefCell<Vec<RevealEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    scheduler.add_event_listener(move |event| sink.borrow_mut().push(*event));
    events
}

fn completions(events: &Rc<RefCell<Vec<RevealEvent>>>) -> usize {
    events
        .borrow()
        .iter()
        .filter(|event| matches!(event, RevealEvent::Completed { .. }))
        .count()
}

#[test]
fn every_cell_gets_exactly_one_delay() {
    let mut rng = StdRng::seed_from_u64(77);
    for rows in 1..=5 {
        for cols in 1..=5 {
            let grid = GridConfig::new(rows, cols);
            for pattern in ALL_PATTERNS {
                for stage in ALL_STAGES {
                    let cells = compute_cells(grid, pattern, None, 0.15, stage, &mut rng);
                    assert_eq!(cells.len(), rows * cols);

                    let mut coords: Vec<CardCell> = cells.iter().map(|c| c.cell).collect();
                    coords.sort();
                    coords.dedup();
                    assert_eq!(coords.len(), rows * cols);

                    let random_initial = pattern == AnimationPattern::Random && stage == Stage::Initial;
                    for cell_delay in &cells {
                        match cell_delay.delay {
                            Delay::Finite(secs) => assert!(secs.is_finite() && secs >= 0.0),
                            Delay::Infinite => assert!(random_initial),
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn center_initial_closes_outside_in() {
    let mut rng = StdRng::seed_from_u64(0);
    for rows in 3..=7 {
        for cols in 3..=7 {
            let grid = GridConfig::new(rows, cols);
            let delay = |row, col, rng: &mut StdRng| {
                calculate_delay(
                    CardCell::new(row, col),
                    grid,
                    AnimationPattern::Center,
                    None,
                    0.15,
                    Stage::Initial,
                    rng,
                )
                .seconds()
                .unwrap()
            };
            let corner = delay(0, 0, &mut rng);
            let adjacent = delay(rows / 2, (cols - 1) / 2, &mut rng);
            assert!(corner <= adjacent, "{}x{}: {} > {}", rows, cols, corner, adjacent);
        }
    }
}

#[test]
fn center_reveal_is_monotonic_in_distance() {
    let grid = GridConfig::new(4, 6);
    let mut rng = StdRng::seed_from_u64(0);
    let cells = compute_cells(grid, AnimationPattern::Center, None, 0.2, Stage::Reveal, &mut rng);

    let center = ((grid.rows as f64 - 1.0) / 2.0, (grid.cols as f64 - 1.0) / 2.0);
    let distance = |cell: CardCell| {
        ((cell.row as f64 - center.0).powi(2) + (cell.col as f64 - center.1).powi(2)).sqrt()
    };
    for pair in cells.windows(2) {
        assert!(distance(pair[0].cell) <= distance(pair[1].cell) + 1e-12);
    }
}

#[test]
fn deterministic_patterns_are_idempotent() {
    let grid = GridConfig::new(5, 4);
    for pattern in [AnimationPattern::Center, AnimationPattern::TopLeft] {
        for stage in ALL_STAGES {
            let first = compute_cells(grid, pattern, None, 0.15, stage, &mut StdRng::seed_from_u64(1));
            let second = compute_cells(grid, pattern, None, 0.15, stage, &mut StdRng::seed_from_u64(2));
            assert_eq!(first, second);
        }
    }
    let first = compute_cells(grid, AnimationPattern::Random, None, 0.15, Stage::Initial, &mut StdRng::seed_from_u64(1));
    let second = compute_cells(grid, AnimationPattern::Random, None, 0.15, Stage::Initial, &mut StdRng::seed_from_u64(2));
    assert_eq!(first, second);
}

#[test]
fn random_reveal_resamples_each_recompute() {
    let mut scheduler = RevealScheduler::new(&config(AnimationPattern::Random, 4, 4), ViewportSize::default());
    let first = scheduler.request_stage(Stage::Reveal).clone();
    scheduler.request_stage(Stage::Initial);
    let second = scheduler.request_stage(Stage::Reveal).clone();
    assert_ne!(first.transitions, second.transitions);
}

#[test]
fn four_by_four_random_reveal_completes_at_index_fourteen() {
    let mut scheduler = RevealScheduler::new(&config(AnimationPattern::Random, 4, 4), ViewportSize::default());
    let events = record_events(&mut scheduler);
    assert_eq!(scheduler.cards_to_done(), 2);

    let playback = scheduler.request_stage(Stage::Reveal).clone();
    assert_eq!(playback.completion_index, 14);

    let mut host = SimulatedHost::play(&playback);
    let outcomes = host.run_to_end(&mut scheduler);
    assert_eq!(outcomes.len(), 15);
    assert_eq!(outcomes[14], NotifyOutcome::Completed);

    assert_eq!(scheduler.stage(), Stage::Done);
    assert_eq!(completions(&events), 1);

    // Stage change and completion were published together, after the recompute
    let events = events.borrow();
    let tail: Vec<_> = events.iter().rev().take(3).rev().copied().collect();
    assert!(matches!(tail[0], RevealEvent::Recomputed { .. }));
    assert_eq!(
        tail[1],
        RevealEvent::StageChanged {
            from: Stage::Reveal,
            to: Stage::Done
        }
    );
    assert!(matches!(tail[2], RevealEvent::Completed { .. }));
}

#[test]
fn done_request_fires_without_notifications() {
    for from in [Stage::Initial, Stage::Reveal] {
        let mut base = config(AnimationPattern::Center, 3, 3);
        base.stage = from;
        let mut scheduler = RevealScheduler::new(&base, ViewportSize::default());
        let events = record_events(&mut scheduler);

        scheduler.request_stage(Stage::Done);
        assert_eq!(completions(&events), 1);
        assert_eq!(scheduler.finished_count(), 0);
        assert!(scheduler.playback().show_background);
    }
}

#[test]
fn done_back_to_initial_restarts() {
    let mut scheduler = RevealScheduler::new(&config(AnimationPattern::TopLeft, 3, 3), ViewportSize::default());
    scheduler.request_stage(Stage::Done);
    let playback = scheduler.request_stage(Stage::Initial).clone();
    assert_eq!(playback.stage, Stage::Initial);
    assert!(!playback.show_background);
    assert!(playback.transitions.iter().all(|t| t.target_opacity == 1.0));
}

#[test]
fn rapid_toggling_never_completes_from_stale_callbacks() {
    let mut scheduler = RevealScheduler::new(&config(AnimationPattern::Random, 4, 4), ViewportSize::default());
    let events = record_events(&mut scheduler);

    let mut hosts = Vec::new();
    for _ in 0..5 {
        hosts.push(SimulatedHost::play(scheduler.request_stage(Stage::Reveal)));
        hosts.push(SimulatedHost::play(scheduler.request_stage(Stage::Initial)));
    }
    scheduler.request_stage(Stage::Reveal);

    // All of these belong to superseded generations
    for mut host in hosts {
        for outcome in host.run_to_end(&mut scheduler) {
            assert_eq!(outcome, NotifyOutcome::Stale);
        }
    }
    assert_eq!(completions(&events), 0);
    assert_eq!(scheduler.stage(), Stage::Reveal);
    assert_eq!(scheduler.finished_count(), 0);
}

#[test]
fn remain_cards_override_moves_threshold() {
    let mut base = config(AnimationPattern::Center, 4, 4);
    base.remain_cards = Some(6);
    let mut scheduler = RevealScheduler::new(&base, ViewportSize::default());
    let playback = scheduler.request_stage(Stage::Reveal).clone();
    assert_eq!(playback.completion_index, 10);

    let mut host = SimulatedHost::play(&playback);
    let outcomes = host.run_to_end(&mut scheduler);
    assert_eq!(outcomes.len(), 11);
    assert_eq!(scheduler.stage(), Stage::Done);
}

#[test]
fn small_delay_unit_completes_on_last_card() {
    // floor(9 * 0.05) == 0 cards to done
    let mut base = config(AnimationPattern::Center, 3, 3);
    base.delay_between_cards = 0.05;
    let mut scheduler = RevealScheduler::new(&base, ViewportSize::default());
    assert_eq!(scheduler.cards_to_done(), 0);

    let playback = scheduler.request_stage(Stage::Reveal).clone();
    assert_eq!(playback.completion_index, 8);

    let outcomes = SimulatedHost::play(&playback).run_to_end(&mut scheduler);
    assert_eq!(outcomes.len(), 9);
    assert_eq!(scheduler.stage(), Stage::Done);
}

#[test]
fn viewport_provider_drives_grid() {
    let viewport = SharedViewport::new(ViewportSize::new(800.0, 600.0));
    let mut base = config(AnimationPattern::Center, 2, 2);
    base.card_size = Some(CardSize::new(100.0, 150.0));
    let scheduler = Rc::new(RefCell::new(RevealScheduler::new(&base, viewport.current_size())));
    assert_eq!(scheduler.borrow().grid(), GridConfig::new(4, 8));

    let target = scheduler.clone();
    let subscription = viewport.on_change(Rc::new(move |size: ViewportSize| {
        target.borrow_mut().set_viewport(size);
    }));

    viewport.set_size(ViewportSize::new(801.0, 600.0));
    assert_eq!(scheduler.borrow().grid(), GridConfig::new(4, 9));

    subscription.unsubscribe();
    viewport.set_size(ViewportSize::new(200.0, 150.0));
    assert_eq!(scheduler.borrow().grid(), GridConfig::new(4, 9));

    scheduler.borrow_mut().sync_viewport(&viewport);
    assert_eq!(scheduler.borrow().grid(), GridConfig::new(1, 2));
}

#[test]
fn image_metrics_feed_layout() {
    let mut scheduler = RevealScheduler::new(&config(AnimationPattern::Center, 3, 3), ViewportSize::new(400.0, 800.0));
    let mut metrics = StaticImageMetrics::new();
    metrics.insert("wide.jpg", 1600, 900);

    scheduler.set_background_image("wide.jpg", &metrics);
    let layout = scheduler.layout();
    assert_eq!(layout.background_image, "wide.jpg");
    assert!((layout.aspect_ratio - 16.0 / 9.0).abs() < 1e-12);
    assert!((layout.container_scale - 800.0 * (16.0 / 9.0) / 400.0).abs() < 1e-9);

    scheduler.set_background_image("unknown.jpg", &metrics);
    assert_eq!(scheduler.aspect_ratio(), DEFAULT_IMAGE_ASPECT_RATIO);
}
