use crossterm::{
    cursor, execute,
    terminal::{self, Clear, ClearType},
};
use e_reveal::display::{display_delays, display_opacity};
use e_reveal::{
    RevealConfig, RevealEvent, RevealScheduler, SharedViewport, SimulatedHost, Stage,
    StaticImageMetrics, ViewportProvider, ViewportSize,
};
use log::{debug, info};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const BANNER: &str = r#"
  ███████╗          ██████╗  ███████╗ ██╗   ██╗ ███████╗  █████╗  ██╗
  ██╔════╝          ██╔══██╗ ██╔════╝ ██║   ██║ ██╔════╝ ██╔══██╗ ██║
  █████╗            ██████╔╝ █████╗   ██║   ██║ █████╗   ███████║ ██║
  ██╔══╝            ██╔══██╗ ██╔══╝   ╚██╗ ██╔╝ ██╔══╝   ██╔══██║ ██║
  ███████╗ ██████╗  ██║  ██║ ███████╗  ╚████╔╝  ███████╗ ██║  ██║ ███████╗
  ╚══════╝ ╚═════╝  ╚═╝  ╚═╝ ╚══════╝   ╚═══╝   ╚══════╝ ╚═╝  ╚═╝ ╚══════╝
"#;

const FRAMES_PER_SECOND: u64 = 30;
/// Seconds to hold a settled stage on screen before moving on
const HOLD_SECS: f64 = 1.0;
/// Rough pixel size of one terminal character cell
const CHAR_PIXELS: (f64, f64) = (8.0, 16.0);

fn load_config(path: Option<&String>) -> Result<RevealConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            info!("📄 Loading configuration from {}", path);
            RevealConfig::load_from_file(path)?
        }
        None => RevealConfig::from_env(),
    };
    config.validate()?;
    Ok(config)
}

fn terminal_viewport() -> ViewportSize {
    match terminal::size() {
        Ok((cols, rows)) => ViewportSize::new(cols as f64 * CHAR_PIXELS.0, rows as f64 * CHAR_PIXELS.1),
        Err(_) => ViewportSize::new(1280.0, 720.0),
    }
}

/// Print the delay grid of every stage without animating
fn show_delays(config: &RevealConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = RevealScheduler::new(config, terminal_viewport());
    let mut stdout = io::stdout();

    for stage in [Stage::Initial, Stage::Reveal, Stage::Done] {
        scheduler.request_stage(stage);
        display_delays(&mut stdout, scheduler.playback(), None)?;
        println!();
    }
    Ok(())
}

/// Play initial -> reveal -> done in real time against a simulated host
fn play(config: &RevealConfig) -> Result<(), Box<dyn std::error::Error>> {
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })?;
    }

    let viewport = SharedViewport::new(terminal_viewport());
    let scheduler = Rc::new(RefCell::new(RevealScheduler::new(config, viewport.current_size())));

    let mut metrics = StaticImageMetrics::new();
    if !config.background_image.is_empty() {
        // The demo has no image loader; assume a landscape photo
        metrics.insert(&config.background_image, 1920, 1080);
    }
    scheduler
        .borrow_mut()
        .set_background_image(&config.background_image, &metrics);

    let completed = Rc::new(RefCell::new(false));
    {
        let completed = completed.clone();
        let mut scheduler = scheduler.borrow_mut();
        scheduler.on_animation_complete(move || *completed.borrow_mut() = true);
        scheduler.add_event_listener(|event| {
            if let RevealEvent::StageChanged { from, to } = event {
                debug!("Stage {} -> {}", from, to);
            }
        });
    }

    // Resizing the terminal regrids when the grid follows the viewport
    let resize_target = scheduler.clone();
    let _resize = viewport.on_change(Rc::new(move |size: ViewportSize| {
        resize_target.borrow_mut().set_viewport(size);
    }));

    let frame = Duration::from_millis(1000 / FRAMES_PER_SECOND);
    let mut stdout = io::stdout();
    let mut generation = 0;
    let mut host = SimulatedHost::play(scheduler.borrow().playback());
    let mut started = Instant::now();

    while running.load(Ordering::SeqCst) {
        let frame_start = Instant::now();
        viewport.set_size(terminal_viewport());

        let mut scheduler = scheduler.borrow_mut();
        if scheduler.generation() != generation {
            generation = scheduler.generation();
            host = SimulatedHost::play(scheduler.playback());
            started = Instant::now();
        }

        let elapsed = started.elapsed().as_secs_f64();
        host.deliver_until(&mut scheduler, elapsed);

        execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        display_opacity(&mut stdout, scheduler.playback(), elapsed)?;
        let layout = scheduler.layout();
        if layout.show_background {
            print!("🖼  background shown directly\r\n");
        }
        stdout.flush()?;

        let settled = host.is_finished() && elapsed >= scheduler.playback().total_duration() + HOLD_SECS;
        match scheduler.stage() {
            Stage::Initial if settled => {
                scheduler.request_stage(Stage::Reveal);
            }
            Stage::Done if *completed.borrow() && elapsed >= HOLD_SECS => break,
            _ => {}
        }
        drop(scheduler);

        let spent = frame_start.elapsed();
        if spent < frame {
            thread::sleep(frame - spent);
        }
    }

    if *completed.borrow() {
        println!("✅ Reveal complete");
    } else {
        println!("\n🛑 Stopped before the reveal finished");
    }
    Ok(())
}

fn show_help() {
    println!("{}", BANNER);
    println!("Usage: e_reveal [command] [config.json]");
    println!();
    println!("Commands:");
    println!("  play [config]      Animate initial -> reveal -> done in the terminal (default)");
    println!("  delays [config]    Print the delay grid of every stage");
    println!("  init <path>        Write the default configuration to <path>");
    println!("  help               Show this help message");
    println!();
    println!("Without a config file, options come from the environment:");
    println!("  REVEAL_ROWS, REVEAL_COLS, REVEAL_PATTERN (center|topLeft|random),");
    println!("  REVEAL_DELAY, REVEAL_DURATION, REVEAL_REMAIN_CARDS, REVEAL_SEED, REVEAL_IMAGE");
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("-h") | Some("--help") => {
            show_help();
            Ok(())
        }
        Some("delays") => show_delays(&load_config(args.get(2))?),
        Some("init") => match args.get(2) {
            Some(path) => {
                RevealConfig::default().save_to_file(path)?;
                println!("💾 Wrote default configuration to {}", path);
                Ok(())
            }
            None => {
                println!("❌ init needs a path");
                Ok(())
            }
        },
        Some("play") => play(&load_config(args.get(2))?),
        None => play(&load_config(None)?),
        Some(unknown) => {
            println!("❌ Unknown command: {}", unknown);
            println!("Run 'e_reveal help' for usage information");
            Ok(())
        }
    }
}
