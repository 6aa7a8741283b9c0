use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Instant;
use turmac_roll::assets::Assets;
use turmac_roll::clock::FrameClock;
use turmac_roll::constants::CONFIG_FILE;
use turmac_roll::input::InputState;
use turmac_roll::utils::version_string;
use turmac_roll::{logging, ui, GameConfig, HighScoreStore, Session};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Turmac Roll - Terminal Side-Scrolling Runner\n");
                println!("Usage: turmac-roll [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message\n");
                println!("Controls:");
                println!("  Left/Right or A/D  Move");
                println!("  Space/Up/W         Jump (restart after game over)");
                println!("  Q/Esc              Quit");
                println!("\nSettings are read from {} if present.", CONFIG_FILE);
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'turmac-roll --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let config = GameConfig::load(Path::new(CONFIG_FILE));
    if let Err(e) = logging::init(&config.log_path) {
        eprintln!("Warning: logging disabled ({})", e);
    }
    log::info!("Starting {}", version_string());

    let store = HighScoreStore::new(config.high_score_path.clone());
    let high_score = store.load();
    let assets = Assets::load(&config.asset_dir);
    let session = Session::new(config, store, high_score, assets.player.frame_count());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, session, &assets, release_events);

    // Restore terminal even if the loop failed
    if release_events {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Exiting after error: {}", e);
    }
    log::info!("Goodbye");
    result
}

/// Frame loop: draw, collect input until the frame is due, update.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut session: Session,
    assets: &Assets,
    release_events: bool,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut input = InputState::new(release_events);
    let mut clock = FrameClock::new(session.config.target_fps, Instant::now());

    while !session.is_terminated() {
        terminal.draw(|frame| ui::draw(frame, &session, assets))?;

        // Drain every pending event before the next frame is due
        loop {
            let remaining = clock.remaining(Instant::now());
            if !event::poll(remaining)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                input.handle_key(key, Instant::now());
            }
        }

        let now = Instant::now();
        let frame_input = input.take_frame(now);
        session.update(&frame_input, &mut rng);
        session.advance_animation(clock.tick(now));
    }

    Ok(())
}
