use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_dart::core::constants::{FRAME_POLL_MS, LOG_FILE, SETTINGS_FILE};
use flappy_dart::core::{Difficulty, Settings};
use flappy_dart::input::{handle_input, map_key, InputResult};
use flappy_dart::scores::{
    BackgroundScoreStore, LocalScoreStore, RemoteScoreStore, ScoreStore, UserId,
};
use flappy_dart::ui::{render_flappy, SceneInfo};
use flappy_dart::utils::build_info::version_string;
use flappy_dart::utils::logging;
use flappy_dart::utils::persistence::{save_json, save_path};
use flappy_dart::{GameSession, RunPhase};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

type Store = BackgroundScoreStore<Box<dyn ScoreStore>>;

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    user: Option<String>,
    difficulty: Option<Difficulty>,
    verbose: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Play(Options),
    Version,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--verbose" => options.verbose = true,
            "--user" | "-u" => {
                let id = iter.next().ok_or("--user needs an id")?;
                options.user = Some(id.clone());
            }
            "--difficulty" | "-d" => {
                let name = iter.next().ok_or("--difficulty needs a name")?;
                let difficulty =
                    Difficulty::parse(name).ok_or_else(|| format!("Unknown difficulty: {}", name))?;
                options.difficulty = Some(difficulty);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(Command::Play(options))
}

fn print_help() {
    println!("Flappy Dart - keep the bird in the air\n");
    println!("Usage: flappy-dart [options]\n");
    println!("Options:");
    println!("  -u, --user <id>          Report scores for this user id");
    println!("  -d, --difficulty <name>  novice, apprentice, journeyman or master");
    println!("      --verbose            Debug logging to ~/.flappy-dart/{}", LOG_FILE);
    println!("  -v, --version            Show version information");
    println!("  -h, --help               Show this help message");
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Command::Play(options)) => options,
        Ok(Command::Version) => {
            println!("{}", version_string());
            return Ok(());
        }
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flappy-dart --help' for usage.");
            std::process::exit(1);
        }
    };

    logging::init(options.verbose, &save_path(LOG_FILE)?);

    let settings_path = save_path(SETTINGS_FILE)?;
    let mut settings = Settings::load_or_default(&settings_path);

    // Remember the generated guest id so best scores survive restarts.
    if settings.user_id.is_none() && options.user.is_none() {
        settings.user_id = Some(UserId::guest().to_string());
        if let Err(e) = save_json(&settings_path, &settings) {
            log::warn!("could not save settings: {}", e);
        }
    }

    if let Some(difficulty) = options.difficulty {
        settings.difficulty = difficulty;
        settings.tuning = None;
    }
    let config = settings.game_config().unwrap_or_else(|e| {
        log::warn!("{}; falling back to {} preset", e, settings.difficulty.name());
        settings.difficulty.config()
    });

    let user = options
        .user
        .or_else(|| settings.user_id.clone())
        .map(UserId::new)
        .unwrap_or_else(UserId::guest);

    let inner: Box<dyn ScoreStore> = match settings.remote.clone() {
        Some(remote) => {
            log::info!("reporting scores to {}", remote.base_url);
            Box::new(RemoteScoreStore::new(remote))
        }
        None => Box::new(LocalScoreStore::new()?),
    };
    let store: Arc<Store> = Arc::new(BackgroundScoreStore::new(inner));

    let best = store.best_score(&user).unwrap_or_else(|e| {
        log::warn!("could not read best score: {}", e);
        None
    });

    let session = GameSession::new(config, store.clone(), user);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, session, settings.difficulty, best);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    store.flush();
    result
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut session: GameSession,
    difficulty: Difficulty,
    mut best: Option<u32>,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            let info = SceneInfo {
                difficulty: difficulty.name(),
                best_score: best,
            };
            render_flappy(frame, area, &session, &info);
        })?;

        if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                let finished = match session.phase() {
                    RunPhase::Over { score } => Some(score),
                    _ => None,
                };

                if handle_input(&mut session, map_key(key)) == InputResult::Quit {
                    break;
                }

                // The overlay compares against the best from before the run,
                // so only fold the last score in once a new run begins.
                if let Some(score) = finished {
                    if !session.phase().is_over() {
                        best = Some(best.map_or(score, |b| b.max(score)));
                    }
                }
            }
        }

        // Advance by whole milliseconds and carry the remainder.
        let dt_ms = last_frame.elapsed().as_millis() as u64;
        last_frame += Duration::from_millis(dt_ms);
        session.advance(dt_ms, &mut rng);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_plays() {
        assert_eq!(parse_args(&[]), Ok(Command::Play(Options::default())));
    }

    #[test]
    fn test_user_and_difficulty() {
        let parsed = parse_args(&args(&["--user", "rosita", "-d", "master", "--verbose"]));
        assert_eq!(
            parsed,
            Ok(Command::Play(Options {
                user: Some("rosita".to_string()),
                difficulty: Some(Difficulty::Master),
                verbose: true,
            }))
        );
    }

    #[test]
    fn test_version_and_help() {
        assert_eq!(parse_args(&args(&["-v"])), Ok(Command::Version));
        assert_eq!(parse_args(&args(&["--help"])), Ok(Command::Help));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse_args(&args(&["--user"])).is_err());
        assert!(parse_args(&args(&["-d", "legend"])).is_err());
        assert!(parse_args(&args(&["update"])).is_err());
    }
}
