//! Line-driven terminal front end.
//!
//! This module is the thin integration layer between the Unimatch library and
//! a terminal: it parses command-line flags, reads one command per line from
//! stdin, translates commands to library events and executes the resulting
//! actions.
//!
//! # Flags
//!
//! - `--config=<path>`: TOML configuration file
//! - `--cols=<n>`: render width (default 80)
//! - `--<config key>=<value>`: overrides a configuration value
//!   (`data_source`, `palette`, `palette_file`, `trace_level`, `data_dir`,
//!   `swipe_threshold`, `undo_cooldown_ms`, `whatsapp_phone`,
//!   `email_recipient`, `site_url`)
//! - any other `--<question>=<a,b>`: a quiz answer (`region`, `area`,
//!   `citySize`, `userName`, `userSurname`, ...)
//!
//! # Commands
//!
//! - `like` / `nope`: press a control button
//! - `drag <n>`: drag the top card to offset `n`
//! - `release`: end the drag
//! - `undo`: restore the last decision
//! - `tick <ms>`: advance animations
//! - `share whatsapp|email`: print a share link
//! - `restart`: back to the quiz, then `start` submits the flags again
//! - `quit`
//!
//! After each command pending animations run to completion in 16 ms frames
//! and the screen is drawn once.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use unimatch::domain::{QuizAnswers, Verdict};
use unimatch::export::ShareTarget;
use unimatch::{handle_event, Action, AppState, Config, Event};

/// Frame length used to settle animations between commands.
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames per command, in case an animation never settles.
const MAX_FRAMES: usize = 600;

const DEFAULT_COLS: usize = 80;

const CONFIG_KEYS: [&str; 11] = [
    "data_source",
    "palette",
    "palette_name",
    "palette_file",
    "trace_level",
    "data_dir",
    "swipe_threshold",
    "undo_cooldown_ms",
    "whatsapp_phone",
    "email_recipient",
    "site_url",
];

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    config_file: Option<String>,
    cols: Option<usize>,
    overrides: BTreeMap<String, String>,
    answers: QuizAnswers,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            let Some((key, value)) = arg.strip_prefix("--").and_then(|a| a.split_once('=')) else {
                tracing::debug!(arg = %arg, "ignoring argument");
                continue;
            };
            match key {
                "config" => parsed.config_file = Some(value.to_string()),
                "cols" => parsed.cols = value.parse().ok(),
                "data" => {
                    parsed.overrides.insert("data_source".to_string(), value.to_string());
                }
                key if CONFIG_KEYS.contains(&key) => {
                    parsed.overrides.insert(key.to_string(), value.to_string());
                }
                question => {
                    for option in value.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                        parsed.answers.push(question, option);
                    }
                }
            }
        }
        parsed
    }
}

/// Owns the session and executes actions against the terminal.
struct Driver {
    app: AppState,
    config: Config,
    answers: QuizAnswers,
    cols: usize,
    /// Whether a drag is in progress; animations wait until release.
    dragging: bool,
    running: bool,
}

impl Driver {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::FetchCandidates { criteria } => {
                tracing::debug!(criteria = ?criteria, "fetching candidates");
                let event = match self.config.data_source.as_deref() {
                    Some(source) => {
                        let path = unimatch::infrastructure::expand_tilde(source);
                        let repository = unimatch::repository::for_path(Path::new(&path));
                        match repository.fetch_candidates() {
                            Ok(candidates) => Event::CandidatesLoaded { candidates },
                            Err(e) => Event::CandidatesUnavailable { error: e.to_string() },
                        }
                    }
                    None => Event::CandidatesUnavailable {
                        error: "no data source configured".to_string(),
                    },
                };
                self.dispatch(&event);
            }
            Action::OpenLink { uri } => {
                tracing::debug!(uri = %uri, "opening link");
                println!("{uri}");
            }
            Action::Quit => {
                tracing::debug!("quitting");
                self.running = false;
            }
        }
    }

    fn active_card(&self) -> Option<unimatch::domain::CandidateId> {
        self.app.active.as_ref().map(|controller| controller.card_id().clone())
    }

    /// Maps one input line to events. Unknown commands yield nothing.
    fn map_command(&mut self, line: &str) -> Vec<Event> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();

        match (command, argument) {
            ("like", _) => vec![Event::Choose(Verdict::Like)],
            ("nope", _) => vec![Event::Choose(Verdict::Reject)],
            ("drag", Some(offset)) => {
                let delta = offset.parse::<f64>().ok().filter(|delta| delta.is_finite());
                let (Some(delta), Some(card_id)) = (delta, self.active_card()) else {
                    return Vec::new();
                };
                let mut events = Vec::new();
                if !self.dragging {
                    self.dragging = true;
                    events.push(Event::DragStart { card_id: card_id.clone() });
                }
                events.push(Event::DragMove { card_id, delta });
                events
            }
            ("release", _) => {
                self.dragging = false;
                self.active_card()
                    .map(|card_id| vec![Event::DragEnd { card_id }])
                    .unwrap_or_default()
            }
            ("undo", _) => vec![Event::Undo],
            ("tick", Some(ms)) => ms
                .parse::<u64>()
                .map(|ms| vec![Event::Tick(Duration::from_millis(ms))])
                .unwrap_or_default(),
            ("share", Some(target)) => ShareTarget::from_name(target)
                .map(|target| vec![Event::Share(target)])
                .unwrap_or_default(),
            ("restart", _) => {
                self.dragging = false;
                vec![Event::Restart]
            }
            ("start", _) => vec![Event::QuizSubmitted {
                answers: self.answers.clone(),
            }],
            ("quit" | "q", _) => vec![Event::Quit],
            _ => Vec::new(),
        }
    }

    /// Ticks animations until they settle.
    fn settle(&mut self) {
        if self.dragging {
            return;
        }
        for _ in 0..MAX_FRAMES {
            if !self.app.is_animating() {
                return;
            }
            self.dispatch(&Event::Tick(FRAME));
        }
        tracing::debug!("animations still running after frame budget");
    }

    fn render(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if stdout.is_terminal() {
            write!(out, "\u{001b}[2J\u{001b}[H")?;
        }
        unimatch::ui::render(&self.app, &mut out, self.cols)?;
        out.flush()
    }
}

fn run() -> unimatch::Result<()> {
    let args = Args::parse(std::env::args().skip(1));
    let config = match &args.config_file {
        Some(path) => Config::from_toml_file(unimatch::infrastructure::expand_tilde(path))?,
        None => Config::default(),
    }
    .merged_with(&args.overrides);

    unimatch::observability::init_tracing(&config);
    let span = tracing::debug_span!("session");
    let _guard = span.entered();
    tracing::debug!(data_source = ?config.data_source, "parsed configuration");

    let mut driver = Driver {
        app: unimatch::initialize(&config),
        config,
        answers: args.answers,
        cols: args.cols.unwrap_or(DEFAULT_COLS),
        dragging: false,
        running: true,
    };

    let start = Event::QuizSubmitted {
        answers: driver.answers.clone(),
    };
    driver.dispatch(&start);
    driver.render()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        for event in driver.map_command(&line) {
            driver.dispatch(&event);
        }
        if !driver.running {
            break;
        }
        driver.settle();
        driver.render()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("unimatch: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_split_into_config_and_answers() {
        let args = Args::parse(
            [
                "--config=~/unimatch.toml",
                "--data=unis.csv",
                "--palette=sunset",
                "--area=stem,health",
                "--userName=Ana",
                "stray",
            ]
            .map(String::from),
        );
        assert_eq!(args.config_file.as_deref(), Some("~/unimatch.toml"));
        assert_eq!(args.overrides.get("data_source").map(String::as_str), Some("unis.csv"));
        assert_eq!(args.overrides.get("palette").map(String::as_str), Some("sunset"));
        let topics: Vec<&str> = args.answers.get("area").map(|a| a.ids().collect()).unwrap_or_default();
        assert_eq!(topics, vec!["stem", "health"]);
    }

    #[test]
    fn non_finite_drag_offsets_are_dropped() {
        let mut app = AppState::new(unimatch::SessionSettings::default());
        app.submit(&QuizAnswers::default());
        app.load_candidates(vec![unimatch::domain::Candidate::new(
            "0",
            "UniBo",
            "Bologna",
            unimatch::domain::Region::North,
        )]);
        let mut driver = Driver {
            app,
            config: Config::default(),
            answers: QuizAnswers::default(),
            cols: DEFAULT_COLS,
            dragging: false,
            running: true,
        };

        for input in ["drag nan", "drag inf", "drag -inf"] {
            assert!(driver.map_command(input).is_empty(), "{input}");
        }
        assert!(!driver.dragging);
        assert_eq!(driver.map_command("drag 40").len(), 2);
    }
}
