// Copyright (c) 2026 rezky_nightky

mod cell;
mod config;
mod frame;
mod glyphs;
mod palette;
mod rain;
mod terminal;
mod trail;

use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use thiserror::Error;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{print_list_colors, Args};
use crate::frame::Frame;
use crate::palette::Palette;
use crate::rain::{Rain, RainError};
use crate::terminal::{restore_terminal_best_effort, Terminal};

/// One row of descent per tick.
const TICK: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Running,
    Frozen,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Rain(#[from] RainError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn main() {
    let args = Args::parse();

    if args.list_colors {
        print_list_colors();
        return;
    }

    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    // An interrupt is a normal way to leave: restore the screen, say nothing.
    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if signals.forever().next().is_some() {
                    restore_terminal_best_effort();
                    std::process::exit(0);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(0);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let palette = Palette::new(args.head_color, args.color, args.background);

    if let Err(err) = run(&args, palette) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args, palette: Palette) -> Result<(), AppError> {
    let mut term = Terminal::new()?;
    let (cols, lines) = term.size()?;

    let mut rain = Rain::new(palette, args.seed);
    rain.resize(cols, lines)?;
    let mut frame = Frame::new(cols, lines, palette.bg);

    let end_time = args
        .duration
        .map(|secs| Instant::now() + Duration::from_secs_f64(secs));

    let mut state = RunState::Running;
    let mut next_tick = Instant::now();

    'rain: loop {
        let mut pending_resize: Option<(u16, u16)> = None;

        // Wait out the tick, handling input as it arrives. While frozen the
        // rain stands still and this blocks on the next keypress instead.
        loop {
            if end_time.is_some_and(|end| Instant::now() >= end) {
                break 'rain;
            }

            let event = match state {
                RunState::Frozen => Some(Terminal::read_event()?),
                RunState::Running => {
                    let now = Instant::now();
                    if now >= next_tick {
                        break;
                    }
                    let mut timeout = next_tick - now;
                    if let Some(end) = end_time {
                        timeout = timeout.min(end.saturating_duration_since(now));
                    }
                    if Terminal::poll_event(timeout)? {
                        Some(Terminal::read_event()?)
                    } else {
                        None
                    }
                }
            };

            match event {
                Some(Event::Resize(new_cols, new_lines)) => {
                    pending_resize = Some((new_cols, new_lines));
                }
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => break 'rain,
                    KeyCode::Char('f') | KeyCode::Char('F') => {
                        state = match state {
                            RunState::Running => RunState::Frozen,
                            RunState::Frozen => {
                                next_tick = Instant::now();
                                RunState::Running
                            }
                        };
                    }
                    _ => {}
                },
                _ => {}
            }

            if pending_resize.is_some() && state == RunState::Running {
                break;
            }
        }

        // A size change invalidates every trail; restart the tick on the
        // fresh screen. Too-small screens are fatal, not retried.
        if let Some((new_cols, new_lines)) = pending_resize {
            rain.resize(new_cols, new_lines)?;
            frame = Frame::new(new_cols, new_lines, palette.bg);
            next_tick = Instant::now();
            continue;
        }

        rain.tick(&mut frame);
        term.draw(&mut frame)?;
        rain.sweep();

        next_tick += TICK;
        let now = Instant::now();
        if now > next_tick {
            next_tick = now;
        }
    }

    Ok(())
}
