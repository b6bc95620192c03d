// Copyright (c) 2026 rezky_nightky

use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

use crate::{
    cell::Cell,
    frame::Frame,
    glyphs::GlyphSource,
    palette::Palette,
    trail::Trail,
};

pub const MIN_COLS: u16 = 10;
pub const MIN_LINES: u16 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RainError {
    #[error(
        "screen is too small: {cols}x{lines} (need at least {min_cols}x{min_lines})",
        min_cols = MIN_COLS,
        min_lines = MIN_LINES
    )]
    ScreenTooSmall { cols: u16, lines: u16 },
}

/// Owns the falling trails and drives one render tick at a time.
///
/// Every column holds at most one trail. Columns without a trail sit in the
/// free pool; each tick activates one trail on a randomly chosen free
/// column, and exhausted trails hand their column back.
pub struct Rain {
    cols: u16,
    lines: u16,
    palette: Palette,
    trails: Vec<Trail>,
    free_columns: Vec<u16>,
    glyphs: GlyphSource,
    rng: StdRng,
}

impl Rain {
    pub fn new(palette: Palette, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let glyphs = GlyphSource::new(StdRng::seed_from_u64(rng.random()));

        Self {
            cols: 0,
            lines: 0,
            palette,
            trails: Vec::new(),
            free_columns: Vec::new(),
            glyphs,
            rng,
        }
    }

    /// Adopts new screen dimensions: every trail is dropped and every
    /// column becomes free again. Rejects screens below the usable minimum.
    pub fn resize(&mut self, cols: u16, lines: u16) -> Result<(), RainError> {
        if cols < MIN_COLS || lines < MIN_LINES {
            return Err(RainError::ScreenTooSmall { cols, lines });
        }

        self.cols = cols;
        self.lines = lines;
        self.trails.clear();
        self.free_columns = (0..cols).collect();
        Ok(())
    }

    /// One animation step: activate at most one new trail, then slide every
    /// trail down one line, repainting only its head and tail cells. Body
    /// cells keep the color they were painted with, so they are never
    /// touched again.
    pub fn tick(&mut self, frame: &mut Frame) {
        self.activate_one();

        let Self {
            trails,
            glyphs,
            palette,
            ..
        } = self;

        for trail in trails.iter_mut() {
            let column = trail.column();

            // The old head fades into the trail.
            if trail.is_head_visible() {
                frame.set(
                    column,
                    trail.head_row() as u16,
                    Cell {
                        ch: glyphs.pick(),
                        fg: palette.tail,
                        bg: palette.bg,
                        bold: false,
                    },
                );
            }

            // The oldest cell disappears before the window slides.
            if trail.is_tail_visible() {
                frame.set(
                    column,
                    trail.tail_row() as u16,
                    Cell::blank_with_bg(palette.bg),
                );
            }

            trail.advance();

            if trail.is_exhausted() {
                continue;
            }

            if trail.is_head_visible() {
                frame.set(
                    column,
                    trail.head_row() as u16,
                    Cell {
                        ch: glyphs.pick(),
                        fg: palette.head,
                        bg: palette.bg,
                        bold: true,
                    },
                );
            }
        }
    }

    /// Retires exhausted trails and returns their columns to the pool.
    pub fn sweep(&mut self) {
        let mut i = 0;
        while i < self.trails.len() {
            if self.trails[i].is_exhausted() {
                let trail = self.trails.swap_remove(i);
                self.free_columns.push(trail.column());
            } else {
                i += 1;
            }
        }
    }

    /// Exactly one activation per tick, however many columns are free, so
    /// the screen fills at a fixed linear rate.
    fn activate_one(&mut self) {
        if self.free_columns.is_empty() {
            return;
        }

        let idx = self.rng.random_range(0..self.free_columns.len());
        let column = self.free_columns.swap_remove(idx);
        let trail = Trail::new(column, self.cols, self.lines, &mut self.rng)
            .expect("pool columns fit the screen");
        self.trails.push(trail);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crossterm::style::Color;

    use crate::palette::ColorName;

    use super::*;

    const COLS: u16 = 20;
    const LINES: u16 = 12;

    fn make_rain(seed: u64) -> Rain {
        let palette = Palette::new(ColorName::White, ColorName::Green, ColorName::Black);
        let mut rain = Rain::new(palette, Some(seed));
        rain.resize(COLS, LINES).unwrap();
        rain
    }

    fn assert_pool_invariant(rain: &Rain) {
        let active: Vec<u16> = rain.trails.iter().map(|t| t.column()).collect();
        let active_set: HashSet<u16> = active.iter().copied().collect();
        assert_eq!(active_set.len(), active.len(), "duplicate active column");

        let free_set: HashSet<u16> = rain.free_columns.iter().copied().collect();
        assert_eq!(free_set.len(), rain.free_columns.len(), "duplicate free column");

        assert!(active_set.is_disjoint(&free_set));

        let all: HashSet<u16> = active_set.union(&free_set).copied().collect();
        assert_eq!(all, (0..COLS).collect::<HashSet<u16>>());
    }

    #[test]
    fn resize_rejects_screens_below_the_minimum() {
        let palette = Palette::new(ColorName::White, ColorName::Green, ColorName::Black);
        let mut rain = Rain::new(palette, Some(0));

        assert_eq!(
            rain.resize(MIN_COLS - 1, 24),
            Err(RainError::ScreenTooSmall {
                cols: MIN_COLS - 1,
                lines: 24
            })
        );
        assert_eq!(
            rain.resize(80, MIN_LINES - 1),
            Err(RainError::ScreenTooSmall {
                cols: 80,
                lines: MIN_LINES - 1
            })
        );
        assert!(rain.resize(MIN_COLS, MIN_LINES).is_ok());
    }

    #[test]
    fn one_trail_is_activated_per_tick() {
        let mut rain = make_rain(1);
        let mut frame = Frame::new(COLS, LINES, Color::Black);

        for n in 1..=5 {
            rain.tick(&mut frame);
            rain.sweep();
            assert_eq!(rain.trails.len(), n);
        }
    }

    #[test]
    fn columns_move_between_pool_and_trails_without_overlap() {
        let mut rain = make_rain(2);
        let mut frame = Frame::new(COLS, LINES, Color::Black);

        // Long enough for every column to fill and many trails to retire.
        for _ in 0..500 {
            rain.tick(&mut frame);
            assert_pool_invariant(&rain);
            rain.sweep();
            assert_pool_invariant(&rain);
        }
    }

    #[test]
    fn exhausted_trails_free_their_columns() {
        let mut rain = make_rain(3);
        let mut frame = Frame::new(COLS, LINES, Color::Black);

        rain.tick(&mut frame);
        let column = rain.trails[0].column();

        // A trail lives at most lines + length ticks; overshoot generously,
        // but stop activating so it cannot be reborn on the same column.
        rain.free_columns.clear();
        for _ in 0..(LINES + LINES) {
            rain.tick(&mut frame);
        }
        rain.sweep();

        assert!(rain.trails.is_empty());
        assert_eq!(rain.free_columns, vec![column]);
    }

    #[test]
    fn resize_drops_every_trail_and_frees_every_column() {
        let mut rain = make_rain(4);
        let mut frame = Frame::new(COLS, LINES, Color::Black);

        for _ in 0..10 {
            rain.tick(&mut frame);
            rain.sweep();
        }
        assert!(!rain.trails.is_empty());

        rain.resize(COLS + 7, LINES + 3).unwrap();
        assert!(rain.trails.is_empty());
        assert_eq!(
            rain.free_columns,
            (0..COLS + 7).collect::<Vec<u16>>()
        );
    }

    #[test]
    fn lower_right_corner_stays_blank_forever() {
        let mut rain = make_rain(5);
        let mut frame = Frame::new(COLS, LINES, Color::Black);

        for _ in 0..1000 {
            rain.tick(&mut frame);
            rain.sweep();
            let corner = frame.get(COLS - 1, LINES - 1).unwrap();
            assert_eq!(corner.ch, ' ');
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_rain() {
        let mut a = make_rain(6);
        let mut b = make_rain(6);
        let mut frame_a = Frame::new(COLS, LINES, Color::Black);
        let mut frame_b = Frame::new(COLS, LINES, Color::Black);

        for _ in 0..50 {
            a.tick(&mut frame_a);
            b.tick(&mut frame_b);
            a.sweep();
            b.sweep();
        }

        for y in 0..LINES {
            for x in 0..COLS {
                assert_eq!(frame_a.get(x, y), frame_b.get(x, y));
            }
        }
    }

    #[test]
    fn ticking_paints_head_cells_on_screen() {
        let mut rain = make_rain(7);
        let mut frame = Frame::new(COLS, LINES, Color::Black);
        frame.clear_dirty();

        // First tick: one trail, head enters at line 0 in head style.
        rain.tick(&mut frame);
        let column = rain.trails[0].column();
        let head = frame.get(column, 0).unwrap();
        assert_ne!(head.ch, ' ');
        assert_eq!(head.fg, Color::White);
        assert!(head.bold);

        // Next tick the same cell is repainted in trail style.
        rain.free_columns.clear();
        rain.tick(&mut frame);
        let faded = frame.get(column, 0).unwrap();
        assert_eq!(faded.fg, Color::DarkGreen);
        assert!(!faded.bold);
    }
}
