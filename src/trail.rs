// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    Rng,
};
use thiserror::Error;

/// Shortest trail the effect will draw.
pub const MIN_LENGTH: u16 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrailError {
    #[error("column {column} is beyond the right edge of a {cols}-column screen")]
    ColumnOutOfRange { column: u16, cols: u16 },
    #[error("screen height {0} cannot host a trail (need at least {min} lines)", min = 2 * MIN_LENGTH)]
    ScreenTooShort(u16),
}

/// One falling rain trail: a moving window of `length` rows in a fixed
/// column, tracked by its head offset alone.
///
/// ```text
/// line 0 ┬ . . . . .
///        │ . t . . .   tail_row  = head_row - (length - 1)
///        │ . | . . .
///        │ . H . . .   head_row  = head_position
/// line n ┴ . . . . .
/// ```
///
/// The head starts one row above the screen and only ever moves down.
/// Visibility of head and tail are independent: at birth only the head is
/// on screen, on the way out only the tail is.
#[derive(Debug, Clone)]
pub struct Trail {
    column: u16,
    lines: u16,
    length: u16,
    head_position: i32,
}

impl Trail {
    /// Binds a new trail to `column` on a `cols` x `lines` screen, with a
    /// length drawn uniformly from `[MIN_LENGTH, lines - MIN_LENGTH]`.
    pub fn new<R: Rng + ?Sized>(
        column: u16,
        cols: u16,
        lines: u16,
        rng: &mut R,
    ) -> Result<Self, TrailError> {
        if column > cols {
            return Err(TrailError::ColumnOutOfRange { column, cols });
        }
        if lines < 2 * MIN_LENGTH {
            return Err(TrailError::ScreenTooShort(lines));
        }

        let dist = Uniform::new_inclusive(MIN_LENGTH, lines - MIN_LENGTH).expect("valid range");

        Ok(Self {
            column,
            lines,
            length: dist.sample(rng),
            head_position: -1,
        })
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    #[allow(dead_code)]
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Moves the whole window down one line. The only mutator.
    pub fn advance(&mut self) {
        self.head_position += 1;
    }

    pub fn head_row(&self) -> i32 {
        self.head_position
    }

    pub fn tail_row(&self) -> i32 {
        self.head_position - (self.length as i32 - 1)
    }

    /// First body row, just below the head.
    #[allow(dead_code)]
    pub fn body_start_row(&self) -> i32 {
        self.head_row() - 1
    }

    /// Last body row, just above the tail.
    #[allow(dead_code)]
    pub fn body_end_row(&self) -> i32 {
        self.tail_row() + 1
    }

    pub fn is_head_visible(&self) -> bool {
        (0..self.lines as i32).contains(&self.head_row())
    }

    pub fn is_tail_visible(&self) -> bool {
        (0..self.lines as i32).contains(&self.tail_row())
    }

    #[allow(dead_code)]
    pub fn is_visible(&self) -> bool {
        self.is_head_visible() || self.is_tail_visible()
    }

    /// `true` once the tail has moved past the bottom line. `advance` never
    /// moves backwards, so this is permanent.
    pub fn is_exhausted(&self) -> bool {
        self.tail_row() >= self.lines as i32
    }
}
