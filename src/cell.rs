// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Cell {
    pub fn blank_with_bg(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: bg,
            bg,
            bold: false,
        }
    }
}
