// Copyright (c) 2026 rezky_nightky

use std::str::FromStr;

use crossterm::style::Color;

/// The eight color names every terminal provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorName {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

pub const COLOR_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

impl FromStr for ColorName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(ColorName::Black),
            "red" => Ok(ColorName::Red),
            "green" => Ok(ColorName::Green),
            "yellow" => Ok(ColorName::Yellow),
            "blue" => Ok(ColorName::Blue),
            "magenta" => Ok(ColorName::Magenta),
            "cyan" => Ok(ColorName::Cyan),
            "white" => Ok(ColorName::White),
            _ => Err(format!(
                "'{}' is not a valid color name (see --list-colors)",
                s
            )),
        }
    }
}

impl ColorName {
    pub fn to_color(self) -> Color {
        match self {
            ColorName::Black => Color::Black,
            ColorName::Red => Color::DarkRed,
            ColorName::Green => Color::DarkGreen,
            ColorName::Yellow => Color::DarkYellow,
            ColorName::Blue => Color::DarkBlue,
            ColorName::Magenta => Color::DarkMagenta,
            ColorName::Cyan => Color::DarkCyan,
            ColorName::White => Color::White,
        }
    }
}

/// Resolved styling for one run: bright head, dimmer trail, background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub head: Color,
    pub tail: Color,
    pub bg: Color,
}

impl Palette {
    pub fn new(head: ColorName, tail: ColorName, bg: ColorName) -> Self {
        Self {
            head: head.to_color(),
            tail: tail.to_color(),
            bg: bg.to_color(),
        }
    }
}
