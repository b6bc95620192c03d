// Copyright (c) 2026 rezky_nightky

use clap::Parser;

use crate::palette::{ColorName, COLOR_NAMES};

fn parse_duration(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| "invalid duration".to_string())?;
    if !v.is_finite() {
        return Err("duration must be a finite number".to_string());
    }
    if !(0.1..=86400.0).contains(&v) {
        return Err(format!("duration {} out of range (min 0.1 max 86400)", v));
    }
    Ok(v)
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphrain", version, about = "Falling glyph rain for the terminal")]
pub struct Args {
    #[arg(
        short = 'c',
        short_alias = 'C',
        value_name = "COLOR",
        default_value = "green",
        help_heading = "APPEARANCE",
        help = "Trail color (see --list-colors)"
    )]
    pub color: ColorName,

    #[arg(
        short = 'H',
        value_name = "COLOR",
        default_value = "white",
        help_heading = "APPEARANCE",
        help = "Head character color"
    )]
    pub head_color: ColorName,

    #[arg(
        short = 'b',
        short_alias = 'B',
        value_name = "COLOR",
        default_value = "black",
        help_heading = "APPEARANCE",
        help = "Background color"
    )]
    pub background: ColorName,

    #[arg(
        long = "duration",
        value_name = "SECONDS",
        value_parser = parse_duration,
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "seed",
        value_name = "N",
        help_heading = "GENERAL",
        help = "Seed the random generator for a reproducible rain"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List valid color names and exit"
    )]
    pub list_colors: bool,
}

pub fn print_list_colors() {
    println!("VALID COLORS:");
    for name in COLOR_NAMES {
        println!("  {}", name);
    }
}
