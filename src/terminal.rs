// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;

/// Raw-mode alternate-screen terminal. Restores the caller's screen on
/// drop; `restore_terminal_best_effort` covers panics and signals.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self { stdout: out })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Writes the frame out: everything after a clear or resize, otherwise
    /// only the cells that changed. The bottom-right cell is never emitted.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let mut cur_fg: Option<Color> = None;
        let mut cur_bg: Option<Color> = None;
        let mut cur_bold = false;

        if frame.is_dirty_all() {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;

            for y in 0..frame.lines {
                self.stdout.queue(cursor::MoveTo(0, y))?;
                let row_cols = if y + 1 == frame.lines {
                    frame.cols.saturating_sub(1)
                } else {
                    frame.cols
                };
                for x in 0..row_cols {
                    let idx = y as usize * frame.cols as usize + x as usize;
                    let cell = frame.cell_at_index(idx);
                    apply_style(&mut self.stdout, &mut cur_fg, &mut cur_bg, &mut cur_bold, &cell)?;
                    self.stdout.queue(Print(cell.ch))?;
                }
            }
        } else {
            let mut dirty: Vec<usize> = frame.dirty_indices().to_vec();
            dirty.sort_unstable();

            for idx in dirty {
                let x = (idx % frame.cols as usize) as u16;
                let y = (idx / frame.cols as usize) as u16;
                let cell = frame.cell_at_index(idx);
                self.stdout.queue(cursor::MoveTo(x, y))?;
                apply_style(&mut self.stdout, &mut cur_fg, &mut cur_bg, &mut cur_bold, &cell)?;
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

fn apply_style(
    out: &mut Stdout,
    cur_fg: &mut Option<Color>,
    cur_bg: &mut Option<Color>,
    cur_bold: &mut bool,
    cell: &Cell,
) -> Result<()> {
    if *cur_fg != Some(cell.fg) {
        out.queue(SetForegroundColor(cell.fg))?;
        *cur_fg = Some(cell.fg);
    }
    if *cur_bg != Some(cell.bg) {
        out.queue(SetBackgroundColor(cell.bg))?;
        *cur_bg = Some(cell.bg);
    }
    if *cur_bold != cell.bold {
        out.queue(SetAttribute(if cell.bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        }))?;
        *cur_bold = cell.bold;
    }
    Ok(())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
