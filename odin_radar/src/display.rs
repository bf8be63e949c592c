/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{fmt, io::Write};
use serde::{Serialize,Deserialize};
use tracing::debug;
use crate::errors::Result;

/// RGB565 color as used by GC9A01 and similar SPI displays
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const BLUE: Color = Color(0x001F);
    pub const RED: Color = Color(0xF800);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const WHITE: Color = Color(0xFFFF);
}

/// the drawing primitives we need from a physical display
pub trait DisplaySink {
    fn fill (&mut self, color: Color)->Result<()>;
    fn fill_rect (&mut self, x: i32, y: i32, w: u32, h: u32, color: Color)->Result<()>;
    fn text (&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color)->Result<()>;

    /// called after a complete frame has been drawn
    fn flush (&mut self)->Result<()> { Ok(()) }
}

/// a single draw call. Frames are sequences of these so that they can be compared and replayed
#[derive(Debug,Clone,PartialEq)]
pub enum DrawCmd {
    Fill { color: Color },
    FillRect { x: i32, y: i32, w: u32, h: u32, color: Color },
    Text { x: i32, y: i32, text: String, fg: Color, bg: Color },
}

impl DrawCmd {
    pub fn draw_to<D> (&self, sink: &mut D)->Result<()> where D: DisplaySink + ?Sized {
        match self {
            DrawCmd::Fill { color } => sink.fill( *color),
            DrawCmd::FillRect { x, y, w, h, color } => sink.fill_rect( *x, *y, *w, *h, *color),
            DrawCmd::Text { x, y, text, fg, bg } => sink.text( *x, *y, text.as_str(), *fg, *bg),
        }
    }
}

impl fmt::Display for DrawCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCmd::Fill { color } => write!( f, "fill({:04x})", color.0),
            DrawCmd::FillRect { x, y, w, h, color } => write!( f, "fill_rect({x},{y},{w},{h},{:04x})", color.0),
            DrawCmd::Text { x, y, text, .. } => write!( f, "text({x},{y},\"{text}\")"),
        }
    }
}

/// a sink that keeps the draw calls of the current frame. A full screen fill starts a new frame,
/// completed frames are logged on flush
#[derive(Debug,Default)]
pub struct RecordingDisplay {
    cmds: Vec<DrawCmd>,
    n_frames: usize,
}

impl RecordingDisplay {
    pub fn new ()->Self { RecordingDisplay::default() }

    pub fn commands (&self)->&[DrawCmd] { self.cmds.as_slice() }
    pub fn n_frames (&self)->usize { self.n_frames }

    /// one line rendition of the current frame
    pub fn frame_summary (&self)->String {
        let cmds: Vec<String> = self.cmds.iter().map( |cmd| cmd.to_string()).collect();
        format!("frame {}: [{}]", self.n_frames, cmds.join(", "))
    }
}

impl DisplaySink for RecordingDisplay {
    fn fill (&mut self, color: Color)->Result<()> {
        self.cmds.clear();
        self.n_frames += 1;
        self.cmds.push( DrawCmd::Fill{color});
        Ok(())
    }

    fn fill_rect (&mut self, x: i32, y: i32, w: u32, h: u32, color: Color)->Result<()> {
        self.cmds.push( DrawCmd::FillRect{x,y,w,h,color});
        Ok(())
    }

    fn text (&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color)->Result<()> {
        self.cmds.push( DrawCmd::Text{x,y,text: text.to_string(),fg,bg});
        Ok(())
    }

    fn flush (&mut self)->Result<()> {
        debug!("{}", self.frame_summary());
        Ok(())
    }
}

/// font cell size in pixels (8x8 bitmap font)
pub const CELL_SIZE: u32 = 8;

/// stand-in for a pixel display that rasterizes draw calls into a character grid with one cell
/// per font glyph, which is written to `out` on each flush. Everything outside the grid is clipped
pub struct TextDisplay<W: Write> {
    cols: usize,
    rows: usize,
    grid: Vec<char>,
    out: W,
}

impl<W: Write> TextDisplay<W> {
    pub fn new (width: u32, height: u32, out: W)->Self {
        let cols = (width / CELL_SIZE).max(1) as usize;
        let rows = (height / CELL_SIZE).max(1) as usize;
        TextDisplay { cols, rows, grid: vec![' '; cols*rows], out }
    }

    pub fn into_inner (self)->W { self.out }

    pub fn row (&self, row: usize)->String {
        self.grid[row*self.cols..(row+1)*self.cols].iter().collect()
    }

    fn cell (&self, x: i32, y: i32)->Option<usize> {
        if x < 0 || y < 0 { return None }
        let col = x as usize / CELL_SIZE as usize;
        let row = y as usize / CELL_SIZE as usize;
        if col < self.cols && row < self.rows { Some(row * self.cols + col) } else { None }
    }

    fn color_char (color: Color)->char {
        match color {
            Color::BLACK => ' ',
            Color::BLUE => '+',
            Color::YELLOW => 'o',
            Color::RED => '@',
            _ => '#'
        }
    }
}

impl<W: Write> DisplaySink for TextDisplay<W> {
    fn fill (&mut self, color: Color)->Result<()> {
        let c = Self::color_char( color);
        self.grid.iter_mut().for_each( |cell| *cell = c);
        Ok(())
    }

    fn fill_rect (&mut self, x: i32, y: i32, w: u32, h: u32, color: Color)->Result<()> {
        if w == 0 || h == 0 { return Ok(()) }

        let c = Self::color_char( color);
        let (x1, y1) = (x + w as i32 - 1, y + h as i32 - 1);
        let step = CELL_SIZE as usize;
        for cy in (y.max(0)..=y1).step_by(step).chain( std::iter::once(y1)) {
            for cx in (x.max(0)..=x1).step_by(step).chain( std::iter::once(x1)) {
                if let Some(i) = self.cell( cx, cy) { self.grid[i] = c }
            }
        }
        Ok(())
    }

    fn text (&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color)->Result<()> {
        for (k,ch) in text.chars().enumerate() {
            if let Some(i) = self.cell( x + (k as u32 * CELL_SIZE) as i32, y + (CELL_SIZE/2) as i32) {
                self.grid[i] = ch;
            }
        }
        Ok(())
    }

    fn flush (&mut self)->Result<()> {
        write!( self.out, "\x1b[H\x1b[2J")?;
        writeln!( self.out, "+{}+", "-".repeat( self.cols))?;
        for row in 0..self.rows {
            writeln!( self.out, "|{}|", self.row(row))?;
        }
        writeln!( self.out, "+{}+", "-".repeat( self.cols))?;
        self.out.flush()?;
        Ok(())
    }
}
