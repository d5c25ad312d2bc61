use std::io::{self, Write};

/// an off-screen character buffer, flushed to the terminal in one pass to
/// avoid flicker between layers.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// a canvas covering the terminal, minus one row kept for the status
    /// line.
    pub fn from_screen() -> Self {
        let (width, height) = termion::terminal_size().unwrap();
        Self::new(width as usize, (height - 1) as usize)
    }

    pub fn new(width: usize, height: usize) -> Self {
        let lines = (0..height).map(|_| vec![' '; width]).collect();
        Self {
            lines,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// plots one character; positions outside the buffer are dropped.
    pub fn set(&mut self, x: i64, y: i64, char: char) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.lines[y as usize][x as usize] = char;
    }

    /// fills the inclusive rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, char: char) {
        for y in y0.max(0)..=y1.min(self.height as i64 - 1) {
            for x in x0.max(0)..=x1.min(self.width as i64 - 1) {
                self.lines[y as usize][x as usize] = char;
            }
        }
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", termion::clear::All)?;
        for (index, line) in self.lines.iter().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            let line = line.iter().collect::<String>();
            write!(out, "{goto}{line}")?;
        }
        out.flush()
    }
}

#[test]
fn test_fill_rect_clips_to_the_buffer() {
    let mut canvas = Canvas::new(4, 3);
    canvas.fill_rect(-2, -2, 1, 1, '#');
    canvas.fill_rect(3, 2, 9, 9, 'o');
    canvas.set(9, 0, 'x');

    let rows = canvas
        .lines
        .iter()
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>();
    assert_eq!(rows, vec!["##  ", "##  ", "   o"]);
}
