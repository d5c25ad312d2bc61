use std::{
    io::{stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use termion::{
    event::{Event, Key, MouseButton, MouseEvent},
    input::{MouseTerminal, TermRead},
    raw::IntoRawMode,
};

use crate::{SimHandle, Snapshot};

pub use viewport::{Viewport, ZoomDirection, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, ZOOM_STEP};
pub mod viewport;

pub use canvas::Canvas;
mod canvas;

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(50);

/// screen distance covered by one arrow-key nudge.
const KEY_PAN_STEP: f64 = 8.0;

/// below this scale the alignment grid would drown out the cells.
const GRID_LINE_MIN_SCALE: f64 = 3.0;

pub struct View {
    thread: JoinHandle<()>,
}

impl View {
    pub fn spawn(handle: SimHandle) -> Self {
        let thread = thread::spawn(|| view_loop(handle));
        Self { thread }
    }

    pub fn join(self) {
        self.thread.join().unwrap();
    }
}

#[derive(Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    PanStart(f64, f64),
    PanMove(f64, f64),
    PanEnd,
    Zoom(ZoomDirection, f64, f64),
    Move(Dir),
    TogglePause,
    ResetView,
}

/// termion reports mouse positions 1-based.
fn screen_pos(x: u16, y: u16) -> (f64, f64) {
    ((x - 1) as f64, (y - 1) as f64)
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for event in stdin().events() {
        let command = match event.unwrap() {
            Event::Key(Key::Char('q')) | Event::Key(Key::Esc) | Event::Key(Key::Ctrl('c')) => {
                InputCmd::Exit
            }
            Event::Key(Key::Char(' ')) => InputCmd::TogglePause,
            Event::Key(Key::Char('r')) => InputCmd::ResetView,
            Event::Key(Key::Up) => InputCmd::Move(Dir::Up),
            Event::Key(Key::Down) => InputCmd::Move(Dir::Down),
            Event::Key(Key::Left) => InputCmd::Move(Dir::Left),
            Event::Key(Key::Right) => InputCmd::Move(Dir::Right),
            Event::Mouse(MouseEvent::Press(button, x, y)) => {
                let (px, py) = screen_pos(x, y);
                match button {
                    MouseButton::Left => InputCmd::PanStart(px, py),
                    MouseButton::WheelUp => InputCmd::Zoom(ZoomDirection::In, px, py),
                    MouseButton::WheelDown => InputCmd::Zoom(ZoomDirection::Out, px, py),
                    _ => continue,
                }
            }
            Event::Mouse(MouseEvent::Hold(x, y)) => {
                let (px, py) = screen_pos(x, y);
                InputCmd::PanMove(px, py)
            }
            Event::Mouse(MouseEvent::Release(..)) => InputCmd::PanEnd,
            _ => continue,
        };

        // the view loop hanging up means the session is over.
        if sender.send(command).is_err() {
            return;
        }
    }
}

fn view_loop(handle: SimHandle) {
    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let mut screen = MouseTerminal::from(stdout().into_raw_mode().unwrap());
    write!(screen, "{}", termion::cursor::Hide).unwrap();

    let (mut width, mut height) = termion::terminal_size().unwrap();
    let mut viewport = Viewport::new(width as f64, (height - 1) as f64);
    let mut paused = false;
    log::info!("view started on a {width}x{height} terminal");

    loop {
        if !handle_inputs(&receiver, &mut viewport, &handle, &mut paused) {
            break;
        }

        let size = termion::terminal_size().unwrap();
        if size != (width, height) {
            (width, height) = size;
            viewport.on_resize(width as f64, (height - 1) as f64);
        }

        let snapshot = handle.snapshot();
        render_frame(&mut screen, &viewport, &snapshot, height, paused).unwrap();
        thread::sleep(VIEW_REFRESH_INTERVAL);
    }

    write!(
        screen,
        "{}{}{}",
        termion::cursor::Show,
        termion::clear::All,
        termion::cursor::Goto(1, 1)
    )
    .unwrap();
    screen.flush().unwrap();
    handle.exit();
}

/// applies all pending input commands; returns false once the session
/// should end.
fn handle_inputs(
    receiver: &mpsc::Receiver<InputCmd>,
    viewport: &mut Viewport,
    handle: &SimHandle,
    paused: &mut bool,
) -> bool {
    while let Ok(cmd) = receiver.try_recv() {
        match cmd {
            InputCmd::Exit => return false,
            InputCmd::PanStart(px, py) => viewport.begin_pan(px, py),
            InputCmd::PanMove(px, py) => viewport.update_pan(px, py),
            InputCmd::PanEnd => viewport.end_pan(),
            InputCmd::Zoom(direction, px, py) => viewport.zoom_at(px, py, direction),
            InputCmd::Move(direction) => {
                let (dx, dy) = match direction {
                    Dir::Up => (0.0, KEY_PAN_STEP),
                    Dir::Down => (0.0, -KEY_PAN_STEP),
                    Dir::Left => (KEY_PAN_STEP, 0.0),
                    Dir::Right => (-KEY_PAN_STEP, 0.0),
                };
                viewport.pan_by(dx, dy);
            }
            InputCmd::TogglePause => {
                *paused = !*paused;
                handle.set_paused(*paused);
            }
            InputCmd::ResetView => viewport.recenter(),
        }
    }
    true
}

fn render_frame(
    screen: &mut impl Write,
    viewport: &Viewport,
    snapshot: &Snapshot,
    term_height: u16,
    paused: bool,
) -> std::io::Result<()> {
    let mut canvas = Canvas::from_screen();
    draw_grid_lines(&mut canvas, viewport);
    draw_cells(&mut canvas, viewport, snapshot);
    canvas.display(screen)?;

    let paused = if paused { "  [paused]" } else { "" };
    let status = format!(
        "gen {}  pop {}  scale {:.2}{paused}  (drag pans, wheel zooms, q quits)",
        snapshot.generation,
        snapshot.population,
        viewport.scale(),
    );
    write!(screen, "{}{status}", termion::cursor::Goto(1, term_height))?;
    screen.flush()
}

/// world-aligned alignment grid, one line per integer world coordinate in
/// view.
fn draw_grid_lines(canvas: &mut Canvas, viewport: &Viewport) {
    if viewport.scale() < GRID_LINE_MIN_SCALE {
        return;
    }

    let (top_left, bottom_right) = viewport.visible_bounds();
    for wx in top_left.x..=bottom_right.x + 1 {
        let (px, _) = viewport.world_to_screen(wx as f64, 0.0);
        let px = px.round() as i64;
        for py in 0..canvas.height() as i64 {
            canvas.set(px, py, '·');
        }
    }
    for wy in top_left.y..=bottom_right.y + 1 {
        let (_, py) = viewport.world_to_screen(0.0, wy as f64);
        let py = py.round() as i64;
        for px in 0..canvas.width() as i64 {
            canvas.set(px, py, '·');
        }
    }
}

/// every visible live cell becomes a filled square of side `scale` placed
/// by the viewport transform.
fn draw_cells(canvas: &mut Canvas, viewport: &Viewport, snapshot: &Snapshot) {
    let (top_left, bottom_right) = viewport.visible_bounds();
    let scale = viewport.scale();

    for &cell in &snapshot.cells {
        let visible = (top_left.x..=bottom_right.x).contains(&cell.x)
            && (top_left.y..=bottom_right.y).contains(&cell.y);
        if !visible {
            continue;
        }

        let (px, py) = viewport.world_to_screen(cell.x as f64, cell.y as f64);
        let x0 = px.round() as i64;
        let y0 = py.round() as i64;
        // adjacent cells share edges exactly, rounding keeps the tiling
        // seamless at fractional scales.
        let x1 = ((px + scale).round() as i64 - 1).max(x0);
        let y1 = ((py + scale).round() as i64 - 1).max(y0);
        canvas.fill_rect(x0, y0, x1, y1, '█');
    }
}
