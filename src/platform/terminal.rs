//! Terminal backend built on crossterm
//!
//! The logical `LOGICAL_WIDTH` x `LOGICAL_HEIGHT` surface is scaled onto the
//! terminal grid. Every cell shows two vertically stacked pixels using an
//! upper half block, so the pixel canvas is `cols` x `rows * 2`. Only cells
//! that changed since the previous frame are written.
//!
//! Terminals that support the kitty keyboard protocol report key releases.
//! Elsewhere a held key is considered released once no press or auto-repeat
//! has arrived for a short while.

use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color as CColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
        disable_raw_mode, enable_raw_mode,
    },
};
use glam::Vec2;

use super::{Backend, PlatformError, TextureId};
use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::input::{Action, Input, Key, KeyMap};
use crate::{Color, NAME, Rect};

/// A fresh press counts as held this long without auto-repeat; longer than
/// the usual auto-repeat delay (500 ms on VTE and macOS, 660 ms on X11)
const INITIAL_HOLD: Duration = Duration::from_millis(700);
/// Auto-repeat interval allowance once repeating
const REPEAT_HOLD: Duration = Duration::from_millis(120);

const HALF_BLOCK: char = '\u{2580}';

/// One terminal cell as written to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Pixel canvas mapped from logical surface coordinates
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    pixels: Vec<Color>,
    /// Text drawn over cells this frame
    text: Vec<Option<(char, Color)>>,
    clip: Option<Rect>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1) as usize;
        let rows = rows.max(1) as usize;
        Self {
            cols,
            rows,
            pixels: vec![Color::BLACK; cols * rows * 2],
            text: vec![None; cols * rows],
            clip: None,
        }
    }

    pub fn width(&self) -> usize {
        self.cols
    }

    pub fn height(&self) -> usize {
        self.rows * 2
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.width() as f32 / LOGICAL_WIDTH,
            self.height() as f32 / LOGICAL_HEIGHT,
        )
    }

    /// Pixel bounds `[x0, x1) x [y0, y1)` covered by `rect`, intersected
    /// with the clip and the canvas
    fn pixel_bounds(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let rect = match self.clip {
            Some(clip) => intersection(rect, clip),
            None => rect,
        };
        let s = self.scale();
        let to_px = |v: f32, max: usize| (v.round().max(0.0) as usize).min(max);
        let x0 = to_px(rect.x * s.x, self.width());
        let x1 = to_px(rect.right() * s.x, self.width());
        let y0 = to_px(rect.y * s.y, self.height());
        let y1 = to_px(rect.bottom() * s.y, self.height());
        (x0, x1, y0, y1)
    }

    fn blend(&mut self, x: usize, y: usize, color: Color) {
        let dst = &mut self.pixels[y * self.cols + x];
        *dst = blend(*dst, color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.cols + x]
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.text.fill(None);
    }

    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    pub fn fill_rect(&mut self, color: Color, rect: Option<Rect>) {
        let rect = rect
            .or(self.clip)
            .unwrap_or(Rect::new(0.0, 0.0, LOGICAL_WIDTH, LOGICAL_HEIGHT));
        let (x0, x1, y0, y1) = self.pixel_bounds(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    pub fn draw_image(&mut self, img: &image::RgbaImage, src: Option<Rect>, dst: Rect) {
        if img.width() == 0 || img.height() == 0 || dst.w <= 0.0 || dst.h <= 0.0 {
            return;
        }
        let src = src.unwrap_or(Rect::new(0.0, 0.0, img.width() as f32, img.height() as f32));
        let s = self.scale();
        let (x0, x1, y0, y1) = self.pixel_bounds(dst);
        for y in y0..y1 {
            let v = ((y as f32 + 0.5) / s.y - dst.y) / dst.h;
            let ty = (src.y + v * src.h).clamp(0.0, img.height() as f32 - 1.0) as u32;
            for x in x0..x1 {
                let u = ((x as f32 + 0.5) / s.x - dst.x) / dst.w;
                let tx = (src.x + u * src.w).clamp(0.0, img.width() as f32 - 1.0) as u32;
                let [r, g, b, a] = img.get_pixel(tx, ty).0;
                self.blend(x, y, Color::rgba(r, g, b, a));
            }
        }
    }

    pub fn draw_line(&mut self, color: Color, from: Vec2, to: Vec2) {
        let s = self.scale();
        let (mut x, mut y) = ((from.x * s.x) as i64, (from.y * s.y) as i64);
        let (x1, y1) = ((to.x * s.x) as i64, (to.y * s.y) as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width() || y >= self.height() {
            return;
        }
        if let Some(clip) = self.clip {
            let (x0, x1, y0, y1) = self.pixel_bounds(clip);
            if x < x0 || x >= x1 || y < y0 || y >= y1 {
                return;
            }
        }
        self.blend(x, y, color);
    }

    /// Logical size of one cell
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(LOGICAL_WIDTH / self.cols as f32, LOGICAL_HEIGHT / self.rows as f32)
    }

    pub fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        let cell = self.cell_size();
        let row = (pos.y / cell.y).floor();
        if row < 0.0 || row as usize >= self.rows {
            return;
        }
        let row = row as usize;
        let start = (pos.x / cell.x).floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i64;
            if col < 0 || col as usize >= self.cols {
                continue;
            }
            self.text[row * self.cols + col as usize] = Some((ch, color));
        }
    }

    /// Resolve the canvas into terminal cells, row-major
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.cols * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let top = self.pixel(col, row * 2);
                let bottom = self.pixel(col, row * 2 + 1);
                cells.push(match self.text[row * self.cols + col] {
                    Some((ch, fg)) => Cell { ch, fg, bg: top },
                    None => Cell {
                        ch: HALF_BLOCK,
                        fg: top,
                        bg: bottom,
                    },
                });
            }
        }
        cells
    }
}

fn intersection(a: Rect, b: Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let w = (a.right().min(b.right()) - x).max(0.0);
    let h = (a.bottom().min(b.bottom()) - y).max(0.0);
    Rect::new(x, y, w, h)
}

/// Alpha-blend `src` over opaque `dst`
fn blend(dst: Color, src: Color) -> Color {
    match src.a {
        0xFF => src,
        0 => dst,
        a => {
            let a = a as u32;
            let mix = |d: u8, s: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
            Color::rgb(mix(dst.r, src.r), mix(dst.g, src.g), mix(dst.b, src.b))
        }
    }
}

fn to_crossterm(c: Color) -> CColor {
    CColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Return,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        _ => return None,
    })
}

#[derive(Debug, Clone, Copy)]
struct Held {
    last: Instant,
    repeating: bool,
}

/// Keys assumed down on terminals that never report releases
#[derive(Debug, Default)]
struct HeldKeys {
    keys: HashMap<(usize, Action), Held>,
}

impl HeldKeys {
    fn press(&mut self, player: usize, action: Action, now: Instant) {
        self.keys
            .entry((player, action))
            .and_modify(|h| {
                h.last = now;
                h.repeating = true;
            })
            .or_insert(Held {
                last: now,
                repeating: false,
            });
    }

    fn release(&mut self, player: usize, action: Action) {
        self.keys.remove(&(player, action));
    }

    /// Release keys whose auto-repeat stopped arriving
    fn expire(&mut self, now: Instant, input: &mut Input) {
        self.keys.retain(|&(player, action), held| {
            let timeout = if held.repeating { REPEAT_HOLD } else { INITIAL_HOLD };
            if now.duration_since(held.last) > timeout {
                input.release(player, action);
                false
            } else {
                true
            }
        });
    }
}

pub struct TerminalBackend<W: Write = Stdout> {
    out: W,
    canvas: Canvas,
    /// Cells currently on screen; None forces a full redraw
    front: Option<Vec<Cell>>,
    textures: Vec<image::RgbaImage>,
    /// Texture slot per loaded path; reloading a path refreshes its slot
    texture_ids: HashMap<PathBuf, TextureId>,
    held: HeldKeys,
    raw_mode: bool,
    reports_releases: bool,
}

impl TerminalBackend<Stdout> {
    /// Enter raw mode on the alternate screen
    pub fn new() -> Result<Self, PlatformError> {
        let (cols, rows) = terminal::size()?;
        enable_raw_mode()?;
        let enhance = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        Self::start(io::stdout(), cols, rows, true, enhance)
    }
}

impl<W: Write> TerminalBackend<W> {
    /// Take over the terminal behind `out`. `raw_mode` records that raw mode
    /// is already enabled; it and the screen are restored on drop, including
    /// when setup itself fails.
    fn start(
        out: W,
        cols: u16,
        rows: u16,
        raw_mode: bool,
        enhance: bool,
    ) -> Result<Self, PlatformError> {
        let mut backend = Self {
            out,
            canvas: Canvas::new(cols, rows),
            front: None,
            textures: Vec::new(),
            texture_ids: HashMap::new(),
            held: HeldKeys::default(),
            raw_mode,
            reports_releases: false,
        };
        execute!(
            backend.out,
            EnterAlternateScreen,
            Hide,
            SetTitle(NAME),
            Clear(ClearType::All)
        )?;
        if enhance {
            execute!(
                backend.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            backend.reports_releases = true;
        }
        log::info!(
            "Terminal {}x{}, key release events: {}",
            cols,
            rows,
            backend.reports_releases
        );
        Ok(backend)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        log::debug!("Terminal resized to {}x{}", cols, rows);
        self.canvas = Canvas::new(cols, rows);
        self.front = None;
    }

    fn key_event(&mut self, key: KeyEvent, keymap: &KeyMap, input: &mut Input) {
        let Some((action, player)) = map_key(key.code).and_then(|k| keymap.lookup(k)) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                input.press(player, action);
                self.held.press(player, action, Instant::now());
            }
            KeyEventKind::Release => {
                input.release(player, action);
                self.held.release(player, action);
            }
        }
    }
}

impl<W: Write> Drop for TerminalBackend<W> {
    fn drop(&mut self) {
        if self.reports_releases {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
    }
}

impl<W: Write> Backend for TerminalBackend<W> {
    fn surface_size(&self) -> (f32, f32) {
        (LOGICAL_WIDTH, LOGICAL_HEIGHT)
    }

    fn load_texture(&mut self, path: &Path) -> Result<TextureId, PlatformError> {
        if !path.exists() {
            return Err(PlatformError::MissingTexture(path.to_path_buf()));
        }
        let img = image::open(path)
            .map_err(|source| PlatformError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        if let Some(&tex) = self.texture_ids.get(path) {
            self.textures[tex.0] = img;
            return Ok(tex);
        }
        self.textures.push(img);
        let tex = TextureId(self.textures.len() - 1);
        self.texture_ids.insert(path.to_path_buf(), tex);
        Ok(tex)
    }

    fn clear(&mut self, color: Color) {
        self.canvas.clear(color);
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.canvas.set_clip(clip);
    }

    fn fill_rect(&mut self, color: Color, rect: Option<Rect>) {
        self.canvas.fill_rect(color, rect);
    }

    fn draw_texture(&mut self, tex: TextureId, src: Option<Rect>, dst: Rect) {
        if let Some(img) = self.textures.get(tex.0) {
            self.canvas.draw_image(img, src, dst);
        }
    }

    fn draw_line(&mut self, color: Color, from: Vec2, to: Vec2) {
        self.canvas.draw_line(color, from, to);
    }

    fn measure_text(&self, text: &str, _size: f32) -> (f32, f32) {
        let cell = self.canvas.cell_size();
        (text.chars().count() as f32 * cell.x, cell.y)
    }

    fn draw_text(&mut self, text: &str, _size: f32, pos: Vec2, color: Color) {
        self.canvas.draw_text(text, pos, color);
    }

    fn poll_input(&mut self, keymap: &KeyMap, input: &mut Input) -> Result<bool, PlatformError> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        return Ok(false);
                    }
                    self.key_event(key, keymap, input);
                }
                Event::Resize(cols, rows) => self.resize(cols, rows),
                _ => {}
            }
        }
        if !self.reports_releases {
            self.held.expire(Instant::now(), input);
        }
        Ok(true)
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        let cells = self.canvas.cells();
        let cols = self.canvas.width();
        if self.front.is_none() {
            queue!(self.out, Clear(ClearType::All))?;
        }

        let mut fg = None;
        let mut bg = None;
        let mut last_pos: Option<(usize, usize)> = None;
        for (i, cell) in cells.iter().enumerate() {
            if let Some(front) = &self.front {
                if front.get(i) == Some(cell) {
                    continue;
                }
            }
            let (x, y) = (i % cols, i / cols);
            // Move the cursor unless the previous write ended right here
            if !matches!(last_pos, Some((px, py)) if x == px + 1 && y == py) {
                queue!(self.out, MoveTo(x as u16, y as u16))?;
            }
            last_pos = Some((x, y));
            if fg != Some(cell.fg) {
                queue!(self.out, SetForegroundColor(to_crossterm(cell.fg)))?;
                fg = Some(cell.fg);
            }
            if bg != Some(cell.bg) {
                queue!(self.out, SetBackgroundColor(to_crossterm(cell.bg)))?;
                bg = Some(cell.bg);
            }
            queue!(self.out, Print(cell.ch))?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        self.front = Some(cells);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::KeyState;

    /// Writer that fails its first write and records the rest
    struct FlakyWriter {
        log: Rc<RefCell<Vec<u8>>>,
        failed: bool,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::other("terminal gone"));
            }
            self.log.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn tile(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data/tiles")
            .join(name)
    }

    #[test]
    fn test_canvas_maps_logical_surface() {
        let mut canvas = Canvas::new(90, 45);
        assert_eq!((canvas.width(), canvas.height()), (90, 90));
        canvas.fill_rect(Color::WHITE, Some(Rect::new(0.0, 0.0, 450.0, 225.0)));
        assert_eq!(canvas.pixel(0, 0), Color::WHITE);
        assert_eq!(canvas.pixel(44, 44), Color::WHITE);
        assert_eq!(canvas.pixel(45, 44), Color::BLACK);
        assert_eq!(canvas.pixel(44, 45), Color::BLACK);
    }

    #[test]
    fn test_clip_limits_fill() {
        let mut canvas = Canvas::new(90, 45);
        canvas.set_clip(Some(Rect::new(450.0, 0.0, 450.0, 450.0)));
        canvas.fill_rect(Color::WHITE, None);
        assert_eq!(canvas.pixel(10, 10), Color::BLACK);
        assert_eq!(canvas.pixel(60, 10), Color::WHITE);

        canvas.fill_rect(Color::rgb(1, 2, 3), Some(Rect::new(0.0, 0.0, 900.0, 10.0)));
        assert_eq!(canvas.pixel(10, 0), Color::BLACK);
        assert_eq!(canvas.pixel(60, 0), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_alpha_blend() {
        let mut canvas = Canvas::new(10, 5);
        canvas.clear(Color::rgb(200, 100, 0));
        canvas.fill_rect(Color::rgba(0, 0, 0, 0), None);
        assert_eq!(canvas.pixel(0, 0), Color::rgb(200, 100, 0));
        canvas.fill_rect(Color::rgba(0, 0, 0, 255), None);
        assert_eq!(canvas.pixel(0, 0), Color::BLACK);
    }

    #[test]
    fn test_cells_stack_two_pixels() {
        let mut canvas = Canvas::new(2, 1);
        canvas.fill_rect(Color::WHITE, Some(Rect::new(0.0, 0.0, 900.0, 225.0)));
        canvas.draw_text("x", Vec2::new(450.0, 0.0), Color::rgb(9, 9, 9));
        let cells = canvas.cells();
        assert_eq!(
            cells[0],
            Cell {
                ch: HALF_BLOCK,
                fg: Color::WHITE,
                bg: Color::BLACK
            }
        );
        assert_eq!(cells[1].ch, 'x');
        assert_eq!(cells[1].fg, Color::rgb(9, 9, 9));
    }

    #[test]
    fn test_image_sampling() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 0, 255, 255]));
        let mut canvas = Canvas::new(90, 45);
        canvas.draw_image(&img, None, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(canvas.pixel(1, 1), Color::rgb(255, 0, 0));
        assert_eq!(canvas.pixel(9, 1), Color::rgb(0, 0, 255));
        assert_eq!(canvas.pixel(11, 1), Color::BLACK);
    }

    #[test]
    fn test_line_stays_inside_canvas() {
        let mut canvas = Canvas::new(10, 5);
        canvas.draw_line(Color::WHITE, Vec2::new(0.0, 0.0), Vec2::new(2000.0, 1000.0));
        assert_eq!(canvas.pixel(0, 0), Color::WHITE);
        assert_eq!(canvas.pixel(9, 9), Color::WHITE);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(map_key(KeyCode::Char('W')), Some(Key::Char('w')));
        assert_eq!(map_key(KeyCode::Enter), Some(Key::Return));
        assert_eq!(map_key(KeyCode::F(1)), None);
    }

    #[test]
    fn test_single_press_outlasts_autorepeat_delay() {
        let t0 = Instant::now();
        let mut held = HeldKeys::default();
        let mut input = Input::default();
        input.press(0, Action::Right);
        held.press(0, Action::Right, t0);

        // No repeat yet at 500 ms, the usual auto-repeat delay
        held.expire(t0 + Duration::from_millis(500), &mut input);
        assert_eq!(input.get(0, Action::Right), KeyState::Pressed);
        held.expire(t0 + Duration::from_millis(800), &mut input);
        assert_eq!(input.get(0, Action::Right), KeyState::Released);
    }

    #[test]
    fn test_repeating_key_released_when_repeats_stop() {
        let t0 = Instant::now();
        let mut held = HeldKeys::default();
        let mut input = Input::default();
        input.press(1, Action::Up);
        held.press(1, Action::Up, t0);
        held.press(1, Action::Up, t0 + Duration::from_millis(600));

        held.expire(t0 + Duration::from_millis(700), &mut input);
        assert_eq!(input.get(1, Action::Up), KeyState::Pressed);
        held.expire(t0 + Duration::from_millis(750), &mut input);
        assert_eq!(input.get(1, Action::Up), KeyState::Released);

        // Explicit releases stop tracking
        held.press(1, Action::Up, t0);
        held.release(1, Action::Up);
        assert!(held.keys.is_empty());
    }

    #[test]
    fn test_failed_setup_restores_screen() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let out = FlakyWriter {
            log: Rc::clone(&log),
            failed: false,
        };
        assert!(TerminalBackend::start(out, 10, 5, false, false).is_err());
        let written = String::from_utf8_lossy(&log.borrow()).into_owned();
        assert!(written.contains("\x1b[?25h"), "cursor not shown: {:?}", written);
        assert!(written.contains("\x1b[?1049l"), "alternate screen kept: {:?}", written);
    }

    #[test]
    fn test_reloading_texture_reuses_slot() {
        let Ok(mut backend) = TerminalBackend::start(Vec::new(), 10, 5, false, false) else {
            panic!("setup failed on an in-memory writer");
        };
        let snow = backend.load_texture(&tile("snow.png")).unwrap();
        assert_eq!(backend.load_texture(&tile("snow.png")).unwrap(), snow);
        assert_eq!(backend.textures.len(), 1);
        let end = backend.load_texture(&tile("end.png")).unwrap();
        assert_ne!(end, snow);
        assert_eq!(backend.textures.len(), 2);
    }
}
