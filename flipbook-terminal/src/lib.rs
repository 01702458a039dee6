/// Terminal page turn preview built on the flipbook transform engine
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use flipbook_core::{Face, FlipDirection, FlipFrame, PageFlip};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Progress added per frame at normal speed.
const BASE_STEP: f64 = 0.02;

/// State of an animated page turn, independent of the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnState {
    pub progress: f64,
    pub direction: FlipDirection,
    pub speed: f64,
    pub paused: bool,
    /// Completed turns, positive forward.
    pub page_offset: i64,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            direction: FlipDirection::Left,
            speed: 1.0,
            paused: false,
            page_offset: 0,
        }
    }

    /// Advance one frame, wrapping into a new turn once the page lands.
    pub fn step(&mut self) {
        if self.paused {
            return;
        }
        self.progress += BASE_STEP * self.speed;
        if self.progress >= 1.0 {
            self.progress = 0.0;
            self.page_offset += match self.direction {
                FlipDirection::Left => 1,
                FlipDirection::Right => -1,
            };
        }
    }

    /// Start a fresh turn in `direction`.
    pub fn turn(&mut self, direction: FlipDirection) {
        self.direction = direction;
        self.progress = 0.0;
    }

    pub fn faster(&mut self) {
        self.speed = (self.speed * 1.5).min(8.0);
    }

    pub fn slower(&mut self) {
        self.speed = (self.speed / 1.5).max(0.125);
    }

    /// Whether releasing the page now would complete the turn: the free edge
    /// has crossed the spine.
    pub fn would_complete(&self, front: &FlipFrame, spine: f64) -> bool {
        match (self.direction, front.bounds()) {
            (FlipDirection::Left, Some((min_x, _))) => min_x < spine && self.progress > 0.5,
            (FlipDirection::Right, Some((_, max_x))) => max_x > spine && self.progress > 0.5,
            (_, None) => false,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application struct for the terminal page turn preview
pub struct TerminalApp {
    flip: PageFlip,
    state: TurnState,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(flip: PageFlip) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let renderer = AsciiRenderer::new(width as usize, height as usize, flip.config());

        Ok(Self {
            flip,
            state: TurnState::new(),
            renderer,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        info!("entered preview");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.state.step();

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    self.state.turn(FlipDirection::Left);
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.state.turn(FlipDirection::Right);
                }
                KeyCode::Char(' ') => {
                    self.state.paused = !self.state.paused;
                }
                KeyCode::Char('+') | KeyCode::Up => {
                    self.state.faster();
                }
                KeyCode::Char('-') | KeyCode::Down => {
                    self.state.slower();
                }
                _ => {}
            }
            debug!(?code, state = ?self.state, "key handled");
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let config = self.flip.config();
        let spine = config.view_width / 2.0;
        let front = self
            .flip
            .polygons(self.state.progress, self.state.direction, Face::Front);
        let back = self
            .flip
            .polygons(self.state.progress, self.state.direction, Face::Back);

        self.renderer.clear();
        self.renderer
            .render_resting_page(spine - config.page_width, spine, config.page_height);
        self.renderer
            .render_resting_page(spine, spine + config.page_width, config.page_height);
        self.renderer.render_polygons(&front.polygons, config.page_height);
        self.renderer.render_polygons(&back.polygons, config.page_height);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        let edge = match front.bounds() {
            Some((min_x, max_x)) => format!("{:.0}..{:.0}", min_x, max_x),
            None => "-".to_string(),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Flipbook | FPS: {:.1} | page {:+} | {:>3.0}% | edge {} | {} | A/D=Turn Space=Pause +/-=Speed Q=Quit",
                self.fps,
                self.state.page_offset,
                self.state.progress * 100.0,
                edge,
                if self.state.would_complete(&front, spine) {
                    "release: turn"
                } else {
                    "release: return"
                },
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_core::FlipConfig;

    #[test]
    fn test_step_wraps_and_counts_pages() {
        let mut state = TurnState::new();
        for _ in 0..60 {
            state.step();
        }
        assert_eq!(state.page_offset, 1);
        assert!(state.progress < 0.25);

        state.turn(FlipDirection::Right);
        for _ in 0..60 {
            state.step();
        }
        assert_eq!(state.page_offset, 0);
    }

    #[test]
    fn test_pause_holds_progress() {
        let mut state = TurnState::new();
        state.step();
        state.paused = true;
        let held = state.progress;
        state.step();
        assert_eq!(state.progress, held);
    }

    #[test]
    fn test_speed_limits() {
        let mut state = TurnState::new();
        for _ in 0..20 {
            state.faster();
        }
        assert_eq!(state.speed, 8.0);
        for _ in 0..40 {
            state.slower();
        }
        assert_eq!(state.speed, 0.125);
    }

    #[test]
    fn test_release_decision() {
        let flip = PageFlip::new(FlipConfig::default()).unwrap();
        let mut state = TurnState::new();

        state.progress = 0.2;
        let frame = flip.polygons(state.progress, state.direction, Face::Front);
        assert!(!state.would_complete(&frame, 400.0));

        state.progress = 0.8;
        let frame = flip.polygons(state.progress, state.direction, Face::Front);
        assert!(state.would_complete(&frame, 400.0));
    }
}
