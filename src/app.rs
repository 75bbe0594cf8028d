//! App: terminal init, main loop, event dispatch, screen navigation.

use crate::input::{self, Action};
use crate::round::{Round, RoundEvent, RoundState};
use crate::score::{FileStore, HighScore};
use crate::selector::GridGeometry;
use crate::theme::Theme;
use crate::{Args, GameConfig};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::DefaultTerminal;
use std::io::Write;
use std::time::{Duration, Instant};

/// Event poll timeout; also the render cadence.
const FRAME_TIME: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Scores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Scores,
    Quit,
}

impl MenuItem {
    pub const ALL: [Self; 3] = [Self::Play, Self::Scores, Self::Quit];
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    fn item(self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    fn select_prev(&mut self) {
        self.selected = (self.selected + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::ALL.len();
    }
}

pub struct App {
    config: GameConfig,
    theme: Theme,
    screen: Screen,
    menu: MenuState,
    /// The live round, if any. Exiting takes it out and drops it.
    round: Option<Round>,
    store: FileStore,
    scores: Vec<HighScore>,
    /// Board geometry from the last draw; maps mouse positions to cells.
    geometry: GridGeometry,
}

impl App {
    pub fn new(args: &Args, config: GameConfig, theme: Theme) -> Self {
        let store = FileStore::at_default_location();
        let mut app = Self {
            config,
            theme,
            screen: Screen::Menu,
            menu: MenuState::default(),
            round: None,
            store,
            scores: Vec::new(),
            geometry: GridGeometry::default(),
        };
        if args.no_menu {
            app.start_round(Instant::now());
        }
        app
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{DisableMouseCapture, EnableMouseCapture},
            execute,
            terminal::{
                EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
            },
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();

            // Drive the round's timer schedules before drawing.
            if let Some(round) = self.round.as_mut() {
                for round_event in round.poll(now, &mut self.store) {
                    if matches!(round_event, RoundEvent::TimeUp) {
                        ring_bell();
                        self.scores = self.store.load();
                    }
                }
            }

            let snapshot = self.round.as_ref().map(|r| r.snapshot(now));
            let mut geometry = GridGeometry::default();
            terminal.draw(|f| {
                geometry = crate::ui::draw(
                    f,
                    self.screen,
                    snapshot.as_ref(),
                    &self.menu,
                    &self.scores,
                    &self.theme,
                );
            })?;
            self.geometry = geometry;

            if event::poll(FRAME_TIME)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if !self.handle_key(key, Instant::now()) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let action = input::key_to_action(key);
        match self.screen {
            Screen::Menu => match action {
                Action::Quit => return false,
                Action::Up => self.menu.select_prev(),
                Action::Down => self.menu.select_next(),
                Action::Confirm => match self.menu.item() {
                    MenuItem::Play => self.start_round(now),
                    MenuItem::Scores => {
                        self.scores = self.store.load();
                        self.screen = Screen::Scores;
                    }
                    MenuItem::Quit => return false,
                },
                _ => {}
            },
            Screen::Scores => {
                if matches!(action, Action::Back | Action::Quit) {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Playing => match action {
                Action::Pause => {
                    if let Some(round) = self.round.as_mut() {
                        match round.state() {
                            RoundState::Running => round.pause(now),
                            RoundState::Paused => round.resume(now),
                            RoundState::Finished => {}
                        }
                    }
                }
                Action::NewGame => {
                    if let Some(round) = self.round.as_mut() {
                        round.new_round(now);
                    }
                }
                Action::Back | Action::Quit => self.exit_round(),
                _ => {}
            },
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Playing {
            return;
        }
        if let (Some(gesture), Some(round)) =
            (input::mouse_to_gesture(mouse), self.round.as_mut())
        {
            round.handle_gesture(gesture, &self.geometry);
        }
    }

    fn start_round(&mut self, now: Instant) {
        self.round = Some(Round::new(self.config, now));
        self.screen = Screen::Playing;
    }

    /// Abandon the round and return to the menu. Dropping the round is the
    /// teardown; landing on the menu is the "exited" notification.
    fn exit_round(&mut self) {
        if let Some(round) = self.round.take() {
            round.exit();
        }
        self.scores = self.store.load();
        self.screen = Screen::Menu;
    }
}

/// Terminal bell as the end-of-round alert.
fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
