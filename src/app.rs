/// Main TUI application

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::core::client::ResourceClient;
use crate::core::resource::ResourceKind;
use crate::core::shell::{Input, Shell};
use crate::screens;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Translate a terminal key into an abstract console input
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Input::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Input::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Input::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::MoveRight),
        KeyCode::Enter => Some(Input::Select),
        KeyCode::Esc => Some(Input::Dismiss),
        KeyCode::Char('r') => Some(Input::Refresh),
        KeyCode::Char(c) => ResourceKind::from_shortcut(c).map(Input::SelectKind),
        _ => None,
    }
}

pub struct App<C> {
    shell: Shell<C>,
}

impl<C: ResourceClient> App<C> {
    pub fn new(client: C) -> Self {
        Self {
            shell: Shell::new(client),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        tracing::info!("console started");

        loop {
            let view = self.shell.view();
            terminal.draw(|f| screens::render(f, &view))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(input) = map_key(key) {
                        self.shell.handle(input).await;
                    }
                }
            }

            if self.shell.should_quit() {
                break;
            }
        }

        tracing::info!("console closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_key(press(KeyCode::Left)), Some(Input::MoveLeft));
        assert_eq!(map_key(press(KeyCode::Char('l'))), Some(Input::MoveRight));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Input::Select));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Input::Dismiss));
        assert_eq!(
            map_key(press(KeyCode::Char('2'))),
            Some(Input::SelectKind(ResourceKind::Container))
        );
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Input::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Quit)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);
    }
}
