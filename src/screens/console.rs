/// Console screen: menu on the left, list/modal/log pane on the right,
/// error strip and key hints underneath

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::core::focus::FocusRegion;
use crate::core::view::{BodyView, ConsoleView, MenuRow};

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border_style(focused))
}

pub fn render(frame: &mut Frame, view: &ConsoleView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5), Constraint::Ratio(4, 5)])
        .split(rows[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(columns[1]);

    render_menu(frame, columns[0], &view.menu, view.menu_cursor, view.focus == FocusRegion::Menu);

    match &view.body {
        BodyView::List { title, rows, cursor } => {
            render_list(frame, right[0], title, rows, *cursor, view.focus == FocusRegion::List)
        }
        BodyView::Modal { prompt, actions, cursor } => {
            render_modal(frame, right[0], prompt, actions, *cursor)
        }
        BodyView::LogPane { title, text, scroll } => {
            render_log_pane(frame, right[0], title, text, *scroll)
        }
    }

    render_error_strip(frame, right[1], view.error.as_deref());
    render_footer(frame, rows[1], view);
}

fn render_menu(frame: &mut Frame, area: Rect, menu: &[MenuRow], cursor: usize, focused: bool) {
    let items: Vec<ListItem> = menu
        .iter()
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("({}) ", row.shortcut), Style::default().fg(Color::DarkGray)),
                Span::raw(row.label),
            ]))
        })
        .collect();

    let highlight = if focused {
        Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let list = List::new(items)
        .block(panel("Resources", focused))
        .highlight_style(highlight);

    let mut state = ListState::default();
    state.select(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[String],
    cursor: Option<usize>,
    focused: bool,
) {
    let title = if title.is_empty() { "Select a resource type" } else { title };

    if rows.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "Nothing to show",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
        .block(panel(title, focused));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(|row| ListItem::new(row.as_str())).collect();
    let list = List::new(items)
        .block(panel(&format!("{} ({})", title, rows.len()), focused))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol(if focused { "> " } else { "  " });

    let mut state = ListState::default();
    state.select(cursor);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_modal(frame: &mut Frame, area: Rect, prompt: &str, actions: &[&str], cursor: usize) {
    let width = area.width.min(70);
    let height = area.height.min(9);
    let dialog = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let mut buttons = Vec::new();
    for (i, action) in actions.iter().enumerate() {
        if i > 0 {
            buttons.push(Span::raw("  "));
        }
        let style = if i == cursor {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        buttons.push(Span::styled(format!(" {} ", action), style));
    }

    let mut lines: Vec<Line> = prompt.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(buttons));

    let body = Paragraph::new(lines)
        .block(panel("Action", true))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, dialog);
    frame.render_widget(body, dialog);
}

fn render_log_pane(frame: &mut Frame, area: Rect, title: &str, text: &str, scroll: u16) {
    let content: Text = if text.is_empty() {
        Text::from(Line::from(Span::styled(
            "(no output)",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )))
    } else {
        Text::from(text)
    };

    let pane = Paragraph::new(content)
        .block(panel(title, true))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(pane, area);
}

fn render_error_strip(frame: &mut Frame, area: Rect, error: Option<&str>) {
    let text = match error {
        Some(message) => Span::styled(message, Style::default().fg(Color::Red)),
        None => Span::raw(""),
    };

    let strip = Paragraph::new(Line::from(text))
        .block(
            Block::default()
                .title(" Errors ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(strip, area);
}

fn render_footer(frame: &mut Frame, area: Rect, view: &ConsoleView) {
    let line = match view.status.as_deref() {
        Some(status) => Line::from(Span::styled(status, Style::default().fg(Color::Green))),
        None => {
            let hints = match view.focus {
                FocusRegion::Menu => "↑↓ choose  Enter/1-3 open  → list  q quit",
                FocusRegion::List => "↑↓ move  Enter actions  ← menu  r refresh  q quit",
                FocusRegion::Modal => "↑↓ choose  Enter confirm  Esc cancel  ← menu",
                FocusRegion::LogPane => "↑↓ scroll  Esc/Enter close  ← menu",
            };
            Line::from(Span::styled(
                hints,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(view: &ConsoleView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render(f, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn menu() -> Vec<MenuRow> {
        vec![
            MenuRow { label: "Images", shortcut: '1' },
            MenuRow { label: "Containers", shortcut: '2' },
            MenuRow { label: "Volumes", shortcut: '3' },
        ]
    }

    #[test]
    fn test_list_and_error_strip() {
        let view = ConsoleView {
            focus: FocusRegion::List,
            menu: menu(),
            menu_cursor: 1,
            body: BodyView::List {
                title: "Containers".to_string(),
                rows: vec!["nginx(abc) Up".to_string(), "redis(def) Exited".to_string()],
                cursor: Some(1),
            },
            error: Some("stop container failed: boom".to_string()),
            status: None,
        };

        let screen = draw(&view);
        assert!(screen.contains("Containers (2)"));
        assert!(screen.contains("> redis(def) Exited"));
        assert!(screen.contains("stop container failed: boom"));
        assert!(screen.contains("Enter actions"));
    }

    #[test]
    fn test_modal_replaces_list() {
        let view = ConsoleView {
            focus: FocusRegion::Modal,
            menu: menu(),
            menu_cursor: 0,
            body: BodyView::Modal {
                prompt: "image sha256:aaa\nnginx:latest".to_string(),
                actions: vec!["run", "remove"],
                cursor: 0,
            },
            error: None,
            status: Some("started container f00d".to_string()),
        };

        let screen = draw(&view);
        assert!(screen.contains(" run "));
        assert!(screen.contains(" remove "));
        assert!(screen.contains("nginx:latest"));
        assert!(screen.contains("started container f00d"));
    }

    #[test]
    fn test_log_pane() {
        let view = ConsoleView {
            focus: FocusRegion::LogPane,
            menu: menu(),
            menu_cursor: 1,
            body: BodyView::LogPane {
                title: "Logs c0ffee".to_string(),
                text: "booting\nready to accept connections".to_string(),
                scroll: 0,
            },
            error: None,
            status: None,
        };

        let screen = draw(&view);
        assert!(screen.contains("Logs c0ffee"));
        assert!(screen.contains("ready to accept connections"));
    }
}
