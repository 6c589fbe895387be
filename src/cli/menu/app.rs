//! Menu application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use super::super::render::clip;
use super::super::session::Session;
use super::event::{Event, EventHandler};
use super::ui::Terminal;
use crate::domain::FileColor;

/// Application state
pub struct App {
    /// Scanned registry plus effective configuration
    session: Session,

    /// Current description filter
    filter: String,

    /// Whether the filter line is being edited
    searching: bool,

    /// Indices into the flattened entry list that match the filter
    visible: Vec<usize>,

    /// List selection state
    list_state: ListState,

    /// Show the per-file statistics popup
    show_stats: bool,

    /// Show the key help popup
    show_help: bool,

    /// Status message for the footer
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create the menu over an already-scanned session
    pub fn new(session: Session) -> Self {
        let visible: Vec<usize> = (0..session.registry.len()).collect();
        let mut list_state = ListState::default();
        if !visible.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            session,
            filter: String::new(),
            searching: false,
            visible,
            list_state,
            show_stats: false,
            show_help: false,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Tick => {}
            }
        }

        Ok(())
    }

    /// Recomputes the visible list after a filter change or rescan
    fn update_visible(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .session
            .registry
            .all_entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| needle.is_empty() || e.description().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();

        // Clamp the selection to the new list
        let selected = self
            .list_state
            .selected()
            .unwrap_or(0)
            .min(self.visible.len().saturating_sub(1));
        self.list_state
            .select(if self.visible.is_empty() { None } else { Some(selected) });
    }

    /// Handle key events
    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.searching {
            self.handle_search_key(key);
        } else {
            self.handle_normal_key(key);
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.show_help || self.show_stats {
                    self.show_help = false;
                    self.show_stats = false;
                } else if !self.filter.is_empty() {
                    self.filter.clear();
                    self.update_visible();
                } else {
                    self.should_quit = true;
                }
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => {
                if !self.visible.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Char('G') | KeyCode::End => {
                if !self.visible.is_empty() {
                    self.list_state.select(Some(self.visible.len() - 1));
                }
            }

            // Actions
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            KeyCode::Char('a') => self.open_visible(),
            KeyCode::Char('r') => self.rescan(),
            KeyCode::Char('s') => {
                self.show_stats = !self.show_stats;
                self.show_help = false;
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                self.show_stats = false;
            }
            KeyCode::Char('/') => {
                self.searching = true;
                self.status_message = None;
            }

            _ => {}
        }
    }

    /// Handle keys while editing the filter
    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.clear();
                self.searching = false;
                self.update_visible();
            }
            KeyCode::Enter => {
                self.searching = false;
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.update_visible();
            }
            KeyCode::Char(c) => {
                self.filter.push(c);
                self.update_visible();
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0) as isize;
        let last = self.visible.len() as isize - 1;
        let next = (current + delta).clamp(0, last);
        self.list_state.select(Some(next as usize));
    }

    /// Opens the selected entry in the browser
    fn open_selected(&mut self) {
        let Some(entry_index) = self
            .list_state
            .selected()
            .and_then(|pos| self.visible.get(pos).copied())
        else {
            return;
        };

        let entry = &self.session.registry.all_entries()[entry_index];
        let launcher = self.session.launcher();

        self.status_message = Some(match launcher.open_url(entry.url()) {
            Ok(()) => format!("Opened: {}", entry.description()),
            Err(err) => format!("{err:#}"),
        });
    }

    /// Opens every visible entry, honoring the open-all cap
    fn open_visible(&mut self) {
        if self.visible.is_empty() {
            return;
        }

        let cap = self.session.config.browser.max_open_all;
        let entries = self.session.registry.all_entries();
        let urls: Vec<&str> = self
            .visible
            .iter()
            .take(cap)
            .map(|&i| entries[i].url())
            .collect();

        let report = self.session.launcher().open_all(urls);
        self.status_message = Some(format!(
            "Opened {} of {} links",
            report.opened,
            report.attempted()
        ));
    }

    /// Re-runs the scan over the session root
    fn rescan(&mut self) {
        let root = self.session.root.clone();
        let options = self.session.config.scan_options();

        self.status_message = Some(match self.session.registry.scan(&root, &options) {
            Ok(total) => {
                let skipped = self.session.registry.skipped().len();
                if skipped > 0 {
                    format!("Rescanned: {total} links ({skipped} files skipped)")
                } else {
                    format!("Rescanned: {total} links")
                }
            }
            Err(err) => format!("Rescan failed: {err}"),
        });

        self.update_visible();
    }

    /// Draw the UI
    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.draw_title(frame, chunks[0]);
        self.draw_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if self.show_help {
            self.draw_help(frame);
        } else if self.show_stats {
            self.draw_stats(frame);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let stats = self.session.registry.statistics();
        let title = Line::from(vec![
            Span::styled(" dokk ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "{} · {} links · {} files · {} domains",
                self.session.root.display(),
                stats.total_links,
                stats.total_files,
                stats.unique_domains
            )),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        let display = &self.session.config.display;
        let entries = self.session.registry.all_entries();

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&i| {
                let entry = &entries[i];
                let color = self.session.registry.color_of(entry.source_file());
                let style = match color {
                    Some(c) if display.colors => Style::default().fg(menu_color(c)),
                    _ => Style::default(),
                };

                let name = entry
                    .source_file()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();

                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:3}. ", i + 1)),
                    Span::styled(clip(entry.description(), display.max_description_length), style),
                    Span::styled(format!("  ({name})"), Style::default().add_modifier(Modifier::DIM)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::NONE))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if self.searching {
            Line::from(format!("/{}   (Enter keep, Esc clear)", self.filter))
        } else if let Some(message) = &self.status_message {
            Line::from(message.as_str())
        } else if !self.filter.is_empty() {
            Line::from(format!(
                "filter: '{}' ({} of {})   Esc clears",
                self.filter,
                self.visible.len(),
                self.session.registry.len()
            ))
        } else {
            Line::from("j/k move · Enter open · a open all · / search · r rescan · s stats · ? help · q quit")
        };

        frame.render_widget(
            Paragraph::new(line).style(Style::default().add_modifier(Modifier::DIM)),
            area,
        );
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = centered_rect(50, 12, frame.area());
        let text = vec![
            Line::from("j / k, arrows   move selection"),
            Line::from("g / G           first / last link"),
            Line::from("Enter, o        open selection in browser"),
            Line::from("a               open all shown links"),
            Line::from("/               filter by description"),
            Line::from("r               rescan the directory"),
            Line::from("s               per-file statistics"),
            Line::from("q, Esc          quit"),
        ];

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Keys ")),
            area,
        );
    }

    fn draw_stats(&self, frame: &mut Frame) {
        let area = centered_rect(60, 14, frame.area());
        let display = &self.session.config.display;

        let mut text = Vec::new();
        for (path, entries) in self.session.registry.entries_by_file() {
            let style = match self.session.registry.color_of(path) {
                Some(c) if display.colors => Style::default().fg(menu_color(c)),
                _ => Style::default(),
            };
            text.push(Line::from(vec![
                Span::styled(path.display().to_string(), style),
                Span::raw(format!(": {} links", entries.len())),
            ]));
        }
        if !self.session.registry.skipped().is_empty() {
            text.push(Line::from(""));
            text.push(Line::from(format!(
                "{} files skipped (see warnings on exit)",
                self.session.registry.skipped().len()
            )));
        }

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Files ")),
            area,
        );
    }
}

/// Maps a palette tag to a ratatui color
fn menu_color(color: FileColor) -> Color {
    match color {
        FileColor::Red => Color::Red,
        FileColor::Green => Color::Green,
        FileColor::Yellow => Color::Yellow,
        FileColor::Blue => Color::Blue,
        FileColor::Magenta => Color::Magenta,
        FileColor::Cyan => Color::Cyan,
        FileColor::White => Color::White,
    }
}

/// Centers a fixed-size rect inside `area`, clamped to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(50, 12, area);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 12);
        assert!(rect.x + rect.width <= area.width);
        assert!(rect.y + rect.height <= area.height);
    }

    #[test]
    fn centered_rect_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(50, 12, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }
}
