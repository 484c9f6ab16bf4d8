//! Reference presentation layer: a single-page terminal view over the page
//! reader. It observes the reader's state through its accessors each frame
//! and drives navigation through the runtime-blocking wrappers, which keeps
//! all reader mutation on this thread (the owner context).

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tokio::runtime::Runtime;

use crate::models::VerseEntry;
use crate::reader::PageReader;

/// Footer space reserved for key hints.
const FOOTER_HEIGHT: u16 = 3;
/// Header space showing the page position and active translation.
const HEADER_HEIGHT: u16 = 3;

/// Terminal front end state: the reader plus the runtime its async
/// navigation calls block on.
pub struct App {
    reader: PageReader,
    runtime: Runtime,
}

impl App {
    /// Wrap an initialized reader for the draw loop.
    pub fn new(reader: PageReader, runtime: Runtime) -> Self {
        Self { reader, runtime }
    }

    /// Handle a key press; returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Right | KeyCode::Char('l') => {
                self.go_to_page(self.reader.current_page_number() + 1);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.go_to_page(self.reader.current_page_number() - 1);
            }
            KeyCode::Char('t') => {
                let enabled = !self.reader.show_translation();
                self.reader.set_show_translation(enabled);
            }
            KeyCode::Char('+') => {
                let size = self.reader.text_size() + 1;
                self.reader.set_text_size(size);
            }
            KeyCode::Char('-') => {
                let size = self.reader.text_size().saturating_sub(1);
                self.reader.set_text_size(size);
            }
            KeyCode::Char('r') => {
                if let Some(index) = self.reader.current_index() {
                    self.runtime.block_on(self.reader.load_page(index, true));
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn go_to_page(&mut self, page_number: i32) {
        self.runtime
            .block_on(self.reader.set_current_page(page_number));
    }

    /// Render the header, the current page, and the footer hints.
    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        let book = self.reader.book();
        let header = Paragraph::new(format!(
            "Page {} of {}..{}   translation: {}",
            self.reader.current_page_number(),
            book.first_page,
            book.last_page,
            self.reader.registry().active_id().unwrap_or("none"),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let body = Paragraph::new(self.page_lines())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(body, chunks[1]);

        let footer = Paragraph::new("←/→ page  t translation  +/- text size  r reload  q quit")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn page_lines(&self) -> Vec<Line<'static>> {
        let Some(page) = self.reader.current_page() else {
            return vec![Line::from("No page selected")];
        };

        let mut lines = Vec::new();
        match &page.image_ref {
            Some(path) => lines.push(Line::from(format!("[image: {}]", path.display()))),
            None => lines.push(Line::from("[no page image]")),
        }
        lines.push(Line::from(""));

        if !page.show_translation {
            lines.push(Line::from("Translation hidden (press t to show)"));
            return lines;
        }
        if page.verses.is_empty() {
            lines.push(Line::from("No translation content for this page"));
            return lines;
        }

        for entry in &page.verses {
            match entry {
                VerseEntry::Title { text } => {
                    lines.push(Line::styled(
                        text.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                }
                VerseEntry::Verse {
                    chapter,
                    number,
                    text,
                    source_text,
                } => {
                    if let Some(source) = source_text {
                        lines.push(Line::from(source.clone()));
                    }
                    lines.push(Line::from(format!("{chapter}:{number}  {text}")));
                }
            }
        }
        lines
    }
}
