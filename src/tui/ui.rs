use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, Wrap,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::conversation::{Message, MessageKind};
use crate::core::locale::Strings;
use crate::core::state::App;
use crate::core::status::StatusSlot;
use crate::tui::TuiState;

const SIDEBAR_WIDTH: u16 = 36;
const STATUS_HEIGHT: u16 = 7;
const INPUT_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let strings = app.strings();
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .areas(frame.area());

    let [app_title_area, status_area, examples_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(STATUS_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(sidebar);

    let title = Span::styled(
        format!(" {}", strings.app_title),
        Style::default().add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, app_title_area);
    draw_status(frame, status_area, app.status.slot(), strings);
    draw_examples(frame, examples_area, app.examples.examples(), tui, strings);

    let [title_area, transcript_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(INPUT_HEIGHT),
    ])
    .areas(main);

    draw_title_bar(frame, title_area, strings);
    let transcript = app.conversation.transcript();
    if transcript.is_empty() && !app.conversation.is_sending() {
        draw_welcome(frame, transcript_area, strings);
    } else {
        draw_transcript(
            frame,
            transcript_area,
            transcript,
            app.conversation.is_sending(),
            tui,
            strings,
        );
    }
    draw_input(
        frame,
        input_area,
        app.conversation.input(),
        app.conversation.is_sending(),
        strings,
    );
}

fn draw_status(frame: &mut Frame, area: Rect, slot: &StatusSlot, strings: &Strings) {
    let block = Block::bordered().title(strings.server_status_title);
    let paragraph = match slot {
        StatusSlot::Unknown => Paragraph::new(Span::styled(
            strings.loading,
            Style::default().fg(Color::DarkGray),
        ))
        .block(block),
        StatusSlot::Known(status) => {
            let color = if status.is_ok() { Color::Green } else { Color::Red };
            let state = if status.is_ok() { "ok" } else { "error" };
            let mut lines = vec![
                labelled(strings.status_label, state),
                labelled(strings.message_label, &status.message),
            ];
            if let Some(agent_id) = &status.agent_id {
                lines.push(labelled(strings.agent_id_label, agent_id));
                lines.push(labelled(
                    strings.region_label,
                    status.region.as_deref().unwrap_or("-"),
                ));
            }
            Paragraph::new(lines)
                .block(block.border_style(Style::default().fg(color)))
                .wrap(Wrap { trim: true })
        }
    };
    frame.render_widget(paragraph, area);
}

fn labelled<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value),
    ])
}

fn draw_examples(
    frame: &mut Frame,
    area: Rect,
    examples: &[String],
    tui: &TuiState,
    strings: &Strings,
) {
    let block = Block::bordered()
        .title(strings.examples_title)
        .title_bottom(
            Line::from(strings.examples_hint).style(Style::default().fg(Color::DarkGray)),
        );
    let items: Vec<ListItem> = examples
        .iter()
        .map(|example| ListItem::new(example.as_str()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !examples.is_empty() {
        state.select(Some(tui.selected_example.min(examples.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_title_bar(frame: &mut Frame, area: Rect, strings: &Strings) {
    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(strings.clear_hint.width() as u16 + 1),
    ])
    .areas(area);
    frame.render_widget(
        Span::styled(
            format!(" {}", strings.chat_title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        left,
    );
    frame.render_widget(
        Span::styled(strings.clear_hint, Style::default().fg(Color::DarkGray)),
        right,
    );
}

fn draw_welcome(frame: &mut Frame, area: Rect, strings: &Strings) {
    let lines = vec![
        Line::from(Span::styled(
            strings.welcome_title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            strings.welcome_body,
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        center,
    );
}

fn format_label<'a>(kind: MessageKind, strings: &'a Strings) -> &'a str {
    match kind {
        MessageKind::User => strings.user_label,
        MessageKind::Agent => strings.agent_label,
        MessageKind::Error => strings.error_label,
    }
}

fn get_kind_style(kind: MessageKind) -> Style {
    match kind {
        MessageKind::User => Style::default().fg(Color::Cyan),
        MessageKind::Agent => Style::default().fg(Color::Green),
        MessageKind::Error => Style::default().fg(Color::Red),
    }
}

/// One transcript entry. Border and body are drawn separately so an entry cut
/// by the viewport edge keeps only the borders that are actually on screen.
struct Entry<'a> {
    body: Paragraph<'a>,
    title: Option<&'a str>,
    title_alignment: Alignment,
    title_style: Style,
    border_style: Style,
}

impl<'a> Entry<'a> {
    fn message(message: &'a Message, strings: &'a Strings) -> Self {
        let style = get_kind_style(message.kind);
        let title_alignment = match message.kind {
            MessageKind::User => Alignment::Right,
            MessageKind::Agent | MessageKind::Error => Alignment::Left,
        };
        Self {
            body: Paragraph::new(message.content.as_str())
                .style(style)
                .wrap(Wrap { trim: false }),
            title: Some(format_label(message.kind, strings)),
            title_alignment,
            title_style: style,
            border_style: style.add_modifier(Modifier::DIM),
        }
    }

    fn thinking(strings: &'a Strings) -> Self {
        Self {
            body: Paragraph::new(Span::styled(
                strings.thinking,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
            title: None,
            title_alignment: Alignment::Left,
            title_style: Style::default(),
            border_style: Style::default().fg(Color::DarkGray),
        }
    }

    /// Rows the entry takes at `width`, borders included.
    fn height(&self, width: u16) -> usize {
        self.body.line_count(width.saturating_sub(2)) + 2
    }

    /// Draws rows `skip..skip + area.height` of an entry `height` rows tall.
    fn render_rows(self, frame: &mut Frame, area: Rect, skip: usize, height: usize) {
        let mut borders = Borders::LEFT | Borders::RIGHT;
        let mut block = Block::new().border_style(self.border_style);
        if skip == 0 {
            borders |= Borders::TOP;
            if let Some(title) = self.title {
                block = block
                    .title(title)
                    .title_alignment(self.title_alignment)
                    .title_style(self.title_style);
            }
        }
        if skip + usize::from(area.height) >= height {
            borders |= Borders::BOTTOM;
        }
        let block = block.borders(borders);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Paragraph scroll is u16; rows past that stay out of reach
        let body_skip = u16::try_from(skip.saturating_sub(1)).unwrap_or(u16::MAX);
        frame.render_widget(self.body.scroll((body_skip, 0)), inner);
    }
}

/// Draws only the rows inside the viewport, so frame cost and memory stay
/// bounded by the terminal size however long the transcript grows.
fn draw_transcript(
    frame: &mut Frame,
    area: Rect,
    transcript: &[Message],
    sending: bool,
    tui: &mut TuiState,
    strings: &Strings,
) {
    // Leave a column for the scrollbar
    let content_width = area.width.saturating_sub(1);

    let mut entries: Vec<Entry> = transcript
        .iter()
        .map(|message| Entry::message(message, strings))
        .collect();
    if sending {
        entries.push(Entry::thinking(strings));
    }

    let heights: Vec<usize> = entries.iter().map(|e| e.height(content_width)).collect();
    let total_height: usize = heights.iter().sum();
    let viewport = usize::from(area.height);
    let max_offset = total_height.saturating_sub(viewport);

    tui.viewport_height = area.height;
    if tui.stick_to_bottom || tui.scroll_offset >= max_offset {
        tui.scroll_offset = max_offset;
        tui.stick_to_bottom = true;
    }
    let window_start = tui.scroll_offset;
    let window_end = window_start + viewport;

    let mut top = 0usize;
    for (entry, height) in entries.into_iter().zip(heights) {
        let bottom = top + height;
        if bottom > window_start {
            let first = top.max(window_start);
            let last = bottom.min(window_end);
            // Both spans are within the viewport, which fits in u16
            let rect = Rect::new(
                area.x,
                area.y + (first - window_start) as u16,
                content_width,
                (last - first) as u16,
            );
            entry.render_rows(frame, rect, first - top, height);
        }
        if bottom >= window_end {
            break;
        }
        top = bottom;
    }

    if max_offset > 0 {
        // ScrollbarState content_length is max scrollable position, not total rows
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_offset)
            .position(tui.scroll_offset);
        let scrollbar_area = Rect {
            x: area.x + content_width,
            y: area.y,
            width: 1,
            height: area.height,
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

fn draw_input(frame: &mut Frame, area: Rect, input: &str, sending: bool, strings: &Strings) {
    let block = if sending {
        Block::bordered()
            .title(strings.sending)
            .border_style(Style::default().fg(Color::DarkGray))
    } else {
        Block::bordered().title("Enter ⏎")
    };
    let inner_width = area.width.saturating_sub(2) as usize;

    if input.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            strings.placeholder,
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        if !sending {
            frame.set_cursor_position((area.x + 1, area.y + 1));
        }
        return;
    }

    let visible = visible_tail(input, inner_width.saturating_sub(1));
    let style = if sending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(visible).style(style).block(block), area);
    if !sending {
        let x = area.x + 1 + visible.width() as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// The longest suffix of `text` (newlines flattened away) that fits in `width` columns.
fn visible_tail(text: &str, width: usize) -> &str {
    let text = text.rsplit('\n').next().unwrap_or(text);
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}
