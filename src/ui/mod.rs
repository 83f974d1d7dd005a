mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, PageState, Popup, GRID_COLUMNS};
use crate::theme::Theme;
use components::{centered_rect, hint_spans};

// Set once from config at startup; defaults if never set
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Info line
            Constraint::Min(8),     // Categories + names
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    // Narrow terminals get a thinner category column
    let list_width = if area.width < 80 { 24 } else { 32 };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(list_width), Constraint::Min(20)])
        .split(chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(body[1]);

    draw_info_line(f, app, chunks[0]);
    draw_categories(f, app, body[0]);
    draw_about(f, app, right[0]);
    draw_names_grid(f, app, right[1]);
    draw_footer(f, app, chunks[2]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Description => draw_description_popup(f, app),
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > loading > collection summary
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(accent())))
    } else if app.state == PageState::Loading {
        Line::from(Span::styled("Loading…", Style::default().fg(text_dim())))
    } else {
        match &app.collection {
            Some(collection) => Line::from(vec![
                Span::styled(
                    app.current_category().map(|c| c.title.as_str()).unwrap_or(""),
                    Style::default().fg(text()),
                ),
                Span::styled(" │ ", Style::default().fg(text_dim())),
                Span::styled(
                    format!("{} names", collection.len()),
                    Style::default().fg(text_dim()),
                ),
            ]),
            None => Line::from(Span::styled("No data available", Style::default().fg(danger()))),
        }
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_categories(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Categories ", Style::default().fg(inactive())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let items: Vec<ListItem> = app
        .catalog
        .categories()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let style = if i == app.selected_category {
                Style::default().fg(accent()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(text())
            };
            let marker = if i == app.selected_category { "▸ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(accent())),
                Span::styled(category.title.as_str(), style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn draw_about(f: &mut Frame, app: &App, area: Rect) {
    let (title, about) = match app.current_category() {
        Some(category) => (category.title.as_str(), category.about.as_str()),
        None => ("", ""),
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), Style::default().fg(header()).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let content = Paragraph::new(Span::styled(about, Style::default().fg(text_dim())))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(content, area);
}

fn draw_names_grid(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Names ", Style::default().fg(accent()).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));

    let placeholder = match (app.state, &app.collection) {
        (PageState::Loading, _) => Some(("Loading…", text_dim())),
        (PageState::Ready, None) => Some(("No data available", danger())),
        (PageState::Ready, Some(c)) if c.is_empty() => Some(("No data available", danger())),
        (PageState::Ready, Some(_)) if app.selection.is_empty() => {
            Some(("Press g to generate names", text_dim()))
        }
        _ => None,
    };

    if let Some((message, color)) = placeholder {
        let content = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(color))),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(content, area);
        return;
    }

    let rows: Vec<Row> = app
        .selection
        .chunks(GRID_COLUMNS)
        .enumerate()
        .map(|(row, entries)| {
            let cells: Vec<Cell> = entries
                .iter()
                .enumerate()
                .map(|(col, entry)| {
                    let index = row * GRID_COLUMNS + col;
                    let style = if index == app.cursor {
                        Style::default().bg(bg_selected()).fg(text()).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(text())
                    };
                    Cell::from(format!(" {}", entry.name)).style(style)
                })
                .collect();
            // Blank line between rows keeps the grid readable
            Row::new(cells).bottom_margin(1)
        })
        .collect();

    let widths = vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS];
    let table = Table::new(rows, widths).column_spacing(2).block(block);

    f.render_widget(table, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = if app.selection.is_empty() {
        vec![("g", "Generate"), ("Tab", "Category"), ("r", "Reload"), ("?", "Help"), ("q", "Quit")]
    } else {
        vec![
            ("g", "Generate"),
            ("←↓↑→", "Move"),
            ("Enter", "Describe"),
            ("Tab", "Category"),
            ("?", "Help"),
            ("q", "Quit"),
        ]
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 3 } else if area.width < 80 { 4 } else { hints.len() };

    let footer = Paragraph::new(Line::from(hint_spans(&hints[..max_hints.min(hints.len())])))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_description_popup(f: &mut Frame, app: &App) {
    let Some(view) = &app.description else {
        return;
    };

    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 90 } else { 60 },
        if area.height < 30 { 60 } else { 40 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(view.body.as_str(), Style::default().fg(text()))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(
                format!(" {} ", view.title),
                Style::default().fg(header()).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent())),
    )
    .wrap(Wrap { trim: false });

    f.render_widget(body, popup_area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 90 } else { 60 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let heading = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };
    let binding = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(accent())),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        heading("═══ Names ═══"),
        binding("g/Space", "Generate a fresh set of names"),
        binding("←↓↑→ hjkl", "Move around the grid"),
        binding("Enter", "Show the highlighted name's description"),
        Line::from(""),
        heading("═══ Categories ═══"),
        binding("Tab", "Next category"),
        binding("Shift-Tab", "Previous category"),
        binding("r", "Reload the current category"),
        Line::from(""),
        heading("═══ Command Line ═══"),
        binding("--list", "Show available categories"),
        binding("--generate", "Print names for -c CATEGORY (add --json)"),
        binding("--describe", "Print the description of a name"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" namedeck Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, NameCollection, NameEntry};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loading_placeholder() {
        let app = App::new(Catalog::bundled(), 10, Some(1));
        let screen = render(&app);
        assert!(screen.contains("Loading…"));
        assert!(screen.contains("Beyblade Names"));
    }

    #[test]
    fn test_grid_and_popup_render() {
        let mut app = App::new(Catalog::bundled(), 10, Some(1));
        app.state = PageState::Ready;
        app.collection = Some(NameCollection::new(
            "beybladeNames",
            vec![NameEntry::new("Storm Pegasis", "Rides the rim")],
        ));
        app.generate();

        let screen = render(&app);
        assert!(screen.contains("Storm Pegasis"));

        app.open_description();
        let screen = render(&app);
        assert!(screen.contains("Rides the rim"));
    }

    #[test]
    fn test_no_data_message() {
        let mut app = App::new(Catalog::bundled(), 10, Some(1));
        app.state = PageState::Ready;
        let screen = render(&app);
        assert!(screen.contains("No data available"));
    }
}
