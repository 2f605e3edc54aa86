use std::cell::Cell;
use std::io::stdout;
use std::rc::Rc;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dimscale_core::{Responsive, observe_breakpoint, observe_orientation};
use dimscale_protocol::Orientation;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::terminal::TerminalHost;

/// Sample inputs shown in the conversion table.
const SAMPLE_PERCENT: f64 = 50.0;
const SAMPLE_PX: f64 = 120.0;
const SAMPLE_FONT: f64 = 16.0;

fn orientation_color(orientation: Orientation) -> Color {
    match orientation {
        Orientation::Portrait => Color::Cyan,
        Orientation::Landscape => Color::Yellow,
    }
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<22}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

pub fn render_tui(responsive: &Responsive<TerminalHost>) -> Result<()> {
    let host = responsive.provider();
    let orientation = observe_orientation(host);
    let breakpoint = observe_breakpoint(host, responsive.config().breakpoints.clone());

    let flips = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&flips);
    let _flip_sub = orientation.subscribe(move |_| counter.set(counter.get() + 1));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        let metrics = responsive.metrics();
        let current = orientation.get();
        let category = breakpoint.get();

        let lines = vec![
            row(
                "viewport",
                format!(
                    "{:.0} x {:.0} @{:.2}x",
                    metrics.width, metrics.height, metrics.pixel_ratio
                ),
            ),
            Line::from(vec![
                Span::styled(format!(" {:<22}", "orientation"), Style::default().fg(Color::Gray)),
                Span::styled(
                    current.to_string(),
                    Style::default()
                        .fg(orientation_color(current))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({} flips)", flips.get()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            row("breakpoint", category.name.to_string()),
            row("tablet", responsive.is_tablet().to_string()),
            Line::default(),
            row(
                &format!("wp({SAMPLE_PERCENT})"),
                format!("{:.2}", responsive.wp(SAMPLE_PERCENT)),
            ),
            row(
                &format!("hp({SAMPLE_PERCENT})"),
                format!("{:.2}", responsive.hp(SAMPLE_PERCENT)),
            ),
            row(
                &format!("px_to_dp_width({SAMPLE_PX})"),
                format!("{:.2}", responsive.px_to_dp_width(SAMPLE_PX)),
            ),
            row(
                &format!("px_to_dp_height({SAMPLE_PX})"),
                format!("{:.2}", responsive.px_to_dp_height(SAMPLE_PX)),
            ),
            row(
                &format!("scale_font({SAMPLE_FONT})"),
                format!("{:.2}", responsive.scale_font(SAMPLE_FONT)),
            ),
        ];

        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " dimscale | resize the terminal | q quit | {} listener(s) ",
                    host.listener_count()
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            let panel = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(orientation_color(current)))
                    .style(Style::default().bg(Color::Black)),
            );
            frame.render_widget(panel, content_area);
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key)
                    if key.kind == KeyEventKind::Press
                        && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) =>
                {
                    break;
                }
                Event::Resize(columns, rows) => host.resized(columns, rows),
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
