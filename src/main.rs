use std::{cell::RefCell, io, rc::Rc};

use cookie_clicker::actions::upgrade_key;
use cookie_clicker::format::{format_balance, format_duration, format_number, format_rate};
use cookie_clicker::{
    Engine, GameConfig, Panel, PersistentStore, Session, Snapshot, SystemClock, TickClock,
};
use ratzilla::event::KeyCode;
use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratzilla::ratatui::{Frame, Terminal};
use ratzilla::{DomBackend, WebRenderer};

#[cfg(target_arch = "wasm32")]
type Backend = cookie_clicker::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
type Backend = cookie_clicker::MemoryStorage;

/// Session plus the frame clock that paces production ticks.
struct Ui {
    session: Session<Backend, SystemClock>,
    ticks: TickClock,
}

impl Ui {
    fn new(config: &GameConfig) -> Self {
        let store = PersistentStore::new(Backend::new(), config.storage_key.clone());
        Self {
            session: Session::new(Engine::load(store, SystemClock)),
            ticks: TickClock::new(config.tick_interval_ms, config.max_catch_up_ms),
        }
    }

    /// Run the ticks owed since the last frame.
    fn advance(&mut self, now_ms: f64) {
        for _ in 0..self.ticks.update(now_ms) {
            self.session.engine.tick();
        }
    }
}

fn performance_now() -> Option<f64> {
    Some(web_sys::window()?.performance()?.now())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    cookie_clicker::logging::init_browser(tracing::Level::INFO);

    let config = GameConfig::default();
    let ui = Rc::new(RefCell::new(Ui::new(&config)));
    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let ui = ui.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                ui.borrow_mut().session.handle_key(c);
            }
        }
    })?;

    terminal.draw_web(move |f| {
        let mut ui = ui.borrow_mut();
        if let Some(now) = performance_now() {
            ui.advance(now);
        }
        let snap = ui.session.engine.snapshot();
        render(f, &ui.session, &snap);
    });

    Ok(())
}

fn render(f: &mut Frame, ui: &Session<Backend, SystemClock>, snap: &Snapshot) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_counter(f, snap, main_chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);
    if ui.panel == Panel::Upgrades {
        render_upgrades(f, snap, content[0]);
    } else {
        render_producers(f, snap, content[0]);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(15), Constraint::Min(3)])
        .split(content[1]);
    render_stats(f, snap, right[0]);
    render_log(f, ui, right[1]);

    render_help(f, ui, main_chunks[2]);
}

fn render_counter(f: &mut Frame, snap: &Snapshot, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            format!("{} Cookies", format_balance(snap.balance)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Building Output: {} /s   Per click: {}",
                format_rate(snap.total_output),
                format_number(snap.click_value)
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let counter = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Cookie Clicker "),
        )
        .alignment(Alignment::Center);
    f.render_widget(counter, area);
}

fn render_producers(f: &mut Frame, snap: &Snapshot, area: Rect) {
    let items: Vec<ListItem> = snap
        .producers
        .iter()
        .map(|p| {
            let price_style = if p.affordable {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let payback = p
                .payback_seconds
                .map(|s| format!(" ⏱{}", format_duration(s)))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" [{}] ", p.kind.key()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:<13}", p.kind.name()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(format!("{:>16}", format_number(p.price)), price_style),
                Span::styled(
                    format!(
                        "  x{:<4} {}/s (each {}){}",
                        p.count,
                        format_rate(p.rate),
                        format_rate(p.each_rate),
                        payback
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Buildings "),
    );
    f.render_widget(list, area);
}

fn render_upgrades(f: &mut Frame, snap: &Snapshot, area: Rect) {
    let items: Vec<ListItem> = snap
        .upgrades
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let key = upgrade_key(i);
            let (status, style) = if u.purchased {
                ("bought".to_string(), Style::default().fg(Color::DarkGray))
            } else if u.affordable {
                (format_number(u.price), Style::default().fg(Color::Green))
            } else {
                (format_number(u.price), Style::default().fg(Color::Gray))
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" [{}] ", key.to_ascii_uppercase()),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:<18}", u.id.name()), Style::default().fg(Color::White)),
                Span::styled(format!("{:>16}  ", status), style),
                Span::styled(u.id.description(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Upgrades "),
    );
    f.render_widget(list, area);
}

fn render_stats(f: &mut Frame, snap: &Snapshot, area: Rect) {
    let lines: Vec<Line> = snap
        .stats_lines()
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            // Per-building counts follow the five totals.
            let style = if i < 5 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(text, style))
        })
        .collect();
    let stats = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Stats "),
    );
    f.render_widget(stats, area);
}

fn render_log(f: &mut Frame, ui: &Session<Backend, SystemClock>, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = ui.log.len().saturating_sub(visible_height);

    let log_lines: Vec<Line> = ui.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let log_widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(log_widget, area);
}

fn render_help(f: &mut Frame, ui: &Session<Backend, SystemClock>, area: Rect) {
    let help_text = if ui.confirm_reset {
        "[Y] confirm reset   any other key: cancel"
    } else if ui.panel == Panel::Upgrades {
        "[Space] click  [A-I] buy upgrade  [U] buildings  [S] save  [R] reset"
    } else {
        "[C] click  [1-8] buy building  [U] upgrades  [S] save  [R] reset"
    };
    let help = Paragraph::new(Line::from(Span::styled(
        help_text,
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}
