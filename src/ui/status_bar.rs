use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::ui::theme::Theme;

const KEY_HINTS: &[(&str, &str)] = &[("Space/Click", "Animate"), ("q", "Quit")];

/// Render the bottom status bar with key hints and chain status
pub fn render(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left: keybindings
    let key_spans: Vec<Span> = KEY_HINTS
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), theme.help_key),
                Span::styled(format!("{} ", desc), theme.help_desc),
                Span::styled("│", theme.status_bar),
            ]
        })
        .collect();
    let help = Paragraph::new(Line::from(key_spans)).style(theme.status_bar);
    f.render_widget(help, chunks[0]);

    // Right: chain status
    let status = Paragraph::new(status_line(app, theme))
        .style(theme.status_bar)
        .alignment(Alignment::Right);
    f.render_widget(status, chunks[1]);
}

fn status_line<'a>(app: &App, theme: &Theme) -> Line<'a> {
    let chain = app.controller.chain();
    let node = chain.current();
    let state = if app.controller.is_animating() {
        "animating"
    } else {
        "idle"
    };
    Line::from(vec![
        Span::styled(
            format!(" ■ {}/{} ", node.index() + 1, chain.len()),
            theme.node_style(node.index()),
        ),
        Span::styled(format!("{} ", chain.direction().arrow()), theme.help_key),
        Span::styled(
            format!("scale {:.2} ", node.state().scale()),
            theme.status_bar,
        ),
        Span::styled(format!("{} ", state), theme.help_desc),
    ])
}
