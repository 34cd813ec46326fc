pub mod shape;
pub mod status_bar;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::Frame;

use crate::app::App;
use shape::{CanvasPainter, Geometry};

/// Top-level draw function: canvas on top, status bar below
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Canvas
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_canvas(f, app, chunks[0]);
    status_bar::render(f, app, &app.theme, chunks[1]);
}

/// Braille canvas whose units are dots: 2 per column, 4 per row
fn render_canvas(f: &mut Frame, app: &App, area: Rect) {
    let width = f64::from(area.width) * 2.0;
    let height = f64::from(area.height) * 4.0;
    let geometry = Geometry::new(width, height, &app.config.shape);
    let theme = &app.theme;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(theme.background)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            let mut painter = CanvasPainter::new(ctx, &theme.palette, geometry);
            app.controller.chain().draw(&mut painter);
        });
    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::event::Event;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Color;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    fn render(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Cells above the status bar drawn in `color`
    fn canvas_cells(buffer: &Buffer, color: Color) -> usize {
        (0..19u16)
            .flat_map(|y| (0..60u16).map(move |x| (x, y)))
            .filter(|&pos| buffer[pos].fg == color)
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn idle_canvas_is_blank_background() {
        let (tx, _rx) = mpsc::unbounded_channel::<Event>();
        let app = App::new(Config::default(), tx);
        let buffer = render(&app);

        let red = app.theme.palette[0];
        assert_eq!(canvas_cells(&buffer, red), 0);
        assert_eq!(buffer[(0, 0)].bg, app.theme.background);

        let status: String = (0..60u16).map(|x| buffer[(x, 19)].symbol().to_string()).collect();
        assert!(status.contains("Animate"));
        assert!(status.contains("1/5"));
        assert!(status.contains("idle"));
    }

    #[tokio::test(start_paused = true)]
    async fn animating_node_is_drawn_in_its_color() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        let mut app = App::new(Config::default(), tx);
        app.tap();

        // Run to the widest frame (scale 0.5)
        while app.controller.chain().current().state().scale() < 0.5 {
            if let Some(Event::Tick(generation)) = rx.recv().await {
                app.handle_event(Event::Tick(generation));
            }
        }

        let buffer = render(&app);
        let red = app.theme.palette[0];
        assert!(canvas_cells(&buffer, red) > 10);

        let status: String = (0..60u16).map(|x| buffer[(x, 19)].symbol().to_string()).collect();
        assert!(status.contains("animating"));
    }
}
