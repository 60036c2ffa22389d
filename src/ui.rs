use std::{io, sync::Arc, time::{Duration, Instant}};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};

use tracing::error;

use crate::app::App;
use crate::constants::CHART_TITLE;
use crate::error::{FeedError, Result};
use crate::sample::to_local;
use crate::sink::RollingSink;
use crate::util::{format_clock, format_count, format_value};

pub fn run(sink: Arc<RollingSink>, redraw: Duration) -> io::Result<()> {
    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(sink);
    let res = run_app_loop(&mut terminal, app, redraw);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Combines the chart's exit status with the producer's. A terminal error
/// wins; a producer failure behind it is still logged.
pub fn settle(ui: io::Result<()>, producer: Result<u64>) -> Result<u64> {
    if let Err(err) = ui {
        if let Err(producer_err) = &producer {
            error!(%producer_err, "producer failed");
        }
        return Err(FeedError::Io(err));
    }
    producer
}

fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    redraw: Duration,
) -> io::Result<()> {
    app.on_tick();
    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Handle input
        let timeout = redraw
            .checked_sub(app.last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c') | KeyCode::Esc) {
                    return Ok(());
                }
            }
        }
        if app.last_tick.elapsed() >= redraw {
            app.on_tick();
            app.last_tick = Instant::now();
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    // ============= whole screen layout ============
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Min(10),   // Chart + side panel
            Constraint::Length(1), // Bottom Status Bar
        ].as_ref())
        .split(f.size());

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
        .split(main_chunks[0]);

    // ============= Live Chart ============
    let x_bounds = app.x_bounds();
    let dataset = Dataset::default()
        .name("value")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&app.points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(CHART_TITLE)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(vec![
                    Span::raw(format_clock(&to_local(x_bounds[0]))),
                    Span::raw(format_clock(&to_local(x_bounds[1]))),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Value")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 1.0])
                .labels(vec![Span::raw("0.0"), Span::raw("0.5"), Span::raw("1.0")]),
        );
    f.render_widget(chart, body_chunks[0]);

    // ============= Side Panel ============
    let latest = app.latest.map(|s| format_value(s.value)).unwrap_or_else(|| "-".to_string());
    let label = Style::default().fg(Color::DarkGray);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let kept = format!("{}/{}", app.points.len(), app.sink.capacity());
    let stats_text = vec![
        Line::from(vec![Span::raw("● "), Span::styled(latest, bold.fg(Color::White))]),
        Line::from(vec![Span::styled("  Min:  ", label), Span::raw(format_value(app.window_min))]),
        Line::from(vec![Span::styled("  Max:  ", label), Span::raw(format_value(app.window_max))]),
        Line::from(vec![Span::styled("  Mean: ", label), Span::raw(format_value(app.window_mean))]),
        Line::from(""),
        Line::from(vec![Span::styled("  Kept: ", label), Span::raw(kept)]),
        Line::from(vec![Span::styled("  Sent: ", label), Span::raw(format_count(app.published))]),
        Line::from(vec![Span::styled("  Drop: ", label), Span::raw(format_count(app.evicted))]),
    ];
    let panel = Paragraph::new(stats_text).block(
        Block::default()
            .title(" Window ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(panel, body_chunks[1]);

    // ============ Bottom Status Bar ============
    let status_content = Line::from(vec![
        Span::styled(" PEAK ", bold.bg(Color::White).fg(Color::Black)),
        Span::raw(" "),
        Span::styled(format_value(app.peak_record.0), bold.fg(Color::Cyan)),
        Span::styled(format!(" (@{})", format_clock(&app.peak_record.1)), label),
        Span::raw(" | Press 'q' to quit"),
    ]);
    let status_bar = Paragraph::new(status_content)
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(status_bar, main_chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;
    use crate::sink::SampleSink;
    use ratatui::backend::TestBackend;

    fn rendered_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn chart_shows_title_and_axes() {
        let sink = Arc::new(RollingSink::new(200).unwrap());
        for i in 0..10 {
            sink.publish(Sample::new(1_700_000_000.0 + f64::from(i), f64::from(i) / 10.0));
        }
        let mut app = App::new(sink);
        app.on_tick();

        let text = rendered_text(&app);
        assert!(text.contains("Real-time Data Streaming"));
        assert!(text.contains("Time"));
        assert!(text.contains("Value"));
        assert!(text.contains("10/200"));
        assert!(text.contains("Press 'q' to quit"));
    }

    #[test]
    fn settle_reports_terminal_error_before_producer_failure() {
        let ui: io::Result<()> = Err(io::Error::new(io::ErrorKind::Other, "tty gone"));
        let res = settle(ui, Err(FeedError::ProducerPanicked));
        assert!(matches!(res, Err(FeedError::Io(err)) if err.to_string() == "tty gone"));

        let res = settle(Ok(()), Err(FeedError::ProducerPanicked));
        assert!(matches!(res, Err(FeedError::ProducerPanicked)));
        assert_eq!(settle(Ok(()), Ok(7)).unwrap(), 7);
    }

    #[test]
    fn empty_sink_still_renders() {
        let mut app = App::new(Arc::new(RollingSink::new(3).unwrap()));
        app.on_tick();
        let text = rendered_text(&app);
        assert!(text.contains("0/3"));
    }
}
