pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use keydrill::drill::Mark;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::EditText => render_edit_text(self, area, buf),
            AppState::Typing => render_typing(self, area, buf),
            AppState::Results => render_results(self, area, buf),
        }
    }
}

/// Onboarding / edit screen: prompts for a new practice text.
fn render_edit_text(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(area.height.saturating_sub(5) / 2),
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Length(1), // input buffer
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Span::styled("enter a practice text", bold_style))
        .alignment(Alignment::Center);
    title.render(chunks[1], buf);

    let buffer_line = Paragraph::new(Line::from(vec![
        Span::styled(app.edit_buffer.clone(), bold_style),
        Span::styled("█", Style::default().add_modifier(Modifier::DIM)),
    ]))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: false });
    buffer_line.render(chunks[3], buf);

    let legend = Paragraph::new(Span::styled(
        "(enter) save & start / (esc)ape",
        italic_style,
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[5], buf);
}

/// Active test screen: the target text colored per correctness mark, the
/// input field, and the once-a-second live readout.
fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let drill = &app.drill;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let mut prompt_occupied_lines =
        ((drill.target.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;

    if drill.target.width() <= max_chars_per_line as usize {
        prompt_occupied_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(
                    (area.height.saturating_sub(prompt_occupied_lines + 4) as f64 / 2.0) as u16,
                ),
                Constraint::Length(2), // live metrics
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(1), // padding
                Constraint::Length(1), // input field
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    if drill.has_started() {
        let live = Paragraph::new(Span::styled(
            format!(
                "{:.0}s   {:.2} wpm   {:.2} raw",
                app.live.elapsed_secs, app.live.wpm, app.live.raw_wpm
            ),
            dim_bold_style,
        ))
        .alignment(Alignment::Center);

        live.render(chunks[1], buf);
    }

    let cursor_idx = drill.base_position() + app.field.chars().count();

    let spans = drill
        .target_chars()
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let mut style = match drill.marks[idx] {
                Mark::Correct => green_bold_style,
                Mark::Incorrect => red_bold_style,
                Mark::Unmarked => dim_bold_style,
            };

            if idx == cursor_idx {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            // A mistyped space would be invisible; show a dot like the
            // usual typing-tui convention
            let symbol = match (c, drill.marks[idx]) {
                (' ', Mark::Incorrect) => "·".to_owned(),
                (c, _) => c.to_string(),
            };

            Span::styled(symbol, style)
        })
        .collect::<Vec<Span>>();

    let prompt = Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            // when the prompt is small enough to fit on one line
            // centering the text gives a nice zen feeling
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });

    prompt.render(chunks[2], buf);

    let field = Paragraph::new(Line::from(vec![
        Span::styled("> ", dim_bold_style),
        Span::styled(app.field.clone(), bold_style),
    ]))
    .alignment(Alignment::Center);

    field.render(chunks[4], buf);
}

/// End-of-session screen: per-word WPM chart, summary line, key legend.
fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let drill = &app.drill;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().fg(Color::Magenta);
    let cyan_style = Style::default().fg(Color::Cyan);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),    // chart
                Constraint::Length(1), // stats
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    let samples = drill.history.samples();
    let (overall_words, highest_wpm) = charting::compute_chart_params(samples);

    let wpm_points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| ((i + 1) as f64, s.wpm))
        .collect();
    let raw_points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| ((i + 1) as f64, s.raw_wpm))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("raw")
            .marker(ratatui::symbols::Marker::Braille)
            .style(cyan_style)
            .graph_type(GraphType::Line)
            .data(&raw_points),
        Dataset::default()
            .name("wpm")
            .marker(ratatui::symbols::Marker::Braille)
            .style(magenta_style)
            .graph_type(GraphType::Line)
            .data(&wpm_points),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("words")
                .bounds([1.0, overall_words])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(charting::format_label(overall_words), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        );

    chart.render(chunks[0], buf);

    if let Some(summary) = drill.summary {
        let stats = Paragraph::new(Span::styled(
            format!(
                "{:.2} wpm   {:.2} raw   {:.2}% acc",
                summary.wpm, summary.raw_wpm, summary.accuracy
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);

        stats.render(chunks[1], buf);
    }

    let legend = Paragraph::new(Span::styled(
        "(r)etry / (e)dit text / (esc)ape",
        italic_style,
    ));

    legend.render(chunks[3], buf);
}
