// Player profile popup: header, bio facts, game stats, measurements, scout
// ranks, and this session's scouting reports.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use hoopscout_core::profile::{PlayerProfile, NO_GAME_LOGS, PLAYER_NOT_FOUND};
use hoopscout_core::records::PlayerId;
use hoopscout_core::reports::ScoutingReport;
use hoopscout_core::roster::MISSING_CELL;

use crate::tui::layout::centered_percent;
use crate::tui::ViewState;

pub const NO_REPORTS: &str = "No reports yet.";

/// Render the profile popup for `id` over `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, id: PlayerId) {
    let popup = centered_percent(90, 90, area);
    frame.render_widget(Clear, popup);

    let (title, lines) = match state.profiles.get(&id) {
        Some(profile) => (
            format!(" {} ", profile.name),
            profile_lines(profile, state.reports.reports_for(id)),
        ),
        None => (" Profile ".to_string(), vec![Line::from(PLAYER_NOT_FOUND)]),
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.profile_scroll, 0))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, popup);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn labeled(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), Style::default().fg(Color::Gray)),
        Span::raw(value.to_string()),
    ])
}

/// All popup lines for one profile.
pub fn profile_lines(profile: &PlayerProfile, reports: &[ScoutingReport]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    // Header
    let rank_style = if profile.avg_rank.is_unknown() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(profile.avg_rank_line(), rank_style)));
    if let Some(team) = profile.team_line() {
        lines.push(Line::from(team));
    }
    lines.push(Line::from(Span::styled(
        format!("Photo: {}", profile.photo_label()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::default());

    // Bio
    lines.push(heading("Bio"));
    for fact in &profile.facts {
        lines.push(labeled(fact.label, fact.value.as_deref().unwrap_or(MISSING_CELL)));
    }
    lines.push(Line::default());

    // Game stats
    lines.push(heading("Game Stats"));
    if profile.has_game_logs() {
        let mut header = format!("  {:<10}", "");
        let mut totals = format!("  {:<10}", "Total");
        let mut averages = format!("  {:<10}", "Per game");
        for row in &profile.stat_rows {
            header.push_str(&format!("{:>7}", row.label));
            totals.push_str(&format!("{:>7}", row.total));
            averages.push_str(&format!("{:>7.1}", row.average));
        }
        lines.push(Line::from(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(totals));
        lines.push(Line::from(averages));
        let summary = profile
            .summary_lines()
            .into_iter()
            .map(|(label, value)| format!("{label} {value}"))
            .collect::<Vec<_>>()
            .join(" | ");
        lines.push(Line::from(format!("  {summary}")));
    } else {
        lines.push(Line::from(format!("  {NO_GAME_LOGS}")));
    }
    lines.push(Line::default());

    // Measurements
    if let Some(measurements) = &profile.measurements {
        lines.push(heading("Measurements"));
        for row in measurements {
            let value = row
                .value
                .map(|v| format!("{v}"))
                .unwrap_or_else(|| MISSING_CELL.to_string());
            lines.push(labeled(&row.label, &value));
        }
        lines.push(Line::default());
    }

    // Scout ranks
    if !profile.scout_ranks.is_empty() {
        lines.push(heading("Scout Rankings"));
        for (scout, rank) in &profile.scout_ranks {
            let value = rank
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| MISSING_CELL.to_string());
            lines.push(labeled(scout, &value));
        }
        lines.push(Line::default());
    }

    // Reports
    lines.push(heading("Scouting Reports"));
    if reports.is_empty() {
        lines.push(Line::from(format!("  {NO_REPORTS}")));
    }
    for report in reports {
        lines.push(Line::from(Span::styled(
            format!(
                "  {} ({})",
                report.author,
                report.created_at.format("%Y-%m-%d %H:%M")
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (label, text) in [
            ("Pros", &report.pros),
            ("Cons", &report.cons),
            ("Notes", &report.notes),
        ] {
            if !text.is_empty() {
                lines.push(labeled(label, text));
            }
        }
    }

    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::{buffer_lines, test_state};
    use chrono::Local;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn all_text(lines: &[Line]) -> String {
        lines.iter().map(line_text).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn ranked_player_with_logs() {
        let state = test_state();
        let profile = &state.profiles[&PlayerId(1)];
        let text = all_text(&profile_lines(profile, &[]));
        assert!(text.contains("Avg. Scout Rank: 2.0"));
        assert!(text.contains("Duke"));
        assert!(text.contains("PTS"));
        assert!(text.contains("Games 1"));
        assert!(text.contains("ESPN Rank: 1.0"));
        assert!(text.contains(NO_REPORTS));
        // No measurement record, no section.
        assert!(!text.contains("Measurements"));
    }

    #[test]
    fn empty_player_shows_placeholders() {
        let state = test_state();
        let profile = &state.profiles[&PlayerId(3)];
        let text = all_text(&profile_lines(profile, &[]));
        assert!(text.contains("Avg. Scout Rank: ??"));
        assert!(text.contains(NO_GAME_LOGS));
        assert!(!text.contains("Scout Rankings"));
    }

    #[test]
    fn reports_listed() {
        let mut state = test_state();
        state.draft_mut(PlayerId(1)).author.push_str("Jane");
        state.draft_mut(PlayerId(1)).cons.push_str("Free throws");
        state.submit_report(PlayerId(1), Local::now()).unwrap();

        let profile = &state.profiles[&PlayerId(1)];
        let text = all_text(&profile_lines(profile, state.reports.reports_for(PlayerId(1))));
        assert!(text.contains("Jane ("));
        assert!(text.contains("Cons: Free throws"));
        assert!(!text.contains("Pros:"));
        assert!(!text.contains(NO_REPORTS));
    }

    #[test]
    fn unknown_player_renders_not_found() {
        let state = test_state();
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state, PlayerId(404)))
            .unwrap();
        let text = buffer_lines(&terminal).join("\n");
        assert!(text.contains(PLAYER_NOT_FOUND));
    }
}
