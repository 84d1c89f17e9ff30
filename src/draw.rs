use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::bracket::{RoundColumn, TBD, status_text};
use crate::components::road::{road_rows, task_text};
use crate::state::storage::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use dynasty_playoff::directory::{StaticTeamDirectory, TeamDirectory};
use dynasty_playoff::{BracketSlot, Game, Seed};

static TABS: &[&str; 3] = &["Bracket", "Road", "Logs"];

const HELP_TEXT: &str = "q=quit  1=Bracket  2=Road  3=Logs  h/l=round  j/k=game  [/]=season  i=import  s=save  f=full screen";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_status(f, layout.status, app);
        }

        match app.state.active_tab {
            MenuItem::Bracket => draw_bracket(f, layout.main, app),
            MenuItem::Road => draw_road(f, layout.main, app),
            MenuItem::Logs => draw_logs(f, layout.main),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Bracket => 0,
        MenuItem::Road => 1,
        MenuItem::Logs => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let message = match (&app.state.last_error, &app.state.status) {
        (Some(err), _) => Span::styled(format!(" {err}"), Style::default().fg(Color::Red)),
        (None, Some(status)) => Span::styled(format!(" {status}"), Style::default().fg(Color::Gray)),
        (None, None) => Span::raw(""),
    };

    let mut saved = match app.state.last_saved_at.as_deref() {
        Some(at) => format!("saved {at} "),
        None => String::new(),
    };
    if app.state.bracket.dirty {
        saved.insert_str(0, "unsaved changes | ");
    }

    let [left, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Length(saved.chars().count() as u16)]).areas(area);
    f.render_widget(Paragraph::new(Line::from(message)), left);
    f.render_widget(
        Paragraph::new(saved)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        right,
    );
}

fn draw_bracket(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Bracket ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bracket = &app.state.bracket;
    let Some(resolver) = bracket.resolver() else {
        let msg = match app.state.last_error.as_deref() {
            Some(err) => format!("Dynasty load failed:\n{err}"),
            None => "Loading dynasty...".to_string(),
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [header, key_legend, _gap, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let mut header_text = format!(
        "{} season | {} | {}",
        bracket.ctx.year,
        bracket.view_round.label(),
        team_label(&bracket.ctx.user_team, &app.state.teams)
    );
    if resolver.seeds().is_empty() {
        header_text.push_str(" | seeds not set");
    }
    f.render_widget(Paragraph::new(header_text), header);
    f.render_widget(
        Paragraph::new("Keys: h/l=round  j/k=game  [/]=season  i=import  s=save  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let mut column_area = content;
    let mut detail_area: Option<Rect> = None;
    if content.width >= 72 {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(content);
        column_area = left;
        detail_area = Some(right);
    }

    let slots = bracket.slots();
    let column = RoundColumn {
        slots: &slots,
        selected: Some(bracket.selected_game),
        user_team: &bracket.ctx.user_team,
        directory: &app.state.teams,
    };
    column_area.height = column_area.height.min(column.height());
    f.render_widget(column, column_area);

    if let Some(detail) = detail_area {
        draw_game_detail(f, detail, slots.get(bracket.selected_game), &app.state.teams);
    }
}

fn draw_game_detail(f: &mut Frame, area: Rect, slot: Option<&BracketSlot<'_>>, teams: &StaticTeamDirectory) {
    let block = default_border(Color::DarkGray).title(" Game ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(slot) = slot else {
        draw_centered_hint(f, inner, "No game selected");
        return;
    };

    let side = |entry: Option<(Option<Seed>, &str)>| -> Line<'static> {
        let Some((seed, team)) = entry else {
            return Line::from(Span::styled(TBD, Style::default().fg(Color::DarkGray)));
        };
        let seed = seed.map(|s| format!("({s}) ")).unwrap_or_default();
        let score = slot
            .game
            .and_then(|g| g.score_for(team))
            .map(|s| format!("  {s}"))
            .unwrap_or_default();
        let style = if slot.game.and_then(Game::winner) == Some(team) {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(Span::styled(format!("{seed}{}{score}", teams.display_name(team)), style))
    };

    let outcome = match slot.game {
        Some(game) => match game.winner() {
            Some(winner) => format!("Winner: {}", teams.display_name(winner)),
            None if game.has_both_scores() => "Tied score, no winner recorded".to_string(),
            None => "Undecided".to_string(),
        },
        None => "No result entered".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(status_text(slot), Style::default().fg(Color::Gray))),
        Line::from(""),
        side(slot.top),
        side(slot.bottom),
        Line::from(""),
        Line::from(outcome),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_road(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Road ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bracket = &app.state.bracket;
    let Some(resolver) = bracket.resolver() else {
        draw_centered_hint(f, inner, "Loading dynasty...");
        return;
    };
    let team = bracket.ctx.user_team.as_str();
    if team.is_empty() {
        draw_centered_hint(f, inner, "No user team in this dynasty (set \"userTeam\" in the document)");
        return;
    }

    let seed = match resolver.seed_of(team) {
        Some(seed) => format!("seed {seed}"),
        None => "unseeded".to_string(),
    };
    let mut lines = vec![
        Line::from(format!("{} | {} season | {seed}", app.state.teams.display_name(team), bracket.ctx.year)),
    ];
    if let Some(task) = bracket.next_task() {
        lines.push(Line::from(vec![
            Span::styled("Next: ", Style::default().fg(Color::Gray)),
            Span::styled(task_text(&task, &app.state.teams), Style::default().fg(Color::Yellow)),
        ]));
    }
    lines.push(Line::from(""));

    for row in road_rows(&resolver, team, &app.state.teams) {
        let result_style = match row.result.chars().next() {
            Some('W') => Style::default().fg(Color::Green),
            Some('L') => Style::default().fg(Color::Red),
            _ => Style::default(),
        };
        let venue = row.bowl.map(|b| b.name()).unwrap_or("");
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", row.round.label()), Style::default().fg(Color::Gray)),
            Span::raw(format!("{venue:<24}")),
            Span::raw(format!("{:<30}", row.matchup)),
            Span::styled(row.result, result_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::White).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan));
    f.render_widget(logs, area);
}

fn team_label(team: &str, teams: &StaticTeamDirectory) -> String {
    if team.is_empty() {
        "no user team".to_string()
    } else {
        teams.display_name(team)
    }
}

fn draw_centered_hint(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    draw_centered_hint(f, inner, msg);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
