use dynasty_playoff::directory::TeamDirectory;
use dynasty_playoff::{BracketSlot, Game, Seed};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per game cell: top-team line, bowl/status line, bottom-team line.
pub const GAME_HEIGHT: u16 = 3;

/// Blank rows between stacked cells.
const CELL_GAP: u16 = 1;

/// Maximum game cell width in wider terminals.
const CELL_W_FULL: u16 = 36;

/// Placeholder for a side of the bracket that is not decided yet.
pub const TBD: &str = "TBD";

// ---------------------------------------------------------------------------
// SlotLines: the text of one game cell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLines {
    pub top: String,
    pub status: String,
    pub bottom: String,
    pub top_won: bool,
    pub bottom_won: bool,
}

impl SlotLines {
    pub fn build<D: TeamDirectory>(slot: &BracketSlot<'_>, directory: &D, width: usize) -> Self {
        let side = |entry: Option<(Option<Seed>, &str)>| match entry {
            Some((seed, team)) => (
                format_team_line(seed, &directory.display_name(team), score_for(slot.game, team), width),
                slot.game.and_then(Game::winner) == Some(team),
            ),
            None => (format_team_line(None, TBD, None, width), false),
        };
        let (top, top_won) = side(slot.top);
        let (bottom, bottom_won) = side(slot.bottom);

        Self {
            top,
            status: fit(&status_text(slot), width),
            bottom,
            top_won,
            bottom_won,
        }
    }
}

fn score_for(game: Option<&Game>, team: &str) -> Option<u16> {
    game.and_then(|g| g.score_for(team))
}

/// Bowl (or round) plus where the game stands.
pub fn status_text(slot: &BracketSlot<'_>) -> String {
    let label = slot.bowl.map(|b| b.name()).unwrap_or(slot.round.label());
    let state = match slot.game {
        Some(game) if game.is_decided() => "Final",
        Some(_) => "Scheduled",
        None if slot.top.is_some() && slot.bottom.is_some() => "Not entered",
        None => "Waiting",
    };
    format!("{label} · {state}")
}

/// `" 8 Ohio State        42"` padded or clipped to exactly `width` chars.
pub fn format_team_line(seed: Option<Seed>, name: &str, score: Option<u16>, width: usize) -> String {
    let seed = seed.map(|s| format!("{s:>2}")).unwrap_or_else(|| "  ".to_string());
    let score = score.map(|s| format!("{s:>3}")).unwrap_or_else(|| "  -".to_string());
    // seed, space, name, space, score
    let name_width = width.saturating_sub(seed.len() + score.len() + 2);
    if name_width == 0 {
        return fit(name, width);
    }
    format!("{seed} {} {score}", fit(name, name_width))
}

fn fit(text: &str, width: usize) -> String {
    let mut s: String = text.chars().take(width).collect();
    while s.chars().count() < width {
        s.push(' ');
    }
    s
}

// ---------------------------------------------------------------------------
// RoundColumn: one round's slots stacked top to bottom
// ---------------------------------------------------------------------------

pub struct RoundColumn<'a, D: TeamDirectory> {
    pub slots: &'a [BracketSlot<'a>],
    pub selected: Option<usize>,
    /// Team the user coaches, highlighted wherever it appears.
    pub user_team: &'a str,
    pub directory: &'a D,
}

impl<D: TeamDirectory> RoundColumn<'_, D> {
    pub fn cell_width(area_width: u16) -> u16 {
        area_width.min(CELL_W_FULL)
    }

    /// Rows needed to show every slot without clipping.
    pub fn height(&self) -> u16 {
        let n = self.slots.len() as u16;
        (n * GAME_HEIGHT + n.saturating_sub(1) * CELL_GAP).max(1)
    }
}

impl<D: TeamDirectory> Widget for RoundColumn<'_, D> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = Self::cell_width(area.width);
        if width == 0 {
            return;
        }

        for (idx, slot) in self.slots.iter().enumerate() {
            let y = area.y + idx as u16 * (GAME_HEIGHT + CELL_GAP);
            if y + GAME_HEIGHT > area.bottom() {
                break;
            }

            let lines = SlotLines::build(slot, self.directory, width as usize);
            let selected = self.selected == Some(idx);
            let marker = |style: Style| if selected { style.add_modifier(Modifier::REVERSED) } else { style };

            let team_style = |entry: Option<(Option<Seed>, &str)>, won: bool| {
                let mut style = Style::default().fg(Color::White);
                if entry.is_some_and(|(_, t)| t == self.user_team) {
                    style = style.fg(Color::Yellow);
                }
                if entry.is_none() {
                    style = style.fg(Color::DarkGray);
                }
                if won {
                    style = style.add_modifier(Modifier::BOLD);
                }
                marker(style)
            };

            buf.set_string(area.x, y, &lines.top, team_style(slot.top, lines.top_won));
            buf.set_string(area.x, y + 1, &lines.status, marker(Style::default().fg(Color::Gray)));
            buf.set_string(area.x, y + 2, &lines.bottom, team_style(slot.bottom, lines.bottom_won));
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
