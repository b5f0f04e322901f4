use std::fmt::Write;

use sweeper_core::{CellView, Mode, PeekContent, Phase, ScoreStore, Session};

fn glyph(view: CellView) -> char {
    use CellView::*;

    match view {
        Hidden => '.',
        Flagged => 'F',
        Open(0) => ' ',
        Open(count) => char::from(b'0' + count),
        Peek(PeekContent::Mine) => '*',
        Peek(PeekContent::Number(count)) => char::from(b'0' + count),
        Peek(PeekContent::Empty) => '_',
        Exploded => 'X',
        Mine => '*',
        IncorrectFlag => '!',
    }
}

/// Draws the board with column and row numbers, `x` left to right and `y` top to bottom.
pub fn board<S: ScoreStore>(session: &Session<S>) -> String {
    let size = session.board().size();
    let mut out = String::from("   ");
    for x in 0..size {
        let _ = write!(out, "{:>3}", x);
    }
    out.push('\n');

    for y in 0..size {
        let _ = write!(out, "{:>3}", y);
        for x in 0..size {
            let view = session.view_at((x, y)).unwrap_or(CellView::Hidden);
            let _ = write!(out, "{:>3}", glyph(view));
        }
        out.push('\n');
    }
    out
}

pub fn status<S: ScoreStore>(session: &Session<S>) -> String {
    let counters = session.counters();
    let phase = match session.phase() {
        Phase::NotStarted => "ready",
        Phase::Running => "running",
        Phase::Won => "won",
        Phase::Lost => "lost",
        Phase::Misconfigured => "misconfigured",
    };
    let mut out = format!(
        "{} | {} | mines {} | lives {} | {}s | hints {} | safe {}",
        session.level().key,
        phase,
        counters.mines_left,
        counters.lives_left,
        counters.secs_passed,
        counters.hints_left,
        counters.safe_clicks_left,
    );
    if counters.mega_hint_available {
        out.push_str(" | mega");
    }
    if counters.exterminator_available {
        out.push_str(" | ext");
    }
    if counters.undo_depth > 0 {
        let _ = write!(out, " | undo {}", counters.undo_depth);
    }
    match session.mode() {
        Mode::Normal => {}
        Mode::Hint => out.push_str("\npick a cell to hint"),
        Mode::MegaHint => match session.state().mega_hint_anchor {
            Some((x, y)) => {
                let _ = write!(out, "\npick the opposite corner of ({}, {})", x, y);
            }
            None => out.push_str("\npick the first corner"),
        },
        Mode::ManualPlacement => {
            let placed = session.board().mine_count();
            let _ = write!(
                out,
                "\nplace mines, {} of {}",
                placed,
                session.level().mine_count
            );
        }
    }
    out
}
