use std::io::{self, Write};

use minegrid_core::{Cell, CellValue, GameStatus, Session, format_elapsed};

fn glyph(cell: &Cell) -> char {
    if !cell.is_opened() {
        return if cell.is_flagged() { 'F' } else { '#' };
    }
    match cell.value() {
        Some(CellValue::Mine) => '*',
        Some(CellValue::Adjacent(0)) => '.',
        Some(CellValue::Adjacent(count)) => char::from(b'0' + count),
        None => '?',
    }
}

/// Draws the whole screen for the current session.
pub fn render(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let Some(grid) = session.grid() else {
        writeln!(out, "Let's play Minesweeper!")?;
        return writeln!(out, "start <rows> <columns> <mines>");
    };

    match session.status() {
        GameStatus::Won => writeln!(out, "You won!")?,
        GameStatus::GameOver => writeln!(out, "Game Over")?,
        _ => {}
    }
    writeln!(
        out,
        "Remaining Flags: {}  {}",
        session.remaining_flags(),
        format_elapsed(session.elapsed_ms())
    )?;

    let columns = grid.columns();
    let width = (grid.len().saturating_sub(1)).to_string().len();
    for (row, cells) in grid.iter().collect::<Vec<_>>().chunks(columns).enumerate() {
        let line: String = cells.iter().map(|cell| glyph(cell)).collect();
        writeln!(out, "{:>width$} {}", row * columns, line)?;
    }

    if session.status().is_finished() {
        writeln!(out, "repeat | reset")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minegrid_core::{Game, GameConfig, PresetMineGenerator};

    fn screen(session: &Session) -> String {
        let mut out = Vec::new();
        render(session, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn selection_screen() {
        assert_eq!(
            screen(&Session::new()),
            "Let's play Minesweeper!\nstart <rows> <columns> <mines>\n"
        );
    }

    #[test]
    fn board_in_progress() {
        let mut game = Game::with_generator(PresetMineGenerator::new([5]));
        game.start(GameConfig::new(2, 3, 1).unwrap()).unwrap();
        game.toggle_flag(5).unwrap();
        game.tick(61_000).unwrap();
        game.open(0).unwrap();

        assert_eq!(
            screen(game.session()),
            "Remaining Flags: 0  01:01\n0 .1#\n3 .1F\n"
        );
    }

    #[test]
    fn lost_board_shows_mines() {
        let mut game = Game::with_generator(PresetMineGenerator::new([2]));
        game.start(GameConfig::new(1, 3, 1).unwrap()).unwrap();
        game.open(1).unwrap();
        game.open(2).unwrap();

        assert_eq!(
            screen(game.session()),
            "Game Over\nRemaining Flags: 1  00:00\n0 #1*\nrepeat | reset\n"
        );
    }
}
