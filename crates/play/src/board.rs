//! Text rendering of the displayed position

use chess_core::{file_of, rank_of, Position};
use timeline::Hint;

/// What to draw besides the pieces.
#[derive(Debug, Default, Clone)]
pub struct Overlay {
    pub last_move: Option<(u8, u8)>,
    pub hint: Option<Hint>,
    pub selected: Option<u8>,
    pub targets: Vec<u8>,
}

/// Renders the board with rank 8 on top, or rank 1 when `flipped`.
pub struct BoardView<'a> {
    position: &'a Position,
    overlay: &'a Overlay,
    flipped: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(position: &'a Position, overlay: &'a Overlay, flipped: bool) -> Self {
        Self {
            position,
            overlay,
            flipped,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for rank in 0..8u8 {
            let display_rank = if self.flipped { rank } else { 7 - rank };
            out.push_str(&format!("{} ", display_rank + 1));
            for file in 0..8u8 {
                let display_file = if self.flipped { 7 - file } else { file };
                let sq = display_rank * 8 + display_file;
                out.push_str(&self.render_square(sq));
            }
            out.push('\n');
        }
        out.push_str("  ");
        for file in 0..8u8 {
            let display_file = if self.flipped { 7 - file } else { file };
            out.push_str(&format!(" {} ", char::from(b'a' + display_file)));
        }
        out.push('\n');
        out
    }

    fn render_square(&self, sq: u8) -> String {
        let piece = match self.position.piece_at(sq) {
            Some(pc) => pc.fen_char(),
            None if (file_of(sq) + rank_of(sq)) % 2 == 0 => '.',
            None => ' ',
        };
        let (open, close) = self.marks(sq);
        format!("{open}{piece}{close}")
    }

    // Brackets around a square: selection, then hint, then last move.
    fn marks(&self, sq: u8) -> (char, char) {
        let ov = self.overlay;
        if ov.selected == Some(sq) {
            ('<', '>')
        } else if ov.targets.contains(&sq) {
            ('*', '*')
        } else if ov.hint.is_some_and(|h| h.from == sq || h.to == sq) {
            ('{', '}')
        } else if ov.last_move.is_some_and(|(f, t)| f == sq || t == sq) {
            ('[', ']')
        } else {
            (' ', ' ')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_rows() {
        let pos = Position::startpos();
        let overlay = Overlay::default();
        let text = BoardView::new(&pos, &overlay, false).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("8  r  n  b  q  k  b  n  r "));
        assert!(lines[7].starts_with("1  R  N  B  Q  K  B  N  R "));
        assert_eq!(lines[8].trim(), "a  b  c  d  e  f  g  h");
    }

    #[test]
    fn test_flipped_puts_rank_one_on_top() {
        let pos = Position::startpos();
        let overlay = Overlay::default();
        let text = BoardView::new(&pos, &overlay, true).render();
        assert!(text.lines().next().unwrap().starts_with("1  R  N  B  K  Q"));
        assert_eq!(text.lines().last().unwrap().trim(), "h  g  f  e  d  c  b  a");
    }

    #[test]
    fn test_marks() {
        let pos = Position::startpos();
        let overlay = Overlay {
            last_move: Some((12, 28)),
            hint: Some(Hint { from: 6, to: 21 }),
            selected: Some(1),
            targets: vec![16, 18],
        };
        let text = BoardView::new(&pos, &overlay, false).render();
        let rank1 = text.lines().nth(7).unwrap();
        assert!(rank1.contains("<N>"));
        assert!(rank1.contains("{N}"));
        assert!(text.lines().nth(6).unwrap().contains("[P]"));
        assert!(text.lines().nth(4).unwrap().contains("[ ]"));
        assert_eq!(text.lines().nth(5).unwrap().matches("*.*").count(), 2);
    }
}
