use poetle_core::{RevealType, Round};
use serde::{Deserialize, Serialize};

/// What a player may see of one cell: hidden characters are withheld.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    #[serde(rename = "char")]
    pub ch: Option<char>,
    pub reveal_type: Option<RevealType>,
}

/// Player-visible state of the active round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub title: String,
    pub author: String,
    pub dynasty: String,
    pub cells: Vec<CellView>,
    pub guessed: Vec<char>,
    pub hidden: usize,
    pub won: bool,
}

impl BoardView {
    /// Author and dynasty are withheld until the round is won.
    pub fn from_round(round: &Round) -> Self {
        let puzzle = round.puzzle();
        let won = round.is_won();
        let title = if round.title_complete() {
            puzzle.title.clone()
        } else {
            String::new()
        };
        let (author, dynasty) = if won {
            (puzzle.author.clone(), puzzle.dynasty.clone())
        } else {
            (String::new(), String::new())
        };

        Self {
            title,
            author,
            dynasty,
            cells: round
                .cells()
                .iter()
                .map(|cell| CellView {
                    ch: (!cell.hidden).then_some(cell.ch),
                    reveal_type: cell.reveal_type,
                })
                .collect(),
            guessed: round.guessed().to_vec(),
            hidden: round.hidden_count(),
            won,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poetle_core::{Puzzle, RulesConfig};

    #[test]
    fn hidden_cells_do_not_leak() {
        let mut round = Round::new(
            Puzzle::new("江雪", "江雪\n千山鸟飞绝", "柳宗元", "唐代"),
            RulesConfig::default(),
        );
        round.guess("山", 1_000).unwrap();

        let board = BoardView::from_round(&round);

        assert_eq!(board.title, "");
        assert_eq!(board.author, "");
        assert_eq!(board.cells[0].ch, None);
        assert_eq!(board.cells[2].ch, Some('\n'));
        assert_eq!(board.cells[4].ch, Some('山'));
        assert_eq!(board.cells[4].reveal_type, Some(RevealType::User));
        assert_eq!(board.hidden, 6);
    }

    #[test]
    fn won_board_shows_attribution() {
        let mut round = Round::new(
            Puzzle::new("江雪", "江雪\n千山鸟飞绝", "柳宗元", "唐代"),
            RulesConfig::default(),
        );
        round.guess("江", 1_000).unwrap();
        round.guess("雪", 2_000).unwrap();

        let board = BoardView::from_round(&round);

        assert!(board.won);
        assert_eq!(board.title, "江雪");
        assert_eq!(board.author, "柳宗元");
        assert!(board.cells.iter().all(|cell| cell.ch.is_some()));
    }
}
