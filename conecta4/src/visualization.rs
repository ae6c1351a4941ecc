use crate::{Board, WinResult, COLUMNS, ROWS};

/// Draws the board as text, top row first, with the column indices below.
///
/// Tokens that are part of `win` are marked with a `*`.
pub fn visualize_board(board: &Board, win: Option<&WinResult>) -> String {
    // Draw the top of the box
    let mut result = String::from("    ╭");
    for _ in 0..COLUMNS {
        result += "──";
    }
    result += "╮\n";

    for row in (0..ROWS).rev() {
        result += &format!("{:>3} │", row);
        for column in 0..COLUMNS {
            match board.color_at(row, column) {
                Some(player) => {
                    result.push(player.glyph());
                    if win.is_some_and(|win| win.contains(row, column)) {
                        result.push('*');
                    } else {
                        result.push(' ');
                    }
                }
                None => result += "· ",
            }
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in 0..COLUMNS {
        result += "──";
    }
    result += "╯\n     ";
    for column in 0..COLUMNS {
        result += &format!("{:<2}", column);
    }
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_board(self, None))
    }
}
