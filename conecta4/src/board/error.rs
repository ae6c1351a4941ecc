/// The error type for [`Board::insert()`](crate::Board::insert).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalInsert {
    /// The column has no empty cell left. The board is unchanged.
    ColumnFull { column: i8 },
    /// The column index is outside of `0..COLUMNS`. The board is unchanged.
    InvalidColumnIndex { column: i8 },
}

impl std::error::Error for IllegalInsert {}

impl std::fmt::Display for IllegalInsert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalInsert::ColumnFull { column } =>
                write!(f, "Token was dropped into column {}, which is already full", column),
            IllegalInsert::InvalidColumnIndex { column } =>
                write!(f, "Token was dropped into column {}, which is outside of the board", column),
        }
    }
}
