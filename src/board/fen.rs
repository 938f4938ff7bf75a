use thiserror::Error;

use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Board {
    /// Replaces the board with the position described by `fen`.
    ///
    /// Only the first two fields are consumed: piece placement and the
    /// active-colour token. Any trailing fields (castling, en passant,
    /// clocks) are ignored, so full FEN records from the feed parse as-is.
    /// The active-colour token `"w"` selects White; any other token selects
    /// Black; when the field is absent entirely White is assumed.
    ///
    /// On error the previous position is left untouched; the parse builds a
    /// fresh board and swaps it in only once both fields are accepted.
    pub fn set(&mut self, fen: &str) -> Result<(), FenParseError> {
        let mut parts = fen.split_whitespace();

        let piece_placement = parts.next().ok_or(FenParseError::MissingPiecePlacement)?;

        let mut board = Board::new();
        board.parse_piece_placement(piece_placement)?;

        if let Some(active_colour) = parts.next() {
            board.set_side_to_move(match active_colour {
                "w" => Colour::White,
                _ => Colour::Black,
            });
        }

        *self = board;
        Ok(())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut board = Board::new();
        board.set(fen)?;
        Ok(board)
    }

    /// Writes the position back out as placement notation plus the
    /// active-colour token, re-deriving the run-length encoding
    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                match self.on(square) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.glyph());
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push_str(&self.side_to_move().to_string());

        fen
    }

    fn parse_separator(
        rank_iter: &mut impl DoubleEndedIterator<Item = Rank>,
        rank: Rank,
        file: u8,
    ) -> Result<(Rank, u8), FenParseError> {
        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Rank {:?} ended prematurely at file index {} (expected 8) before '/'",
                rank, file
            )));
        }

        let next_rank = rank_iter.next().ok_or_else(|| {
            FenParseError::InvalidRankFormat(format!(
                "Too many rank separators ('/') found after completing rank {:?}",
                rank
            ))
        })?;

        Ok((next_rank, 0))
    }

    fn parse_skip(
        skip: char,
        idx: usize,
        current_rank: Rank,
        current_file_index: u8,
    ) -> Result<u8, FenParseError> {
        let skip_val = skip.to_digit(10).unwrap();

        if !(1..=8).contains(&skip_val) {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Invalid skip digit '{}' (must be 1-8) at char index {}",
                skip, idx
            )));
        }

        let skip_u8 = skip_val as u8;

        if current_file_index + skip_u8 > 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Skip value {} exceeds rank length at file index {} on rank {:?}",
                skip_u8, current_file_index, current_rank
            )));
        }

        Ok(skip_u8)
    }

    fn parse_piece(&mut self, piece: char, rank: Rank, file: u8) -> Result<(), FenParseError> {
        if file >= 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Piece placement '{}' attempted beyond file H (index >= 8) on rank {:?}",
                piece, rank
            )));
        }

        let piece_enum = piece
            .to_string()
            .parse::<Piece>()
            .map_err(|_| FenParseError::InvalidPiecePlacementChar(piece))?;

        let current_file = unsafe { File::from_unchecked(file) };

        self.add_piece(piece_enum, Square::from_parts(current_file, rank));

        Ok(())
    }

    fn parse_piece_placement(&mut self, piece_placement: &str) -> Result<(), FenParseError> {
        let mut rank_iter = Rank::iter().rev();

        let mut rank = rank_iter
            .next()
            .ok_or_else(|| FenParseError::InvalidRankFormat("Board has no ranks?".to_string()))?;

        let mut file: u8 = 0;

        for (i, char) in piece_placement.chars().enumerate() {
            match char {
                '/' => {
                    (rank, file) = Self::parse_separator(&mut rank_iter, rank, file)?;
                }

                skip if skip.is_ascii_digit() => {
                    file += Self::parse_skip(skip, i, rank, file)?;
                }

                piece_char => {
                    self.parse_piece(piece_char, rank, file)?;
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Final rank {:?} ended prematurely at file index {} (expected 8)",
                rank, file
            )));
        }

        if rank_iter.next().is_some() {
            return Err(FenParseError::InvalidRankFormat(
                "Not enough ranks specified in FEN string (expected 8)".to_string(),
            ));
        }

        Ok(())
    }
}

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenParseError {
    #[error("FEN string has no piece placement field")]
    MissingPiecePlacement,
    #[error("Invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),
    #[error("Invalid rank format in FEN piece placement: {0}")]
    InvalidRankFormat(String),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
