use thiserror::Error;

use crate::core::{ParseSquareError, Square};

/******************************************\
|==========================================|
|                   Move                   |
|==========================================|
\******************************************/

/// # Move representation
///
/// - An origin/destination square pair, as delivered by the analysis feed.
///   Carries no legality information; the feed is trusted for that.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Returns the origin square of the move
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Returns the destination square of the move
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Move {
    /// Displays the move as its 4-character square pair (e2 -> e4 => "e2e4")
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/******************************************\
|==========================================|
|                Parse Move                |
|==========================================|
\******************************************/

impl std::str::FromStr for Move {
    type Err = ParseMoveError;

    /// Parses a move from its square-pair encoding, sliced in half to recover
    /// origin and destination. A trailing promotion letter (5th character) is
    /// accepted and ignored; the diagram only needs the travelled squares.
    ///
    /// ## Examples
    ///
    /// ```
    /// use boardcast::core::{Move, Square};
    ///
    /// let m: Move = "e2e4".parse().unwrap();
    /// assert_eq!(m.from(), Square::E2);
    /// assert_eq!(m.to(), Square::E4);
    ///
    /// let promo: Move = "e7e8q".parse().unwrap();
    /// assert_eq!(promo.to(), Square::E8);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 && s.len() != 5 {
            return Err(ParseMoveError::InvalidLength(s.len()));
        }

        // non-ASCII input must fail the parse, not the slice
        let from = s
            .get(0..2)
            .ok_or(ParseMoveError::InvalidLength(s.len()))?
            .parse::<Square>()?;
        let to = s
            .get(2..4)
            .ok_or(ParseMoveError::InvalidLength(s.len()))?
            .parse::<Square>()?;

        Ok(Move::new(from, to))
    }
}

/******************************************\
|==========================================|
|             Move Parse Error             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Invalid length for move string: {0}, expected 4")]
    InvalidLength(usize),
    #[error("Invalid square in move string: {0}")]
    InvalidSquare(#[from] ParseSquareError),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
