pub mod lanes;

pub use lanes::{Candidate, FanSlot};

use crate::core::{Move, Square};
use crate::render::ArrowSpec;

/******************************************\
|==========================================|
|           Square Annotations             |
|==========================================|
\******************************************/

/// A filled square annotation (last move, check, selection)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub square: Square,
    pub style: String,
}

/// A stroked square annotation, drawn `inset` pixels inside the square edge
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub square: Square,
    pub style: String,
    pub inset: f64,
}

/******************************************\
|==========================================|
|                Variation                 |
|==========================================|
\******************************************/

/// # Variation
///
/// One candidate continuation from the analysis feed: an ordered move
/// sequence plus the node count the engine spent on it. Rank among
/// variations is its position in the delivered list (0 = best).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    pub moves: Vec<Move>,
    pub nodes: u64,
}

/******************************************\
|==========================================|
|              Overlay State               |
|==========================================|
\******************************************/

/// # Overlay state
///
/// The current highlights, outlines and arrow specifications. Discarded and
/// rebuilt on every position or evaluation update; nothing is patched in
/// place between updates.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    highlights: Vec<Highlight>,
    outlines: Vec<Outline>,
    arrows: Vec<ArrowSpec>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.highlights.clear();
        self.outlines.clear();
        self.arrows.clear();
    }

    /// Adds a highlight. Set semantics: a duplicate (square, style) pair is
    /// ignored, so insertion order never matters.
    pub fn add_highlight(&mut self, square: Square, style: &str) {
        let exists = self
            .highlights
            .iter()
            .any(|h| h.square == square && h.style == style);
        if !exists {
            self.highlights.push(Highlight {
                square,
                style: style.to_string(),
            });
        }
    }

    /// Adds an outline, with the same set semantics as highlights
    pub fn add_outline(&mut self, square: Square, style: &str, inset: f64) {
        let exists = self
            .outlines
            .iter()
            .any(|o| o.square == square && o.style == style);
        if !exists {
            self.outlines.push(Outline {
                square,
                style: style.to_string(),
                inset,
            });
        }
    }

    pub fn push_arrow(&mut self, arrow: ArrowSpec) {
        self.arrows.push(arrow);
    }

    pub fn set_arrows(&mut self, arrows: Vec<ArrowSpec>) {
        self.arrows = arrows;
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    /// The style tag of the highlight on a square, if any
    pub fn highlight_on(&self, square: Square) -> Option<&str> {
        self.highlights
            .iter()
            .find(|h| h.square == square)
            .map(|h| h.style.as_str())
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn outlines(&self) -> &[Outline] {
        &self.outlines
    }

    pub fn arrows(&self) -> &[ArrowSpec] {
        &self.arrows
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_set_semantics() {
        let mut overlay = OverlayState::new();
        overlay.add_highlight(Square::E4, "last-move");
        overlay.add_highlight(Square::E4, "last-move");
        overlay.add_highlight(Square::E4, "check");
        assert_eq!(overlay.highlights().len(), 2);
    }

    #[test]
    fn test_outline_set_semantics() {
        let mut overlay = OverlayState::new();
        overlay.add_outline(Square::D5, "threat", 2.0);
        overlay.add_outline(Square::D5, "threat", 4.0);
        assert_eq!(overlay.outlines().len(), 1);
        assert_eq!(overlay.outlines()[0].inset, 2.0);
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut overlay = OverlayState::new();
        overlay.add_highlight(Square::E4, "last-move");
        overlay.add_outline(Square::D5, "threat", 2.0);
        overlay.clear();
        assert!(overlay.highlights().is_empty());
        assert!(overlay.outlines().is_empty());
        assert!(overlay.arrows().is_empty());
    }
}
