pub mod clock;
pub mod wdl;

use crate::board::{Board, FenParseError};
use crate::core::*;
use crate::overlay::lanes::{self, FAN_PLY_LIMIT};
use crate::overlay::{Candidate, FanSlot, OverlayState, Variation};
use crate::render::{self, ArrowSpec, BoardLayout, DashPattern, Primitive};

/******************************************\
|==========================================|
|               Arrow Theme                |
|==========================================|
\******************************************/

/// Visual parameters for the arrows derived from the variation feed

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowTheme {
    /// Width of a full-strength (best line) first-move arrow
    pub base_width: f64,
    /// Width factor applied to reply (ply 1) arrows
    pub reply_width_factor: f64,
    pub head_length: f64,
    pub head_width: f64,
    /// Fixed width of the dashed continuation arrows
    pub deep_width: f64,
    pub deep_dash: DashPattern,
    /// Continuation arrows are drawn for plies 2..this, best line only
    pub deep_ply_limit: usize,
    pub first_move_style: String,
    pub reply_style: String,
    pub deep_style: String,
}

impl Default for ArrowTheme {
    fn default() -> Self {
        Self {
            base_width: 16.0,
            reply_width_factor: 0.6,
            head_length: 24.0,
            head_width: 28.0,
            deep_width: 6.0,
            deep_dash: DashPattern {
                length: 10.0,
                gap: 8.0,
            },
            deep_ply_limit: 8,
            first_move_style: "pv".to_string(),
            reply_style: "pv-reply".to_string(),
            deep_style: "pv-deep".to_string(),
        }
    }
}

/// Arrow width for a variation searched with `nodes` out of the best line's
/// `best_nodes`. The exponent compresses the ratio so weaker lines stay
/// visible next to the best one; a zero best count collapses everything
/// to zero rather than dividing by it.
pub fn scaled_width(nodes: u64, best_nodes: u64, base_width: f64) -> f64 {
    let ratio = if best_nodes == 0 {
        0.0
    } else {
        nodes as f64 / best_nodes as f64
    };
    ratio.powf(1.0 / 1.7) * base_width
}

/******************************************\
|==========================================|
|               Board View                 |
|==========================================|
\******************************************/

/// # Board view
///
/// Owns one diagram: the parsed position, the overlay annotations and the
/// orientation flag. Several views can coexist (the main board and a
/// preview board); nothing here is shared or global.
///
/// Every mutation marks the view dirty; `redraw` then rebuilds the whole
/// primitive list in one fixed pass and clears the flag. There are no
/// partial redraw states in between.

#[derive(Debug, Clone)]
pub struct BoardView {
    board: Board,
    overlay: OverlayState,
    flipped: bool,
    layout: BoardLayout,
    theme: ArrowTheme,
    dirty: bool,
}

impl BoardView {
    pub fn new(layout: BoardLayout) -> Self {
        Self {
            board: Board::new(),
            overlay: OverlayState::new(),
            flipped: false,
            layout,
            theme: ArrowTheme::default(),
            dirty: true,
        }
    }

    pub fn with_theme(layout: BoardLayout, theme: ArrowTheme) -> Self {
        Self {
            theme,
            ..Self::new(layout)
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Whether a mutation has arrived since the last full redraw
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        if self.flipped != flipped {
            self.flipped = flipped;
            self.dirty = true;
        }
    }

    /// Replaces the position from a placement notation string.
    ///
    /// A malformed notation leaves the previous position and highlights
    /// untouched and returns the parse error; the update is rejected whole,
    /// never applied square by square. On success the highlight set is
    /// rebuilt around the last played move, if one is given.
    pub fn apply_position(&mut self, fen: &str, last_move: Option<Move>) -> Result<(), FenParseError> {
        self.board.set(fen)?;

        self.overlay.clear_highlights();
        if let Some(mv) = last_move {
            self.overlay.add_highlight(mv.from(), "last-move");
            self.overlay.add_highlight(mv.to(), "last-move");
        }

        self.dirty = true;
        Ok(())
    }

    pub fn add_highlight(&mut self, square: Square, style: &str) {
        self.overlay.add_highlight(square, style);
        self.dirty = true;
    }

    pub fn add_outline(&mut self, square: Square, style: &str, inset: f64) {
        self.overlay.add_outline(square, style, inset);
        self.dirty = true;
    }

    /// Rebuilds the arrow set from a ranked variation list.
    ///
    /// Each variation contributes its first move and the expected reply;
    /// the best variation additionally contributes dashed continuation
    /// arrows. A ply past the end of a variation's move sequence simply
    /// contributes nothing.
    pub fn apply_variations(&mut self, variations: &[Variation]) {
        let candidates = collect_candidates(variations, self.theme.deep_ply_limit);
        let slots = lanes::allocate(&candidates);
        let best_nodes = variations.first().map_or(0, |v| v.nodes);

        let arrows = candidates
            .iter()
            .zip(slots.iter())
            .map(|(candidate, slot)| self.arrow_for(candidate, slot, variations, best_nodes))
            .collect();

        self.overlay.set_arrows(arrows);
        self.dirty = true;
    }

    fn arrow_for(
        &self,
        candidate: &Candidate,
        slot: &FanSlot,
        variations: &[Variation],
        best_nodes: u64,
    ) -> ArrowSpec {
        let theme = &self.theme;
        let nodes = variations[candidate.variation].nodes;

        let (style, width, dash, after_pieces) = match candidate.ply {
            0 => (
                &theme.first_move_style,
                scaled_width(nodes, best_nodes, theme.base_width),
                None,
                false,
            ),
            1 => (
                &theme.reply_style,
                scaled_width(nodes, best_nodes, theme.base_width) * theme.reply_width_factor,
                None,
                false,
            ),
            _ => (&theme.deep_style, theme.deep_width, Some(theme.deep_dash), true),
        };

        ArrowSpec {
            mv: candidate.mv,
            style: style.clone(),
            width,
            head_length: theme.head_length,
            head_width: theme.head_width,
            dash,
            render_after_pieces: after_pieces,
            offset: slot.offset,
            total_offsets: slot.total,
            offset_direction: slot.direction,
            outline_only: false,
        }
    }

    /// Performs the full redraw, emitting primitives in stacking order:
    ///
    /// 1. all 64 squares (light/dark, highlight style winning)
    /// 2. outlines
    /// 3. pieces of the side not to move
    /// 4. arrows bucketed beneath the pieces
    /// 5. pieces of the side to move
    /// 6. arrows bucketed above the pieces
    ///
    /// The side to move's pieces and the continuation arrows end up on top;
    /// the primary move arrows stay beneath every piece.
    pub fn redraw(&mut self) -> Vec<Primitive> {
        let mut out = Vec::with_capacity(Square::NUM + 2 * self.board.piece_count());
        let stm = self.board.side_to_move();

        for sq in Square::iter() {
            let parity = (sq.file().index() + sq.rank().index()) % 2 == 0;
            let base = if parity { "dark" } else { "light" };
            let style = self.overlay.highlight_on(sq).unwrap_or(base);
            out.push(Primitive::Square {
                at: render::to_pixel(sq, self.flipped, &self.layout),
                size: self.layout.square_size,
                style: style.to_string(),
            });
        }

        for outline in self.overlay.outlines() {
            out.push(Primitive::Outline {
                at: render::to_pixel(outline.square, self.flipped, &self.layout),
                size: self.layout.square_size,
                inset: outline.inset,
                style: outline.style.clone(),
            });
        }

        self.emit_pieces(&mut out, !stm);
        self.emit_arrows(&mut out, false);
        self.emit_pieces(&mut out, stm);
        self.emit_arrows(&mut out, true);

        self.dirty = false;
        out
    }

    fn emit_pieces(&self, out: &mut Vec<Primitive>, colour: Colour) {
        for (sq, piece) in self.board.pieces().filter(|(_, p)| p.colour() == colour) {
            out.push(Primitive::Sprite {
                at: render::to_pixel(sq, self.flipped, &self.layout),
                size: self.layout.square_size,
                glyph: piece.glyph(),
            });
        }
    }

    fn emit_arrows(&self, out: &mut Vec<Primitive>, after_pieces: bool) {
        for spec in self
            .overlay
            .arrows()
            .iter()
            .filter(|a| a.render_after_pieces == after_pieces)
        {
            out.extend(spec.render(self.flipped, &self.layout));
        }
    }
}

/// Flattens a ranked variation list into the fixed candidate order the
/// allocator relies on: variation rank first, ply 0 before ply 1, then the
/// best line's continuation plies.
fn collect_candidates(variations: &[Variation], deep_ply_limit: usize) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (rank, variation) in variations.iter().enumerate() {
        for ply in 0..FAN_PLY_LIMIT {
            if let Some(&mv) = variation.moves.get(ply) {
                candidates.push(Candidate::new(rank, ply, mv));
            }
        }
    }

    if let Some(best) = variations.first() {
        for ply in FAN_PLY_LIMIT..deep_ply_limit.min(best.moves.len()) {
            candidates.push(Candidate::new(0, ply, best.moves[ply]));
        }
    }

    candidates
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
