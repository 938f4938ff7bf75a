//! Typed frames from the analysis feed.
//!
//! The transport itself (websocket, polling) lives outside this crate; what
//! arrives here is JSON already split into frames. Field names mirror the
//! wire format of the backend, camelCase and all, so the structs
//! deserialize the frames directly.

use serde::Deserialize;

use crate::core::Move;
use crate::overlay::Variation;
use crate::view::wdl::WdlScore;

/******************************************\
|==========================================|
|             Position Frames              |
|==========================================|
\******************************************/

/// One played position: the placement notation plus the clocks and scores
/// attached to it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    /// 0 for the starting position
    pub ply: u32,
    #[serde(default)]
    pub thinking_id: Option<i64>,
    #[serde(default)]
    pub move_uci: Option<String>,
    #[serde(default)]
    pub move_san: Option<String>,
    pub fen: String,
    /// Remaining clocks in whole seconds
    #[serde(default)]
    pub white_clock: Option<u64>,
    #[serde(default)]
    pub black_clock: Option<u64>,
    #[serde(default)]
    pub score_q: Option<i32>,
    #[serde(default)]
    pub score_w: Option<i32>,
    #[serde(default)]
    pub score_d: Option<i32>,
    #[serde(default)]
    pub score_b: Option<i32>,
    #[serde(default)]
    pub moves_left: Option<i32>,
}

impl PositionUpdate {
    /// The played move, when the frame carries a parseable one
    pub fn last_move(&self) -> Option<Move> {
        self.move_uci.as_deref().and_then(|uci| uci.parse().ok())
    }

    /// The attached win/draw/loss triple, when all three scores are present
    pub fn wdl(&self) -> Option<WdlScore> {
        match (self.score_w, self.score_d, self.score_b) {
            (Some(w), Some(d), Some(b)) => {
                Some(WdlScore::new(w.max(0) as u16, d.max(0) as u16, b.max(0) as u16))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionUpdateFrame {
    #[serde(default)]
    pub positions: Vec<PositionUpdate>,
}

/******************************************\
|==========================================|
|            Evaluation Frames             |
|==========================================|
\******************************************/

/// One candidate move inside a thinking update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalMove {
    /// Search effort spent on this candidate
    pub nodes: u64,
    pub move_uci: String,
    /// The expected reply, when the engine reported one
    #[serde(default)]
    pub move_opp_uci: Option<String>,
    #[serde(default)]
    pub move_san: Option<String>,
    #[serde(default)]
    pub pv_san: Option<String>,
    /// The full line in square-pair encoding, when the feed provides it
    #[serde(default)]
    pub pv_uci: Vec<String>,
    #[serde(default)]
    pub score_q: Option<i32>,
    #[serde(default)]
    pub score_w: Option<i32>,
    #[serde(default)]
    pub score_d: Option<i32>,
    #[serde(default)]
    pub score_b: Option<i32>,
    #[serde(default)]
    pub mate_score: Option<i32>,
    #[serde(default)]
    pub moves_left: Option<i32>,
}

impl EvalMove {
    /// Decodes the candidate's move sequence: the full line when present,
    /// otherwise the first move and the expected reply. An unparseable
    /// entry ends the sequence, since everything after it would sit on the
    /// wrong squares.
    pub fn variation(&self) -> Variation {
        let mut moves: Vec<Move> = Vec::new();

        if self.pv_uci.is_empty() {
            if let Ok(first) = self.move_uci.parse() {
                moves.push(first);
                if let Some(reply) = self
                    .move_opp_uci
                    .as_deref()
                    .and_then(|uci| uci.parse().ok())
                {
                    moves.push(reply);
                }
            }
        } else {
            for uci in &self.pv_uci {
                match uci.parse() {
                    Ok(mv) => moves.push(mv),
                    Err(_) => break,
                }
            }
        }

        Variation {
            moves,
            nodes: self.nodes,
        }
    }
}

/// One thinking update: totals plus the ranked candidate list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalUpdate {
    pub update_id: i64,
    pub nodes: u64,
    /// Search time in milliseconds
    #[serde(default)]
    pub time: u64,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub seldepth: u32,
    pub moves: Vec<EvalMove>,
}

impl EvalUpdate {
    /// The ranked variation list; rank is position in the delivered order
    pub fn variations(&self) -> Vec<Variation> {
        self.moves.iter().map(EvalMove::variation).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvalUpdateFrame {
    #[serde(default)]
    pub thinkings: Vec<EvalUpdate>,
}

/******************************************\
|==========================================|
|                 Players                  |
|==========================================|
\******************************************/

/// A player header, as the game endpoint reports it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub name: String,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub fide_id: Option<u64>,
    #[serde(default)]
    pub fed: Option<String>,
}

impl PlayerInfo {
    /// The display label above the board
    pub fn label(&self) -> String {
        match self.rating {
            Some(rating) => format!("{} ({})", self.name, rating),
            None => self.name.clone(),
        }
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
    use crate::core::Square;

    #[test]
    fn test_position_frame_deserializes() {
        let frame: PositionUpdateFrame = serde_json::from_str(
            r#"{
                "positions": [{
                    "ply": 12,
                    "thinkingId": 7,
                    "moveUci": "g1f3",
                    "moveSan": "Nf3",
                    "fen": "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1",
                    "whiteClock": 3571,
                    "blackClock": 3600,
                    "scoreQ": 120,
                    "scoreW": 347,
                    "scoreD": 505,
                    "scoreB": 148,
                    "movesLeft": 42
                }]
            }"#,
        )
        .unwrap();

        let position = &frame.positions[0];
        assert_eq!(position.ply, 12);
        assert_eq!(position.last_move().unwrap().to(), Square::F3);
        assert_eq!(position.wdl(), Some(WdlScore::new(347, 505, 148)));
        assert_eq!(position.white_clock, Some(3571));
    }

    #[test]
    fn test_position_frame_with_nulls() {
        let frame: PositionUpdateFrame = serde_json::from_str(
            r#"{"positions": [{"ply": 0, "moveUci": null, "fen": "startpos-fen"}]}"#,
        )
        .unwrap();

        let position = &frame.positions[0];
        assert_eq!(position.last_move(), None);
        assert_eq!(position.wdl(), None);
    }

    #[test]
    fn test_thinking_frame_deserializes() {
        let frame: EvalUpdateFrame = serde_json::from_str(
            r#"{
                "thinkings": [{
                    "updateId": 31,
                    "nodes": 1500000,
                    "time": 2100,
                    "depth": 24,
                    "seldepth": 38,
                    "moves": [
                        {"nodes": 900000, "moveUci": "e2e4", "moveOppUci": "e7e5",
                         "moveSan": "e4", "pvSan": "1. e4 e5 2. Nf3",
                         "pvUci": ["e2e4", "e7e5", "g1f3"],
                         "scoreQ": 90, "scoreW": 330, "scoreD": 520, "scoreB": 150,
                         "mateScore": null, "movesLeft": 40},
                        {"nodes": 400000, "moveUci": "d2d4", "moveOppUci": "g8f6",
                         "moveSan": "d4", "pvSan": "1. d4 Nf6"}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let thinking = &frame.thinkings[0];
        assert_eq!(thinking.update_id, 31);
        assert_eq!(thinking.moves.len(), 2);

        let variations = thinking.variations();
        // Full line comes from pvUci when present
        assert_eq!(variations[0].moves.len(), 3);
        assert_eq!(variations[0].nodes, 900000);
        // Falls back to the move + reply pair otherwise
        assert_eq!(variations[1].moves.len(), 2);
        assert_eq!(variations[1].moves[0].to(), Square::D4);
    }

    #[test]
    fn test_bad_uci_ends_the_sequence() {
        let eval_move: EvalMove = serde_json::from_str(
            r#"{"nodes": 100, "moveUci": "e2e4", "pvUci": ["e2e4", "??", "g1f3"]}"#,
        )
        .unwrap();

        assert_eq!(eval_move.variation().moves.len(), 1);
    }

    #[test]
    fn test_player_label() {
        let player: PlayerInfo = serde_json::from_str(
            r#"{"name": "Carlsen, Magnus", "rating": 2839, "fideId": 1503014, "fed": "NOR"}"#,
        )
        .unwrap();
        assert_eq!(player.label(), "Carlsen, Magnus (2839)");

        let anonymous: PlayerInfo = serde_json::from_str(r#"{"name": "NN"}"#).unwrap();
        assert_eq!(anonymous.label(), "NN");
    }
}
