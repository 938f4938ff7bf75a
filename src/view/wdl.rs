/******************************************\
|==========================================|
|                WDL Scores                |
|==========================================|
\******************************************/

/// Win/draw/loss expectation in permille, White's perspective, as the
/// evaluation feed reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WdlScore {
    pub win: u16,
    pub draw: u16,
    pub loss: u16,
}

impl WdlScore {
    pub const fn new(win: u16, draw: u16, loss: u16) -> Self {
        Self { win, draw, loss }
    }
}

/// Splits a probability bar of `width` pixels into win/draw/loss segment
/// widths, proportional to the three scores. A degenerate all-zero score
/// fills the bar with the draw segment.
pub fn bar_segments(score: WdlScore, width: f64) -> [f64; 3] {
    let total = f64::from(score.win) + f64::from(score.draw) + f64::from(score.loss);
    if total == 0.0 {
        return [0.0, width, 0.0];
    }

    [
        f64::from(score.win) / total * width,
        f64::from(score.draw) / total * width,
        f64::from(score.loss) / total * width,
    ]
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
