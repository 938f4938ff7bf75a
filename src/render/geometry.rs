use super::{BoardLayout, Point};
use crate::core::Square;

/******************************************\
|==========================================|
|           Coordinate Transform           |
|==========================================|
\******************************************/

/// Maximum lateral spread of a fanned arrow lane, in board units
/// (fractions of one square side)
pub const MAX_SPREAD: f64 = 0.8;

/// Returns the pixel position of a square's top-left corner.
///
/// With `flipped` set the board is seen from Black's side: files run
/// right-to-left and rows top-to-bottom.
///
/// ## Examples
///
/// ```
/// use boardcast::core::Square;
/// use boardcast::render::{to_pixel, BoardLayout};
///
/// let layout = BoardLayout { square_size: 80.0, border: 4.0 };
/// let p = to_pixel(Square::A1, false, &layout);
/// assert_eq!((p.x, p.y), (4.0, 564.0));
/// ```
pub fn to_pixel(square: Square, flipped: bool, layout: &BoardLayout) -> Point {
    to_pixel_f(
        square.file().index() as f64,
        square.rank().index() as f64,
        flipped,
        layout,
    )
}

/// Returns the pixel position of a square's center
pub fn to_pixel_center(square: Square, flipped: bool, layout: &BoardLayout) -> Point {
    let corner = to_pixel(square, flipped, layout);
    Point {
        x: corner.x + layout.square_size / 2.0,
        y: corner.y + layout.square_size / 2.0,
    }
}

/// Top-left transform over fractional board coordinates.
///
/// Arrow endpoints displaced by a lane offset live between squares, so the
/// transform accepts (file, row) as floats. The flip is applied here, at the
/// pixel stage, which keeps everything computed in board coordinates
/// (directions, displacements) orientation-independent.
pub fn to_pixel_f(file: f64, row: f64, flipped: bool, layout: &BoardLayout) -> Point {
    let size = layout.square_size;
    Point {
        x: (if flipped { 7.0 - file } else { file }) * size + layout.border,
        y: (if flipped { row } else { 7.0 - row }) * size + layout.border,
    }
}

/// Center transform over fractional board coordinates
pub fn center_f(file: f64, row: f64, flipped: bool, layout: &BoardLayout) -> Point {
    let corner = to_pixel_f(file, row, flipped, layout);
    Point {
        x: corner.x + layout.square_size / 2.0,
        y: corner.y + layout.square_size / 2.0,
    }
}

/******************************************\
|==========================================|
|             Travel Direction             |
|==========================================|
\******************************************/

/// Returns the travel direction of a move in rounded degrees.
///
/// Computed in board coordinates (Δrow, Δfile), never in screen pixels, so
/// the value is stable across orientation changes. Moving up the board
/// (towards rank 8) is 90°.
///
/// ## Examples
///
/// ```
/// use boardcast::core::Square;
/// use boardcast::render::direction;
///
/// assert_eq!(direction(Square::E2, Square::E4), 90);
/// assert_eq!(direction(Square::E2, Square::D4), 117);
/// ```
pub fn direction(from: Square, to: Square) -> i32 {
    let d_file = to.file().index() as f64 - from.file().index() as f64;
    let d_row = to.rank().index() as f64 - from.rank().index() as f64;
    d_row.atan2(d_file).to_degrees().round() as i32
}

/// Lateral displacement of fan slot `offset` out of `total`, in board units.
///
/// Slots are spaced evenly inside `spread` and centered on zero, so a lane
/// of one arrow is not displaced at all. The displacement uses the sine and
/// cosine of the travel direction itself, which is how the fan has always
/// been drawn; it is close to but not exactly perpendicular to the shaft.
pub fn lateral_displacement(offset: usize, total: usize, direction_deg: i32, spread: f64) -> (f64, f64) {
    let t = ((offset as f64 + 1.0) / (total as f64 + 1.0) - 0.5) * spread;
    let radians = f64::from(direction_deg).to_radians();
    (radians.sin() * t, radians.cos() * t)
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: BoardLayout = BoardLayout {
        square_size: 80.0,
        border: 4.0,
    };

    #[test]
    fn test_to_pixel_corners() {
        let a1 = to_pixel(Square::A1, false, &LAYOUT);
        assert_eq!((a1.x, a1.y), (4.0, 564.0));

        let h8 = to_pixel(Square::H8, false, &LAYOUT);
        assert_eq!((h8.x, h8.y), (564.0, 4.0));

        let a8 = to_pixel(Square::A8, false, &LAYOUT);
        assert_eq!((a8.x, a8.y), (4.0, 4.0));
    }

    #[test]
    fn test_to_pixel_flipped_mirrors_both_axes() {
        for sq in Square::iter() {
            let plain = to_pixel(sq, false, &LAYOUT);
            let flipped = to_pixel(sq, true, &LAYOUT);
            let span = 7.0 * LAYOUT.square_size;
            assert_eq!(plain.x + flipped.x, span + 2.0 * LAYOUT.border);
            assert_eq!(plain.y + flipped.y, span + 2.0 * LAYOUT.border);
        }
    }

    #[test]
    fn test_center_offset() {
        let corner = to_pixel(Square::E4, false, &LAYOUT);
        let center = to_pixel_center(Square::E4, false, &LAYOUT);
        assert_eq!(center.x, corner.x + 40.0);
        assert_eq!(center.y, corner.y + 40.0);
    }

    #[test]
    fn test_direction_examples() {
        // Straight up the board
        assert_eq!(direction(Square::E2, Square::E4), 90);
        // atan2(2, -1) rounds to 117
        assert_eq!(direction(Square::E2, Square::D4), 117);
        // Horizontal and downward travel
        assert_eq!(direction(Square::A1, Square::H1), 0);
        assert_eq!(direction(Square::E4, Square::E2), -90);
        assert_eq!(direction(Square::A8, Square::H1), -45);
    }

    #[test]
    fn test_direction_unaffected_by_flip() {
        // Orientation exists only at the pixel stage: the same squares land
        // on different pixels when flipped while their travel direction is
        // computed in board coordinates and never moves.
        let angle = direction(Square::G1, Square::F3);
        assert_eq!(angle, 117);
        assert_ne!(
            to_pixel(Square::G1, false, &LAYOUT),
            to_pixel(Square::G1, true, &LAYOUT)
        );
        assert_eq!(direction(Square::G1, Square::F3), angle);
    }

    #[test]
    fn test_lateral_displacement_single_slot_is_zero() {
        assert_eq!(lateral_displacement(0, 1, 90, MAX_SPREAD), (0.0, 0.0));
    }

    #[test]
    fn test_lateral_displacement_centered() {
        // Slots of a lane are symmetric around zero
        let (dx0, dy0) = lateral_displacement(0, 2, 90, MAX_SPREAD);
        let (dx1, dy1) = lateral_displacement(1, 2, 90, MAX_SPREAD);
        assert!((dx0 + dx1).abs() < 1e-12);
        assert!((dy0 + dy1).abs() < 1e-12);

        // For a vertical lane the sine term carries the whole displacement
        assert!(dx0 < 0.0);
        assert!(dy0.abs() < 1e-12);
    }

    #[test]
    fn test_lateral_displacement_spacing() {
        // Three slots at spread S sit at -S/4, 0, +S/4
        let spread = 0.8;
        let ts: Vec<f64> = (0..3)
            .map(|i| lateral_displacement(i, 3, 90, spread).0)
            .collect();
        assert!((ts[0] + spread / 4.0).abs() < 1e-12);
        assert!(ts[1].abs() < 1e-12);
        assert!((ts[2] - spread / 4.0).abs() < 1e-12);
    }
}
