use super::geometry::{self, MAX_SPREAD};
use super::{BoardLayout, Point, Primitive};
use crate::core::Move;

/******************************************\
|==========================================|
|               Dash Pattern               |
|==========================================|
\******************************************/

/// Dash length and gap applied along an arrow shaft, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub length: f64,
    pub gap: f64,
}

/******************************************\
|==========================================|
|                Arrow Spec                |
|==========================================|
\******************************************/

/// # Arrow specification
///
/// Everything needed to draw one candidate-move arrow: the move itself, its
/// visual parameters, its stacking bucket, and the fan slot the offset
/// allocator assigned it within its lane.

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowSpec {
    pub mv: Move,
    pub style: String,
    pub width: f64,
    pub head_length: f64,
    pub head_width: f64,
    pub dash: Option<DashPattern>,
    /// Stacking bucket: false draws beneath the pieces, true on top
    pub render_after_pieces: bool,
    /// Fan slot within the lane, 0-based
    pub offset: usize,
    /// Number of fan slots in the lane
    pub total_offsets: usize,
    /// Rounded travel direction in degrees, used for the lateral fan shift
    pub offset_direction: i32,
    pub outline_only: bool,
}

/******************************************\
|==========================================|
|              Arrow Renderer              |
|==========================================|
\******************************************/

impl ArrowSpec {
    /// Renders the arrow into its shaft and head primitives.
    ///
    /// The lane displacement is added to both endpoints in board units, so
    /// the whole arrow shifts laterally as one piece and flips together with
    /// the board. The shaft is shortened by the head length so the head caps
    /// it; a zero-length arrow renders nothing.
    pub fn render(&self, flipped: bool, layout: &BoardLayout) -> Vec<Primitive> {
        let (dx, dy) = geometry::lateral_displacement(
            self.offset,
            self.total_offsets,
            self.offset_direction,
            MAX_SPREAD,
        );

        let from = geometry::center_f(
            self.mv.from().file().index() as f64 + dx,
            self.mv.from().rank().index() as f64 + dy,
            flipped,
            layout,
        );
        let to = geometry::center_f(
            self.mv.to().file().index() as f64 + dx,
            self.mv.to().rank().index() as f64 + dy,
            flipped,
            layout,
        );

        let length = (to.x - from.x).hypot(to.y - from.y);
        if length == 0.0 {
            return Vec::new();
        }

        let ux = (to.x - from.x) / length;
        let uy = (to.y - from.y) / length;

        let head_length = self.head_length.min(length);
        let base = Point {
            x: to.x - ux * head_length,
            y: to.y - uy * head_length,
        };

        let mut primitives = vec![Primitive::Shaft {
            from,
            to: base,
            width: self.width,
            dash: self.dash,
            style: self.style.clone(),
            outline_only: self.outline_only,
        }];

        if head_length > 0.0 && self.head_width > 0.0 {
            let half_width = self.head_width / 2.0;
            primitives.push(Primitive::Head {
                points: [
                    to,
                    Point {
                        x: base.x - uy * half_width,
                        y: base.y + ux * half_width,
                    },
                    Point {
                        x: base.x + uy * half_width,
                        y: base.y - ux * half_width,
                    },
                ],
                style: self.style.clone(),
                outline_only: self.outline_only,
            });
        }

        primitives
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
