//! Checkerboard dither overlays.
//!
//! The display has no grays, so pressed and hovered states are drawn as a
//! sparse grid of black pixels over whatever is underneath.

use crate::theme::SlowColors;
use egui::{Color32, Painter, Pos2, Rect, Vec2};

/// How dense the checkerboard is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dither {
    /// Every other pixel. Used for pressed buttons and selected rows.
    Selection,
    /// One pixel in four. Used for hover.
    Hover,
}

impl Dither {
    fn step(self) -> i32 {
        match self {
            Dither::Selection => 1,
            Dither::Hover => 2,
        }
    }

    /// Paint this pattern over `rect`.
    pub fn paint(self, painter: &Painter, rect: Rect) {
        paint_checkerboard(painter, rect, SlowColors::BLACK, self.step());
    }
}

/// Offsets (relative to the rect's top-left) of the pixels that get filled.
///
/// Rows are `step` apart; odd rows are shifted by `step` so the dots form a
/// checkerboard.
pub fn checkerboard_points(width: i32, height: i32, step: i32) -> Vec<(i32, i32)> {
    let step = step.max(1);
    let mut points = Vec::new();
    let mut row = 0;
    let mut y = 0;
    while y < height {
        let mut x = if row % 2 == 0 { 0 } else { step };
        while x < width {
            points.push((x, y));
            x += step * 2;
        }
        y += step;
        row += 1;
    }
    points
}

fn paint_checkerboard(painter: &Painter, rect: Rect, color: Color32, step: i32) {
    let origin = Pos2::new(rect.min.x.floor(), rect.min.y.floor());
    let w = (rect.max.x - origin.x) as i32;
    let h = (rect.max.y - origin.y) as i32;
    for (dx, dy) in checkerboard_points(w, h, step) {
        let px = Rect::from_min_size(origin + Vec2::new(dx as f32, dy as f32), Vec2::splat(1.0));
        painter.rect_filled(px, 0.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_covers_half() {
        let pts = checkerboard_points(4, 4, 1);
        assert_eq!(pts.len(), 8);
        assert!(pts.contains(&(0, 0)));
        assert!(pts.contains(&(1, 1)));
        assert!(!pts.contains(&(1, 0)));
    }

    #[test]
    fn test_hover_is_sparser() {
        let dense = checkerboard_points(8, 8, Dither::Selection.step());
        let sparse = checkerboard_points(8, 8, Dither::Hover.step());
        assert!(sparse.len() < dense.len());
        assert!(sparse.contains(&(2, 2)));
    }

    #[test]
    fn test_empty_rect() {
        assert!(checkerboard_points(0, 10, 1).is_empty());
    }
}
