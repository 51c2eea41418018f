//! Swept axis-aligned collision against level regions
//!
//! Each axis is resolved separately. The player's box is stretched to cover
//! the tick's displacement and tested against every region. When several
//! regions overlap the swept box the first one in level order is used, which
//! can clip through corners on fast diagonal movement.

use crate::Rect;
use crate::level::Region;

/// Outcome of resolving one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisResult {
    /// Resolved coordinate on the tested axis
    pub pos: f32,
    /// A region was hit; velocity on this axis should be zeroed
    pub hit: bool,
}

/// The box covering `rect` and `rect` moved by `dx`
pub fn swept_horizontal(rect: Rect, dx: f32) -> Rect {
    if dx < 0.0 {
        Rect::new(rect.x + dx, rect.y, rect.w - dx, rect.h)
    } else {
        Rect::new(rect.x, rect.y, rect.w + dx, rect.h)
    }
}

/// The box covering `rect` and `rect` moved by `dy`
pub fn swept_vertical(rect: Rect, dy: f32) -> Rect {
    if dy < 0.0 {
        Rect::new(rect.x, rect.y + dy, rect.w, rect.h - dy)
    } else {
        Rect::new(rect.x, rect.y, rect.w, rect.h + dy)
    }
}

/// First region in storage order intersecting `swept`
pub fn first_hit<'a>(regions: &'a [Region], swept: &Rect) -> Option<&'a Region> {
    regions.iter().find(|r| r.rect.intersects(swept))
}

/// Resolve vertical movement of `rect` by `dy`. Falling onto a region lands
/// on its top edge, rising into one stops at its bottom edge.
pub fn resolve_vertical(regions: &[Region], rect: Rect, dy: f32) -> AxisResult {
    if dy == 0.0 {
        return AxisResult {
            pos: rect.y,
            hit: false,
        };
    }
    match first_hit(regions, &swept_vertical(rect, dy)) {
        Some(region) if dy > 0.0 => AxisResult {
            pos: region.rect.y - rect.h,
            hit: true,
        },
        Some(region) => AxisResult {
            pos: region.rect.bottom(),
            hit: true,
        },
        None => AxisResult {
            pos: rect.y + dy,
            hit: false,
        },
    }
}

/// Resolve horizontal movement of `rect` by `dx`, stopping flush against the
/// near edge of the region hit
pub fn resolve_horizontal(regions: &[Region], rect: Rect, dx: f32) -> AxisResult {
    if dx == 0.0 {
        return AxisResult {
            pos: rect.x,
            hit: false,
        };
    }
    match first_hit(regions, &swept_horizontal(rect, dx)) {
        Some(region) if dx > 0.0 => AxisResult {
            pos: region.rect.x - rect.w,
            hit: true,
        },
        Some(region) => AxisResult {
            pos: region.rect.right(),
            hit: true,
        },
        None => AxisResult {
            pos: rect.x + dx,
            hit: false,
        },
    }
}
