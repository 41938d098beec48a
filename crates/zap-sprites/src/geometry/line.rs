//! Integer segment/segment intersection.

use glam::IVec2;

/// Outcome of [`line_intersection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHit {
    /// The segments do not touch.
    Miss,
    /// The segments cross at this (rounded) point.
    Point(IVec2),
    /// The segments are parallel or collinear.
    Parallel,
}

/// Intersect segment `p1..p2` with segment `p3..p4`.
///
/// Works in `i128`: the line coefficients of `i32` endpoints need 65 bits and
/// the crossing numerators nearly 100.
/// The crossing point is rounded to the nearest integer, away from zero on ties.
pub fn line_intersection(p1: IVec2, p2: IVec2, p3: IVec2, p4: IVec2) -> LineHit {
    let (x1, y1) = (p1.x as i128, p1.y as i128);
    let (x2, y2) = (p2.x as i128, p2.y as i128);
    let (x3, y3) = (p3.x as i128, p3.y as i128);
    let (x4, y4) = (p4.x as i128, p4.y as i128);

    // Bounding box rejection, one axis at a time.
    if x1.max(x2) < x3.min(x4) || x3.max(x4) < x1.min(x2) {
        return LineHit::Miss;
    }
    if y1.max(y2) < y3.min(y4) || y3.max(y4) < y1.min(y2) {
        return LineHit::Miss;
    }

    // Line 1 as a1*x + b1*y + c1 = 0; both ends of segment 2 on one side means no hit.
    let a1 = y2 - y1;
    let b1 = x1 - x2;
    let c1 = x2 * y1 - x1 * y2;
    let r3 = a1 * x3 + b1 * y3 + c1;
    let r4 = a1 * x4 + b1 * y4 + c1;
    if r3 != 0 && r4 != 0 && same_sign(r3, r4) {
        return LineHit::Miss;
    }

    let a2 = y4 - y3;
    let b2 = x3 - x4;
    let c2 = x4 * y3 - x3 * y4;
    let r1 = a2 * x1 + b2 * y1 + c2;
    let r2 = a2 * x2 + b2 * y2 + c2;
    if r1 != 0 && r2 != 0 && same_sign(r1, r2) {
        return LineHit::Miss;
    }

    let denom = a1 * b2 - a2 * b1;
    if denom == 0 {
        return LineHit::Parallel;
    }

    let offset = denom.abs() / 2;
    let round_div = |num: i128| {
        if num < 0 {
            (num - offset) / denom
        } else {
            (num + offset) / denom
        }
    };
    let x = round_div(b1 * c2 - b2 * c1);
    let y = round_div(a2 * c1 - a1 * c2);

    // The rounded crossing lies inside both bounding boxes, so it fits in i32.
    LineHit::Point(IVec2::new(narrow(x), narrow(y)))
}

#[inline]
fn same_sign(a: i128, b: i128) -> bool {
    (a ^ b) >= 0
}

#[inline]
fn narrow(v: i128) -> i32 {
    v.clamp(i32::MIN as i128, i32::MAX as i128) as i32
}
