use egui::Pos2;

/// Visits every integer pixel on the 8-connected path from `p1` to `p2`
/// inclusive, in stepping order, each pixel exactly once.
///
/// Classic integer error-accumulator line walk; endpoints are truncated
/// toward zero before stepping so no floating-point rounding is involved.
/// Equal endpoints visit exactly one point.
pub fn for_each_line_point(p1: Pos2, p2: Pos2, mut visit: impl FnMut(i32, i32)) {
    let mut x1 = p1.x as i32;
    let x2 = p2.x as i32;
    let mut y1 = p1.y as i32;
    let y2 = p2.y as i32;

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    visit(x1, y1);
    while x1 != x2 || y1 != y2 {
        let e2 = err * 2;
        if e2 > -dy {
            err -= dy;
            x1 += sx;
        }
        if e2 < dx {
            err += dx;
            y1 += sy;
        }
        visit(x1, y1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn collect(p1: Pos2, p2: Pos2) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        for_each_line_point(p1, p2, |x, y| points.push((x, y)));
        points
    }

    #[test]
    fn degenerate_line_visits_one_point() {
        assert_eq!(collect(pos2(3.0, 4.0), pos2(3.0, 4.0)), vec![(3, 4)]);
        // Distinct floats landing in the same pixel are still one point.
        assert_eq!(collect(pos2(3.2, 4.9), pos2(3.8, 4.1)), vec![(3, 4)]);
    }

    #[test]
    fn horizontal_line_in_order() {
        assert_eq!(
            collect(pos2(0.0, 0.0), pos2(3.0, 0.0)),
            vec![(0, 0), (1, 0), (2, 0), (3, 0)]
        );
    }

    #[test]
    fn diagonal_line_is_eight_connected() {
        let points = collect(pos2(0.0, 0.0), pos2(4.0, 4.0));
        assert_eq!(points, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn endpoint_order_gives_same_pixel_set() {
        let mut forward = collect(pos2(-2.0, 1.0), pos2(7.0, 5.0));
        let mut backward = collect(pos2(7.0, 5.0), pos2(-2.0, 1.0));
        forward.sort_unstable();
        backward.sort_unstable();
        assert_eq!(forward, backward);
    }

    #[test]
    fn no_pixel_visited_twice() {
        let points = collect(pos2(0.0, 0.0), pos2(11.0, 3.0));
        let mut deduped = points.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), points.len());
    }
}
