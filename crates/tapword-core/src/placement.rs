use tapword_types::{Placement, PlacementSide, Point, Rect, Size};

/// Position a popup of `popup` size near `anchor`, keeping `margin` pixels
/// clear of the viewport edges.
///
/// The popup starts bottom-aligned and horizontally centred on the anchor.
/// Horizontal overflow shifts the anchor; a popup that would leave the top of
/// the viewport is flipped below `selection`, unless that overflows the bottom
/// too, in which case it stays above.
pub fn place(
    anchor: Point,
    selection: Rect,
    popup: Size,
    viewport: Size,
    margin: f64,
    gap: f64,
) -> Placement {
    let half = popup.width / 2.0;

    let mut x = anchor.x;
    if x + half > viewport.width - margin {
        x = viewport.width - margin - half;
    }
    if x - half < margin {
        x = margin + half;
    }

    let above_top = anchor.y - popup.height;
    if above_top < margin {
        let below_top = selection.bottom() + gap;
        if below_top + popup.height <= viewport.height - margin {
            return Placement {
                anchor: Point::new(x, below_top),
                side: PlacementSide::Below,
                bounds: Rect::new(x - half, below_top, popup.width, popup.height),
            };
        }
    }

    Placement {
        anchor: Point::new(x, anchor.y),
        side: PlacementSide::Above,
        bounds: Rect::new(x - half, above_top, popup.width, popup.height),
    }
}

/// Fit a new popup size into an existing placement. Side and adjusted anchor
/// are kept; the box grows away from the anchor.
pub fn resize(placement: Placement, popup: Size) -> Placement {
    let left = placement.anchor.x - popup.width / 2.0;
    let top = match placement.side {
        PlacementSide::Above => placement.anchor.y - popup.height,
        PlacementSide::Below => placement.anchor.y,
    };

    Placement {
        bounds: Rect::new(left, top, popup.width, popup.height),
        ..placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGIN: f64 = 10.0;
    const GAP: f64 = 8.0;

    fn selection_at(x: f64, y: f64) -> Rect {
        Rect::new(x - 20.0, y, 40.0, 16.0)
    }

    #[test]
    fn centred_above_when_it_fits() {
        let placement = place(
            Point::new(200.0, 300.0),
            selection_at(200.0, 300.0),
            Size::new(120.0, 80.0),
            Size::new(400.0, 800.0),
            MARGIN,
            GAP,
        );
        assert_eq!(placement.side, PlacementSide::Above);
        assert_eq!(placement.bounds, Rect::new(140.0, 220.0, 120.0, 80.0));
    }

    #[test]
    fn right_overflow_shifts_left() {
        let placement = place(
            Point::new(395.0, 300.0),
            selection_at(395.0, 300.0),
            Size::new(200.0, 80.0),
            Size::new(400.0, 800.0),
            MARGIN,
            GAP,
        );
        assert!(placement.bounds.right() <= 390.0);
        assert_eq!(placement.anchor.x, 290.0);
    }

    #[test]
    fn left_underflow_shifts_right() {
        let placement = place(
            Point::new(5.0, 300.0),
            selection_at(5.0, 300.0),
            Size::new(200.0, 80.0),
            Size::new(400.0, 800.0),
            MARGIN,
            GAP,
        );
        assert_eq!(placement.bounds.left, MARGIN);
    }

    #[test]
    fn top_underflow_flips_below_selection() {
        let selection = selection_at(200.0, 40.0);
        let placement = place(
            Point::new(200.0, 40.0),
            selection,
            Size::new(120.0, 80.0),
            Size::new(400.0, 800.0),
            MARGIN,
            GAP,
        );
        assert_eq!(placement.side, PlacementSide::Below);
        assert_eq!(placement.bounds.top, selection.bottom() + GAP);
    }

    #[test]
    fn stays_above_when_below_would_overflow_too() {
        let placement = place(
            Point::new(200.0, 50.0),
            selection_at(200.0, 50.0),
            Size::new(120.0, 80.0),
            Size::new(400.0, 120.0),
            MARGIN,
            GAP,
        );
        assert_eq!(placement.side, PlacementSide::Above);
        assert_eq!(placement.bounds.top, -30.0);
    }

    #[test]
    fn resize_above_grows_upward() {
        let placement = place(
            Point::new(200.0, 300.0),
            selection_at(200.0, 300.0),
            Size::new(200.0, 40.0),
            Size::new(400.0, 800.0),
            MARGIN,
            GAP,
        );
        assert_eq!(placement.bounds, Rect::new(100.0, 260.0, 200.0, 40.0));

        let grown = resize(placement, Size::new(200.0, 160.0));
        assert_eq!(grown.side, PlacementSide::Above);
        assert_eq!(grown.anchor, placement.anchor);
        assert_eq!(grown.bounds, Rect::new(100.0, 140.0, 200.0, 160.0));
    }

    #[test]
    fn resize_below_grows_downward() {
        let placement = place(
            Point::new(200.0, 30.0),
            selection_at(200.0, 30.0),
            Size::new(120.0, 80.0),
            Size::new(400.0, 800.0),
            MARGIN,
            GAP,
        );
        assert_eq!(placement.side, PlacementSide::Below);

        let grown = resize(placement, Size::new(120.0, 200.0));
        assert_eq!(grown.bounds.top, placement.bounds.top);
        assert_eq!(grown.bounds.height, 200.0);
    }
}
