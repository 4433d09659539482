// src/selection_logic.rs
// Gesture tracking only; drawing lives in selection.rs.

use std::fmt;

/// Pointer position in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Bounding box of two corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Region {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    /// Exclusive right edge, widened so huge values cannot wrap.
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureState {
    pub anchor: Point,
    pub current: Point,
}

impl GestureState {
    pub fn candidate(&self) -> Region {
        Region::from_points(self.anchor, self.current)
    }
}

/// Selector lifecycle.
///
/// Released has no variant of its own: a release resolves within the same
/// `handle` call, to `Finalizing` when the bounding box meets the minimum
/// size and back to `Idle` otherwise, so no caller can observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Idle,
    Dragging(GestureState),
    /// A committed region is waiting to be cropped.
    Finalizing(Region),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    Cancel,
}

/// What the overlay host must do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorAction {
    /// Nothing changed on screen.
    None,
    /// Repaint the spotlight for this gesture.
    Redraw(GestureState),
    /// Region met the minimum size; crop it now.
    Commit(Region),
    /// Region was too small; repaint without a selection.
    Discard(Region),
    Cancel,
}

/// Single-gesture region selector.
///
/// Idle -> Dragging on press, Dragging -> Finalizing (large enough) or
/// Idle (too small) on release, Idle/Dragging -> Cancelled on cancel.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    state: SelectorState,
    min_width: u32,
    min_height: u32,
}

impl RegionSelector {
    pub fn new(min_width: u32, min_height: u32) -> Self {
        RegionSelector { state: SelectorState::Idle, min_width, min_height }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn handle(&mut self, event: SelectorEvent) -> SelectorAction {
        match (self.state, event) {
            (SelectorState::Idle | SelectorState::Dragging(_), SelectorEvent::Cancel) => {
                self.state = SelectorState::Cancelled;
                SelectorAction::Cancel
            }
            // A second press while dragging starts over from the new anchor.
            (SelectorState::Idle | SelectorState::Dragging(_), SelectorEvent::Press(p)) => {
                let gesture = GestureState { anchor: p, current: p };
                self.state = SelectorState::Dragging(gesture);
                SelectorAction::Redraw(gesture)
            }
            (SelectorState::Dragging(mut gesture), SelectorEvent::Move(p)) => {
                if gesture.current == p {
                    return SelectorAction::None;
                }
                gesture.current = p;
                self.state = SelectorState::Dragging(gesture);
                SelectorAction::Redraw(gesture)
            }
            (SelectorState::Dragging(mut gesture), SelectorEvent::Release(p)) => {
                gesture.current = p;
                let region = gesture.candidate();
                if region.width >= self.min_width && region.height >= self.min_height {
                    self.state = SelectorState::Finalizing(region);
                    SelectorAction::Commit(region)
                } else {
                    self.state = SelectorState::Idle;
                    SelectorAction::Discard(region)
                }
            }
            _ => SelectorAction::None,
        }
    }

    /// Drops a committed region that could not be cropped.
    pub fn reject_commit(&mut self) {
        if let SelectorState::Finalizing(_) = self.state {
            self.state = SelectorState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(sel: &mut RegionSelector, from: (u32, u32), to: (u32, u32)) -> SelectorAction {
        sel.handle(SelectorEvent::Press(Point::new(from.0, from.1)));
        sel.handle(SelectorEvent::Move(Point::new(to.0, to.1)));
        sel.handle(SelectorEvent::Release(Point::new(to.0, to.1)))
    }

    #[test]
    fn bounding_box_in_every_drag_direction() {
        let cases = [
            ((100, 100), (400, 300)),
            ((400, 300), (100, 100)),
            ((400, 100), (100, 300)),
            ((100, 300), (400, 100)),
        ];
        for (a, b) in cases {
            let r = Region::from_points(Point::new(a.0, a.1), Point::new(b.0, b.1));
            assert_eq!(r, Region::new(100, 100, 300, 200), "{:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn large_drag_commits() {
        let mut sel = RegionSelector::new(10, 10);
        let action = drag(&mut sel, (100, 100), (400, 300));
        assert_eq!(action, SelectorAction::Commit(Region::new(100, 100, 300, 200)));
        assert_eq!(sel.state(), SelectorState::Finalizing(Region::new(100, 100, 300, 200)));
    }

    #[test]
    fn small_drag_returns_to_idle() {
        let mut sel = RegionSelector::new(10, 10);
        let action = drag(&mut sel, (100, 100), (105, 104));
        assert_eq!(action, SelectorAction::Discard(Region::new(100, 100, 5, 4)));
        assert_eq!(sel.state(), SelectorState::Idle);
    }

    #[test]
    fn exact_minimum_is_accepted() {
        let mut sel = RegionSelector::new(10, 10);
        assert!(matches!(drag(&mut sel, (0, 0), (10, 10)), SelectorAction::Commit(_)));
        let mut sel = RegionSelector::new(10, 10);
        assert!(matches!(drag(&mut sel, (0, 0), (10, 9)), SelectorAction::Discard(_)));
    }

    #[test]
    fn release_never_leaves_selector_mid_gesture() {
        for (to, committed) in [((400, 300), true), ((105, 104), false)] {
            let mut sel = RegionSelector::new(10, 10);
            drag(&mut sel, (100, 100), to);
            match sel.state() {
                SelectorState::Finalizing(_) => assert!(committed),
                SelectorState::Idle => assert!(!committed),
                other => panic!("unexpected state after release: {:?}", other),
            }
        }
    }

    #[test]
    fn release_point_overrides_last_move() {
        let mut sel = RegionSelector::new(10, 10);
        sel.handle(SelectorEvent::Press(Point::new(0, 0)));
        sel.handle(SelectorEvent::Move(Point::new(5, 5)));
        let action = sel.handle(SelectorEvent::Release(Point::new(50, 40)));
        assert_eq!(action, SelectorAction::Commit(Region::new(0, 0, 50, 40)));
    }

    #[test]
    fn moves_and_releases_ignored_when_idle() {
        let mut sel = RegionSelector::new(10, 10);
        assert_eq!(sel.handle(SelectorEvent::Move(Point::new(3, 3))), SelectorAction::None);
        assert_eq!(sel.handle(SelectorEvent::Release(Point::new(3, 3))), SelectorAction::None);
        assert_eq!(sel.state(), SelectorState::Idle);
    }

    #[test]
    fn repeated_move_to_same_point_skips_redraw() {
        let mut sel = RegionSelector::new(10, 10);
        sel.handle(SelectorEvent::Press(Point::new(1, 1)));
        assert!(matches!(sel.handle(SelectorEvent::Move(Point::new(8, 8))), SelectorAction::Redraw(_)));
        assert_eq!(sel.handle(SelectorEvent::Move(Point::new(8, 8))), SelectorAction::None);
    }

    #[test]
    fn cancel_from_idle_and_dragging() {
        let mut sel = RegionSelector::new(10, 10);
        assert_eq!(sel.handle(SelectorEvent::Cancel), SelectorAction::Cancel);
        assert_eq!(sel.state(), SelectorState::Cancelled);
        // terminal
        assert_eq!(sel.handle(SelectorEvent::Press(Point::new(1, 1))), SelectorAction::None);

        let mut sel = RegionSelector::new(10, 10);
        sel.handle(SelectorEvent::Press(Point::new(1, 1)));
        sel.handle(SelectorEvent::Move(Point::new(80, 80)));
        assert_eq!(sel.handle(SelectorEvent::Cancel), SelectorAction::Cancel);
        assert_eq!(sel.state(), SelectorState::Cancelled);
    }

    #[test]
    fn rejected_commit_allows_new_gesture() {
        let mut sel = RegionSelector::new(10, 10);
        drag(&mut sel, (0, 0), (50, 50));
        sel.reject_commit();
        assert_eq!(sel.state(), SelectorState::Idle);
        assert!(matches!(sel.handle(SelectorEvent::Press(Point::new(2, 2))), SelectorAction::Redraw(_)));
    }

    #[test]
    fn region_bounds_do_not_wrap() {
        let r = Region::new(u32::MAX, 0, 10, 10);
        assert!(!r.fits_within(u32::MAX, 100));
    }
}
