// tooltip.rs — 工具提示定位（避开窗口边缘）

use glam::Vec2;

use crate::interaction::TooltipAction;

pub const PADDING: f32 = 20.0;
pub const MAX_WIDTH: f32 = 500.0;

/// Place a tooltip of `size` next to the pointer without leaving the
/// viewport: to the right of the cursor unless that overflows the right
/// edge, above it unless that pokes past the top.
pub fn anchor_tooltip(pointer: Vec2, size: Vec2, viewport: Vec2) -> Vec2 {
    let mut left = pointer.x + PADDING;
    if left + size.x > viewport.x {
        left = viewport.x - size.x - PADDING;
    }

    let mut top = pointer.y - size.y - PADDING;
    if top < 0.0 {
        top = pointer.y + PADDING;
    }

    Vec2::new(left, top)
}

/// Which marker the tooltip shows, and where. Immediate-mode UI measures
/// text while laying it out, so the anchor uses the size measured on the
/// previous frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct TooltipState {
    pub marker: Option<usize>,
    pub pointer: Vec2,
    pub measured: Vec2,
}

impl TooltipState {
    pub fn apply(&mut self, action: TooltipAction, pointer: Vec2) {
        match action {
            TooltipAction::Show(index) => {
                self.marker = Some(index);
                self.pointer = pointer;
            }
            TooltipAction::Hide => {
                self.marker = None;
            }
            TooltipAction::Unchanged => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sits_right_of_and_above_the_pointer() {
        let pos = anchor_tooltip(
            Vec2::new(100.0, 300.0),
            Vec2::new(120.0, 60.0),
            Vec2::new(1000.0, 800.0),
        );
        assert_eq!(pos, Vec2::new(120.0, 220.0));
    }

    #[test]
    fn clamps_to_the_right_edge() {
        let pos = anchor_tooltip(
            Vec2::new(950.0, 300.0),
            Vec2::new(120.0, 60.0),
            Vec2::new(1000.0, 800.0),
        );
        assert_eq!(pos.x, 1000.0 - 120.0 - PADDING);
        assert_eq!(pos.y, 220.0);
    }

    #[test]
    fn flips_below_the_pointer_near_the_top() {
        let pos = anchor_tooltip(
            Vec2::new(500.0, 30.0),
            Vec2::new(120.0, 60.0),
            Vec2::new(1000.0, 800.0),
        );
        assert_eq!(pos, Vec2::new(520.0, 50.0));
    }

    #[test]
    fn handles_a_top_right_corner_pointer() {
        let pos = anchor_tooltip(
            Vec2::new(990.0, 10.0),
            Vec2::new(120.0, 60.0),
            Vec2::new(1000.0, 800.0),
        );
        assert_eq!(pos, Vec2::new(860.0, 30.0));
    }

    #[test]
    fn state_follows_show_and_hide_actions() {
        let mut state = TooltipState::default();

        state.apply(TooltipAction::Show(2), Vec2::new(400.0, 250.0));
        assert_eq!(state.marker, Some(2));
        assert_eq!(state.pointer, Vec2::new(400.0, 250.0));

        state.apply(TooltipAction::Unchanged, Vec2::new(666.0, 666.0));
        assert_eq!(state.marker, Some(2));
        assert_eq!(state.pointer, Vec2::new(400.0, 250.0));

        state.apply(TooltipAction::Hide, Vec2::new(0.0, 0.0));
        assert_eq!(state.marker, None);
    }
}
