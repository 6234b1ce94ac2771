// interaction.rs — 指针状态机：拖拽、自转与工具提示判定

use glam::Vec2;

use crate::camera::Camera;
use crate::geo::MarkerPlacement;
use crate::picking;

pub const DRAG_SENSITIVITY: f32 = 0.01; // rad / px
pub const SPIN_INCREMENT: f32 = 0.002; // rad / frame

#[derive(Debug, Default, Clone, Copy)]
pub struct PointerState {
    pub pressed: bool,
    pub pressed_on_marker: bool,
    pub last_x: f32,
}

/// Globe and cloud layer yaw. Both advance through the same code paths and
/// stay equal; they are separate fields because the renderer feeds them to
/// two different model matrices.
#[derive(Debug, Default, Clone, Copy)]
pub struct RotationState {
    pub globe_yaw: f32,
    pub cloud_yaw: f32,
}

/// What a pointer event decided about the tooltip. The caller owns the
/// tooltip; the state machine only reports the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAction {
    /// Show the tooltip for this location index.
    Show(usize),
    Hide,
    Unchanged,
}

pub struct Interaction {
    pub pointer: PointerState,
    pub rotation: RotationState,
    drag_sensitivity: f32,
    spin_increment: f32,
}

impl Interaction {
    pub fn new(drag_sensitivity: f32, spin_increment: f32) -> Self {
        Self {
            pointer: PointerState::default(),
            rotation: RotationState::default(),
            drag_sensitivity,
            spin_increment,
        }
    }

    /// Left button went down. A press that lands on a marker acts like a
    /// hover (same tooltip) and never starts a drag; a press on empty
    /// space arms dragging and leaves the tooltip alone.
    pub fn on_pointer_down(
        &mut self,
        pixel: Vec2,
        viewport: Vec2,
        placements: &[MarkerPlacement],
        camera: &Camera,
    ) -> TooltipAction {
        match picking::pick(placements, self.rotation.globe_yaw, camera, pixel, viewport) {
            Some(hit) => {
                self.pointer.pressed_on_marker = true;
                TooltipAction::Show(placements[hit.index].location)
            }
            None => {
                self.pointer.pressed = true;
                self.pointer.last_x = pixel.x;
                TooltipAction::Unchanged
            }
        }
    }

    /// Pointer moved. Every move re-picks once: over a marker the tooltip
    /// shows, over empty space it hides. While a drag is armed the
    /// horizontal delta turns the globe.
    pub fn on_pointer_move(
        &mut self,
        pixel: Vec2,
        viewport: Vec2,
        placements: &[MarkerPlacement],
        camera: &Camera,
    ) -> TooltipAction {
        let action =
            match picking::pick(placements, self.rotation.globe_yaw, camera, pixel, viewport) {
                Some(hit) => TooltipAction::Show(placements[hit.index].location),
                None => TooltipAction::Hide,
            };

        if self.pointer.pressed && !self.pointer.pressed_on_marker {
            let delta = (pixel.x - self.pointer.last_x) * self.drag_sensitivity;
            self.apply_yaw(delta);
            self.pointer.last_x = pixel.x;
        }

        action
    }

    pub fn on_pointer_up(&mut self) {
        self.release();
    }

    /// The cursor left the window mid-gesture. Treated like a release;
    /// the tooltip keeps whatever the last move decided.
    pub fn on_pointer_leave(&mut self) {
        self.release();
    }

    /// Constant spin applied once per rendered frame, on top of any drag.
    pub fn advance_frame(&mut self) {
        self.apply_yaw(self.spin_increment);
    }

    fn apply_yaw(&mut self, delta: f32) {
        self.rotation.globe_yaw += delta;
        self.rotation.cloud_yaw += delta;
    }

    fn release(&mut self) {
        self.pointer.pressed = false;
        self.pointer.pressed_on_marker = false;
    }
}
