use winit::event::MouseButton;

/// Pointer tracking for the orbit controls: primary drag orbits, secondary
/// drag pans, wheel zooms.
#[derive(Default, Debug, Clone, Copy)]
pub struct PointerState {
    position: Option<(f32, f32)>,
    orbiting: bool,
    panning: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDrag {
    Orbit { dx: f32, dy: f32 },
    Pan { dx: f32, dy: f32 },
}

impl PointerState {
    pub fn handle_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.orbiting = pressed,
            MouseButton::Right => self.panning = pressed,
            _ => {}
        }
    }

    /// Feed a new cursor position; returns the drag to apply, if any.
    pub fn handle_motion(&mut self, x: f32, y: f32) -> Option<PointerDrag> {
        let previous = self.position.replace((x, y))?;
        let dx = x - previous.0;
        let dy = y - previous.1;
        if self.orbiting {
            Some(PointerDrag::Orbit { dx, dy })
        } else if self.panning {
            Some(PointerDrag::Pan { dx, dy })
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.position = None;
        self.orbiting = false;
        self.panning = false;
    }
}
