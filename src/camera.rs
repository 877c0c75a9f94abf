use glam::{Mat4, Vec2, Vec3};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

pub const FOV_Y_DEGREES: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;
pub const RESET_POSITION: Vec3 = Vec3::new(1.5, 1.0, 1.5);

pub const ROTATE_SPEED: f32 = 0.005; // radians per pixel dragged
pub const ZOOM_STEP: f32 = 0.95;
pub const ARROW_ROTATE_STEP: f32 = 0.05;
const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 500.0;
const POLAR_EPSILON: f32 = 1e-3;

/// Orbit camera around a fixed target
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Angle around +Y measured from +Z
    pub azimuth: f32,
    /// Angle down from +Y
    pub polar: f32,
    pub aspect: f32,
    dragging: bool,
    last_cursor: Option<Vec2>,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            radius: 1.0,
            azimuth: 0.0,
            polar: 0.0,
            aspect,
            dragging: false,
            last_cursor: None,
        };
        camera.reset();
        camera
    }

    /// Move back to the initial viewpoint looking at the origin
    pub fn reset(&mut self) {
        self.target = Vec3::ZERO;
        self.look_from(RESET_POSITION);
    }

    fn look_from(&mut self, position: Vec3) {
        let offset = position - self.target;
        self.radius = offset.length().clamp(MIN_RADIUS, MAX_RADIUS);
        self.azimuth = offset.x.atan2(offset.z);
        self.polar = (offset.y / offset.length()).clamp(-1.0, 1.0).acos();
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth += delta_azimuth;
        self.polar = (self.polar + delta_polar).clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = (self.radius * factor).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, Z_NEAR, Z_FAR)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state.is_pressed();
            if !self.dragging {
                self.last_cursor = None;
            }
        }
    }

    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        let cursor = Vec2::new(x as f32, y as f32);
        if self.dragging {
            if let Some(last) = self.last_cursor {
                let delta = cursor - last;
                self.rotate(-delta.x * ROTATE_SPEED, -delta.y * ROTATE_SPEED);
            }
        }
        self.last_cursor = Some(cursor);
    }

    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
        };
        if lines != 0.0 {
            self.zoom(ZOOM_STEP.powf(lines));
        }
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        if !event.state.is_pressed() {
            return;
        }
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyR => self.reset(),
                KeyCode::ArrowLeft => self.rotate(-ARROW_ROTATE_STEP, 0.0),
                KeyCode::ArrowRight => self.rotate(ARROW_ROTATE_STEP, 0.0),
                KeyCode::ArrowUp => self.rotate(0.0, -ARROW_ROTATE_STEP),
                KeyCode::ArrowDown => self.rotate(0.0, ARROW_ROTATE_STEP),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn reset_places_camera_at_reset_position() {
        let camera = OrbitCamera::new(1.0);
        assert!(close(camera.position(), RESET_POSITION));
    }

    #[test]
    fn reset_after_rotate_and_zoom() {
        let mut camera = OrbitCamera::new(1.0);
        camera.rotate(1.0, 0.3);
        camera.zoom(3.0);
        camera.reset();
        assert!(close(camera.position(), RESET_POSITION));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = OrbitCamera::new(1.0);
        camera.zoom(1e-6);
        assert_eq!(camera.radius, MIN_RADIUS);
        camera.zoom(1e9);
        assert_eq!(camera.radius, MAX_RADIUS);
    }

    #[test]
    fn rotate_keeps_polar_off_the_poles() {
        let mut camera = OrbitCamera::new(1.0);
        camera.rotate(0.0, -10.0);
        assert!(camera.polar > 0.0);
        camera.rotate(0.0, 10.0);
        assert!(camera.polar < std::f32::consts::PI);
    }

    #[test]
    fn drag_rotates_only_while_pressed() {
        let mut camera = OrbitCamera::new(1.0);
        let azimuth = camera.azimuth;

        camera.process_cursor_moved(0.0, 0.0);
        camera.process_cursor_moved(100.0, 0.0);
        assert_eq!(camera.azimuth, azimuth);

        camera.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        camera.process_cursor_moved(200.0, 0.0);
        assert!((camera.azimuth - (azimuth - 100.0 * ROTATE_SPEED)).abs() < 1e-5);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut camera = OrbitCamera::new(1.0);
        camera.set_aspect(1920, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
        camera.set_aspect(100, 0);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = OrbitCamera::new(1.5);
        let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }
}
