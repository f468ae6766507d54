use glam::{Mat4, Vec3};

/// The camera contract an orbit rig drives.
///
/// The host keeps ownership of whatever engine object sits behind this;
/// the controller only writes a position and a look-at point each frame
/// and reads back the basis vectors.
pub trait CameraHandle {
    /// Move the camera to `position` in world space.
    fn set_position(&mut self, position: Vec3);

    /// Orient the camera so it faces `point`.
    fn look_at(&mut self, point: Vec3);

    /// Current world-space position.
    fn position(&self) -> Vec3;

    /// Unit vector the camera is facing.
    fn forward(&self) -> Vec3;

    /// Unit vector pointing to the camera's right.
    fn right(&self) -> Vec3;

    /// Unit vector pointing up out of the top of the view.
    fn up(&self) -> Vec3;
}

impl<C: CameraHandle + ?Sized> CameraHandle for Box<C> {
    fn set_position(&mut self, position: Vec3) {
        (**self).set_position(position);
    }

    fn look_at(&mut self, point: Vec3) {
        (**self).look_at(point);
    }

    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn forward(&self) -> Vec3 {
        (**self).forward()
    }

    fn right(&self) -> Vec3 {
        (**self).right()
    }

    fn up(&self) -> Vec3 {
        (**self).up()
    }
}

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// World up direction used to build the view basis.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Camera {
    /// Build the view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // [0,1] depth range
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

impl CameraHandle for Camera {
    fn set_position(&mut self, position: Vec3) {
        self.eye = position;
    }

    fn look_at(&mut self, point: Vec3) {
        self.target = point;
    }

    fn position(&self) -> Vec3 {
        self.eye
    }

    fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or(Vec3::NEG_Z)
    }

    fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or(Vec3::X)
    }

    fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}
