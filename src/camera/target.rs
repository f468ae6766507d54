use glam::Vec3;

/// Anything an orbit rig can center on: a raw point, or a host entity
/// that knows its own world position.
///
/// ```
/// use glam::Vec3;
/// use orbit_rig::camera::OrbitTarget;
///
/// struct Marker {
///     position: Vec3,
/// }
///
/// impl OrbitTarget for Marker {
///     fn target_position(&self) -> Vec3 {
///         self.position
///     }
/// }
///
/// let marker = Marker { position: Vec3::new(1.0, 2.0, 3.0) };
/// assert_eq!(marker.target_position(), Vec3::new(1.0, 2.0, 3.0));
/// assert_eq!([1.0_f32, 2.0, 3.0].target_position(), Vec3::new(1.0, 2.0, 3.0));
/// ```
pub trait OrbitTarget {
    /// World-space point to orbit around.
    fn target_position(&self) -> Vec3;
}

impl OrbitTarget for Vec3 {
    fn target_position(&self) -> Vec3 {
        *self
    }
}

impl OrbitTarget for [f32; 3] {
    fn target_position(&self) -> Vec3 {
        Vec3::from_array(*self)
    }
}

impl OrbitTarget for (f32, f32, f32) {
    fn target_position(&self) -> Vec3 {
        Vec3::new(self.0, self.1, self.2)
    }
}

impl<T: OrbitTarget + ?Sized> OrbitTarget for &T {
    fn target_position(&self) -> Vec3 {
        (**self).target_position()
    }
}
