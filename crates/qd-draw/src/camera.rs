//! Virtual camera: pan + zoom over a drawer's coordinate system.

use crate::drawer::Drawer;
use crate::surface::Surface;
use qd_core::{Matrix, Point, Rect};

/// Pan/zoom camera with cached forward and inverse transforms.
///
/// The matrices are recomputed by [`Camera::update_viewport`]; call it once
/// per frame (or whenever the viewport size changes) before using them.
#[derive(Debug, Clone)]
pub struct Camera {
    /// The negative of the camera position.
    pub offset: Point,
    /// Zoom factor.
    pub scale: f64,
    /// Center the view in the viewport before applying the offset.
    pub center_view: bool,
    /// World space → screen space.
    pub world_to_screen: Matrix,
    /// Screen space → world space.
    pub screen_to_world: Matrix,
}

impl Camera {
    /// Preset zoom ladder for wheel-driven zooming.
    pub const ZOOM_LEVELS: [f64; 11] = [
        0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0,
    ];

    pub fn new() -> Self {
        Self {
            offset: Point::ZERO,
            scale: 1.0,
            center_view: false,
            world_to_screen: Matrix::IDENTITY,
            screen_to_world: Matrix::IDENTITY,
        }
    }

    /// Camera with the view centered in the viewport.
    pub fn centered() -> Self {
        Self {
            center_view: true,
            ..Self::new()
        }
    }

    /// Recomputes both transform matrices for the given viewport.
    pub fn update_viewport(&mut self, viewport: Rect) {
        let pos = if self.center_view {
            self.offset + viewport.center()
        } else {
            self.offset
        };

        self.world_to_screen = Matrix::IDENTITY.translate(pos).scale_uniform(self.scale);
        self.screen_to_world = Matrix::IDENTITY
            .scale_uniform(1.0 / self.scale)
            .translate(-pos);
    }

    /// Saves the drawer state and multiplies the camera transform in.
    /// Balance with [`Drawer::restore`].
    pub fn push_transform<S: Surface>(&self, drawer: &mut Drawer<S>) {
        drawer.save();
        drawer.transform(&self.world_to_screen);
    }

    /// Saves the drawer state and replaces the transform with the camera's.
    /// Balance with [`Drawer::restore`].
    pub fn override_transform<S: Surface>(&self, drawer: &mut Drawer<S>) {
        drawer.save();
        drawer.override_transform(&self.world_to_screen);
    }

    /// Moves the camera by `offset` (screen-space units).
    pub fn translate(&mut self, offset: Point) {
        self.offset = self.offset + offset;
    }

    /// Changes the scale while keeping `center` (a screen point, typically
    /// the cursor) visually fixed: the world point under it is re-projected
    /// under the new scale and the drift is folded back into the offset.
    /// Matrices are up to date when this returns.
    pub fn zoom_viewport(&mut self, new_scale: f64, center: Point, viewport: Rect) {
        let center_world = self.screen_to_world.transform_point(center);
        self.scale = new_scale;
        self.update_viewport(viewport);
        let new_center = self.world_to_screen.transform_point(center_world);
        // The drift is measured in screen space; the offset lives in world
        // units (it is scaled by the transform), so map the correction back
        // through the new scale.
        self.offset = self.offset + (center - new_center) * (1.0 / new_scale);
        self.update_viewport(viewport);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
