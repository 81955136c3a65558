use std::f32::consts::PI;

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3};

/// Where the camera sits and how it projects the scene.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Camera {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// The matrices that place the rendered geometry in clip space.
///
/// The view, the projection and their product are fixed at construction; only the model matrix
/// (and therefore the final model-view-projection matrix) changes afterwards.
#[derive(Clone, PartialEq, Debug)]
pub struct Transform {
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    view_projection: Matrix4<f32>,
    model: Matrix4<f32>,
    mvp: Matrix4<f32>,
}

impl Transform {
    pub fn new(camera: &Camera, aspect: f32) -> Self {
        let view = Matrix4::look_at_rh(
            Point3::from(camera.eye),
            Point3::from(camera.target),
            Vector3::from(camera.up),
        );
        let projection = cgmath::perspective(Deg(camera.fov_degrees), aspect, camera.near, camera.far);
        let view_projection = projection * view;

        Transform {
            view,
            projection,
            view_projection,
            model: Matrix4::identity(),
            mvp: view_projection,
        }
    }

    pub fn view(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }

    /// The cached product `projection * view`.
    pub fn view_projection(&self) -> &Matrix4<f32> {
        &self.view_projection
    }

    pub fn model(&self) -> &Matrix4<f32> {
        &self.model
    }

    pub fn mvp(&self) -> &Matrix4<f32> {
        &self.mvp
    }

    /// Replaces the model matrix and returns the recomputed model-view-projection matrix.
    pub fn set_model(&mut self, model: Matrix4<f32>) -> &Matrix4<f32> {
        self.model = model;
        self.mvp = self.view_projection * model;

        &self.mvp
    }
}

/// Counts the render steps of an animation, starting at zero.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct FrameCounter {
    frame: u64,
}

impl FrameCounter {
    pub fn new() -> Self {
        FrameCounter::default()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Moves on to the next frame and returns its number; the first frame is `1`.
    pub fn advance(&mut self) -> u64 {
        self.frame = self.frame.wrapping_add(1);

        self.frame
    }
}

/// The rotation for `frame`: one degree per frame, wrapping every 360 frames.
pub fn rotation_angle(frame: u64) -> Rad<f32> {
    Rad((frame % 360) as f32 * PI / 180.0)
}

/// The model matrix for `frame`: the identity rotated about `axis` by [rotation_angle].
///
/// The result depends on `frame % 360` only; it is always rebuilt from the identity rather than
/// composed onto an earlier frame's matrix.
pub fn model_for_frame(frame: u64, axis: [f32; 3]) -> Matrix4<f32> {
    Matrix4::from_axis_angle(Vector3::from(axis).normalize(), rotation_angle(frame))
}

/// Copies a matrix into the column-major layout uniform uploads expect.
pub fn to_column_major(matrix: &Matrix4<f32>) -> [f32; 16] {
    *AsRef::<[f32; 16]>::as_ref(matrix)
}
