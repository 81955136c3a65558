use cgmath::{InnerSpace, Vector3};
use log::LevelFilter;
use serde_derive::{Deserialize, Serialize};

use crate::error::RendererError;
use crate::geometry::Geometry;
use crate::runtime::ClearValues;
use crate::transform::Camera;

/// Which of the two demos to run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawMode {
    /// Draws unindexed vertices exactly once.
    DrawArrays,

    /// Draws indexed vertices on every animation frame, rotating them about the rotation axis.
    DrawElements,
}

impl Default for DrawMode {
    fn default() -> Self {
        DrawMode::DrawElements
    }
}

/// Which rendering context to request from the canvas.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ContextVersion {
    #[serde(rename = "webgl")]
    WebGl,
    #[serde(rename = "webgl2")]
    WebGl2,
}

impl Default for ContextVersion {
    fn default() -> Self {
        ContextVersion::WebGl
    }
}

/// Configures a demo run.
///
/// Every field has a default, so a host page only needs to pass the keys it wants to change,
/// e.g. `{ mode: "draw-arrays" }`. Keys that are left out are taken from the preset for the
/// chosen `mode`, see [DemoOptions::begin].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PartialDemoOptions")]
pub struct DemoOptions {
    pub mode: DrawMode,
    pub context_version: ContextVersion,
    pub canvas_size: u32,
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub clear_color: [f32; 4],
    pub clear_depth: f32,
    pub rotation_axis: [f32; 3],
    pub log_level: LevelFilter,
    pub geometry: Option<Geometry>,
}

impl Default for DemoOptions {
    fn default() -> Self {
        DemoOptions::draw_elements()
    }
}

impl DemoOptions {
    /// The spinning, indexed quad.
    pub fn draw_elements() -> Self {
        DemoOptions {
            mode: DrawMode::DrawElements,
            context_version: ContextVersion::WebGl,
            canvas_size: 400,
            eye: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            clear_depth: 1.0,
            rotation_axis: [0.0, 1.0, 0.0],
            log_level: LevelFilter::Info,
            geometry: None,
        }
    }

    /// The static, unindexed triangle.
    pub fn draw_arrays() -> Self {
        DemoOptions {
            mode: DrawMode::DrawArrays,
            eye: [0.0, 1.0, 3.0],
            fov_degrees: 90.0,
            ..DemoOptions::draw_elements()
        }
    }

    /// Starts building options from the preset for `mode`.
    pub fn begin(mode: DrawMode) -> DemoOptionsBuilder {
        let options = match mode {
            DrawMode::DrawArrays => DemoOptions::draw_arrays(),
            DrawMode::DrawElements => DemoOptions::draw_elements(),
        };

        DemoOptionsBuilder { options }
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.eye,
            target: self.target,
            up: self.up,
            fov_degrees: self.fov_degrees,
            near: self.near,
            far: self.far,
        }
    }

    pub fn clear_values(&self) -> ClearValues {
        ClearValues {
            color: self.clear_color,
            depth: self.clear_depth,
        }
    }

    /// The configured geometry, or the preset for the draw mode.
    pub fn geometry(&self) -> Geometry {
        self.geometry
            .clone()
            .unwrap_or_else(|| Geometry::for_mode(self.mode))
    }

    pub fn validate(&self) -> Result<(), RendererError> {
        let invalid = |message: &str| Err(RendererError::InvalidOptions(message.to_string()));

        if self.canvas_size == 0 {
            return invalid("canvas size must be positive");
        }

        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid("field of view must lie strictly between 0 and 180 degrees");
        }

        if !(self.near > 0.0) {
            return invalid("near plane must be positive");
        }

        if !(self.far > self.near) {
            return invalid("far plane must lie beyond the near plane");
        }

        if self.eye == self.target {
            return invalid("eye and target must differ");
        }

        if self.up == [0.0; 3] {
            return invalid("up vector must not be zero");
        }

        let forward = (Vector3::from(self.target) - Vector3::from(self.eye)).normalize();
        let up = Vector3::from(self.up).normalize();

        if !(forward.cross(up).magnitude() > 1e-6) {
            return invalid("up vector must not be parallel to the viewing direction");
        }

        if self.rotation_axis == [0.0; 3] {
            return invalid("rotation axis must not be zero");
        }

        self.geometry().validate(self.mode)
    }
}

/// [DemoOptions] as a host page passes them, with every key optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialDemoOptions {
    mode: Option<DrawMode>,
    context_version: Option<ContextVersion>,
    canvas_size: Option<u32>,
    eye: Option<[f32; 3]>,
    target: Option<[f32; 3]>,
    up: Option<[f32; 3]>,
    fov_degrees: Option<f32>,
    near: Option<f32>,
    far: Option<f32>,
    clear_color: Option<[f32; 4]>,
    clear_depth: Option<f32>,
    rotation_axis: Option<[f32; 3]>,
    log_level: Option<LevelFilter>,
    geometry: Option<Geometry>,
}

macro_rules! overlay {
    ($options:ident, $partial:ident, $($field:ident),*) => {
        $(
            if let Some(value) = $partial.$field {
                $options.$field = value;
            }
        )*
    };
}

impl From<PartialDemoOptions> for DemoOptions {
    fn from(partial: PartialDemoOptions) -> Self {
        let mut options = DemoOptions::begin(partial.mode.unwrap_or_default()).finish();

        overlay!(
            options,
            partial,
            context_version,
            canvas_size,
            eye,
            target,
            up,
            fov_degrees,
            near,
            far,
            clear_color,
            clear_depth,
            rotation_axis,
            log_level
        );

        if partial.geometry.is_some() {
            options.geometry = partial.geometry;
        }

        options
    }
}

pub struct DemoOptionsBuilder {
    options: DemoOptions,
}

impl DemoOptionsBuilder {
    pub fn context_version(mut self, context_version: ContextVersion) -> Self {
        self.options.context_version = context_version;

        self
    }

    pub fn canvas_size(mut self, canvas_size: u32) -> Self {
        self.options.canvas_size = canvas_size;

        self
    }

    pub fn look_at(mut self, eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> Self {
        self.options.eye = eye;
        self.options.target = target;
        self.options.up = up;

        self
    }

    pub fn fov_degrees(mut self, fov_degrees: f32) -> Self {
        self.options.fov_degrees = fov_degrees;

        self
    }

    pub fn clip_planes(mut self, near: f32, far: f32) -> Self {
        self.options.near = near;
        self.options.far = far;

        self
    }

    pub fn clear_color(mut self, clear_color: [f32; 4]) -> Self {
        self.options.clear_color = clear_color;

        self
    }

    pub fn rotation_axis(mut self, rotation_axis: [f32; 3]) -> Self {
        self.options.rotation_axis = rotation_axis;

        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.options.geometry = Some(geometry);

        self
    }

    pub fn log_level(mut self, log_level: LevelFilter) -> Self {
        self.options.log_level = log_level;

        self
    }

    pub fn finish(self) -> DemoOptions {
        self.options
    }
}
