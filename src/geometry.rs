use serde_derive::{Deserialize, Serialize};

use crate::error::RendererError;
use crate::options::DrawMode;

/// Static per-vertex data, uploaded once when a renderer is created.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    #[serde(default)]
    pub indices: Option<Vec<u16>>,
}

impl Geometry {
    /// A single triangle with a red, a green and a blue corner.
    pub fn triangle() -> Self {
        Geometry {
            positions: vec![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]],
            colors: vec![
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
            ],
            indices: None,
        }
    }

    /// A diamond-shaped quad made of two triangles that share an edge.
    pub fn quad() -> Self {
        Geometry {
            positions: vec![
                [0.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [-1.0, 0.0, 0.0],
                [0.0, -1.0, 0.0],
            ],
            colors: vec![
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
                [1.0, 1.0, 1.0, 1.0],
            ],
            indices: Some(vec![0, 1, 2, 1, 2, 3]),
        }
    }

    /// The geometry the demo for `mode` draws when no other geometry is configured.
    pub fn for_mode(mode: DrawMode) -> Self {
        match mode {
            DrawMode::DrawArrays => Geometry::triangle(),
            DrawMode::DrawElements => Geometry::quad(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Flattened position components, 3 per vertex.
    pub fn position_data(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.iter().copied()).collect()
    }

    /// Flattened RGBA components, 4 per vertex.
    pub fn color_data(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| c.iter().copied()).collect()
    }

    /// Checks that the geometry can be drawn with `mode`.
    pub fn validate(&self, mode: DrawMode) -> Result<(), RendererError> {
        if self.positions.is_empty() {
            return Err(RendererError::InvalidGeometry("no vertices".to_string()));
        }

        if self.colors.len() != self.positions.len() {
            return Err(RendererError::InvalidGeometry(format!(
                "{} positions but {} colors",
                self.positions.len(),
                self.colors.len()
            )));
        }

        if self.positions.len() > u16::max_value() as usize + 1 {
            return Err(RendererError::InvalidGeometry(format!(
                "{} vertices cannot be addressed with 16-bit indices",
                self.positions.len()
            )));
        }

        match (mode, &self.indices) {
            (DrawMode::DrawElements, None) => Err(RendererError::InvalidGeometry(
                "indexed drawing requires indices".to_string(),
            )),
            (DrawMode::DrawElements, Some(indices)) if indices.is_empty() => Err(
                RendererError::InvalidGeometry("index list is empty".to_string()),
            ),
            (DrawMode::DrawElements, Some(indices)) => {
                let vertex_count = self.positions.len();

                match indices.iter().find(|i| **i as usize >= vertex_count) {
                    Some(index) => Err(RendererError::InvalidGeometry(format!(
                        "index {} out of range for {} vertices",
                        index, vertex_count
                    ))),
                    None => Ok(()),
                }
            }
            (DrawMode::DrawArrays, _) => Ok(()),
        }
    }
}
