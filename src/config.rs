//! JSON scene description and loading for the demo binary.

use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;

use crate::clusterer::ClusterParams;
use crate::types::{Point, View};

/// One scene point: position plus the ids of the views that observed it.
#[derive(Clone, Debug, Deserialize)]
pub struct ScenePoint {
    pub pos: [f32; 3],
    pub views: Vec<usize>,
}

/// One calibrated view: the camera-centre position.
#[derive(Clone, Debug, Deserialize)]
pub struct SceneView {
    pub trans: [f32; 3],
}

/// Scene file: the full input population for one clustering run.
#[derive(Clone, Debug, Deserialize)]
pub struct Scene {
    pub points: Vec<ScenePoint>,
    pub views: Vec<SceneView>,
    /// Pipeline parameters; defaults apply when omitted.
    #[serde(default)]
    pub params: ClusterParams,
}

impl Scene {
    /// Converts the description into the pipeline's data model.
    pub fn into_population(self) -> (Vec<Point>, Vec<View>, ClusterParams) {
        let points = self
            .points
            .into_iter()
            .map(|p| Point::new(Vector3::new(p.pos[0], p.pos[1], p.pos[2]), p.views))
            .collect();
        let views = self
            .views
            .into_iter()
            .map(|v| View::new(Vector3::new(v.trans[0], v.trans[1], v.trans[2])))
            .collect();
        (points, views, self.params)
    }
}

/// Reads and parses a JSON scene file.
pub fn load_scene(path: &Path) -> Result<Scene, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read scene {}: {e}", path.display()))?;
    let scene: Scene = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse scene {}: {e}", path.display()))?;
    Ok(scene)
}
