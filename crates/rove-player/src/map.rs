//! Static world geometry
//!
//! A map is a ground plane plus a list of axis-aligned features, loaded from
//! TOML:
//!
//! ```toml
//! ground = 0.0
//!
//! [[features]]
//! kind = "wall"
//! position = [0.0, 1.0, -30.0]
//! size = [60.0, 2.0, 1.0]
//!
//! [[features]]
//! kind = "tree"
//! position = [12.0, 0.0, 12.0]
//! ```

use rove_core::{Result, RoveError, Vec3};
use rove_physics::PhysicsWorld;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Flat pads are sunk this far below their nominal height
const PAD_SINK: f32 = 0.1;

const TRUNK_SIZE: [f32; 3] = [0.5, 3.0, 0.5];
const TRUNK_HEIGHT: f32 = 1.5;
const LEAVES_SIZE: [f32; 3] = [2.0, 2.0, 2.0];
const LEAVES_HEIGHT: f32 = 4.0;

/// What a map feature is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Wall,
    Road,
    Garden,
    /// Trunk and leaf block; only the position is used
    Tree,
    Block,
}

/// One placed piece of static geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    pub kind: FeatureKind,
    pub position: [f32; 3],
    /// Full box size. Required for everything but trees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 3]>,
}

impl MapFeature {
    fn new(kind: FeatureKind, position: [f32; 3], size: [f32; 3]) -> Self {
        Self {
            kind,
            position,
            size: Some(size),
        }
    }

    fn tree(position: [f32; 3]) -> Self {
        Self {
            kind: FeatureKind::Tree,
            position,
            size: None,
        }
    }

    /// Box colliders as (center, full size)
    pub fn colliders(&self) -> Vec<(Vec3, Vec3)> {
        let base = Vec3::from_array(self.position);
        match (self.kind, self.size) {
            (FeatureKind::Tree, _) => vec![
                (
                    base + Vec3::new(0.0, TRUNK_HEIGHT, 0.0),
                    Vec3::from_array(TRUNK_SIZE),
                ),
                (
                    base + Vec3::new(0.0, LEAVES_HEIGHT, 0.0),
                    Vec3::from_array(LEAVES_SIZE),
                ),
            ],
            (FeatureKind::Road | FeatureKind::Garden, Some(size)) => vec![(
                base - Vec3::new(0.0, PAD_SINK, 0.0),
                Vec3::from_array(size),
            )],
            (_, Some(size)) => vec![(base, Vec3::from_array(size))],
            (_, None) => Vec::new(),
        }
    }
}

/// Ground plus static features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    /// Height of the infinite ground plane, if any
    #[serde(default)]
    pub ground: Option<f32>,
    #[serde(default)]
    pub features: Vec<MapFeature>,
}

impl GameMap {
    /// Read, parse and validate a map file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let map = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            features = map.features.len(),
            "loaded map"
        );
        Ok(map)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let map: GameMap = toml::from_str(content)?;
        map.validate()?;
        Ok(map)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, feature) in self.features.iter().enumerate() {
            match (feature.kind, feature.size) {
                (FeatureKind::Tree, _) => {}
                (kind, None) => {
                    return Err(RoveError::ValidationError(format!(
                        "feature {} ({:?}) is missing a size",
                        i, kind
                    )));
                }
                (kind, Some(size)) => {
                    if size.iter().any(|s| *s <= 0.0 || !s.is_finite()) {
                        return Err(RoveError::ValidationError(format!(
                            "feature {} ({:?}) has a non-positive size {:?}",
                            i, kind, size
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// A bare ground plane at y = 0
    pub fn flat() -> Self {
        Self {
            ground: Some(0.0),
            features: Vec::new(),
        }
    }

    /// The village: a walled square with crossing roads, gardens, low walls
    /// and trees
    pub fn default_map() -> Self {
        use FeatureKind::*;

        let mut features = vec![
            MapFeature::new(Road, [0.0, 0.0, -10.0], [20.0, 0.1, 3.0]),
            MapFeature::new(Road, [0.0, 0.0, 10.0], [20.0, 0.1, 3.0]),
            MapFeature::new(Road, [-10.0, 0.0, 0.0], [3.0, 0.1, 20.0]),
            MapFeature::new(Road, [10.0, 0.0, 0.0], [3.0, 0.1, 20.0]),
            MapFeature::new(Wall, [0.0, 1.0, -30.0], [60.0, 2.0, 1.0]),
            MapFeature::new(Wall, [0.0, 1.0, 30.0], [60.0, 2.0, 1.0]),
            MapFeature::new(Wall, [-30.0, 1.0, 0.0], [1.0, 2.0, 60.0]),
            MapFeature::new(Wall, [30.0, 1.0, 0.0], [1.0, 2.0, 60.0]),
        ];

        for (x, z) in [(15.0, 15.0), (-15.0, 15.0), (15.0, -15.0), (-15.0, -15.0)] {
            features.push(MapFeature::new(Garden, [x, 0.0, z], [8.0, 0.1, 8.0]));
        }
        for (x, z) in [(5.0, 5.0), (-5.0, 5.0), (5.0, -5.0), (-5.0, -5.0)] {
            features.push(MapFeature::new(Wall, [x, 0.5, z], [3.0, 1.0, 0.5]));
        }

        let trees = [
            (12.0, 12.0),
            (-12.0, 12.0),
            (12.0, -12.0),
            (-12.0, -12.0),
            (20.0, 0.0),
            (-20.0, 0.0),
            (0.0, 20.0),
            (0.0, -20.0),
            (-8.0, -18.0),
            (8.0, 18.0),
        ];
        features.extend(trees.iter().map(|&(x, z)| MapFeature::tree([x, 0.0, z])));

        Self {
            ground: Some(0.0),
            features,
        }
    }

    /// Create the fixed colliders in `world`. Returns the number created.
    pub fn build(&self, world: &mut PhysicsWorld) -> usize {
        let mut count = 0;
        if let Some(y) = self.ground {
            world.add_ground_plane(y);
            count += 1;
        }
        for feature in &self.features {
            for (center, size) in feature.colliders() {
                world.add_static_box(center, size);
                count += 1;
            }
        }
        count
    }
}

impl Default for GameMap {
    fn default() -> Self {
        Self::default_map()
    }
}
