//! Validate scenes before layers and features are added.
//!
//! The renderer can draw a scene that holds either, but not both:
//!
//! - regular osm layers and vector features
//! - one feature layer with one point cloud feature
//!
//! A [SceneValidator] tracks the mode of every live scene and the owner of every layer, and
//! refuses mutations that would break these rules:
//!
//! ```
//! use las_scene::{FeatureType, LayerType, SceneValidator};
//!
//! let validator = SceneValidator::new();
//! let scene = validator.new_scene_id();
//! validator.register_scene(scene).unwrap();
//! validator.adding_layer(scene, LayerType::Osm).unwrap();
//!
//! let layer = validator.new_layer_id();
//! validator.adding_layer(scene, LayerType::Feature).unwrap();
//! validator.added_layer(scene, layer).unwrap();
//! assert!(validator.adding_feature(layer, FeatureType::PointCloud).is_err());
//! ```
//!
//! Every operation locks the whole registry, so one validator can be shared between threads.

use crate::{Error, Result, SceneRuleViolation};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Identifies a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u64);

/// Identifies a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

/// The rendering mode of a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneMode {
    /// The scene has no osm layer and no features yet.
    #[default]
    Unassigned,
    /// The scene has an osm layer or vector features.
    Vector,
    /// The scene has a point cloud feature.
    PointCloud,
}

/// The kinds of layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerType {
    /// A tiled OpenStreetMap base layer.
    Osm,
    /// A layer that holds features.
    Feature,
}

/// The kinds of feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureType {
    #[allow(missing_docs)]
    GeoJson,
    #[allow(missing_docs)]
    Point,
    /// A las point cloud.
    PointCloud,
    #[allow(missing_docs)]
    Polygon,
    #[allow(missing_docs)]
    Quad,
    /// An image, drawn as a quad.
    Raster,
}

#[derive(Debug)]
struct LayerEntry {
    scene: SceneId,
    features: usize,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    scenes: HashMap<SceneId, SceneMode>,
    layers: HashMap<LayerId, LayerEntry>,
}

/// Tracks scene modes and layer ownership.
#[derive(Debug, Default)]
pub struct SceneValidator {
    registry: Mutex<Registry>,
}

impl SceneValidator {
    /// Creates a validator with no scenes.
    pub fn new() -> SceneValidator {
        SceneValidator::default()
    }

    /// Returns a scene id that no other scene of this validator has.
    pub fn new_scene_id(&self) -> SceneId {
        SceneId(self.lock().next_id())
    }

    /// Returns a layer id that no other layer of this validator has.
    pub fn new_layer_id(&self) -> LayerId {
        LayerId(self.lock().next_id())
    }

    /// Registers a new scene, unassigned.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::SceneValidator;
    /// let validator = SceneValidator::new();
    /// let scene = validator.new_scene_id();
    /// validator.register_scene(scene).unwrap();
    /// assert!(validator.register_scene(scene).is_err());
    /// ```
    pub fn register_scene(&self, scene: SceneId) -> Result<()> {
        let mut registry = self.lock();
        if registry.scenes.contains_key(&scene) {
            return Err(Error::DuplicateScene(scene));
        }
        let _ = registry.scenes.insert(scene, SceneMode::Unassigned);
        Ok(())
    }

    /// Forgets a scene and all of its layers.
    pub fn unregister_scene(&self, scene: SceneId) {
        let mut registry = self.lock();
        let _ = registry.scenes.remove(&scene);
        registry.layers.retain(|_, entry| entry.scene != scene);
    }

    /// Must be called before a layer is added to a scene.
    ///
    /// An osm layer puts an unassigned scene into vector mode. A point cloud scene refuses every
    /// new layer.
    pub fn adding_layer(&self, scene: SceneId, layer_type: LayerType) -> Result<()> {
        let mut registry = self.lock();
        let mode = registry.mode_mut(scene)?;
        match (*mode, layer_type) {
            (SceneMode::Unassigned, LayerType::Osm) => {
                debug!("scene {}: unassigned -> vector (osm layer)", scene);
                *mode = SceneMode::Vector;
            }
            (SceneMode::PointCloud, LayerType::Osm) => {
                return Err(SceneRuleViolation::OsmLayerInPointCloudScene.into());
            }
            (SceneMode::PointCloud, LayerType::Feature) => {
                return Err(SceneRuleViolation::LayerInPointCloudScene.into());
            }
            (SceneMode::Unassigned, LayerType::Feature) | (SceneMode::Vector, _) => {}
        }
        Ok(())
    }

    /// Must be called after a layer is added to a scene.
    pub fn added_layer(&self, scene: SceneId, layer: LayerId) -> Result<()> {
        let mut registry = self.lock();
        let _ = registry.mode_mut(scene)?;
        let _ = registry
            .layers
            .insert(layer, LayerEntry { scene, features: 0 });
        Ok(())
    }

    /// Must be called before a feature is added to a layer.
    ///
    /// On success the feature is counted as part of the layer.
    pub fn adding_feature(&self, layer: LayerId, feature_type: FeatureType) -> Result<()> {
        let mut registry = self.lock();
        let scene = registry.scene_of(layer)?;
        let mode = registry.mode_mut(scene)?;
        let is_point_cloud = feature_type == FeatureType::PointCloud;
        match (*mode, is_point_cloud) {
            (SceneMode::Unassigned, true) => {
                debug!("scene {}: unassigned -> point cloud", scene);
                *mode = SceneMode::PointCloud;
            }
            (SceneMode::Unassigned, false) => {
                debug!("scene {}: unassigned -> vector ({} feature)", scene, feature_type);
                *mode = SceneMode::Vector;
            }
            (SceneMode::Vector, true) => {
                return Err(SceneRuleViolation::PointCloudInVectorScene.into());
            }
            (SceneMode::Vector, false) => {}
            (SceneMode::PointCloud, true) => {
                return Err(SceneRuleViolation::MultiplePointClouds.into());
            }
            (SceneMode::PointCloud, false) => {
                return Err(SceneRuleViolation::VectorFeatureInPointCloudScene.into());
            }
        }
        if let Some(entry) = registry.layers.get_mut(&layer) {
            entry.features += 1;
        }
        Ok(())
    }

    /// Must be called when a layer's features are cleared.
    ///
    /// If the layer held the scene's point cloud, the scene goes back to unassigned. Vector
    /// scenes stay vector.
    pub fn clearing_layer(&self, layer: LayerId) -> Result<()> {
        let mut registry = self.lock();
        let scene = registry.scene_of(layer)?;
        let features = registry.layers.get(&layer).map_or(0, |entry| entry.features);
        let mode = registry.mode_mut(scene)?;
        if *mode == SceneMode::PointCloud && features == 1 {
            debug!("scene {}: point cloud -> unassigned (layer {} cleared)", scene, layer);
            *mode = SceneMode::Unassigned;
        }
        if let Some(entry) = registry.layers.get_mut(&layer) {
            entry.features = 0;
        }
        Ok(())
    }

    /// Returns true if the scene is in point cloud mode.
    ///
    /// Unknown scenes are not point clouds.
    pub fn is_pointcloud(&self, scene: SceneId) -> bool {
        self.mode(scene) == Some(SceneMode::PointCloud)
    }

    /// Returns the mode of the scene, or `None` if it isn't registered.
    pub fn mode(&self, scene: SceneId) -> Option<SceneMode> {
        self.lock().scenes.get(&scene).copied()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // Every critical section leaves the registry consistent, so a poisoned lock is still usable.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Registry {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn mode_mut(&mut self, scene: SceneId) -> Result<&mut SceneMode> {
        self.scenes
            .get_mut(&scene)
            .ok_or(Error::UnknownScene(scene))
    }

    fn scene_of(&self, layer: LayerId) -> Result<SceneId> {
        self.layers
            .get(&layer)
            .map(|entry| entry.scene)
            .ok_or(Error::UnknownLayer(layer))
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl LayerType {
    /// Returns the name the renderer uses for this layer type.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerType::Osm => "osm",
            LayerType::Feature => "feature",
        }
    }
}

impl FromStr for LayerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<LayerType> {
        match s {
            "osm" => Ok(LayerType::Osm),
            "feature" => Ok(LayerType::Feature),
            _ => Err(Error::UnknownLayerType(s.to_string())),
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FeatureType {
    /// Returns the name the renderer uses for this feature type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::GeoJson => "geojson",
            FeatureType::Point => "point",
            FeatureType::PointCloud => "pointcloud",
            FeatureType::Polygon => "polygon",
            FeatureType::Quad => "quad",
            FeatureType::Raster => "raster",
        }
    }
}

impl FromStr for FeatureType {
    type Err = Error;

    fn from_str(s: &str) -> Result<FeatureType> {
        match s {
            "geojson" => Ok(FeatureType::GeoJson),
            "point" => Ok(FeatureType::Point),
            "pointcloud" => Ok(FeatureType::PointCloud),
            "polygon" => Ok(FeatureType::Polygon),
            "quad" => Ok(FeatureType::Quad),
            "raster" => Ok(FeatureType::Raster),
            _ => Err(Error::UnknownFeatureType(s.to_string())),
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
