//! Scenes, layers, and features, and the display model sent to the renderer.
//!
//! Every mutation goes through the scene's [SceneValidator], so a scene can't end up mixing a
//! point cloud with vector data:
//!
//! ```
//! use las_scene::{Feature, FeatureType, LayerType, Scene, SceneValidator};
//! use serde_json::Map;
//!
//! let validator = SceneValidator::new();
//! let mut scene = Scene::new(&validator, Map::new()).unwrap();
//! let layer = scene.create_layer(LayerType::Feature, Map::new()).unwrap();
//! scene
//!     .feature_layer(layer)
//!     .unwrap()
//!     .create_feature(Feature::new(FeatureType::Point).unwrap())
//!     .unwrap();
//! assert!(scene.create_layer(LayerType::Osm, Map::new()).is_ok());
//!
//! let model = scene.display_model().unwrap();
//! assert_eq!("application/geojs+json", model.mime_type);
//! ```

use crate::{
    Error, FeatureType, LayerId, LayerType, PointCloudSource, Result, SceneId, SceneValidator,
};
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The mime type of regular scenes.
pub const MIME_TYPE: &str = "application/geojs+json";

/// The mime type of scenes in point cloud mode.
pub const POINT_CLOUD_MIME_TYPE: &str = "application/las+json";

/// Open-ended options, passed through to the renderer.
pub type Options = Map<String, Value>;

/// A scene: map options, a viewpoint, and a stack of layers.
///
/// The scene is registered with its validator on creation and unregistered when dropped.
#[derive(Debug)]
pub struct Scene<'v> {
    validator: &'v SceneValidator,
    id: SceneId,
    options: Options,
    viewpoint: Option<Viewpoint>,
    layers: Vec<Layer>,
}

/// One layer of a scene.
#[derive(Debug)]
pub struct Layer {
    id: LayerId,
    layer_type: LayerType,
    options: Options,
    features: Vec<Feature>,
}

/// A mutable handle to a feature layer.
///
/// Borrowed from [Scene::feature_layer].
#[derive(Debug)]
pub struct FeatureLayer<'a> {
    validator: &'a SceneValidator,
    layer: &'a mut Layer,
}

/// A feature, ready to be added to a feature layer.
#[derive(Debug)]
pub struct Feature {
    feature_type: FeatureType,
    options: Options,
    payload: Payload,
}

#[derive(Debug)]
enum Payload {
    None,
    GeoJsonData(Value),
    GeoJsonUrl(String),
    PointCloud(PointCloudSource),
}

/// The mime type and json that the renderer consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayModel {
    /// [POINT_CLOUD_MIME_TYPE] for point cloud scenes, else [MIME_TYPE].
    pub mime_type: &'static str,

    /// `{options, viewpoint, layers}`.
    pub data: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
struct Viewpoint {
    mode: &'static str,
    bounds: ViewBounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
struct ViewBounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl<'v> Scene<'v> {
    /// The scene options the renderer recognizes.
    ///
    /// Other names are passed through as well.
    pub const OPTION_NAMES: &'static [&'static str] = &[
        "allowRotation",
        "center",
        "clampBoundsX",
        "clampBoundsY",
        "clampZoom",
        "discreteZoom",
        "gcs",
        "ingcs",
        "maxBounds",
        "minZoom",
        "maxZoom",
        "rotation",
        "unitsPerPixel",
        "zoom",
    ];

    /// Creates a new scene and registers it with the validator.
    pub fn new(validator: &'v SceneValidator, options: Options) -> Result<Scene<'v>> {
        let id = validator.new_scene_id();
        validator.register_scene(id)?;
        for name in options.keys() {
            log_unrecognized(name);
        }
        Ok(Scene {
            validator,
            id,
            options,
            viewpoint: None,
            layers: Vec::new(),
        })
    }

    /// Returns this scene's id.
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Returns this scene's options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Sets one scene option.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::{Scene, SceneValidator};
    /// use serde_json::{Map, json};
    ///
    /// let validator = SceneValidator::new();
    /// let mut scene = Scene::new(&validator, Map::new()).unwrap();
    /// scene.set_option("zoom", 10);
    /// assert_eq!(json!(10), scene.options()["zoom"]);
    /// ```
    pub fn set_option<S: Into<String>, V: Into<Value>>(&mut self, name: S, value: V) {
        let name = name.into();
        log_unrecognized(&name);
        let _ = self.options.insert(name, value.into());
    }

    /// Creates a new layer at the top of the stack and returns its id.
    pub fn create_layer(&mut self, layer_type: LayerType, options: Options) -> Result<LayerId> {
        self.validator.adding_layer(self.id, layer_type)?;
        let id = self.validator.new_layer_id();
        self.layers.push(Layer {
            id,
            layer_type,
            options,
            features: Vec::new(),
        });
        self.validator.added_layer(self.id, id)?;
        debug!("scene {}: created {} layer {}", self.id, layer_type, id);
        Ok(id)
    }

    /// Returns this scene's layers, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns a layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Returns a mutable handle to a feature layer of this scene.
    pub fn feature_layer(&mut self, id: LayerId) -> Result<FeatureLayer<'_>> {
        let layer = self
            .layers
            .iter_mut()
            .find(|layer| layer.id == id)
            .ok_or(Error::UnknownLayer(id))?;
        if layer.layer_type != LayerType::Feature {
            return Err(Error::NotAFeatureLayer(id));
        }
        Ok(FeatureLayer {
            validator: self.validator,
            layer,
        })
    }

    /// Returns true if this scene holds a point cloud.
    pub fn is_pointcloud(&self) -> bool {
        self.validator.is_pointcloud(self.id)
    }

    /// Zooms the renderer to the bounding box of some corner points.
    ///
    /// No corners lets the renderer pick the viewpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::{Scene, SceneValidator};
    /// use serde_json::{Map, json};
    ///
    /// let validator = SceneValidator::new();
    /// let mut scene = Scene::new(&validator, Map::new()).unwrap();
    /// scene.set_zoom_and_center(&[[0., 0.], [2., 1.]]);
    /// let model = scene.display_model().unwrap();
    /// assert_eq!(json!(2.), model.data["viewpoint"]["bounds"]["right"]);
    /// assert_eq!(json!(1.), model.data["viewpoint"]["bounds"]["top"]);
    /// ```
    pub fn set_zoom_and_center(&mut self, corners: &[[f64; 2]]) {
        if corners.is_empty() {
            self.viewpoint = None;
            return;
        }
        let mut bounds = ViewBounds {
            left: f64::INFINITY,
            top: f64::NEG_INFINITY,
            right: f64::NEG_INFINITY,
            bottom: f64::INFINITY,
        };
        for &[x, y] in corners {
            bounds.left = bounds.left.min(x);
            bounds.right = bounds.right.max(x);
            bounds.top = bounds.top.max(y);
            bounds.bottom = bounds.bottom.min(y);
        }
        self.viewpoint = Some(Viewpoint {
            mode: "bounds",
            bounds,
        });
    }

    /// Builds the display model.
    ///
    /// Point cloud features with inline transport read their inputs now.
    pub fn display_model(&self) -> Result<DisplayModel> {
        let mime_type = if self.is_pointcloud() {
            POINT_CLOUD_MIME_TYPE
        } else {
            MIME_TYPE
        };
        let layers = self
            .layers
            .iter()
            .map(Layer::display_model)
            .collect::<Result<Vec<_>>>()?;
        let data = json!({
            "options": self.options,
            "viewpoint": serde_json::to_value(self.viewpoint)?,
            "layers": layers,
        });
        Ok(DisplayModel { mime_type, data })
    }
}

impl Drop for Scene<'_> {
    fn drop(&mut self) {
        self.validator.unregister_scene(self.id);
    }
}

impl Layer {
    /// Returns this layer's id.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Returns this layer's type.
    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    /// Returns this layer's options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns this layer's features, empty for osm layers.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    fn display_model(&self) -> Result<Value> {
        let mut model = json!({
            "layerType": self.layer_type.as_str(),
            "options": self.options,
        });
        if self.layer_type == LayerType::Feature {
            let features = self
                .features
                .iter()
                .map(Feature::display_model)
                .collect::<Result<Vec<_>>>()?;
            model["features"] = Value::Array(features);
        }
        Ok(model)
    }
}

impl FeatureLayer<'_> {
    /// Adds a feature to this layer.
    ///
    /// The feature is dropped if the scene rules refuse it.
    pub fn create_feature(&mut self, feature: Feature) -> Result<()> {
        self.validator
            .adding_feature(self.layer.id, feature.feature_type)?;
        self.layer.features.push(feature);
        Ok(())
    }

    /// Removes every feature from this layer.
    ///
    /// Clearing the layer that holds a point cloud lets the scene take vector data again.
    pub fn clear(&mut self) -> Result<()> {
        self.validator.clearing_layer(self.layer.id)?;
        self.layer.features.clear();
        Ok(())
    }

    /// Returns this layer's features.
    pub fn features(&self) -> &[Feature] {
        &self.layer.features
    }
}

impl Feature {
    /// Creates a feature that only needs options: point, polygon, quad, or raster.
    ///
    /// Geojson and point cloud features need data; use [Feature::geojson] or
    /// [Feature::pointcloud].
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::{Feature, FeatureType};
    /// assert!(Feature::new(FeatureType::Quad).is_ok());
    /// assert!(Feature::new(FeatureType::GeoJson).is_err());
    /// ```
    pub fn new(feature_type: FeatureType) -> Result<Feature> {
        match feature_type {
            FeatureType::GeoJson | FeatureType::PointCloud => Err(Error::MissingInput),
            _ => Ok(Feature {
                feature_type,
                options: Options::new(),
                payload: Payload::None,
            }),
        }
    }

    /// Creates a geojson feature from a document or a url.
    ///
    /// The document wins if both are given.
    pub fn geojson(data: Option<Value>, url: Option<String>) -> Result<Feature> {
        let payload = match (data, url) {
            (Some(data), _) => Payload::GeoJsonData(data),
            (None, Some(url)) => Payload::GeoJsonUrl(url),
            (None, None) => return Err(Error::MissingInput),
        };
        Ok(Feature {
            feature_type: FeatureType::GeoJson,
            options: Options::new(),
            payload,
        })
    }

    /// Creates a geojson feature from a file.
    ///
    /// The file is read now, since the renderer can't reach the local filesystem.
    pub fn geojson_file<P: AsRef<Path>>(path: P) -> Result<Feature> {
        let reader = BufReader::new(File::open(path)?);
        let data: Value = serde_json::from_reader(reader)?;
        Feature::geojson(Some(data), None)
    }

    /// Creates a point cloud feature.
    pub fn pointcloud(source: PointCloudSource) -> Feature {
        Feature {
            feature_type: FeatureType::PointCloud,
            options: Options::new(),
            payload: Payload::PointCloud(source),
        }
    }

    /// Sets this feature's options.
    pub fn with_options(mut self, options: Options) -> Feature {
        self.options = options;
        self
    }

    /// Returns this feature's type.
    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    /// Returns this feature's options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the point cloud source, for point cloud features.
    pub fn point_cloud_source(&self) -> Option<&PointCloudSource> {
        match &self.payload {
            Payload::PointCloud(source) => Some(source),
            _ => None,
        }
    }

    fn display_model(&self) -> Result<Value> {
        let mut model = match &self.payload {
            Payload::PointCloud(source) => serde_json::to_value(source.descriptor()?)?,
            _ => json!({ "featureType": self.feature_type.as_str() }),
        };
        model["options"] = Value::Object(self.options.clone());
        match &self.payload {
            Payload::GeoJsonData(data) => model["data"] = data.clone(),
            Payload::GeoJsonUrl(url) => model["url"] = Value::String(url.clone()),
            Payload::None | Payload::PointCloud(_) => {}
        }
        Ok(model)
    }
}

fn log_unrecognized(name: &str) {
    if !Scene::OPTION_NAMES.contains(&name) {
        warn!("passing through unrecognized scene option {}", name);
    }
}
