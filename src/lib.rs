//! Inspect [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! point cloud metadata and compose scenes for a web renderer.
//!
//! # Parsing
//!
//! Parse the header and variable length records of anything that implements `Read` and `Seek`:
//!
//! ```
//! use std::io::Cursor;
//! use las_scene::parse;
//!
//! let mut bytes = vec![0; 227];
//! bytes[0..4].copy_from_slice(b"LASF");
//! bytes[24] = 1;
//! bytes[25] = 2;
//! bytes[94..96].copy_from_slice(&227u16.to_le_bytes());
//! bytes[107..111].copy_from_slice(&100u32.to_le_bytes());
//! let metadata = parse(Cursor::new(bytes)).unwrap();
//! assert_eq!(100, metadata.header.point_count());
//! ```
//!
//! Or a path, with [Metadata::from_path]. Point records are never read.
//!
//! # Point clouds
//!
//! A [PointCloudSource] merges the metadata of one or more inputs, and refuses inputs that the
//! renderer can't display: only las 1.0 through 1.3, uncompressed, with point formats 0 through 3.
//!
//! ```no_run
//! use las_scene::{Input, PointCloudSource};
//! let source = PointCloudSource::new(vec![Input::from("points.las")]).unwrap();
//! println!("{:?}", source.bounds());
//! ```
//!
//! # Scenes
//!
//! A [Scene] holds layers of features. Its [SceneValidator] keeps point clouds and vector data
//! out of the same scene:
//!
//! ```no_run
//! use las_scene::{Feature, Input, LayerType, PointCloudSource, Scene, SceneValidator};
//! use serde_json::Map;
//!
//! let validator = SceneValidator::new();
//! let mut scene = Scene::new(&validator, Map::new()).unwrap();
//! let layer = scene.create_layer(LayerType::Feature, Map::new()).unwrap();
//! let source = PointCloudSource::new(vec![Input::from("points.las")]).unwrap();
//! scene
//!     .feature_layer(layer)
//!     .unwrap()
//!     .create_feature(Feature::pointcloud(source))
//!     .unwrap();
//! assert!(scene.create_layer(LayerType::Osm, Map::new()).is_err());
//! let model = scene.display_model().unwrap();
//! assert_eq!("application/las+json", model.mime_type);
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub mod feature;
pub mod header;
pub mod scene;
pub mod vlr;

mod bounds;
mod error;
mod parser;
mod point_format;
mod source;
mod utils;
mod validator;
mod vector;
mod version;

pub use bounds::Bounds;
pub use error::{Error, FormatError, SceneRuleViolation, UnsupportedFormatError};
pub use header::Header;
pub use parser::{Metadata, parse};
pub use point_format::Format;
pub use scene::{DisplayModel, Feature, FeatureLayer, Layer, Scene};
pub use source::{Descriptor, Input, PointCloudSource, SourceOptions, Transport, check_support};
pub use validator::{FeatureType, LayerId, LayerType, SceneId, SceneMode, SceneValidator};
pub use vector::Vector;
pub use version::Version;

/// The file signature of every las file.
pub const LASF: [u8; 4] = *b"LASF";

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
