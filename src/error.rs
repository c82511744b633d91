use crate::{LayerId, SceneId, Version};
use std::io;
use thiserror::Error;

const SUPPORTED: &str = "only LAS versions 1.0-1.3, point formats 0-3, no compression";

/// Crate-specific error enum.
#[derive(Error, Debug)]
pub enum Error {
    /// The bytes are not a well-formed las header.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The las data are well formed, but we can't display them.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedFormatError),

    /// Two inputs of one point cloud have different coordinate systems.
    #[error(
        "projection mismatch between input files: {} is projection {}, {} is projection {}",
        .first,
        .first_wkt.as_deref().unwrap_or("none"),
        .other,
        .other_wkt.as_deref().unwrap_or("none")
    )]
    ProjectionMismatch {
        /// The name of the first input.
        first: String,
        /// The projection of the first input.
        first_wkt: Option<String>,
        /// The name of the input that disagrees with the first.
        other: String,
        /// The projection of that input.
        other_wkt: Option<String>,
    },

    /// A scene rule was broken.
    #[error(transparent)]
    SceneRule(#[from] SceneRuleViolation),

    /// The scene was already registered with the validator.
    #[error("scene {0} is already registered")]
    DuplicateScene(SceneId),

    /// The scene was never registered with the validator.
    #[error("scene {0} is not registered")]
    UnknownScene(SceneId),

    /// The layer was never added to a scene.
    #[error("layer {0} does not belong to any scene")]
    UnknownLayer(LayerId),

    /// Features can only be added to feature layers.
    #[error("layer {0} is not a feature layer")]
    NotAFeatureLayer(LayerId),

    /// A feature was created without any data, filename, or url.
    #[error("missing data, filename, or url argument")]
    MissingInput,

    /// The layer type string is not one we know about.
    #[error("unrecognized layer type \"{0}\"")]
    UnknownLayerType(String),

    /// The feature type string is not one we know about.
    #[error("unrecognized feature type \"{0}\"")]
    UnknownFeatureType(String),

    /// [std::io::Error]
    #[error(transparent)]
    Io(io::Error),

    /// [serde_json::Error]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading the header and variable length records.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The file signature was not "LASF".
    #[error("not a LAS/LAZ file, invalid file signature: {0:?}")]
    InvalidFileSignature([u8; 4]),

    /// The stream ended before the header or a vlr was complete.
    #[error("the stream ended before the las header and vlrs could be read")]
    Truncated,

    /// This string is not ASCII, and it was supposed to be.
    #[error("this string is not ascii: {0:?}")]
    NotAscii(Vec<u8>),

    /// The header size is too small to hold the fields the version requires.
    #[error("header size {header_size} is too small, las {version} requires at least {required}")]
    HeaderTooSmall {
        /// The las version.
        version: Version,
        /// The header size from the file.
        header_size: u16,
        /// The number of bytes the version needs.
        required: u16,
    },
}

/// Valid las data that we refuse to load.
#[derive(Error, Debug, Clone, Copy)]
pub enum UnsupportedFormatError {
    /// The version is outside of 1.0-1.3.
    #[error("cannot load LAS file version {0}, {supported}", supported = SUPPORTED)]
    Version(Version),

    /// The point data are compressed (laz).
    #[error("cannot load laz/compressed data (point format {0}), {supported}", supported = SUPPORTED)]
    Compressed(u8),

    /// The point record format is outside of 0-3.
    #[error("cannot load point record format {0}, {supported}", supported = SUPPORTED)]
    PointFormat(u8),
}

/// The scene rules.
///
/// A scene can hold regular (osm and vector) layers and features, or one point cloud feature,
/// never both.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRuleViolation {
    /// An osm layer can't join a scene that holds a point cloud.
    #[error("cannot add osm layer to scene containing a point cloud object")]
    OsmLayerInPointCloudScene,

    /// A point cloud scene takes no further layers.
    #[error("cannot add layer to scene containing a point cloud object")]
    LayerInPointCloudScene,

    /// A point cloud can't join a scene that already has osm layers or vector features.
    #[error("cannot add point cloud to vector scene")]
    PointCloudInVectorScene,

    /// Only one point cloud per scene.
    #[error("only one point cloud feature per scene")]
    MultiplePointClouds,

    /// A vector feature can't join a scene that holds a point cloud.
    #[error("cannot mix point cloud with vector features")]
    VectorFeatureInPointCloudScene,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Format(FormatError::Truncated)
        } else {
            Error::Io(err)
        }
    }
}

impl Error {
    /// Returns true if this error comes from malformed las bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::{Error, FormatError};
    /// assert!(Error::from(FormatError::Truncated).is_format());
    /// assert!(!Error::MissingInput.is_format());
    /// ```
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_is_truncated() {
        let err = Error::from(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(matches!(err, Error::Format(FormatError::Truncated)));
    }

    #[test]
    fn not_found_is_io() {
        let err = Error::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn unsupported_names_range() {
        let message = UnsupportedFormatError::Version(Version::new(1, 4)).to_string();
        assert!(message.contains("1.4"));
        assert!(message.contains("1.0-1.3"));
        let message = UnsupportedFormatError::Compressed(3).to_string();
        assert!(message.contains("point format 3"));
        assert!(message.ends_with("no compression"));
        let message = UnsupportedFormatError::PointFormat(6).to_string();
        assert!(message.starts_with("cannot load point record format 6, only"));
    }

    #[test]
    fn mismatch_names_both() {
        let err = Error::ProjectionMismatch {
            first: "a.las".to_string(),
            first_wkt: Some("WKT A".to_string()),
            other: "b.las".to_string(),
            other_wkt: None,
        };
        let message = err.to_string();
        assert!(message.contains("a.las"));
        assert!(message.contains("b.las"));
        assert!(message.contains("WKT A"));
        assert!(message.contains("none"));
    }
}
