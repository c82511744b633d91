//! Point cloud sources built from one or more las inputs.
//!
//! A source parses the metadata of every input, checks that we can display it, and merges the
//! statistics:
//!
//! ```no_run
//! use las_scene::{Input, PointCloudSource};
//! let source = PointCloudSource::new(vec![
//!     Input::from("tile-1.las"),
//!     Input::from("tile-2.las"),
//! ])
//! .unwrap();
//! println!("{} points", source.point_count());
//! ```
//!
//! Inputs can also be in-memory buffers. Point data are only re-read when the payload is encoded
//! for transport.

use crate::{
    Bounds, Error, Metadata, Result, UnsupportedFormatError, parser::parse, point_format::Format,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

/// One las input.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// A las file on disk.
    Path(PathBuf),

    /// An in-memory las buffer.
    Buffer {
        /// A name for error messages.
        name: String,
        /// The las bytes.
        data: Vec<u8>,
    },
}

impl Input {
    /// Creates a buffer input.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Input;
    /// let input = Input::buffer("in-memory", vec![]);
    /// assert_eq!("in-memory", input.name());
    /// ```
    pub fn buffer<S: Into<String>>(name: S, data: Vec<u8>) -> Input {
        Input::Buffer {
            name: name.into(),
            data,
        }
    }

    /// Returns the name of this input, the path for files.
    pub fn name(&self) -> String {
        match self {
            Input::Path(path) => path.display().to_string(),
            Input::Buffer { name, .. } => name.clone(),
        }
    }

    /// Parses this input's metadata.
    pub fn metadata(&self) -> Result<Metadata> {
        match self {
            Input::Path(path) => Metadata::from_path(path),
            Input::Buffer { data, .. } => parse(Cursor::new(data.as_slice())),
        }
    }

    /// Returns this input's bytes, reading files from disk.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Input::Path(path) => Ok(fs::read(path)?),
            Input::Buffer { data, .. } => Ok(data.clone()),
        }
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Input {
        Input::Path(path)
    }
}

impl From<&str> for Input {
    fn from(path: &str) -> Input {
        Input::Path(PathBuf::from(path))
    }
}

/// Checks that we can display the points of this las metadata.
///
/// Only versions 1.0 through 1.3 and uncompressed point formats 0 through 3 are displayable.
///
/// # Examples
///
/// ```
/// use las_scene::{Header, Metadata, Version, check_support};
/// let mut metadata = Metadata { header: Header::default(), projection_wkt: None };
/// assert!(check_support(&metadata).is_ok());
/// metadata.header.version = Version::new(1, 4);
/// assert!(check_support(&metadata).is_err());
/// ```
pub fn check_support(metadata: &Metadata) -> Result<()> {
    let header = &metadata.header;
    if !header.version.is_displayable() {
        return Err(UnsupportedFormatError::Version(header.version).into());
    }
    let format = header.point_format();
    if format.is_compressed() {
        return Err(UnsupportedFormatError::Compressed(header.point_data_record_format).into());
    }
    if !format.is_displayable() {
        return Err(UnsupportedFormatError::PointFormat(header.point_data_record_format).into());
    }
    Ok(())
}

/// How the point data travel to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Transport {
    /// Every input's bytes, base64 encoded, inline in the display model.
    #[default]
    Inline,

    /// The renderer downloads the data from this url.
    Url(String),
}

/// Options for a point cloud source.
#[derive(Clone, Debug, Default)]
pub struct SourceOptions {
    transport: Transport,
}

impl SourceOptions {
    /// Sends a download url to the renderer instead of the inline data.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::SourceOptions;
    /// let options = SourceOptions::default().with_download_url("https://example.com/points.las");
    /// ```
    pub fn with_download_url<S: Into<String>>(mut self, url: S) -> Self {
        self.transport = Transport::Url(url.into());
        self
    }
}

/// Merged metadata of one or more las inputs.
#[derive(Clone, Debug)]
pub struct PointCloudSource {
    inputs: Vec<Input>,
    options: SourceOptions,
    bounds: Bounds,
    point_formats: BTreeMap<u8, u64>,
    point_count: u64,
    point_count_by_return: [u64; 5],
    projection_wkt: Option<String>,
}

impl PointCloudSource {
    /// Creates a new source with default options.
    pub fn new(inputs: Vec<Input>) -> Result<PointCloudSource> {
        PointCloudSource::with_options(inputs, SourceOptions::default())
    }

    /// Creates a new source.
    ///
    /// Fails if there are no inputs, if any input is not displayable, or if the inputs'
    /// projections differ.
    pub fn with_options(inputs: Vec<Input>, options: SourceOptions) -> Result<PointCloudSource> {
        if inputs.is_empty() {
            return Err(Error::MissingInput);
        }
        let mut bounds = Bounds::default();
        let mut point_formats = BTreeMap::new();
        let mut point_count = 0;
        let mut point_count_by_return = [0; 5];
        let mut projection_wkt = None;
        for (i, input) in inputs.iter().enumerate() {
            let metadata = input.metadata()?;
            check_support(&metadata)?;
            let header = &metadata.header;
            debug!(
                "{}: las {}, {} points",
                input.name(),
                header.version,
                header.point_count()
            );

            bounds.grow(&header.bounds());
            *point_formats
                .entry(header.point_data_record_format)
                .or_insert(0) += header.point_count();
            point_count += header.point_count();
            for (total, n) in point_count_by_return
                .iter_mut()
                .zip(header.point_count_by_return())
            {
                *total += n;
            }

            if i == 0 {
                projection_wkt = metadata.projection_wkt;
            } else if metadata.projection_wkt != projection_wkt {
                return Err(Error::ProjectionMismatch {
                    first: inputs[0].name(),
                    first_wkt: projection_wkt,
                    other: input.name(),
                    other_wkt: metadata.projection_wkt,
                });
            }
        }
        Ok(PointCloudSource {
            inputs,
            options,
            bounds,
            point_formats,
            point_count,
            point_count_by_return,
            projection_wkt,
        })
    }

    /// Returns the inputs of this source.
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Returns the merged bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the number of points of each point format.
    pub fn point_formats(&self) -> &BTreeMap<u8, u64> {
        &self.point_formats
    }

    /// Returns the lowest point format of the inputs.
    pub fn point_format(&self) -> Format {
        self.point_formats
            .keys()
            .next()
            .copied()
            .map(Format::from)
            .unwrap_or_default()
    }

    /// Returns the attribute names of the points.
    ///
    /// If inputs have different formats, these are the attributes of the lowest format.
    pub fn point_attributes(&self) -> Option<Vec<&'static str>> {
        self.point_format().attributes()
    }

    /// Returns the total number of points.
    pub fn point_count(&self) -> u64 {
        self.point_count
    }

    /// Returns the total number of points for returns one through five.
    pub fn point_count_by_return(&self) -> [u64; 5] {
        self.point_count_by_return
    }

    /// Returns the shared projection as well known text.
    pub fn projection_wkt(&self) -> Option<&str> {
        self.projection_wkt.as_deref()
    }

    /// Base64-encodes every input, re-reading files from disk.
    pub fn encode(&self) -> Result<Vec<String>> {
        self.inputs
            .iter()
            .map(|input| input.read_bytes().map(|data| STANDARD.encode(data)))
            .collect()
    }

    /// Builds the display descriptor of this source.
    ///
    /// Inline transport reads and encodes every input now.
    pub fn descriptor(&self) -> Result<Descriptor> {
        let (data, url) = match &self.options.transport {
            Transport::Inline => (Some(self.encode()?), None),
            Transport::Url(url) => (None, Some(url.clone())),
        };
        Ok(Descriptor {
            feature_type: "pointcloud",
            bounds: self.bounds.to_array(),
            point_count: self.point_count,
            point_count_by_return: self.point_count_by_return,
            point_data_record_format: u8::from(self.point_format()),
            point_data_record_formats: self.point_formats.clone(),
            projection_wkt: self.projection_wkt.clone(),
            data,
            url,
        })
    }
}

/// What the renderer needs to know about a point cloud.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// Always "pointcloud".
    pub feature_type: &'static str,
    /// `[min_x, max_x, min_y, max_y, min_z, max_z]`.
    pub bounds: [f64; 6],
    #[allow(missing_docs)]
    pub point_count: u64,
    #[allow(missing_docs)]
    pub point_count_by_return: [u64; 5],
    #[allow(missing_docs)]
    pub point_data_record_format: u8,
    /// Point count per point format.
    pub point_data_record_formats: BTreeMap<u8, u64>,
    #[allow(missing_docs)]
    pub projection_wkt: Option<String>,
    /// One base64 string per input, for inline transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    /// The download url, for url transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
