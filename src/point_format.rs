//! Point data record formats.

use std::fmt;

const IS_COMPRESSED_MASK: u8 = 0x80;

const BASE: &[&str] = &["X", "Y", "Z", "Intensity", "Return Number", "Number of Returns (given pulse)"];
const LEGACY_FLAGS: &[&str] = &[
    "Scan Direction Flag",
    "Edge of Flight Line",
    "Classification",
    "Scan Angle Rank (-90 to +90) – Left side",
    "User Data",
];
const EXTENDED_FLAGS: &[&str] = &[
    "Classification Flags",
    "Scanner Channel",
    "Scan Direction Flag",
    "Edge of Flight Line",
    "Classification",
    "User Data",
    "Scan Angle",
];
const GPS_TIME: &[&str] = &["GPS Time"];
const COLOR: &[&str] = &["Red", "Green", "Blue"];
const NIR: &[&str] = &["NIR"];
const WAVEFORM: &[&str] = &[
    "Wave Packet Descriptor Index",
    "Byte offset to waveform data",
    "Return Point Waveform Location",
    "X(t)",
    "Y(t)",
    "Z(t)",
];

/// A point data record format, as stored in the header.
///
/// The raw byte can carry the laz compression bit, which is not part of the format number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Format(u8);

impl Format {
    /// Returns true if the compression bit is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Format;
    /// assert!(!Format::from(3).is_compressed());
    /// assert!(Format::from(131).is_compressed());
    /// ```
    pub fn is_compressed(&self) -> bool {
        self.0 & IS_COMPRESSED_MASK == IS_COMPRESSED_MASK
    }

    /// Returns true if we can display points of this format.
    ///
    /// Only uncompressed formats 0 through 3 are displayable.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Format;
    /// assert!(Format::from(0).is_displayable());
    /// assert!(!Format::from(4).is_displayable());
    /// assert!(!Format::from(128).is_displayable());
    /// ```
    pub fn is_displayable(&self) -> bool {
        self.0 <= 3
    }

    /// Does this format have a point source id?
    pub fn has_point_source_id(&self) -> bool {
        self.0 != 0
    }

    /// Does this format have gps time?
    pub fn has_gps_time(&self) -> bool {
        !matches!(self.0, 0 | 2)
    }

    /// Does this format have color?
    pub fn has_color(&self) -> bool {
        matches!(self.0, 2 | 3 | 5 | 7 | 8 | 10)
    }

    /// Does this format have a near infrared channel?
    pub fn has_nir(&self) -> bool {
        matches!(self.0, 8 | 10)
    }

    /// Does this format have waveform data?
    pub fn has_waveform(&self) -> bool {
        matches!(self.0, 4 | 5 | 9 | 10)
    }

    /// Is this one of the las 1.4 extended formats (6 and up)?
    pub fn is_extended(&self) -> bool {
        self.0 >= 6
    }

    /// Returns the names of the attributes of each point, in record order.
    ///
    /// Returns `None` for compressed data and for format numbers the las specification doesn't
    /// define. The compression bit is never masked off.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Format;
    /// let attributes = Format::from(2).attributes().unwrap();
    /// assert_eq!(Some(&"Blue"), attributes.last());
    /// assert!(Format::from(130).attributes().is_none());
    /// assert!(Format::from(11).attributes().is_none());
    /// ```
    pub fn attributes(&self) -> Option<Vec<&'static str>> {
        if self.0 > 10 {
            return None;
        }
        let mut attributes = BASE.to_vec();
        if self.is_extended() {
            attributes.extend(EXTENDED_FLAGS);
        } else {
            attributes.extend(LEGACY_FLAGS);
        }
        if self.has_point_source_id() {
            attributes.push("Point Source ID");
        }
        if self.has_gps_time() {
            attributes.extend(GPS_TIME);
        }
        if self.has_color() {
            attributes.extend(COLOR);
        }
        if self.has_nir() {
            attributes.extend(NIR);
        }
        if self.has_waveform() {
            attributes.extend(WAVEFORM);
        }
        Some(attributes)
    }
}

impl From<u8> for Format {
    fn from(n: u8) -> Format {
        Format(n)
    }
}

impl From<Format> for u8 {
    fn from(format: Format) -> u8 {
        format.0
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_compressed() {
            write!(f, "point format {} (compressed)", self.0 & !IS_COMPRESSED_MASK)
        } else {
            write!(f, "point format {}", self.0)
        }
    }
}
