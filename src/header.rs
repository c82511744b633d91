//! The las public header block.
//!
//! The header is read in two passes. The first pass reads the fixed 96-byte block that every las
//! version shares, up to and including the header size. The second pass reads the rest of the
//! header, `header_size - 96` bytes, and decodes it according to the file's version:
//!
//! ```
//! use std::io::Cursor;
//! use las_scene::Header;
//!
//! let mut bytes = vec![0; 227];
//! bytes[0..4].copy_from_slice(b"LASF");
//! bytes[24] = 1; // major
//! bytes[25] = 2; // minor
//! bytes[94..96].copy_from_slice(&227u16.to_le_bytes());
//! let header = Header::read_from(Cursor::new(bytes)).unwrap();
//! assert_eq!(227, header.header_size);
//! assert!(header.start_of_waveform_packet_records.is_none());
//! ```
//!
//! Fields that the file's version doesn't have are `None`, never zero.

pub(crate) mod layout;

use crate::{Bounds, FormatError, Result, Vector, Version, point_format::Format};
use chrono::NaiveDate;
use log::{debug, warn};
use std::fmt;
use std::io::Read;
use uuid::Uuid;

/// The size of the block that is common to all versions, up to and including the header size.
pub const FIRST_BLOCK_SIZE: u16 = 96;

/// A las public header block.
///
/// Field names follow the las specification. Fields after `min_z` only exist in some versions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    /// Must be "LASF".
    pub file_signature: [u8; 4],

    /// The source (e.g. flight line) of this file, zero if unassigned.
    pub file_source_id: u16,

    /// A bit field of global properties, introduced in las 1.2.
    pub global_encoding: u16,

    /// The project id.
    pub project_guid: [u8; 16],

    /// The version of the las specification this file follows.
    pub version: Version,

    /// The hardware or operation that generated this file.
    pub system_identifier: String,

    /// The software that generated this file.
    pub generating_software: String,

    /// Greenwich Mean Time day of the year the file was created, January 1 is day 1.
    pub file_creation_day_of_year: u16,

    /// Four digit year the file was created.
    pub file_creation_year: u16,

    /// The size of this header in bytes.
    pub header_size: u16,

    /// The number of bytes from the start of the file to the first point record.
    pub offset_to_point_data: u32,

    /// The number of variable length records between the header and the points.
    pub number_of_vlr: u32,

    /// The point data record format, with the compression bit if the data are laz.
    pub point_data_record_format: u8,

    /// The size of one point data record in bytes.
    pub point_data_record_length: u16,

    /// The 32-bit point count.
    pub legacy_point_count: u32,

    /// The 32-bit point counts for returns one through five.
    pub legacy_number_of_points_by_return: [u32; 5],

    #[allow(missing_docs)]
    pub x_scale_factor: f64,
    #[allow(missing_docs)]
    pub y_scale_factor: f64,
    #[allow(missing_docs)]
    pub z_scale_factor: f64,
    #[allow(missing_docs)]
    pub x_offset: f64,
    #[allow(missing_docs)]
    pub y_offset: f64,
    #[allow(missing_docs)]
    pub z_offset: f64,

    /// The max and min fields are the actual unscaled extents of the point data.
    pub max_x: f64,
    #[allow(missing_docs)]
    pub min_x: f64,
    #[allow(missing_docs)]
    pub max_y: f64,
    #[allow(missing_docs)]
    pub min_y: f64,
    #[allow(missing_docs)]
    pub max_z: f64,
    #[allow(missing_docs)]
    pub min_z: f64,

    /// **las 1.3 and later**: Byte offset of the waveform data packet record.
    pub start_of_waveform_packet_records: Option<u64>,

    /// **las 1.4 and later**: Byte offset of the first extended variable length record.
    pub evlr_offset: Option<u64>,

    /// **las 1.4 and later**: The number of extended variable length records.
    pub evlr_length: Option<u32>,

    /// **las 1.4 and later**: The 64-bit point count.
    pub number_of_point_records: Option<u64>,

    /// **las 1.4 and later**: The 64-bit point counts for returns one through five.
    ///
    /// las 1.4 stores fifteen return counts, only the first five are kept.
    pub number_of_points_by_return: Option<[u64; 5]>,
}

impl Header {
    /// Reads a header from a `Read`.
    ///
    /// The read is left positioned at the end of the header, i.e. at the first variable length
    /// record.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_scene::Header;
    /// assert!(Header::read_from(Cursor::new(b"LASX".to_vec())).is_err());
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Header> {
        let mut block = vec![0; usize::from(FIRST_BLOCK_SIZE)];
        read.read_exact(&mut block[0..4])?;
        if block[0..4] != crate::LASF {
            let mut signature = [0; 4];
            signature.copy_from_slice(&block[0..4]);
            return Err(FormatError::InvalidFileSignature(signature).into());
        }
        read.read_exact(&mut block[4..])?;

        let mut header = Header::default();
        layout::decode(layout::FIRST_BLOCK, &mut header, &block)?;

        let required = layout::required_size(header.version);
        if header.header_size < required {
            return Err(FormatError::HeaderTooSmall {
                version: header.version,
                header_size: header.header_size,
                required,
            }
            .into());
        }
        block.resize(usize::from(header.header_size), 0);
        read.read_exact(&mut block[usize::from(FIRST_BLOCK_SIZE)..])?;
        layout::decode(layout::REST, &mut header, &block)?;

        if header.header_size > layout::standard_size(header.version) {
            warn!(
                "las {} header is {} bytes, {} bytes of padding were ignored",
                header.version,
                header.header_size,
                header.header_size - layout::standard_size(header.version)
            );
        }
        if let Some(count) = header.number_of_point_records
            && header.legacy_point_count != 0
            && u64::from(header.legacy_point_count) != count
        {
            warn!(
                "legacy point count {} disagrees with point count {}",
                header.legacy_point_count, count
            );
        }
        debug!(
            "read las {} header: point format {}, {} points, {} vlrs",
            header.version,
            header.point_data_record_format,
            header.point_count(),
            header.number_of_vlr
        );
        Ok(header)
    }

    /// Returns this header's version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the point format of this header.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Header;
    /// let header = Header { point_data_record_format: 131, ..Default::default() };
    /// assert!(header.point_format().is_compressed());
    /// ```
    pub fn point_format(&self) -> Format {
        Format::from(self.point_data_record_format)
    }

    /// Returns true if the point data are laz-compressed.
    pub fn is_compressed(&self) -> bool {
        self.point_format().is_compressed()
    }

    /// Returns the number of points.
    ///
    /// Uses the legacy count if it is set, otherwise the 64-bit count, otherwise zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Header;
    /// let mut header = Header { legacy_point_count: 100, ..Default::default() };
    /// assert_eq!(100, header.point_count());
    /// header.legacy_point_count = 0;
    /// header.number_of_point_records = Some(42);
    /// assert_eq!(42, header.point_count());
    /// ```
    pub fn point_count(&self) -> u64 {
        if self.legacy_point_count != 0 {
            u64::from(self.legacy_point_count)
        } else {
            self.number_of_point_records.unwrap_or(0)
        }
    }

    /// Returns the number of points for returns one through five.
    ///
    /// Uses the legacy counts if any is set, otherwise the 64-bit counts.
    pub fn point_count_by_return(&self) -> [u64; 5] {
        if self.legacy_number_of_points_by_return.iter().any(|&n| n != 0) {
            self.legacy_number_of_points_by_return.map(u64::from)
        } else {
            self.number_of_points_by_return.unwrap_or_default()
        }
    }

    /// Returns the bounds of the point data.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Header;
    /// let header = Header { min_x: 1., max_x: 2., ..Default::default() };
    /// let bounds = header.bounds();
    /// assert_eq!(1., bounds.min.x);
    /// assert_eq!(2., bounds.max.x);
    /// ```
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: Vector {
                x: self.min_x,
                y: self.min_y,
                z: self.min_z,
            },
            max: Vector {
                x: self.max_x,
                y: self.max_y,
                z: self.max_z,
            },
        }
    }

    /// Returns the file creation date, or `None` if the year or day are not a real date.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Header;
    /// let header = Header {
    ///     file_creation_year: 2018,
    ///     file_creation_day_of_year: 32,
    ///     ..Default::default()
    /// };
    /// assert_eq!("2018-02-01", header.date().unwrap().to_string());
    /// assert!(Header::default().date().is_none());
    /// ```
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(
            i32::from(self.file_creation_year),
            u32::from(self.file_creation_day_of_year),
        )
    }

    /// Returns the project id.
    pub fn guid(&self) -> Uuid {
        Uuid::from_bytes(self.project_guid)
    }

    fn populated_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (
                "file_signature",
                String::from_utf8_lossy(&self.file_signature).into_owned(),
            ),
            ("file_source_id", self.file_source_id.to_string()),
            ("global_encoding", format!("0x{:x}", self.global_encoding)),
            ("project_guid", self.guid().to_string()),
            ("version_major", self.version.major.to_string()),
            ("version_minor", self.version.minor.to_string()),
            ("system_identifier", self.system_identifier.clone()),
            ("generating_software", self.generating_software.clone()),
            (
                "file_creation_day_of_year",
                self.file_creation_day_of_year.to_string(),
            ),
            ("file_creation_year", self.file_creation_year.to_string()),
            ("header_size", self.header_size.to_string()),
            ("offset_to_point_data", self.offset_to_point_data.to_string()),
            ("number_of_vlr", self.number_of_vlr.to_string()),
            (
                "point_data_record_format",
                self.point_data_record_format.to_string(),
            ),
            (
                "point_data_record_length",
                self.point_data_record_length.to_string(),
            ),
            ("legacy_point_count", self.legacy_point_count.to_string()),
            (
                "legacy_number_of_points_by_return",
                format!("{:?}", self.legacy_number_of_points_by_return),
            ),
            ("x_scale_factor", self.x_scale_factor.to_string()),
            ("y_scale_factor", self.y_scale_factor.to_string()),
            ("z_scale_factor", self.z_scale_factor.to_string()),
            ("x_offset", self.x_offset.to_string()),
            ("y_offset", self.y_offset.to_string()),
            ("z_offset", self.z_offset.to_string()),
            ("max_x", self.max_x.to_string()),
            ("min_x", self.min_x.to_string()),
            ("max_y", self.max_y.to_string()),
            ("min_y", self.min_y.to_string()),
            ("max_z", self.max_z.to_string()),
            ("min_z", self.min_z.to_string()),
        ];
        if let Some(n) = self.start_of_waveform_packet_records {
            fields.push(("start_of_waveform_packet_records", n.to_string()));
        }
        if let Some(n) = self.evlr_offset {
            fields.push(("evlr_offset", n.to_string()));
        }
        if let Some(n) = self.evlr_length {
            fields.push(("evlr_length", n.to_string()));
        }
        if let Some(n) = self.number_of_point_records {
            fields.push(("number_of_point_records", n.to_string()));
        }
        if let Some(n) = self.number_of_points_by_return {
            fields.push(("number_of_points_by_return", format!("{:?}", n)));
        }
        fields.sort_by_key(|&(name, _)| name);
        fields
    }
}

/// Lists every populated field, sorted by name.
///
/// Fields that this header's version doesn't have are left out.
impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (name, value) in self.populated_fields() {
            writeln!(f, "  {}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
