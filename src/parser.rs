//! Parse las header and vlr metadata.
//!
//! Parsing reads the public header block and then the variable length records that follow it,
//! looking for the well known text coordinate system. Point records are never touched.
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
//! let metadata = parse(Cursor::new(bytes)).unwrap();
//! assert!(metadata.projection_wkt.is_none());
//! ```

use crate::vlr::VlrHeader;
use crate::{Header, Result};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// The metadata of one las source.
#[derive(Clone, Debug, PartialEq)]
pub struct Metadata {
    /// The public header block.
    pub header: Header,

    /// The coordinate system as well known text, if the file has one.
    pub projection_wkt: Option<String>,
}

/// Parses the header and variable length records of a las stream.
///
/// The stream is rewound to its start first. Either the whole header and every vlr parse, or
/// this returns an error.
pub fn parse<R: Read + Seek>(mut read: R) -> Result<Metadata> {
    let _ = read.seek(SeekFrom::Start(0))?;
    let header = Header::read_from(&mut read)?;
    let mut projection_wkt = None;
    for i in 0..header.number_of_vlr {
        let vlr = VlrHeader::read_from(&mut read)?;
        if vlr.is_wkt_crs() {
            let wkt = vlr.read_string(&mut read)?;
            debug!("vlr {}: found projection wkt ({} bytes)", i, wkt.len());
            projection_wkt = Some(wkt);
        } else {
            debug!(
                "vlr {}: skipping {} record {} ({} bytes)",
                i, vlr.user_id, vlr.record_id, vlr.record_length_after_header
            );
            vlr.skip(&mut read)?;
        }
    }
    Ok(Metadata {
        header,
        projection_wkt,
    })
}

impl Metadata {
    /// Parses the metadata of the las file at a path.
    ///
    /// The file is closed before this returns, whether or not parsing succeeded.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Metadata> {
        let file = File::open(path)?;
        parse(BufReader::new(file))
    }
}
