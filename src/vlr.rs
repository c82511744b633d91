//! Variable length records are used to store additional metadata not defined in the header.
//!
//! The only vlr we care about holds the coordinate system as well known text. Every other vlr is
//! skipped by seeking past its payload, so binary payloads never get decoded.

use crate::utils::AsLasStr;
use crate::Result;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// The size of a vlr header, in bytes.
pub const HEADER_SIZE: usize = 54;

/// The user id of the projection vlrs.
pub const PROJECTION_USER_ID: &str = "LASF_Projection";

/// The record id of the well known text coordinate system vlr.
pub const WKT_RECORD_ID: u16 = 2112;

/// The header of a variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VlrHeader {
    /// Reserved, should be zero.
    pub reserved: u16,

    /// The user that created this record, e.g. "LASF_Projection".
    pub user_id: String,

    /// This value specifies the type of record, and depends on the user id.
    pub record_id: u16,

    /// The number of bytes of data after this header.
    pub record_length_after_header: u16,

    /// Textual description of these data.
    pub description: String,
}

impl VlrHeader {
    /// Reads a vlr header, leaving the read at the start of the record's data.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_scene::vlr::VlrHeader;
    ///
    /// let mut bytes = vec![0; 54];
    /// bytes[2..17].copy_from_slice(b"LASF_Projection");
    /// bytes[18..20].copy_from_slice(&2112u16.to_le_bytes());
    /// let vlr = VlrHeader::read_from(Cursor::new(bytes)).unwrap();
    /// assert!(vlr.is_wkt_crs());
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<VlrHeader> {
        let reserved = read.read_u16::<LittleEndian>()?;
        let mut user_id = [0; 16];
        read.read_exact(&mut user_id)?;
        let record_id = read.read_u16::<LittleEndian>()?;
        let record_length_after_header = read.read_u16::<LittleEndian>()?;
        let mut description = [0; 32];
        read.read_exact(&mut description)?;
        Ok(VlrHeader {
            reserved,
            user_id: user_id.as_las_str()?.to_string(),
            record_id,
            record_length_after_header,
            description: description.as_las_str()?.to_string(),
        })
    }

    /// Is this the well known text coordinate system record?
    pub fn is_wkt_crs(&self) -> bool {
        self.user_id == PROJECTION_USER_ID && self.record_id == WKT_RECORD_ID
    }

    /// Reads this record's data as an ascii string.
    ///
    /// Everything after the first nul is dropped.
    pub fn read_string<R: Read>(&self, mut read: R) -> Result<String> {
        let mut data = vec![0; usize::from(self.record_length_after_header)];
        read.read_exact(&mut data)?;
        Ok(data.as_las_str()?.to_string())
    }

    /// Seeks past this record's data without reading it.
    pub fn skip<S: Seek>(&self, mut seek: S) -> Result<()> {
        let _ = seek.seek(SeekFrom::Current(i64::from(self.record_length_after_header)))?;
        Ok(())
    }
}
