//! Synthesizes las files for the integration tests.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Las bytes with a configurable header and vlrs, followed by zeroed point records.
#[derive(Clone, Debug)]
pub struct LasBuilder {
    major: u8,
    minor: u8,
    point_format: u8,
    point_count: u64,
    legacy_point_count: Option<u32>,
    points_by_return: [u32; 5],
    min: [f64; 3],
    max: [f64; 3],
    header_size: Option<u16>,
    vlrs: Vec<(String, u16, Vec<u8>)>,
}

impl Default for LasBuilder {
    fn default() -> LasBuilder {
        LasBuilder {
            major: 1,
            minor: 2,
            point_format: 0,
            point_count: 0,
            legacy_point_count: None,
            points_by_return: [0; 5],
            min: [0.; 3],
            max: [0.; 3],
            header_size: None,
            vlrs: Vec::new(),
        }
    }
}

impl LasBuilder {
    pub fn version(mut self, major: u8, minor: u8) -> LasBuilder {
        self.major = major;
        self.minor = minor;
        self
    }

    pub fn point_format(mut self, point_format: u8) -> LasBuilder {
        self.point_format = point_format;
        self
    }

    pub fn point_count(mut self, point_count: u64) -> LasBuilder {
        self.point_count = point_count;
        self
    }

    /// Overrides the legacy count, e.g. zero for a las 1.4 file with too many points.
    pub fn legacy_point_count(mut self, legacy_point_count: u32) -> LasBuilder {
        self.legacy_point_count = Some(legacy_point_count);
        self
    }

    pub fn points_by_return(mut self, points_by_return: [u32; 5]) -> LasBuilder {
        self.points_by_return = points_by_return;
        self
    }

    pub fn bounds(mut self, min: [f64; 3], max: [f64; 3]) -> LasBuilder {
        self.min = min;
        self.max = max;
        self
    }

    pub fn header_size(mut self, header_size: u16) -> LasBuilder {
        self.header_size = Some(header_size);
        self
    }

    pub fn vlr(mut self, user_id: &str, record_id: u16, data: &[u8]) -> LasBuilder {
        self.vlrs.push((user_id.to_string(), record_id, data.to_vec()));
        self
    }

    /// Adds a nul-terminated well known text vlr.
    pub fn wkt(self, wkt: &str) -> LasBuilder {
        let mut data = wkt.as_bytes().to_vec();
        data.push(0);
        self.vlr("LASF_Projection", 2112, &data)
    }

    fn standard_header_size(&self) -> u16 {
        if self.at_least(1, 4) {
            375
        } else if self.at_least(1, 3) {
            235
        } else {
            227
        }
    }

    fn at_least(&self, major: u8, minor: u8) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    fn point_data_record_length(&self) -> u16 {
        match self.point_format & 0x7f {
            0 => 20,
            1 => 28,
            2 => 26,
            3 => 34,
            _ => 30,
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let header_size = self.header_size.unwrap_or(self.standard_header_size());
        let vlr_bytes: usize = self.vlrs.iter().map(|(_, _, data)| 54 + data.len()).sum();
        let legacy_point_count = self
            .legacy_point_count
            .unwrap_or(u32::try_from(self.point_count).unwrap_or(0));

        let mut bytes = Vec::new();
        bytes.write_all(b"LASF").unwrap();
        bytes.write_u16::<LittleEndian>(0).unwrap();
        bytes.write_u16::<LittleEndian>(0).unwrap();
        bytes.write_all(&[0; 16]).unwrap();
        bytes.write_u8(self.major).unwrap();
        bytes.write_u8(self.minor).unwrap();
        write_padded(&mut bytes, "las-scene tests", 32);
        write_padded(&mut bytes, "LasBuilder", 32);
        bytes.write_u16::<LittleEndian>(40).unwrap();
        bytes.write_u16::<LittleEndian>(2024).unwrap();
        bytes.write_u16::<LittleEndian>(header_size).unwrap();
        bytes
            .write_u32::<LittleEndian>(u32::from(header_size) + vlr_bytes as u32)
            .unwrap();
        bytes
            .write_u32::<LittleEndian>(self.vlrs.len() as u32)
            .unwrap();
        bytes.write_u8(self.point_format).unwrap();
        bytes
            .write_u16::<LittleEndian>(self.point_data_record_length())
            .unwrap();
        bytes.write_u32::<LittleEndian>(legacy_point_count).unwrap();
        for n in self.points_by_return {
            bytes.write_u32::<LittleEndian>(n).unwrap();
        }
        for scale in [0.01, 0.01, 0.01] {
            bytes.write_f64::<LittleEndian>(scale).unwrap();
        }
        for _ in 0..3 {
            bytes.write_f64::<LittleEndian>(0.).unwrap();
        }
        for axis in 0..3 {
            bytes.write_f64::<LittleEndian>(self.max[axis]).unwrap();
            bytes.write_f64::<LittleEndian>(self.min[axis]).unwrap();
        }
        if self.at_least(1, 3) {
            bytes.write_u64::<LittleEndian>(0).unwrap();
        }
        if self.at_least(1, 4) {
            bytes.write_u64::<LittleEndian>(0).unwrap();
            bytes.write_u32::<LittleEndian>(0).unwrap();
            bytes.write_u64::<LittleEndian>(self.point_count).unwrap();
            for i in 0..15 {
                let n = self.points_by_return.get(i).copied().unwrap_or(0);
                bytes.write_u64::<LittleEndian>(u64::from(n)).unwrap();
            }
        }
        bytes.resize(usize::from(header_size).max(bytes.len()), 0);
        bytes.truncate(usize::from(header_size).max(96));

        for (user_id, record_id, data) in &self.vlrs {
            bytes.write_u16::<LittleEndian>(0).unwrap();
            write_padded(&mut bytes, user_id, 16);
            bytes.write_u16::<LittleEndian>(*record_id).unwrap();
            bytes
                .write_u16::<LittleEndian>(data.len() as u16)
                .unwrap();
            write_padded(&mut bytes, "", 32);
            bytes.write_all(data).unwrap();
        }

        let point_bytes = self.point_count as usize * usize::from(self.point_data_record_length());
        bytes.resize(bytes.len() + point_bytes, 0);
        bytes
    }

    /// Writes the las bytes to `dir/name` and returns the path.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

fn write_padded(bytes: &mut Vec<u8>, s: &str, width: usize) {
    let mut field = vec![0; width];
    field[..s.len()].copy_from_slice(s.as_bytes());
    bytes.write_all(&field).unwrap();
}

/// Sends the crate's log records to the test output.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
