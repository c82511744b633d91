//! The byte layout of the public header block, one row per field.
//!
//! Offsets are absolute from the start of the file. Every field is little-endian.

use super::{FIRST_BLOCK_SIZE, Header};
use crate::feature::{Evlrs, Feature, LargeFiles, Waveforms};
use crate::utils::AsLasStr;
use crate::{Result, Version};
use byteorder::{ByteOrder, LittleEndian};
use log::trace;

type Decode = fn(&mut Header, &[u8]) -> Result<()>;

/// One field of the header.
pub(crate) struct Field {
    pub(crate) name: &'static str,
    pub(crate) offset: usize,
    pub(crate) width: usize,
    /// Is this field part of the header for this version?
    pub(crate) present: fn(Version) -> bool,
    pub(crate) decode: Decode,
}

fn always(_: Version) -> bool {
    true
}

macro_rules! layout {
    ($($name:ident @ $offset:expr, $width:expr, $present:expr => |$h:ident, $b:ident| $body:expr;)+) => {
        &[$(
            Field {
                name: stringify!($name),
                offset: $offset,
                width: $width,
                present: $present,
                decode: |$h: &mut Header, $b: &[u8]| {
                    $body;
                    Ok(())
                },
            },
        )+]
    };
}

/// Everything up to and including the header size.
pub(crate) const FIRST_BLOCK: &[Field] = layout! {
    file_signature @ 0, 4, always => |h, b| h.file_signature.copy_from_slice(b);
    file_source_id @ 4, 2, always => |h, b| h.file_source_id = LittleEndian::read_u16(b);
    global_encoding @ 6, 2, always => |h, b| h.global_encoding = LittleEndian::read_u16(b);
    project_guid @ 8, 16, always => |h, b| h.project_guid.copy_from_slice(b);
    version_major @ 24, 1, always => |h, b| h.version.major = b[0];
    version_minor @ 25, 1, always => |h, b| h.version.minor = b[0];
    system_identifier @ 26, 32, always => |h, b| h.system_identifier = b.as_las_str()?.to_string();
    generating_software @ 58, 32, always => |h, b| h.generating_software = b.as_las_str()?.to_string();
    file_creation_day_of_year @ 90, 2, always => |h, b| h.file_creation_day_of_year = LittleEndian::read_u16(b);
    file_creation_year @ 92, 2, always => |h, b| h.file_creation_year = LittleEndian::read_u16(b);
    header_size @ 94, 2, always => |h, b| h.header_size = LittleEndian::read_u16(b);
};

/// Everything after the header size, in strict field order.
pub(crate) const REST: &[Field] = layout! {
    offset_to_point_data @ 96, 4, always => |h, b| h.offset_to_point_data = LittleEndian::read_u32(b);
    number_of_vlr @ 100, 4, always => |h, b| h.number_of_vlr = LittleEndian::read_u32(b);
    point_data_record_format @ 104, 1, always => |h, b| h.point_data_record_format = b[0];
    point_data_record_length @ 105, 2, always => |h, b| h.point_data_record_length = LittleEndian::read_u16(b);
    legacy_point_count @ 107, 4, always => |h, b| h.legacy_point_count = LittleEndian::read_u32(b);
    legacy_number_of_points_by_return @ 111, 20, always => |h, b| LittleEndian::read_u32_into(b, &mut h.legacy_number_of_points_by_return);
    x_scale_factor @ 131, 8, always => |h, b| h.x_scale_factor = LittleEndian::read_f64(b);
    y_scale_factor @ 139, 8, always => |h, b| h.y_scale_factor = LittleEndian::read_f64(b);
    z_scale_factor @ 147, 8, always => |h, b| h.z_scale_factor = LittleEndian::read_f64(b);
    x_offset @ 155, 8, always => |h, b| h.x_offset = LittleEndian::read_f64(b);
    y_offset @ 163, 8, always => |h, b| h.y_offset = LittleEndian::read_f64(b);
    z_offset @ 171, 8, always => |h, b| h.z_offset = LittleEndian::read_f64(b);
    max_x @ 179, 8, always => |h, b| h.max_x = LittleEndian::read_f64(b);
    min_x @ 187, 8, always => |h, b| h.min_x = LittleEndian::read_f64(b);
    max_y @ 195, 8, always => |h, b| h.max_y = LittleEndian::read_f64(b);
    min_y @ 203, 8, always => |h, b| h.min_y = LittleEndian::read_f64(b);
    max_z @ 211, 8, always => |h, b| h.max_z = LittleEndian::read_f64(b);
    min_z @ 219, 8, always => |h, b| h.min_z = LittleEndian::read_f64(b);
    start_of_waveform_packet_records @ 227, 8, Waveforms::is_supported_by => |h, b| h.start_of_waveform_packet_records = Some(LittleEndian::read_u64(b));
    evlr_offset @ 235, 8, Evlrs::is_supported_by => |h, b| h.evlr_offset = Some(LittleEndian::read_u64(b));
    evlr_length @ 243, 4, Evlrs::is_supported_by => |h, b| h.evlr_length = Some(LittleEndian::read_u32(b));
    number_of_point_records @ 247, 8, LargeFiles::is_supported_by => |h, b| h.number_of_point_records = Some(LittleEndian::read_u64(b));
    number_of_points_by_return @ 255, 40, LargeFiles::is_supported_by => |h, b| {
        let mut counts = [0; 5];
        LittleEndian::read_u64_into(b, &mut counts);
        h.number_of_points_by_return = Some(counts);
    };
};

/// Decodes every field of `fields` that is present in the header's version.
///
/// The version must already be decoded before the optional fields are.
pub(crate) fn decode(fields: &[Field], header: &mut Header, block: &[u8]) -> Result<()> {
    for field in fields {
        if !(field.present)(header.version) {
            continue;
        }
        let bytes = &block[field.offset..field.offset + field.width];
        trace!("{}: {:?}", field.name, bytes);
        (field.decode)(header, bytes)?;
    }
    Ok(())
}

/// The number of bytes the fields of this version occupy.
pub(crate) fn required_size(version: Version) -> u16 {
    let end = FIRST_BLOCK
        .iter()
        .chain(REST)
        .filter(|field| (field.present)(version))
        .map(|field| field.offset + field.width)
        .max()
        .unwrap_or(usize::from(FIRST_BLOCK_SIZE));
    u16::try_from(end).unwrap_or(u16::MAX)
}

/// The header size las writers use for this version.
///
/// las 1.4 stores fifteen 64-bit return counts where we only read five.
pub(crate) fn standard_size(version: Version) -> u16 {
    if version.supports::<LargeFiles>() {
        375
    } else {
        required_size(version)
    }
}
