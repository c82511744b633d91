mod common;

use common::LasBuilder;
use las_scene::{Error, FormatError, Metadata, Version, parse};
use std::io::Cursor;

#[test]
fn las_1_2_with_100_points() {
    common::init_logger();
    let bytes = LasBuilder::default()
        .point_count(100)
        .points_by_return([80, 20, 0, 0, 0])
        .bounds([1., 2., 3.], [4., 5., 6.])
        .vlr("gadomski", 1, &[0xde, 0xad, 0xbe, 0xef])
        .build();
    let metadata = parse(Cursor::new(bytes)).unwrap();
    let header = &metadata.header;
    assert_eq!(Version::new(1, 2), header.version);
    assert_eq!(227, header.header_size);
    assert_eq!(1, header.number_of_vlr);
    assert_eq!(227 + 58, header.offset_to_point_data);
    assert!(header.point_data_record_format <= 3);
    assert_eq!(100, header.legacy_point_count);
    assert_eq!(100, header.point_count());
    assert_eq!([80, 20, 0, 0, 0], header.point_count_by_return());
    assert_eq!("las-scene tests", header.system_identifier);
    assert_eq!("LasBuilder", header.generating_software);
    assert_eq!(1., header.min_x);
    assert_eq!(6., header.max_z);
    assert_eq!(None, header.start_of_waveform_packet_records);
    assert_eq!(None, header.number_of_point_records);
    assert!(metadata.projection_wkt.is_none());
}

#[test]
fn wkt_is_extracted() {
    let wkt = "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\"]]";
    let bytes = LasBuilder::default()
        .vlr("LASF_Projection", 34735, &[1, 0, 1, 0, 0, 0, 0, 0])
        .wkt(wkt)
        .vlr("binary", 7, &[0xff; 12])
        .build();
    let metadata = parse(Cursor::new(bytes)).unwrap();
    assert_eq!(Some(wkt), metadata.projection_wkt.as_deref());
}

#[test]
fn wkt_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = LasBuilder::default()
        .wkt("PROJCS[\"NAD83 / UTM zone 10N\"]")
        .write_to(dir.path(), "projected.las");
    let metadata = Metadata::from_path(&path).unwrap();
    assert_eq!(
        Some("PROJCS[\"NAD83 / UTM zone 10N\"]"),
        metadata.projection_wkt.as_deref()
    );
}

#[test]
fn las_1_3_has_waveforms() {
    let bytes = LasBuilder::default().version(1, 3).point_count(5).build();
    let header = parse(Cursor::new(bytes)).unwrap().header;
    assert_eq!(235, header.header_size);
    assert_eq!(Some(0), header.start_of_waveform_packet_records);
    assert_eq!(None, header.evlr_offset);
}

#[test]
fn las_1_4_large_point_count() {
    let bytes = LasBuilder::default()
        .version(1, 4)
        .point_format(6)
        .point_count(12)
        .legacy_point_count(0)
        .points_by_return([10, 2, 0, 0, 0])
        .build();
    let header = parse(Cursor::new(bytes)).unwrap().header;
    assert_eq!(375, header.header_size);
    assert_eq!(Some(12), header.number_of_point_records);
    assert_eq!(Some(0), header.evlr_length);
    assert_eq!(12, header.point_count());
    assert_eq!([10, 2, 0, 0, 0], header.point_count_by_return());
}

#[test]
fn future_version_parses() {
    let bytes = LasBuilder::default().version(2, 0).build();
    let header = parse(Cursor::new(bytes)).unwrap().header;
    assert_eq!(Version::new(2, 0), header.version);
}

#[test]
fn invalid_signature() {
    let mut bytes = LasBuilder::default().build();
    bytes[0..4].copy_from_slice(b"LASG");
    let err = parse(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(
        err,
        Error::Format(FormatError::InvalidFileSignature(_))
    ));
}

#[test]
fn truncated_header() {
    let mut bytes = LasBuilder::default().build();
    bytes.truncate(200);
    let err = parse(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, Error::Format(FormatError::Truncated)));
}

#[test]
fn truncated_vlr() {
    let mut bytes = LasBuilder::default().wkt("GEOGCS[]").build();
    bytes.truncate(227 + 54 + 3);
    let err = parse(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, Error::Format(FormatError::Truncated)));
}

#[test]
fn header_too_small() {
    let bytes = LasBuilder::default()
        .version(1, 3)
        .header_size(227)
        .build();
    let err = parse(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(
        err,
        Error::Format(FormatError::HeaderTooSmall {
            header_size: 227,
            required: 235,
            ..
        })
    ));
}

#[test]
fn padded_header() {
    common::init_logger();
    let bytes = LasBuilder::default()
        .header_size(231)
        .wkt("GEOGCS[]")
        .build();
    let metadata = parse(Cursor::new(bytes)).unwrap();
    assert_eq!(231, metadata.header.header_size);
    assert_eq!(Some("GEOGCS[]"), metadata.projection_wkt.as_deref());
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Metadata::from_path(dir.path().join("missing.las")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
