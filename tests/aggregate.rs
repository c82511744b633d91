mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::LasBuilder;
use las_scene::{Error, Input, PointCloudSource, SourceOptions, UnsupportedFormatError};

fn input(builder: LasBuilder) -> Input {
    Input::buffer("buffer.las", builder.build())
}

#[test]
fn supported_versions() {
    for minor in 0..=3 {
        for format in 0..=3 {
            let builder = LasBuilder::default()
                .version(1, minor)
                .point_format(format)
                .point_count(3);
            assert!(PointCloudSource::new(vec![input(builder)]).is_ok());
        }
    }
}

#[test]
fn version_gating() {
    for (major, minor) in [(1, 4), (1, 5), (2, 0), (2, 3)] {
        let builder = LasBuilder::default().version(major, minor);
        let err = PointCloudSource::new(vec![input(builder)]).unwrap_err();
        assert!(matches!(
            err,
            Error::Unsupported(UnsupportedFormatError::Version(_))
        ));
    }
}

#[test]
fn compression_rejection() {
    for minor in 0..=3 {
        for format in [128, 129, 130, 131] {
            let builder = LasBuilder::default().version(1, minor).point_format(format);
            let err = PointCloudSource::new(vec![input(builder)]).unwrap_err();
            assert!(matches!(
                err,
                Error::Unsupported(UnsupportedFormatError::Compressed(_))
            ));
        }
    }
}

#[test]
fn point_format_rejection() {
    let builder = LasBuilder::default().version(1, 3).point_format(5);
    let err = PointCloudSource::new(vec![input(builder)]).unwrap_err();
    assert!(err.to_string().contains("point formats 0-3"));
}

#[test]
fn duplicated_input_is_idempotent() {
    common::init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = LasBuilder::default()
        .point_count(100)
        .points_by_return([60, 30, 10, 0, 0])
        .bounds([-1., -2., -3.], [1., 2., 3.])
        .write_to(dir.path(), "tile.las");

    let single = PointCloudSource::new(vec![Input::from(path.clone())]).unwrap();
    let double = PointCloudSource::new(vec![Input::from(path.clone()), Input::from(path)]).unwrap();
    assert_eq!(single.bounds(), double.bounds());
    assert_eq!(100, single.point_count());
    assert_eq!(200, double.point_count());
    assert_eq!([120, 60, 20, 0, 0], double.point_count_by_return());
    assert_eq!(Some(&200), double.point_formats().get(&0));
}

#[test]
fn merged_statistics() {
    let first = LasBuilder::default()
        .point_format(1)
        .point_count(10)
        .points_by_return([10, 0, 0, 0, 0])
        .bounds([0., 0., 0.], [10., 10., 1.]);
    let second = LasBuilder::default()
        .version(1, 3)
        .point_format(3)
        .point_count(5)
        .points_by_return([3, 2, 0, 0, 0])
        .bounds([-5., 2., -1.], [4., 20., 0.5]);
    let source = PointCloudSource::new(vec![input(first), input(second)]).unwrap();
    assert_eq!(
        [-5., 10., 0., 20., -1., 1.],
        source.bounds().to_array()
    );
    assert_eq!(15, source.point_count());
    assert_eq!([13, 2, 0, 0, 0], source.point_count_by_return());
    assert_eq!(2, source.point_formats().len());
    assert_eq!(Some(&10), source.point_formats().get(&1));
    assert_eq!(Some(&5), source.point_formats().get(&3));
    assert_eq!(1, u8::from(source.point_format()));
    assert_eq!(
        Some("GPS Time"),
        source.point_attributes().unwrap().last().copied()
    );
}

#[test]
fn matching_projections() {
    let wkt = "GEOGCS[\"WGS 84\"]";
    let first = LasBuilder::default().wkt(wkt);
    let second = LasBuilder::default().vlr("binary", 1, &[0xff]).wkt(wkt);
    let source = PointCloudSource::new(vec![input(first), input(second)]).unwrap();
    assert_eq!(Some(wkt), source.projection_wkt());
}

#[test]
fn mismatched_projections() {
    let dir = tempfile::tempdir().unwrap();
    let first = LasBuilder::default()
        .wkt("GEOGCS[\"WGS 84\"]")
        .write_to(dir.path(), "wgs84.las");
    let second = LasBuilder::default()
        .wkt("PROJCS[\"NAD83 / UTM zone 10N\"]")
        .write_to(dir.path(), "utm.las");
    let err = PointCloudSource::new(vec![Input::from(first), Input::from(second)]).unwrap_err();
    assert!(matches!(err, Error::ProjectionMismatch { .. }));
    let message = err.to_string();
    assert!(message.contains("wgs84.las"));
    assert!(message.contains("utm.las"));
    assert!(message.contains("WGS 84"));
    assert!(message.contains("NAD83"));
}

#[test]
fn missing_projection_is_a_mismatch() {
    let first = Input::buffer("a.las", LasBuilder::default().wkt("GEOGCS[]").build());
    let second = Input::buffer("b.las", LasBuilder::default().build());
    let err = PointCloudSource::new(vec![first, second]).unwrap_err();
    assert!(err.to_string().contains("none"));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PointCloudSource::new(vec![Input::from(dir.path().join("nope.las"))]).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn inline_descriptor() {
    let bytes = LasBuilder::default()
        .point_count(4)
        .bounds([0., 1., 2.], [3., 4., 5.])
        .wkt("GEOGCS[]")
        .build();
    let source = PointCloudSource::new(vec![Input::buffer("inline.las", bytes.clone())]).unwrap();
    let descriptor = source.descriptor().unwrap();
    let data = descriptor.data.clone().unwrap();
    assert_eq!(1, data.len());
    assert_eq!(bytes, STANDARD.decode(&data[0]).unwrap());

    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!("pointcloud", json["featureType"]);
    assert_eq!(serde_json::json!([0., 3., 1., 4., 2., 5.]), json["bounds"]);
    assert_eq!(serde_json::json!(4), json["pointCount"]);
    assert_eq!(serde_json::json!(0), json["pointDataRecordFormat"]);
    assert_eq!(serde_json::json!(4), json["pointDataRecordFormats"]["0"]);
    assert_eq!("GEOGCS[]", json["projectionWkt"]);
    assert!(json.get("url").is_none());
}

#[test]
fn url_descriptor() {
    let options = SourceOptions::default().with_download_url("https://example.com/tile.las");
    let source =
        PointCloudSource::with_options(vec![input(LasBuilder::default())], options).unwrap();
    let json = serde_json::to_value(source.descriptor().unwrap()).unwrap();
    assert_eq!("https://example.com/tile.las", json["url"]);
    assert!(json.get("data").is_none());
    assert!(json["projectionWkt"].is_null());
}

#[test]
fn encode_rereads_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = LasBuilder::default()
        .point_count(2)
        .write_to(dir.path(), "reread.las");
    let source = PointCloudSource::new(vec![Input::from(path.clone())]).unwrap();
    let appended = {
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.extend([1, 2, 3]);
        std::fs::write(&path, &bytes).unwrap();
        bytes
    };
    let encoded = source.encode().unwrap();
    assert_eq!(appended, STANDARD.decode(&encoded[0]).unwrap());
}
