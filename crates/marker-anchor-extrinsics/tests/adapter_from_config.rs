use marker_anchor_extrinsics::{
    marker_object_corners, AdapterConfig, AdapterInitError, BoardConfig, BoardMarker,
    CameraIntrinsics, MarkerExtrinsicsAdapter, MarkerSizeTable, RawMarker, RecordedDetector,
};
use nalgebra::{Point2, Rotation3, Vector3};

fn calibration_640() -> CameraIntrinsics {
    CameraIntrinsics {
        width: 640,
        height: 480,
        fx: 455.0,
        fy: 452.0,
        cx: 320.5,
        cy: 239.0,
        distortion: [0.04, -0.09, 0.0, 0.0, 0.01],
    }
}

fn project_marker(
    k: &CameraIntrinsics,
    size: f32,
    rvec: Vector3<f64>,
    t: Vector3<f64>,
) -> [Point2<f32>; 4] {
    let r = Rotation3::new(rvec);
    marker_object_corners(size).map(|p| {
        k.project(&(r * Vector3::new(p.x, p.y, 0.0) + t))
            .expect("in front of camera")
    })
}

#[test]
fn loads_resizes_and_solves_recorded_frames() {
    let dir = tempfile::tempdir().expect("tempdir");
    let intrinsics_path = dir.path().join("camera.json");
    calibration_640().write_json(&intrinsics_path).expect("write intrinsics");

    let config_path = dir.path().join("adapter.json");
    AdapterConfig::new(&intrinsics_path)
        .write_json(&config_path)
        .expect("write config");
    let config = AdapterConfig::load_json(&config_path).expect("load config");

    // frames are rendered with the intrinsics the adapter will use
    let k = calibration_640().resized(1280, 720).expect("resize");
    let t_small = Vector3::new(0.03, 0.01, 0.45);
    let t_large = Vector3::new(-0.12, 0.02, 1.3);
    let rvec = Vector3::new(0.1, 0.3, -0.05);
    let frames = vec![
        vec![
            RawMarker::new(666, project_marker(&k, 0.034, rvec, t_small)),
            RawMarker::new(819, project_marker(&k, 0.1056, rvec, t_large)),
        ],
        vec![],
    ];

    let mut adapter =
        MarkerExtrinsicsAdapter::from_config(RecordedDetector::new(frames), &config).expect("adapter");
    assert_eq!(adapter.intrinsics().width, 1280);
    assert!((adapter.intrinsics().fy - 452.0 * 1.5).abs() < 1e-9);

    let first = adapter.detect(&());
    assert_eq!(first.markers.len(), 2);
    let small = first.marker(666).expect("666");
    let large = first.marker(819).expect("819");
    assert!((small.translation - t_small.cast::<f32>()).norm() < 2e-3);
    assert!((large.translation - t_large.cast::<f32>()).norm() < 5e-3);
    assert!((small.rotation_vector - rvec.cast::<f32>()).norm() < 1e-2);

    assert!(adapter.detect(&()).is_empty());
    assert_eq!(adapter.detector_mut().remaining(), 0);
}

#[test]
fn board_file_is_loaded_with_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let intrinsics_path = dir.path().join("camera.json");
    CameraIntrinsics::pinhole(1280, 720, 900.0, 900.0, 640.0, 360.0)
        .write_json(&intrinsics_path)
        .expect("write intrinsics");

    let board_path = dir.path().join("board.json");
    BoardConfig::new(vec![BoardMarker {
        id: 42,
        corners: [[0.0, 0.05, 0.0], [0.05, 0.05, 0.0], [0.05, 0.0, 0.0], [0.0, 0.0, 0.0]],
    }])
    .expect("board")
    .write_json(&board_path)
    .expect("write board");

    let mut config = AdapterConfig::new(&intrinsics_path);
    config.board_path = Some(board_path);
    config.marker_sizes = MarkerSizeTable::uniform(0.05);

    let adapter = MarkerExtrinsicsAdapter::from_config(RecordedDetector::default(), &config)
        .expect("adapter");
    assert_eq!(adapter.board().map(|b| b.len()), Some(1));
    assert_eq!(adapter.marker_sizes().size_for(819), 0.05);
}

#[test]
fn missing_intrinsics_is_an_init_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AdapterConfig::new(dir.path().join("nope.json"));
    let err = MarkerExtrinsicsAdapter::from_config(RecordedDetector::default(), &config)
        .expect_err("missing file");
    assert!(matches!(err, AdapterInitError::Intrinsics(_)));
}

#[test]
fn invalid_board_is_an_init_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let intrinsics_path = dir.path().join("camera.json");
    calibration_640().write_json(&intrinsics_path).expect("write");
    let board_path = dir.path().join("board.json");
    std::fs::write(&board_path, r#"{ "markers": [] }"#).expect("write board");

    let mut config = AdapterConfig::new(&intrinsics_path);
    config.board_path = Some(board_path);
    let err = MarkerExtrinsicsAdapter::from_config(RecordedDetector::default(), &config)
        .expect_err("empty board");
    assert!(matches!(err, AdapterInitError::Board(_)));
}
