use coverage_mesh::Boundaries;
use coverage_reconstruction::{
    CoverageSettings, Reconstruction, ReconstructionError, ReconstructionRecord, Shot,
};
use float_eq::assert_float_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CAMERAS: &str = r#"{
    "v2 gopro hero8 black 4000 3000 perspective 0.5208": {
        "projection_type": "perspective",
        "width": 4000,
        "height": 3000,
        "focal": 0.5,
        "k1": -0.1,
        "k2": 0.05
    },
    "v2 dji fc300s 3000 4000 brown 0.6": {
        "projection_type": "brown",
        "width": 3000,
        "height": 4000,
        "focal_x": 0.6,
        "focal_y": 0.6,
        "c_x": 0.01,
        "p1": 0.001
    }
}"#;

// Native coordinates; the mesh is centered on the origin.
const SHOTS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {
                "filename": "c_far.jpg", "width": 4000, "height": 3000,
                "translation": [1001000.0, 2000000.0, 100.0],
                "rotation": [3.141592653589793, 0.0, 0.0]
            },
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0, 0.0]}
        },
        {
            "type": "Feature",
            "properties": {
                "filename": "b_nadir.jpg", "width": 4000, "height": 3000,
                "translation": [1000000.0, 2000000.0, 100.0],
                "rotation": [3.141592653589793, 0.0, 0.0]
            },
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0, 0.0]}
        },
        {
            "type": "Feature",
            "properties": {
                "filename": "a_sky.jpg", "width": 3000, "height": 4000,
                "translation": [1000000.0, 2000000.0, 100.0],
                "rotation": [0.0, 0.0, 0.0]
            },
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0, 0.0]}
        }
    ]
}"#;

const NATIVE_BOUNDS: &str = r#"{
    "filename": "odm_georeferenced_model.laz",
    "stats": {"bbox": {
        "EPSG:4326": {"bbox": {"minx": 1.0, "maxx": 2.0, "miny": 1.0, "maxy": 2.0}},
        "native": {"bbox": {
            "minx": 999990.0, "maxx": 1000010.0,
            "miny": 1999990.0, "maxy": 2000010.0,
            "minz": 0.0, "maxz": 5.0
        }}
    }}
}"#;

/// A flat 3 x 3 grid of points spanning `[-10, 10]` on both axes.
fn mesh() -> String {
    let mut obj = String::from("mtllib odm_textured_model_geo.mtl\n");
    for y in [-10, 0, 10] {
        for x in [-10, 0, 10] {
            obj.push_str(&format!("v {}.0 {}.0 0.0\n", x, y));
        }
    }
    obj.push_str("vt 0.0 0.0\nvn 0.0 0.0 1.0\nusemtl material0000\n");
    for (a, b, c) in [(1, 2, 5), (1, 5, 4), (5, 6, 9), (5, 9, 8)] {
        obj.push_str(&format!("f {}/1/1 {}/1/1 {}/1/1\n", a, b, c));
    }
    obj
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project(cameras: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let settings = CoverageSettings::default();
    write(&dir.path().join(&settings.cameras_file), cameras);
    write(&dir.path().join(&settings.shots_file), SHOTS);
    write(&dir.path().join(&settings.mesh_file), &mesh());
    write(&dir.path().join(&settings.native_bounds_file), NATIVE_BOUNDS);
    dir
}

#[test]
fn load_project() {
    let dir = project(CAMERAS);
    let reconstruction = Reconstruction::load(dir.path(), &CoverageSettings::default()).unwrap();

    let names: Vec<_> = reconstruction.shots().iter().map(Shot::image_name).collect();
    assert_eq!(names, ["a_sky.jpg", "b_nadir.jpg", "c_far.jpg"]);
    assert_eq!(reconstruction.cameras().count(), 2);
    assert_eq!(reconstruction.mesh().points().len(), 9);
    assert_eq!(reconstruction.mesh().facets().len(), 4);

    let sky = reconstruction.shot("a_sky.jpg").unwrap();
    assert_eq!(sky.camera().name(), "v2 dji fc300s 3000 4000 brown 0.6");
    assert_eq!(sky.translation().x, 0.0);
    assert_eq!(sky.translation().y, 0.0);
    assert_eq!(sky.translation().z, 100.0);

    let far = reconstruction.shot("c_far.jpg").unwrap();
    assert_eq!(far.translation().x, 1000.0);
    assert!(far.boundaries().is_none());
}

#[test]
fn footprints() {
    let dir = project(CAMERAS);
    let mut reconstruction =
        Reconstruction::load(dir.path(), &CoverageSettings::default()).unwrap();
    reconstruction.compute_shot_boundaries(4);

    let nadir = reconstruction.shot("b_nadir.jpg").unwrap();
    let path = &nadir.boundaries().unwrap().path;
    assert_eq!(path.len(), 4);
    for p in path {
        assert_float_eq!(p.x.abs(), 10.0, abs <= 1e-9);
        assert_float_eq!(p.y.abs(), 10.0, abs <= 1e-9);
    }

    assert!(reconstruction.shot("a_sky.jpg").unwrap().boundaries().unwrap().is_empty());
    assert!(reconstruction.shot("c_far.jpg").unwrap().boundaries().unwrap().is_empty());
}

#[test]
fn record_file() {
    let dir = project(CAMERAS);
    let mut reconstruction =
        Reconstruction::load(dir.path(), &CoverageSettings::default()).unwrap();
    reconstruction.compute_shot_boundaries(36);

    let path = dir.path().join("reconstruction_shots.json");
    let record = reconstruction.to_record();
    record.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        json["cameras"]["v2 gopro hero8 black 4000 3000 perspective 0.5208"]["focal"],
        0.5
    );
    assert_eq!(json["shots"][0]["imageName"], "a_sky.jpg");
    assert_eq!(json["shots"][1]["originalDimensions"]["height"], 3000);
    assert_eq!(json["shots"][1]["boundaries"]["path"].as_array().unwrap().len(), 36);
    assert!(json["shots"][1]["rotationEulerXYZ"].is_array());
    assert_eq!(json["boundaries"]["xMin"], -10.0);
    assert_eq!(json["nativeBoundaries"]["yMax"], 2000010.0);
    assert_eq!(json["reconciledBoundaries"]["xMax"], 10.0);

    assert_eq!(
        record.reconciled_boundaries,
        Some(Boundaries::new(-10.0, 10.0, -10.0, 10.0).with_z(0.0, 5.0))
    );
    let parsed = ReconstructionRecord::from_reader(fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn ambiguous_camera() {
    let dir = project(
        r#"{
            "first": {"width": 4000, "height": 3000, "focal": 0.5},
            "second": {"width": 4000, "height": 3000, "focal": 0.7},
            "portrait": {"width": 3000, "height": 4000, "focal": 0.7}
        }"#,
    );
    match Reconstruction::load(dir.path(), &CoverageSettings::default()) {
        Err(ReconstructionError::CameraResolution {
            width,
            height,
            matches,
        }) => {
            assert_eq!((width, height, matches), (4000, 3000, 2));
        }
        other => panic!("unexpected {:?}", other.map(|r| r.shots().len())),
    }
}

#[test]
fn missing_camera() {
    let dir = project(r#"{"only": {"width": 4000, "height": 3000, "focal": 0.5}}"#);
    assert!(matches!(
        Reconstruction::load(dir.path(), &CoverageSettings::default()),
        Err(ReconstructionError::CameraResolution { matches: 0, .. })
    ));
}

#[test]
fn custom_locations() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("calibration.json"), CAMERAS);
    write(&dir.path().join("poses.geojson"), SHOTS);
    write(&dir.path().join("surface.obj"), &mesh());
    write(
        &dir.path().join("bounds.json"),
        r#"{"box": {"minx": 999990.0, "maxx": 1000010.0, "miny": 1999990.0, "maxy": 2000010.0}}"#,
    );
    let settings: CoverageSettings = serde_json::from_str(
        r#"{
            "cameras_file": "calibration.json",
            "shots_file": "poses.geojson",
            "mesh_file": "surface.obj",
            "native_bounds_file": "bounds.json",
            "native_bounds_pointer": "/box"
        }"#,
    )
    .unwrap();
    let reconstruction = Reconstruction::load(dir.path(), &settings).unwrap();
    assert_eq!(reconstruction.shots().len(), 3);
    assert_eq!(
        reconstruction.native_boundaries(),
        Some(&Boundaries::new(999_990.0, 1_000_010.0, 1_999_990.0, 2_000_010.0))
    );

    let wrong_pointer = CoverageSettings {
        native_bounds_pointer: "/stats/bbox/native/bbox".into(),
        ..settings
    };
    assert!(matches!(
        Reconstruction::load(dir.path(), &wrong_pointer),
        Err(ReconstructionError::MissingNativeBounds { .. })
    ));
}

#[test]
fn malformed_mesh() {
    let dir = project(CAMERAS);
    let settings = CoverageSettings::default();
    write(
        &dir.path().join(&settings.mesh_file),
        "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n",
    );
    assert!(matches!(
        Reconstruction::load(dir.path(), &settings),
        Err(ReconstructionError::Mesh(_))
    ));
}
