use serde::{Deserialize, Serialize};

/// One entry of an OpenSfM `cameras.json` file, keyed by camera name in the file.
///
/// Every field but the focal length defaults to zero when absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    #[serde(default)]
    pub projection_type: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_y: Option<f64>,
    #[serde(default)]
    pub c_x: f64,
    #[serde(default)]
    pub c_y: f64,
    #[serde(default)]
    pub k1: f64,
    #[serde(default)]
    pub k2: f64,
    #[serde(default)]
    pub k3: f64,
    #[serde(default)]
    pub p1: f64,
    #[serde(default)]
    pub p2: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, CameraError};

    const GOPRO8: &str = r#"{
        "projection_type": "brown",
        "width": 3000,
        "height": 4000,
        "focal_x": 0.5207834102328533,
        "focal_y": 0.5207834102328533,
        "c_x": -0.010331518981731644,
        "c_y": -0.0036169971231284,
        "k1": -0.10638507280457302,
        "k2": 0.06769290794144624,
        "p1": -0.0009394968204580917,
        "p2": -0.0007005575451251272,
        "k3": -0.005369531191619131
    }"#;

    #[test]
    fn parse_brown_camera() {
        let record: CalibrationRecord = serde_json::from_str(GOPRO8).unwrap();
        let camera = Camera::from_record("gopro8", &record).unwrap();

        assert_eq!(camera.name(), "gopro8");
        assert_eq!(camera.projection(), Some("brown"));
        assert_eq!(camera.width(), 3000);
        assert_eq!(camera.height(), 4000);
        assert_eq!(camera.focal(), 0.5207834102328533);
        assert_eq!(camera.k1(), -0.10638507280457302);
        assert_eq!(camera.k2(), 0.06769290794144624);
        assert_eq!(camera.k3_coefficient(), -0.005369531191619131);
        assert_eq!(camera.p1(), -0.0009394968204580917);
        assert_eq!(camera.p2(), -0.0007005575451251272);
        assert_eq!(camera.c_x(), -0.010331518981731644);
        assert_eq!(camera.c_y(), -0.0036169971231284);
    }

    #[test]
    fn combined_focal_wins() {
        let record: CalibrationRecord =
            serde_json::from_str(r#"{"width": 10, "height": 5, "focal": 0.8, "focal_x": 1.0, "focal_y": 2.0}"#)
                .unwrap();
        let camera = Camera::from_record("combined", &record).unwrap();
        assert_eq!(camera.focal(), 0.8);
    }

    #[test]
    fn absent_coefficients_default_to_zero() {
        let record: CalibrationRecord =
            serde_json::from_str(r#"{"width": 10, "height": 5, "focal": 0.8}"#).unwrap();
        let camera = Camera::from_record("bare", &record).unwrap();
        assert_eq!(camera.projection(), None);
        assert_eq!(camera.k1(), 0.0);
        assert_eq!(camera.k2(), 0.0);
        assert_eq!(camera.k3_coefficient(), 0.0);
        assert_eq!(camera.p1(), 0.0);
        assert_eq!(camera.c_x(), 0.0);
    }

    #[test]
    fn unequal_focals_are_rejected() {
        let record: CalibrationRecord = serde_json::from_str(
            r#"{"width": 10, "height": 5, "focal_x": 0.52, "focal_y": 0.53}"#,
        )
        .unwrap();
        match Camera::from_record("skewed", &record) {
            Err(CameraError::InconsistentFocal {
                name,
                focal_x,
                focal_y,
            }) => {
                assert_eq!(name, "skewed");
                assert_eq!(focal_x, 0.52);
                assert_eq!(focal_y, 0.53);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_focal_is_rejected() {
        let record: CalibrationRecord =
            serde_json::from_str(r#"{"width": 10, "height": 5, "focal_x": 0.52}"#).unwrap();
        assert!(matches!(
            Camera::from_record("half", &record),
            Err(CameraError::MissingFocal { .. })
        ));
    }
}
