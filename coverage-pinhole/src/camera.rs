use crate::{BrownRadial, CalibrationRecord, CameraError, NormalizedPixel};
use nalgebra::{Point2, Vector2, Vector3};

/// Camera with the simplified Brown distortion used by OpenSfM's `perspective`
/// and `brown` projections.
///
/// Given a point $(x, y, z)$ in camera coordinates, the normalized image
/// coordinates are
///
/// $$
/// x_n = x / z, \quad y_n = y / z, \quad r^2 = x_n^2 + y_n^2
/// $$
///
/// $$
/// \begin{bmatrix} u \\\\ v \end{bmatrix} = f ⋅ \p{1 + k_1 ⋅ r^2 + k_2 ⋅ r^4} ⋅
/// \begin{bmatrix} x_n \\\\ y_n \end{bmatrix}
/// $$
///
/// Only `k1` and `k2` take part in the projection. The tangential
/// coefficients, `k3` and the principal point are read but never applied.
///
/// The image rectangle is normalized so that its longer side spans
/// `[-0.5, 0.5]`, see [`Camera::width_rel_max`].
#[derive(Clone, PartialEq, Debug)]
pub struct Camera {
    name: String,
    projection_type: Option<String>,
    width: u32,
    height: u32,
    focal: f64,
    principal_point: Point2<f64>,
    radial_distortion: BrownRadial,
    k3: f64,
    tangential: [f64; 2],
    width_rel_max: f64,
    height_rel_max: f64,
}

impl Camera {
    /// Creates a distortion-free camera.
    pub fn new(name: impl Into<String>, width: u32, height: u32, focal: f64) -> Self {
        let mut camera = Self {
            name: name.into(),
            projection_type: None,
            width: 0,
            height: 0,
            focal,
            principal_point: Point2::origin(),
            radial_distortion: BrownRadial::brown(0.0, 0.0),
            k3: 0.0,
            tangential: [0.0, 0.0],
            width_rel_max: 0.0,
            height_rel_max: 0.0,
        };
        camera.set_dimensions(width, height);
        camera
    }

    /// Builds a camera from a named entry of a `cameras.json` file.
    ///
    /// A combined `focal` wins. Otherwise `focal_x` and `focal_y` must both be
    /// present and equal, as the model has a single focal length.
    pub fn from_record(name: &str, record: &CalibrationRecord) -> Result<Self, CameraError> {
        let focal = match (record.focal, record.focal_x, record.focal_y) {
            (Some(focal), _, _) => focal,
            (None, Some(focal_x), Some(focal_y)) => {
                if focal_x != focal_y {
                    return Err(CameraError::InconsistentFocal {
                        name: name.to_owned(),
                        focal_x,
                        focal_y,
                    });
                }
                focal_x
            }
            (None, _, _) => {
                return Err(CameraError::MissingFocal {
                    name: name.to_owned(),
                })
            }
        };

        let mut camera = Self::new(name, record.width, record.height, focal)
            .radial(record.k1, record.k2)
            .k3(record.k3)
            .tangential(record.p1, record.p2)
            .principal_point(Point2::new(record.c_x, record.c_y));
        camera.projection_type = record.projection_type.clone();
        Ok(camera)
    }

    pub fn radial(self, k1: f64, k2: f64) -> Self {
        Self {
            radial_distortion: BrownRadial::brown(k1, k2),
            ..self
        }
    }

    pub fn k3(self, k3: f64) -> Self {
        Self { k3, ..self }
    }

    pub fn tangential(self, p1: f64, p2: f64) -> Self {
        Self {
            tangential: [p1, p2],
            ..self
        }
    }

    pub fn principal_point(self, principal_point: Point2<f64>) -> Self {
        Self {
            principal_point,
            ..self
        }
    }

    pub fn projection_type(self, projection_type: impl Into<String>) -> Self {
        Self {
            projection_type: Some(projection_type.into()),
            ..self
        }
    }

    /// Changes the sensor size and recomputes the frame half-extents with it.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let (width, height) = (f64::from(width), f64::from(height));
        if width >= height {
            self.width_rel_max = 0.5;
            self.height_rel_max = 0.5 * height / width;
        } else {
            self.height_rel_max = 0.5;
            self.width_rel_max = 0.5 / height * width;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn projection(&self) -> Option<&str> {
        self.projection_type.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn focal(&self) -> f64 {
        self.focal
    }

    pub fn k1(&self) -> f64 {
        self.radial_distortion.coefficient(1)
    }

    pub fn k2(&self) -> f64 {
        self.radial_distortion.coefficient(2)
    }

    pub fn k3_coefficient(&self) -> f64 {
        self.k3
    }

    pub fn p1(&self) -> f64 {
        self.tangential[0]
    }

    pub fn p2(&self) -> f64 {
        self.tangential[1]
    }

    pub fn c_x(&self) -> f64 {
        self.principal_point.x
    }

    pub fn c_y(&self) -> f64 {
        self.principal_point.y
    }

    /// Half-extent of the frame along the image x axis.
    pub fn width_rel_max(&self) -> f64 {
        self.width_rel_max
    }

    /// Half-extent of the frame along the image y axis.
    pub fn height_rel_max(&self) -> f64 {
        self.height_rel_max
    }

    /// Projects a point expressed in camera coordinates.
    ///
    /// `relative.z` must be strictly positive, otherwise the result is
    /// meaningless (mirrored or non-finite).
    pub fn project(&self, relative: Vector3<f64>) -> NormalizedPixel {
        let x_n = relative.x / relative.z;
        let y_n = relative.y / relative.z;
        let r2 = x_n * x_n + y_n * y_n;
        let d = self.radial_distortion.evaluate(r2);
        NormalizedPixel(Point2::from(Vector2::new(
            self.focal * d * x_n,
            self.focal * d * y_n,
        )))
    }

    /// Whether the pixel falls inside the frame, borders included.
    pub fn in_frame(&self, pixel: NormalizedPixel) -> bool {
        pixel.x.abs() <= self.width_rel_max && pixel.y.abs() <= self.height_rel_max
    }
}
