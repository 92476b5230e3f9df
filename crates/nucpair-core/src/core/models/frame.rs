use nalgebra::{Matrix3, Point3, Vector3};

const ORTHONORMAL_TOLERANCE: f64 = 1e-6;

/// A right-handed base reference frame.
///
/// The columns of `rotation` are the x, y and z axes expressed in structure
/// coordinates; `origin` is the frame origin. Frames are produced by fitting a
/// standard base template onto experimental coordinates, so a point `p` given in
/// template coordinates lands at `rotation * p + origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    pub rotation: Matrix3<f64>,
    pub origin: Point3<f64>,
}

impl ReferenceFrame {
    pub fn new(rotation: Matrix3<f64>, origin: Point3<f64>) -> Self {
        Self { rotation, origin }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Point3::origin())
    }

    pub fn x_axis(&self) -> Vector3<f64> {
        self.rotation.column(0).into_owned()
    }

    pub fn y_axis(&self) -> Vector3<f64> {
        self.rotation.column(1).into_owned()
    }

    pub fn z_axis(&self) -> Vector3<f64> {
        self.rotation.column(2).into_owned()
    }

    /// Maps a point given in template (frame-local) coordinates into structure coordinates.
    pub fn to_global(&self, local: &Point3<f64>) -> Point3<f64> {
        self.origin + self.rotation * local.coords
    }

    /// Frame rotated 180° about its own x axis (y and z negated), used to bring the
    /// second base of an anti-parallel pair into the orientation of the first.
    pub fn flipped(&self) -> Self {
        let mut rotation = self.rotation;
        rotation.set_column(1, &(-self.y_axis()));
        rotation.set_column(2, &(-self.z_axis()));
        Self::new(rotation, self.origin)
    }

    /// Averaged origin and unit normal of two base frames. Normals pointing to
    /// opposite sides are combined as `z_other - z_self`.
    pub fn mean_plane(&self, other: &ReferenceFrame) -> (Point3<f64>, Vector3<f64>) {
        let origin = Point3::from((self.origin.coords + other.origin.coords) / 2.0);
        let (z1, z2) = (self.z_axis(), other.z_axis());
        let combined = if z1.dot(&z2) > 0.0 { z1 + z2 } else { z2 - z1 };
        (origin, combined.try_normalize(f64::EPSILON).unwrap_or(z1))
    }

    pub fn is_orthonormal(&self) -> bool {
        let gram = self.rotation.transpose() * self.rotation;
        (gram - Matrix3::identity()).abs().max() < ORTHONORMAL_TOLERANCE
            && (self.rotation.determinant() - 1.0).abs() < ORTHONORMAL_TOLERANCE
    }
}
