use nalgebra::{Matrix3, Point3, Rotation3, Unit, Vector3};

const MIN_SUPERPOSITION_POINTS: usize = 3;

/// Rigid-body transform mapping one point set onto another in the least-squares sense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Superposition {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
    /// Root-mean-square deviation of the transformed `from` points from `to`.
    pub rmsd: f64,
}

impl Superposition {
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * point.coords + self.translation)
    }
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Some(Point3::from(sum / points.len() as f64))
}

/// Kabsch superposition of `from_points` onto `to_points` (paired by position).
///
/// Both sets are centred on their centroids, the rotation comes from the SVD of the
/// cross-covariance matrix with a reflection correction, and the translation carries
/// the rotated `from` centroid onto the `to` centroid. Returns `None` for mismatched
/// or too-small inputs.
pub fn superpose(from_points: &[Point3<f64>], to_points: &[Point3<f64>]) -> Option<Superposition> {
    if from_points.len() != to_points.len() || from_points.len() < MIN_SUPERPOSITION_POINTS {
        return None;
    }
    let from_centroid = centroid(from_points)?;
    let to_centroid = centroid(to_points)?;

    let h = from_points
        .iter()
        .zip(to_points.iter())
        .fold(Matrix3::zeros(), |acc, (f, t)| {
            acc + (t - to_centroid) * (f - from_centroid).transpose()
        });

    let svd = h.svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return None;
    };

    let mut correction = Matrix3::identity();
    if (u * v_t).determinant() < 0.0 {
        correction[(2, 2)] = -1.0;
    }

    let rotation = u * correction * v_t;
    let translation = to_centroid.coords - rotation * from_centroid.coords;

    let fitted: Vec<_> = from_points
        .iter()
        .map(|p| Point3::from(rotation * p.coords + translation))
        .collect();
    let rmsd = calculate_rmsd(&fitted, to_points)?;

    Some(Superposition {
        rotation,
        translation,
        rmsd,
    })
}

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

/// Rotation about `axis` by `angle_degrees`; `None` for a zero-length axis.
pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_degrees: f64) -> Option<Rotation3<f64>> {
    let axis = Unit::try_new(*axis, f64::EPSILON)?;
    Some(Rotation3::from_axis_angle(&axis, angle_degrees.to_radians()))
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
pub fn angle_between_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle in degrees from `a` to `b` after projecting both onto the plane normal to
/// `reference`, signed positive when `a × b` points along `reference`.
pub fn signed_angle_deg(a: &Vector3<f64>, b: &Vector3<f64>, reference: &Vector3<f64>) -> f64 {
    let r = match reference.try_normalize(f64::EPSILON) {
        Some(r) => r,
        None => return angle_between_deg(a, b),
    };
    let a_perp = a - r * a.dot(&r);
    let b_perp = b - r * b.dot(&r);
    let angle = angle_between_deg(&a_perp, &b_perp);
    if a_perp.cross(&b_perp).dot(&r) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Two unit vectors spanning the plane normal to `normal`.
pub fn plane_basis(normal: &Vector3<f64>) -> Option<(Vector3<f64>, Vector3<f64>)> {
    let n = normal.try_normalize(f64::EPSILON)?;
    let helper = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = n.cross(&helper).normalize();
    let v = n.cross(&u);
    Some((u, v))
}
