use crate::core::models::frame::ReferenceFrame;
use crate::core::utils::geometry::{angle_between_deg, rotation_from_axis_angle, signed_angle_deg};
use nalgebra::{Matrix3, Point3, Vector3};

const HINGE_EPSILON: f64 = 1e-10;

/// Rigid-body parameters relating two paired bases: three translations (Å) and
/// three rotations (degrees), in the order the step algorithm produces them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairParameters {
    pub shear: f64,
    pub stretch: f64,
    pub stagger: f64,
    pub buckle: f64,
    pub propeller: f64,
    pub opening: f64,
}

/// Middle frame between two base frames, as built by the step algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiddleFrame {
    pub rotation: Matrix3<f64>,
    pub origin: Point3<f64>,
}

/// Computes the six parameters of `second` relative to `first`.
///
/// Both frames are rotated about the hinge `z1 × z2` by half their normal
/// inclination (in opposite directions) so that they become coplanar; the
/// translations are the origin offset expressed in the resulting middle frame.
pub fn compute_pair_parameters(
    first: &ReferenceFrame,
    second: &ReferenceFrame,
) -> (PairParameters, MiddleFrame) {
    let (z1, z2) = (first.z_axis(), second.z_axis());
    let inclination = angle_between_deg(&z1, &z2);

    let mut hinge = z1.cross(&z2);
    if hinge.norm() < HINGE_EPSILON {
        // Parallel normals: any in-plane direction serves as the hinge.
        hinge = first.x_axis() + second.x_axis() + first.y_axis() + second.y_axis();
    }

    let rotate = |frame: &ReferenceFrame, angle: f64| -> Matrix3<f64> {
        match rotation_from_axis_angle(&hinge, angle) {
            Some(rotation) => rotation.matrix() * frame.rotation,
            None => frame.rotation,
        }
    };
    let para_first = rotate(first, 0.5 * inclination);
    let para_second = rotate(second, -0.5 * inclination);

    let column = |m: &Matrix3<f64>, i: usize| -> Vector3<f64> { m.column(i).into_owned() };
    let mid_x = normalized(column(&para_first, 0) + column(&para_second, 0));
    let mid_y = normalized(column(&para_first, 1) + column(&para_second, 1));
    let mid_z = column(&para_second, 2);

    let offset = second.origin - first.origin;
    let phi = signed_angle_deg(&hinge, &mid_y, &mid_z).to_radians();

    let parameters = PairParameters {
        shear: offset.dot(&mid_x),
        stretch: offset.dot(&mid_y),
        stagger: offset.dot(&mid_z),
        buckle: inclination * phi.sin(),
        propeller: inclination * phi.cos(),
        opening: signed_angle_deg(&column(&para_first, 1), &column(&para_second, 1), &mid_z),
    };
    let middle = MiddleFrame {
        rotation: Matrix3::from_columns(&[mid_x, mid_y, mid_z]),
        origin: Point3::from((first.origin.coords + second.origin.coords) / 2.0),
    };
    (parameters, middle)
}

fn normalized(v: Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(HINGE_EPSILON).unwrap_or(v)
}
