//! Property-based tests using proptest.
//!
//! These tests check algebraic invariants of vectors, matrices, and rotations.

use panda_math::{EulerAngles, Matrix, Quaternion, Vec2, Vec3, Vector};
use proptest::prelude::*;

fn vec3_strategy() -> impl Strategy<Value = Vec3> {
    (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn vec2_strategy() -> impl Strategy<Value = Vec2> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Vec2::new(x, y))
}

// Diagonally dominant matrices are always invertible and well conditioned.
fn invertible_strategy(n: usize) -> impl Strategy<Value = Matrix> {
    proptest::collection::vec(-1.0f64..1.0, n * n).prop_map(move |data| {
        let mut m = Matrix::new(n, n, data).expect("Test data should be valid");
        for i in 0..n {
            m[(i, i)] += n as f64 + 1.0;
        }
        m
    })
}

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    proptest::collection::vec(-10.0f64..10.0, rows * cols)
        .prop_map(move |data| Matrix::new(rows, cols, data).expect("Test data should be valid"))
}

fn euler_strategy() -> impl Strategy<Value = EulerAngles> {
    (-3.0f64..3.0, -1.5f64..1.5, -3.0f64..3.0)
        .prop_map(|(roll, pitch, yaw)| EulerAngles::new(roll, pitch, yaw))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn normalized_vectors_have_unit_length(v in vec3_strategy()) {
        prop_assume!(v.length() > 1e-6);
        let n = v.normalize().unwrap();
        prop_assert!((n.length() - 1.0).abs() < 1e-12);
        prop_assert!(n.is_normalized());
    }

    #[test]
    fn cross_product_is_orthogonal(a in vec3_strategy(), b in vec3_strategy()) {
        let c = a.cross(b);
        let tolerance = 1e-9 * (1.0 + a.length() * b.length()).powi(2);
        prop_assert!(c.dot(a).abs() < tolerance);
        prop_assert!(c.dot(b).abs() < tolerance);
    }

    #[test]
    fn dot_is_commutative(a in vec2_strategy(), b in vec2_strategy()) {
        prop_assert_eq!(a.dot(b), b.dot(a));
    }

    #[test]
    fn triangle_inequality(a in vec3_strategy(), b in vec3_strategy()) {
        prop_assert!((a + b).length() <= a.length() + b.length() + 1e-9);
    }

    #[test]
    fn transpose_is_an_involution(m in matrix_strategy(3, 5)) {
        prop_assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn inverse_times_matrix_is_identity(m in invertible_strategy(4)) {
        let inverse = m.inverse().unwrap();
        prop_assert!(m.try_mul(&inverse).unwrap().approx_eq(&Matrix::identity(4), 1e-9));
    }

    #[test]
    fn determinant_is_multiplicative(a in invertible_strategy(3), b in invertible_strategy(3)) {
        let product = a.try_mul(&b).unwrap().determinant().unwrap();
        let expected = a.determinant().unwrap() * b.determinant().unwrap();
        prop_assert!((product - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }

    #[test]
    fn solve_satisfies_system(m in invertible_strategy(4), b in proptest::collection::vec(-10.0f64..10.0, 4)) {
        let x = m.solve(&b).unwrap();
        let back = m.mul_vector(&x).unwrap();
        for (lhs, rhs) in back.iter().zip(&b) {
            prop_assert!((lhs - rhs).abs() < 1e-9);
        }
    }

    #[test]
    fn quaternion_rotation_preserves_length(angles in euler_strategy(), v in vec3_strategy()) {
        let q = Quaternion::from_euler(angles);
        prop_assert!(q.is_normalized());
        let rotated = q.rotate(v);
        prop_assert!((rotated.length() - v.length()).abs() < 1e-9 * (1.0 + v.length()));
    }

    #[test]
    fn quaternion_matches_its_matrix(angles in euler_strategy(), v in vec3_strategy()) {
        let q = Quaternion::from_euler(angles);
        let r = q.to_matrix3().mul_vector(&v.to_array()).unwrap();
        prop_assert!(q.rotate(v).approx_eq(Vec3::new(r[0], r[1], r[2]), 1e-9));
    }

    #[test]
    fn euler_angles_round_trip(angles in euler_strategy()) {
        let q = Quaternion::from_euler(angles);
        let back = Quaternion::from_euler(q.to_euler());
        prop_assert!(q.approx_eq(back, 1e-9));
    }

    #[test]
    fn matrix_to_quaternion_round_trip(angles in euler_strategy()) {
        let q = Quaternion::from_euler(angles);
        let recovered = Quaternion::from_rotation_matrix(&q.to_matrix3()).unwrap();
        prop_assert!(q.approx_eq(recovered, 1e-9));
    }

    #[test]
    fn slerp_stays_normalized(a in euler_strategy(), b in euler_strategy(), t in 0.0f64..1.0) {
        let qa = Quaternion::from_euler(a);
        let qb = Quaternion::from_euler(b);
        prop_assert!(qa.slerp(qb, t).is_normalized());
    }
}
