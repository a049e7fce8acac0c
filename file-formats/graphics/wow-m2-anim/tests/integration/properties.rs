//! Property checks for keyframe evaluation, skinning and weight edits

use std::f32::consts::PI;

use glam::{EulerRot, Mat4, Quat, Vec3};
use proptest::prelude::*;
use test_case::test_case;
use wow_m2_anim::animation::{Interpolation, Track, evaluate, nlerp};
use wow_m2_anim::chunks::{BoneWeights, Vertex};
use wow_m2_anim::deform;
use wow_m2_anim::weights::adjust_bone_weight;

fn vec3() -> impl Strategy<Value = Vec3> {
    let axis = -100.0f32..100.0;
    (axis.clone(), axis.clone(), axis).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn rotation() -> impl Strategy<Value = Quat> {
    (-PI..PI, -PI..PI, -PI..PI).prop_map(|(a, b, c)| Quat::from_euler(EulerRot::XYZ, a, b, c))
}

/// Four weights adding up to 255
fn full_weights() -> impl Strategy<Value = [u8; 4]> {
    (0u8..=255, 0u8..=255, 0u8..=255).prop_map(|(a, b, c)| {
        let mut cuts = [a, b, c];
        cuts.sort_unstable();
        [cuts[0], cuts[1] - cuts[0], cuts[2] - cuts[1], 255 - cuts[2]]
    })
}

/// Strictly increasing timestamps starting at zero
fn timestamps(len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..500, len).prop_map(|gaps| {
        let mut time = 0;
        let mut stamps = vec![0];
        for gap in gaps.iter().skip(1) {
            time += gap;
            stamps.push(time);
        }
        stamps
    })
}

proptest! {
    #[test]
    fn single_keyframe_is_constant(value in vec3(), stamp in 0u32..100_000, time in any::<u32>()) {
        let track = Track::single_animation(Interpolation::Linear, vec![stamp], vec![value]);
        prop_assert_eq!(evaluate(&track, 0, time), Some(value));
    }

    #[test]
    fn step_tracks_never_blend(
        (stamps, values) in (2usize..20).prop_flat_map(|len| {
            (timestamps(len), prop::collection::vec(vec3(), len))
        }),
        time in 0u32..12_000,
    ) {
        let track = Track::single_animation(Interpolation::Step, stamps, values.clone());
        let sampled = evaluate(&track, 0, time).unwrap();
        prop_assert!(values.contains(&sampled));
    }

    #[test]
    fn linear_midpoint_is_average(a in vec3(), b in vec3(), half in 1u32..5_000) {
        let track = Track::single_animation(Interpolation::Linear, vec![0, half * 2], vec![a, b]);
        let mid = evaluate(&track, 0, half).unwrap();
        prop_assert!(mid.abs_diff_eq((a + b) / 2.0, 1e-3));
    }

    #[test]
    fn quaternion_midpoint_is_normalized(a in rotation(), b in rotation()) {
        let track = Track::single_animation(Interpolation::Linear, vec![0, 100], vec![a, b]);
        let mid = evaluate(&track, 0, 50).unwrap();
        prop_assert!((mid.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn antipodal_keyframes_blend_alike(a in rotation(), b in rotation(), t in 0.0f32..1.0) {
        let toward_b = nlerp(a, b, t);
        let toward_neg_b = nlerp(a, -b, t);
        prop_assert!(toward_b.dot(toward_neg_b).abs() > 0.9999);
    }

    #[test]
    fn identity_skinning_preserves_rest_pose(
        position in vec3(),
        weights in full_weights(),
        indices in prop::array::uniform4(0u8..4),
    ) {
        let vertices = vec![Vertex::new(position, BoneWeights::new(weights, indices))];
        let deformed = deform(&vertices, &[Mat4::IDENTITY; 4]);
        prop_assert!(deformed[0].abs_diff_eq(position, 1e-3));
    }

    #[test]
    fn weight_edits_keep_vertex_fully_skinned(
        weights in full_weights(),
        indices in prop::array::uniform4(0u8..6),
        bone in 0u8..6,
        increase in any::<bool>(),
        delta in 0u8..=255,
    ) {
        let mut edited = BoneWeights::new(weights, indices);
        let changed = adjust_bone_weight(&mut edited, bone, increase, delta);

        prop_assert_eq!(edited.total(), 255);
        if !changed {
            prop_assert_eq!(edited, BoneWeights::new(weights, indices));
        }
    }
}

#[test_case(Quat::IDENTITY, Quat::from_rotation_z(PI / 2.0) ; "quarter turn")]
#[test_case(Quat::from_rotation_x(0.3), Quat::from_rotation_y(2.5) ; "mixed axes")]
#[test_case(Quat::from_rotation_y(3.13), Quat::from_rotation_y(-3.13) ; "across the seam")]
fn antipodal_track_values_evaluate_alike(a: Quat, b: Quat) {
    let direct = Track::single_animation(Interpolation::Linear, vec![0, 100], vec![a, b]);
    let negated = Track::single_animation(Interpolation::Linear, vec![0, 100], vec![a, -b]);

    for time in [0, 25, 50, 75, 100] {
        let q1 = evaluate(&direct, 0, time).unwrap();
        let q2 = evaluate(&negated, 0, time).unwrap();
        assert!(q1.dot(q2).abs() > 0.9999, "diverged at {time}: {q1} vs {q2}");
    }
}
