//! Animated deformation of a small character rig

use glam::{Mat4, Quat, Vec3};
use pretty_assertions::assert_eq;
use wow_m2_anim::animation::{
    AnimationCursor, Interpolation, KeyframeRange, PlaybackOptions, Skeleton, TransformCache,
    Track, world_transform,
};
use wow_m2_anim::chunks::{Animation, Bone, BoneWeights, Vertex};
use wow_m2_anim::weights::{WeightEditOptions, edit_selection_weights};
use wow_m2_anim::{AnimError, M2Model, deform, deform_model};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Hip at the origin, an arm bone pivoting at (0, 0, 1) that swings 90
/// degrees around X in "Stand" and stays still in "Walk". Both animations
/// share one keyframe buffer.
fn rig() -> M2Model {
    let hip = Bone::new(None, Vec3::ZERO);

    let mut arm = Bone::new(Some(0), Vec3::new(0.0, 0.0, 1.0));
    arm.rotation = Track {
        interpolation: Interpolation::Linear,
        global_sequence: None,
        ranges: vec![KeyframeRange::new(0, 2), KeyframeRange::new(2, 3)],
        timestamps: vec![0, 1000, 1000],
        values: vec![
            Quat::IDENTITY,
            Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
            Quat::IDENTITY,
        ],
    };

    M2Model {
        name: "Rig".to_string(),
        animations: vec![Animation::new(0, 0, 1000), Animation::new(4, 1000, 1000)],
        bones: vec![hip, arm],
        vertices: vec![
            Vertex::new(Vec3::new(0.0, 0.0, 0.5), BoneWeights::single(0)),
            Vertex::new(Vec3::new(0.0, 0.0, 2.0), BoneWeights::single(1)),
            Vertex::new(
                Vec3::new(0.0, 0.0, 2.0),
                BoneWeights::new([128, 127, 0, 0], [0, 1, 0, 0]),
            ),
        ],
        ..Default::default()
    }
}

fn assert_close(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {expected}, got {actual}"
    );
}

#[test]
fn rest_pose_matches_input() {
    init_logging();
    let model = rig();

    let positions = deform_model(&model, 0, 0).unwrap();
    assert_eq!(positions.len(), model.vertices.len());
    for (position, vertex) in positions.iter().zip(&model.vertices) {
        assert_close(*position, vertex.position);
    }
}

#[test]
fn arm_rotates_about_its_pivot() {
    init_logging();
    let model = rig();

    let positions = deform_model(&model, 0, 1000).unwrap();
    // (0, 0, 2) rotated 90 degrees about X around (0, 0, 1)
    assert_close(positions[1], Vec3::new(0.0, -1.0, 1.0));
    assert_close(positions[0], Vec3::new(0.0, 0.0, 0.5));

    let blended = Vec3::new(0.0, 0.0, 2.0) * (128.0 / 255.0)
        + Vec3::new(0.0, -1.0, 1.0) * (127.0 / 255.0);
    assert_close(positions[2], blended);
}

#[test]
fn second_animation_uses_its_own_range() {
    let model = rig();

    // Walk's only arm keyframe is identity even though it sits at the same
    // global time as Stand's last keyframe
    let positions = deform_model(&model, 1, 500).unwrap();
    assert_close(positions[1], Vec3::new(0.0, 0.0, 2.0));
}

#[test]
fn skeleton_pose_matches_memoized_resolution() {
    let model = rig();
    let skeleton = Skeleton::new(&model.bones).unwrap();

    for time in [0, 250, 500, 999, 1000, 4000] {
        let pose = skeleton.pose(&model.bones, 0, time).unwrap();
        let mut cache = TransformCache::with_capacity(model.bones.len());
        for (index, matrix) in pose.iter().enumerate() {
            let resolved = world_transform(&model.bones, index, 0, time, &mut cache).unwrap();
            assert!(resolved.abs_diff_eq(*matrix, 1e-6));
        }
    }
}

#[test]
fn cursor_drives_playback() {
    let model = rig();
    let skeleton = Skeleton::new(&model.bones).unwrap();
    let mut cursor = AnimationCursor::new(PlaybackOptions { step_ms: 250 });

    let mut heights = Vec::new();
    for _ in 0..4 {
        cursor.step_forward(&model.animations);
        let pose = skeleton
            .pose(&model.bones, cursor.animation_index, cursor.time_ms)
            .unwrap();
        heights.push(deform(&model.vertices, &pose)[1].z);
    }

    // The last step wraps back to the first frame
    assert_eq!(cursor.time_ms, 0);
    assert!(heights[0] < 2.0 && heights[1] < heights[0] && heights[2] < heights[1]);
    assert!((heights[3] - 2.0).abs() < 1e-5);

    cursor.cycle(&model.animations);
    assert_eq!(cursor.current(&model.animations).unwrap().name(), "Walk");
}

#[test]
fn weight_edits_change_deformation() {
    let mut model = rig();
    let before = deform_model(&model, 0, 1000).unwrap();

    let changed = edit_selection_weights(
        &mut model.vertices,
        &[0],
        1,
        true,
        &WeightEditOptions { delta: 255 },
    )
    .unwrap();
    assert_eq!(changed, vec![0]);
    assert_eq!(model.vertices[0].bone_weights.weight_for(1), 255);

    let after = deform_model(&model, 0, 1000).unwrap();
    assert_close(after[0], Vec3::new(0.0, 0.5, 1.0));
    assert_close(after[1], before[1]);
}

#[test]
fn malformed_hierarchy_is_reported() {
    let mut model = rig();
    model.bones[0].parent = Some(1);

    match deform_model(&model, 0, 0) {
        Err(AnimError::ParentCycle { .. }) => {}
        other => panic!("expected a parent cycle, got {other:?}"),
    }

    model.bones[0].parent = Some(9);
    assert!(matches!(
        Skeleton::new(&model.bones),
        Err(AnimError::InvalidParent { bone: 0, parent: 9 })
    ));

    let mut cache = TransformCache::new();
    assert!(matches!(
        world_transform(&model.bones, 5, 0, 0, &mut cache),
        Err(AnimError::BoneIndexOutOfRange { index: 5, count: 2 })
    ));
}

#[test]
fn identity_matrices_leave_mesh_untouched() {
    let model = rig();
    let matrices = vec![Mat4::IDENTITY; model.bones.len()];
    let positions = deform(&model.vertices, &matrices);
    for (position, rest) in positions.iter().zip(model.rest_positions()) {
        assert_close(*position, rest);
    }
}
