//! Property tests for the simulation invariants

use glam::DVec3;
use proptest::prelude::*;

use lane_runner::consts::*;
use lane_runner::sim::{
    Aabb, JumpPhase, Lane, Membership, ObstacleId, ObstacleSpawner, PlayerState, SpawnTuning,
};

#[derive(Debug, Clone)]
enum SpawnerOp {
    Update { dt: f64, score: f64 },
    Spawn(i32),
    Reset,
}

fn spawner_op() -> impl Strategy<Value = SpawnerOp> {
    prop_oneof![
        6 => (0.0..0.5f64, 0.0..500.0f64).prop_map(|(dt, score)| SpawnerOp::Update { dt, score }),
        2 => (-1..=1i32).prop_map(SpawnerOp::Spawn),
        1 => Just(SpawnerOp::Reset),
    ]
}

#[derive(Debug, Clone, Copy)]
enum PlayerOp {
    Jump,
    Left,
    Right,
    Update,
}

fn player_op() -> impl Strategy<Value = PlayerOp> {
    prop_oneof![
        Just(PlayerOp::Jump),
        Just(PlayerOp::Left),
        Just(PlayerOp::Right),
        Just(PlayerOp::Update),
    ]
}

fn arb_box() -> impl Strategy<Value = Aabb> {
    (
        prop::array::uniform3(-10.0..10.0f64),
        prop::array::uniform3(0.1..5.0f64),
    )
        .prop_map(|(center, size)| {
            Aabb::from_center_extents(DVec3::from_array(center), DVec3::from_array(size))
        })
}

proptest! {
    #[test]
    fn pool_conserves_records(seed in any::<u64>(), ops in prop::collection::vec(spawner_op(), 1..300)) {
        let mut spawner = ObstacleSpawner::new(SpawnTuning::default(), seed);
        let mut ever_created = spawner.total_records();
        for op in ops {
            match op {
                SpawnerOp::Update { dt, score } => spawner.update(dt, score).unwrap(),
                SpawnerOp::Spawn(lane) => {
                    spawner.spawn(Lane::from_index(lane).unwrap()).unwrap();
                }
                SpawnerOp::Reset => spawner.reset().unwrap(),
            }
            prop_assert!(spawner.total_records() >= ever_created, "records destroyed");
            ever_created = spawner.total_records();
            prop_assert_eq!(spawner.pooled_len() + spawner.active_len(), ever_created);
            prop_assert!(spawner.active().all(|o| o.is_active()));
        }
    }

    #[test]
    fn player_stays_on_road(ops in prop::collection::vec(player_op(), 1..400)) {
        let mut player = PlayerState::default();
        player.reset();
        for op in ops {
            match op {
                PlayerOp::Jump => player.jump(),
                PlayerOp::Left => { player.move_left(); }
                PlayerOp::Right => { player.move_right(); }
                PlayerOp::Update => player.update(1.0 / 60.0),
            }
            prop_assert!(player.lateral_offset().abs() <= MAX_LATERAL);
            prop_assert!(player.vertical_offset() >= 0.0);
            prop_assert!(player.tilt().abs() <= TILT_LIMIT);
            if player.phase() == JumpPhase::Grounded {
                prop_assert_eq!(player.vertical_offset(), 0.0);
            }
            prop_assert!(player.bounds().is_some());
        }
    }

    #[test]
    fn overlap_matches_per_axis_intervals(a in arb_box(), b in arb_box()) {
        let per_axis = (0..3).all(|axis| {
            a.min[axis] <= b.max[axis] && b.min[axis] <= a.max[axis]
        });
        prop_assert_eq!(a.intersects(&b), per_axis);
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn zero_gap_touches_any_gap_separates(a in arb_box(), axis in 0usize..3, gap in 1e-6..5.0f64) {
        let size = a.size()[axis];

        let mut touching = a;
        touching.min[axis] = a.max[axis];
        touching.max[axis] = a.max[axis] + size;
        prop_assert!(a.intersects(&touching));

        let mut apart = touching;
        apart.min[axis] = a.max[axis] + gap;
        apart.max[axis] = apart.min[axis] + size;
        prop_assert!(!a.intersects(&apart));
    }

    #[test]
    fn speed_non_decreasing_in_score(low in 0.0..1e6f64, delta in 0.0..1e6f64) {
        let tuning = SpawnTuning::default();
        prop_assert!(tuning.speed_for(low + delta) >= tuning.speed_for(low));
        prop_assert_eq!(tuning.speed_for(0.0), BASE_SPEED);
    }

    #[test]
    fn reset_is_idempotent(seed in any::<u64>(), updates in 0usize..2000) {
        let mut spawner = ObstacleSpawner::new(SpawnTuning::default(), seed);
        for _ in 0..updates {
            spawner.update(1.0 / 60.0, 10.0).unwrap();
        }
        spawner.reset().unwrap();
        let once = reset_view(&spawner);
        spawner.reset().unwrap();
        let twice = reset_view(&spawner);
        prop_assert_eq!(once, twice);
        prop_assert_eq!(spawner.time_since_last_spawn(), 0.0);

        // Each reset draws a fresh interval, so only its range is fixed
        let interval = spawner.next_spawn_interval();
        prop_assert!((MIN_SPAWN_INTERVAL..=MAX_SPAWN_INTERVAL).contains(&interval));
    }
}

/// Counts, speed, accumulator, active ids and per-record membership
type ResetView = (usize, usize, usize, f64, f64, Vec<ObstacleId>, Vec<Membership>);

/// Everything reset restores, minus the resampled interval
fn reset_view(spawner: &ObstacleSpawner) -> ResetView {
    let memberships = (0..spawner.total_records() as u32)
        .filter_map(|n| spawner.get(ObstacleId(n)))
        .map(|obstacle| obstacle.membership)
        .collect();
    (
        spawner.active_len(),
        spawner.pooled_len(),
        spawner.total_records(),
        spawner.speed(),
        spawner.time_since_last_spawn(),
        spawner.active_ids().to_vec(),
        memberships,
    )
}

#[test]
fn jump_arc_closed_form() {
    let mut player = PlayerState::default();
    player.reset();
    player.jump();

    let ascent = (JUMP_FORCE / GRAVITY).ceil() as usize;
    for step in 1..=ascent {
        player.update(1.0);
        let expected = if step < ascent { JumpPhase::Ascending } else { JumpPhase::Descending };
        assert_eq!(player.phase(), expected, "step {step}");
    }

    let mut steps = ascent;
    while player.phase() != JumpPhase::Grounded {
        player.update(1.0);
        steps += 1;
        assert!(player.vertical_offset() >= 0.0);
        assert!(steps <= 4 * ascent);
    }
    assert_eq!(player.vertical_offset(), 0.0);
}
