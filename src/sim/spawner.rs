//! Pooled obstacle spawner
//!
//! Obstacle records live in an index-stable arena for the whole session.
//! Two index lists partition the arena: the free list (pool) and the active
//! list. Spawning and recycling only move ids between the lists; records are
//! allocated at preload, or on demand when the pool runs dry, and are never
//! destroyed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Lane, Membership, Obstacle, ObstacleId, ObstacleKind};
use crate::consts::*;
use crate::error::{Result, SimError};

/// Tunable spawn and scroll parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Scroll speed at score 0 (units per update)
    pub base_speed: f64,
    /// Added scroll speed per point of score
    pub speed_increase_rate: f64,
    /// Shortest gap between spawns (seconds)
    pub min_interval: f64,
    /// Longest gap between spawns (seconds)
    pub max_interval: f64,
    /// Distance ahead of the player where obstacles appear
    pub spawn_distance: f64,
    /// Depth past which obstacles are recycled
    pub passed_threshold: f64,
    /// Pooled records created up front
    pub preload_count: usize,
    /// Upper bound on records. None means the arena grows on demand.
    pub max_obstacles: Option<usize>,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            speed_increase_rate: SPEED_INCREASE_RATE,
            min_interval: MIN_SPAWN_INTERVAL,
            max_interval: MAX_SPAWN_INTERVAL,
            spawn_distance: SPAWN_DISTANCE,
            passed_threshold: PASSED_THRESHOLD,
            preload_count: PRELOAD_COUNT,
            max_obstacles: None,
        }
    }
}

impl SpawnTuning {
    /// Scroll speed for a score. Grows without bound.
    #[inline]
    pub fn speed_for(&self, score: f64) -> f64 {
        self.base_speed + score * self.speed_increase_rate
    }
}

/// Spawner change reported to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerEvent {
    Spawned(ObstacleId),
    Recycled(ObstacleId),
}

/// Owns every obstacle record and schedules spawns
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    pub tuning: SpawnTuning,
    records: Vec<Obstacle>,
    /// Pooled ids, most recently returned last
    pool: Vec<ObstacleId>,
    /// Active ids in spawn order
    active: Vec<ObstacleId>,
    speed: f64,
    time_since_last_spawn: f64,
    next_spawn_interval: f64,
    rng: Pcg32,
    /// Changes since the last drain
    events: Vec<SpawnerEvent>,
}

impl ObstacleSpawner {
    /// Create a spawner with a preloaded pool
    pub fn new(tuning: SpawnTuning, seed: u64) -> Self {
        let mut spawner = Self {
            tuning,
            records: Vec::with_capacity(tuning.preload_count),
            pool: Vec::with_capacity(tuning.preload_count),
            active: Vec::new(),
            speed: tuning.base_speed,
            time_since_last_spawn: 0.0,
            next_spawn_interval: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };

        for _ in 0..tuning.preload_count {
            let kind = ObstacleKind::random(&mut spawner.rng);
            let id = spawner.allocate(kind);
            spawner.pool.push(id);
        }
        spawner.next_spawn_interval = spawner.sample_interval();

        log::debug!("Obstacle pool preloaded with {} records", spawner.pool.len());
        spawner
    }

    fn sample_interval(&mut self) -> f64 {
        let (min, max) = (self.tuning.min_interval, self.tuning.max_interval);
        if max > min {
            self.rng.random_range(min..=max)
        } else {
            min
        }
    }

    /// Append a pooled record to the arena
    fn allocate(&mut self, kind: ObstacleKind) -> ObstacleId {
        let id = ObstacleId(self.records.len() as u32);
        self.records.push(Obstacle::new(id, kind));
        id
    }

    fn record_mut(&mut self, id: ObstacleId) -> Result<&mut Obstacle> {
        self.records
            .get_mut(id.index())
            .ok_or(SimError::UnknownObstacle(id))
    }

    /// Look up a record by id (pooled or active)
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.records.get(id.index())
    }

    /// Active obstacles in spawn order
    pub fn active(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.active.iter().map(|id| &self.records[id.index()])
    }

    pub fn active_ids(&self) -> &[ObstacleId] {
        &self.active
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn pooled_len(&self) -> usize {
        self.pool.len()
    }

    /// Every record ever created this session
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn time_since_last_spawn(&self) -> f64 {
        self.time_since_last_spawn
    }

    pub fn next_spawn_interval(&self) -> f64 {
        self.next_spawn_interval
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SpawnerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one frame: schedule spawns, scroll, recycle passed obstacles
    pub fn update(&mut self, dt: f64, score: f64) -> Result<()> {
        self.speed = self.tuning.speed_for(score);

        self.time_since_last_spawn += dt;
        if self.time_since_last_spawn >= self.next_spawn_interval {
            self.spawn_random()?;
            self.next_spawn_interval = self.sample_interval();
            self.time_since_last_spawn = 0.0;
        }

        let mut passed = Vec::new();
        for &id in &self.active {
            let obstacle = &mut self.records[id.index()];
            obstacle.advance(self.speed);
            if obstacle.position_z > self.tuning.passed_threshold {
                passed.push(id);
            }
        }
        for id in passed {
            self.release(id)?;
            self.events.push(SpawnerEvent::Recycled(id));
        }

        debug_assert_eq!(
            self.pool.len() + self.active.len(),
            self.records.len(),
            "obstacle records leaked or duplicated"
        );
        Ok(())
    }

    /// Spawn in a random lane. Returns None when capped.
    fn spawn_random(&mut self) -> Result<Option<ObstacleId>> {
        let lane = Lane::random(&mut self.rng);
        self.spawn(lane)
    }

    /// Place an obstacle at the spawn distance in `lane`.
    ///
    /// A pooled record is reused when available and keeps its kind. A new
    /// record gets a random kind. The pool is untouched on error. Returns None when the pool is empty and the
    /// arena is at `max_obstacles`.
    pub fn spawn(&mut self, lane: Lane) -> Result<Option<ObstacleId>> {
        let id = match self.pool.last().copied() {
            Some(id) => {
                if self.record_mut(id)?.membership == Membership::Active {
                    return Err(SimError::AlreadyActive(id));
                }
                self.pool.pop();
                id
            }
            None => {
                if let Some(cap) = self.tuning.max_obstacles {
                    if self.records.len() >= cap {
                        log::warn!("Obstacle cap {} reached, skipping spawn", cap);
                        return Ok(None);
                    }
                }
                let kind = ObstacleKind::random(&mut self.rng);
                let id = self.allocate(kind);
                log::debug!("Pool empty, allocated obstacle {}", id);
                id
            }
        };

        let spawn_distance = self.tuning.spawn_distance;
        let obstacle = self.record_mut(id)?;
        obstacle.membership = Membership::Active;
        obstacle.lane = lane;
        obstacle.position_z = -spawn_distance;
        obstacle.refresh_bounds();
        let kind = obstacle.kind;

        self.active.push(id);
        self.events.push(SpawnerEvent::Spawned(id));
        log::debug!("Spawned {} {} in lane {}", kind.as_str(), id, lane.index());
        Ok(Some(id))
    }

    /// Move an active obstacle to another lane
    pub fn relocate(&mut self, id: ObstacleId, lane: Lane) -> Result<()> {
        let obstacle = self.record_mut(id)?;
        if obstacle.membership != Membership::Active {
            return Err(SimError::AlreadyPooled(id));
        }
        obstacle.lane = lane;
        obstacle.refresh_bounds();
        Ok(())
    }

    /// Return an active obstacle to the pool. Nothing changes on error.
    pub fn release(&mut self, id: ObstacleId) -> Result<()> {
        if self.record_mut(id)?.membership == Membership::Pooled {
            return Err(SimError::AlreadyPooled(id));
        }
        let slot = self
            .active
            .iter()
            .position(|&a| a == id)
            .ok_or(SimError::UnknownObstacle(id))?;

        self.record_mut(id)?.membership = Membership::Pooled;
        self.active.remove(slot);
        self.pool.push(id);
        Ok(())
    }

    /// Recycle everything and restart the schedule
    pub fn reset(&mut self) -> Result<()> {
        while let Some(&id) = self.active.last() {
            self.release(id)?;
        }
        self.speed = self.tuning.base_speed;
        self.time_since_last_spawn = 0.0;
        self.next_spawn_interval = self.sample_interval();
        self.events.clear();
        Ok(())
    }
}
