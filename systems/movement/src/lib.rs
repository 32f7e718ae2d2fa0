#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that steers the player toward a target.
//!
//! The system never touches the world directly. Collision is delegated to a
//! resolver closure and obstacle hits are reported as
//! [`Command::DestroyObstacle`] values for the caller to apply.

use glam::Vec2;
use serde::Deserialize;
use wayfarer_core::{
    BiomeKind, Blocker, CollisionOutcome, Command, EnvironmentSnapshot, Facing, ObstacleId,
    WorldBounds,
};

/// Tunable constants of the movement controller.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementTuning {
    /// Side length of the player's bounding square in world units.
    pub player_size: f32,
    /// Speed in world units per tick before wind modulation.
    pub base_speed: f32,
    /// Distance to the target at or under which the player idles.
    pub arrive_threshold: f32,
    /// Wind speed at which a fully aligned tailwind doubles the base speed.
    pub wind_reference_speed: f32,
    /// Lower bound of the wind-modulated speed.
    pub min_speed: f32,
    /// Upper bound of the wind-modulated speed.
    pub max_speed: f32,
    /// Ticks during which further obstacle hits are ignored.
    pub collision_cooldown: u32,
    /// Moving ticks between animation frame advances.
    pub animation_period: u32,
    /// Number of frames in the walk cycle.
    pub animation_frames: u32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            player_size: 32.0,
            base_speed: 1.0,
            arrive_threshold: 5.0,
            wind_reference_speed: 50.0,
            min_speed: 0.5,
            max_speed: 6.0,
            collision_cooldown: 30,
            animation_period: 8,
            animation_frames: 4,
        }
    }
}

/// The single mobile agent.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerEntity {
    position: Vec2,
    size: f32,
    base_speed: f32,
    speed: f32,
    velocity: Vec2,
    gold: i64,
    facing: Facing,
    collision_cooldown: u32,
    animation_frame: u32,
    animation_timer: u32,
}

impl PlayerEntity {
    /// Creates a player at `position` sized and paced by `tuning`.
    #[must_use]
    pub fn spawn(position: Vec2, tuning: &MovementTuning) -> Self {
        Self {
            position,
            size: tuning.player_size,
            base_speed: tuning.base_speed,
            speed: tuning.base_speed,
            velocity: Vec2::ZERO,
            gold: 0,
            facing: Facing::default(),
            collision_cooldown: 0,
            animation_frame: 0,
            animation_timer: 0,
        }
    }

    /// Center of the player's bounding square.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Side length of the bounding square.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Speed before wind modulation.
    #[must_use]
    pub const fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Speed used during the most recent moving tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Displacement attempted during the most recent tick.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Signed gold balance.
    #[must_use]
    pub const fn gold(&self) -> i64 {
        self.gold
    }

    /// Direction the sprite faces.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Remaining ticks before another obstacle hit is reported.
    #[must_use]
    pub const fn collision_cooldown(&self) -> u32 {
        self.collision_cooldown
    }

    /// Current walk cycle frame.
    #[must_use]
    pub const fn animation_frame(&self) -> u32 {
        self.animation_frame
    }

    /// Adds `delta` to the gold balance, which may go negative.
    pub fn adjust_gold(&mut self, delta: i64) {
        self.gold = self.gold.saturating_add(delta);
    }
}

/// What happened to the player during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementReport {
    /// Whether the player tried to move this tick.
    pub moving: bool,
    /// Solid that stopped the diagonal move, if any.
    pub blocker: Option<Blocker>,
    /// Obstacle hit outside the cooldown window.
    pub hit_obstacle: Option<ObstacleId>,
}

/// Pure system that converts a target point into player motion.
#[derive(Clone, Debug, Default)]
pub struct Movement {
    tuning: MovementTuning,
}

impl Movement {
    /// Creates the system with the provided constants.
    #[must_use]
    pub const fn new(tuning: MovementTuning) -> Self {
        Self { tuning }
    }

    /// Constants the system was created with.
    #[must_use]
    pub const fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Advances `player` one tick toward `target`.
    ///
    /// `resolve` receives the current position, the player's size and a
    /// proposed position. A blocked diagonal move is retried along X and then
    /// along Y. Hitting an obstacle outside the cooldown window pushes a
    /// [`Command::DestroyObstacle`] into `out`.
    pub fn handle<F>(
        &self,
        player: &mut PlayerEntity,
        target: Vec2,
        environment: Option<&EnvironmentSnapshot>,
        bounds: WorldBounds,
        resolve: F,
        out: &mut Vec<Command>,
    ) -> MovementReport
    where
        F: Fn(Vec2, f32, Vec2) -> CollisionOutcome,
    {
        let mut report = MovementReport::default();
        let delta = bounds.shortest_delta(player.position, target);
        let distance = delta.length();
        player.facing = Facing::from_delta(delta);

        if distance <= self.tuning.arrive_threshold {
            player.velocity = Vec2::ZERO;
        } else {
            report.moving = true;
            let direction = delta / distance;
            player.speed = self.modulated_speed(player.base_speed, direction, environment);
            player.velocity = direction * player.speed;

            let current = player.position;
            let proposed = current + player.velocity;
            let outcome = resolve(current, player.size, proposed);

            if let Some(blocker) = outcome.blocker {
                report.blocker = Some(blocker);
                player.position = slide(&resolve, current, player.size, proposed);

                if let Blocker::Obstacle(obstacle) = blocker {
                    if player.collision_cooldown == 0 {
                        player.collision_cooldown = self.tuning.collision_cooldown;
                        report.hit_obstacle = Some(obstacle);
                        out.push(Command::DestroyObstacle { obstacle });
                    }
                }
            } else {
                player.position = outcome.position;
            }

            self.advance_animation(player);
        }

        player.collision_cooldown = player.collision_cooldown.saturating_sub(1);
        report
    }

    /// Speed after applying the wind of a windy environment.
    ///
    /// Other biomes keep `base_speed` even when their snapshot carries a wind
    /// vector.
    #[must_use]
    pub fn modulated_speed(
        &self,
        base_speed: f32,
        direction: Vec2,
        environment: Option<&EnvironmentSnapshot>,
    ) -> f32 {
        let Some((wind, wind_speed)) = environment
            .filter(|snapshot| snapshot.biome == BiomeKind::Windy)
            .and_then(|snapshot| snapshot.wind_direction.map(|wind| (wind, snapshot.wind_speed)))
        else {
            return base_speed;
        };
        let factor = 1.0 + direction.dot(wind) * wind_speed / self.tuning.wind_reference_speed;
        (base_speed * factor).clamp(self.tuning.min_speed, self.tuning.max_speed)
    }

    fn advance_animation(&self, player: &mut PlayerEntity) {
        player.animation_timer += 1;
        if player.animation_timer >= self.tuning.animation_period {
            player.animation_timer = 0;
            let frames = self.tuning.animation_frames.max(1);
            player.animation_frame = (player.animation_frame + 1) % frames;
        }
    }
}

/// X-axis-priority sliding: keeps whichever single-axis move succeeds first.
fn slide<F>(resolve: &F, current: Vec2, size: f32, proposed: Vec2) -> Vec2
where
    F: Fn(Vec2, f32, Vec2) -> CollisionOutcome,
{
    let along_x = resolve(current, size, Vec2::new(proposed.x, current.y));
    if !along_x.collided() {
        return along_x.position;
    }
    let along_y = resolve(current, size, Vec2::new(current.x, proposed.y));
    if !along_y.collided() {
        return along_y.position;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tuning_keeps_defaults() {
        let tuning: MovementTuning = toml::from_str("base_speed = 2.5").expect("tuning parses");
        assert_eq!(tuning.base_speed, 2.5);
        assert_eq!(tuning.collision_cooldown, 30);
        assert_eq!(tuning.max_speed, 6.0);
    }

    #[test]
    fn gold_may_go_negative() {
        let mut player = PlayerEntity::spawn(Vec2::ZERO, &MovementTuning::default());
        player.adjust_gold(-5);
        assert_eq!(player.gold(), -5);
        player.adjust_gold(12);
        assert_eq!(player.gold(), 7);
    }

    #[test]
    fn calm_environment_keeps_base_speed() {
        let movement = Movement::default();
        let cave = EnvironmentSnapshot::from_biome(BiomeKind::Cave, None);
        assert_eq!(movement.modulated_speed(1.0, Vec2::X, Some(&cave)), 1.0);
        assert_eq!(movement.modulated_speed(1.0, Vec2::X, None), 1.0);
    }

    #[test]
    fn tailwind_and_headwind_scale_speed() {
        let movement = Movement::default();
        let windy = EnvironmentSnapshot::from_biome(BiomeKind::Windy, Some(Vec2::X));
        assert_eq!(movement.modulated_speed(1.0, Vec2::X, Some(&windy)), 2.0);
        assert_eq!(movement.modulated_speed(1.0, -Vec2::X, Some(&windy)), 0.5);
        assert_eq!(movement.modulated_speed(1.0, Vec2::Y, Some(&windy)), 1.0);
    }

    #[test]
    fn only_windy_biomes_modulate_speed() {
        let movement = Movement::default();
        for biome in [BiomeKind::Beach, BiomeKind::Jungle, BiomeKind::Rain, BiomeKind::Arctic] {
            let snapshot = EnvironmentSnapshot::from_biome(biome, Some(Vec2::X));
            assert_eq!(
                movement.modulated_speed(1.0, Vec2::X, Some(&snapshot)),
                1.0,
                "{biome:?}"
            );
        }
    }
}
