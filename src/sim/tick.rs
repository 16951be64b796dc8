//! Fixed-order level step
//!
//! One call to [`Level::step`] advances the simulation by one frame. Every
//! phase is also callable on its own.

use super::collision::check_collision;
use super::entity::{EntityId, Placement};
use super::level::Level;
use super::movement::{self, MoveInput};

impl Level {
    /// Advance the level by one frame (no-op while paused)
    pub fn step(&mut self) {
        if self.input.is_paused() {
            return;
        }

        self.remove_entities_as_needed();
        self.spawn_entities_as_needed();
        self.update_modifiers();
        self.update_velocities();
        self.check_collisions();
        self.update_positions();
        self.check_win_lose_conditions();
        self.check_fell_out_of_level();
        self.scroll();
    }

    /// Drop dead players (losing the level), dead movables and spent power-ups
    pub fn remove_entities_as_needed(&mut self) {
        let mut doomed: Vec<EntityId> = Vec::new();
        let mut player_died = false;

        for player in self.entities.players() {
            if player.is_dead() {
                doomed.push(player.id);
                player_died = true;
            }
        }
        for movable in self.entities.movables() {
            if movable.is_dead() && !doomed.contains(&movable.id) {
                doomed.push(movable.id);
            }
        }
        for power_up in self.entities.power_ups() {
            if power_up.has_applied_modifier() {
                doomed.push(power_up.id);
            }
        }

        if player_died {
            self.set_level_lost(true);
        }
        for id in doomed {
            self.remove_entity(id);
        }
    }

    /// Insert at most one pending spawn per spawner block
    pub fn spawn_entities_as_needed(&mut self) {
        let spawns: Vec<Placement> = self
            .entities
            .iter_mut()
            .filter(|e| e.kind.is_block())
            .filter_map(|e| e.spawner.as_mut()?.attempt_spawn_entity())
            .collect();

        for spawn in spawns {
            log::debug!("Spawning {} at {:?}", spawn.kind.as_str(), spawn.pos);
            self.add_entity(spawn.kind, spawn.pos.x, spawn.pos.y);
        }
    }

    /// Tick down every player's modifiers, dropping expired ones
    pub fn update_modifiers(&mut self) {
        for entity in self.entities.iter_mut() {
            if let Some(player) = entity.player.as_mut() {
                player.modifiers.update();
            }
        }
    }

    /// Players follow the input flags, enemies chase the first player
    pub fn update_velocities(&mut self) {
        let input = MoveInput {
            left: self.input.is_moving_left(),
            right: self.input.is_moving_right(),
            jump: self.input.is_jumping(),
        };
        let target_x = self.entities.first_player().map(|p| p.hitbox.x_left());

        for entity in self.entities.iter_mut() {
            if entity.kind.is_player() {
                movement::update_player_velocity(entity, input);
            } else if entity.kind.is_enemy() {
                if let Some(target_x) = target_x {
                    movement::update_enemy_velocity(entity, target_x);
                }
            }
        }
    }

    /// Check every movable against every other entity
    ///
    /// Indices stay valid for the whole phase since nothing is inserted or
    /// removed while collisions resolve.
    pub fn check_collisions(&mut self) {
        let movers: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_movable())
            .map(|(i, _)| i)
            .collect();

        for mover in movers {
            for other in 0..self.entities.len() {
                if let Some((mover, other)) = self.entities.pair_mut(mover, other) {
                    check_collision(mover, other);
                }
            }
        }
    }

    /// Move players then enemies, keeping players inside the horizontal bounds
    pub fn update_positions(&mut self) {
        let mut players = Vec::new();
        for entity in self.entities.iter_mut().filter(|e| e.kind.is_player()) {
            movement::update_position(entity);
            players.push(entity.id);
        }
        for id in players {
            self.keep_player_in_bounds(id);
        }
        for entity in self.entities.iter_mut().filter(|e| e.kind.is_enemy()) {
            movement::update_position(entity);
        }
    }

    /// Lost without players, won once every winnable has been reached
    pub fn check_win_lose_conditions(&mut self) {
        if self.entities.first_player().is_none() {
            self.set_level_lost(true);
            return;
        }

        let all_won = {
            let mut winnables = self.entities.winnables().peekable();
            winnables.peek().is_some() && winnables.all(|w| w.has_won())
        };
        if all_won {
            self.set_level_won(true);
        }
    }

    /// Lose when the first player drops below the view
    pub fn check_fell_out_of_level(&mut self) {
        let view_blocks = self.config.view_blocks;
        let fell = self
            .entities
            .first_player()
            .is_some_and(|p| p.hitbox.y_top() > view_blocks);
        if fell {
            self.set_level_lost(true);
        }
    }

    /// Let the scroller move the world, adding its score
    pub fn scroll(&mut self) {
        let Some(player) = self.entities.first_player().map(|p| p.id) else {
            return;
        };
        let Some(scroller) = self.scroller.as_mut() else {
            return;
        };
        let delta = scroller.scroll(&mut self.entities, player);
        // Scrolling never takes points away
        self.score += delta.max(0) as u64;
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::consts::*;
    use crate::input::Command;
    use crate::scroll::AutoScroller;
    use crate::sim::direction::{CollisionDirections, Direction};
    use crate::sim::entity::{EntityKind, Placement};
    use crate::sim::level::{Level, LevelConfig, LevelSnapshot};

    fn level(placements: Vec<Placement>) -> Level {
        Level::new(
            LevelSnapshot {
                placements,
                length: 15,
                width: 20,
            },
            LevelConfig::default(),
        )
    }

    #[test]
    fn test_paused_step_changes_nothing() {
        let mut level = level(vec![
            Placement::new(EntityKind::MarioPlayer, 2.0, 3.0),
            Placement::new(EntityKind::Enemy, 6.0, 3.0),
            Placement::new(EntityKind::Block, 2.0, 6.0),
        ]);
        level.set_scroller(Box::new(AutoScroller::new(-0.1, 0.0, false)));
        level.key_press_functions_mut().apply(Command::StartMovingPlayerRight);
        level.key_press_functions_mut().apply(Command::PauseGame);

        let before = level.copy_of_entity_list();
        for _ in 0..25 {
            level.step();
        }
        assert_eq!(level.copy_of_entity_list(), before);
        assert_eq!(level.score(), 0);

        level.key_press_functions_mut().apply(Command::ResumeGame);
        level.step();
        assert_ne!(level.copy_of_entity_list(), before);
    }

    #[test]
    fn test_enemy_without_player_only_falls() {
        let mut level = level(vec![Placement::new(EntityKind::Enemy, 4.0, 2.0)]);
        for _ in 0..10 {
            level.step();
        }
        let enemy = level.entities().enemies().next().unwrap();
        assert_eq!(enemy.hitbox.x_left(), 4.0);
        assert!(enemy.hitbox.y_top() > 2.0);
        assert!(level.is_level_lost());
    }

    #[test]
    fn test_mutual_kill_then_removal() {
        let mut level = level(vec![
            Placement::new(EntityKind::MarioPlayer, 5.0, 5.0),
            Placement::new(EntityKind::Enemy, 5.8, 5.0),
        ]);
        // Let the player hurt through its right side too
        for entity in level.entities_mut().iter_mut() {
            if let Some(damageable) = entity.damageable.as_mut() {
                damageable.deals = CollisionDirections::from(
                    [Direction::Bottom, Direction::Left, Direction::Right].as_slice(),
                );
            }
        }

        level.step();
        assert_eq!(level.entities().len(), 2);
        for entity in level.entities().iter() {
            assert_eq!(entity.health(), Some(0.0));
        }

        level.step();
        assert!(level.entities().is_empty());
        assert!(level.is_level_lost());
        assert_eq!(level.score(), ENEMY_SCORE);
    }

    #[test]
    fn test_stomping_enemy_scores() {
        let mut level = level(vec![
            Placement::new(EntityKind::MarioPlayer, 5.0, 4.0),
            Placement::new(EntityKind::Enemy, 5.0, 4.9),
            Placement::new(EntityKind::Block, 5.0, 5.9),
        ]);
        level.first_player_mut().unwrap().vel.y = 0.1;
        level.step();
        level.step();
        assert_eq!(level.entities().enemies().count(), 0);
        assert_eq!(level.score(), ENEMY_SCORE);
        assert!(!level.is_level_lost());
    }

    #[test]
    fn test_touching_goal_wins() {
        let mut level = level(vec![
            Placement::new(EntityKind::MarioPlayer, 3.0, 5.0),
            Placement::new(EntityKind::Goal, 3.7, 5.0),
        ]);
        level.step();
        assert!(level.is_level_won());
        assert!(!level.is_level_lost());
    }

    #[test]
    fn test_no_goals_never_wins() {
        let mut level = level(vec![
            Placement::new(EntityKind::MarioPlayer, 3.0, 5.0),
            Placement::new(EntityKind::Block, 3.0, 6.0),
        ]);
        for _ in 0..5 {
            level.step();
        }
        assert!(!level.is_level_won());
    }

    #[test]
    fn test_falling_out_loses() {
        let mut level = level(vec![Placement::new(EntityKind::MarioPlayer, 3.0, 14.5)]);
        for _ in 0..30 {
            level.step();
        }
        assert!(level.is_level_lost());
    }

    #[test]
    fn test_head_bump_spawns_power_up() {
        let mut level = level(vec![
            Placement::new(EntityKind::MarioPlayer, 4.0, 5.0),
            Placement::new(EntityKind::PowerUpBlock, 4.0, 4.1),
        ]);
        level.first_player_mut().unwrap().vel.y = -0.2;
        level.check_collisions();
        assert_eq!(level.entities().power_ups().count(), 0);

        level.spawn_entities_as_needed();
        let power_up = level.entities().power_ups().next().unwrap();
        assert!(power_up.hitbox.pos.abs_diff_eq(DVec2::new(4.0, 3.1), 1e-9));
        assert!(power_up.empowering.as_ref().unwrap().modifier.is_some());
    }

    #[test]
    fn test_spent_power_up_is_removed_without_score() {
        let mut level = level(vec![Placement::new(EntityKind::MarioPlayer, 3.0, 5.0)]);
        level.add_entity(EntityKind::PowerUp, 3.6, 5.0);
        level.check_collisions();
        assert!(!level.first_player().unwrap().modifiers().unwrap().is_empty());

        level.remove_entities_as_needed();
        assert_eq!(level.entities().power_ups().count(), 0);
        assert_eq!(level.score(), 0);
    }

    #[test]
    fn test_modifiers_expire() {
        let mut level = level(vec![Placement::new(EntityKind::MarioPlayer, 3.0, 5.0)]);
        level.add_entity(EntityKind::PowerUp, 3.6, 5.0);
        level.check_collisions();

        let frames = MODIFIER_DURATION_SECS * FRAMES_PER_SECOND;
        for _ in 0..frames {
            level.update_modifiers();
        }
        assert!(level.first_player().unwrap().modifiers().unwrap().is_empty());
    }

    #[test]
    fn test_player_clamped_to_view() {
        let mut level = level(vec![Placement::new(EntityKind::MarioPlayer, 0.05, 5.0)]);
        level.key_press_functions_mut().apply(Command::StartMovingPlayerLeft);
        for _ in 0..10 {
            level.step();
        }
        assert_eq!(level.first_player().unwrap().hitbox.x_left(), 0.0);
    }

    #[test]
    fn test_auto_scroll_scores_per_step() {
        let mut level = level(vec![
            Placement::new(EntityKind::MarioPlayer, 3.0, 5.0),
            Placement::new(EntityKind::Block, 3.0, 6.0),
            Placement::new(EntityKind::Block, 8.0, 6.0),
        ]);
        level.set_scroller(Box::new(AutoScroller::new(-0.05, 0.0, true)));
        for _ in 0..4 {
            level.step();
        }
        assert_eq!(level.score(), 4);
        let far_block = level.entities().blocks().nth(1).unwrap();
        assert!((far_block.hitbox.x_left() - 7.8).abs() < 1e-9);
    }

    #[test]
    fn test_scroll_needs_a_player() {
        let mut level = level(vec![Placement::new(EntityKind::Block, 3.0, 6.0)]);
        level.set_scroller(Box::new(AutoScroller::new(-0.5, 0.0, false)));
        level.step();
        assert_eq!(level.score(), 0);
        assert_eq!(level.entities().blocks().next().unwrap().hitbox.x_left(), 3.0);
    }

    #[test]
    fn test_reinitialize_after_loss() {
        let mut level = level(vec![Placement::new(EntityKind::MarioPlayer, 3.0, 14.5)]);
        for _ in 0..30 {
            level.step();
        }
        assert!(level.is_level_lost());

        level.reinitialize();
        assert!(!level.is_level_lost());
        assert_eq!(level.first_player().unwrap().hitbox.pos, DVec2::new(3.0, 14.5));
    }
}
