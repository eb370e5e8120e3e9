use glam::Vec2;

use super::InputCmd;
use crate::world::Camera;

pub const MOVE_SPEED: f32 = 30.0; // map-units / second
pub const TURN_RATE: f32 = 100.0; // degrees / second
pub const HALF_FOV: f32 = 60.0; // degrees either side of the heading
pub const TILE_SIZE: f32 = 10.0; // map-units per grid cell

/// Player state owned by the wall-caster demo.
///
/// Movement is not clipped against the map: the player can walk through
/// walls and out of the arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub camera: Camera,
    pub speed: f32,
    pub turn_rate: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            camera: Camera::new(Vec2::new(30.0, 40.0), 0.0, HALF_FOV),
            speed: MOVE_SPEED,
            turn_rate: TURN_RATE,
        }
    }
}

/// Apply one fixed tick of `cmd` to `player`.
pub fn player_input(player: &mut Player, cmd: InputCmd, dt: f32) {
    if cmd.is_idle() {
        return;
    }

    /* 1. turn */
    if cmd.turn != 0 {
        player.camera.turn(cmd.turn as f32 * player.turn_rate * dt);
    }

    /* 2. move along the (new) heading */
    if cmd.forward != 0 || cmd.strafe != 0 {
        let dist = player.speed * dt;
        player
            .camera
            .step(cmd.forward as f32 * dist, cmd.strafe as f32 * dist);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DT;

    #[test]
    fn forward_tick_moves_along_heading() {
        let mut p = Player::default();
        let cmd = InputCmd {
            forward: 1,
            ..InputCmd::default()
        };
        player_input(&mut p, cmd, DT);
        assert!((p.camera.pos.x - (30.0 + 30.0 * DT)).abs() < 1e-5);
        assert!((p.camera.pos.y - 40.0).abs() < 1e-5);
    }

    #[test]
    fn turning_scales_with_rate() {
        let mut p = Player::default();
        let cmd = InputCmd {
            turn: 1,
            ..InputCmd::default()
        };
        for _ in 0..10 {
            player_input(&mut p, cmd, DT);
        }
        assert!((p.camera.yaw - 100.0 * DT * 10.0).abs() < 1e-3);
    }

    #[test]
    fn idle_leaves_player_alone() {
        let mut p = Player::default();
        assert!(InputCmd::default().is_idle());
        player_input(&mut p, InputCmd::default(), DT);
        assert_eq!(p, Player::default());
    }

    #[test]
    fn walls_do_not_block() {
        let mut p = Player::default();
        let cmd = InputCmd {
            forward: 1,
            ..InputCmd::default()
        };
        // 30 map-units/s for 10 s ends far outside the 100-unit arena
        for _ in 0..625 {
            player_input(&mut p, cmd, DT);
        }
        assert!(p.camera.pos.x > 300.0);
    }
}
