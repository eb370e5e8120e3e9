use std::time::Duration;

use crate::{
    config::WallConfig,
    engine::walls::{View, cast_columns, minimap},
    renderer::{DrawCall, Renderer, RendererExt},
    sim::{Demo, InputCmd, Player, TILE_SIZE, player_input},
    world::TileMap,
};

/// Walkable tile arena seen through one ray per screen column, with a
/// minimap in the corner.
pub struct WallCaster {
    map: TileMap,
    player: Player,
    tile_size: f32,
    calls: Vec<DrawCall>,
}

impl Default for WallCaster {
    fn default() -> Self {
        Self::new(TileMap::sample_arena(), Player::default(), TILE_SIZE)
    }
}

impl WallCaster {
    pub fn new(map: TileMap, player: Player, tile_size: f32) -> Self {
        Self {
            map,
            player,
            tile_size,
            calls: Vec::new(),
        }
    }

    pub fn from_config(cfg: &WallConfig) -> Self {
        Self::new(TileMap::sample_arena(), cfg.player, cfg.tile_size)
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }
}

impl Demo for WallCaster {
    fn title(&self) -> &str {
        "wall caster"
    }

    fn on_update(&mut self, dt: f32, _sim_time: Duration, cmd: InputCmd) {
        player_input(&mut self.player, cmd, dt);
    }

    fn on_render<R: Renderer>(&mut self, renderer: &mut R) {
        let (width, height) = renderer.frame_size();
        let view = View {
            width,
            height,
            tile_size: self.tile_size,
        };
        self.calls.clear();
        cast_columns(&self.map, &self.player.camera, view, &mut self.calls);
        minimap(&self.map, &self.player.camera, view, &mut self.calls);
        renderer.draw_calls(&self.calls);
    }
}
