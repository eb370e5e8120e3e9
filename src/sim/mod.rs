mod components;
mod systems;
mod tic;

pub use components::{InputCmd, InputFrame};
pub use systems::{HALF_FOV, MOVE_SPEED, Player, TILE_SIZE, TURN_RATE, player_input};
pub use tic::{
    Clock, DT, Demo, FrameDriver, InputSource, LoopState, ManualClock, Presenter, SystemClock, TIC,
};
