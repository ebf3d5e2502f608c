use bevy::prelude::*;

/// 把玩家移动到指定的地面坐标
#[derive(Event, Debug, Clone, Copy)]
pub struct TeleportPlayer {
    pub x: f32,
    pub z: f32,
}
