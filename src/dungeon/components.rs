use bevy::prelude::*;

/// 玩家标记组件
#[derive(Component)]
#[require(Transform)]
pub struct Player;

/// 格子坐标 → 世界坐标（格子中心，地面 y = 0）
pub fn grid_to_world(grid_x: i32, grid_z: i32, cell_size: f32) -> Vec3 {
    Vec3::new(
        (grid_x as f32 + 0.5) * cell_size,
        0.0,
        (grid_z as f32 + 0.5) * cell_size,
    )
}
