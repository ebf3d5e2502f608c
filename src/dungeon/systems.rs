use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::core::resources::GameConfig;
use crate::data::catalog::DungeonLayoutTable;
use crate::pickup::events::SpawnPickup;
use bevy::prelude::*;

/// 相机与灯光，场景几何不在这里处理
pub fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 14.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// 初始化玩家实体，站在 (0, 0) 格
pub fn spawn_player(mut commands: Commands, config: Res<GameConfig>) {
    let start = grid_to_world(0, 0, config.dungeon.cell_size);
    commands.spawn((Name::new("player"), Player, Transform::from_translation(start)));
}

/// 按布局表生成初始拾取物
pub fn spawn_layout_pickups(
    layout: Res<DungeonLayoutTable>,
    config: Res<GameConfig>,
    mut ev_spawn: EventWriter<SpawnPickup>,
) {
    let cell = config.dungeon.cell_size;
    for entry in &layout.entries {
        ev_spawn.write(SpawnPickup {
            item_id: entry.item_id.clone(),
            quantity: entry.quantity,
            position: grid_to_world(entry.grid_x, entry.grid_z, cell),
        });
    }
    info!("布局表请求生成 {} 个拾取物", layout.entries.len());
}

pub fn teleport_player(
    mut ev_tp: EventReader<TeleportPlayer>,
    mut log: EventWriter<LogEvent>,
    mut player: Query<&mut Transform, With<Player>>,
) {
    for ev in ev_tp.read() {
        let Ok(mut transform) = player.single_mut() else {
            log.write(LogEvent("未找到玩家".to_string()));
            continue;
        };
        transform.translation.x = ev.x;
        transform.translation.z = ev.z;
        log.write(LogEvent(format!("玩家移动到 ({:.1}, {:.1})", ev.x, ev.z)));
    }
}
