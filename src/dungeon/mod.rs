pub mod components;
pub mod events;
pub mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::*;
use systems::*;

/// 地牢场景：相机 / 灯光 / 玩家，以及按布局表生成初始拾取物
pub struct DungeonPlugin;

impl Plugin for DungeonPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TeleportPlayer>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                OnEnter(AppState::InGame),
                (spawn_player, spawn_layout_pickups),
            )
            .add_systems(
                Update,
                teleport_player
                    .before(crate::pickup::systems::capture_pickups)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
