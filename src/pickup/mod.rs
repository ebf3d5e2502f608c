pub mod components;
pub mod events;
pub mod systems;
pub mod visuals;

use bevy::prelude::*;
use crate::core::states::AppState;
use events::*;
use systems::*;
use visuals::*;

/// 拾取物：生成 / 动画 / 拾取判定 / 图标
pub struct PickupPlugin;
impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IconCache>()
            .add_event::<SpawnPickup>()
            .add_event::<PickupCollected>()
            .add_event::<ClearPickups>()
            .add_event::<IconReady>()
            .add_systems(Startup, setup_marker_assets)
            .add_systems(
                Update,
                (
                    (
                        spawn_pickups,
                        clear_pickups,
                        animate_pickups,
                        capture_pickups,
                        announce_pickups,
                    )
                        .chain(),
                    (attach_marker_visuals, poll_icon_loads, apply_ready_icons)
                        .chain()
                        .after(spawn_pickups)
                        .before(capture_pickups),
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
