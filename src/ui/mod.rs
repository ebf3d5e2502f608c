pub mod systems;
pub mod view;

use crate::core::states::AppState;
use bevy::prelude::*;
use systems::*;

/// 背包界面：启动时创建根节点，背包变化时重绘
pub struct InventoryUiPlugin;

impl Plugin for InventoryUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InventoryUiVisibility>()
            .add_event::<ToggleInventoryUi>()
            .add_systems(Startup, spawn_inventory_ui)
            .add_systems(
                Update,
                (toggle_inventory_ui, render_inventory_ui)
                    .after(crate::pickup::systems::capture_pickups)
                    .after(crate::inventory::systems::give_item)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
