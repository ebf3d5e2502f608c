pub mod components;
pub mod events;
pub mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use components::*;
use events::*;
use systems::*;

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app
            // 容量来自 GameConfig，CorePlugin 需先注册
            .init_resource::<Inventory>()
            .add_event::<GiveItemEvent>()
            .add_event::<ListInventoryEvent>()
            .add_event::<InventoryChanged>()
            .add_systems(
                Update,
                (give_item, print_inventory)
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
