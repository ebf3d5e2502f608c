use bevy::prelude::*;

mod core;
mod data;
mod dungeon;
mod interface;
mod inventory;
mod pickup;
mod ui;

use crate::core::{events::LogEvent, states, CorePlugin};
use data::DataPlugin;
use dungeon::DungeonPlugin;
use interface::debug_cli::DebugCliPlugin;
use inventory::InventoryPlugin;
use pickup::PickupPlugin;
use ui::InventoryUiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Dungeon Pickups".into(),
                ..default()
            }),
            ..default()
        }))
        // CorePlugin 先注册，后面的插件依赖 GameConfig
        .add_plugins(CorePlugin)
        .add_plugins((DataPlugin, InventoryPlugin, PickupPlugin, InventoryUiPlugin))
        .add_plugins((DungeonPlugin, DebugCliPlugin))
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();
}

fn forward_log_event(mut reader: EventReader<LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
