pub mod catalog;
pub mod loader;
pub mod schema;

use bevy::prelude::*;
use catalog::{DungeonLayoutTable, ItemCatalog};
use loader::RonAssetLoader;
use schema::{DungeonLayout, ItemList};
use crate::core::{resources::GameConfig, states::AppState};

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct DataAssets {
    items: Option<Handle<ItemList>>,
    layout: Option<Handle<DungeonLayout>>,
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .init_asset::<DungeonLayout>()
            .register_asset_loader(RonAssetLoader::<ItemList>::default())
            .register_asset_loader(RonAssetLoader::<DungeonLayout>::default())
            // 注册资源
            .init_resource::<DataAssets>()
            .init_resource::<ItemCatalog>()
            .init_resource::<DungeonLayoutTable>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut data: ResMut<DataAssets>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    data.items = Some(asset_server.load(config.dungeon.items_path.clone()));
    data.layout = Some(asset_server.load(config.dungeon.layout_path.clone()));
}

/// 两份数据都就绪（或失败）后生成只读表并进入游戏
fn check_loaded(
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
    data: Res<DataAssets>,
    asset_server: Res<AssetServer>,
    item_lists: Res<Assets<ItemList>>,
    layouts: Res<Assets<DungeonLayout>>,
) {
    let (Some(items), Some(layout)) = (&data.items, &data.layout) else {
        return;
    };

    let items_failed = asset_server
        .get_load_state(items)
        .is_some_and(|s| s.is_failed());
    let layout_failed = asset_server
        .get_load_state(layout)
        .is_some_and(|s| s.is_failed());

    let item_list = item_lists.get(items);
    let layout_list = layouts.get(layout);

    if (item_list.is_none() && !items_failed) || (layout_list.is_none() && !layout_failed) {
        return;
    }

    if items_failed {
        error!("物品表加载失败，物品表为空");
    }
    if layout_failed {
        error!("地牢布局加载失败，不生成初始拾取物");
    }

    let catalog = ItemCatalog::from_templates(
        item_list.map(|l| l.items.clone()).unwrap_or_default(),
    );
    let table = DungeonLayoutTable {
        entries: layout_list.map(|l| l.pickups.clone()).unwrap_or_default(),
    };

    if catalog.is_empty() {
        warn!("物品表为空，所有拾取物都会被忽略");
    }
    info!(
        "✔ Items loaded: {}, layout entries: {}",
        catalog.len(),
        table.entries.len()
    );
    commands.insert_resource(catalog);
    commands.insert_resource(table);
    next.set(AppState::InGame);
}
