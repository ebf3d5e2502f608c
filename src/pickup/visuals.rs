//! 拾取物的图标贴图：先用占位材质，贴图异步加载完成后通过 IconReady 换上

use bevy::prelude::*;
use std::collections::HashMap;

use super::{components::PickupMarker, events::IconReady};
use crate::core::resources::GameConfig;
use crate::data::catalog::ItemCatalog;

#[derive(Debug, Clone, PartialEq)]
pub enum IconState {
    Loading(Handle<Image>),
    Ready(Handle<StandardMaterial>),
    /// 加载失败或没有配置图标，永久使用占位材质
    Failed,
}

/// 按物品 ID 缓存的图标材质，只在主线程的系统里修改
#[derive(Resource, Default)]
pub struct IconCache {
    pub mesh: Handle<Mesh>,
    pub placeholder: Handle<StandardMaterial>,
    pub icons: HashMap<String, IconState>,
}

impl IconCache {
    /// 当前应该给该物品使用的材质
    pub fn material_for(&self, item_id: &str) -> Handle<StandardMaterial> {
        match self.icons.get(item_id) {
            Some(IconState::Ready(material)) => material.clone(),
            _ => self.placeholder.clone(),
        }
    }
}

fn icon_material(texture: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: texture,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

pub fn setup_marker_assets(
    mut cache: ResMut<IconCache>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    let size = config.pickup.marker_size;
    cache.mesh = meshes.add(Rectangle::new(size, size));

    let placeholder = asset_server.load(config.pickup.placeholder_icon.clone());
    cache.placeholder = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.85, 0.35),
        ..icon_material(Some(placeholder))
    });
}

/// 新生成的标记挂上网格和材质，并在需要时开始加载图标
pub fn attach_marker_visuals(
    mut commands: Commands,
    mut cache: ResMut<IconCache>,
    asset_server: Res<AssetServer>,
    catalog: Res<ItemCatalog>,
    markers: Query<(Entity, &PickupMarker), Added<PickupMarker>>,
) {
    for (entity, marker) in &markers {
        if !cache.icons.contains_key(&marker.item_id) {
            let state = match catalog.get(&marker.item_id) {
                Some(t) if !t.icon.is_empty() => IconState::Loading(asset_server.load(t.icon.clone())),
                _ => IconState::Failed,
            };
            cache.icons.insert(marker.item_id.clone(), state);
        }

        commands.entity(entity).try_insert((
            Mesh3d(cache.mesh.clone()),
            MeshMaterial3d(cache.material_for(&marker.item_id)),
        ));
    }
}

/// 检查加载中的图标；成功则发布 IconReady，失败则保留占位材质，不重试
pub fn poll_icon_loads(
    mut cache: ResMut<IconCache>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    mut ev_ready: EventWriter<IconReady>,
) {
    for (item_id, state) in cache.icons.iter_mut() {
        let IconState::Loading(image) = state else {
            continue;
        };
        let Some(load_state) = asset_server.get_load_state(&*image) else {
            continue;
        };

        if load_state.is_loaded() {
            let material = materials.add(icon_material(Some(image.clone())));
            debug!("图标就绪: {item_id}");
            ev_ready.write(IconReady {
                item_id: item_id.clone(),
                material: material.clone(),
            });
            *state = IconState::Ready(material);
        } else if load_state.is_failed() {
            warn!("图标加载失败: {item_id}，继续使用占位图");
            *state = IconState::Failed;
        }
    }
}

/// 收到 IconReady 后替换所有同物品标记的材质
pub fn apply_ready_icons(
    mut ev_ready: EventReader<IconReady>,
    mut markers: Query<(&PickupMarker, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    for ev in ev_ready.read() {
        for (marker, mut material) in &mut markers {
            if marker.item_id == ev.item_id {
                material.0 = ev.material.clone();
            }
        }
    }
}
