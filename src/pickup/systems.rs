use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::core::resources::GameConfig;
use crate::data::catalog::ItemCatalog;
use crate::dungeon::components::Player;
use crate::inventory::{components::Inventory, events::InventoryChanged};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// 场景中仍待拾取的标记
#[derive(SystemParam)]
pub struct PickupField<'w, 's> {
    markers: Query<'w, 's, &'static PickupMarker>,
}

impl PickupField<'_, '_> {
    pub fn active_count(&self) -> usize {
        self.markers.iter().count()
    }

    /// 地上某物品尚未拾取的总数
    pub fn pending_quantity(&self, item_id: &str) -> u32 {
        self.markers
            .iter()
            .filter(|m| m.item_id == item_id)
            .map(|m| m.quantity)
            .sum()
    }
}

/// 根据 SpawnPickup 生成标记；物品表中不存在的 ID 直接忽略
pub fn spawn_pickups(
    mut commands: Commands,
    mut ev_spawn: EventReader<SpawnPickup>,
    catalog: Res<ItemCatalog>,
    config: Res<GameConfig>,
) {
    for ev in ev_spawn.read() {
        if !catalog.contains(&ev.item_id) {
            warn!("不存在物品 ID {}，跳过生成", ev.item_id);
            continue;
        }
        if ev.quantity == 0 {
            warn!("物品 {} 数量为 0，跳过生成", ev.item_id);
            continue;
        }

        let anchor = ev.position + Vec3::Y * config.pickup.hover_height;
        let marker = PickupMarker::new(ev.item_id.clone(), ev.quantity, anchor);
        debug!("生成拾取物 {} ×{} @ {:?}", ev.item_id, ev.quantity, anchor);
        commands.spawn((
            Name::new(format!("pickup:{}", ev.item_id)),
            Transform::from_translation(anchor),
            marker,
        ));
    }
}

/// 上下浮动 + 缩放脉冲
pub fn animate_pickups(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut markers: Query<(&PickupMarker, &mut Transform)>,
) {
    let elapsed = time.elapsed_secs();
    for (marker, mut transform) in &mut markers {
        let animated = marker.animated_transform(elapsed, &config.pickup);
        transform.translation = animated.translation;
        transform.scale = animated.scale;
    }
}

/// 玩家进入拾取半径时尝试整堆放入背包；放不下则留在原地，下一帧再试
pub fn capture_pickups(
    mut commands: Commands,
    config: Res<GameConfig>,
    catalog: Res<ItemCatalog>,
    mut inventory: ResMut<Inventory>,
    player: Query<&Transform, With<Player>>,
    mut markers: Query<(Entity, &mut PickupMarker)>,
    mut ev_collected: EventWriter<PickupCollected>,
    mut ev_changed: EventWriter<InventoryChanged>,
    mut log: EventWriter<LogEvent>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    let radius = config.pickup.capture_radius;

    for (entity, mut marker) in &mut markers {
        if !marker.within_capture(player_tf.translation, radius) {
            if marker.blocked {
                marker.blocked = false;
            }
            continue;
        }

        if inventory.try_add(&catalog, &marker.item_id, marker.quantity) {
            ev_collected.write(PickupCollected {
                item_id: marker.item_id.clone(),
                quantity: marker.quantity,
            });
            ev_changed.write(InventoryChanged);
            commands.entity(entity).despawn();
        } else if !marker.blocked {
            marker.blocked = true;
            log.write(LogEvent(format!("背包已满，无法拾取 {}", marker.item_id)));
        }
    }
}

/// 拾取成功的提示
pub fn announce_pickups(
    mut ev_collected: EventReader<PickupCollected>,
    catalog: Res<ItemCatalog>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_collected.read() {
        let name = catalog
            .get(&ev.item_id)
            .map_or(ev.item_id.as_str(), |t| t.name.as_str());
        log.write(LogEvent(format!("拾取 {} ×{}", name, ev.quantity)));
    }
}

pub fn clear_pickups(
    mut commands: Commands,
    mut ev_clear: EventReader<ClearPickups>,
    markers: Query<Entity, With<PickupMarker>>,
) {
    if ev_clear.is_empty() {
        return;
    }
    ev_clear.clear();

    let mut removed = 0;
    for entity in &markers {
        commands.entity(entity).despawn();
        removed += 1;
    }
    info!("清除拾取物 {removed} 个");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ItemTemplate;
    use bevy::ecs::system::RunSystemOnce;

    fn test_world(capacity: usize) -> World {
        let mut world = World::new();
        world.insert_resource(GameConfig::default());
        world.insert_resource(ItemCatalog::from_templates(
            [("potion", 5), ("key", 1)].map(|(id, max_stack)| ItemTemplate {
                id: id.into(),
                name: id.into(),
                description: String::new(),
                max_stack,
                icon: String::new(),
            }),
        ));
        world.insert_resource(Inventory::with_capacity(capacity));
        world.init_resource::<Events<SpawnPickup>>();
        world.init_resource::<Events<PickupCollected>>();
        world.init_resource::<Events<InventoryChanged>>();
        world.init_resource::<Events<ClearPickups>>();
        world.init_resource::<Events<LogEvent>>();
        world
    }

    fn marker_count(world: &mut World) -> usize {
        world.run_system_once(|field: PickupField| field.active_count()).unwrap()
    }

    #[test]
    fn test_spawn_skips_unknown_items() {
        let mut world = test_world(4);
        for (id, qty) in [("potion", 2), ("sword", 1), ("key", 0), ("key", 1)] {
            world.send_event(SpawnPickup {
                item_id: id.into(),
                quantity: qty,
                position: Vec3::new(4.0, 0.0, 2.0),
            });
        }
        world.run_system_once(spawn_pickups).unwrap();

        assert_eq!(marker_count(&mut world), 2);
        let pending = world
            .run_system_once(|field: PickupField| field.pending_quantity("potion"))
            .unwrap();
        assert_eq!(pending, 2);

        let hover = GameConfig::default().pickup.hover_height;
        let mut q = world.query::<&PickupMarker>();
        assert!(q.iter(&world).all(|m| (m.anchor.y - hover).abs() < 1e-6));
    }

    #[test]
    fn test_capture_moves_item_into_inventory() {
        let mut world = test_world(4);
        world.spawn((Player, Transform::from_xyz(0.0, 0.0, 0.0)));
        let near = world
            .spawn(PickupMarker::new("potion", 3, Vec3::new(0.4, 0.6, 0.3)))
            .id();
        let far = world
            .spawn(PickupMarker::new("potion", 1, Vec3::new(8.0, 0.6, 0.0)))
            .id();

        world.run_system_once(capture_pickups).unwrap();

        assert!(world.get::<PickupMarker>(near).is_none());
        assert!(world.get::<PickupMarker>(far).is_some());
        assert_eq!(world.resource::<Inventory>().count_of("potion"), 3);
        assert_eq!(world.resource::<Events<PickupCollected>>().len(), 1);
        assert_eq!(world.resource::<Events<InventoryChanged>>().len(), 1);
    }

    #[test]
    fn test_rejected_pickup_stays_and_retries() {
        let mut world = test_world(1);
        {
            let catalog = world.resource::<ItemCatalog>().clone();
            let mut inventory = world.resource_mut::<Inventory>();
            assert!(inventory.try_add(&catalog, "key", 1));
        }
        world.spawn((Player, Transform::default()));
        let marker = world
            .spawn(PickupMarker::new("key", 1, Vec3::new(0.2, 0.6, 0.0)))
            .id();

        for _ in 0..3 {
            world.run_system_once(capture_pickups).unwrap();
            assert!(world.get::<PickupMarker>(marker).is_some());
        }
        assert!(world.get::<PickupMarker>(marker).unwrap().blocked);
        // 只提示一次
        assert_eq!(world.resource::<Events<LogEvent>>().len(), 1);

        // 背包腾出空间后下一帧即可拾取
        world.insert_resource(Inventory::with_capacity(1));
        world.run_system_once(capture_pickups).unwrap();
        assert!(world.get::<PickupMarker>(marker).is_none());
        assert_eq!(world.resource::<Inventory>().count_of("key"), 1);
    }

    #[test]
    fn test_collected_pickup_is_announced() {
        let mut world = test_world(4);
        world.spawn((Player, Transform::default()));
        world.spawn(PickupMarker::new("potion", 2, Vec3::new(0.1, 0.6, 0.0)));

        world.run_system_once(capture_pickups).unwrap();
        assert!(world.resource::<Events<LogEvent>>().is_empty());

        world.run_system_once(announce_pickups).unwrap();
        let logs = world.resource::<Events<LogEvent>>();
        let mut cursor = logs.get_cursor();
        let lines: Vec<_> = cursor.read(logs).map(|e| e.0.clone()).collect();
        assert_eq!(lines, vec!["拾取 potion ×2".to_string()]);
    }

    #[test]
    fn test_capture_without_player_is_noop() {
        let mut world = test_world(2);
        world.spawn(PickupMarker::new("potion", 1, Vec3::ZERO));
        world.run_system_once(capture_pickups).unwrap();
        assert_eq!(marker_count(&mut world), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut world = test_world(2);
        for x in 0..3 {
            world.spawn(PickupMarker::new("potion", 1, Vec3::new(x as f32 * 2.0, 0.6, 0.0)));
        }
        world.run_system_once(clear_pickups).unwrap();
        assert_eq!(marker_count(&mut world), 3);

        world.send_event(ClearPickups);
        world.run_system_once(clear_pickups).unwrap();
        assert_eq!(marker_count(&mut world), 0);
    }
}
