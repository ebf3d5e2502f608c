use bevy::prelude::*;
use serde_derive::Serialize;

use crate::core::resources::GameConfig;
use crate::data::catalog::ItemCatalog;

/// 背包中的一格
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InventorySlot {
    #[default]
    Empty,
    /// 1 <= count <= max_stack
    Occupied { item_id: String, count: u32 },
}

impl InventorySlot {
    pub fn is_empty(&self) -> bool {
        matches!(self, InventorySlot::Empty)
    }

    pub fn item_id(&self) -> Option<&str> {
        match self {
            InventorySlot::Occupied { item_id, .. } => Some(item_id),
            InventorySlot::Empty => None,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            InventorySlot::Occupied { count, .. } => *count,
            InventorySlot::Empty => 0,
        }
    }
}

/// add 的结果：放进去多少、剩下多少
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    pub placed: u32,
    pub leftover: u32,
}

impl AddOutcome {
    fn rejected(quantity: u32) -> Self {
        Self {
            placed: 0,
            leftover: quantity,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.placed > 0 && self.leftover == 0
    }
}

/// 玩家背包（挂在 Resource），容量固定
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
}

impl FromWorld for Inventory {
    fn from_world(world: &mut World) -> Self {
        let capacity = world
            .get_resource::<GameConfig>()
            .map(|c| c.inventory.capacity)
            .unwrap_or_else(|| GameConfig::default().inventory.capacity);
        Self::with_capacity(capacity)
    }
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![InventorySlot::Empty; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// 某种物品在所有格子里的总数
    pub fn count_of(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item_id() == Some(item_id))
            .map(InventorySlot::count)
            .sum()
    }

    /// 还能再塞下多少个该物品（同类格剩余 + 空格 × max_stack）
    pub fn room_for(&self, item_id: &str, max_stack: u32) -> u64 {
        self.slots
            .iter()
            .map(|slot| match slot {
                InventorySlot::Empty => max_stack as u64,
                InventorySlot::Occupied { item_id: id, count } if id == item_id => {
                    max_stack.saturating_sub(*count) as u64
                }
                InventorySlot::Occupied { .. } => 0,
            })
            .sum()
    }

    /// 每格都有东西且都堆满
    pub fn is_full(&self, catalog: &ItemCatalog) -> bool {
        self.slots.iter().all(|slot| match slot {
            InventorySlot::Empty => false,
            // 表里找不到的物品无法再堆叠，视为满格
            InventorySlot::Occupied { item_id, count } => catalog
                .max_stack(item_id)
                .is_none_or(|max| *count >= max),
        })
    }

    /// 尽量放：能放多少放多少，剩余数量交还调用方
    pub fn add(&mut self, catalog: &ItemCatalog, item_id: &str, quantity: u32) -> AddOutcome {
        let Some(max_stack) = catalog.max_stack(item_id) else {
            return AddOutcome::rejected(quantity);
        };
        if quantity == 0 {
            return AddOutcome::rejected(0);
        }

        let leftover = self.place(item_id, quantity, max_stack);
        AddOutcome {
            placed: quantity - leftover,
            leftover,
        }
    }

    /// 全有或全无：放不下全部时背包保持原样并返回 false
    pub fn try_add(&mut self, catalog: &ItemCatalog, item_id: &str, quantity: u32) -> bool {
        let Some(max_stack) = catalog.max_stack(item_id) else {
            return false;
        };
        if quantity == 0 || self.room_for(item_id, max_stack) < quantity as u64 {
            return false;
        }

        let leftover = self.place(item_id, quantity, max_stack);
        debug_assert_eq!(leftover, 0);
        leftover == 0
    }

    /// 两轮放置：先补满同类格，再按顺序占用空格。返回未放下的数量
    fn place(&mut self, item_id: &str, quantity: u32, max_stack: u32) -> u32 {
        let mut remaining = quantity;

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if let InventorySlot::Occupied { item_id: id, count } = slot {
                if id.as_str() == item_id && *count < max_stack {
                    let moved = (max_stack - *count).min(remaining);
                    *count += moved;
                    remaining -= moved;
                }
            }
        }

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_empty() {
                let moved = max_stack.min(remaining);
                *slot = InventorySlot::Occupied {
                    item_id: item_id.to_string(),
                    count: moved,
                };
                remaining -= moved;
            }
        }

        remaining
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            capacity: self.capacity(),
            slots: self.slots.clone(),
        }
    }
}

/// 背包的只读快照，用于 dump
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySnapshot {
    pub capacity: usize,
    pub slots: Vec<InventorySlot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ItemTemplate;

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_templates(
            [("potion", 5), ("key", 1), ("arrow", 20)].map(|(id, max_stack)| ItemTemplate {
                id: id.into(),
                name: id.into(),
                description: String::new(),
                max_stack,
                icon: String::new(),
            }),
        )
    }

    fn occupied(item_id: &str, count: u32) -> InventorySlot {
        InventorySlot::Occupied {
            item_id: item_id.into(),
            count,
        }
    }

    #[test]
    fn test_stacking_scenario() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(10);

        assert!(inv.try_add(&catalog, "potion", 1));
        assert_eq!(inv.slots()[0], occupied("potion", 1));
        assert!(inv.try_add(&catalog, "potion", 2));
        assert_eq!(inv.slots()[0], occupied("potion", 3));
        assert!(inv.try_add(&catalog, "potion", 3));

        assert_eq!(inv.slots()[0], occupied("potion", 5));
        assert_eq!(inv.slots()[1], occupied("potion", 1));
        assert!(inv.slots()[2..].iter().all(InventorySlot::is_empty));
        assert_eq!(inv.count_of("potion"), 6);
    }

    #[test]
    fn test_tops_up_existing_before_empty() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(4);
        inv.add(&catalog, "potion", 5);
        inv.add(&catalog, "key", 1);
        inv.add(&catalog, "potion", 2);
        // slot 0 满了，slot 1 是钥匙，新堆落到 slot 2
        assert_eq!(inv.slots()[2], occupied("potion", 2));

        assert!(inv.try_add(&catalog, "potion", 3));
        assert_eq!(inv.slots()[2], occupied("potion", 5));
        assert!(inv.slots()[3].is_empty());
    }

    #[test]
    fn test_fill_to_full() {
        let catalog = catalog();
        let (capacity, max) = (3, 5);
        let mut inv = Inventory::with_capacity(capacity);

        let outcome = inv.add(&catalog, "potion", capacity as u32 * max);
        assert!(outcome.is_complete());
        assert!(inv.is_full(&catalog));

        let before = inv.clone();
        assert!(!inv.try_add(&catalog, "potion", 1));
        assert!(!inv.try_add(&catalog, "key", 1));
        let outcome = inv.add(&catalog, "arrow", 7);
        assert_eq!(outcome, AddOutcome { placed: 0, leftover: 7 });
        assert!(!outcome.is_complete());
        assert_eq!(inv, before);
    }

    #[test]
    fn test_not_full_with_partial_stack() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(2);
        inv.add(&catalog, "potion", 5);
        inv.add(&catalog, "potion", 4);
        assert_eq!(inv.used_slots(), 2);
        assert!(!inv.is_full(&catalog));
    }

    #[test]
    fn test_try_add_is_all_or_nothing() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(2);
        inv.add(&catalog, "potion", 4);

        let before = inv.clone();
        // 只剩 1 + 5 个空间
        assert!(!inv.try_add(&catalog, "potion", 7));
        assert_eq!(inv, before);

        assert!(inv.try_add(&catalog, "potion", 6));
        assert!(inv.is_full(&catalog));
    }

    #[test]
    fn test_add_is_best_effort() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(2);

        let outcome = inv.add(&catalog, "potion", 12);
        assert_eq!(outcome, AddOutcome { placed: 10, leftover: 2 });
        assert!(!outcome.is_complete());
        assert_eq!(inv.count_of("potion"), 10);
    }

    #[test]
    fn test_single_slot_key_rejected() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(1);
        assert!(inv.try_add(&catalog, "key", 1));
        assert!(!inv.try_add(&catalog, "key", 1));
        assert_eq!(inv.slots()[0], occupied("key", 1));
    }

    #[test]
    fn test_unknown_item_and_zero_quantity() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(3);

        assert!(!inv.try_add(&catalog, "sword", 1));
        assert_eq!(inv.add(&catalog, "sword", 2), AddOutcome { placed: 0, leftover: 2 });
        assert!(!inv.try_add(&catalog, "potion", 0));
        assert!(!inv.add(&catalog, "potion", 0).is_complete());
        assert_eq!(inv.used_slots(), 0);
    }

    #[test]
    fn test_counts_stay_bounded() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(6);
        let requests = [
            ("potion", 3),
            ("arrow", 25),
            ("key", 1),
            ("potion", 9),
            ("key", 2),
            ("arrow", 40),
            ("potion", 1),
        ];

        let mut requested = std::collections::HashMap::new();
        for (id, qty) in requests {
            inv.add(&catalog, id, qty);
            *requested.entry(id).or_insert(0u32) += qty;

            for (&id, &total) in &requested {
                let max = catalog.max_stack(id).unwrap();
                let occupied = inv
                    .slots()
                    .iter()
                    .filter(|s| s.item_id() == Some(id))
                    .count() as u32;
                let held = inv.count_of(id);
                assert!(held <= occupied * max);
                assert!(held <= total);
                assert!(inv.slots().iter().all(|s| s.is_empty() || s.count() >= 1));
            }
        }
    }

    #[test]
    fn test_room_for() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(3);
        inv.add(&catalog, "potion", 3);
        inv.add(&catalog, "key", 1);
        assert_eq!(inv.room_for("potion", 5), 2 + 5);
        assert_eq!(inv.room_for("key", 1), 1);
    }

    #[test]
    fn test_capacity_from_config() {
        let mut world = World::new();
        let mut config = GameConfig::default();
        config.inventory.capacity = 7;
        world.insert_resource(config);
        world.init_resource::<Inventory>();
        assert_eq!(world.resource::<Inventory>().capacity(), 7);
    }

    #[test]
    fn test_snapshot_json() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(2);
        inv.add(&catalog, "key", 1);
        let json = serde_json::to_value(inv.snapshot()).unwrap();
        assert_eq!(json["capacity"], 2);
        assert_eq!(json["slots"][0]["state"], "occupied");
        assert_eq!(json["slots"][0]["item_id"], "key");
        assert_eq!(json["slots"][1]["state"], "empty");
    }
}
