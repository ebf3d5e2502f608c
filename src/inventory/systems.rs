use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::data::catalog::ItemCatalog;
use bevy::prelude::*;

/// 处理"give"——尽量往背包里塞，放不下的部分直接丢弃并提示
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut ev_changed: EventWriter<InventoryChanged>,
    mut log: EventWriter<LogEvent>,
    mut inventory: ResMut<Inventory>,
    catalog: Res<ItemCatalog>,
) {
    for ev in ev_give.read() {
        let Some(proto) = catalog
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(&ev.id))
        else {
            warn!("不存在物品 ID {}", ev.id);
            log.write(LogEvent(format!("不存在物品 ID {}", ev.id)));
            continue;
        };

        let outcome = inventory.add(&catalog, &proto.id, ev.count);
        if outcome.placed > 0 {
            ev_changed.write(InventoryChanged);
            info!("获得 {} ×{}", proto.name, outcome.placed);
        }
        if outcome.leftover > 0 {
            log.write(LogEvent(format!(
                "背包已满，{} ×{} 未能放入",
                proto.name, outcome.leftover
            )));
        }
    }
}

/// 打印背包内容
pub fn print_inventory(
    mut ev_list: EventReader<ListInventoryEvent>,
    mut log: EventWriter<LogEvent>,
    inventory: Res<Inventory>,
    catalog: Res<ItemCatalog>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    let mut lines = Vec::new();
    for (idx, slot) in inventory.slots().iter().enumerate() {
        if let InventorySlot::Occupied { item_id, count } = slot {
            let name = catalog.get(item_id).map_or(item_id.as_str(), |t| t.name.as_str());
            lines.push(format!("[{idx}] {name} ×{count} (id={item_id})"));
        }
    }

    if lines.is_empty() {
        lines.push("  (empty)".into());
    }
    if inventory.is_full(&catalog) {
        lines.push("  (full)".into());
    }
    log.write(LogEvent(lines.join("\n")));
}
