//! 背包 → 界面描述的纯函数投影，不接触任何实体
use crate::data::catalog::ItemCatalog;
use crate::inventory::components::{Inventory, InventorySlot};

#[derive(Debug, Clone, PartialEq)]
pub enum SlotView {
    Empty,
    Filled {
        item_id: String,
        name: String,
        icon: String,
        /// 只有可堆叠物品（max_stack > 1）才显示数量
        count_label: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryView {
    pub cells: Vec<SlotView>,
}

pub fn project(inventory: &Inventory, catalog: &ItemCatalog) -> InventoryView {
    let cells = inventory
        .slots()
        .iter()
        .map(|slot| match slot {
            InventorySlot::Empty => SlotView::Empty,
            InventorySlot::Occupied { item_id, count } => {
                let template = catalog.get(item_id);
                let stackable = template.is_some_and(|t| t.max_stack > 1);
                SlotView::Filled {
                    item_id: item_id.clone(),
                    name: template.map_or_else(|| item_id.clone(), |t| t.name.clone()),
                    icon: template.map(|t| t.icon.clone()).unwrap_or_default(),
                    count_label: stackable.then(|| count.to_string()),
                }
            }
        })
        .collect();
    InventoryView { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ItemTemplate;

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_templates([
            ItemTemplate {
                id: "potion".into(),
                name: "Red Potion".into(),
                description: "Restores a little health.".into(),
                max_stack: 5,
                icon: "icons/potion.png".into(),
            },
            ItemTemplate {
                id: "key".into(),
                name: "Rusty Key".into(),
                description: String::new(),
                max_stack: 1,
                icon: "icons/key.png".into(),
            },
        ])
    }

    #[test]
    fn test_one_cell_per_slot() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(4);
        inv.add(&catalog, "potion", 3);
        inv.add(&catalog, "key", 1);

        let view = project(&inv, &catalog);
        assert_eq!(view.cells.len(), 4);
        assert_eq!(
            view.cells[0],
            SlotView::Filled {
                item_id: "potion".into(),
                name: "Red Potion".into(),
                icon: "icons/potion.png".into(),
                count_label: Some("3".into()),
            }
        );
        // 不可堆叠物品不显示数量
        assert!(matches!(&view.cells[1], SlotView::Filled { count_label: None, .. }));
        assert_eq!(view.cells[2], SlotView::Empty);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(3);
        inv.add(&catalog, "potion", 7);

        assert_eq!(project(&inv, &catalog), project(&inv, &catalog));
    }

    #[test]
    fn test_projection_tracks_mutation() {
        let catalog = catalog();
        let mut inv = Inventory::with_capacity(3);
        let before = project(&inv, &catalog);
        inv.add(&catalog, "key", 1);
        assert_ne!(before, project(&inv, &catalog));
    }
}
