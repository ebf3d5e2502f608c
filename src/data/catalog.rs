use bevy::prelude::*;
use std::collections::HashMap;

use super::schema::{ItemTemplate, LayoutEntry};

/// 只读物品表：id → 模板，保留原始顺序
#[derive(Resource, Debug, Default, Clone)]
pub struct ItemCatalog {
    templates: Vec<ItemTemplate>,
    index: HashMap<String, usize>,
}

impl ItemCatalog {
    pub fn from_templates(templates: impl IntoIterator<Item = ItemTemplate>) -> Self {
        let mut catalog = Self::default();
        for mut template in templates {
            if template.max_stack == 0 {
                warn!("物品 {} 的 max_stack 为 0，按 1 处理", template.id);
                template.max_stack = 1;
            }
            if let Some(&idx) = catalog.index.get(&template.id) {
                warn!("重复的物品 ID {}，后者覆盖前者", template.id);
                catalog.templates[idx] = template;
            } else {
                catalog
                    .index
                    .insert(template.id.clone(), catalog.templates.len());
                catalog.templates.push(template);
            }
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&ItemTemplate> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn max_stack(&self, id: &str) -> Option<u32> {
        self.get(id).map(|t| t.max_stack)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// 地牢初始拾取物布局
#[derive(Resource, Debug, Default, Clone)]
pub struct DungeonLayoutTable {
    pub entries: Vec<LayoutEntry>,
}
