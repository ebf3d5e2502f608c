use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::{Deserialize, Serialize};

use super::loader::RonAsset;

/// 物品模板：静态表条目，加载后不可变
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    /// 相对 assets/ 的图标路径
    #[serde(default)]
    pub icon: String,
}

fn default_max_stack() -> u32 {
    1
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemTemplate>,
}

impl RonAsset for ItemList {
    const EXTENSIONS: &'static [&'static str] = &["items.ron"];
}

/// 布局表一行：在哪个格子放多少个什么
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutEntry {
    pub item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub grid_x: i32,
    pub grid_z: i32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct DungeonLayout {
    pub pickups: Vec<LayoutEntry>,
}

impl RonAsset for DungeonLayout {
    const EXTENSIONS: &'static [&'static str] = &["layout.ron"];
}
