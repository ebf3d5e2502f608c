use anyhow::Context;
use bevy::prelude::*;
use serde_derive::Deserialize;
use std::path::Path;

/// 全局游戏配置，来自 assets/config/game.toml，缺省字段使用默认值
#[derive(Resource, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub inventory: InventoryConfig,
    pub pickup: PickupConfig,
    pub dungeon: DungeonConfig,
    pub ui: UiConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InventoryConfig {
    /// 背包格数，构造后固定
    pub capacity: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PickupConfig {
    /// 平面拾取半径（只看 x/z）
    pub capture_radius: f32,
    /// 标记离地高度
    pub hover_height: f32,
    pub bob_height: f32,
    pub bob_speed: f32,
    pub pulse_amount: f32,
    pub pulse_speed: f32,
    /// 标记贴图边长
    pub marker_size: f32,
    /// 图标加载完成前使用的占位贴图
    pub placeholder_icon: String,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            capture_radius: 1.0,
            hover_height: 0.6,
            bob_height: 0.15,
            bob_speed: 2.0,
            pulse_amount: 0.08,
            pulse_speed: 3.0,
            marker_size: 0.6,
            placeholder_icon: "icons/placeholder.png".into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DungeonConfig {
    /// 一个格子的世界边长
    pub cell_size: f32,
    pub items_path: String,
    pub layout_path: String,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            cell_size: 2.0,
            items_path: "data/dungeon.items.ron".into(),
            layout_path: "data/dungeon.layout.ron".into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub slot_size: f32,
    pub columns: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            slot_size: 56.0,
            columns: 5,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: GameConfig = toml::from_str(s).context("解析 game.toml 失败")?;
        Ok(config.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件 {} 失败", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// 读不到或解析失败时退回默认配置，不中断启动
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("使用默认配置: {err:#}");
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        if self.inventory.capacity == 0 {
            warn!("inventory.capacity 不能为 0，改为 1");
            self.inventory.capacity = 1;
        }
        if self.ui.columns == 0 {
            self.ui.columns = 1;
        }
        self.pickup.capture_radius = self.pickup.capture_radius.max(0.0);
        self
    }
}
