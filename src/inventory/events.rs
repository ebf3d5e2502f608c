use bevy::prelude::*;

/// 控制台 give：尽量放入背包
#[derive(Event, Debug, Clone)]
pub struct GiveItemEvent {
    pub id: String,
    pub count: u32,
}

/// 让 CLI 请求打印背包
#[derive(Event)]
pub struct ListInventoryEvent;

/// 背包内容发生变化，UI 据此重绘
#[derive(Event, Debug, Clone, Default)]
pub struct InventoryChanged;
