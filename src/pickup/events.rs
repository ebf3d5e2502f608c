use bevy::prelude::*;

/// 在世界中放置一个拾取物；position 为地面坐标
#[derive(Event, Debug, Clone)]
pub struct SpawnPickup {
    pub item_id: String,
    pub quantity: u32,
    pub position: Vec3,
}

/// 拾取物被背包完整收下
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PickupCollected {
    pub item_id: String,
    pub quantity: u32,
}

/// 移除场景中所有拾取物
#[derive(Event)]
pub struct ClearPickups;

/// 某物品的图标贴图已就绪
#[derive(Event, Debug, Clone)]
pub struct IconReady {
    pub item_id: String,
    pub material: Handle<StandardMaterial>,
}
