use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::core::resources::PickupConfig;

/// 地上的拾取物
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Transform, Visibility)]
pub struct PickupMarker {
    pub item_id: String,
    pub quantity: u32,
    /// 动画基准点（已含离地高度）
    pub anchor: Vec3,
    /// 动画相位偏移，避免所有标记同步上下浮动
    pub phase: f32,
    /// 玩家在范围内但背包拒收，仅用于避免重复提示
    pub blocked: bool,
}

impl PickupMarker {
    pub fn new(item_id: impl Into<String>, quantity: u32, anchor: Vec3) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            anchor,
            phase: phase_for(anchor),
            blocked: false,
        }
    }

    /// 严格小于拾取半径才算进入
    pub fn within_capture(&self, player: Vec3, radius: f32) -> bool {
        planar_distance(self.anchor, player) < radius
    }

    /// 当前帧的位移与缩放，纯表现
    pub fn animated_transform(&self, elapsed: f32, cfg: &PickupConfig) -> Transform {
        Transform::from_translation(self.anchor + Vec3::Y * bob_offset(elapsed, self.phase, cfg))
            .with_scale(Vec3::splat(pulse_scale(elapsed, self.phase, cfg)))
    }
}

/// 由位置确定的相位，同一位置总是得到同一值
pub fn phase_for(position: Vec3) -> f32 {
    let h = (position.x * 12.9898 + position.z * 78.233).sin() * 43758.545;
    h.fract().abs() * TAU
}

pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.xz().distance(b.xz())
}

pub fn bob_offset(elapsed: f32, phase: f32, cfg: &PickupConfig) -> f32 {
    (elapsed * cfg.bob_speed + phase).sin() * cfg.bob_height
}

pub fn pulse_scale(elapsed: f32, phase: f32, cfg: &PickupConfig) -> f32 {
    1.0 + (elapsed * cfg.pulse_speed + phase).sin() * cfg.pulse_amount
}
