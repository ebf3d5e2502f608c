use bevy::prelude::*;

/// 游戏运行的大状态
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Startup,
    /// 等待物品表 / 地牢布局加载
    Loading,
    InGame,
    Shutdown,
}
