use bevy::prelude::*;

pub mod events;
pub mod resources;
pub mod states;

/// 默认配置文件位置（相对工作目录）
pub const CONFIG_PATH: &str = "assets/config/game.toml";

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        let config = resources::GameConfig::load_or_default(CONFIG_PATH);

        // 插件首次载入时，插入初始 State
        app.init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .insert_resource(config);
    }
}
