//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印

use bevy::app::AppExit;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::{events::LogEvent, resources::GameConfig, states::AppState};
use crate::data::catalog::ItemCatalog;
use crate::dungeon::{components::grid_to_world, events::TeleportPlayer};
use crate::inventory::{
    components::Inventory,
    events::{GiveItemEvent, ListInventoryEvent},
};
use crate::pickup::{
    events::{ClearPickups, SpawnPickup},
    systems::PickupField,
};
use crate::ui::systems::ToggleInventoryUi;

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match buffer.lock() {
                        Ok(mut buf) => buf.push_back(line.to_string()),
                        Err(_) => break,
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands
                    .after(read_stdin)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Give { id: String, count: u32 },
    Inventory,
    Dump,
    Teleport { x: f32, z: f32 },
    Spawn { id: String, quantity: u32, grid_x: i32, grid_z: i32 },
    Pickups(Option<String>),
    Clear,
    ToggleUi,
    Invalid(&'static str),
    Unsupported(String),
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

const HELP: &str = "命令列表:
  help                          查看帮助
  status                        查看当前状态
  exit / quit                   退出程序
  items                         列出所有物品
  items <token>                 用 id / uuid / 名称 查询单个物品
  give <id> [count]             给予物品（放不下的部分丢弃）
  inventory                     查看物品栏
  dump                          以 JSON 输出物品栏
  tp <x> <z>                    移动玩家
  spawn <id> <qty> <gx> <gz>    在格子上放置拾取物
  pickups [id]                  地上剩余拾取物数量
  clear                         清除所有拾取物
  ui                            显示 / 隐藏物品栏界面
";

fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    catalog: Res<ItemCatalog>,
    inventory: Res<Inventory>,
    config: Res<GameConfig>,
    field: PickupField,
    mut ev_give: EventWriter<GiveItemEvent>,
    mut ev_list: EventWriter<ListInventoryEvent>,
    mut ev_tp: EventWriter<TeleportPlayer>,
    mut ev_spawn: EventWriter<SpawnPickup>,
    mut ev_clear: EventWriter<ClearPickups>,
    mut ev_toggle: EventWriter<ToggleInventoryUi>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(HELP.into()));
            }

            Command::Status => {
                log.write(LogEvent(format!(
                    "State: {:?}, Items Loaded: {}, Slots: {}/{}, Pickups: {}",
                    state.get(),
                    catalog.len(),
                    inventory.used_slots(),
                    inventory.capacity(),
                    field.active_count(),
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Items(None) => {
                for entry in catalog.iter() {
                    log.write(LogEvent(format!(
                        "{} | {} | {} | stack {}",
                        uuid_from_id(&entry.id),
                        entry.id,
                        entry.name,
                        entry.max_stack
                    )));
                }
            }

            Command::Items(Some(token)) => {
                // 按三种字段匹配
                let found = catalog.iter().find(|e| {
                    e.id.eq_ignore_ascii_case(&token)
                        || e.name.eq_ignore_ascii_case(&token)
                        || uuid_from_id(&e.id).to_string() == token
                });
                match found {
                    Some(e) => {
                        log.write(LogEvent(format!(
                            "==================================================
UUID  : {}
ID    : {}
Name  : {}
Stack : {}
Icon  : {}
Desc  : {}
Held  : {}
==================================================",
                            uuid_from_id(&e.id),
                            e.id,
                            e.name,
                            e.max_stack,
                            e.icon,
                            e.description,
                            inventory.count_of(&e.id)
                        )));
                    }
                    None => {
                        log.write(LogEvent("未找到匹配物品".into()));
                    }
                }
            }

            Command::Give { id, count } => {
                ev_give.write(GiveItemEvent { id, count });
            }

            Command::Inventory => {
                ev_list.write(ListInventoryEvent);
            }

            Command::Dump => match serde_json::to_string_pretty(&inventory.snapshot()) {
                Ok(json) => {
                    log.write(LogEvent(json));
                }
                Err(err) => {
                    error!("序列化物品栏失败: {err}");
                }
            },

            Command::Teleport { x, z } => {
                ev_tp.write(TeleportPlayer { x, z });
            }

            Command::Spawn {
                id,
                quantity,
                grid_x,
                grid_z,
            } => {
                ev_spawn.write(SpawnPickup {
                    item_id: id,
                    quantity,
                    position: grid_to_world(grid_x, grid_z, config.dungeon.cell_size),
                });
            }

            Command::Pickups(None) => {
                log.write(LogEvent(format!("地上剩余拾取物: {}", field.active_count())));
            }

            Command::Pickups(Some(id)) => {
                log.write(LogEvent(format!(
                    "地上剩余 {id}: {}",
                    field.pending_quantity(&id)
                )));
            }

            Command::Clear => {
                ev_clear.write(ClearPickups);
            }

            Command::ToggleUi => {
                ev_toggle.write(ToggleInventoryUi);
            }

            Command::Invalid(usage) => {
                log.write(LogEvent(format!("参数错误，用法: {usage}")));
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Items(token)
        }
        "give" => {
            let id = parts.next().unwrap_or("").to_string();
            let cnt = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Give { id, count: cnt }
        }
        "inventory" | "inv" => Command::Inventory,
        "dump" => Command::Dump,
        "tp" | "teleport" => {
            let x = parts.next().and_then(|s| s.parse().ok());
            let z = parts.next().and_then(|s| s.parse().ok());
            match (x, z) {
                (Some(x), Some(z)) => Command::Teleport { x, z },
                _ => Command::Invalid("tp <x> <z>"),
            }
        }
        "spawn" => {
            let id = parts.next().map(str::to_string);
            let quantity = parts.next().and_then(|s| s.parse().ok());
            let grid_x = parts.next().and_then(|s| s.parse().ok());
            let grid_z = parts.next().and_then(|s| s.parse().ok());
            match (id, quantity, grid_x, grid_z) {
                (Some(id), Some(quantity), Some(grid_x), Some(grid_z)) => Command::Spawn {
                    id,
                    quantity,
                    grid_x,
                    grid_z,
                },
                _ => Command::Invalid("spawn <id> <qty> <gx> <gz>"),
            }
        }
        "pickups" | "p" => Command::Pickups(parts.next().map(|s| s.to_string())),
        "clear" => Command::Clear,
        "ui" => Command::ToggleUi,
        other => Command::Unsupported(other.into()),
    }
}

fn uuid_from_id(id: &str) -> Uuid {
    // 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}
