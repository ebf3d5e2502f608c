use super::view::{project, InventoryView, SlotView};
use crate::core::resources::GameConfig;
use crate::data::catalog::ItemCatalog;
use crate::inventory::{components::Inventory, events::InventoryChanged};
use bevy::prelude::*;

/// 背包界面显示状态，只有两种
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventoryUiVisibility {
    #[default]
    Shown,
    Hidden,
}

impl InventoryUiVisibility {
    pub fn toggled(self) -> Self {
        match self {
            Self::Shown => Self::Hidden,
            Self::Hidden => Self::Shown,
        }
    }

    pub fn display(self) -> Display {
        match self {
            Self::Shown => Display::Flex,
            Self::Hidden => Display::None,
        }
    }
}

/// 切换背包界面（来自 CLI 的 ui 命令）
#[derive(Event)]
pub struct ToggleInventoryUi;

/// 界面根节点，启动时创建一次
#[derive(Component)]
pub struct InventoryUiRoot;

/// 格子容器，每次重绘时清空重建其子节点
#[derive(Component)]
pub struct InventoryGrid;

const GAP: f32 = 4.0;
const PADDING: f32 = 8.0;

pub fn spawn_inventory_ui(mut commands: Commands, config: Res<GameConfig>) {
    let grid_width = config.ui.columns as f32 * (config.ui.slot_size + GAP) - GAP;

    commands
        .spawn((
            Name::new("inventory_ui"),
            InventoryUiRoot,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                left: Val::Px(16.0),
                padding: UiRect::all(Val::Px(PADDING)),
                display: InventoryUiVisibility::default().display(),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.75)),
        ))
        .with_children(|root| {
            root.spawn((
                InventoryGrid,
                Node {
                    width: Val::Px(grid_width),
                    flex_wrap: FlexWrap::Wrap,
                    column_gap: Val::Px(GAP),
                    row_gap: Val::Px(GAP),
                    ..default()
                },
            ));
        });
}

/// 背包变化后按投影结果整体重绘；首次进入游戏时也画一次
pub fn render_inventory_ui(
    mut commands: Commands,
    mut ev_changed: EventReader<InventoryChanged>,
    mut drawn: Local<bool>,
    inventory: Res<Inventory>,
    catalog: Res<ItemCatalog>,
    config: Res<GameConfig>,
    asset_server: Res<AssetServer>,
    grid: Query<Entity, With<InventoryGrid>>,
) {
    if ev_changed.is_empty() && *drawn {
        return;
    }
    ev_changed.clear();

    let Ok(grid) = grid.single() else {
        return;
    };
    *drawn = true;

    let view = project(&inventory, &catalog);
    commands.entity(grid).despawn_related::<Children>();
    spawn_cells(&mut commands, grid, &view, config.ui.slot_size, &asset_server);
}

fn spawn_cells(
    commands: &mut Commands,
    grid: Entity,
    view: &InventoryView,
    slot_size: f32,
    asset_server: &AssetServer,
) {
    commands.entity(grid).with_children(|grid| {
        for cell in &view.cells {
            let label = match cell {
                SlotView::Filled { item_id, .. } => format!("slot:{item_id}"),
                SlotView::Empty => "slot:empty".to_string(),
            };
            let mut slot = grid.spawn((
                Name::new(label),
                Node {
                    width: Val::Px(slot_size),
                    height: Val::Px(slot_size),
                    justify_content: JustifyContent::FlexEnd,
                    align_items: AlignItems::FlexEnd,
                    padding: UiRect::all(Val::Px(3.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.2, 0.2, 0.25, 0.9)),
            ));

            let SlotView::Filled {
                name,
                icon,
                count_label,
                ..
            } = cell
            else {
                continue;
            };

            slot.with_children(|slot| {
                if icon.is_empty() {
                    // 没有图标时用名字首字母占位
                    let initial = name.chars().next().map(String::from).unwrap_or_default();
                    slot.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(6.0),
                            top: Val::Px(4.0),
                            ..default()
                        },
                        Text::new(initial),
                        TextFont {
                            font_size: slot_size * 0.5,
                            ..default()
                        },
                    ));
                } else {
                    slot.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        ImageNode::new(asset_server.load(icon.clone())),
                    ));
                }

                if let Some(label) = count_label {
                    slot.spawn((
                        Text::new(label.clone()),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                }
            });
        }
    });
}

/// I 键或 ToggleInventoryUi 事件切换显示，不影响背包数据
pub fn toggle_inventory_ui(
    keys: Res<ButtonInput<KeyCode>>,
    mut ev_toggle: EventReader<ToggleInventoryUi>,
    mut visibility: ResMut<InventoryUiVisibility>,
    mut root: Query<&mut Node, With<InventoryUiRoot>>,
) {
    let mut flips = ev_toggle.read().count();
    if keys.just_pressed(KeyCode::KeyI) {
        flips += 1;
    }
    if flips % 2 == 0 {
        return;
    }

    *visibility = visibility.toggled();
    for mut node in &mut root {
        node.display = visibility.display();
    }
    debug!("背包界面: {:?}", *visibility);
}
