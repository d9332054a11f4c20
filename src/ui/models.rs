//! Slint models built from the resolved configuration.

use super::grid;
use super::icons::load_icon;
use super::{LauncherData, TabData};
use crate::config::{AppConfig, ButtonSpec, Size, TabSpec};
use crate::launch::LauncherId;
use ki_apps::IconResolver;
use log::debug;
use slint::{Model, ModelRc, VecModel};
use std::rc::Rc;

const TAB_ICON_SIZE: Size = Size::new(32, 32);

/// The tab model plus each tab's launcher model, kept so single buttons can
/// be updated in place.
pub struct TabModels {
    tabs: Rc<VecModel<TabData>>,
    launchers: Vec<Rc<VecModel<LauncherData>>>,
    commands: Vec<Vec<String>>,
}

impl TabModels {
    pub fn build(config: &AppConfig, resolver: &IconResolver) -> Self {
        let mut tabs = Vec::with_capacity(config.tabs.len());
        let mut launchers = Vec::with_capacity(config.tabs.len());
        let mut commands = Vec::with_capacity(config.tabs.len());

        for spec in &config.tabs {
            let model = Rc::new(VecModel::from(launcher_rows(spec, resolver)));
            tabs.push(tab_row(spec, resolver, &model));
            launchers.push(model);
            commands.push(spec.launchers.iter().map(|b| b.command.clone()).collect());
        }

        Self {
            tabs: Rc::new(VecModel::from(tabs)),
            launchers,
            commands,
        }
    }

    pub fn model(&self) -> ModelRc<TabData> {
        ModelRc::from(self.tabs.clone())
    }

    pub fn command(&self, id: LauncherId) -> Option<&str> {
        self.commands.get(id.tab)?.get(id.index).map(String::as_str)
    }

    /// Toggle the running look of one button.
    pub fn set_running(&self, id: LauncherId, running: bool) {
        let Some(model) = self.launchers.get(id.tab) else {
            return;
        };
        if let Some(mut row) = model.row_data(id.index) {
            row.running = running;
            model.set_row_data(id.index, row);
        }
    }
}

fn tab_row(spec: &TabSpec, resolver: &IconResolver, launchers: &Rc<VecModel<LauncherData>>) -> TabData {
    let sizes: Vec<Size> = spec.launchers.iter().map(|b| b.launcher_size).collect();
    let grid = grid::layout(&sizes, spec.launchers_per_row);
    // Tab icons never trigger the recursive search.
    let icon = spec
        .icon
        .as_deref()
        .and_then(|name| load_icon(resolver, name, false, TAB_ICON_SIZE));
    debug!(
        "Tab \"{}\": {} launchers in a {}x{} grid",
        spec.name,
        spec.launchers.len(),
        grid.width,
        grid.height
    );

    TabData {
        name: spec.name.as_str().into(),
        description: spec.description.as_str().into(),
        has_icon: icon.is_some(),
        icon: icon.unwrap_or_default(),
        content_width: grid.width,
        content_height: grid.height,
        launchers: ModelRc::from(launchers.clone()),
    }
}

fn launcher_rows(spec: &TabSpec, resolver: &IconResolver) -> Vec<LauncherData> {
    let sizes: Vec<Size> = spec.launchers.iter().map(|b| b.launcher_size).collect();
    let grid = grid::layout(&sizes, spec.launchers_per_row);

    spec.launchers
        .iter()
        .zip(grid.cells)
        .map(|(button, cell)| launcher_row(button, resolver, cell))
        .collect()
}

fn launcher_row(button: &ButtonSpec, resolver: &IconResolver, cell: grid::Placement) -> LauncherData {
    let icon = load_icon(
        resolver,
        &button.icon,
        button.aggressive_icon_search,
        button.icon_size,
    );

    LauncherData {
        name: button.name.as_str().into(),
        comment: button.comment.as_str().into(),
        has_icon: icon.is_some(),
        icon: icon.unwrap_or_default(),
        icon_width: button.icon_size.width as f32,
        icon_height: button.icon_size.height as f32,
        pos_x: cell.x,
        pos_y: cell.y,
        cell_width: button.launcher_size.width as f32,
        cell_height: button.launcher_size.height as f32,
        running: false,
    }
}
