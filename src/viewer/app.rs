//! Main application state and UI

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use egui::{CentralPanel, Color32, RichText, SidePanel, TextureHandle, TopBottomPanel};
use tracing::{info_span, warn};

use crate::icons::{Icon, IconCache};
use crate::lister::{preset_to_scene, scene_to_preset, DiffMode, LightLister};
use crate::preset::{PresetDocument, PRESET_EXTENSION};
use crate::scene::{MemoryScene, SceneHost};
use crate::settings::Settings;
use crate::status::Status;
use crate::table::{Column, LightTable, SortOrder};

/// Row height in the light table.
const ROW_HEIGHT: f32 = 24.0;

/// Width reported for the list/attribute splitter handle.
const SPLITTER_HANDLE_WIDTH: f32 = 4.0;

/// Copy of a visible row, so the table is not borrowed while drawing.
struct RowView {
    path: String,
    display_name: String,
    light_type: String,
    status: Status,
    type_icon: Icon,
    status_icon: Icon,
}

/// Light list panel
pub struct LightListerApp {
    settings: Settings,

    // Scene state
    scene: MemoryScene,
    scene_path: Option<PathBuf>,
    pending_scene: Option<PathBuf>,
    lister: LightLister,

    // Preset state
    preset: PresetDocument,

    // Table state
    table: LightTable,
    textures: HashMap<String, TextureHandle>,
    filter: String,
    selected: Option<String>,

    // UI state
    status_message: String,
    was_focused: bool,
    _trace_guard: Option<tracing_chrome::FlushGuard>,
}

impl LightListerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: Settings,
        initial_scene: Option<PathBuf>,
        trace_guard: Option<tracing_chrome::FlushGuard>,
    ) -> Self {
        let icons = Arc::new(IconCache::with_scale(
            settings.icon_dir(None),
            settings.icon_scale,
        ));
        let mut table = LightTable::new(icons);
        table.layout_mut().splitter_moved(
            settings.window_width - settings.attribute_panel_width,
            SPLITTER_HANDLE_WIDTH,
        );

        // Use last scene if none was given
        let pending_scene = initial_scene.or_else(|| settings.last_scene.clone());

        let mut preset = PresetDocument::new();
        let mut status_message = String::from("Ready");
        if let Some(path) = settings.last_preset.clone().filter(|p| p.exists()) {
            match preset.load(&path) {
                Ok(()) => status_message = format!("Preset: {}", path.display()),
                Err(e) => warn!("Cannot restore preset {}: {}", path.display(), e),
            }
        }

        let lister = LightLister::new(settings.diff_mode());

        Self {
            settings,
            scene: MemoryScene::new(),
            scene_path: None,
            pending_scene,
            lister,
            preset,
            table,
            textures: HashMap::new(),
            filter: String::new(),
            selected: None,
            status_message,
            was_focused: false,
            _trace_guard: trace_guard,
        }
    }

    /// Re-query the scene and rebuild the table
    fn refresh(&mut self) {
        let _span = info_span!("refresh").entered();
        if let Err(e) = self.lister.refresh(&self.scene) {
            self.scene.warn(&format!("Cannot list lights: {}", e));
            self.status_message = format!("Refresh failed: {}", e);
            return;
        }
        self.table.populate(self.lister.rows(self.preset.preset()));
        self.table.apply_filter(&self.filter);
        if let Some(path) = &self.selected {
            if self.table.find(path).is_none() {
                self.selected = None;
            }
        }
    }

    /// Texture for an icon, uploaded once per icon name
    fn texture(&mut self, ctx: &egui::Context, icon: &Icon) -> egui::TextureId {
        self.textures
            .entry(icon.name().to_string())
            .or_insert_with(|| {
                let size = [icon.width() as usize, icon.height() as usize];
                let image = egui::ColorImage::from_rgba_unmultiplied(size, icon.rgba());
                ctx.load_texture(icon.name(), image, egui::TextureOptions::LINEAR)
            })
            .id()
    }

    // Scene files

    fn open_scene_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Scene description", &["json"])
            .pick_file()
        {
            self.pending_scene = Some(path);
        }
    }

    fn load_scene(&mut self, path: PathBuf) {
        match MemoryScene::load(&path) {
            Ok(scene) => {
                self.scene = scene;
                self.status_message = format!("Scene: {}", path.display());
                self.settings.last_scene = Some(path.clone());
                self.settings.save();
                self.scene_path = Some(path);
                self.refresh();
            }
            Err(e) => {
                self.status_message = format!("Cannot open {}: {}", path.display(), e);
            }
        }
    }

    fn save_scene(&mut self) {
        let path = match self.scene_path.clone() {
            Some(path) => path,
            None => match rfd::FileDialog::new()
                .add_filter("Scene description", &["json"])
                .save_file()
            {
                Some(path) => path,
                None => return,
            },
        };
        match self.scene.save(&path) {
            Ok(()) => {
                self.status_message = format!("Saved scene {}", path.display());
                self.scene_path = Some(path);
            }
            Err(e) => self.status_message = format!("Cannot save scene: {}", e),
        }
    }

    // Preset files

    fn preset_dialog() -> rfd::FileDialog {
        rfd::FileDialog::new().add_filter("Light preset", &[PRESET_EXTENSION, "json"])
    }

    fn load_preset(&mut self, path: PathBuf) {
        match self.preset.load(&path) {
            Ok(()) => {
                self.status_message = format!("Preset: {}", path.display());
                self.settings.add_recent_preset(path);
                self.settings.save();
                self.refresh();
            }
            Err(e) => self.status_message = format!("Cannot load {}: {}", path.display(), e),
        }
    }

    fn unload_preset(&mut self) {
        self.preset.unload();
        self.settings.last_preset = None;
        self.settings.save();
        self.status_message = "Preset unloaded".into();
        self.refresh();
    }

    fn reload_preset(&mut self) {
        match self.preset.reload() {
            Ok(()) => {
                self.status_message = "Preset reloaded".into();
                self.refresh();
            }
            Err(e) => self.status_message = format!("Cannot reload: {}", e),
        }
    }

    fn save_preset(&mut self) {
        if !self.preset.is_loaded() {
            self.save_preset_as();
            return;
        }
        match self.preset.save() {
            Ok(()) => self.status_message = "Preset saved".into(),
            Err(e) => self.status_message = format!("Cannot save: {}", e),
        }
    }

    fn save_preset_as(&mut self) {
        let Some(path) = Self::preset_dialog().save_file() else {
            return;
        };
        let path = if path.extension().is_none() {
            path.with_extension(PRESET_EXTENSION)
        } else {
            path
        };
        match self.preset.save_as(&path) {
            Ok(()) => {
                self.status_message = format!("Saved {}", path.display());
                self.settings.add_recent_preset(path);
                self.settings.save();
            }
            Err(e) => self.status_message = format!("Cannot save: {}", e),
        }
    }

    // Sync

    fn sync_scene_to_preset(&mut self) {
        let changed = scene_to_preset(self.lister.lights(), self.preset.preset_mut());
        self.status_message = format!("Scene -> Preset: {} entries changed", changed);
        self.refresh();
    }

    fn sync_preset_to_scene(&mut self) {
        match preset_to_scene(self.preset.preset(), self.lister.lights(), &mut self.scene) {
            Ok(created) => {
                self.status_message = format!("Preset -> Scene: {} lights created", created.len());
                self.refresh();
            }
            Err(e) => self.status_message = format!("Preset -> Scene failed: {}", e),
        }
    }

    fn sort_on(&mut self, column: Column) {
        let order = match self.table.sort() {
            Some((current, order)) if current == column => order.toggled(),
            _ => SortOrder::Ascending,
        };
        self.table.sort_by(column, order);
    }

    fn rerender_icons(&mut self) {
        let dir = self.table.icons().dir().to_path_buf();
        let icons = Arc::new(IconCache::with_scale(dir, self.settings.icon_scale));
        if let Err(e) = icons.render_all() {
            self.status_message = format!("Cannot render icons: {}", e);
            return;
        }
        let layout = *self.table.layout();
        let sort = self.table.sort();
        self.table = LightTable::new(icons);
        *self.table.layout_mut() = layout;
        self.textures.clear();
        self.refresh();
        if let Some((column, order)) = sort {
            self.table.sort_by(column, order);
        }
        self.status_message = "Icons re-rendered".into();
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        // Collect recent presets to avoid borrow issues
        let recent: Vec<PathBuf> = self.settings.recent_presets().into_iter().cloned().collect();
        let has_preset = self.preset.is_loaded();

        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("Light Preset", |ui| {
                if ui.button("Load...").clicked() {
                    if let Some(path) = Self::preset_dialog().pick_file() {
                        self.load_preset(path);
                    }
                    ui.close();
                }
                if ui.add_enabled(has_preset, egui::Button::new("Unload")).clicked() {
                    self.unload_preset();
                    ui.close();
                }
                if ui.button("Save").clicked() {
                    self.save_preset();
                    ui.close();
                }
                if ui.button("Save As...").clicked() {
                    self.save_preset_as();
                    ui.close();
                }

                // Recent presets submenu
                if !recent.is_empty() {
                    ui.menu_button("Recent", |ui| {
                        for path in &recent {
                            if ui.button(path.display().to_string()).clicked() {
                                self.load_preset(path.clone());
                                ui.close();
                            }
                        }
                        ui.separator();
                        if ui.button("Clear Recent").clicked() {
                            self.settings.recent_presets.clear();
                            self.settings.save();
                            ui.close();
                        }
                    });
                }

                if ui.add_enabled(has_preset, egui::Button::new("Reload")).clicked() {
                    self.reload_preset();
                    ui.close();
                }

                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Scene", |ui| {
                if ui.button("Open...").clicked() {
                    self.open_scene_dialog();
                    ui.close();
                }
                if ui.button("Save").clicked() {
                    self.save_scene();
                    ui.close();
                }
                if ui.button("Refresh").clicked() {
                    self.refresh();
                    ui.close();
                }
            });

            ui.menu_button("Sync", |ui| {
                if ui.button("Scene -> Preset").clicked() {
                    self.sync_scene_to_preset();
                    ui.close();
                }
                if ui.button("Preset -> Scene").clicked() {
                    self.sync_preset_to_scene();
                    ui.close();
                }
            });

            ui.menu_button("Sort", |ui| {
                if ui.button("By Type").clicked() {
                    self.sort_on(Column::Type);
                    ui.close();
                }
                if ui.button("By Name").clicked() {
                    self.sort_on(Column::Name);
                    ui.close();
                }
                if ui.button("By Status").clicked() {
                    self.sort_on(Column::Status);
                    ui.close();
                }
            });

            ui.menu_button("Preferences", |ui| {
                if ui.checkbox(&mut self.settings.legacy_diff, "Legacy diff").changed() {
                    let mode = self.settings.diff_mode();
                    self.lister.set_mode(mode);
                    self.settings.save();
                    self.status_message = match mode {
                        DiffMode::Legacy => "Legacy diff".into(),
                        DiffMode::Reconcile => "Reconcile diff".into(),
                    };
                    self.refresh();
                }
                if ui.button("Re-render Icons").clicked() {
                    self.rerender_icons();
                    ui.close();
                }
            });
        });
    }

    /// Light table with filter box
    fn list_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Filter:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.filter)
                    .hint_text("grp key")
                    .desired_width(ui.available_width() - 70.0),
            );
            if response.changed() {
                self.table.apply_filter(&self.filter);
            }
            if ui.button("⟳ Refresh").clicked() {
                self.refresh();
            }
        });
        ui.separator();

        let widths = self.table.layout().widths();
        let sort = self.table.sort();
        let selected = self.selected.clone();
        let rows: Vec<RowView> = self
            .table
            .visible_rows()
            .map(|(_, r)| RowView {
                path: r.row.path.clone(),
                display_name: r.row.display_name.clone(),
                light_type: r.row.light_type.clone(),
                status: r.row.status,
                type_icon: r.type_icon.clone(),
                status_icon: r.status_icon.clone(),
            })
            .collect();

        let mut sort_clicked = None;
        let mut select_clicked = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("light_table")
                .num_columns(3)
                .striped(true)
                .min_row_height(ROW_HEIGHT)
                .show(ui, |ui| {
                    for (column, title) in Column::ALL.iter().zip(["", "Light", ""]) {
                        let arrow = match sort {
                            Some((c, SortOrder::Ascending)) if c == *column => " ▲",
                            Some((c, SortOrder::Descending)) if c == *column => " ▼",
                            _ => "",
                        };
                        let clicked = ui
                            .scope(|ui| {
                                ui.set_width(widths[column.index()]);
                                ui.add(egui::Button::new(format!("{}{}", title, arrow)).frame(false))
                            })
                            .inner
                            .clicked();
                        if clicked {
                            sort_clicked = Some(*column);
                        }
                    }
                    ui.end_row();

                    for row in &rows {
                        let type_tex = self.texture(ctx, &row.type_icon);
                        let status_tex = self.texture(ctx, &row.status_icon);

                        ui.scope(|ui| {
                            ui.set_width(widths[0]);
                            ui.add(egui::Image::new((type_tex, icon_size(&row.type_icon))))
                                .on_hover_text(row.light_type.as_str());
                        });
                        let is_selected = selected.as_deref() == Some(row.path.as_str());
                        let clicked = ui
                            .scope(|ui| {
                                ui.set_width(widths[1]);
                                ui.selectable_label(is_selected, row.display_name.as_str())
                            })
                            .inner
                            .clicked();
                        if clicked {
                            select_clicked = Some(row.path.clone());
                        }
                        ui.scope(|ui| {
                            ui.set_width(widths[2]);
                            ui.add(egui::Image::new((status_tex, icon_size(&row.status_icon))))
                                .on_hover_text(row.status.to_string());
                        });
                        ui.end_row();
                    }
                });
        });

        if let Some(column) = sort_clicked {
            self.sort_on(column);
        }
        if let Some(path) = select_clicked {
            self.selected = Some(path);
        }
    }

    /// Attributes of the selected light
    fn attribute_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Attributes");
        ui.separator();

        let Some(index) = self.selected.as_deref().and_then(|p| self.table.find(p)) else {
            ui.label("No light selected");
            return;
        };
        let Some(row) = self.table.row(index) else {
            return;
        };
        let row = &row.row;
        let preset_type = self.preset.preset().get(&row.path).map(|e| e.light_type.clone());

        egui::Grid::new("attributes").num_columns(2).show(ui, |ui| {
            ui.label("Path:");
            ui.label(&row.path);
            ui.end_row();

            ui.label("Shape:");
            ui.label(row.shape.as_deref().unwrap_or("-"));
            ui.end_row();

            ui.label("Type:");
            ui.label(&row.light_type);
            ui.end_row();

            ui.label("Preset type:");
            ui.label(preset_type.as_deref().unwrap_or("-"));
            ui.end_row();

            ui.label("Status:");
            ui.label(RichText::new(row.status.to_string()).color(status_color(row.status)));
            ui.end_row();
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.status_message);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let shown = self.table.visible_rows().count();
                let total = self.table.rows().count();
                ui.label(format!("{}/{} lights", shown, total));
            });
        });
    }
}

fn icon_size(icon: &Icon) -> egui::Vec2 {
    egui::vec2(icon.width() as f32, icon.height() as f32)
}

fn status_color(status: Status) -> Color32 {
    match status {
        Status::Found => Color32::GREEN,
        Status::Outdated => Color32::YELLOW,
        Status::Add => Color32::WHITE,
        Status::Missing => Color32::RED,
        Status::Undefined => Color32::GRAY,
    }
}

impl eframe::App for LightListerApp {
    fn on_exit(&mut self) {
        self.settings.save();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let _span = info_span!("panel_update").entered();

        // Load pending scene (from CLI argument, last session or dialog)
        if let Some(path) = self.pending_scene.take() {
            self.load_scene(path);
        }

        // Window activation refreshes the list
        let focused = ctx.input(|i| i.viewport().focused.unwrap_or(false));
        if focused && !self.was_focused {
            self.refresh();
        }
        self.was_focused = focused;

        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ctx, ui);
        });

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar(ui);
        });

        // Right panel - attributes; its width drives the name column
        let response = SidePanel::right("attribute_panel")
            .default_width(self.settings.attribute_panel_width)
            .min_width(120.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.attribute_panel(ui);
            });
        let panel_width = response.response.rect.width();
        if panel_width != self.settings.attribute_panel_width {
            self.settings.attribute_panel_width = panel_width;
            let list_width = response.response.rect.left();
            self.table
                .layout_mut()
                .splitter_moved(list_width, SPLITTER_HANDLE_WIDTH);
        }

        CentralPanel::default().show(ctx, |ui| {
            self.list_panel(ctx, ui);
        });

        // Track window size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().inner_rect {
                self.settings.window_width = rect.width();
                self.settings.window_height = rect.height();
            }
        });
    }
}
