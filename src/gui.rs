use crate::statics;
use crate::{AppIdentity, SettingsError, SettingsStore, settings_path};
use anyhow::Context;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};

pub fn run_gui() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            let mut app = FlatiniApp {
                theme_dark: true,
                ..Default::default()
            };
            app.load_prefs();
            if !app.theme_dark {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }
            Ok(Box::new(app))
        }),
    )
}

/// An open settings file: the store plus the bookkeeping needed for
/// dirty tracking against the last loaded/saved contents.
struct OpenDoc {
    store: SettingsStore,
    source_path: Option<PathBuf>,
    saved_text: String,
    dirty: bool,
}

impl OpenDoc {
    fn empty() -> Self {
        Self {
            store: SettingsStore::new(),
            source_path: None,
            saved_text: String::new(),
            dirty: false,
        }
    }

    fn open(path: &Path) -> anyhow::Result<Self> {
        let mut store = SettingsStore::new();
        store
            .load_path(path)
            .with_context(|| format!("reading {path:?}"))?;
        let saved_text = store.to_text();
        Ok(Self {
            store,
            source_path: Some(path.to_path_buf()),
            saved_text,
            dirty: false,
        })
    }

    fn save_to(&mut self, path: &Path) -> anyhow::Result<()> {
        self.store
            .save_path(path)
            .with_context(|| format!("writing {path:?}"))?;
        self.source_path = Some(path.to_path_buf());
        self.saved_text = self.store.to_text();
        self.dirty = false;
        Ok(())
    }

    /// Recompute `dirty` by comparing the current serialized text to the
    /// last loaded/saved text. This is how Undo/Redo can clear "dirty"
    /// when changes are undone.
    fn refresh_dirty(&mut self) {
        self.dirty = self.store.to_text() != self.saved_text;
    }
}

/// The main application state and GUI logic.
/// Stores the open document (owned), UI state (selection, filter), and
/// editor buffers.
#[derive(Default)]
struct FlatiniApp {
    doc: Option<OpenDoc>,
    dialog_dir: Option<PathBuf>,
    selected_key: Option<String>,
    edit_buffer: String,
    filter: String,
    status: String,
    last_error: Option<String>,

    // Buffers for the add-entry row.
    add_key: String,
    add_value: String,

    // Undo/Redo + change descriptions.
    undo_stack: Vec<EditAction>,
    redo_stack: Vec<EditAction>,

    // About dialog.
    about_open: bool,

    // Theme.
    theme_dark: bool,
}

#[derive(Clone, Debug)]
struct EditAction {
    key: String,
    before: Option<String>,
    after: Option<String>,
    description: String,
}

impl FlatiniApp {
    fn prefs_identity() -> AppIdentity {
        AppIdentity::new(statics::EDITOR_ORGANIZATION, statics::EDITOR_PRODUCT)
    }

    /// Editor preferences live in a settings file of their own, at the
    /// location the library resolves for the editor's identity.
    fn load_prefs(&mut self) {
        match Self::try_load_prefs() {
            Ok(prefs) => {
                if let Some(theme) = prefs.get(statics::PREF_THEME) {
                    self.theme_dark = theme != statics::PREF_THEME_LIGHT;
                }
                if let Some(dir) = prefs.get(statics::PREF_LAST_DIR) {
                    self.dialog_dir = Some(PathBuf::from(dir));
                }
            }
            Err(e) => {
                self.status = format!("Preferences not loaded: {e:#}");
            }
        }
    }

    fn try_load_prefs() -> anyhow::Result<SettingsStore> {
        let path = settings_path(&Self::prefs_identity())?;
        let mut prefs = SettingsStore::new();
        prefs
            .load_path(&path)
            .with_context(|| format!("reading {path:?}"))?;
        Ok(prefs)
    }

    fn persist_prefs(&mut self) {
        if let Err(e) = self.try_persist_prefs() {
            self.status = format!("Preferences not saved: {e:#}");
        }
    }

    fn try_persist_prefs(&self) -> anyhow::Result<()> {
        let path = settings_path(&Self::prefs_identity())?;
        let mut prefs = SettingsStore::new();
        let theme = if self.theme_dark {
            statics::PREF_THEME_DARK
        } else {
            statics::PREF_THEME_LIGHT
        };
        prefs.put(statics::PREF_THEME, theme)?;
        if let Some(dir) = &self.dialog_dir {
            prefs.put(statics::PREF_LAST_DIR, dir.display().to_string())?;
        }
        prefs
            .save_path(&path)
            .with_context(|| format!("writing {path:?}"))?;
        Ok(())
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new().add_filter(statics::EN_DIALOG_FILTER, &["ini"]);

        if let Some(dir) = self.dialog_dir.clone().or_else(dirs::data_dir) {
            dlg = dlg.set_directory(dir);
        }

        dlg
    }

    fn new_file(&mut self) {
        self.doc = Some(OpenDoc::empty());
        self.reset_session_state();
        self.status = "New settings file".to_string();
        self.last_error = None;
    }

    fn open_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };
        self.open_path(&path);
    }

    fn open_path(&mut self, path: &Path) {
        match OpenDoc::open(path) {
            Ok(doc) => {
                self.doc = Some(doc);
                self.reset_session_state();
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("Loaded {}", path.display());
                self.last_error = None;
                self.persist_prefs();
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to load: {e:#}"));
            }
        }
    }

    fn reset_session_state(&mut self) {
        self.selected_key = None;
        self.edit_buffer.clear();
        self.filter.clear();
        self.add_key.clear();
        self.add_value.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn save_file(&mut self) {
        let Some(path) = self.doc.as_ref().and_then(|d| d.source_path.clone()) else {
            self.save_file_as();
            return;
        };
        self.save_to_path(&path);
    }

    fn save_file_as(&mut self) {
        let mut dlg = self.file_dialog();
        if let Some(doc) = self.doc.as_ref()
            && let Some(source_path) = doc.source_path.as_ref()
            && let Some(file_name) = source_path.file_name()
        {
            dlg = dlg.set_file_name(file_name.to_string_lossy());
        } else {
            dlg = dlg.set_file_name(statics::SETTINGS_FILE_NAME);
        }

        let Some(path) = dlg.save_file() else {
            return;
        };
        self.save_to_path(&path);
    }

    fn save_to_path(&mut self, path: &Path) {
        let Some(doc) = self.doc.as_mut() else {
            return;
        };

        if let Err(e) = doc.save_to(path) {
            self.last_error = Some(format!("Failed to save: {e:#}"));
        } else {
            self.dialog_dir = path.parent().map(PathBuf::from);
            self.status = format!("Saved {}", path.display());
            self.last_error = None;
            self.persist_prefs();
        }
    }

    fn select_entry(&mut self, doc: &OpenDoc, key: &str) {
        self.edit_buffer = doc.store.get(key).unwrap_or_default().to_string();
        self.selected_key = Some(key.to_string());
    }

    /// After undo/redo, the selected entry may have changed value or been
    /// removed entirely; keep the edit buffer and selection in step.
    fn sync_selection(&mut self) {
        let Some(doc) = self.doc.as_ref() else {
            return;
        };
        let Some(key) = self.selected_key.clone() else {
            return;
        };
        match doc.store.get(&key) {
            Some(value) => self.edit_buffer = value.to_string(),
            None => {
                self.selected_key = None;
                self.edit_buffer.clear();
            }
        }
    }

    fn push_action(&mut self, action: EditAction) {
        self.status = action.description.clone();
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    fn apply_selected(&mut self, doc: &mut OpenDoc) {
        let Some(key) = self.selected_key.clone() else {
            return;
        };
        let after = self.edit_buffer.clone();

        let before = doc.store.get(&key).map(str::to_string);
        if before.as_deref() == Some(after.as_str()) {
            return;
        }

        if let Err(e) = doc.store.put(key.clone(), after.clone()) {
            self.last_error = Some(format!("Failed to apply: {e:#}"));
            return;
        }
        doc.refresh_dirty();
        self.last_error = None;

        let description = describe_edit(&key, before.as_deref(), Some(&after));
        self.push_action(EditAction {
            key,
            before,
            after: Some(after),
            description,
        });
    }

    fn delete_selected(&mut self, doc: &mut OpenDoc) {
        let Some(key) = self.selected_key.take() else {
            return;
        };
        self.edit_buffer.clear();

        let Some(before) = doc.store.remove(&key) else {
            return;
        };
        doc.refresh_dirty();

        let description = describe_edit(&key, Some(&before), None);
        self.push_action(EditAction {
            key,
            before: Some(before),
            after: None,
            description,
        });
    }

    fn add_entry(&mut self, doc: &mut OpenDoc) {
        let key = self.add_key.trim().to_string();
        let value = self.add_value.trim().to_string();
        if key.is_empty() {
            return;
        }

        let before = doc.store.get(&key).map(str::to_string);

        if let Err(e) = doc.store.put(key.clone(), value.clone()) {
            self.last_error = Some(format!("Failed to add: {e:#}"));
            return;
        }
        doc.refresh_dirty();
        self.last_error = None;

        let description = describe_edit(&key, before.as_deref(), Some(&value));
        self.push_action(EditAction {
            key: key.clone(),
            before,
            after: Some(value),
            description,
        });

        self.add_key.clear();
        self.add_value.clear();
        self.select_entry(doc, &key);
    }

    fn undo(&mut self) {
        let Some(doc) = self.doc.as_mut() else {
            return;
        };
        let Some(action) = self.undo_stack.pop() else {
            return;
        };

        if let Err(e) = apply_edit(&mut doc.store, &action.key, action.before.as_deref()) {
            self.last_error = Some(format!("Failed to undo: {e:#}"));
            return;
        }
        doc.refresh_dirty();

        self.status = format!("{} {}", statics::EN_PREFIX_UNDO, action.description);
        self.redo_stack.push(action);
        self.sync_selection();
    }

    fn redo(&mut self) {
        let Some(doc) = self.doc.as_mut() else {
            return;
        };
        let Some(action) = self.redo_stack.pop() else {
            return;
        };

        if let Err(e) = apply_edit(&mut doc.store, &action.key, action.after.as_deref()) {
            self.last_error = Some(format!("Failed to redo: {e:#}"));
            return;
        }
        doc.refresh_dirty();

        self.status = format!("{} {}", statics::EN_PREFIX_REDO, action.description);
        self.undo_stack.push(action);
        self.sync_selection();
    }

    fn render_entries_table(&mut self, ui: &mut egui::Ui, doc: &OpenDoc) {
        let filtered: Vec<(String, String)> = doc
            .store
            .iter()
            .filter(|(key, value)| matches_filter(key, value, &self.filter))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        if filtered.is_empty() && !self.filter.trim().is_empty() {
            ui.label(statics::EN_FILTER_NO_MATCHES);
            return;
        }

        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
        let mut select = None;

        ui.push_id("entries_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(220.0).resizable(true))
                .column(Column::remainder().resizable(true))
                .header(row_h, |mut header| {
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_KEY);
                    });
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_VALUE);
                    });
                })
                .body(|mut body| {
                    for (key, value) in &filtered {
                        let selected = self.selected_key.as_deref() == Some(key.as_str());
                        body.row(row_h, |mut row| {
                            row.col(|ui| {
                                let label = egui::RichText::new(key).monospace();
                                if ui.selectable_label(selected, label).clicked() {
                                    select = Some(key.clone());
                                }
                            });
                            row.col(|ui| {
                                ui.label(text_preview(value, 100));
                            });
                        });
                    }
                });
        });

        if let Some(key) = select {
            self.select_entry(doc, &key);
        }
    }

    fn render_edit_panel(&mut self, ui: &mut egui::Ui, doc: &mut OpenDoc) {
        ui.heading(statics::EN_HEADING_EDIT);

        let mut do_apply = false;
        let mut do_delete = false;

        match self.selected_key.clone() {
            None => {
                ui.label(statics::EN_SELECT_ENTRY);
            }
            Some(key) => {
                ui.horizontal(|ui| {
                    ui.monospace(&key);
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut self.edit_buffer)
                            .hint_text(statics::EN_HINT_VALUE)
                            .desired_width(ui.available_width() - 140.0),
                    );
                    if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        do_apply = true;
                    }
                    if ui.button(statics::EN_BTN_APPLY).clicked() {
                        do_apply = true;
                    }
                    if ui.button(statics::EN_BTN_DELETE).clicked() {
                        do_delete = true;
                    }
                });
            }
        }

        ui.separator();
        ui.heading(statics::EN_HEADING_ADD);

        let mut do_add = false;
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.add_key)
                    .hint_text(statics::EN_HINT_KEY)
                    .desired_width(220.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.add_value)
                    .hint_text(statics::EN_HINT_VALUE)
                    .desired_width(ui.available_width() - 80.0),
            );
            if ui.button(statics::EN_BTN_ADD).clicked() {
                do_add = true;
            }
        });

        if do_apply {
            self.apply_selected(doc);
        }
        if do_delete {
            self.delete_selected(doc);
        }
        if do_add {
            self.add_entry(doc);
        }
    }
}

impl eframe::App for FlatiniApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Undo/Redo shortcuts.
        // Note: we explicitly consume these keys so egui text editors don't
        // also apply their own internal undo/redo to our edit buffers.
        let mut do_undo = false;
        let mut do_redo = false;
        let mut do_open = false;
        let mut do_save = false;
        ctx.input_mut(|i| {
            let ctrl_shift = egui::Modifiers {
                shift: true,
                ..egui::Modifiers::CTRL
            };
            if i.consume_key(ctrl_shift, egui::Key::Z) {
                do_redo = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::Y) {
                do_redo = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::Z) {
                do_undo = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::O) {
                do_open = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::S) {
                do_save = true;
            }
        });
        if do_undo {
            self.undo();
            ctx.request_repaint();
        }
        if do_redo {
            self.redo();
            ctx.request_repaint();
        }
        if do_open {
            self.open_file();
        }
        if do_save && self.doc.is_some() {
            self.save_file();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_NEW).clicked() {
                    self.new_file();
                }
                if ui.button(statics::EN_BTN_OPEN).clicked() {
                    self.open_file();
                }

                let has_doc = self.doc.is_some();
                if ui
                    .add_enabled(has_doc, egui::Button::new(statics::EN_BTN_SAVE))
                    .clicked()
                {
                    self.save_file();
                }
                if ui
                    .add_enabled(has_doc, egui::Button::new(statics::EN_BTN_SAVE_AS))
                    .clicked()
                {
                    self.save_file_as();
                }

                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }

                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.theme_dark = !self.theme_dark;
                    if self.theme_dark {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                    self.persist_prefs();
                }

                ui.separator();
                let can_undo = !self.undo_stack.is_empty();
                let can_redo = !self.redo_stack.is_empty();
                if ui
                    .add_enabled(can_undo, egui::Button::new(statics::EN_BTN_UNDO))
                    .clicked()
                {
                    self.undo();
                }
                if ui
                    .add_enabled(can_redo, egui::Button::new(statics::EN_BTN_REDO))
                    .clicked()
                {
                    self.redo();
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if self.about_open {
            let mut open = self.about_open;
            egui::Window::new(statics::EN_WINDOW_ABOUT)
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(statics::EN_ABOUT_HEADING);
                    ui.label(format!(
                        "{} {}",
                        statics::EN_ABOUT_VERSION,
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.separator();
                    ui.label(statics::EN_ABOUT_SHORTCUTS);
                    ui.label(statics::EN_ABOUT_SHORTCUT_FILE);
                    ui.label(statics::EN_ABOUT_SHORTCUT_UNDO);
                });
            self.about_open = open;
        }

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        if self.doc.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(statics::EN_HOME_HEADING);
                ui.label(statics::EN_HOME_INSTRUCTIONS);
                ui.horizontal(|ui| {
                    if ui.button(statics::EN_BTN_NEW).clicked() {
                        self.new_file();
                    }
                    if ui.button(statics::EN_BTN_OPEN).clicked() {
                        self.open_file();
                    }
                });
            });
            return;
        }

        let Some(mut doc) = self.doc.take() else {
            return;
        };

        // The bottom status bar must be shown before the central panel so it
        // reserves space across the full window width.
        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let file_label = doc
                    .source_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());
                ui.label(file_label);
                ui.separator();
                ui.label(format!(
                    "{} {}",
                    statics::EN_LABEL_ENTRIES_COUNT,
                    doc.store.len()
                ));
                ui.separator();
                ui.label(format!(
                    "{} {}",
                    statics::EN_LABEL_CHANGES_COUNT,
                    self.undo_stack.len()
                ));
                if doc.dirty {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_DIRTY);
                }
            });
        });

        egui::TopBottomPanel::bottom("edit_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_edit_panel(ui, &mut doc);
                ui.add_space(4.0);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(statics::EN_HEADING_ENTRIES);
                ui.separator();
                ui.label(statics::EN_LABEL_FILTER);
                ui.add(
                    egui::TextEdit::singleline(&mut self.filter)
                        .hint_text(statics::EN_HINT_FILTER)
                        .desired_width(220.0),
                );
            });
            ui.separator();
            self.render_entries_table(ui, &doc);
        });

        self.doc = Some(doc);
    }
}

fn apply_edit(
    store: &mut SettingsStore,
    key: &str,
    value: Option<&str>,
) -> Result<(), SettingsError> {
    match value {
        Some(value) => store.put(key, value),
        None => {
            store.remove(key);
            Ok(())
        }
    }
}

fn matches_filter(key: &str, value: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    key.to_lowercase().contains(&query) || value.to_lowercase().contains(&query)
}

fn text_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn describe_edit(key: &str, before: Option<&str>, after: Option<&str>) -> String {
    match (before, after) {
        (Some(b), Some(a)) => format!("{key}: {} -> {}", text_preview(b, 40), text_preview(a, 40)),
        (None, Some(a)) => format!("{key}: added {}", text_preview(a, 40)),
        (_, None) => format!("{key}: removed"),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_edit, describe_edit, matches_filter, text_preview};
    use crate::SettingsStore;

    #[test]
    fn matches_filter_is_case_insensitive_over_key_and_value() {
        assert!(matches_filter("Theme", "dark", ""));
        assert!(matches_filter("Theme", "dark", "  "));
        assert!(matches_filter("Theme", "dark", "the"));
        assert!(matches_filter("Theme", "dark", "DARK"));
        assert!(!matches_filter("Theme", "dark", "light"));
    }

    #[test]
    fn text_preview_truncates_long_text() {
        assert_eq!(text_preview("short", 10), "short");
        let long = "x".repeat(20);
        let preview = text_preview(&long, 10);
        assert_eq!(preview.chars().count(), 10);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn describe_edit_covers_add_change_and_remove() {
        assert_eq!(describe_edit("k", None, Some("v")), "k: added v");
        assert_eq!(describe_edit("k", Some("a"), Some("b")), "k: a -> b");
        assert_eq!(describe_edit("k", Some("a"), None), "k: removed");
    }

    #[test]
    fn apply_edit_puts_and_removes() {
        let mut store = SettingsStore::new();
        apply_edit(&mut store, "k", Some("v")).expect("put");
        assert_eq!(store.get("k"), Some("v"));
        apply_edit(&mut store, "k", None).expect("remove");
        assert_eq!(store.get("k"), None);
    }
}
