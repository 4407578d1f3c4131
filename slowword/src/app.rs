//! SlowWord application
//!
//! Toolbar, text area, image preview, and the dialogs around PDF export.

use crate::document::{Document, FontName, FontSize};
use crate::export;
use crate::preview::{file_name, ImagePreview};
use crate::prefs::WordPrefs;
use egui::{Align2, Context, Key};
use slowcore::storage::{pictures_dir, FileBrowser};
use slowcore::theme::{consume_special_keys, menu_bar, SlowColors};
use slowcore::widgets::{status_bar, toolbar_separator, FileListItem, SlowButton};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// Modal popups around "save as pdf". Only one is open at a time.
#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    None,
    ConfirmSave,
    Saved(PathBuf),
    Failed(String),
}

pub struct SlowWordApp {
    document: Document,
    preview: ImagePreview,
    prefs: WordPrefs,
    prefs_path: PathBuf,
    show_image_picker: bool,
    image_browser: FileBrowser,
    dialog: Dialog,
    show_about: bool,
}

impl SlowWordApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let prefs_path = WordPrefs::default_path();
        let prefs = WordPrefs::load(&prefs_path);
        Self::with_prefs(prefs, prefs_path)
    }

    fn with_prefs(prefs: WordPrefs, prefs_path: PathBuf) -> Self {
        let mut document = Document::new();
        document.set_font(prefs.font);
        document.set_size(prefs.size);
        let start_dir = picker_start_dir(&prefs);

        Self {
            document,
            preview: ImagePreview::new(),
            prefs,
            prefs_path,
            show_image_picker: false,
            image_browser: FileBrowser::new(start_dir).with_filter(IMAGE_EXTENSIONS),
            dialog: Dialog::None,
            show_about: false,
        }
    }

    // ---------------------------------------------------------------
    // Actions
    // ---------------------------------------------------------------

    fn set_font(&mut self, font: FontName) {
        if self.document.font == font {
            return;
        }
        self.document.set_font(font);
        self.prefs.font = font;
        self.prefs.save(&self.prefs_path);
    }

    fn set_size(&mut self, size: FontSize) {
        if self.document.size == size {
            return;
        }
        self.document.set_size(size);
        self.prefs.size = size;
        self.prefs.save(&self.prefs_path);
    }

    fn open_image_picker(&mut self) {
        self.image_browser = FileBrowser::new(picker_start_dir(&self.prefs)).with_filter(IMAGE_EXTENSIONS);
        self.show_image_picker = true;
    }

    fn insert_image(&mut self, path: PathBuf) {
        log::info!("inserting image {}", path.display());
        if let Some(old) = self.document.insert_image(path.clone()) {
            log::debug!("replaced image {}", old.display());
        }
        let dir = path.parent().map(Path::to_path_buf);
        if dir.is_some() && dir != self.prefs.image_dir {
            self.prefs.image_dir = dir;
            self.prefs.save(&self.prefs_path);
        }
        self.show_image_picker = false;
    }

    fn request_save(&mut self) {
        self.dialog = Dialog::ConfirmSave;
    }

    fn save_pdf(&mut self) {
        match export::default_output_path() {
            Ok(path) => self.save_pdf_to(&path),
            Err(e) => self.finish_save(Err(e)),
        }
    }

    fn save_pdf_to(&mut self, path: &Path) {
        let result = export::export_to(&self.document, path);
        self.finish_save(result);
    }

    fn finish_save(&mut self, result: export::Result<PathBuf>) {
        self.dialog = match result {
            Ok(path) => Dialog::Saved(path),
            Err(e) => {
                log::error!("pdf export failed: {}", e);
                Dialog::Failed(e.to_string())
            }
        };
    }

    // ---------------------------------------------------------------
    // Keyboard handling
    // ---------------------------------------------------------------

    fn handle_keyboard(&mut self, ctx: &Context) {
        consume_special_keys(ctx);

        ctx.input(|i| {
            let cmd = i.modifiers.command;
            if cmd && i.key_pressed(Key::S) {
                self.request_save();
            }
            if cmd && i.key_pressed(Key::I) {
                self.open_image_picker();
            }
            if i.key_pressed(Key::Escape) {
                self.show_image_picker = false;
                self.show_about = false;
                self.dialog = Dialog::None;
            }
        });
    }

    // ---------------------------------------------------------------
    // UI rendering
    // ---------------------------------------------------------------

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        menu_bar(ui, |ui| {
            ui.menu_button("file", |ui| {
                if ui.button("insert image... ⌘i").clicked() {
                    self.open_image_picker();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(self.document.image().is_some(), egui::Button::new("remove image"))
                    .clicked()
                {
                    self.document.clear_image();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("save as pdf...  ⌘s").clicked() {
                    self.request_save();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });
            ui.menu_button("help", |ui| {
                if ui.button("about slowWord").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut font = self.document.font;
            egui::ComboBox::from_id_source("font")
                .selected_text(font.label())
                .width(120.0)
                .show_ui(ui, |ui| {
                    for f in FontName::ALL {
                        ui.selectable_value(&mut font, f, f.label());
                    }
                });
            self.set_font(font);

            let mut size = self.document.size;
            egui::ComboBox::from_id_source("size")
                .selected_text(size.to_string())
                .width(60.0)
                .show_ui(ui, |ui| {
                    for s in FontSize::ALL {
                        ui.selectable_value(&mut size, s, s.to_string());
                    }
                });
            self.set_size(size);

            toolbar_separator(ui);

            if ui.add(SlowButton::new("insert image").min_width(110.0)).clicked() {
                self.open_image_picker();
            }
            if ui.add(SlowButton::new("save as pdf").min_width(110.0)).clicked() {
                self.request_save();
            }
        });
    }

    fn status_text(&self) -> String {
        let image = self
            .document
            .image()
            .map(file_name)
            .unwrap_or_else(|| "no image".to_string());
        format!(
            "{} {}pt  |  {} words, {} chars  |  {}",
            self.document.font,
            self.document.size,
            self.document.word_count(),
            self.document.char_count(),
            image
        )
    }

    fn render_image_picker(&mut self, ctx: &Context) {
        let mut close = false;
        let mut picked: Option<PathBuf> = None;

        egui::Window::new("select an image")
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.image_browser.current_dir.to_string_lossy().to_string());
                });
                ui.separator();

                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    let entries = self.image_browser.entries.clone();
                    for (idx, entry) in entries.iter().enumerate() {
                        let selected = self.image_browser.selected_index == Some(idx);
                        let response = ui.add(FileListItem::new(&entry.name, entry.is_directory).selected(selected));
                        if response.clicked() {
                            self.image_browser.selected_index = Some(idx);
                        }
                        if response.double_clicked() {
                            if entry.is_directory {
                                self.image_browser.navigate_to(entry.path.clone());
                            } else {
                                picked = Some(entry.path.clone());
                            }
                        }
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        close = true;
                    }
                    if ui.button("insert").clicked() {
                        if let Some(entry) = self.image_browser.selected_entry() {
                            if entry.is_directory {
                                let dir = entry.path.clone();
                                self.image_browser.navigate_to(dir);
                            } else {
                                picked = Some(entry.path.clone());
                            }
                        }
                    }
                });
            });

        if let Some(path) = picked {
            self.insert_image(path);
        } else if close {
            self.show_image_picker = false;
        }
    }

    fn render_dialog(&mut self, ctx: &Context) {
        let title = match &self.dialog {
            Dialog::None => return,
            Dialog::ConfirmSave => "saving as pdf...",
            Dialog::Saved(_) => "success!",
            Dialog::Failed(_) => "export failed",
        };

        let mut next: Option<Dialog> = None;
        let mut do_save = false;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| match &self.dialog {
                    Dialog::None => {}
                    Dialog::ConfirmSave => {
                        ui.label(format!("write {} to the current folder?", export::DEFAULT_OUTPUT));
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button("save").clicked() {
                                do_save = true;
                            }
                            if ui.button("cancel").clicked() {
                                next = Some(Dialog::None);
                            }
                        });
                    }
                    Dialog::Saved(path) => {
                        ui.label(format!("PDF saved at {}", path.display()));
                        ui.add_space(8.0);
                        if ui.button("ok").clicked() {
                            next = Some(Dialog::None);
                        }
                    }
                    Dialog::Failed(reason) => {
                        ui.label(reason.as_str());
                        ui.add_space(8.0);
                        if ui.button("ok").clicked() {
                            next = Some(Dialog::None);
                        }
                    }
                });
            });

        if do_save {
            self.save_pdf();
        } else if let Some(dialog) = next {
            self.dialog = dialog;
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about slowWord")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("slowWord");
                    ui.label("version 0.1.0");
                    ui.add_space(10.0);
                    ui.label("a minimal word processor by the slow computer company");
                    ui.add_space(5.0);
                    ui.label("⌘i insert image  ·  ⌘s save as pdf");
                    ui.add_space(10.0);
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }
}

fn picker_start_dir(prefs: &WordPrefs) -> PathBuf {
    prefs
        .image_dir
        .clone()
        .filter(|d| d.is_dir())
        .unwrap_or_else(pictures_dir)
}

impl eframe::App for SlowWordApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);
        self.preview.sync(ctx, self.document.image());

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.render_menu_bar(ui));
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.render_toolbar(ui));

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar(ui, &self.status_text());
        });

        let image_height = ctx.screen_rect().height() * 0.3;
        egui::TopBottomPanel::bottom("image_area")
            .resizable(true)
            .default_height(image_height)
            .frame(egui::Frame::none().fill(SlowColors::WHITE).stroke(egui::Stroke::new(1.0, SlowColors::BLACK)))
            .show(ctx, |ui| self.preview.show(ui));

        let font = self.document.font_id();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(SlowColors::WHITE).inner_margin(egui::Margin::same(8.0)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    ui.add_sized(
                        ui.available_size(),
                        egui::TextEdit::multiline(&mut self.document.text)
                            .font(font)
                            .text_color(SlowColors::BLACK)
                            .frame(false)
                            .desired_width(f32::INFINITY),
                    );
                });
            });

        if self.show_image_picker {
            self.render_image_picker(ctx);
        }
        self.render_dialog(ctx);
        if self.show_about {
            self.render_about(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(dir: &Path) -> SlowWordApp {
        SlowWordApp::with_prefs(WordPrefs::default(), dir.join("prefs.json"))
    }

    #[test]
    fn test_starts_from_prefs() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = WordPrefs {
            font: FontName::Courier,
            size: FontSize::new(24).unwrap(),
            image_dir: Some(dir.path().to_path_buf()),
        };
        let app = SlowWordApp::with_prefs(prefs, dir.path().join("prefs.json"));
        assert_eq!(app.document.font, FontName::Courier);
        assert_eq!(app.document.size.points(), 24);
        assert_eq!(app.image_browser.current_dir, dir.path());
    }

    #[test]
    fn test_font_and_size_are_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.set_font(FontName::TimesRoman);
        app.set_size(FontSize::new(10).unwrap());
        assert_eq!(app.document.font, FontName::TimesRoman);

        let saved = WordPrefs::load(&dir.path().join("prefs.json"));
        assert_eq!(saved.font, FontName::TimesRoman);
        assert_eq!(saved.size.points(), 10);
    }

    #[test]
    fn test_unchanged_font_does_not_write_prefs() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.set_font(FontName::Helvetica);
        assert!(!dir.path().join("prefs.json").exists());
    }

    #[test]
    fn test_insert_image_replaces_and_closes_picker() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.open_image_picker();
        assert!(app.show_image_picker);

        app.insert_image(dir.path().join("a.png"));
        app.insert_image(dir.path().join("b.png"));
        assert!(!app.show_image_picker);
        assert_eq!(app.document.image(), Some(dir.path().join("b.png").as_path()));
        assert_eq!(app.prefs.image_dir.as_deref(), Some(dir.path()));
        assert!(app.status_text().ends_with("b.png"));
    }

    #[test]
    fn test_save_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.document.text = "one\ntwo".to_string();
        app.request_save();
        assert_eq!(app.dialog, Dialog::ConfirmSave);

        let out = dir.path().join(export::DEFAULT_OUTPUT);
        app.save_pdf_to(&out);
        assert_eq!(app.dialog, Dialog::Saved(out.clone()));
        assert!(out.exists());
    }

    #[test]
    fn test_save_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.insert_image(dir.path().join("missing.png"));

        app.save_pdf_to(&dir.path().join(export::DEFAULT_OUTPUT));
        match &app.dialog {
            Dialog::Failed(reason) => assert!(reason.contains("missing.png")),
            other => panic!("expected failure dialog, got {:?}", other),
        }
    }

    #[test]
    fn test_status_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.document.text = "two words".to_string();
        assert_eq!(app.status_text(), "Helvetica 12pt  |  2 words, 9 chars  |  no image");
    }
}
