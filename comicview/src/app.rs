//! comicView application
//!
//! Two screens inside one window: the shelf of registered comic
//! folders, and a one-page-at-a-time reader with touch-style
//! navigation. Swipe or use the wheel to turn pages, double tap (or
//! double click) to zoom, drag to pan.

use crate::gesture::{Gesture, GestureClassifier, ReleaseEvent, ScrollDirection};
use crate::library::{Library, REGISTRY_FILE};
use crate::loader::PageImage;
use crate::pages;
use crate::progress::{Progress, PROGRESS_FILE};
use crate::session::{self, ReaderSession};
use comiccore::storage::{config_dir, pictures_dir, FolderBrowser};
use comiccore::theme::{menu_bar, ComicTheme};
use comiccore::widgets::status_bar;
use egui::{ColorImage, Context, Key, Rect, Sense, Stroke, TextureHandle, TextureOptions, Vec2};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Application view
#[derive(Clone, Copy, PartialEq)]
enum View {
    Shelf,
    Reader,
}

pub struct ComicViewApp {
    view: View,
    library: Library,
    progress: Progress,
    /// Open folder, present only in the reader view
    session: Option<ReaderSession>,
    gestures: GestureClassifier,
    theme: ComicTheme,
    /// Decoded current page; the status bar reads its dimensions
    page: Option<PageImage>,
    /// Texture for the current page
    texture: Option<TextureHandle>,
    /// Decode failure for the current page
    page_error: Option<String>,
    /// Shelf thumbnails keyed by folder; None marks folders with no
    /// usable first image
    thumbnails: HashMap<PathBuf, Option<TextureHandle>>,
    /// Accumulated displacement of the drag in progress
    drag_accum: Vec2,
    show_folder_browser: bool,
    folder_browser: FolderBrowser,
    /// User-visible notice popup (empty folder and the like)
    error: Option<String>,
    show_about: bool,
    registry_path: PathBuf,
    progress_path: PathBuf,
}

impl ComicViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_folder: Option<PathBuf>) -> Self {
        let config = config_dir("comicview");

        let theme = ComicTheme::default();
        theme.apply(&cc.egui_ctx);

        let registry_path = config.join(REGISTRY_FILE);
        let progress_path = config.join(PROGRESS_FILE);

        let mut app = Self {
            view: View::Shelf,
            library: Library::load(&registry_path),
            progress: Progress::load(&progress_path),
            session: None,
            gestures: GestureClassifier::new(),
            theme,
            page: None,
            texture: None,
            page_error: None,
            thumbnails: HashMap::new(),
            drag_accum: Vec2::ZERO,
            show_folder_browser: false,
            folder_browser: FolderBrowser::new(pictures_dir()),
            error: None,
            show_about: false,
            registry_path,
            progress_path,
        };

        // A bad launch argument surfaces through the notice popup like
        // any other unopenable folder.
        if let Some(folder) = initial_folder {
            app.open_folder(folder);
        }

        app
    }

    fn open_folder(&mut self, folder: PathBuf) {
        let name = session::folder_name(&folder);
        let saved = self.progress.page_for(&name);

        match ReaderSession::open(&folder, saved) {
            Ok(session) => {
                self.page = None;
                self.texture = None;
                self.page_error = None;
                self.session = Some(session);
                self.view = View::Reader;
                self.save_progress();
            }
            Err(e) => {
                log::warn!("could not open folder: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    fn close_reader(&mut self) {
        self.save_progress();
        self.session = None;
        self.page = None;
        self.texture = None;
        self.page_error = None;
        self.view = View::Shelf;
    }

    /// Record the current page under the folder's basename and write
    /// the progress file.
    fn save_progress(&mut self) {
        if let Some(ref session) = self.session {
            self.progress.set_page(session.name(), session.current_page());
            self.progress.save(&self.progress_path);
        }
    }

    /// Feed one release event through the classifier.
    fn dispatch_release(&mut self, event: ReleaseEvent) {
        if let Some(gesture) = self.gestures.classify(event) {
            self.dispatch_gesture(gesture);
        }
    }

    fn dispatch_gesture(&mut self, gesture: Gesture) {
        let changed = match self.session.as_mut() {
            Some(session) => session.apply_gesture(gesture),
            None => false,
        };

        if changed {
            self.page = None;
            self.texture = None;
            self.page_error = None;
            self.save_progress();
        }
    }

    fn toggle_theme(&mut self, ctx: &Context) {
        self.theme.toggle();
        self.theme.apply(ctx);
    }

    /// Add a folder to the shelf, persisting the registry on change.
    fn add_folder(&mut self, folder: PathBuf) {
        if self.library.add(folder) {
            self.library.save(&self.registry_path);
        }
    }

    fn ensure_texture(&mut self, ctx: &Context) {
        if self.texture.is_some() || self.page_error.is_some() {
            return;
        }

        if let Some(ref session) = self.session {
            match PageImage::open(session.current_path()) {
                Ok(page) => {
                    let color_image = ColorImage::from_rgba_unmultiplied(
                        [page.width as usize, page.height as usize],
                        &page.rgba,
                    );
                    self.texture = Some(ctx.load_texture(
                        "comic_page",
                        color_image,
                        TextureOptions::LINEAR,
                    ));
                    self.page = Some(page);
                }
                Err(e) => {
                    self.page_error = Some(e.to_string());
                }
            }
        }
    }

    fn ensure_thumbnail(&mut self, ctx: &Context, folder: &Path) {
        if self.thumbnails.contains_key(folder) {
            return;
        }

        let texture = pages::first_page(folder)
            .and_then(|page| PageImage::open_thumbnail(&page).ok())
            .map(|thumb| {
                let color_image = ColorImage::from_rgba_unmultiplied(
                    [thumb.width as usize, thumb.height as usize],
                    &thumb.rgba,
                );
                ctx.load_texture(
                    format!("thumb:{}", folder.display()),
                    color_image,
                    TextureOptions::LINEAR,
                )
            });

        self.thumbnails.insert(folder.to_path_buf(), texture);
    }

    fn handle_keyboard(&mut self, ctx: &Context) {
        comiccore::theme::consume_special_keys(ctx);

        // A folder dropped onto the window goes straight onto the shelf
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect()
        });
        if let Some(folder) = dropped.into_iter().find(|p| p.is_dir()) {
            self.add_folder(folder.clone());
            self.open_folder(folder);
        }

        ctx.input(|i| {
            let cmd = i.modifiers.command;

            if cmd && i.key_pressed(Key::O) {
                self.show_folder_browser = true;
            }

            if i.key_pressed(Key::Escape) {
                if self.show_folder_browser {
                    self.show_folder_browser = false;
                } else if self.show_about {
                    self.show_about = false;
                } else if self.error.is_some() {
                    self.error = None;
                } else if self.view == View::Reader {
                    self.close_reader();
                }
            }

            if self.view == View::Reader && self.session.is_some() {
                if i.key_pressed(Key::ArrowRight) {
                    self.dispatch_gesture(Gesture::NextPage);
                }
                if i.key_pressed(Key::ArrowLeft) {
                    self.dispatch_gesture(Gesture::PrevPage);
                }
                if i.key_pressed(Key::Plus) || i.key_pressed(Key::Equals) {
                    if let Some(session) = self.session.as_mut() {
                        session.zoom_in();
                    }
                }
                if i.key_pressed(Key::Minus) {
                    if let Some(session) = self.session.as_mut() {
                        session.zoom_out();
                    }
                }
                if i.key_pressed(Key::Num0) {
                    if let Some(session) = self.session.as_mut() {
                        session.reset_zoom();
                    }
                }
            }
        });
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        menu_bar(ui, |ui| {
            ui.menu_button("file", |ui| {
                if ui.button("add folder...  ⌘O").clicked() {
                    self.show_folder_browser = true;
                    ui.close_menu();
                }
                if self.session.is_some() {
                    ui.separator();
                    if ui.button("back to shelf  esc").clicked() {
                        self.close_reader();
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("view", |ui| {
                if ui.button(self.theme.toggle_label()).clicked() {
                    self.toggle_theme(&ctx);
                    ui.close_menu();
                }
                if self.session.is_some() {
                    ui.separator();
                    if ui.button("zoom in      +").clicked() {
                        if let Some(session) = self.session.as_mut() {
                            session.zoom_in();
                        }
                        ui.close_menu();
                    }
                    if ui.button("zoom out     -").clicked() {
                        if let Some(session) = self.session.as_mut() {
                            session.zoom_out();
                        }
                        ui.close_menu();
                    }
                    if ui.button("reset zoom   0").clicked() {
                        if let Some(session) = self.session.as_mut() {
                            session.reset_zoom();
                        }
                        ui.close_menu();
                    }
                }
            });

            if self.session.is_some() {
                ui.menu_button("go", |ui| {
                    if ui.button("next page        →").clicked() {
                        self.dispatch_gesture(Gesture::NextPage);
                        ui.close_menu();
                    }
                    if ui.button("previous page    ←").clicked() {
                        self.dispatch_gesture(Gesture::PrevPage);
                        ui.close_menu();
                    }
                });
            }

            ui.menu_button("help", |ui| {
                if ui.button("about comicView").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn render_shelf(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(10.0);
            ui.heading("comicView");
            ui.add_space(5.0);

            if ui.button("add folder...").clicked() {
                self.show_folder_browser = true;
            }
            let toggle = ui.button(self.theme.toggle_label());
            if toggle.clicked() {
                self.toggle_theme(ui.ctx());
            }

            ui.add_space(10.0);
        });

        ui.separator();

        let folders: Vec<PathBuf> = self.library.folders().to_vec();
        let mut folder_to_open: Option<PathBuf> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            if folders.is_empty() {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.label("no comic folders yet");
                    ui.add_space(4.0);
                    ui.label("add a folder of images to start reading");
                });
                ui.add_space(40.0);
            } else {
                self.render_folder_grid(ui, &folders, &mut folder_to_open);
            }
        });

        // Open after the loop to avoid borrow issues
        if let Some(folder) = folder_to_open {
            self.open_folder(folder);
        }
    }

    fn render_folder_grid(
        &mut self,
        ui: &mut egui::Ui,
        folders: &[PathBuf],
        folder_to_open: &mut Option<PathBuf>,
    ) {
        let available_width = ui.available_width();
        let tile_width: f32 = 110.0;
        let tile_height: f32 = 150.0;
        let padding: f32 = 10.0;
        let cols = ((available_width - padding) / (tile_width + padding)).max(1.0) as usize;

        let rows = (folders.len() + cols - 1) / cols;
        for row in 0..rows {
            ui.horizontal(|ui| {
                ui.add_space(padding);
                for col in 0..cols {
                    let idx = row * cols + col;
                    if idx >= folders.len() {
                        break;
                    }

                    let folder = &folders[idx];
                    self.ensure_thumbnail(ui.ctx(), folder);

                    let (rect, response) = ui.allocate_exact_size(
                        Vec2::new(tile_width, tile_height),
                        Sense::click(),
                    );

                    if ui.is_rect_visible(rect) {
                        let visuals = ui.visuals().clone();
                        let painter = ui.painter();

                        painter.rect_filled(rect, 4.0, self.theme.page_color());
                        let stroke = if response.hovered() {
                            Stroke::new(2.0, visuals.selection.bg_fill)
                        } else {
                            Stroke::new(1.0, visuals.window_stroke.color)
                        };
                        painter.rect_stroke(rect, 4.0, stroke);

                        // Thumbnail of the first page, when there is one
                        let thumb_rect = Rect::from_min_size(
                            rect.min + Vec2::new(5.0, 5.0),
                            Vec2::new(tile_width - 10.0, 105.0),
                        );
                        if let Some(Some(tex)) = self.thumbnails.get(folder.as_path()) {
                            let tex_size = tex.size_vec2();
                            let fit = (thumb_rect.width() / tex_size.x)
                                .min(thumb_rect.height() / tex_size.y)
                                .min(1.0);
                            let img_rect =
                                Rect::from_center_size(thumb_rect.center(), tex_size * fit);
                            painter.image(
                                tex.id(),
                                img_rect,
                                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                                egui::Color32::WHITE,
                            );
                        } else {
                            painter.rect_filled(thumb_rect, 2.0, visuals.faint_bg_color);
                        }

                        // Folder name, wrapped by hand onto two lines
                        let name = session::folder_name(folder);
                        let words: Vec<&str> = name.split_whitespace().collect();
                        let mut lines: Vec<String> = Vec::new();
                        let mut current_line = String::new();
                        let max_chars_per_line = 14;

                        for word in words {
                            if current_line.len() + word.len() + 1 > max_chars_per_line
                                && !current_line.is_empty()
                            {
                                lines.push(current_line);
                                current_line = word.to_string();
                            } else {
                                if !current_line.is_empty() {
                                    current_line.push(' ');
                                }
                                current_line.push_str(word);
                            }
                        }
                        if !current_line.is_empty() {
                            lines.push(current_line);
                        }

                        for (i, line) in lines.iter().take(2).enumerate() {
                            painter.text(
                                egui::pos2(rect.center().x, rect.min.y + 118.0 + i as f32 * 14.0),
                                egui::Align2::CENTER_TOP,
                                line,
                                egui::FontId::proportional(11.0),
                                self.theme.text_color(),
                            );
                        }
                    }

                    if response.clicked() {
                        *folder_to_open = Some(folder.clone());
                    }

                    ui.add_space(padding);
                }
            });
            ui.add_space(padding);
        }
    }

    fn render_reader(&mut self, ui: &mut egui::Ui) {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::click_and_drag());

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.theme.page_color());

        if let Some(ref err) = self.page_error {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("could not load page: {}", err),
                egui::FontId::proportional(14.0),
                self.theme.text_color(),
            );
        } else if let (Some(tex), Some(session)) = (&self.texture, &self.session) {
            let tex_size = tex.size_vec2();
            let fit_scale = (rect.width() / tex_size.x)
                .min(rect.height() / tex_size.y)
                .min(1.0);
            let scale = fit_scale * session.scale();

            let display_size = tex_size * scale;
            let center = rect.center() + session.pan();
            let img_rect = Rect::from_center_size(center, display_size);

            painter.image(
                tex.id(),
                img_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        // Gesture wiring: pans during the drag, one release event at
        // the end of it, wheel ticks as synthesized releases.
        if response.dragged() {
            let delta = response.drag_delta();
            self.drag_accum += delta;
            if let Some(session) = self.session.as_mut() {
                session.pan_by(delta);
            }
        }

        let now = ui.input(|i| i.time);

        if response.double_clicked() {
            self.drag_accum = Vec2::ZERO;
            self.dispatch_release(ReleaseEvent::flagged_double_tap(now));
        } else if response.clicked() {
            self.drag_accum = Vec2::ZERO;
            self.dispatch_release(ReleaseEvent::tap(now));
        } else if response.drag_stopped() {
            let dx = self.drag_accum.x;
            self.drag_accum = Vec2::ZERO;
            self.dispatch_release(ReleaseEvent::drag(dx, now));
        }

        let dialogs_open = self.show_folder_browser || self.show_about || self.error.is_some();
        if !dialogs_open && response.hovered() {
            let scroll_y = ui.input(|i| i.raw_scroll_delta.y);
            if scroll_y < 0.0 {
                self.dispatch_release(ReleaseEvent::wheel(ScrollDirection::Down, now));
            } else if scroll_y > 0.0 {
                self.dispatch_release(ReleaseEvent::wheel(ScrollDirection::Up, now));
            }
        }
    }

    fn render_folder_browser(&mut self, ctx: &Context) {
        egui::Window::new("add comic folder")
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.folder_browser.current_dir.to_string_lossy().to_string());
                });

                ui.separator();

                egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                    let entries = self.folder_browser.entries.clone();
                    for (idx, entry) in entries.iter().enumerate() {
                        let selected = self.folder_browser.selected_index == Some(idx);
                        let response = ui.add(
                            comiccore::widgets::FolderListItem::new(&entry.name)
                                .selected(selected),
                        );

                        if response.clicked() {
                            self.folder_browser.selected_index = Some(idx);
                        }

                        if response.double_clicked() {
                            self.folder_browser.navigate_to(entry.path.clone());
                        }
                    }
                });

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        self.show_folder_browser = false;
                    }
                    // Adds the selected folder, or the one being browsed
                    if ui.button("add").clicked() {
                        let folder = self.folder_browser.chosen_dir();
                        self.add_folder(folder);
                        self.show_folder_browser = false;
                    }
                });
            });
    }

    fn render_error(&mut self, ctx: &Context) {
        let mut dismissed = false;

        if let Some(ref message) = self.error {
            egui::Window::new("notice")
                .collapsible(false)
                .resizable(false)
                .default_width(260.0)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("ok").clicked() {
                            dismissed = true;
                        }
                    });
                });
        }

        if dismissed {
            self.error = None;
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about comicView")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("comicView");
                    ui.label("version 0.1.0");
                    ui.add_space(8.0);
                    ui.label("a comic folder viewer");
                });
                ui.add_space(8.0);
                ui.separator();
                ui.add_space(4.0);
                ui.label("supported formats:");
                ui.label("  JPEG, PNG, GIF, WebP");
                ui.add_space(4.0);
                ui.label("frameworks:");
                ui.label("  egui/eframe (MIT), image-rs (MIT)");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }
}

impl eframe::App for ComicViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        if self.view == View::Reader {
            self.ensure_texture(ctx);
        }

        // Menu bar
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let status = match self.view {
                View::Shelf => {
                    format!("{} folders on the shelf  |  ⌘O to add", self.library.len())
                }
                View::Reader => {
                    if let Some(ref session) = self.session {
                        let dims = match self.page {
                            Some(ref page) => format!(
                                "  |  {}x{} -> {}x{}",
                                page.original_width, page.original_height,
                                page.width, page.height,
                            ),
                            None => String::new(),
                        };
                        let zoom = if session.scale() != 1.0 {
                            format!("  |  zoom {:.1}x", session.scale())
                        } else {
                            String::new()
                        };
                        format!("{}{}{}", session.title(), dims, zoom)
                    } else {
                        String::new()
                    }
                }
            };
            status_bar(ui, &status);
        });

        // Main content
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.panel_color()))
            .show(ctx, |ui| {
                match self.view {
                    View::Shelf => self.render_shelf(ui),
                    View::Reader => self.render_reader(ui),
                }
            });

        // Dialogs
        if self.show_folder_browser {
            self.render_folder_browser(ctx);
        }
        if self.error.is_some() {
            self.render_error(ctx);
        }
        if self.show_about {
            self.render_about(ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // The page index survives the app; zoom and pan do not
        self.save_progress();
    }
}
