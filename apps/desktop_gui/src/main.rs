use std::{fs, path::PathBuf};

mod loaders;

use eframe::egui;
use letter::{compose, render_preview, ImageRef, LetterRecord};
use loaders::{decode_text, decode_thumbnail};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageSlot {
    Logo,
    Stamp,
}

impl ImageSlot {
    fn label(self) -> &'static str {
        match self {
            ImageSlot::Logo => "логотип",
            ImageSlot::Stamp => "печать",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeSeverity {
    Info,
    Error,
}

/// Modal dialog state: one action outcome shown at a time, dismissed by the
/// user. Errors are terminal to the action, never to the process.
struct Notice {
    severity: NoticeSeverity,
    message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }

    fn title(&self) -> &'static str {
        match self.severity {
            NoticeSeverity::Info => "Успех",
            NoticeSeverity::Error => "Ошибка",
        }
    }
}

/// Display thumbnail for a loaded logo/stamp. Kept outside the record: the
/// record stores only the canonical path used at export time.
struct SlotPreview {
    texture: egui::TextureHandle,
    size: egui::Vec2,
}

fn field_rows(record: &mut LetterRecord) -> [(&'static str, &mut String); 14] {
    [
        ("Название компании:", &mut record.sender_company),
        ("ИНН:", &mut record.inn),
        ("КПП:", &mut record.kpp),
        ("ОГРН:", &mut record.ogrn),
        ("Юридический адрес:", &mut record.legal_address),
        ("Почтовый адрес:", &mut record.post_address),
        ("Телефон/факс:", &mut record.phone),
        ("Исх. №:", &mut record.outgoing_number),
        ("Дата исх.:", &mut record.outgoing_date),
        ("Должность отправителя:", &mut record.sender_position),
        ("ФИО отправителя:", &mut record.sender_name),
        ("Компания получателя:", &mut record.recipient_company),
        ("Должность получателя:", &mut record.recipient_position),
        ("ФИО получателя:", &mut record.recipient_name),
    ]
}

fn ensure_docx_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("docx");
    }
    path
}

struct LetterApp {
    record: LetterRecord,
    logo_preview: Option<SlotPreview>,
    stamp_preview: Option<SlotPreview>,
    /// `Some` while the attachment editor window is open.
    attachment_draft: Option<String>,
    notice: Option<Notice>,
}

impl LetterApp {
    fn new() -> Self {
        Self {
            record: LetterRecord::default(),
            logo_preview: None,
            stamp_preview: None,
            attachment_draft: None,
            notice: None,
        }
    }

    fn load_image(&mut self, ctx: &egui::Context, slot: ImageSlot) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Изображения", &["png", "jpg", "jpeg"])
            .pick_file()
        else {
            return;
        };

        let loaded = fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| decode_thumbnail(&bytes));
        let thumbnail = match loaded {
            Ok(thumbnail) => thumbnail,
            Err(err) => {
                // Previous logo/stamp state stays untouched on failure.
                error!(path = %path.display(), %err, "image load failed");
                self.notice = Some(Notice::error(format!(
                    "Не удалось загрузить {}: {err}",
                    slot.label()
                )));
                return;
            }
        };

        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [thumbnail.width, thumbnail.height],
            &thumbnail.rgba,
        );
        let texture = ctx.load_texture(
            format!("{}-preview:{}", slot.label(), path.display()),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        let preview = SlotPreview {
            size: egui::vec2(thumbnail.width as f32, thumbnail.height as f32),
            texture,
        };

        info!(path = %path.display(), slot = slot.label(), "image loaded");
        match slot {
            ImageSlot::Logo => {
                self.record.logo = Some(ImageRef::new(&path));
                self.logo_preview = Some(preview);
            }
            ImageSlot::Stamp => {
                self.record.stamp = Some(ImageRef::new(&path));
                self.stamp_preview = Some(preview);
            }
        }
    }

    fn load_body_text(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Текстовые файлы", &["txt"])
            .pick_file()
        else {
            return;
        };

        let loaded = fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| decode_text(&bytes));
        match loaded {
            Ok(content) => {
                // Verbatim replacement; trimming happens at render/export.
                info!(path = %path.display(), bytes = content.len(), "body text loaded");
                self.record.body_text = content;
            }
            Err(err) => {
                error!(path = %path.display(), %err, "text load failed");
                self.notice = Some(Notice::error(format!("Не удалось загрузить текст: {err}")));
            }
        }
    }

    fn save_document(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Документы Word", &["docx"])
            .set_file_name("письмо.docx")
            .save_file()
        else {
            return;
        };
        let path = ensure_docx_extension(path);

        let exported = compose(&self.record)
            .map_err(anyhow::Error::from)
            .and_then(|plan| docx_export::write_docx(&plan, &path));
        match exported {
            Ok(()) => {
                self.notice = Some(Notice::info("Документ успешно сохранен!"));
            }
            Err(err) => {
                error!(path = %path.display(), %err, "export failed");
                self.notice = Some(Notice::error(format!(
                    "Не удалось сохранить документ: {err}"
                )));
            }
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else { return };
        let mut open = true;
        let mut dismissed = false;
        egui::Window::new(notice.title())
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(&notice.message);
                ui.add_space(8.0);
                if ui.button("ОК").clicked() {
                    dismissed = true;
                }
            });
        if dismissed || !open {
            self.notice = None;
        }
    }

    fn show_attachment_editor(&mut self, ctx: &egui::Context) {
        let Some(mut draft) = self.attachment_draft.take() else {
            return;
        };
        let mut open = true;
        let mut confirmed = false;
        egui::Window::new("Добавить вложение")
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut draft)
                        .desired_rows(12)
                        .desired_width(440.0),
                );
                ui.add_space(6.0);
                if ui.button("Сохранить вложение").clicked() {
                    confirmed = true;
                }
            });

        if confirmed && self.record.push_attachment(&draft) {
            info!(count = self.record.attachments.len(), "attachment confirmed");
            return;
        }
        // Blank drafts are not confirmable; the editor stays open until the
        // user closes it.
        if open {
            self.attachment_draft = Some(draft);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Параметры письма");
        ui.separator();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("letter-fields")
                    .num_columns(2)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for (label, value) in field_rows(&mut self.record) {
                            ui.label(label);
                            ui.add(egui::TextEdit::singleline(value).desired_width(240.0));
                            ui.end_row();
                        }
                    });

                ui.add_space(8.0);
                ui.label("Текст письма:");
                ui.add(
                    egui::TextEdit::multiline(&mut self.record.body_text)
                        .desired_rows(10)
                        .desired_width(f32::INFINITY),
                );

                ui.add_space(8.0);
                ui.horizontal_wrapped(|ui| {
                    if ui.button("Загрузить логотип").clicked() {
                        self.load_image(ui.ctx(), ImageSlot::Logo);
                    }
                    if ui.button("Загрузить печать").clicked() {
                        self.load_image(ui.ctx(), ImageSlot::Stamp);
                    }
                    if ui.button("Добавить вложение").clicked() && self.attachment_draft.is_none()
                    {
                        self.attachment_draft = Some(String::new());
                    }
                    if ui.button("Загрузить текст").clicked() {
                        self.load_body_text();
                    }
                });
                if !self.record.attachments.is_empty() {
                    ui.add_space(4.0);
                    ui.label(format!("Вложений: {}", self.record.attachments.len()));
                }

                ui.add_space(12.0);
                if ui.button("Сохранить в Word").clicked() {
                    self.save_document();
                }
            });
    }

    fn show_preview(&mut self, ui: &mut egui::Ui) {
        ui.heading("Предпросмотр");
        ui.separator();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(preview) = &self.logo_preview {
                    ui.image((preview.texture.id(), preview.size));
                    ui.add_space(8.0);
                }

                match render_preview(&self.record) {
                    Ok(text) => {
                        ui.label(egui::RichText::new(text).monospace());
                    }
                    Err(err) => {
                        // Formation failures render inline instead of
                        // crashing the preview.
                        ui.label(
                            egui::RichText::new(format!("Ошибка формирования: {err}"))
                                .color(ui.visuals().error_fg_color),
                        );
                    }
                }

                if let Some(preview) = &self.stamp_preview {
                    ui.add_space(8.0);
                    ui.image((preview.texture.id(), preview.size));
                }
            });
    }
}

impl eframe::App for LetterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_notice(ctx);
        self.show_attachment_editor(ctx);

        egui::SidePanel::left("letter-form")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| self.show_form(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.show_preview(ui));
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Генератор официальных писем")
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Генератор официальных писем",
        options,
        Box::new(|_cc| Ok(Box::new(LetterApp::new()))),
    )
}
