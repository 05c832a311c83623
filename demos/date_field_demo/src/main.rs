#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(rustdoc::missing_crate_level_docs)] // it's an example

use std::{cell::RefCell, rc::Rc};

use eframe::egui;
use egui_date_field::{ConfirmPayload, DatePickerField, FieldConfig, PickerMode};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Date field demo",
        options,
        Box::new(|_cc| Ok(Box::<DemoApp>::default())),
    )
}

struct DemoApp {
    birthday: DatePickerField,
    stay: DatePickerField,
    picked: Rc<RefCell<Vec<String>>>,
}

impl Default for DemoApp {
    fn default() -> Self {
        let picked = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&picked);
        let birthday = DatePickerField::new(
            FieldConfig::default()
                .placeholder("Your birthday")
                .block_after(true)
                .mark_text("No birthdays in the future"),
        )
        .id_salt("birthday")
        .on_confirm(move |payload| sink.borrow_mut().push(describe(payload)));

        let sink = Rc::clone(&picked);
        let stay = DatePickerField::new(
            FieldConfig::default()
                .placeholder("Your stay")
                .mode(PickerMode::Range)
                .date_splitter("to")
                .block_before(true)
                .button_text("Book"),
        )
        .id_salt("stay")
        .on_confirm(move |payload| sink.borrow_mut().push(describe(payload)));

        Self {
            birthday,
            stay,
            picked,
        }
    }
}

fn describe(payload: &ConfirmPayload) -> String {
    match payload {
        ConfirmPayload::Single { date } => format!("date: {date}"),
        ConfirmPayload::Range {
            start_date,
            end_date,
        } => format!("startDate: {start_date}, endDate: {end_date}"),
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Date fields");

            ui.add(&mut self.birthday);
            ui.add_space(12.0);
            ui.add(&mut self.stay);

            ui.separator();
            for line in self.picked.borrow().iter() {
                ui.label(line.as_str());
            }
        });
    }
}
