use egui::{Color32, DroppedFile, Ui};
use log::{error, info, warn};

use crate::{
    calculate,
    chart_module::{ChartModule, ChartState},
    csv::normalize_csv,
    input_module::{Action, InputModule},
};

const CSV_LOADED_SECS: f64 = 2.5;
const COPIED_SECS: f64 = 1.8;
const ERROR_COLOR: Color32 = Color32::from_rgb(248, 113, 113);

#[derive(Debug, Clone, PartialEq)]
enum Message {
    Error(String),
    /// Shown until `until`, in seconds of `egui::InputState::time`.
    Info { text: String, until: f64 },
}

#[derive(serde::Deserialize, serde::Serialize, Default)]
#[serde(default)]
pub struct RegressionApp {
    input_module: InputModule,
    #[serde(skip)]
    chart_module: ChartModule,
    #[serde(skip)]
    message: Option<Message>,
}

impl RegressionApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();
        if let Some(storage) = cc.storage {
            app.input_module = eframe::get_value(storage, "points").unwrap_or_default();
        }
        app
    }
}

impl eframe::App for RegressionApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, "points", &self.input_module);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input().time;
        self.expire_message(now);
        self.take_dropped_files(ctx, now);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_dark_light_mode_switch(ui);
                ui.heading("Linear regression");
            });
        });
        let action = egui::SidePanel::left("input")
            .resizable(true)
            .show(ctx, |ui| {
                let action = self.input_module.side_panel(ui);
                self.message_view(ui);
                action
            })
            .inner;
        self.chart_module.display(ctx);

        if let Some(action) = action {
            if let Some(equation) = self.handle_action(action, now) {
                ctx.output().copied_text = equation;
            }
        }
        if matches!(self.message, Some(Message::Info { .. })) {
            ctx.request_repaint();
        }
    }
}

impl RegressionApp {
    /// Returns text to put on the clipboard.
    fn handle_action(&mut self, action: Action, now: f64) -> Option<String> {
        match action {
            Action::Calculate => self.calculate(),
            Action::Clear => self.clear(),
            Action::CopyEquation => return self.copy_equation(now),
            Action::SampleLoaded => self.message = None,
            Action::FileLoaded(text) => self.load_csv(&text, now),
            Action::FileFailed(err) => {
                error!("{}", err);
                self.message = Some(Message::Error(err));
            }
        }
        None
    }

    fn calculate(&mut self) {
        self.message = None;
        match calculate(&self.input_module.text) {
            Ok(calc) => {
                info!("fitted {} with {} points", calc.fit.equation(), calc.fit.n);
                self.chart_module.render(ChartState::Fitted(calc));
            }
            Err(err) => {
                warn!("calculation failed: {}", err);
                self.message = Some(Message::Error(err.to_string()));
                self.chart_module.render(ChartState::Empty);
            }
        }
    }

    fn clear(&mut self) {
        self.input_module.text.clear();
        self.message = None;
        self.chart_module.render(ChartState::Empty);
    }

    fn copy_equation(&mut self, now: f64) -> Option<String> {
        match self.chart_module.equation() {
            Some(equation) => {
                self.message = Some(Message::Info {
                    text: "Equation copied to clipboard".to_string(),
                    until: now + COPIED_SECS,
                });
                Some(equation)
            }
            None => {
                self.message = Some(Message::Error("No equation to copy".to_string()));
                None
            }
        }
    }

    fn load_csv(&mut self, text: &str, now: f64) {
        self.input_module.text = normalize_csv(text);
        self.message = Some(Message::Info {
            text: "CSV loaded. Check the points and press Calculate.".to_string(),
            until: now + CSV_LOADED_SECS,
        });
    }

    fn expire_message(&mut self, now: f64) {
        if let Some(Message::Info { until, .. }) = self.message {
            if now >= until {
                self.message = None;
            }
        }
    }

    fn take_dropped_files(&mut self, ctx: &egui::Context, now: f64) {
        let dropped = ctx.input().raw.dropped_files.clone();
        // only the last file counts, each one replaces the input
        if let Some(file) = dropped.last() {
            match read_dropped(file) {
                Ok(text) => self.load_csv(&text, now),
                Err(err) => {
                    error!("{}", err);
                    self.message = Some(Message::Error(err));
                }
            }
        }
    }

    fn message_view(&self, ui: &mut Ui) {
        match &self.message {
            Some(Message::Error(text)) => {
                ui.colored_label(ERROR_COLOR, text.as_str());
            }
            Some(Message::Info { text, .. }) => {
                ui.label(text.as_str());
            }
            None => (),
        }
    }
}

fn read_dropped(file: &DroppedFile) -> Result<String, String> {
    if let Some(bytes) = file.bytes.as_ref() {
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = file.path.as_ref() {
            return std::fs::read_to_string(path)
                .map_err(|err| format!("could not read {:?}: {}", path, err));
        }
    }
    Err(format!("could not read dropped file {:?}", file.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(text: &str) -> RegressionApp {
        let mut app = RegressionApp::default();
        app.input_module.text = text.to_string();
        app
    }

    #[test]
    fn calculate_renders_fit() {
        let mut app = app_with("1,1\n2,2\n3,3\n4,4\n5,5");
        app.calculate();
        assert_eq!(app.message, None);
        match app.chart_module.state() {
            ChartState::Fitted(calc) => {
                assert_eq!(calc.fit.n, 5);
                assert_eq!(calc.fit.r2, 1.0);
            }
            ChartState::Empty => panic!("expected a fit"),
        }
    }

    #[test]
    fn failed_calculation_resets_chart() {
        let mut app = app_with("0,1\n1,3");
        app.calculate();
        assert!(matches!(app.chart_module.state(), ChartState::Fitted(_)));

        app.input_module.text = "1,1\nfoo,bar".to_string();
        app.calculate();
        assert_eq!(
            app.message,
            Some(Message::Error("line 2: non-numeric value".to_string()))
        );
        assert_eq!(app.chart_module.state(), &ChartState::Empty);
    }

    #[test]
    fn clear_empties_everything() {
        let mut app = app_with("2,1\n2,2\n2,3");
        app.calculate();
        assert!(matches!(app.message, Some(Message::Error(_))));

        app.handle_action(Action::Clear, 0.0);
        assert!(app.input_module.text.is_empty());
        assert_eq!(app.message, None);
        assert_eq!(app.chart_module.state(), &ChartState::Empty);
    }

    #[test]
    fn copy_needs_an_equation() {
        let mut app = RegressionApp::default();
        assert_eq!(app.handle_action(Action::CopyEquation, 0.0), None);
        assert!(matches!(app.message, Some(Message::Error(_))));

        let mut app = app_with("0,1\n1,3");
        app.calculate();
        assert_eq!(
            app.handle_action(Action::CopyEquation, 0.0).as_deref(),
            Some("y = 2.0000x + 1.0000")
        );
    }

    #[test]
    fn info_messages_expire() {
        let mut app = RegressionApp::default();
        app.handle_action(Action::FileLoaded(" 1,2 \n\n3,4\n".to_string()), 10.0);
        assert_eq!(app.input_module.text, "1,2\n3,4");

        app.expire_message(11.0);
        assert!(matches!(app.message, Some(Message::Info { .. })));
        app.expire_message(12.5);
        assert_eq!(app.message, None);
    }
}
