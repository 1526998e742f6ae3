use egui::{TextEdit, Ui};

pub const SAMPLES: [(&str, &str); 3] = [
    ("easy", "1,1\n2,2\n3,3\n4,4\n5,5"),
    ("noisy", "1,1.1\n2,1.9\n3,3.2\n4,4.1\n5,4.7\n6,6.3"),
    ("vertical", "2,1\n2,2\n2,3"),
];

/// Requests from the input panel, carried out by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Calculate,
    Clear,
    CopyEquation,
    SampleLoaded,
    /// Raw contents of a file the user picked.
    FileLoaded(String),
    FileFailed(String),
}

#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InputModule {
    pub text: String,
}

impl InputModule {
    pub fn side_panel(&mut self, ui: &mut Ui) -> Option<Action> {
        let mut action = None;

        ui.heading("Points");
        ui.label("One point per line: x,y (comma, semicolon or space).");
        ui.add(
            TextEdit::multiline(&mut self.text)
                .code_editor()
                .desired_rows(12)
                .hint_text("1,1\n2,2\n3,3"),
        );

        ui.horizontal(|ui| {
            if ui.button("Calculate").clicked() {
                action = Some(Action::Calculate);
            }
            if ui.button("Clear").clicked() {
                action = Some(Action::Clear);
            }
            if ui.button("Copy equation").clicked() {
                action = Some(Action::CopyEquation);
            }
        });

        #[cfg(not(target_arch = "wasm32"))]
        {
            if ui.button("Load CSV…").clicked() {
                action = pick_csv_file();
            }
        }
        ui.label("or drop a CSV file on the window");

        ui.separator();
        ui.label("Samples");
        ui.horizontal(|ui| {
            for (name, sample) in SAMPLES {
                if ui.button(name).clicked() {
                    self.text = sample.to_string();
                    action = Some(Action::SampleLoaded);
                }
            }
        });

        action
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn pick_csv_file() -> Option<Action> {
    use native_dialog::FileDialog;

    let dialog = FileDialog::new().add_filter("CSV", &["csv", "txt"]);
    let dialog_result = match home::home_dir() {
        Some(home) => dialog.set_location(&home).show_open_single_file(),
        None => dialog.show_open_single_file(),
    };
    match dialog_result {
        Ok(Some(path)) => match std::fs::read_to_string(&path) {
            Ok(text) => Some(Action::FileLoaded(text)),
            Err(err) => Some(Action::FileFailed(format!(
                "could not read {:?}: {}",
                path, err
            ))),
        },
        Ok(None) => None,
        Err(err) => Some(Action::FileFailed(format!(
            "could not open file dialog: {}",
            err
        ))),
    }
}
