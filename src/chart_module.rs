use egui::{
    plot::{Legend, Line, Plot, Points},
    Color32, Context, Grid, RichText, Ui, Vec2,
};
use itertools::Itertools;

use crate::{
    bounds::{axis_bounds, Bounds},
    Calculation,
};

const DATA_COLOR: Color32 = Color32::from_rgb(110, 231, 183);
const LINE_COLOR: Color32 = Color32::from_rgb(96, 165, 250);
/// `axis_bounds` already pads, the plot must not add its own margin on top.
const PLOT_MARGIN: Vec2 = Vec2::ZERO;

/// What the chart currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChartState {
    #[default]
    Empty,
    Fitted(Calculation),
}

impl ChartState {
    fn bounds(&self) -> Bounds {
        match self {
            ChartState::Empty => axis_bounds(&[], None),
            ChartState::Fitted(calc) => calc.bounds,
        }
    }
}

/// Owns the plot. Every call to [`ChartModule::render`] throws away the
/// previous plot, including its pan and zoom, and builds a new one.
#[derive(Default)]
pub struct ChartModule {
    state: ChartState,
    generation: u64,
}

impl ChartModule {
    pub fn render(&mut self, state: ChartState) {
        self.generation = self.generation.wrapping_add(1);
        self.state = state;
    }

    #[cfg(test)]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn equation(&self) -> Option<String> {
        match &self.state {
            ChartState::Empty => None,
            ChartState::Fitted(calc) => Some(calc.fit.equation()),
        }
    }

    pub fn display(&self, ctx: &Context) {
        egui::TopBottomPanel::bottom("statistics").show(ctx, |ui| self.statistics(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.main_view(ui));
    }
}

impl ChartModule {
    fn main_view(&self, ui: &mut Ui) {
        let bounds = self.state.bounds();
        Plot::new(("regression_plot", self.generation))
            .legend(Legend::default())
            .set_margin_fraction(PLOT_MARGIN)
            .include_x(bounds.x_min)
            .include_x(bounds.x_max)
            .include_y(bounds.y_min)
            .include_y(bounds.y_max)
            .show(ui, |plot_ui| {
                if let ChartState::Fitted(calc) = &self.state {
                    let data = calc.points.iter().copied().map(<[f64; 2]>::from).collect_vec();
                    plot_ui.points(
                        Points::new(data)
                            .radius(5.0)
                            .color(DATA_COLOR)
                            .name("Data"),
                    );
                    let segment = calc.segment.map(<[f64; 2]>::from).to_vec();
                    plot_ui.line(
                        Line::new(segment)
                            .width(2.0)
                            .color(LINE_COLOR)
                            .name("Regression"),
                    );
                }
            });
    }

    fn statistics(&self, ui: &mut Ui) {
        let fit = match &self.state {
            ChartState::Empty => None,
            ChartState::Fitted(calc) => Some(calc.fit),
        };
        ui.horizontal(|ui| {
            ui.label("Equation:");
            match fit {
                Some(fit) => ui.strong(fit.equation()),
                None => ui.strong("—"),
            };
        });
        let dash = || "-".to_string();
        Grid::new("statistics_grid").num_columns(4).show(ui, |ui| {
            ui.label("n");
            ui.label(RichText::new(fit.map_or_else(dash, |f| f.n.to_string())).monospace());
            ui.label("R²");
            ui.label(RichText::new(fit.map_or_else(dash, |f| format!("{:.4}", f.r2))).monospace());
            ui.end_row();
            ui.label("m");
            ui.label(RichText::new(fit.map_or_else(dash, |f| format!("{:.6}", f.m))).monospace());
            ui.label("b");
            ui.label(RichText::new(fit.map_or_else(dash, |f| format!("{:.6}", f.b))).monospace());
            ui.end_row();
        });
    }
}
