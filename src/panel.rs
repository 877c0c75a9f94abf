use crate::animation::MAX_TIME;
use crate::driver::PanelState;

pub const FRACTAL_INDEX_RANGE: std::ops::RangeInclusive<f32> = 0.0..=100.0;
pub const COLOR_RANGE: std::ops::RangeInclusive<f32> = 0.0..=10.0;
pub const SLIDER_STEP: f64 = 0.001;
pub const SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.001..=0.5;

/// Live controls: the two shader sliders, playback flags, and a readout
pub fn draw(ctx: &egui::Context, mut state: PanelState<'_>, fps: f32) {
    egui::Window::new("Arcent")
        .title_bar(true)
        .resizable(false)
        .default_pos(egui::pos2(10.0, 10.0))
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0} FPS", fps))
                    .size(20.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );

            ui.add_space(5.0);
            ui.separator();

            ui.add(
                egui::Slider::new(&mut state.shader.fractal_index, FRACTAL_INDEX_RANGE)
                    .step_by(SLIDER_STEP)
                    .text("Arcent Corruption"),
            );
            ui.add(
                egui::Slider::new(&mut state.shader.color, COLOR_RANGE)
                    .step_by(SLIDER_STEP)
                    .text("Entropy Purity"),
            );

            ui.add_space(5.0);
            ui.separator();

            ui.label(
                egui::RichText::new("Playback")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(200, 150, 100)),
            );
            ui.checkbox(&mut state.playback.animate, "Animate");
            ui.checkbox(&mut state.playback.looping, "Loop");
            ui.add(
                egui::Slider::new(&mut state.playback.speed, SPEED_RANGE)
                    .logarithmic(true)
                    .clamping(egui::SliderClamping::Edits)
                    .text("Speed"),
            );

            ui.add(egui::ProgressBar::new((state.time / MAX_TIME) as f32).text(format!("t = {:.2}", state.time)));
            ui.monospace(if state.forward { "Direction: forward" } else { "Direction: backward" });
        });
}
