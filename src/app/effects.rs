use crate::app::model::{Effect, FilterRequest};
use crate::app::{App, Model, ToastLevel};

impl App {
    /// Carry out every effect queued by the last `update`.
    pub(super) fn run_effects(&mut self, model: &mut Model) {
        for effect in model.take_effects() {
            match effect {
                Effect::Save { buffer, quit } => save_buffer(model, buffer, quit),
                Effect::Filter(request) => self.run_filter(model, &request),
            }
        }
    }

    fn run_filter(&mut self, model: &mut Model, request: &FilterRequest) {
        let input = model.filter_input(request);
        match self.filter.run(&request.command, &input) {
            Ok(output) => model.apply_filter_output(request, &output),
            Err(err) => {
                tracing::warn!(command = %request.command, %err, "filter failed");
                model.show_toast(ToastLevel::Error, format!("Filter failed: {err}"));
            }
        }
    }
}

fn save_buffer(model: &mut Model, index: usize, quit: bool) {
    let Some(buffer) = model.buffers.get(index) else {
        return;
    };
    let name = buffer.display_name();
    let lines = buffer.line_count();
    match buffer.save() {
        Ok(bytes) => {
            tracing::info!(file = %name, lines, bytes, "saved");
            model.show_toast(ToastLevel::Info, format!("\"{name}\" {lines}L, {bytes}B written"));
            if quit {
                model.should_quit = true;
            }
        }
        Err(err) => {
            tracing::warn!(file = %name, %err, "save failed");
            model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
        }
    }
}
