use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::input::{Playback, Recorder};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, the record or playback
    /// file cannot be opened, or the terminal fails.
    pub fn run(&mut self) -> Result<()> {
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        let mut model = self.load_model(size)?;

        let playback = self
            .playback_path
            .as_deref()
            .map(Playback::open)
            .transpose()
            .context("Failed to open playback file")?;
        let recorder = self
            .record_path
            .as_deref()
            .map(Recorder::create)
            .transpose()
            .context("Failed to create record file")?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - tvi requires an interactive terminal")?;

        let result = self.event_loop(&mut terminal, &mut model, playback, recorder);

        ratatui::restore();
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        mut playback: Option<Playback>,
        mut recorder: Option<Recorder>,
    ) -> Result<()> {
        let mut needs_render = true;
        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                model.prepare_frame();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            let msg = if let Some(source) = playback.as_mut() {
                let Some(byte) = source.next() else {
                    tracing::info!("playback finished");
                    break;
                };
                Some(Message::from_byte(byte))
            } else if event::poll(Duration::from_millis(250))? {
                Self::handle_event(&event::read()?, &mut recorder)
            } else {
                None
            };

            if let Some(msg) = msg {
                *model = update(std::mem::take(model), msg);
                self.run_effects(model);
                needs_render = true;
            }
        }
        Ok(())
    }

    /// Feed `bytes` through the editor without a terminal.
    ///
    /// Each byte goes through `update` and the queued effects, exactly as a
    /// keypress would. Stops early once the editor quits.
    pub fn replay(&mut self, mut model: Model, bytes: impl IntoIterator<Item = u8>) -> Model {
        model.prepare_frame();
        for byte in bytes {
            model = update(model, Message::from_byte(byte));
            self.run_effects(&mut model);
            model.prepare_frame();
            if model.should_quit {
                break;
            }
        }
        model
    }
}
