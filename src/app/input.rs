use crossterm::event::Event;

use crate::app::{App, Message};
use crate::input::{Recorder, key_to_byte};

impl App {
    /// Turn a terminal event into a message, mirroring key bytes to the
    /// recorder when one is active.
    pub(super) fn handle_event(event: &Event, recorder: &mut Option<Recorder>) -> Option<Message> {
        match event {
            Event::Key(key) => {
                let byte = key_to_byte(*key)?;
                if let Some(rec) = recorder.as_mut()
                    && let Err(err) = rec.record(byte)
                {
                    tracing::warn!(%err, "recording stopped");
                    *recorder = None;
                }
                Some(Message::from_byte(byte))
            }
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }
}
