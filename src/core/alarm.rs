// Alarm playback control - owns the audio resource and keeps play/stop
// idempotent across ticks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::source::{Buffered, Source};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;

/// Failures at the audio boundary. Everything else in the crate is total;
/// only these propagate, and they are never retried silently.
#[derive(Debug, Error)]
pub enum AlarmError {
    #[error("failed to read alarm waveform: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode alarm waveform: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("audio output unavailable: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("playback failed: {0}")]
    Playback(String),
}

/// A preloaded waveform the controller can start, silence, and query.
///
/// Contract for implementations:
/// - `play` starts the waveform from the beginning, replacing any handle
///   left over from an earlier playback.
/// - `stop` is safe at any time, including immediately after `play` and
///   when nothing is sounding.
/// - `is_playing` reflects actual playback: a waveform that ran to
///   completion reports `false` without `stop` ever being called.
pub trait AudioResource {
    fn play(&mut self) -> Result<(), AlarmError>;
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// Production audio resource backed by rodio.
///
/// The waveform file is decoded once at construction; each playback
/// connects a fresh sink to the output mixer and appends a clone of the
/// buffered samples. The sink is the playback handle: replacing or
/// dropping it silences whatever it still owned, so exactly one handle is
/// live at a time.
pub struct RodioAlarm {
    stream: OutputStream,
    waveform: Buffered<Decoder<BufReader<File>>>,
    sink: Option<Sink>,
}

impl RodioAlarm {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AlarmError> {
        let file = File::open(path.as_ref())?;
        let waveform = Decoder::new(BufReader::new(file))?.buffered();
        let stream = OutputStreamBuilder::open_default_stream()?;
        Ok(Self {
            stream,
            waveform,
            sink: None,
        })
    }
}

impl AudioResource for RodioAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(self.waveform.clone());
        // Replacing the previous sink drops it, which silences anything
        // it was still playing.
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().map(|sink| !sink.empty()).unwrap_or(false)
    }
}

/// Idempotent start/stop layer over an [`AudioResource`].
///
/// The tick thread is the only writer; the audio backend merely finishes
/// handles it was given. `play` leaves a sound already in flight alone, so
/// repeated out-of-bounds ticks never stack overlapping alarms. `stop` is
/// unconditional: it must silence a playback that started on the same
/// tick.
pub struct AlarmController<A: AudioResource> {
    audio: A,
}

impl<A: AudioResource> AlarmController<A> {
    pub fn new(audio: A) -> Self {
        Self { audio }
    }

    /// Start the alarm unless it is already sounding. A waveform that
    /// finished naturally counts as not sounding, so the alarm re-fires
    /// on the next out-of-bounds tick. Device failures propagate.
    pub fn play(&mut self) -> Result<(), AlarmError> {
        if self.audio.is_playing() {
            return Ok(());
        }
        self.audio.play()
    }

    pub fn stop(&mut self) {
        self.audio.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.audio.is_playing()
    }
}
