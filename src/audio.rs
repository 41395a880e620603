//! Background music: started once at startup, looped for the whole run.
use std::io::Cursor;
use std::path::Path;

use log::info;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::error::AssetError;

const MUSIC_VOLUME: f32 = 0.35;

pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bg_sink: Option<Sink>,
}

impl AudioManager {
    pub fn new() -> Result<Self, AssetError> {
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| AssetError::Output(e.to_string()))?;
        Ok(Self { _stream, handle, bg_sink: None })
    }

    /// Fire and forget; a second call while music plays does nothing.
    pub fn play_music_loop(&mut self, path: &Path) -> Result<(), AssetError> {
        if self.bg_sink.is_some() {
            return Ok(());
        }
        let bytes = std::fs::read(path).map_err(|source| AssetError::MusicIo {
            path: path.to_path_buf(),
            source,
        })?;
        let dec = Decoder::new_looped(Cursor::new(bytes)).map_err(|source| AssetError::MusicDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let sink = Sink::try_new(&self.handle).map_err(|e| AssetError::Output(e.to_string()))?;
        sink.append(dec);
        sink.set_volume(MUSIC_VOLUME);
        self.bg_sink = Some(sink);
        info!("music {:?} playing", path);
        Ok(())
    }
}
