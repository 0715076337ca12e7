use crate::error::CropError;
use crate::file::{ImageFile, PreparedImage, decode, validate};
use std::sync::mpsc;
use std::thread;

type DecodeResult = Result<PreparedImage, CropError>;

/// Decodes uploads off the calling thread.
///
/// Validation runs synchronously; only a file that passes it gets a decode
/// thread. The result is delivered through a [`PendingImage`].
pub struct ImageLoader;

impl ImageLoader {
    pub fn spawn(file: Option<ImageFile>, max_size_mb: f64) -> PendingImage {
        if let Err(err) = validate(file.as_ref(), max_size_mb) {
            log::debug!(target: "crop", "upload rejected before decode: {err}");
            return PendingImage::resolved(Err(err));
        }
        let Some(file) = file else {
            return PendingImage::resolved(Err(CropError::NoFile));
        };

        let (tx, rx) = mpsc::channel();
        let name = file.name.clone();
        let spawned = thread::Builder::new()
            .name(format!("crop-decode:{name}"))
            .spawn(move || {
                let _ = tx.send(decode(file));
            });

        match spawned {
            Ok(_) => PendingImage {
                state: PendingState::Waiting(rx),
            },
            Err(err) => PendingImage::resolved(Err(CropError::Read(err))),
        }
    }
}

enum PendingState {
    Resolved(DecodeResult),
    Waiting(mpsc::Receiver<DecodeResult>),
    Taken,
}

/// A decode in flight. Yields its result exactly once.
pub struct PendingImage {
    state: PendingState,
}

impl PendingImage {
    fn resolved(result: DecodeResult) -> Self {
        Self {
            state: PendingState::Resolved(result),
        }
    }

    /// Non-blocking. `None` while decoding and after the result was taken.
    pub fn poll(&mut self) -> Option<DecodeResult> {
        match std::mem::replace(&mut self.state, PendingState::Taken) {
            PendingState::Resolved(result) => Some(result),
            PendingState::Waiting(rx) => match rx.try_recv() {
                Ok(result) => Some(result),
                Err(mpsc::TryRecvError::Empty) => {
                    self.state = PendingState::Waiting(rx);
                    None
                }
                Err(mpsc::TryRecvError::Disconnected) => Some(Err(decoder_gone())),
            },
            PendingState::Taken => None,
        }
    }

    /// Block until the decode finishes. A second call reports
    /// [`CropError::NotPrepared`].
    pub fn wait(&mut self) -> DecodeResult {
        match std::mem::replace(&mut self.state, PendingState::Taken) {
            PendingState::Resolved(result) => result,
            PendingState::Waiting(rx) => rx.recv().unwrap_or_else(|_| Err(decoder_gone())),
            PendingState::Taken => Err(CropError::NotPrepared),
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.state, PendingState::Waiting(_))
    }
}

fn decoder_gone() -> CropError {
    CropError::Decode("decoder thread exited without a result".to_string())
}
