use crate::controllers::export::errors::ExportError;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::renderer::ports::presenter::RenderPresenterPort;
use crate::controllers::renderer::renderer::Renderer;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::presenters::file::png::PngFilePresenter;
use crate::presenters::file::ppm::PpmFilePresenter;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Ppm,
}

impl ExportFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("ppm") => Ok(Self::Ppm),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn presenter(self) -> Box<dyn FilePresenterPort> {
        match self {
            Self::Png => Box::new(PngFilePresenter),
            Self::Ppm => Box::new(PpmFilePresenter),
        }
    }
}

/// Receives the outcome of a [`Renderer::export`] request.
#[derive(Debug)]
pub struct ExportHandle {
    receiver: Receiver<Result<PathBuf, ExportError>>,
}

impl ExportHandle {
    /// Blocks until the file is written or the export fails.
    pub fn wait(self) -> Result<PathBuf, ExportError> {
        self.receiver.recv().unwrap_or(Err(ExportError::Aborted))
    }

    /// `None` if the export is still running after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<PathBuf, ExportError>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(ExportError::Aborted)),
        }
    }

    pub fn try_result(&self) -> Option<Result<PathBuf, ExportError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ExportError::Aborted)),
        }
    }
}

/// Forwards the outcome of a one-shot render.
struct FinishedImageSink {
    sender: Sender<Result<PixelBuffer, String>>,
}

impl RenderPresenterPort for FinishedImageSink {
    fn finished(&self, _generation: u64, image: &PixelBuffer) {
        let _ = self.sender.send(Ok(image.clone()));
    }

    fn failed(&self, _generation: u64, reason: &str) {
        let _ = self.sender.send(Err(reason.to_string()));
    }
}

impl Renderer {
    /// Renders the current view at `width`×`height` on a separate one-shot renderer and
    /// writes it to `path` as PNG or PPM, chosen by extension.
    ///
    /// Returns as soon as the render is queued; the outcome arrives on the handle.
    pub fn export(
        &self,
        width: u32,
        height: u32,
        path: impl Into<PathBuf>,
    ) -> Result<ExportHandle, ExportError> {
        let path = path.into();
        let format = ExportFormat::from_path(&path)?;

        let (image_sender, image_receiver) = mpsc::channel();
        let sink = Arc::new(FinishedImageSink {
            sender: image_sender,
        });

        let mut one_shot = self.one_shot(width, height, sink)?;
        one_shot.restart()?;

        let (result_sender, result_receiver) = mpsc::channel();

        thread::Builder::new()
            .name("export".to_string())
            .spawn(move || {
                let result = match image_receiver.recv() {
                    Ok(Ok(image)) => format
                        .presenter()
                        .present(&image, &path)
                        .map(|()| path)
                        .map_err(ExportError::from),
                    Ok(Err(reason)) => Err(ExportError::Render { reason }),
                    Err(_) => Err(ExportError::Aborted),
                };
                one_shot.stop();

                match &result {
                    Ok(path) => info!("exported {}", path.display()),
                    Err(err) => warn!("{}", err),
                }

                let _ = result_sender.send(result);
            })
            .map_err(ExportError::Thread)?;

        Ok(ExportHandle {
            receiver: result_receiver,
        })
    }
}
