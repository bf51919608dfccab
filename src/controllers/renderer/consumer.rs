use crate::controllers::renderer::events::RenderMessage;
use crate::controllers::renderer::ports::presenter::RenderPresenterPort;
use crate::controllers::renderer::state::{AtomicRenderState, RenderState};
use crate::core::data::pixel_buffer::PixelBuffer;
use log::{debug, warn};
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// The display buffer and the pass bookkeeping guarding it.
///
/// `generation` and `state` only change while `image` is locked, so a message checked
/// under the lock cannot race a new pass.
pub(crate) struct Display {
    pub(crate) image: Mutex<PixelBuffer>,
    pub(crate) generation: AtomicU64,
    pub(crate) state: AtomicRenderState,
    pub(crate) presenter: Arc<dyn RenderPresenterPort>,
}

impl Display {
    pub(crate) fn new(image: PixelBuffer, presenter: Arc<dyn RenderPresenterPort>) -> Self {
        Self {
            image: Mutex::new(image),
            generation: AtomicU64::new(0),
            state: AtomicRenderState::default(),
            presenter,
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }
}

pub(crate) fn spawn_consumer(
    display: Arc<Display>,
    receiver: Receiver<RenderMessage>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("render-consumer".to_string())
        .spawn(move || consume(&display, &receiver))
}

/// Sole writer of the display buffer. Runs until `Shutdown` or until every sender is gone.
fn consume(display: &Display, receiver: &Receiver<RenderMessage>) {
    while let Ok(message) = receiver.recv() {
        match message {
            RenderMessage::Shutdown => break,
            RenderMessage::ImageReplaced { generation } => {
                let image = display.image.lock().unwrap();

                if display.is_current(generation) {
                    display.presenter.image_replaced(generation, &image);
                }
            }
            RenderMessage::Tile { generation, tile } => {
                let mut image = display.image.lock().unwrap();

                if !display.is_current(generation) || !display.state.load().is_active() {
                    debug!("dropping stale tile from render {}", generation);
                    continue;
                }

                match image.blit(&tile) {
                    Ok(()) => display.presenter.tile_applied(generation, tile.pixel_rect()),
                    Err(err) => warn!("render {}: tile rejected: {}", generation, err),
                }
            }
            RenderMessage::FirstPassDone { generation } => {
                let _image = display.image.lock().unwrap();

                if display.is_current(generation)
                    && display.state.load() == RenderState::Rendering
                {
                    display.state.store(RenderState::FirstPassDone);
                    display.presenter.first_pass_done(generation);
                }
            }
            RenderMessage::Finished { generation } => {
                let image = display.image.lock().unwrap();

                if display.is_current(generation) && display.state.load().is_active() {
                    display.state.store(RenderState::Finished);
                    display.presenter.finished(generation, &image);
                }
            }
            RenderMessage::Failed { generation, reason } => {
                let _image = display.image.lock().unwrap();

                if display.is_current(generation) && display.state.load().is_active() {
                    display.state.store(RenderState::Failed);
                    display.presenter.failed(generation, &reason);
                }
            }
        }
    }
}
