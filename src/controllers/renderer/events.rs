use crate::core::data::pixel_buffer::PixelBuffer;

/// Messages drained by the renderer's consumer thread.
#[derive(Debug)]
pub(crate) enum RenderMessage {
    ImageReplaced { generation: u64 },
    Tile { generation: u64, tile: PixelBuffer },
    FirstPassDone { generation: u64 },
    Finished { generation: u64 },
    Failed { generation: u64, reason: String },
    Shutdown,
}
