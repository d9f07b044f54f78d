/// The receipts file input starts with a camera-capture hint so phones open
/// the camera directly. Users picking an existing file instead release the
/// hint; the release lasts for the rest of the session and cannot be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Camera,
    FilePicker,
}

#[derive(Debug)]
pub struct ReceiptInput {
    mode: CaptureMode,
}

impl ReceiptInput {
    pub fn new() -> Self {
        Self {
            mode: CaptureMode::Camera,
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// One-way transition to the plain file picker. Idempotent.
    pub fn release_capture(&mut self) {
        self.mode = CaptureMode::FilePicker;
    }
}

impl Default for ReceiptInput {
    fn default() -> Self {
        Self::new()
    }
}
