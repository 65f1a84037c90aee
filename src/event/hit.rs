/// A single pixel with a deposited signal.
///
/// `signal` and the two times are payload: they are carried into the output
/// collections untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelHit {
    /// Pixel column index
    pub x: u32,
    /// Pixel row index
    pub y: u32,
    /// Collected signal, arbitrary units
    pub signal: f64,
    /// Time relative to the event start in the detector frame, internal units
    pub local_time: f64,
    /// Time relative to the event start in the global frame, internal units
    pub global_time: f64,
}

impl PixelHit {
    /// Hit without timing information
    pub fn new(x: u32, y: u32, signal: f64) -> Self {
        Self {
            x,
            y,
            signal,
            local_time: 0.0,
            global_time: 0.0,
        }
    }

    /// Attach timing information
    pub fn with_time(mut self, local_time: f64, global_time: f64) -> Self {
        self.local_time = local_time;
        self.global_time = global_time;
        self
    }
}

/// All hits of one detector in one event, as delivered by the upstream producer
#[derive(Debug, Clone, PartialEq)]
pub struct PixelHitMessage {
    /// Name of the detector the hits belong to
    pub detector: String,
    /// The hits
    pub hits: Vec<PixelHit>,
}

impl PixelHitMessage {
    /// Create a message for `detector`
    pub fn new(detector: impl Into<String>, hits: Vec<PixelHit>) -> Self {
        Self {
            detector: detector.into(),
            hits,
        }
    }
}
