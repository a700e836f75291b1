/// what the gui tells the audio thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    RingStarted {
        /// percentage, 0 to 100
        volume: f32,
        /// tone pitch in Hz
        frequency: f32,
    },
    // sent on stop and on reset, safe even if nothing is ringing
    RingStopped,
}
