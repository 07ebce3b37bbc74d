/// Transition reported by a timer after it was decremented
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerState {
    /// Still counting down
    On,
    /// Was already at zero
    Off,
    /// Has just reached zero
    Finished,
}

/// 8-bit countdown register, decremented at an external cadence
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timer(u8);

impl Timer {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub fn store(&mut self, value: u8) {
        self.0 = value;
    }

    #[inline]
    pub fn load(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn decrement(&mut self) -> TimerState {
        if self.0 > 0 {
            self.0 -= 1;
            if self.0 == 0 {
                TimerState::Finished
            } else {
                TimerState::On
            }
        } else {
            TimerState::Off
        }
    }
}
