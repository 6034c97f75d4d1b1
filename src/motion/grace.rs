//! Motion domain: coyote-time and jump-buffer grace windows.

use bevy::prelude::*;

/// Relative slack on a window's end so that summed f32 steps landing exactly
/// on the duration still count as inside it.
const END_TOLERANCE: f32 = 1e-5;

/// A restartable one-shot countdown polled once per physics step.
pub trait GraceTimer {
    /// Restart from zero elapsed time.
    fn start(&mut self);
    fn stop(&mut self);
    fn advance(&mut self, dt: f32);
    fn is_active(&self) -> bool;
}

/// Elapsed-time countdown advanced by the physics step `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    running: bool,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            running: false,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_stopped(&self) -> bool {
        !self.running
    }

    /// Last elapsed time still inside the window (inclusive).
    fn end(&self) -> f32 {
        self.duration + self.duration * END_TOLERANCE
    }
}

impl GraceTimer for Countdown {
    fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn advance(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        self.elapsed += dt;
        if self.elapsed > self.end() {
            self.running = false;
        }
    }

    fn is_active(&self) -> bool {
        self.running && self.elapsed <= self.end()
    }
}

/// The two grace windows. A window is `None` when its duration is not positive,
/// in which case it always reports inactive.
#[derive(Debug, Clone, PartialEq)]
pub struct GraceWindows<T: GraceTimer = Countdown> {
    coyote: Option<T>,
    jump_buffer: Option<T>,
}

impl GraceWindows<Countdown> {
    pub fn new(coyote_time: f32, jump_buffer: f32) -> Self {
        Self::with_timers(
            (coyote_time > 0.0).then(|| Countdown::new(coyote_time)),
            (jump_buffer > 0.0).then(|| Countdown::new(jump_buffer)),
        )
    }
}

impl<T: GraceTimer> GraceWindows<T> {
    pub fn with_timers(coyote: Option<T>, jump_buffer: Option<T>) -> Self {
        Self {
            coyote,
            jump_buffer,
        }
    }

    pub fn coyote(&self) -> Option<&T> {
        self.coyote.as_ref()
    }

    pub fn jump_buffer(&self) -> Option<&T> {
        self.jump_buffer.as_ref()
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(timer) = &mut self.coyote {
            timer.advance(dt);
        }
        if let Some(timer) = &mut self.jump_buffer {
            timer.advance(dt);
        }
    }

    /// Restart the coyote window. Called every grounded step.
    pub fn start_coyote(&mut self) {
        if let Some(timer) = &mut self.coyote {
            timer.start();
        }
    }

    pub fn stop_coyote(&mut self) {
        if let Some(timer) = &mut self.coyote {
            timer.stop();
        }
    }

    /// Restart the buffer window. Returns false when buffering is disabled.
    pub fn start_jump_buffer(&mut self) -> bool {
        match &mut self.jump_buffer {
            Some(timer) => {
                timer.start();
                true
            }
            None => false,
        }
    }

    pub fn stop_jump_buffer(&mut self) {
        if let Some(timer) = &mut self.jump_buffer {
            timer.stop();
        }
    }

    pub fn is_coyote_active(&self) -> bool {
        self.coyote.as_ref().is_some_and(|timer| timer.is_active())
    }

    pub fn is_buffer_active(&self) -> bool {
        self.jump_buffer.as_ref().is_some_and(|timer| timer.is_active())
    }
}
