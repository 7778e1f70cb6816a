//! The wheel as it lives on a page: a modal with a canvas and a spin button.
//!
//! Opening the modal rewinds the wheel to angle 0 and paints it. The spin
//! button is only reachable while the modal is open; closing the modal does
//! not stop a spin that is already running.

use fortuna_core::{Canvas, Style, Tick, Wheel, WheelConfig, WheelError};
use rand::Rng;

#[derive(Debug)]
pub struct WheelWidget<C: Canvas> {
    wheel: Wheel,
    canvas: C,
    style: Style,
    open: bool,
}

impl<C: Canvas> WheelWidget<C> {
    /// Mount the widget on `canvas`. Without a canvas there is nothing to
    /// draw on, so the widget declines to attach and `Ok(None)` comes back.
    pub fn attach(canvas: Option<C>, config: &WheelConfig) -> Result<Option<Self>, WheelError> {
        let Some(canvas) = canvas else {
            tracing::debug!("no canvas to draw on; wheel not attached");
            return Ok(None);
        };
        let wheel = Wheel::from_config(config)?;
        Ok(Some(Self {
            wheel,
            canvas,
            style: Style::from(config),
            open: false,
        }))
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_spinning(&self) -> bool {
        self.wheel.is_spinning()
    }

    /// Show the modal with a freshly rewound wheel.
    pub fn open(&mut self) {
        self.open = true;
        self.wheel.reset();
        self.draw(self.wheel.angle());
        tracing::debug!("wheel opened");
    }

    pub fn close(&mut self) {
        self.open = false;
        tracing::debug!(spinning = self.wheel.is_spinning(), "wheel closed");
    }

    /// Press the spin button. `None` when the modal is hidden or a spin is
    /// already running.
    pub fn spin<R: Rng>(&mut self, rng: &mut R) -> Option<f64> {
        if !self.open {
            tracing::debug!("spin pressed while closed; ignored");
            return None;
        }
        self.wheel.spin(rng)
    }

    /// Advance the animation to `now` and repaint.
    pub fn advance(&mut self, now: f64) -> Tick {
        let tick = self.wheel.advance(now);
        match &tick {
            Tick::Frame { angle, .. } | Tick::Settled { angle, .. } => self.draw(*angle),
            Tick::Idle => {}
        }
        tick
    }

    fn draw(&mut self, angle: f64) {
        self.wheel.render(&mut self.canvas, angle, &self.style);
    }
}
