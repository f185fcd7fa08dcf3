//! GPIO output driver for the crank and cam lines
//!
//! Two push-pull outputs, one per channel, with per-channel polarity so
//! active-low (open-collector emulating) ECU inputs can be served without
//! external inverters.

use embassy_rp::gpio::{Level as GpioLevel, Output, Pin};
use embassy_rp::Peri;

use ecusim_core::config::OutputConfig;
use ecusim_core::scheduler::{Channel, Edge, Level};
use ecusim_core::traits::EdgeOutput;

/// Crank + cam output lines
pub struct GpioEdgeOutputs<'d> {
    crank: Output<'d>,
    cam: Output<'d>,
    config: OutputConfig,
}

impl<'d> GpioEdgeOutputs<'d> {
    /// Create both outputs, driven to their idle levels
    pub fn new<CRANK: Pin, CAM: Pin>(
        crank_pin: Peri<'d, CRANK>,
        cam_pin: Peri<'d, CAM>,
        config: OutputConfig,
    ) -> Self {
        let crank_idle = physical_level(config.crank_polarity.physical(false));
        let cam_idle = physical_level(config.cam_polarity.physical(false));
        Self {
            crank: Output::new(crank_pin, crank_idle),
            cam: Output::new(cam_pin, cam_idle),
            config,
        }
    }
}

impl EdgeOutput for GpioEdgeOutputs<'_> {
    fn apply(&mut self, edge: Edge) {
        let active = edge.level == Level::Active;
        match edge.channel {
            Channel::Crank => {
                let high = self.config.crank_polarity.physical(active);
                self.crank.set_level(physical_level(high));
            }
            Channel::Cam => {
                let high = self.config.cam_polarity.physical(active);
                self.cam.set_level(physical_level(high));
            }
        }
    }

    fn quiesce(&mut self) {
        self.crank
            .set_level(physical_level(self.config.crank_polarity.physical(false)));
        self.cam
            .set_level(physical_level(self.config.cam_polarity.physical(false)));
    }
}

fn physical_level(high: bool) -> GpioLevel {
    if high {
        GpioLevel::High
    } else {
        GpioLevel::Low
    }
}
