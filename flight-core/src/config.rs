//! Control-loop tuning.
//!
//! Everything the translator and scheduler need is collected in
//! [`ControlConfig`]. Customize it at compile time by creating your own
//! const, starting from [`DEFAULT_CONFIG`].

use embassy_time::Duration;

/// Raw controller range: axis values lie within `±AXIS_OFFSET`.
pub const AXIS_OFFSET: f32 = 32767.0;

/// Tuning for stick translation and task timing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfig {
    /// Full-scale raw axis value.
    pub axis_offset: f32,
    /// Dead zone (raw units) for forward/back, left/right and up/down.
    pub translate_dead_zone: f32,
    /// Dead zone (raw units) for yaw. Wider than the translation dead zone
    /// to keep the vehicle from spinning on a slightly off-center stick.
    pub rotate_dead_zone: f32,
    /// Upper bound of the sink's magnitude range.
    pub max_magnitude: f32,
    /// Period of each stick's control tick.
    pub control_period: Duration,
    /// Period of the telemetry report.
    pub report_period: Duration,
    /// Delay after activation before the automatic landing.
    pub safety_land_after: Duration,
}

/// Default tuning: 50 ms control ticks, 1 s reports, land after 20 s.
pub const DEFAULT_CONFIG: ControlConfig = ControlConfig {
    axis_offset: AXIS_OFFSET,
    translate_dead_zone: 10.0,
    rotate_dead_zone: 20.0,
    max_magnitude: 100.0,
    control_period: Duration::from_millis(50),
    report_period: Duration::from_secs(1),
    safety_land_after: Duration::from_secs(20),
};

impl Default for ControlConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Reasons a [`ControlConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `axis_offset` is not a positive finite number.
    AxisOffset,
    /// `max_magnitude` is not a positive finite number.
    MaxMagnitude,
    /// A dead zone is negative or not finite.
    DeadZone,
    /// A task period or delay is zero.
    ZeroPeriod,
}

impl ControlConfig {
    /// Check that the configuration can drive the control loop.
    pub fn sanity_check(&self) -> Result<(), ConfigError> {
        if !(self.axis_offset.is_finite() && self.axis_offset > 0.0) {
            return Err(ConfigError::AxisOffset);
        }
        if !(self.max_magnitude.is_finite() && self.max_magnitude > 0.0) {
            return Err(ConfigError::MaxMagnitude);
        }
        for zone in [self.translate_dead_zone, self.rotate_dead_zone] {
            if !(zone.is_finite() && zone >= 0.0) {
                return Err(ConfigError::DeadZone);
            }
        }
        let zero = Duration::from_ticks(0);
        if self.control_period == zero || self.report_period == zero {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }
}
