//! MCP4725 12-bit I2C DAC driver.
//!
//! Blocking driver for the Microchip MCP4725, generic over any
//! [`embedded_hal::i2c::I2c`] implementation. The streaming path bypasses
//! this driver (the tick handler hands pre-encoded frames straight to the
//! transfer engine); the driver owns everything done at bus speed: the
//! power-on probe, smoke-test writes, voltage/CV helpers and power-down
//! control.
//!
//! The board's analog stage rescales the 0–5 V DAC output to ±5 V, which
//! is what the CV helpers model.
//!
//! # Example
//!
//! ```ignore
//! let mut dac = Mcp4725::new(i2c);
//! let status = dac.probe()?;     // fatal if the device does not answer
//! dac.set_raw(2048)?;            // mid-scale smoke test
//! dac.set_cv_millivolts(-2500)?; // -2.5 V after output conditioning
//! ```

use embedded_hal::i2c::I2c;

use super::commands::{self, PowerMode, Status};

/// 5 V reference in millivolts.
const DAC_VREF_MV: u32 = 5000;

/// `2^12`, the divisor base for millivolt conversion.
const DAC_RESOLUTION: u32 = 1 << crate::constants::DAC_RESOLUTION_BITS;

/// Full-scale span of the CV range after output conditioning, ±5000 mV.
const CV_SPAN_MV: i32 = 5000;

/// MCP4725 12-bit DAC driver.
///
/// Caches the last written value and power mode so mode changes can
/// re-write the current value without a bus read.
pub struct Mcp4725<I2C> {
    i2c: I2C,
    address: u8,
    value: u16,
    power_mode: PowerMode,
}

impl<I2C> Mcp4725<I2C>
where
    I2C: I2c,
{
    /// Default I2C address (A0 pin tied to ground).
    pub const DEFAULT_ADDRESS: u8 = commands::DEFAULT_ADDRESS;

    /// Alternate I2C address (A0 pin tied to VCC).
    pub const ALT_ADDRESS: u8 = commands::ALT_ADDRESS;

    /// Create a new driver with the default I2C address (0x60).
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, Self::DEFAULT_ADDRESS)
    }

    /// Create a new driver with a specific I2C address.
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Mcp4725 {
            i2c,
            address,
            value: 0,
            power_mode: PowerMode::Normal,
        }
    }

    /// Probe the device with a status read.
    ///
    /// An `Err` means the device did not answer on the bus; the pipeline
    /// cannot run and the caller is expected to halt. On success the
    /// cached value and power mode are seeded from the device state.
    pub fn probe(&mut self) -> Result<Status, I2C::Error> {
        let status = self.read_status()?;
        self.value = status.dac_value;
        self.power_mode = status.power_mode;
        log::info!(
            "MCP4725 at 0x{:02X}: dac={} eeprom={} mode={:?}",
            self.address,
            status.dac_value,
            status.eeprom_value,
            status.power_mode
        );
        Ok(status)
    }

    /// Blocking volatile write of a raw 12-bit value.
    ///
    /// Values above 4095 are clamped to full scale.
    pub fn set_raw(&mut self, value: u16) -> Result<(), I2C::Error> {
        self.write_value(value, self.power_mode, false)
    }

    /// Blocking write of a raw value to both the DAC register and EEPROM.
    ///
    /// The device restores the persisted value at power-up. EEPROM writes
    /// take the device a few milliseconds to commit.
    pub fn set_raw_persist(&mut self, value: u16) -> Result<(), I2C::Error> {
        self.write_value(value, self.power_mode, true)
    }

    /// Set the output in millivolts against the 5 V reference.
    pub fn set_millivolts(&mut self, millivolts: u16) -> Result<(), I2C::Error> {
        let mv = (millivolts as u32).min(DAC_VREF_MV);
        let value = (mv * DAC_RESOLUTION) / DAC_VREF_MV;
        self.set_raw(value as u16)
    }

    /// Set the output in volts (0.0–5.0).
    pub fn set_volts(&mut self, volts: f32) -> Result<(), I2C::Error> {
        let clamped = if volts < 0.0 { 0.0 } else { volts };
        self.set_millivolts((clamped * 1000.0) as u16)
    }

    /// Set a bipolar control voltage in millivolts (−5000 to +5000).
    ///
    /// The DAC itself is unipolar; the board's conditioning stage maps
    /// DAC 0 mV → −5 V and DAC 5000 mV → +5 V, so −5000 lands on code 0
    /// and 0 lands on mid-scale.
    pub fn set_cv_millivolts(&mut self, millivolts: i16) -> Result<(), I2C::Error> {
        let cv = (millivolts as i32).clamp(-CV_SPAN_MV, CV_SPAN_MV);
        let dac_mv = ((cv + CV_SPAN_MV) / 2) as u16;
        self.set_millivolts(dac_mv)
    }

    /// Switch power mode, re-writing the current value with the new mode.
    pub fn power_down(&mut self, mode: PowerMode) -> Result<(), I2C::Error> {
        self.write_value(self.value, mode, false)
    }

    /// Blocking 5-byte status read.
    pub fn read_status(&mut self) -> Result<Status, I2C::Error> {
        let mut raw = [0u8; 5];
        self.i2c.read(self.address, &mut raw)?;
        Ok(commands::parse_status(&raw))
    }

    /// Last value written (or read back by [`probe()`](Self::probe)).
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Power mode of the last write.
    pub fn power_mode(&self) -> PowerMode {
        self.power_mode
    }

    /// Consume the driver and return the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_value(
        &mut self,
        value: u16,
        mode: PowerMode,
        persist: bool,
    ) -> Result<(), I2C::Error> {
        let value = value.min(crate::constants::DAC_MAX_CODE);
        let frame = if persist {
            commands::eeprom_write_frame(value, mode)
        } else {
            commands::fast_write_frame(value, mode)
        };
        self.i2c.write(self.address, &frame)?;
        self.value = value;
        self.power_mode = mode;
        Ok(())
    }
}
