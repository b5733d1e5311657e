//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 and 128x32 SSD1306-based OLED displays over any
//! [`DisplayInterface`]. Drawing goes to a local framebuffer; `show()`
//! sends the whole buffer using horizontal addressing.

use oledterm_core::{PixelDriver, PixelValue};

use crate::framebuffer::{DisplaySize, FrameBuffer};
use crate::interface::{DisplayError, DisplayInterface};

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_ENTIRE_ON: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEM_ADDR: u8 = 0x20;
    pub const SET_COL_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA0;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_COM_OUT_DIR: u8 = 0xC0;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<DI> {
    interface: DI,
    /// Local copy of display RAM
    buffer: FrameBuffer,
    /// Panel powered from an external VCC instead of the charge pump
    external_vcc: bool,
}

impl<DI: DisplayInterface> Ssd1306<DI> {
    /// Create a driver using the internal charge pump
    pub fn new(interface: DI, size: DisplaySize) -> Self {
        Self {
            interface,
            buffer: FrameBuffer::new(size),
            external_vcc: false,
        }
    }

    /// Create a driver for a panel with external VCC
    pub fn with_external_vcc(interface: DI, size: DisplaySize) -> Self {
        Self {
            external_vcc: true,
            ..Self::new(interface, size)
        }
    }

    /// Initialize the controller and blank the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let size = self.buffer.size();
        let (precharge, charge_pump) = if self.external_vcc {
            (0x22, 0x10)
        } else {
            (0xF1, 0x14)
        };

        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_MEM_ADDR,
            0x00, // Horizontal addressing
            cmd::SET_START_LINE | 0x00,
            cmd::SET_SEG_REMAP | 0x01, // Column 127 mapped to SEG0
            cmd::SET_MUX_RATIO,
            (size.height() - 1) as u8,
            cmd::SET_COM_OUT_DIR | 0x08, // Scan from COM[N-1] to COM0
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_COM_PINS,
            size.com_pins(),
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_PRECHARGE,
            precharge,
            cmd::SET_VCOM_DETECT,
            0x30, // 0.83 * Vcc
            cmd::SET_CONTRAST,
            0xFF,
            cmd::SET_ENTIRE_ON, // Output follows RAM
            cmd::SET_NORMAL,
            cmd::SET_CHARGE_PUMP,
            charge_pump,
            cmd::DISPLAY_ON,
        ];

        self.interface.send_commands(init_cmds)?;

        self.buffer.fill(false);
        self.flush()
    }

    /// Send the framebuffer to the display
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        let size = self.buffer.size();
        let last_page = (size.pages() - 1) as u8;

        self.interface.send_commands(&[
            cmd::SET_COL_ADDR,
            0,
            (size.width() - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            last_page,
        ])?;

        for page in 0..size.pages() {
            if let Some(data) = self.buffer.page(page) {
                self.interface.send_data(data)?;
            }
        }

        Ok(())
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.interface.send_commands(&[cmd::SET_CONTRAST, contrast])
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        let command = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.interface.send_commands(&[command])
    }

    /// Invert display colors in hardware
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let command = if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        };
        self.interface.send_commands(&[command])
    }

    /// Get access to the framebuffer
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Get mutable access to the framebuffer
    ///
    /// Useful for drawing with embedded-graphics directly.
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> DI {
        self.interface
    }
}

impl<DI: DisplayInterface> PixelDriver for Ssd1306<DI> {
    type Error = DisplayError;

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        value: PixelValue,
    ) -> Result<(), DisplayError> {
        self.buffer.fill_rect(x, y, width, height, value.is_on());
        Ok(())
    }

    fn text(&mut self, text: &str, x: i32, y: i32, value: PixelValue) -> Result<(), DisplayError> {
        self.buffer.draw_text(text, x, y, value.is_on());
        Ok(())
    }

    fn scroll(&mut self, dx: i32, dy: i32) -> Result<(), DisplayError> {
        self.buffer.scroll(dx, dy);
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        self.flush()
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.buffer.width(), self.buffer.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::WIDTH;
    use crate::interface::mock::{log, Event, Log, MockI2c};
    use crate::interface::I2cInterface;

    fn driver(size: DisplaySize) -> (Ssd1306<I2cInterface<MockI2c>>, Log) {
        let log = log();
        let i2c = MockI2c {
            log: log.clone(),
            fail: false,
        };
        (Ssd1306::new(I2cInterface::new(i2c), size), log)
    }

    fn commands(log: &[Event]) -> Vec<u8> {
        log.iter()
            .filter_map(|e| match e {
                Event::I2cWrite(_, bytes) if bytes[0] == 0x00 => Some(bytes[1]),
                _ => None,
            })
            .collect()
    }

    fn data_writes(log: &[Event]) -> Vec<Vec<u8>> {
        log.iter()
            .filter_map(|e| match e {
                Event::I2cWrite(_, bytes) if bytes[0] == 0x40 => Some(bytes[1..].to_vec()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_init_configures_mux_for_size() {
        let (mut display, log) = driver(DisplaySize::Display128x32);
        display.init().unwrap();

        let cmds = commands(&log.borrow());
        assert_eq!(cmds[0], cmd::DISPLAY_OFF);
        let mux = cmds.iter().position(|&c| c == cmd::SET_MUX_RATIO).unwrap();
        assert_eq!(cmds[mux + 1], 31);
        let pins = cmds.iter().position(|&c| c == cmd::SET_COM_PINS).unwrap();
        assert_eq!(cmds[pins + 1], 0x02);
        assert!(cmds.contains(&cmd::DISPLAY_ON));

        // Blank frame flushed after init: 4 pages of zeros
        let data = data_writes(&log.borrow());
        assert_eq!(data.len(), 4);
        assert!(data.iter().all(|page| page.len() == WIDTH && page.iter().all(|&b| b == 0)));
    }

    #[test]
    fn test_flush_sets_window_and_sends_pages() {
        let (mut display, log) = driver(DisplaySize::Display128x64);
        display.fill_rect(0, 8, 2, 1, PixelValue::On).unwrap();
        display.show().unwrap();

        assert_eq!(
            commands(&log.borrow()),
            [cmd::SET_COL_ADDR, 0, 127, cmd::SET_PAGE_ADDR, 0, 7]
        );
        let data = data_writes(&log.borrow());
        assert_eq!(data.len(), 8);
        assert_eq!(&data[1][..3], &[0x01, 0x01, 0x00]);
    }

    #[test]
    fn test_pixel_driver_draws_into_buffer() {
        let (mut display, _log) = driver(DisplaySize::Display128x64);
        assert_eq!(display.dimensions(), (128, 64));

        display.fill_rect(0, 0, 128, 64, PixelValue::On).unwrap();
        display.text("A", 0, 0, PixelValue::Off).unwrap();
        assert!((0..6).any(|x| (0..10).any(|y| !display.buffer().pixel(x, y))));

        display.fill_rect(0, 54, 128, 10, PixelValue::Off).unwrap();
        display.scroll(0, -10).unwrap();
        assert!(!display.buffer().pixel(0, 44));
        assert!(!display.buffer().pixel(0, 63));
    }

    #[test]
    fn test_bus_errors_surface() {
        let i2c = MockI2c {
            log: log(),
            fail: true,
        };
        let mut display = Ssd1306::new(I2cInterface::new(i2c), DisplaySize::Display128x64);
        assert_eq!(display.init(), Err(DisplayError::Bus));
        assert_eq!(display.show(), Err(DisplayError::Bus));
        assert_eq!(display.set_contrast(0x10), Err(DisplayError::Bus));
    }
}
