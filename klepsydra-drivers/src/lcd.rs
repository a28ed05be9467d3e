//! HD44780 character LCD over a PCF8574 I2C backpack
//!
//! The common 20x4 blue/green LCD modules ship with a PCF8574 I/O expander
//! soldered on the back. The controller runs in 4-bit mode with the
//! expander pins wired as:
//!
//! ```text
//! P7 P6 P5 P4 │ P3        │ P2 │ P1 │ P0
//! D7 D6 D5 D4 │ Backlight │ EN │ RW │ RS
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use klepsydra_display::{DisplayBackend, DisplayError};

/// Default PCF8574 address (A0-A2 pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Expander control bits
mod bits {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 commands
#[allow(dead_code)]
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode flags
    pub const ENTRY_LEFT: u8 = 0x02;

    // Display control flags
    pub const DISPLAY_ON: u8 = 0x04;

    // Function set flags
    pub const MODE_4BIT: u8 = 0x00;
    pub const TWO_LINE: u8 = 0x08;
    pub const FONT_5X8: u8 = 0x00;
}

/// DDRAM start address of each row on a 20x4 module
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// LCD geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    /// 7-bit I2C address of the backpack
    pub address: u8,
    /// Characters per row
    pub cols: u8,
    /// Number of rows
    pub rows: u8,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            cols: 20,
            rows: 4,
        }
    }
}

/// HD44780 LCD driver
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    config: LcdConfig,
    backlight: bool,
    initialized: bool,
}

impl<I2C: I2c, D: DelayNs> Hd44780<I2C, D> {
    /// Create a new driver; call [`Hd44780::init`] before drawing
    pub fn new(i2c: I2C, delay: D, config: LcdConfig) -> Self {
        Self {
            i2c,
            delay,
            config,
            backlight: true,
            initialized: false,
        }
    }

    /// Run the 4-bit initialization sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on wait: Vcc must settle above 4.5V
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Three times 0x3 forces 8-bit mode from any state, then switch to 4-bit
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20)?;

        self.command(cmd::FUNCTION_SET | cmd::MODE_4BIT | cmd::TWO_LINE | cmd::FONT_5X8)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_LEFT)?;
        self.initialized = true;
        self.clear()
    }

    /// Turn the backlight on or off
    pub fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.expander_write(0)
    }

    /// Move the cursor to a character cell
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= self.config.rows || col >= self.config.cols {
            return Err(DisplayError::InvalidCoordinates);
        }
        let address = ROW_OFFSETS
            .get(row as usize)
            .and_then(|offset| offset.checked_add(col))
            // DDRAM addresses are 7 bits; the top bit selects the command
            .filter(|address| *address < cmd::SET_DDRAM_ADDR)
            .ok_or(DisplayError::InvalidCoordinates)?;
        self.command(cmd::SET_DDRAM_ADDR | address)
    }

    /// Release the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0)
    }

    fn write_char(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, bits::RS)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble(((value << 4) & 0xF0) | mode)
    }

    /// Latch the upper four bits of `value` into the controller
    fn write_nibble(&mut self, value: u8) -> Result<(), DisplayError> {
        self.expander_write(value)?;
        self.expander_write(value | bits::EN)?;
        // Enable pulse must be >450ns
        self.delay.delay_us(1);
        self.expander_write(value & !bits::EN)?;
        // Commands need >37us to settle
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, value: u8) -> Result<(), DisplayError> {
        let backlight = if self.backlight { bits::BACKLIGHT } else { 0 };
        self.i2c
            .write(self.config.address, &[value | backlight])
            .map_err(|_| DisplayError::Communication)
    }
}

impl<I2C: I2c, D: DelayNs> DisplayBackend for Hd44780<I2C, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.command(cmd::CLEAR_DISPLAY)?;
        // Clear takes up to 1.52ms
        self.delay.delay_ms(2);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.set_cursor(row, col)?;

        let room = (self.config.cols - col) as usize;
        for byte in text.bytes().take(room) {
            // Outside ASCII the HD44780 ROM diverges; show a placeholder
            let glyph = if byte.is_ascii() && !byte.is_ascii_control() {
                byte
            } else {
                b'?'
            };
            self.write_char(glyph)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.config.cols, self.config.rows)
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use heapless::Vec;

    /// Mock I2C bus recording expander writes
    #[derive(Default)]
    struct MockBus {
        writes: Vec<u8, 1024>,
        fail: bool,
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            assert_eq!(address, DEFAULT_ADDRESS);
            for op in operations {
                if let Operation::Write(data) = op {
                    for byte in data.iter() {
                        let _ = self.writes.push(*byte);
                    }
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Reassemble (is_data, byte) pairs from latched nibbles
    fn decode(writes: &[u8]) -> Vec<(bool, u8), 256> {
        let mut nibbles: Vec<(bool, u8), 512> = Vec::new();
        for byte in writes {
            if byte & bits::EN != 0 {
                let _ = nibbles.push((byte & bits::RS != 0, byte & 0xF0));
            }
        }

        let mut out = Vec::new();
        for pair in nibbles.chunks(2) {
            if let [(rs, high), (_, low)] = pair {
                let _ = out.push((*rs, high | (low >> 4)));
            }
        }
        out
    }

    fn lcd() -> Hd44780<MockBus, NoDelay> {
        let mut lcd = Hd44780::new(MockBus::default(), NoDelay, LcdConfig::default());
        lcd.init().unwrap();
        lcd
    }

    #[test]
    fn test_draw_before_init() {
        let mut lcd = Hd44780::new(MockBus::default(), NoDelay, LcdConfig::default());
        assert!(!lcd.is_ready());
        assert_eq!(lcd.draw_text(0, 0, "x"), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_init_sequence() {
        let lcd = lcd();
        assert!(lcd.is_ready());

        let (bus, _) = lcd.release();
        // Backlight stays on in every expander write
        assert!(bus.writes.iter().all(|b| b & bits::BACKLIGHT != 0));

        // Four reset nibbles (0x3, 0x3, 0x3, 0x2) precede the commands
        let latched: Vec<u8, 16> = bus
            .writes
            .iter()
            .filter(|b| *b & bits::EN != 0)
            .take(4)
            .map(|b| b & 0xF0)
            .collect();
        assert_eq!(latched.as_slice(), &[0x30, 0x30, 0x30, 0x20]);
    }

    #[test]
    fn test_draw_text_positions_cursor() {
        let mut lcd = lcd();
        lcd.i2c.writes.clear();

        lcd.draw_text(1, 2, "Hi").unwrap();
        let (bus, _) = lcd.release();
        let decoded = decode(&bus.writes);

        assert_eq!(
            decoded.as_slice(),
            &[(false, 0x80 | 0x42), (true, b'H'), (true, b'i')]
        );
    }

    #[test]
    fn test_row_three_offset_and_clipping() {
        let mut lcd = lcd();
        lcd.i2c.writes.clear();

        lcd.draw_text(3, 18, "abcdef").unwrap();
        let (bus, _) = lcd.release();
        let decoded = decode(&bus.writes);

        // Only two columns remain on the row
        assert_eq!(
            decoded.as_slice(),
            &[(false, 0x80 | (0x54 + 18)), (true, b'a'), (true, b'b')]
        );
    }

    #[test]
    fn test_invalid_coordinates() {
        let mut lcd = lcd();
        assert_eq!(
            lcd.draw_text(4, 0, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            lcd.draw_text(0, 20, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_geometry_beyond_controller_rejected() {
        let config = LcdConfig {
            cols: 200,
            rows: 6,
            ..Default::default()
        };
        let mut lcd = Hd44780::new(MockBus::default(), NoDelay, config);
        lcd.init().unwrap();
        lcd.i2c.writes.clear();

        // Row 4 has no DDRAM offset on an HD44780
        assert_eq!(lcd.set_cursor(4, 0), Err(DisplayError::InvalidCoordinates));
        // 0x54 + 60 runs past the 7-bit address space
        assert_eq!(
            lcd.draw_text(3, 60, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(lcd.set_cursor(0, 250), Err(DisplayError::InvalidCoordinates));
        assert!(lcd.i2c.writes.is_empty());

        // Still addressable within the controller's range
        lcd.set_cursor(3, 40).unwrap();
        let (bus, _) = lcd.release();
        assert_eq!(decode(&bus.writes).as_slice(), &[(false, 0x80 | (0x54 + 40))]);
    }

    #[test]
    fn test_bus_error_mapped() {
        let mut lcd = Hd44780::new(
            MockBus {
                fail: true,
                ..Default::default()
            },
            NoDelay,
            LcdConfig::default(),
        );
        assert_eq!(lcd.init(), Err(DisplayError::Communication));
    }

    #[test]
    fn test_backlight_off() {
        let mut lcd = lcd();
        lcd.i2c.writes.clear();
        lcd.set_backlight(false).unwrap();
        assert_eq!(lcd.i2c.writes.as_slice(), &[0x00]);
    }
}
