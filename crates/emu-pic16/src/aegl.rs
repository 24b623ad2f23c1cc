//! AE-GraphicLCD peripheral trace.
//!
//! Reconstructs the graphical LCD's control lines and data bus from port
//! writes (PORTA bits 3/5 = CS1/CS2, PORTC bits 0/1/2/5 = R/W, D/C, Reset,
//! Enable, PORTB = data), watches TRISC bits 3/4 for bit-banged I2C edges,
//! and emulates a console UART: every PIR1 poll ticks a delay counter that
//! periodically moves one byte from standard input into RCREG.

use std::io::{self, Read, Write};
use std::process;

use microchip_pic16::registers;
use microchip_pic16::{Pic16, RegObserver};

/// PIR1 polls between console reads.
const UART_POLL_INTERVAL: u32 = 100;

pub struct AeGraphicLcd {
    porta: u8,
    portb: u8,
    portc: u8,
    trisc: u8,
    uart_delay: u32,
}

impl AeGraphicLcd {
    /// Attach to a CPU. Raises the port A bit 4 input (the JP1 jumper) so
    /// firmware skips its demo mode.
    #[must_use]
    pub fn install(pic: &mut Pic16) -> Self {
        pic.in_ports[registers::Port::A.index()] |= 0x10;
        Self {
            porta: 0,
            portb: 0,
            portc: 0,
            trisc: 0,
            uart_delay: 0,
        }
    }

    fn lcd_trace(&self, cycle: u32) {
        let cs1 = self.porta & 0x08 != 0;
        let cs2 = self.porta & 0x20 != 0;
        let rw = self.portc & 0x01 != 0;
        let data = self.portc & 0x02 != 0;
        let reset = self.portc & 0x04 != 0;
        let enable = self.portc & 0x20 != 0;
        println!(
            "LCD | {cycle:08x} {} {} {} {} {} {} {:02x}",
            if cs1 { "-  " } else { "CS1" },
            if cs2 { "-  " } else { "CS2" },
            if reset { "Rst" } else { "-  " },
            if enable { "En" } else { "- " },
            if rw { "Read " } else { "Write" },
            if data { "Data" } else { "Cmd " },
            self.portb,
        );
    }

    fn i2c_trace(&mut self, trisc: u8, cycle: u32) {
        let value = trisc & 0x18;
        if value != self.trisc {
            self.trisc = value;
            println!(
                "I2C | {cycle:08x} {} {}",
                if value & 0x08 != 0 { "SCL" } else { "-  " },
                if value & 0x10 != 0 { "SDA" } else { "-  " },
            );
        }
    }

    /// Move one byte from the console into RCREG and raise RCIF.
    ///
    /// Exits the process on end of input. Newlines become CR (commands end
    /// with CR) and `.` becomes the escape lead-in byte.
    fn uart_receive(&mut self, pic: &mut Pic16) {
        print!("> ");
        let _ = io::stdout().flush();

        let mut byte = [0u8; 1];
        match io::stdin().read(&mut byte) {
            Ok(0) | Err(_) => process::exit(0),
            Ok(_) => {}
        }
        let received = match byte[0] {
            b'\n' => b'\r',
            b'.' => 0x1B,
            other => other,
        };
        pic.r[registers::RCREG as usize] = received;
        pic.r[registers::PIR1 as usize] |= 0x20; // RCIF: new data pending.
        self.uart_delay = 0;
    }
}

impl RegObserver for AeGraphicLcd {
    fn on_read(&mut self, pic: &mut Pic16, addr: u16) {
        if addr == registers::PIR1 {
            self.uart_delay += 1;
            if self.uart_delay > UART_POLL_INTERVAL {
                self.uart_receive(pic);
            }
        }
    }

    fn on_write(&mut self, pic: &mut Pic16, addr: u16) {
        match addr {
            registers::TXREG => {
                println!("TXREG | 0x{:02x}", pic.r[registers::TXREG as usize]);
            }
            registers::PORTA => {
                let value = pic.r[addr as usize] & 0x28;
                if value != self.porta {
                    self.porta = value;
                    self.lcd_trace(pic.cycle);
                }
            }
            registers::PORTB => {
                let value = pic.r[addr as usize];
                if value != self.portb {
                    self.portb = value;
                    self.lcd_trace(pic.cycle);
                }
            }
            registers::PORTC => {
                let value = pic.r[addr as usize] & 0x27;
                if value != self.portc {
                    self.portc = value;
                    self.lcd_trace(pic.cycle);
                }
            }
            registers::TRISC => {
                let trisc = pic.r[addr as usize];
                self.i2c_trace(trisc, pic.cycle);
            }
            _ => {}
        }
    }
}
