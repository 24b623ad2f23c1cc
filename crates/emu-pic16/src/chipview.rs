//! Terminal pinout view.
//!
//! Draws a DIP-style pinout with per-pin direction arrows and effective
//! levels, redrawn in place whenever firmware touches a port or tri-state
//! register. The drawing occupies the top of the screen; `pause` parks the
//! cursor below it so debugger output scrolls underneath, and `resume`
//! reclaims the screen.

use std::io::{self, Write};

use microchip_pic16::registers::{PORTS, Port};
use microchip_pic16::{Pic16, RegObserver};
use termion::{clear, cursor};

/// Row below the pinout drawing where normal output continues.
const PROMPT_ROW: u16 = 23;

pub struct ChipView;

impl ChipView {
    /// Clear the terminal and draw the initial pinout.
    #[must_use]
    pub fn new(pic: &Pic16) -> Self {
        let view = Self;
        let mut out = io::stdout();
        let _ = write!(out, "{}", clear::All);
        view.draw(pic);
        view
    }

    /// Park the cursor below the drawing before debugger output.
    pub fn pause(&self) {
        let mut out = io::stdout();
        let _ = write!(out, "{}", cursor::Goto(1, PROMPT_ROW));
        let _ = out.flush();
    }

    /// Reclaim the screen when execution resumes.
    pub fn resume(&self, pic: &Pic16) {
        let mut out = io::stdout();
        let _ = write!(out, "{}", clear::All);
        self.draw(pic);
    }

    fn draw(&self, pic: &Pic16) {
        let mut out = io::stdout();
        let _ = render(pic, &mut out);
        let _ = out.flush();
    }
}

fn render(pic: &Pic16, out: &mut impl Write) -> io::Result<()> {
    let g = |row: u16| cursor::Goto(2, row);
    write!(out, "{}       +------|__|------+", g(1))?;
    write!(
        out,
        "{}       |             RB7| {} {}",
        g(2),
        right(pic, Port::B, 7),
        level(pic, Port::B, 7)
    )?;
    write!(
        out,
        "{}{} {} |RA0          RB6| {} {}",
        g(3),
        level(pic, Port::A, 0),
        left(pic, Port::A, 0),
        right(pic, Port::B, 6),
        level(pic, Port::B, 6)
    )?;
    write!(
        out,
        "{}{} {} |RA1          RB5| {} {}",
        g(4),
        level(pic, Port::A, 1),
        left(pic, Port::A, 1),
        right(pic, Port::B, 5),
        level(pic, Port::B, 5)
    )?;
    write!(
        out,
        "{}{} {} |RA2          RB4| {} {}",
        g(5),
        level(pic, Port::A, 2),
        left(pic, Port::A, 2),
        right(pic, Port::B, 4),
        level(pic, Port::B, 4)
    )?;
    write!(
        out,
        "{}{} {} |RA3          RB3| {} {}",
        g(6),
        level(pic, Port::A, 3),
        left(pic, Port::A, 3),
        right(pic, Port::B, 3),
        level(pic, Port::B, 3)
    )?;
    write!(
        out,
        "{}{} {} |RA4          RB2| {} {}",
        g(7),
        level(pic, Port::A, 4),
        left(pic, Port::A, 4),
        right(pic, Port::B, 2),
        level(pic, Port::B, 2)
    )?;
    write!(
        out,
        "{}{} {} |RA5          RB1| {} {}",
        g(8),
        level(pic, Port::A, 5),
        left(pic, Port::A, 5),
        right(pic, Port::B, 1),
        level(pic, Port::B, 1)
    )?;
    write!(
        out,
        "{}{} {} |RE0          RB0| {} {}",
        g(9),
        level(pic, Port::E, 0),
        left(pic, Port::E, 0),
        right(pic, Port::B, 0),
        level(pic, Port::B, 0)
    )?;
    write!(
        out,
        "{}{} {} |RE1             |",
        g(10),
        level(pic, Port::E, 1),
        left(pic, Port::E, 1)
    )?;
    write!(
        out,
        "{}{} {} |RE2             |",
        g(11),
        level(pic, Port::E, 2),
        left(pic, Port::E, 2)
    )?;
    write!(
        out,
        "{}       |             RD7| {} {}",
        g(12),
        right(pic, Port::D, 7),
        level(pic, Port::D, 7)
    )?;
    write!(
        out,
        "{}       |             RD6| {} {}",
        g(13),
        right(pic, Port::D, 6),
        level(pic, Port::D, 6)
    )?;
    write!(
        out,
        "{}       |             RD5| {} {}",
        g(14),
        right(pic, Port::D, 5),
        level(pic, Port::D, 5)
    )?;
    write!(
        out,
        "{}       |             RD4| {} {}",
        g(15),
        right(pic, Port::D, 4),
        level(pic, Port::D, 4)
    )?;
    write!(
        out,
        "{}{} {} |RC0       RX/RC7| {} {}",
        g(16),
        level(pic, Port::C, 0),
        left(pic, Port::C, 0),
        right(pic, Port::C, 7),
        level(pic, Port::C, 7)
    )?;
    write!(
        out,
        "{}{} {} |RC1       TX/RC6| {} {}",
        g(17),
        level(pic, Port::C, 1),
        left(pic, Port::C, 1),
        right(pic, Port::C, 6),
        level(pic, Port::C, 6)
    )?;
    write!(
        out,
        "{}{} {} |RC2          RC5| {} {}",
        g(18),
        level(pic, Port::C, 2),
        left(pic, Port::C, 2),
        right(pic, Port::C, 5),
        level(pic, Port::C, 5)
    )?;
    write!(
        out,
        "{}{} {} |RC3/SCL  SDA/RC4| {} {}",
        g(19),
        level(pic, Port::C, 3),
        left(pic, Port::C, 3),
        right(pic, Port::C, 4),
        level(pic, Port::C, 4)
    )?;
    write!(
        out,
        "{}{} {} |RD0          RD3| {} {}",
        g(20),
        level(pic, Port::D, 0),
        left(pic, Port::D, 0),
        right(pic, Port::D, 3),
        level(pic, Port::D, 3)
    )?;
    write!(
        out,
        "{}{} {} |RD1          RD2| {} {}",
        g(21),
        level(pic, Port::D, 1),
        left(pic, Port::D, 1),
        right(pic, Port::D, 2),
        level(pic, Port::D, 2)
    )?;
    write!(out, "{}       +----------------+", g(22))?;
    Ok(())
}

impl RegObserver for ChipView {
    fn on_write(&mut self, pic: &mut Pic16, addr: u16) {
        let watched = PORTS
            .iter()
            .any(|port| addr == port.data_addr() || addr == port.tris_addr());
        if watched {
            self.draw(pic);
        }
    }
}

/// Pin direction: a set TRIS bit floats the pin as an input.
fn input(pic: &Pic16, port: Port, bit: u8) -> bool {
    (pic.r[port.tris_addr() as usize] >> bit) & 1 != 0
}

/// Effective level of one pin.
fn level(pic: &Pic16, port: Port, bit: u8) -> u8 {
    (pic.port_read(port) >> bit) & 1
}

/// Arrow for a pin on the left chip edge.
fn left(pic: &Pic16, port: Port, bit: u8) -> &'static str {
    if input(pic, port, bit) { " -->" } else { "<-- " }
}

/// Arrow for a pin on the right chip edge.
fn right(pic: &Pic16, port: Port, bit: u8) -> &'static str {
    if input(pic, port, bit) { "<-- " } else { " -->" }
}
