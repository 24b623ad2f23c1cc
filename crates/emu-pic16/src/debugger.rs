//! Interactive debugger REPL.
//!
//! Single-letter commands with hex arguments, prompted between
//! instructions. `run` owns the stdin loop; `handle_line` dispatches one
//! command against any `Write` sink so commands stay testable.

use std::io::{self, BufRead, Write};
use std::process;

use microchip_pic16::{Memory, Pic16};

/// What the REPL asked the driver to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Execute one instruction, then prompt again.
    Step,
    /// Resume free-running execution.
    Continue,
}

/// Debugger state that survives across prompts.
pub struct Debugger {
    breakpoint: Option<u16>,
}

impl Debugger {
    #[must_use]
    pub fn new() -> Self {
        Self { breakpoint: None }
    }

    /// Breakpoint check, consulted by the driver after each instruction.
    #[must_use]
    pub fn at_breakpoint(&self, pc: u16) -> bool {
        self.breakpoint == Some(pc)
    }

    /// Prompt until a command hands control back to the execute loop.
    ///
    /// EOF on standard input exits the process with status 0.
    pub fn run(&mut self, pic: &mut Pic16, mem: &Memory) -> Action {
        let stdin = io::stdin();
        let mut out = io::stdout();
        println!();
        loop {
            print!("{:08x}:{:04x}> ", pic.cycle, pic.pc);
            let _ = out.flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => process::exit(0),
                Ok(_) => {}
                Err(_) => continue,
            }
            match self.handle_line(&line, pic, mem, &mut out) {
                Ok(Some(action)) => return action,
                Ok(None) | Err(_) => {}
            }
        }
    }

    /// Dispatch one command line. `Some` actions end the prompt loop.
    pub fn handle_line(
        &mut self,
        line: &str,
        pic: &mut Pic16,
        mem: &Memory,
        out: &mut impl Write,
    ) -> io::Result<Option<Action>> {
        let line = line.trim();
        let mut chars = line.chars();
        let Some(cmd) = chars.next() else {
            return Ok(None);
        };
        let arg = chars.as_str().trim();

        match cmd {
            'q' => process::exit(0),
            'h' | '?' => help(out)?,
            'c' => return Ok(Some(Action::Continue)),
            's' => return Ok(Some(Action::Step)),
            'b' => match u16::from_str_radix(arg, 16) {
                Ok(addr) => {
                    let addr = addr & 0x1FFF;
                    self.breakpoint = Some(addr);
                    writeln!(out, "Breakpoint set: 0x{addr:04x}")?;
                }
                Err(_) => {
                    if let Some(addr) = self.breakpoint.take() {
                        writeln!(out, "Breakpoint removed: 0x{addr:04x}")?;
                    }
                }
            },
            't' => pic.trace.dump(out)?,
            'r' => pic.dump_registers(out)?,
            'p' => pic.dump_ports(out)?,
            'e' => mem.dump_eeprom(out)?,
            'A'..='E' => {
                if let Ok(value) = u8::from_str_radix(arg, 16) {
                    let index = cmd as usize - 'A' as usize;
                    pic.in_ports[index] = value;
                    writeln!(out, "Port {cmd} input set to 0x{value:02x}")?;
                }
            }
            _ => {}
        }
        Ok(None)
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new()
    }
}

fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  q        - Quit")?;
    writeln!(out, "  h        - Help")?;
    writeln!(out, "  c        - Continue")?;
    writeln!(out, "  s        - Step")?;
    writeln!(out, "  b <addr> - Breakpoint")?;
    writeln!(out, "  t        - Dump execution trace")?;
    writeln!(out, "  r        - Dump registers")?;
    writeln!(out, "  p        - Dump ports")?;
    writeln!(out, "  e        - Dump EEPROM")?;
    writeln!(out, "  A <hex>  - Set input on port A")?;
    writeln!(out, "  B <hex>  - Set input on port B")?;
    writeln!(out, "  C <hex>  - Set input on port C")?;
    writeln!(out, "  D <hex>  - Set input on port D")?;
    writeln!(out, "  E <hex>  - Set input on port E")?;
    Ok(())
}
