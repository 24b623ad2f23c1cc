//! PIC16 emulator binary.
//!
//! Loads an Intel HEX firmware image and free-runs the CPU with either the
//! terminal pinout view or the AE-GraphicLCD trace attached, breaking into
//! the line debugger on SIGINT, breakpoints, and faults.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};

use emu_pic16::aegl::AeGraphicLcd;
use emu_pic16::chipview::ChipView;
use emu_pic16::debugger::{Action, Debugger};
use emu_pic16::loader;
use microchip_pic16::{Memory, Pic16, RegObserver};

/// SIGINT flag, polled between instructions.
static BREAK_REQUESTED: AtomicBool = AtomicBool::new(false);

struct CliArgs {
    hex_path: PathBuf,
    debug_on_start: bool,
    aegl_mode: bool,
}

fn usage(prog: &str) {
    println!("Usage: {prog} <options> [hex-file]");
    println!("Options:");
    println!("  -h        Display this help.");
    println!("  -d        Break into debugger on start.");
    println!("  -a        AE-GraphicLCD trace and command mode.");
    println!();
    println!("HEX file should be in Intel format with program and EEPROM data.");
    println!();
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let prog = args.first().map_or("emu-pic16", String::as_str);

    let mut debug_on_start = false;
    let mut aegl_mode = false;
    let mut hex_path = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "-h" => {
                usage(prog);
                process::exit(0);
            }
            "-d" => debug_on_start = true,
            "-a" => aegl_mode = true,
            other if other.starts_with('-') => {
                usage(prog);
                process::exit(1);
            }
            other => hex_path = Some(PathBuf::from(other)),
        }
    }

    let Some(hex_path) = hex_path else {
        usage(prog);
        process::exit(1);
    };

    CliArgs {
        hex_path,
        debug_on_start,
        aegl_mode,
    }
}

/// The two mutually exclusive peripheral frontends.
enum Frontend {
    PinoutView(ChipView),
    GraphicLcd(AeGraphicLcd),
}

impl Frontend {
    /// Release the screen before debugger output.
    fn pause(&self) {
        if let Self::PinoutView(view) = self {
            view.pause();
        }
    }

    /// Reclaim the screen when execution resumes.
    fn resume(&self, pic: &Pic16) {
        if let Self::PinoutView(view) = self {
            view.resume(pic);
        }
    }
}

impl RegObserver for Frontend {
    fn on_read(&mut self, pic: &mut Pic16, addr: u16) {
        match self {
            Self::PinoutView(view) => view.on_read(pic, addr),
            Self::GraphicLcd(lcd) => lcd.on_read(pic, addr),
        }
    }

    fn on_write(&mut self, pic: &mut Pic16, addr: u16) {
        match self {
            Self::PinoutView(view) => view.on_write(pic, addr),
            Self::GraphicLcd(lcd) => lcd.on_write(pic, addr),
        }
    }
}

fn main() {
    let cli = parse_args();

    let mut mem = Memory::new();
    if let Err(err) = loader::load_hex_file(&mut mem, &cli.hex_path) {
        eprintln!("Unable to load HEX file: {} ({err})", cli.hex_path.display());
        process::exit(1);
    }

    let mut pic = Pic16::new();
    let mut frontend = if cli.aegl_mode {
        Frontend::GraphicLcd(AeGraphicLcd::install(&mut pic))
    } else {
        Frontend::PinoutView(ChipView::new(&pic))
    };

    if let Err(err) = ctrlc::set_handler(|| BREAK_REQUESTED.store(true, Ordering::SeqCst)) {
        eprintln!("Unable to install interrupt handler: {err}");
    }

    let mut debugger = Debugger::new();
    let mut pending_message: Option<String> = None;
    let mut break_pending = cli.debug_on_start;

    loop {
        if break_pending {
            frontend.pause();
            if let Some(message) = pending_message.take() {
                println!("{message}");
            }
            break_pending = debugger.run(&mut pic, &mem) == Action::Step;
            if !break_pending {
                frontend.resume(&pic);
            }
        }

        if let Err(fault) = pic.execute(&mut mem, &mut frontend) {
            pending_message = Some(fault.to_string());
            break_pending = true;
            continue;
        }

        if debugger.at_breakpoint(pic.pc) {
            pending_message = Some("Break".to_string());
            break_pending = true;
        }

        if BREAK_REQUESTED.swap(false, Ordering::SeqCst) {
            break_pending = true;
        }
    }
}
