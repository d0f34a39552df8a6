// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;

use self::{
    flags::Flags,
    instruction::{decode, Insn},
    mem::{Mem, MEM_SIZE, PROGRAM_START},
};
use crate::{
    error::{Error, Result},
    screen::Screen,
};
use owo_colors::OwoColorize;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Maximum number of nested subroutine calls
pub const STACK_DEPTH: usize = 12;

/// Represents the internal state of the CPU interpreter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8.
    pub flags: Flags,
    // memory
    stack: [Adr; STACK_DEPTH],
    sp: usize,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    // Execution data
    cycle: usize,
    breakpoints: Vec<Adr>,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the given [Flags]
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::{CPU, flags::Flags};
    /// let cpu = CPU::new(Flags { debug: true });
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(flags: Flags) -> Self {
        CPU {
            flags,
            ..Default::default()
        }
    }

    /// Sets a general purpose register in the CPU.  
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::CPU;
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// assert!(cpu.set_v(0x10, 0x41).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::CPU;
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x0, 0x41).unwrap();
    /// assert_eq!(
    ///     cpu.v(),
    ///     [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    /// )
    /// ```
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Sets the program counter
    pub fn set_pc(&mut self, pc: Adr) {
        self.pc = pc;
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Sets the I register
    pub fn set_i(&mut self, i: Adr) {
        self.i = i;
    }

    /// Gets the live portion of the call stack, oldest return address first
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::CPU;
    /// let cpu = CPU::default();
    /// assert!(cpu.stack().is_empty());
    /// ```
    pub fn stack(&self) -> &[Adr] {
        &self.stack[..self.sp]
    }

    /// Gets the number of instructions the CPU has executed to completion.
    /// An instruction that faults is not counted.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Resets the registers, stack, and cycle count, and
    /// reinitializes the program counter to 0x200
    ///
    /// Does not touch [Flags] or breakpoints.
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::CPU;
    /// let mut cpu = CPU::default();
    /// cpu.set_pc(0x340);
    /// cpu.set_v(0xf, 1).unwrap();
    /// cpu.reset();
    /// assert_eq!(0x200, cpu.pc());
    /// assert_eq!(0, cpu.v()[0xf]);
    /// ```
    pub fn reset(&mut self) {
        self.stack = [0; STACK_DEPTH];
        self.sp = 0;
        self.pc = PROGRAM_START;
        self.i = 0;
        self.v = [0; 16];
        self.cycle = 0;
    }

    /// Set a breakpoint
    pub fn set_break(&mut self, point: Adr) -> &mut Self {
        if !self.breakpoints.contains(&point) {
            self.breakpoints.push(point)
        }
        self
    }

    /// Unset a breakpoint
    pub fn unset_break(&mut self, point: Adr) -> &mut Self {
        self.breakpoints.retain(|&bp| bp != point);
        self
    }

    /// Gets a slice of breakpoints
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::CPU;
    /// let mut cpu = CPU::default();
    /// assert_eq!(cpu.breakpoints(), &[]);
    /// cpu.set_break(0x234).set_break(0x234);
    /// assert_eq!(cpu.breakpoints(), &[0x234]);
    /// ```
    pub fn breakpoints(&self) -> &[Adr] {
        self.breakpoints.as_slice()
    }

    /// Reports whether the program counter sits on a breakpoint
    pub fn at_breakpoint(&self) -> bool {
        self.breakpoints.contains(&self.pc)
    }

    /// Reads the big-endian instruction word at `pc`
    ///
    /// Returns [Error::OutOfBounds] if the word would run off the end of memory
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::{CPU, mem::Mem};
    /// let mut mem = Mem::new();
    /// mem.load(&[], &[0x61, 0x05]).unwrap();
    /// let mut cpu = CPU::default();
    /// assert_eq!(0x6105, cpu.fetch(&mem).unwrap());
    /// cpu.set_pc(0xfff);
    /// assert!(cpu.fetch(&mem).is_err());
    /// ```
    pub fn fetch(&self, mem: &Mem) -> Result<u16> {
        let pc = self.pc as usize;
        if pc > MEM_SIZE - 2 {
            return Err(Error::OutOfBounds { addr: pc });
        }
        mem.read_word(pc)
    }

    /// Executes a single instruction
    ///
    /// The program counter is advanced past the instruction before it executes,
    /// so jumps, calls, and returns overwrite the advanced value.
    ///
    /// Returns [Error::UnimplementedOpcode] if the instruction at `pc` is unimplemented.
    /// # Examples
    /// ```rust
    /// # use chip8_core::{cpu::{CPU, mem::Mem}, screen::Screen};
    /// let (mut cpu, mut mem, mut screen) = (CPU::default(), Mem::new(), Screen::default());
    /// mem.load(&[], &[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    ///     0xff, 0xff, // invalid!
    /// ]).unwrap();
    /// cpu.tick(&mut mem, &mut screen)
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// cpu.set_pc(0x204);
    /// cpu.tick(&mut mem, &mut screen)
    ///     .expect_err("0xffff is not an instruction");
    /// ```
    pub fn tick(&mut self, mem: &mut Mem, screen: &mut Screen) -> Result<&mut Self> {
        let pc = self.pc;
        let word = decode(self.fetch(mem)?);
        self.pc = self.pc.wrapping_add(2);
        let insn = Insn::try_from(word)?;

        // Print opcode disassembly:
        if self.flags.debug {
            std::println!(
                "{:3} {:03x}: {:<36}{:04x}",
                (self.cycle + 1).bright_black(),
                pc,
                insn,
                word.opcode.bright_black(),
            );
        }

        self.execute(mem, screen, insn)?;
        self.cycle += 1;
        Ok(self)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::CPU;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}CYC: {:6}",
            self.pc,
            self.sp,
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.cycle,
        );
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults and debug mode OFF
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | pc     |`0x0200` | Start location.
    /// | sp     |`0`      | The stack starts empty.
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            stack: [0; STACK_DEPTH],
            sp: 0,
            pc: PROGRAM_START,
            i: 0,
            v: [0; 16],
            cycle: 0,
            breakpoints: vec![],
        }
    }
}
