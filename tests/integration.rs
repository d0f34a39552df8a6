//! Testing methods on the public API
use chip8_core::{font::FONT, prelude::*};

/// Builds a fresh machine with `program` loaded at 0x200
fn machine(program: &[u8]) -> Chip8 {
    let mut ch8 = Chip8::default();
    ch8.load_program(program)
        .expect("Test programs should fit in memory");
    ch8
}

#[test]
fn chip8() {
    let ch8 = Chip8::default(); // Default
    let ch82 = ch8.clone(); // Clone
    assert_eq!(ch8, ch82); // PartialEq
    println!("{ch8:?}"); // Debug
}

mod load {
    use super::*;
    #[test]
    fn font_and_program() {
        let ch8 = machine(&[0x61, 0x05]);
        assert_eq!(&FONT, &ch8.mem.get_region(Region::Charset)[..FONT.len()]);
        assert_eq!(0x6105, ch8.mem.read_word(0x200).unwrap());
        assert_eq!(0x200, ch8.cpu.pc());
    }

    #[test]
    fn largest_rom() {
        let rom = vec![0xaa; 0x1000 - 0x200];
        let ch8 = machine(&rom);
        assert_eq!(0xaa, ch8.mem.read(0xfff).unwrap());
    }

    #[test]
    fn rom_too_large() {
        let mut ch8 = machine(&[0x61, 0x05]);
        let rom = vec![0xaa; 0x1000 - 0x200 + 1];
        match ch8.load_program(&rom) {
            Err(Error::RomTooLarge { size, max }) => assert_eq!((0xe01, 0xe00), (size, max)),
            other => panic!("expected RomTooLarge, got {other:?}"),
        }
        // Still in the pre-load state
        assert_eq!(0x6105, ch8.mem.read_word(0x200).unwrap());
    }

    #[test]
    fn font_too_large() {
        let mut ch8 = Chip8::default();
        assert!(matches!(
            ch8.load(&[0xff; 0x201], &[]),
            Err(Error::FontTooLarge { size: 0x201, max: 0x200 })
        ));
        assert_eq!(&FONT, &ch8.mem.get_region(Region::Charset)[..FONT.len()]);
    }

    #[test]
    fn reload_resets_machine() {
        // 6105: mov #05, v1
        // 00ff: invalid!
        let mut ch8 = machine(&[0x61, 0x05, 0x00, 0xff]);
        ch8.step().unwrap();
        ch8.step().unwrap_err();
        assert_eq!(RunState::Quit, ch8.run_state());
        ch8.timers.set_delay(10);

        ch8.load_program(&[0x61, 0x05]).unwrap();
        assert_eq!(RunState::Running, ch8.run_state());
        assert_eq!(0x200, ch8.cpu.pc());
        assert_eq!(0, ch8.cpu.v()[1]);
        assert_eq!(0, ch8.timers.delay());
        // The old program is gone
        assert_eq!(0, ch8.mem.read_word(0x202).unwrap());
    }
}

mod step {
    use super::*;
    #[test]
    fn load_then_add_wraps() {
        // 6210: mov #10, v2
        // 72f5: add #f5, v2
        let mut ch8 = machine(&[0x62, 0x10, 0x72, 0xf5]);
        ch8.multistep(2).unwrap();
        assert_eq!(0x05, ch8.cpu.v()[2]);
        assert_eq!(0, ch8.cpu.v()[0xf]);
    }

    #[test]
    fn add_overflow() {
        // 60ff: mov #ff, v0
        // 6101: mov #01, v1
        // 8014: add v1, v0
        let mut ch8 = machine(&[0x60, 0xff, 0x61, 0x01, 0x80, 0x14]);
        ch8.multistep(3).unwrap();
        assert_eq!(0x00, ch8.cpu.v()[0]);
        assert_eq!(1, ch8.cpu.v()[0xf]);
    }

    #[test]
    fn sub_borrow() {
        // 6001: mov #01, v0
        // 6102: mov #02, v1
        // 8015: sub v1, v0
        let mut ch8 = machine(&[0x60, 0x01, 0x61, 0x02, 0x80, 0x15]);
        ch8.multistep(3).unwrap();
        assert_eq!(0xff, ch8.cpu.v()[0]);
        assert_eq!(0, ch8.cpu.v()[0xf]);
    }

    #[test]
    fn store_then_load() {
        // 6011: mov #11, v0
        // 6122: mov #22, v1
        // 6233: mov #33, v2
        // a400: mov $400, I
        // f255: dmao v2
        // 6000: mov #00, v0
        // 6100: mov #00, v1
        // f165: dmai v1
        let mut ch8 = machine(&[
            0x60, 0x11, 0x61, 0x22, 0x62, 0x33, 0xa4, 0x00, //
            0xf2, 0x55, 0x60, 0x00, 0x61, 0x00, 0xf1, 0x65,
        ]);
        ch8.multistep(8).unwrap();
        assert_eq!(&[0x11, 0x22, 0x33], ch8.mem.grab(0x400..0x403).unwrap());
        assert_eq!(&[0x11, 0x22, 0x33], &ch8.cpu.v()[..3]);
        assert_eq!(0x400, ch8.cpu.i());
    }

    #[test]
    fn fetch_fault_quits() {
        let mut ch8 = machine(&[]);
        ch8.cpu.set_pc(0xfff);
        assert!(matches!(ch8.step(), Err(Error::OutOfBounds { addr: 0xfff })));
        assert_eq!(RunState::Quit, ch8.run_state());
    }

    #[test]
    fn unimplemented_quits() {
        let mut ch8 = machine(&[0xe0, 0x9e]);
        assert!(matches!(
            ch8.step(),
            Err(Error::UnimplementedOpcode { word: 0xe09e })
        ));
        assert_eq!(RunState::Quit, ch8.run_state());
    }

    #[test]
    fn quit_is_terminal() {
        let mut ch8 = machine(&[0xff, 0xff]);
        ch8.step().unwrap_err();
        let snapshot = ch8.clone();
        ch8.resume();
        assert_eq!(RunState::Quit, ch8.step().unwrap());
        assert_eq!(RunState::Quit, ch8.multistep(10).unwrap());
        assert_eq!(snapshot, ch8);
    }

    #[test]
    fn paused_does_nothing() {
        let mut ch8 = machine(&[0x60, 0x01]);
        ch8.pause();
        assert_eq!(RunState::Paused, ch8.step().unwrap());
        assert_eq!(0x200, ch8.cpu.pc());
        assert_eq!(0, ch8.cpu.cycle());
        ch8.resume();
        assert_eq!(RunState::Running, ch8.step().unwrap());
        assert_eq!(1, ch8.cpu.v()[0]);
    }

    #[test]
    fn breakpoint_pauses() {
        // 6001: mov #01, v0
        // 6102: mov #02, v1
        let mut ch8 = machine(&[0x60, 0x01, 0x61, 0x02]);
        ch8.cpu.set_break(0x202);
        assert_eq!(RunState::Paused, ch8.multistep(10).unwrap());
        assert_eq!(0x202, ch8.cpu.pc());
        assert_eq!(0, ch8.cpu.v()[1]);
        ch8.resume();
        ch8.step().unwrap();
        assert_eq!(2, ch8.cpu.v()[1]);
    }
}

mod stack {
    use super::*;
    #[test]
    fn call_then_ret() {
        // 2206: call 206
        // 6001: mov #01, v0
        // 0000: (padding)
        // 00ee: ret
        let mut ch8 = machine(&[0x22, 0x06, 0x60, 0x01, 0x00, 0x00, 0x00, 0xee]);
        ch8.step().unwrap();
        assert_eq!(0x206, ch8.cpu.pc());
        assert_eq!(&[0x202], ch8.cpu.stack());
        ch8.step().unwrap();
        assert_eq!(0x202, ch8.cpu.pc());
        assert!(ch8.cpu.stack().is_empty());
        ch8.step().unwrap();
        assert_eq!(1, ch8.cpu.v()[0]);
    }

    #[test]
    fn thirteenth_call_overflows() {
        // 2200: call 200, forever
        let mut ch8 = machine(&[0x22, 0x00]);
        ch8.multistep(12).unwrap();
        assert_eq!(12, ch8.cpu.stack().len());
        assert!(matches!(
            ch8.step(),
            Err(Error::StackOverflow { addr: 0x200 })
        ));
        assert_eq!(RunState::Quit, ch8.run_state());
    }

    #[test]
    fn ret_underflows() {
        let mut ch8 = machine(&[0x00, 0xee]);
        assert!(matches!(ch8.step(), Err(Error::StackUnderflow { pc: 0x200 })));
        assert_eq!(RunState::Quit, ch8.run_state());
    }
}

mod screen {
    use super::*;
    #[test]
    fn draw_twice_collides() {
        // 6005: mov #05, v0
        // 6103: mov #03, v1
        // a00a: mov $00a, I   (the glyph for `2`)
        // d015: draw #5, v0, v1
        // d015: draw #5, v0, v1
        let mut ch8 = machine(&[
            0x60, 0x05, 0x61, 0x03, 0xa0, 0x0a, 0xd0, 0x15, 0xd0, 0x15,
        ]);
        ch8.multistep(4).unwrap();
        assert_eq!(0, ch8.cpu.v()[0xf]);
        let lit = ch8.screen.pixels().iter().filter(|&&px| px).count();
        // `2` is 4 + 1 + 4 + 1 + 4 lit pixels
        assert_eq!(14, lit);
        ch8.step().unwrap();
        assert_eq!(1, ch8.cpu.v()[0xf]);
        assert_eq!(&Screen::default(), &ch8.screen);
        assert_eq!(0x00a, ch8.cpu.i());
    }

    #[test]
    fn clip_right_edge() {
        let mut screen = Screen::default();
        assert!(!screen.draw(60, 0, &[0xff]));
        for x in 60..64 {
            assert_eq!(Some(true), screen.get(x, 0));
        }
        // Nothing wrapped around to the left edge
        for x in 0..4 {
            assert_eq!(Some(false), screen.get(x, 0));
            assert_eq!(Some(false), screen.get(x, 1));
        }
    }

    #[test]
    fn clip_bottom_edge() {
        let mut screen = Screen::default();
        screen.draw(0, 30, &[0x80; 4]);
        assert_eq!(Some(true), screen.get(0, 30));
        assert_eq!(Some(true), screen.get(0, 31));
        assert_eq!(Some(false), screen.get(0, 0));
        assert_eq!(Some(false), screen.get(0, 1));
        assert_eq!(2, screen.pixels().iter().filter(|&&px| px).count());
    }

    #[test]
    fn clipped_rows_are_not_read() {
        // 611f: mov #1f, v1
        // affe: mov #ffe, I
        // d013: draw #3, v0, v1
        let mut ch8 = machine(&[0x61, 0x1f, 0xaf, 0xfe, 0xd0, 0x13]);
        ch8.mem.write(0xffe, 0x80).unwrap();
        assert_eq!(RunState::Running, ch8.multistep(3).unwrap());
        assert_eq!(Some(true), ch8.screen.get(0, 31));
        assert_eq!(0, ch8.cpu.v()[0xf]);
    }

    #[test]
    fn origin_wraps() {
        let mut screen = Screen::default();
        screen.draw(64 + 3, 32 + 2, &[0x80]);
        assert_eq!(Some(true), screen.get(3, 2));
        assert_eq!(true, screen.pixels()[2 * 64 + 3]);
    }

    #[test]
    fn custom_size() {
        let mut ch8 = Chip8::new(128, 64).unwrap();
        assert_eq!((128, 64), (ch8.screen.width(), ch8.screen.height()));
        ch8.screen.draw(100, 50, &[0x80]);
        assert_eq!(Some(true), ch8.screen.get(100, 50));
        assert_eq!(None, ch8.screen.get(128, 0));
    }

    #[test]
    fn zero_size_rejected() {
        for (width, height) in [(0, 32), (64, 0), (0, 0)] {
            assert!(matches!(
                Chip8::new(width, height),
                Err(Error::InvalidScreenSize { width: w, height: h }) if (w, h) == (width, height)
            ));
            assert!(Screen::new(width, height).is_err());
        }
    }

    #[test]
    fn clear_twice() {
        // 00e0: cls
        // 00e0: cls
        let mut ch8 = machine(&[0x00, 0xe0, 0x00, 0xe0]);
        ch8.screen.draw(0, 0, &[0xff; 8]);
        ch8.step().unwrap();
        let once = ch8.screen.clone();
        ch8.step().unwrap();
        assert_eq!(once, ch8.screen);
        assert!(ch8.screen.pixels().iter().all(|&px| !px));
    }

    #[test]
    fn display() {
        let mut screen = Screen::new(8, 2).unwrap();
        screen.draw(0, 0, &[0xf0]);
        let text = screen.to_string();
        assert_eq!(2, text.lines().count());
        assert!(text.contains("████"));
    }
}

mod timers {
    use super::*;
    #[test]
    fn tick_saturates() {
        let mut ch8 = Chip8::default();
        ch8.timers.set_delay(2);
        ch8.timers.set_sound(1);
        assert!(ch8.timers.is_sounding());
        ch8.tick_timers();
        assert_eq!((1, 0), (ch8.timers.delay(), ch8.timers.sound()));
        assert!(!ch8.timers.is_sounding());
        ch8.tick_timers();
        ch8.tick_timers();
        assert_eq!((0, 0), (ch8.timers.delay(), ch8.timers.sound()));
    }

    #[test]
    fn steps_do_not_tick() {
        // 1200: jmp 200
        let mut ch8 = machine(&[0x12, 0x00]);
        ch8.timers.set_delay(60);
        ch8.multistep(1000).unwrap();
        assert_eq!(60, ch8.timers.delay());
    }
}

mod keypad {
    use super::*;
    #[test]
    fn press_release() {
        let mut ch8 = Chip8::default();
        for key in 0..0x10 {
            assert!(ch8.keypad.press(key).unwrap());
            assert!(ch8.keypad.is_pressed(key));
        }
        assert!(matches!(
            ch8.keypad.press(0x10),
            Err(Error::InvalidKey { key: 0x10 })
        ));
        assert!(!ch8.keypad.is_pressed(0x10));
        ch8.keypad.release_all();
        assert_eq!(&[false; 16], ch8.keypad.keys());
    }
}

mod run_state {
    use super::*;
    #[test]
    fn predicates() {
        assert!(RunState::default().is_running());
        assert!(!RunState::Paused.is_running());
        assert!(RunState::Quit.is_quit());
    }

    #[test]
    fn pause_does_not_revive() {
        let mut ch8 = machine(&[0xff, 0xff]);
        ch8.step().unwrap_err();
        ch8.pause();
        assert_eq!(RunState::Quit, ch8.run_state());
    }
}

mod error {
    use super::*;
    #[test]
    fn display() {
        assert_eq!(
            "opcode e09e not recognized",
            Error::UnimplementedOpcode { word: 0xe09e }.to_string()
        );
        assert_eq!(
            "address fff is out of bounds",
            Error::OutOfBounds { addr: 0xfff }.to_string()
        );
        println!("{}", Error::StackOverflow { addr: 0x200 });
        println!("{}", Error::StackUnderflow { pc: 0x200 });
        println!("{}", Error::RomTooLarge { size: 0xe01, max: 0xe00 });
    }
}
