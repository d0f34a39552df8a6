// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The machine's run state

/// Lifecycle of a [Chip8](crate::Chip8)
///
/// `Running` and `Paused` are freely interchangeable by the host.
/// `Quit` is entered on any fault, and is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RunState {
    /// Executing instructions
    #[default]
    Running,
    /// Stepping does nothing until the host resumes
    Paused,
    /// Halted by a fault; the host should stop driving the machine
    Quit,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    pub fn is_quit(self) -> bool {
        self == RunState::Quit
    }
}
