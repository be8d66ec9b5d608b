use std::fmt;

/// Who decides the next action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The robot moves by itself whenever no key is pressed
    #[default]
    Autonomous,
    /// The robot does not move; only bound keys act
    Demonstration,
    /// A human has taken over; the robot no longer moves
    Participation,
}

/// Inputs that can change the mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// The mode toggle key was pressed
    Toggle,
    /// A key bound to a game action was pressed
    BoundKey,
}

impl Mode {
    /// Next mode after `event`
    ///
    /// Toggling only swaps `Autonomous` and `Demonstration`, so it leaves
    /// `Participation` where it is.
    pub fn transition(self, event: ModeEvent) -> Mode {
        match (self, event) {
            (Mode::Autonomous, ModeEvent::Toggle) => Mode::Demonstration,
            (Mode::Demonstration, ModeEvent::Toggle) => Mode::Autonomous,
            (Mode::Participation, ModeEvent::Toggle) => Mode::Participation,
            (Mode::Autonomous, ModeEvent::BoundKey) => Mode::Participation,
            (Mode::Demonstration, ModeEvent::BoundKey) => Mode::Demonstration,
            (Mode::Participation, ModeEvent::BoundKey) => Mode::Participation,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Autonomous => "Autonomous",
            Mode::Demonstration => "Demonstration",
            Mode::Participation => "Participation",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
