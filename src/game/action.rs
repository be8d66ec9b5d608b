/// Action the chain-walk player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainAction {
    /// Walk one cell leftward
    Left,
    /// Walk one cell rightward
    Right,
    /// Stand still
    Stay,
}

impl ChainAction {
    /// Column delta for this action
    pub fn delta(&self) -> isize {
        match self {
            ChainAction::Left => -1,
            ChainAction::Right => 1,
            ChainAction::Stay => 0,
        }
    }

    /// All actions, in index order
    pub fn all() -> [ChainAction; 3] {
        [ChainAction::Left, ChainAction::Right, ChainAction::Stay]
    }
}
