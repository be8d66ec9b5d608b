/// Errors in how a UI or decision source was configured
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "the key bindings bind action {action} to the {key} key, which is reserved for the \
         game console. Please choose a different key for this action."
    )]
    ReservedKey { key: String, action: String },
    #[error("a random agent needs at least one action to choose from")]
    EmptyActionSet,
}
