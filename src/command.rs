/// Result of interpreting a confirmed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Save,
    Discard,
    /// Anything outside the grammar. Not an error; the line is just dropped.
    Unrecognized,
}

/// Parse a command line. Only the exact texts `:x` and `:q!` are commands.
pub fn parse(text: &str) -> CommandOutcome {
    match text {
        ":x" => CommandOutcome::Save,
        ":q!" => CommandOutcome::Discard,
        _ => CommandOutcome::Unrecognized,
    }
}
