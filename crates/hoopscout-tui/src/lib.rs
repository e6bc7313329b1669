// Library root: exposes the TUI so integration tests can drive the board
// without a terminal.

pub mod tui;
