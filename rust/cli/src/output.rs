//! Output emitter: one `"<action> <amount>"` line per decision, flushed
//! before the next input line is read.

use std::io::{self, Write};

use deepgreen_engine::player::PlayerAction;

pub fn emit(out: &mut dyn Write, action: &PlayerAction) -> io::Result<()> {
    writeln!(out, "{}", action)?;
    out.flush()
}
