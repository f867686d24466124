//! Interactive REPL
//!
//! Each accepted entry is a program fragment: bare atoms are added to the
//! space and `!`-prefixed atoms are evaluated. Multi-line entries are read
//! until their parentheses balance.

pub mod helper;

pub use helper::ReplHelper;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing::warn;

use crate::backend::Interpreter;
use crate::config::EngineConfig;
use crate::session::run_text;

/// Run the REPL until `exit`, `quit`, Ctrl-D or Ctrl-C
pub fn run(interpreter: &Interpreter, config: &EngineConfig) -> rustyline::Result<()> {
    let mut editor: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ReplHelper::new(interpreter.registry().names())));

    let history = config.repl.history_path();
    if let Some(path) = &history {
        // A missing history file is normal on first run
        let _ = editor.load_history(path);
    }

    let mut line_num = 1;
    loop {
        match editor.readline(&format!("atomspace[{}]> ", line_num)) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                editor.add_history_entry(input)?;
                if input == "exit" || input == "quit" {
                    break;
                }

                match run_text(interpreter, input, &config.engine) {
                    Ok(output) => {
                        for line in output {
                            println!("{}", line);
                        }
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
                line_num += 1;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                warn!(target: "atomspace::repl", error = %e, "cannot create history directory");
            }
        }
        if let Err(e) = editor.save_history(path) {
            warn!(target: "atomspace::repl", error = %e, "cannot save history");
        }
    }
    Ok(())
}
