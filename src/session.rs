//! Program execution - statements in, rendered query results out
//!
//! Shared by file evaluation, the prelude and the REPL. Asserted atoms go
//! straight into the space; each query produces one `[..]` line.

use std::path::Path;

use tracing::{debug, info};

use crate::backend::Interpreter;
use crate::config::EngineSection;
use crate::sexpr::{format_results, parse_program, ParseError, Statement};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },
}

/// Run statements in order; returns one rendered line per query
///
/// Later statements see the effects of earlier ones, including atoms added
/// by `assert` inside a query.
pub fn run_statements(
    interpreter: &Interpreter,
    statements: Vec<Statement>,
    engine: &EngineSection,
) -> Vec<String> {
    let mut output = Vec::new();
    for statement in statements {
        match statement {
            Statement::Assert(atom) => {
                interpreter.space().add(atom);
            }
            Statement::Query(query) => {
                let results = engine.cap(interpreter.evaluate(&query));
                debug!(target: "atomspace::session", %query, results = results.len());
                output.push(format_results(&results));
            }
        }
    }
    output
}

/// Parse and run program text
pub fn run_text(
    interpreter: &Interpreter,
    text: &str,
    engine: &EngineSection,
) -> Result<Vec<String>, ParseError> {
    Ok(run_statements(interpreter, parse_program(text)?, engine))
}

/// Run every prelude file; a broken file stops the load
pub fn load_prelude(interpreter: &Interpreter, engine: &EngineSection) -> Result<(), SessionError> {
    for path in &engine.prelude {
        let output = run_file(interpreter, path, engine)?;
        info!(
            target: "atomspace::session::prelude",
            path = %path.display(),
            queries = output.len(),
            atoms = interpreter.space().count()
        );
    }
    Ok(())
}

fn run_file(
    interpreter: &Interpreter,
    path: &Path,
    engine: &EngineSection,
) -> Result<Vec<String>, SessionError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
        path: display.clone(),
        source,
    })?;
    run_text(interpreter, &text, engine).map_err(|source| SessionError::Parse {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AtomSpace;
    use std::io::Write;
    use std::sync::Arc;

    fn interpreter() -> Interpreter {
        Interpreter::new(Arc::new(AtomSpace::new()))
    }

    #[test]
    fn test_run_text_mixes_facts_and_queries() {
        let interp = interpreter();
        let program = r#"
            (Human Socrates)
            (implies (Human $x) (Mortal $x))
            !(Mortal Socrates)
            !(Mortal Plato)
        "#;
        let output = run_text(&interp, program, &EngineSection::default()).unwrap();
        assert_eq!(output, vec!["[(Mortal Socrates)]", "[]"]);
        assert_eq!(interp.space().count(), 2);
    }

    #[test]
    fn test_queries_see_earlier_asserts() {
        let interp = interpreter();
        let program = "!(assert (Dog Fido))\n!(match (Dog $x) $x)";
        let output = run_text(&interp, program, &EngineSection::default()).unwrap();
        assert_eq!(output, vec!["[()]", "[Fido]"]);
    }

    #[test]
    fn test_results_are_capped() {
        let interp = interpreter();
        let engine = EngineSection {
            prelude: vec![],
            max_results: 1,
        };
        let output = run_text(&interp, "(n a) (n b) !(n $x)", &engine).unwrap();
        assert_eq!(output, vec!["[(n a)]"]);
    }

    #[test]
    fn test_parse_error_runs_nothing() {
        let interp = interpreter();
        assert!(run_text(&interp, "(Human Socrates) (broken", &EngineSection::default()).is_err());
        assert!(interp.space().is_empty());
    }

    #[test]
    fn test_load_prelude() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(Human Socrates)\n(Human Plato)").unwrap();

        let interp = interpreter();
        let engine = EngineSection {
            prelude: vec![file.path().to_path_buf()],
            max_results: 0,
        };
        load_prelude(&interp, &engine).unwrap();
        assert_eq!(interp.space().count(), 2);
    }

    #[test]
    fn test_load_prelude_missing_file() {
        let interp = interpreter();
        let engine = EngineSection {
            prelude: vec!["/no/such/prelude.metta".into()],
            max_results: 0,
        };
        assert!(matches!(
            load_prelude(&interp, &engine),
            Err(SessionError::Io { .. })
        ));
    }
}
