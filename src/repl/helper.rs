//! Rustyline helper integration
//!
//! Completion over operation names and REPL commands, plus a validator that
//! keeps reading lines until the parentheses balance.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use crate::sexpr::{check_completeness, Completeness};

/// REPL commands handled outside the engine
pub const COMMANDS: &[&str] = &["exit", "quit"];

/// REPL helper for atom input
pub struct ReplHelper {
    completions: Vec<String>,
}

impl ReplHelper {
    /// Create a helper completing the given words (typically operation names)
    pub fn new(words: impl IntoIterator<Item = String>) -> Self {
        let mut completions: Vec<String> = words.into_iter().collect();
        completions.extend(COMMANDS.iter().map(|s| s.to_string()));
        completions.sort();
        completions.dedup();
        ReplHelper { completions }
    }

    fn candidates(&self, partial: &str) -> Vec<Pair> {
        self.completions
            .iter()
            .filter(|comp| comp.starts_with(partial))
            .map(|comp| Pair {
                display: comp.clone(),
                replacement: comp.clone(),
            })
            .collect()
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_before_cursor = &line[..pos];

        // Start of the word under the cursor
        let word_start = line_before_cursor
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .map(|i| i + 1)
            .unwrap_or(0);

        let partial = &line_before_cursor[word_start..];
        if partial.is_empty() {
            return Ok((pos, vec![]));
        }

        Ok((word_start, self.candidates(partial)))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(match check_completeness(ctx.input()) {
            Completeness::Complete => ValidationResult::Valid(None),
            Completeness::Incomplete => ValidationResult::Incomplete,
            // Let the line through so the parse error is reported
            Completeness::Invalid => ValidationResult::Valid(None),
        })
    }
}

impl Helper for ReplHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_include_commands() {
        let helper = ReplHelper::new(vec!["match".to_string(), "and".to_string()]);
        assert_eq!(helper.completions, vec!["and", "exit", "match", "quit"]);
    }

    #[test]
    fn test_candidates_by_prefix() {
        let helper = ReplHelper::new(vec!["match".to_string(), "assert".to_string()]);
        let names: Vec<_> = helper.candidates("ma").into_iter().map(|p| p.display).collect();
        assert_eq!(names, vec!["match"]);
        assert!(helper.candidates("zzz").is_empty());
    }
}
