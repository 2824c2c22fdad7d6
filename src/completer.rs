use lisp_interpreter::environment::EnvWeak;
use lisp_interpreter::lexer::{Lexer, Token};
use lisp_interpreter::symbol;
use rustyline::{
    self, completion::Completer, highlight::Highlighter, hint::Hinter, validate::Validator,
    Context, Helper,
};

const SPECIAL_FORMS: &[&str] = &[
    symbol::BEGIN,
    symbol::COND,
    symbol::DEFINE,
    symbol::ELSE,
    symbol::IF,
    symbol::LAMBDA,
    symbol::QUOTE,
    symbol::SETVAR,
];

/// Completes symbols bound in the global environment.
pub struct EnvHelper(EnvWeak);

impl EnvHelper {
    pub fn new(env: EnvWeak) -> Self {
        EnvHelper(env)
    }
}

impl Helper for EnvHelper {}

impl Hinter for EnvHelper {}

impl Highlighter for EnvHelper {}

impl Validator for EnvHelper {}

impl Completer for EnvHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let env = match self.0.upgrade() {
            Some(env) => env,
            None => return Ok((0, vec![])),
        };

        let token = match Lexer::new(line).find(|pt| pt.start_idx <= pos && pt.end_idx == pos) {
            Some(t) => t,
            None => return Ok((pos, vec![])),
        };

        let prefix = match &token.token {
            Token::Atom(s) => &s[..pos - token.start_idx],
            _ => return Ok((pos, vec![])),
        };

        let mut candidates: Vec<String> = env
            .borrow()
            .items()
            .map(|(key, _)| key.name().to_string())
            .filter(|name| name.starts_with(prefix))
            .collect();
        candidates.extend(
            SPECIAL_FORMS
                .iter()
                .filter(|name| name.starts_with(prefix))
                .map(|name| name.to_string()),
        );
        candidates.sort();
        candidates.dedup();

        Ok((token.start_idx, candidates))
    }
}
