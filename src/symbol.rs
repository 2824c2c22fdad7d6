#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    name: String,
}

pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const NIL: &str = "NIL";

pub const BEGIN: &str = "begin";
pub const COND: &str = "cond";
pub const DEFINE: &str = "define";
pub const ELSE: &str = "else";
pub const IF: &str = "if";
pub const LAMBDA: &str = "lambda";
pub const QUOTE: &str = "quote";
pub const SETVAR: &str = "set!";

impl Symbol {
    pub fn new<T: AsRef<str> + ToString>(name: T) -> Self {
        Symbol {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol { name }
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, s: &str) -> bool {
        self.name() == s
    }
}
