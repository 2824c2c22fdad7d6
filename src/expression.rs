use crate::environment::{EnvRef, EnvWeak};
use crate::errors::*;
use crate::symbol::{self, Symbol};

#[cfg(feature = "thread-safe")]
pub use std::sync::{Arc as Ref, Weak};

#[cfg(not(feature = "thread-safe"))]
pub use std::rc::{Rc as Ref, Weak};

pub type Args = Vec<Expression>;
pub type NativeFn = fn(Args) -> Result<Expression>;

#[derive(Clone)]
pub enum Expression {
    Number(f64),
    Symbol(Symbol),
    /// the empty list doubles as nil
    List(Vec<Expression>),
    Procedure(Procedure<EnvRef>),
    Native(NativeFn),
}

impl Expression {
    pub fn nil() -> Self {
        Expression::List(vec![])
    }

    /// Classify an atom. A token is a number only if all of it parses as a float.
    pub fn from_literal<T: AsRef<str> + ToString>(s: T) -> Self {
        match s.as_ref().parse() {
            Ok(x) => Expression::Number(x),
            Err(_) => Expression::Symbol(Symbol::new(s)),
        }
    }

    pub fn is_nil(&self) -> bool {
        match self {
            Expression::List(l) => l.is_empty(),
            _ => false,
        }
    }

    /// Only the symbol `false` is false; the empty list and zero are not.
    pub fn is_true(&self) -> bool {
        !self.is_named_symbol(symbol::FALSE)
    }

    pub fn is_named_symbol<T: AsRef<str>>(&self, name: T) -> bool {
        match self {
            Expression::Symbol(s) => s.name() == name.as_ref(),
            _ => false,
        }
    }

    pub fn try_as_number(&self) -> Result<f64> {
        match self {
            Expression::Number(x) => Ok(*x),
            _ => Err(ErrorKind::TypeError(format!("{} is not a number.", self)).into()),
        }
    }

    pub fn try_as_symbol(&self) -> Result<&Symbol> {
        match self {
            Expression::Symbol(s) => Ok(s),
            _ => Err(ErrorKind::TypeError(format!("{} is not a symbol.", self)).into()),
        }
    }

    pub fn try_as_list(&self) -> Result<&[Expression]> {
        match self {
            Expression::List(l) => Ok(l),
            _ => Err(ErrorKind::TypeError(format!("{} is not a list.", self)).into()),
        }
    }

    /// Equality as seen by `eq?`: numbers and symbols compare by value,
    /// every other pairing is unequal.
    pub fn eqv(&self, rhs: &Self) -> bool {
        use Expression::*;
        match (self, rhs) {
            (Number(a), Number(b)) => float_eq(*a, *b),
            (Symbol(a), Symbol(b)) => a == b,
            _ => false,
        }
    }
}

// This function exists to make clippy stop complaining about exact floating point comparison.
#[inline(always)]
fn float_eq(a: f64, b: f64) -> bool {
    a == b
}

impl std::fmt::Debug for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Expression::Number(x) => write!(f, "{}", x),
            Expression::Symbol(s) => write!(f, "{}", s),
            Expression::List(l) => {
                write!(f, "(")?;
                for (i, item) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, ")")
            }
            Expression::Procedure(p) => write!(f, "#<procedure {:?}>", p),
            Expression::Native(_) => write!(f, "<native>"),
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Expression::Number(x) => write!(f, "{}", x),
            Expression::Symbol(s) => write!(f, "{}", s),
            Expression::List(l) => {
                write!(f, "(")?;
                for (i, item) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Expression::Procedure(_) => write!(f, "<lambda>"),
            Expression::Native(_) => write!(f, "<primitive>"),
        }
    }
}

impl From<f64> for Expression {
    fn from(x: f64) -> Self {
        Expression::Number(x)
    }
}

impl From<Symbol> for Expression {
    fn from(s: Symbol) -> Self {
        Expression::Symbol(s)
    }
}

impl From<Vec<Expression>> for Expression {
    fn from(l: Vec<Expression>) -> Self {
        Expression::List(l)
    }
}

impl From<bool> for Expression {
    fn from(b: bool) -> Self {
        if b {
            Expression::Symbol(symbol::TRUE.into())
        } else {
            Expression::Symbol(symbol::FALSE.into())
        }
    }
}

impl From<Procedure<EnvRef>> for Expression {
    fn from(proc: Procedure<EnvRef>) -> Self {
        Expression::Procedure(proc)
    }
}

impl std::cmp::PartialEq for Expression {
    fn eq(&self, rhs: &Self) -> bool {
        use Expression::*;
        match (self, rhs) {
            (Number(a), Number(b)) => float_eq(*a, *b),
            (Symbol(a), Symbol(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Procedure(a), Procedure(b)) => a == b,
            (Native(a), Native(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

impl std::cmp::PartialEq<Symbol> for Expression {
    fn eq(&self, rhs: &Symbol) -> bool {
        match self {
            Expression::Symbol(s) => s == rhs,
            _ => false,
        }
    }
}

/// A user defined procedure. `E` is the handle to the captured environment:
/// strong while the procedure is a value, weak while it is stored in the
/// very environment it captured.
#[derive(Clone)]
pub struct Procedure<E> {
    body: Ref<Expression>,
    params: Ref<Vec<Symbol>>,
    env: E,
    name: Symbol,
}

impl<E> Procedure<E> {
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    pub fn rename(mut self, name: Symbol) -> Self {
        self.name = name;
        self
    }

    pub fn body_ex(&self) -> &Expression {
        &self.body
    }

    pub fn params(&self) -> &[Symbol] {
        &self.params
    }

    pub fn env(&self) -> &E {
        &self.env
    }
}

impl Procedure<EnvRef> {
    pub fn new(params: Vec<Symbol>, body: Expression, env: EnvRef) -> Self {
        Procedure {
            body: Ref::new(body),
            params: Ref::new(params),
            env,
            name: symbol::LAMBDA.into(),
        }
    }

    /// Build a procedure from a parameter list expression, checking that it
    /// consists of symbols only.
    pub fn build(signature: &Expression, body: Expression, env: &EnvRef) -> Result<Self> {
        let params = signature
            .try_as_list()?
            .iter()
            .map(|p| p.try_as_symbol().map(Clone::clone))
            .collect::<Result<_>>()?;
        Ok(Procedure::new(params, body, env.clone()))
    }

    pub fn downgrade(&self) -> Procedure<EnvWeak> {
        Procedure {
            body: self.body.clone(),
            params: self.params.clone(),
            env: self.env.downgrade(),
            name: self.name.clone(),
        }
    }
}

impl Procedure<EnvWeak> {
    pub fn upgrade(&self) -> Option<Procedure<EnvRef>> {
        Some(Procedure {
            env: self.env.upgrade()?,
            body: self.body.clone(),
            params: self.params.clone(),
            name: self.name.clone(),
        })
    }
}

impl<T> PartialEq for Procedure<T> {
    fn eq(&self, other: &Self) -> bool {
        Ref::ptr_eq(&self.body, &other.body)
    }
}

impl<T> std::fmt::Debug for Procedure<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}", self.name)?;
        for p in self.params.iter() {
            write!(f, " {}", p)?;
        }
        write!(f, ")")
    }
}
