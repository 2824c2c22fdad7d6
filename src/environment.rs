pub use crate::envref::{EnvRef, EnvWeak};
use crate::errors::*;
use crate::expression::{Expression, NativeFn, Procedure};
use crate::primitives;
use crate::symbol::{self, Symbol};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FRAME_ID: AtomicUsize = AtomicUsize::new(0);

fn next_frame_id() -> usize {
    NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub enum Entry {
    Value(Expression),
    Procedure(Procedure<EnvWeak>),
}

impl Entry {
    pub fn value(&self) -> Option<Expression> {
        match self {
            Entry::Value(expr) => Some(expr.clone()),
            Entry::Procedure(proc) => proc.upgrade().map(Expression::Procedure),
        }
    }
}

/// One scope: its own bindings plus a link to the enclosing scope.
pub struct Environment {
    map: HashMap<Symbol, Entry>,
    parent: Option<EnvRef>,
    name: String,
}

impl Environment {
    pub fn new(parent: Option<EnvRef>) -> Environment {
        Environment {
            map: Default::default(),
            parent,
            name: "global".into(),
        }
    }

    /// A call frame for an invocation of the procedure called `proc_name`.
    pub fn new_child(parent: EnvRef, proc_name: &Symbol) -> Environment {
        Environment {
            map: Default::default(),
            parent: Some(parent),
            name: format!("{}#{}", proc_name, next_frame_id()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&EnvRef> {
        self.parent.as_ref()
    }

    pub fn lookup(&self, key: &Symbol) -> Option<Expression> {
        match self.map.get(key) {
            None => self.parent.as_ref().and_then(|p| p.borrow().lookup(key)),
            Some(entry) => entry.value(),
        }
    }

    pub fn contains_local(&self, key: &Symbol) -> bool {
        self.map.contains_key(key)
    }

    pub fn insert<K: Into<Symbol>>(&mut self, key: K, expr: Expression) {
        self.map.insert(key.into(), Entry::Value(expr));
    }

    pub fn insert_entry<K: Into<Symbol>>(&mut self, key: K, entry: Entry) {
        self.map.insert(key.into(), entry);
    }

    pub fn insert_native(&mut self, key: &str, func: NativeFn) {
        self.insert(key, Expression::Native(func));
    }

    /// bindings of this scope only; enclosing scopes are not visited
    pub fn items(&self) -> impl Iterator<Item = (&Symbol, &Entry)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Environment {}: {{", self.name)?;
        for (i, (k, v)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match v {
                Entry::Value(x) => write!(f, "{}: {}", k, x)?,
                Entry::Procedure(p) => write!(f, "{}: {:?}", k, p)?,
            }
        }
        write!(f, "}}")
    }
}

impl EnvRef {
    pub fn lookup(&self, key: &Symbol) -> Result<Expression> {
        let env = self.borrow();
        env.lookup(key).ok_or_else(|| {
            ErrorKind::Unbound {
                symbol: key.clone(),
                env: env.name().to_string(),
            }
            .into()
        })
    }

    /// Bind `key` in this scope, shadowing any outer binding. Returns the
    /// value as stored: anonymous procedures take the name they are bound to.
    pub fn define(&self, key: Symbol, value: Expression) -> Expression {
        let value = match value {
            Expression::Procedure(proc) if proc.name() == symbol::LAMBDA => {
                Expression::Procedure(proc.rename(key.clone()))
            }
            value => value,
        };

        // avoid Rc loops by storing procedures that refer to the
        // environment they live in as weak references.
        let entry = match &value {
            Expression::Procedure(proc) if proc.env().ptr_eq(self) => {
                Entry::Procedure(proc.downgrade())
            }
            value => Entry::Value(value.clone()),
        };

        tracing::trace!(symbol = %key, "define");
        self.borrow_mut().insert_entry(key, entry);
        value
    }

    /// Assign to the nearest scope that already binds `key`. If there is
    /// none, the binding is created in this scope.
    pub fn update(&self, key: Symbol, value: Expression) -> Expression {
        let mut scope = self.clone();
        loop {
            if scope.borrow().contains_local(&key) {
                return scope.define(key, value);
            }
            let parent = scope.borrow().parent().cloned();
            match parent {
                Some(p) => scope = p,
                None => break,
            }
        }
        self.define(key, value)
    }
}

/// The global environment with all primitives and constants installed.
pub fn default_env() -> EnvRef {
    let defenv: EnvRef = Environment::new(None).into();

    {
        let mut env = defenv.borrow_mut();
        env.insert(symbol::TRUE, Expression::from(true));
        env.insert(symbol::FALSE, Expression::from(false));
        env.insert(symbol::NIL, Expression::nil());
        primitives::install(&mut env);
        tracing::debug!(bindings = env.len(), "global environment ready");
    }

    defenv
}
