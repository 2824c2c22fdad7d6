//! Shared handles to environments, and the lock that serializes evaluation
//! over one environment graph.
//!
//! Each scope sits in a `Slot` that only provides interior mutability:
//! `RefCell` by default, `RwLock` with the `thread-safe` feature. Mutual
//! exclusion between threads is not done per scope. An evaluation borrows
//! and reassigns bindings all along the chain, so a whole top-level
//! evaluation has to hold the `GraphLock` of the graph it runs against.

use crate::environment::Environment;
use crate::expression::{Ref, Weak};

pub use slot::{EnvMutRef, EnvTmpRef, GraphGuard, GraphLock};

#[cfg(not(feature = "thread-safe"))]
mod slot {
    use crate::environment::Environment;
    use std::cell::{self, RefCell};
    use std::marker::PhantomData;

    pub type Slot = RefCell<Environment>;
    pub type EnvTmpRef<'a> = cell::Ref<'a, Environment>;
    pub type EnvMutRef<'a> = cell::RefMut<'a, Environment>;

    pub fn new(env: Environment) -> Slot {
        RefCell::new(env)
    }

    pub fn read(slot: &Slot) -> EnvTmpRef {
        slot.borrow()
    }

    pub fn write(slot: &Slot) -> EnvMutRef {
        slot.borrow_mut()
    }

    /// Without threads there is nobody to exclude.
    #[derive(Debug, Default)]
    pub struct GraphLock;

    pub type GraphGuard<'a> = PhantomData<&'a GraphLock>;

    impl GraphLock {
        pub fn acquire(&self) -> GraphGuard {
            PhantomData
        }
    }
}

#[cfg(feature = "thread-safe")]
mod slot {
    use crate::environment::Environment;
    use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

    pub type Slot = RwLock<Environment>;
    pub type EnvTmpRef<'a> = RwLockReadGuard<'a, Environment>;
    pub type EnvMutRef<'a> = RwLockWriteGuard<'a, Environment>;

    pub fn new(env: Environment) -> Slot {
        RwLock::new(env)
    }

    pub fn read(slot: &Slot) -> EnvTmpRef {
        slot.read().expect("unable to lock environment for reading")
    }

    pub fn write(slot: &Slot) -> EnvMutRef {
        slot.write().expect("unable to lock environment for writing")
    }

    /// One lock for a whole environment graph. Holders get exclusive use of
    /// every scope reachable from the global one.
    #[derive(Debug, Default)]
    pub struct GraphLock(Mutex<()>);

    pub type GraphGuard<'a> = MutexGuard<'a, ()>;

    impl GraphLock {
        pub fn acquire(&self) -> GraphGuard {
            self.0.lock().expect("unable to lock environment graph")
        }
    }
}

#[derive(Clone)]
pub struct EnvRef(Ref<slot::Slot>);

impl From<Environment> for EnvRef {
    fn from(env: Environment) -> Self {
        EnvRef(Ref::new(slot::new(env)))
    }
}

impl EnvRef {
    pub fn borrow(&self) -> EnvTmpRef {
        slot::read(&self.0)
    }

    pub fn borrow_mut(&self) -> EnvMutRef {
        slot::write(&self.0)
    }

    pub fn downgrade(&self) -> EnvWeak {
        EnvWeak(Ref::downgrade(&self.0))
    }

    /// Same scope, not merely equal contents.
    pub fn ptr_eq(&self, other: &EnvRef) -> bool {
        Ref::ptr_eq(&self.0, &other.0)
    }

    pub fn strong_count(&self) -> usize {
        Ref::strong_count(&self.0)
    }
}

#[derive(Clone, Default)]
pub struct EnvWeak(Weak<slot::Slot>);

impl EnvWeak {
    pub fn upgrade(&self) -> Option<EnvRef> {
        self.0.upgrade().map(EnvRef)
    }
}
