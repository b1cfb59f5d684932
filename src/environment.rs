use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A scope shared between the code running in it and every closure that
/// captured it.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_enclosed(outer: &Env) -> Self {
        Self {
            store: HashMap::new(),
            outer: Some(Rc::clone(outer)),
        }
    }

    /// A fresh top-level scope.
    pub fn root() -> Env {
        Rc::new(RefCell::new(Self::new()))
    }

    /// A fresh scope whose lookups fall back to `outer`.
    pub fn enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self::with_enclosed(outer)))
    }

    /// Looks `name` up here, then outwards through the enclosing scopes.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds `name` in this scope only; an outer binding of the same name is
    /// shadowed, never overwritten.
    pub fn set(&mut self, name: &str, val: Object) {
        self.store.insert(name.to_owned(), val);
    }
}
