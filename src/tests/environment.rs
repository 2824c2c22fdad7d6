use super::{num, sym};
use crate::environment::{default_env, EnvRef, Environment};
use crate::errors::ErrorKind;
use crate::expression::Expression;
use crate::symbol::Symbol;

fn child_of(parent: &EnvRef, name: &str) -> EnvRef {
    Environment::new_child(parent.clone(), &Symbol::new(name)).into()
}

#[test]
fn define_is_local_and_lookup_walks_outward() {
    let global: EnvRef = Environment::new(None).into();
    let local = child_of(&global, "f");

    global.define("x".into(), num(1.0));
    local.define("y".into(), num(2.0));

    assert_eq!(num(1.0), local.lookup(&"x".into()).unwrap());
    assert_eq!(num(2.0), local.lookup(&"y".into()).unwrap());
    assert!(global.lookup(&"y".into()).is_err());
}

#[test]
fn define_shadows_outer_binding() {
    let global: EnvRef = Environment::new(None).into();
    let local = child_of(&global, "f");

    global.define("x".into(), num(1.0));
    local.define("x".into(), num(2.0));

    assert_eq!(num(2.0), local.lookup(&"x".into()).unwrap());
    assert_eq!(num(1.0), global.lookup(&"x".into()).unwrap());
}

#[test]
fn update_assigns_the_nearest_binding() {
    let global: EnvRef = Environment::new(None).into();
    let middle = child_of(&global, "f");
    let inner = child_of(&middle, "g");

    global.define("x".into(), num(1.0));
    middle.define("x".into(), num(2.0));

    assert_eq!(num(3.0), inner.update("x".into(), num(3.0)));
    assert_eq!(num(3.0), middle.lookup(&"x".into()).unwrap());
    assert_eq!(num(1.0), global.lookup(&"x".into()).unwrap());
    assert!(!inner.borrow().contains_local(&"x".into()));
}

#[test]
fn update_without_binding_defines_locally() {
    let global: EnvRef = Environment::new(None).into();
    let local = child_of(&global, "f");

    local.update("z".into(), num(4.0));

    assert!(local.borrow().contains_local(&"z".into()));
    assert!(global.lookup(&"z".into()).is_err());
}

#[test]
fn unbound_reports_the_frame_name() {
    let global: EnvRef = Environment::new(None).into();
    let local = child_of(&global, "f");

    match global.lookup(&"nope".into()).unwrap_err().into_kind() {
        ErrorKind::Unbound { env, .. } => assert_eq!("global", env),
        e => panic!("unexpected error: {}", e),
    }
    match local.lookup(&"nope".into()).unwrap_err().into_kind() {
        ErrorKind::Unbound { symbol, env } => {
            assert_eq!("nope", symbol.name());
            assert!(env.starts_with("f#"), "{}", env);
        }
        e => panic!("unexpected error: {}", e),
    }
}

#[test]
fn frames_get_distinct_names() {
    let global: EnvRef = Environment::new(None).into();
    let a = child_of(&global, "f");
    let b = child_of(&global, "f");
    assert_ne!(a.borrow().name(), b.borrow().name());
}

#[test]
fn items_lists_local_bindings_only() {
    let global: EnvRef = Environment::new(None).into();
    let local = child_of(&global, "f");

    global.define("x".into(), num(1.0));
    local.define("y".into(), num(2.0));

    let names: Vec<String> = local
        .borrow()
        .items()
        .map(|(k, _)| k.name().to_string())
        .collect();
    assert_eq!(vec!["y".to_string()], names);
    assert_eq!(1, local.borrow().len());
}

#[test]
fn default_env_bindings() {
    let env = default_env();
    assert!(env.borrow().parent().is_none());
    assert_eq!("global", env.borrow().name());
    assert_eq!(sym("true"), env.lookup(&"true".into()).unwrap());
    assert_eq!(sym("false"), env.lookup(&"false".into()).unwrap());
    assert_eq!(Expression::nil(), env.lookup(&"NIL".into()).unwrap());
    for name in &[
        "+", "-", "*", "/", "list", "car", "cdr", "cons", "eq?", "null?", "and", "or", "not",
    ] {
        assert!(
            matches!(env.lookup(&Symbol::new(name)), Ok(Expression::Native(_))),
            "{} is not a primitive",
            name
        );
    }
}

#[test]
fn separate_default_envs_are_independent() {
    let a = default_env();
    let b = default_env();
    a.define("x".into(), num(1.0));
    assert!(b.lookup(&"x".into()).is_err());
}
