use super::{num, run, run_err, run_in_env, sym};
use crate::environment::default_env;
use crate::errors::ErrorKind;
use crate::expression::Expression;
use crate::interpreter::eval;
use crate::{render, Interpreter};

#[test]
fn self_evaluating() {
    assert_eq!(num(42.0), run("42").unwrap());
    assert_eq!(Expression::nil(), run("()").unwrap());
}

#[test]
fn procedures_evaluate_to_themselves() {
    let env = default_env();

    let native = Expression::Native(|_| Ok(Expression::nil()));
    let value = eval(&native, &env).unwrap();
    assert!(matches!(value, Expression::Native(_)));
    assert_eq!(native, value);

    let car = env.lookup(&"car".into()).unwrap();
    assert_eq!(car, eval(&car, &env).unwrap());

    let closure = run_in_env("(lambda (x) x)", &env).unwrap();
    let value = eval(&closure, &env).unwrap();
    assert!(matches!(value, Expression::Procedure(_)));
    assert_eq!(closure, value);
}

#[test]
fn arithmetic() {
    assert_eq!(num(6.0), run("(+ 1 2 3)").unwrap());
    assert_eq!(num(1.0), run("(* )").unwrap());
    assert_eq!(num(0.0), run("(+)").unwrap());
    assert_eq!(num(14.0), run("(+ 2 (* 3 4))").unwrap());
}

#[test]
fn define_binds_in_shared_env() {
    let env = default_env();
    assert_eq!(num(5.0), run_in_env("(define x 5)", &env).unwrap());
    assert_eq!(num(6.0), run_in_env("(+ x 1)", &env).unwrap());
    assert_eq!(num(5.0), run_in_env("x", &env).unwrap());
    assert_eq!(num(6.0), run("(define x 5) (+ x 1)").unwrap());
}

#[test]
fn define_rejects_non_symbols() {
    assert!(matches!(run_err("(define 5 3)"), ErrorKind::TypeError(_)));
    assert!(matches!(run_err("(define x)"), ErrorKind::ArityError(_)));
    assert!(matches!(run_err("(define x 1 2)"), ErrorKind::ArityError(_)));
}

#[test]
fn define_procedure_shorthand() {
    assert_eq!(
        num(16.0),
        run("(define (square x) (* x x)) (square 4)").unwrap()
    );
    assert_eq!(num(7.0), run("(define (seven) 7) (seven)").unwrap());
}

#[test]
fn only_false_is_false() {
    assert_eq!(num(2.0), run("(if false 1 2)").unwrap());
    assert_eq!(num(1.0), run("(if 0 1 2)").unwrap());
    assert_eq!(num(1.0), run("(if (list) 1 2)").unwrap());
    assert_eq!(num(1.0), run("(if true 1 2)").unwrap());
    assert_eq!(num(1.0), run("(if (quote nope) 1 2)").unwrap());
}

#[test]
fn if_evaluates_one_branch() {
    assert_eq!(num(1.0), run("(if true 1 (car (list)))").unwrap());
    assert_eq!(
        num(0.0),
        run("(define x 0) (if false (set! x 1) x)").unwrap()
    );
}

#[test]
fn if_arity() {
    assert!(matches!(run_err("(if true 1)"), ErrorKind::ArityError(_)));
    assert!(matches!(run_err("(if true 1 2 3)"), ErrorKind::ArityError(_)));
}

#[test]
fn quote() {
    assert_eq!(lisp!((a, b, c)), run("(quote (a b c))").unwrap());
    assert_eq!(sym("x"), run("(quote x)").unwrap());
    assert_eq!(
        Expression::List(vec![
            sym("undefined"),
            Expression::List(vec![sym("+"), num(1.0), num(2.0)])
        ]),
        run("(quote (undefined (+ 1 2)))").unwrap()
    );
    assert!(matches!(run_err("(quote)"), ErrorKind::ArityError(_)));
    assert!(matches!(run_err("(quote a b)"), ErrorKind::ArityError(_)));
}

#[test]
fn unbound_variable() {
    match run_err("(+ y 1)") {
        ErrorKind::Unbound { symbol, env } => {
            assert_eq!("y", symbol.name());
            assert_eq!("global", env);
        }
        e => panic!("unexpected error: {}", e),
    }
}

#[test]
fn calling_non_procedures() {
    assert!(matches!(run_err("(1 2 3)"), ErrorKind::NotAProcedure(_)));
    assert!(matches!(
        run_err("((quote x) 1)"),
        ErrorKind::NotAProcedure(_)
    ));
    assert!(matches!(run_err("((list) 1)"), ErrorKind::NotAProcedure(_)));
}

#[test]
fn set_assigns_existing_binding() {
    assert_eq!(num(2.0), run("(define x 1) (set! x 2) x").unwrap());
    assert_eq!(num(2.0), run("(define x 1) (set! x 2)").unwrap());
}

#[test]
fn set_unbound_defines_locally() {
    assert_eq!(num(3.0), run("(set! z 3) z").unwrap());
}

#[test]
fn set_arity() {
    assert!(matches!(run_err("(set! x)"), ErrorKind::ArityError(_)));
    assert!(matches!(run_err("(set! 1 2)"), ErrorKind::TypeError(_)));
}

#[test]
fn begin_returns_last_value() {
    assert_eq!(
        num(3.0),
        run("(begin (define a 1) (define b 2) (+ a b))").unwrap()
    );
    assert!(matches!(run_err("(begin)"), ErrorKind::ArityError(_)));
}

#[test]
fn cond() {
    let src = "
        (define classify
          (lambda (x)
            (cond ((eq? x 1) (quote one))
                  ((eq? x 5) (quote five))
                  (else (quote other)))))";
    let env = default_env();
    run_in_env(src, &env).unwrap();
    assert_eq!(sym("one"), run_in_env("(classify 1)", &env).unwrap());
    assert_eq!(sym("five"), run_in_env("(classify 5)", &env).unwrap());
    assert_eq!(sym("other"), run_in_env("(classify 9)", &env).unwrap());

    assert_eq!(Expression::nil(), run("(cond (false 1))").unwrap());
    assert_eq!(num(7.0), run("(cond (false 1) (7))").unwrap());
    assert_eq!(num(3.0), run("(cond (true 1 2 3))").unwrap());
}

#[test]
fn operands_evaluate_left_to_right() {
    assert_eq!(
        lisp!((1.0, 10.0)),
        run("(define x 0) (list (set! x (+ x 1)) (set! x (* x 10)))").unwrap()
    );
}

#[test]
fn errors_carry_context() {
    let err = run("(+ 1 (car (list)))").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeError(_)));
    let context: Vec<_> = err.context().iter().map(render).collect();
    assert_eq!(vec!["(car (list))", "(+ 1 (car (list)))"], context);
}

#[test]
fn failed_define_leaves_no_binding() {
    let env = default_env();
    assert!(run_in_env("(define x (car (list)))", &env).is_err());
    assert!(matches!(
        run_in_env("x", &env).unwrap_err().into_kind(),
        ErrorKind::Unbound { .. }
    ));
}

#[test]
fn render_values() {
    assert_eq!("<lambda>", render(&run("(lambda (x) x)").unwrap()));
    assert_eq!("<primitive>", render(&run("car").unwrap()));
    assert_eq!("(1 (2 a) ())", render(&run("(list 1 (list 2 (quote a)) NIL)").unwrap()));
    assert_eq!("0.5", render(&run("(/ 1 2)").unwrap()));
}

#[test]
fn interpreter_keeps_global_state() {
    let interpreter = Interpreter::new();
    assert_eq!(Expression::nil(), interpreter.eval_str("").unwrap());
    interpreter.eval_str("(define x 5)").unwrap();
    assert_eq!(num(6.0), interpreter.eval_str("(+ x 1)").unwrap());
    assert_eq!(
        num(9.0),
        interpreter
            .eval_str("(define add (lambda (a b) (+ a b))) (add 4 5)")
            .unwrap()
    );
}

#[test]
fn interpreter_clones_share_the_global_environment() {
    let first = Interpreter::new();
    let second = first.clone();
    first.eval_str("(define shared 1)").unwrap();
    second.eval_str("(set! shared (+ shared 1))").unwrap();
    assert_eq!(num(2.0), first.eval_str("shared").unwrap());
    assert!(first.global().ptr_eq(second.global()));
}

#[test]
fn interpreter_reports_syntax_errors() {
    let interpreter = Interpreter::new();
    let err = interpreter.eval_str("(define y 1) (+ y").unwrap_err();
    assert!(err.kind().is_syntax_error());
    // forms before the broken one have been evaluated
    assert_eq!(num(1.0), interpreter.eval_str("y").unwrap());
}
