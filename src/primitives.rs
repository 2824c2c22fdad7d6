use crate::environment::Environment;
use crate::errors::*;
use crate::expression::{Args, Expression};
use std::convert::TryFrom;

/// Install the builtin procedures into `env`.
pub fn install(env: &mut Environment) {
    // numerical operations

    env.insert_native("+", |args| native_fold(args, 0.0, |a, b| a + b));
    env.insert_native("*", |args| native_fold(args, 1.0, |a, b| a * b));
    env.insert_native("-", |args| native_unifold(args, 0.0, |a, b| a - b));
    env.insert_native("/", |args| native_unifold(args, 1.0, |a, b| a / b));

    // list operations

    env.insert_native("list", |args| Ok(Expression::List(args)));
    env.insert_native("car", native_car);
    env.insert_native("cdr", native_cdr);
    env.insert_native("cons", native_cons);
    env.insert_native("null?", |args| {
        let [x] = unpack::<1>("null?", args)?;
        Ok(x.is_nil().into())
    });

    // equality

    env.insert_native("eq?", |args| {
        let [a, b] = unpack::<2>("eq?", args)?;
        Ok(a.eqv(&b).into())
    });

    // logical operations

    env.insert_native("and", native_and);
    env.insert_native("or", native_or);
    env.insert_native("not", |args| {
        let [x] = unpack::<1>("not", args)?;
        Ok((!x.is_true()).into())
    });
}

/// take exactly `N` arguments
fn unpack<const N: usize>(name: &str, args: Args) -> Result<[Expression; N]> {
    let n = args.len();
    <[Expression; N]>::try_from(args).map_err(|_| {
        ErrorKind::ArityError(format!("{} expects {} argument(s) but got {}", name, N, n)).into()
    })
}

/// apply a bivariate function to all arguments in sequence
fn native_fold<F: Fn(f64, f64) -> f64>(args: Args, mut acc: f64, func: F) -> Result<Expression> {
    for b in &args {
        acc = func(acc, b.try_as_number()?);
    }
    Ok(Expression::Number(acc))
}

/// apply a bivariate function to all arguments in sequence, initializing the
/// accumulator with the first element. Without arguments the result is `empty`.
/// For example: (- 5 2) -> 3, (- 5) -> 5, (-) -> 0
fn native_unifold<F: Fn(f64, f64) -> f64>(args: Args, empty: f64, func: F) -> Result<Expression> {
    let mut args = args.iter();
    let mut acc = match args.next() {
        None => return Ok(Expression::Number(empty)),
        Some(first) => first.try_as_number()?,
    };
    for b in args {
        acc = func(acc, b.try_as_number()?);
    }
    Ok(Expression::Number(acc))
}

fn native_car(args: Args) -> Result<Expression> {
    let [list] = unpack::<1>("car", args)?;
    match list {
        Expression::List(l) => l
            .into_iter()
            .next()
            .ok_or_else(|| ErrorKind::TypeError("car of empty list".into()).into()),
        x => Err(ErrorKind::TypeError(format!("car expects a list, got {}", x)).into()),
    }
}

fn native_cdr(args: Args) -> Result<Expression> {
    let [list] = unpack::<1>("cdr", args)?;
    match list {
        Expression::List(l) => Ok(Expression::List(l.into_iter().skip(1).collect())),
        x => Err(ErrorKind::TypeError(format!("cdr expects a list, got {}", x)).into()),
    }
}

fn native_cons(args: Args) -> Result<Expression> {
    let [car, cdr] = unpack::<2>("cons", args)?;
    match cdr {
        Expression::List(mut l) => {
            l.insert(0, car);
            Ok(Expression::List(l))
        }
        cdr => Ok(Expression::List(vec![car, cdr])),
    }
}

/// the first false argument, otherwise the last argument (`true` if there are none)
fn native_and(args: Args) -> Result<Expression> {
    let mut result = Expression::from(true);
    for x in args {
        if !x.is_true() {
            return Ok(x);
        }
        result = x;
    }
    Ok(result)
}

/// the first argument that is not false, otherwise `false`
fn native_or(args: Args) -> Result<Expression> {
    for x in args {
        if x.is_true() {
            return Ok(x);
        }
    }
    Ok(Expression::from(false))
}
