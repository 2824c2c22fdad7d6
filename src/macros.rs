/// Build an [`Expression`](crate::expression::Expression) from Rust tokens.
///
/// ```text
/// lisp!(x)                 => x
/// lisp!(2.5)               => 2.5
/// lisp!((f, 1.0, (g, x)))  => (f 1 (g x))
/// lisp!((lambda, @params, @body))
/// ```
///
/// Identifiers become symbols, literals go through `From`, and `@expr`
/// splices in any value that converts into an expression.
macro_rules! lisp {
    (@items [$($done:expr),*]) => {
        $crate::expression::Expression::List(vec![$($done),*])
    };

    (@items [$($done:expr),*] ($($inner:tt)*) $(, $($rest:tt)*)?) => {
        lisp!(@items [$($done,)* lisp!(($($inner)*))] $($($rest)*)?)
    };

    (@items [$($done:expr),*] @$value:expr $(, $($rest:tt)*)?) => {
        lisp!(@items [$($done,)* $crate::expression::Expression::from($value)] $($($rest)*)?)
    };

    (@items [$($done:expr),*] $name:ident $(, $($rest:tt)*)?) => {
        lisp!(@items [$($done,)* lisp!($name)] $($($rest)*)?)
    };

    (@items [$($done:expr),*] $lit:literal $(, $($rest:tt)*)?) => {
        lisp!(@items [$($done,)* lisp!($lit)] $($($rest)*)?)
    };

    (($($items:tt)*)) => {
        lisp!(@items [] $($items)*)
    };

    ($name:ident) => {
        $crate::expression::Expression::Symbol(stringify!($name).into())
    };

    ($lit:literal) => {
        $crate::expression::Expression::from($lit)
    };
}
