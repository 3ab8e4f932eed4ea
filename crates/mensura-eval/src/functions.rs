//! Built-in function registry.
//!
//! An immutable, case-insensitive table of numeric functions and their
//! arity contracts, built once at process start and shared read-only
//! across requests. Implementations are plain `fn` pointers over
//! argument slices; arity is checked before dispatch so the bodies may
//! index their arguments directly.

use crate::error::EvalError;
use indexmap::IndexMap;
use std::fmt;

/// Arity contract of a built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exactly(usize),
    /// An inclusive range, e.g. `round` takes 1 or 2.
    Between(usize, usize),
    /// At least `n` arguments (variadics).
    AtLeast(usize),
}

impl Arity {
    /// Whether `n` arguments satisfy this contract.
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            Arity::Exactly(want) => n == want,
            Arity::Between(lo, hi) => n >= lo && n <= hi,
            Arity::AtLeast(min) => n >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::Between(lo, hi) => write!(f, "{} or {}", lo, hi),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Implementation signature for built-ins.
///
/// The slice length has already passed the arity check.
pub type NativeFn = fn(&[f64]) -> Result<f64, EvalError>;

/// A registered built-in function.
#[derive(Debug, Clone, Copy)]
pub struct Function {
    pub name: &'static str,
    pub arity: Arity,
    call: NativeFn,
}

impl Function {
    /// Check arity and dispatch.
    pub fn invoke(&self, args: &[f64]) -> Result<f64, EvalError> {
        if !self.arity.accepts(args.len()) {
            return Err(EvalError::ArityMismatch(self.arity));
        }
        (self.call)(args)
    }
}

/// Immutable registry of built-in functions, keyed by lower-case name.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    funcs: IndexMap<&'static str, Function>,
}

impl FunctionRegistry {
    /// Build the registry with the canonical built-in set.
    pub fn builtin() -> Self {
        let mut registry = Self {
            funcs: IndexMap::new(),
        };

        // Trigonometry (radians)
        registry.register("sin", Arity::Exactly(1), |a| Ok(a[0].sin()));
        registry.register("cos", Arity::Exactly(1), |a| Ok(a[0].cos()));
        registry.register("tan", Arity::Exactly(1), |a| Ok(a[0].tan()));
        registry.register("asin", Arity::Exactly(1), |a| Ok(a[0].asin()));
        registry.register("acos", Arity::Exactly(1), |a| Ok(a[0].acos()));
        registry.register("atan", Arity::Exactly(1), |a| Ok(a[0].atan()));
        registry.register("sinh", Arity::Exactly(1), |a| Ok(a[0].sinh()));
        registry.register("cosh", Arity::Exactly(1), |a| Ok(a[0].cosh()));
        registry.register("tanh", Arity::Exactly(1), |a| Ok(a[0].tanh()));

        // Elementary
        registry.register("ln", Arity::Exactly(1), |a| Ok(a[0].ln()));
        registry.register("log10", Arity::Exactly(1), |a| Ok(a[0].log10()));
        registry.register("log2", Arity::Exactly(1), |a| Ok(a[0].log2()));
        registry.register("exp", Arity::Exactly(1), |a| Ok(a[0].exp()));
        registry.register("sqrt", Arity::Exactly(1), |a| Ok(a[0].sqrt()));
        registry.register("abs", Arity::Exactly(1), |a| Ok(a[0].abs()));
        registry.register("sign", Arity::Exactly(1), |a| Ok(sign(a[0])));
        registry.register("sgn", Arity::Exactly(1), |a| Ok(sign(a[0])));
        registry.register("floor", Arity::Exactly(1), |a| Ok(a[0].floor()));
        registry.register("ceil", Arity::Exactly(1), |a| Ok(a[0].ceil()));
        registry.register("round", Arity::Between(1, 2), round);
        registry.register("pow", Arity::Exactly(2), |a| Ok(a[0].powf(a[1])));
        registry.register("mod", Arity::Exactly(2), |a| Ok(a[0] % a[1]));

        // Variadic aggregates
        registry.register("min", Arity::AtLeast(1), |a| {
            Ok(a.iter().copied().fold(f64::INFINITY, f64::min))
        });
        registry.register("max", Arity::AtLeast(1), |a| {
            Ok(a.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        });
        registry.register("sum", Arity::AtLeast(1), |a| Ok(a.iter().sum()));
        registry.register("prod", Arity::AtLeast(1), |a| Ok(a.iter().product()));
        registry.register("mean", Arity::AtLeast(1), mean);
        registry.register("avg", Arity::AtLeast(1), mean);
        registry.register("var", Arity::AtLeast(2), variance);
        registry.register("std", Arity::AtLeast(2), |a| Ok(variance(a)?.sqrt()));

        // Selection & integer math
        registry.register("if", Arity::Exactly(3), |a| {
            Ok(if a[0].abs() > f64::EPSILON { a[1] } else { a[2] })
        });
        registry.register("fact", Arity::Exactly(1), factorial);
        registry.register("gcd", Arity::Exactly(2), |a| {
            Ok(gcd(trunc_int(a[0]), trunc_int(a[1])) as f64)
        });
        registry.register("lcm", Arity::Exactly(2), lcm);

        registry
    }

    fn register(&mut self, name: &'static str, arity: Arity, call: NativeFn) {
        self.funcs.insert(name, Function { name, arity, call });
    }

    /// Look up a function by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.funcs.get(name.to_ascii_lowercase().as_str())
    }

    /// All registered functions, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.funcs.values()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// -1, 0, or +1 by sign; NaN passes through.
fn sign(x: f64) -> f64 {
    if x.is_nan() {
        x
    } else if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `round(x)` half-away-from-zero; `round(x, n)` to `n` fractional digits.
fn round(args: &[f64]) -> Result<f64, EvalError> {
    if args.len() == 1 {
        return Ok(args[0].round());
    }
    let factor = 10f64.powi(args[1].round() as i32);
    Ok((args[0] * factor).round() / factor)
}

fn mean(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args.iter().sum::<f64>() / args.len() as f64)
}

/// Population variance (denominator N).
fn variance(args: &[f64]) -> Result<f64, EvalError> {
    let n = args.len() as f64;
    let mean = args.iter().sum::<f64>() / n;
    Ok(args.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n)
}

/// Factorial of `round(x)`; errors on negative input.
fn factorial(args: &[f64]) -> Result<f64, EvalError> {
    let x = args[0];
    if x.is_nan() {
        return Ok(x);
    }
    let n = x.round();
    if n < 0.0 {
        return Err(EvalError::Domain(
            "Factorial is undefined for negative numbers.".to_string(),
        ));
    }
    // 171! overflows f64; the final-result policy reports the infinity.
    if n > 170.0 {
        return Ok(f64::INFINITY);
    }
    let mut acc = 1.0;
    let mut k = 2.0;
    while k <= n {
        acc *= k;
        k += 1.0;
    }
    Ok(acc)
}

/// Truncate-to-integer for gcd/lcm; saturates on overflow.
fn trunc_int(x: f64) -> u64 {
    (x.trunc() as i64).unsigned_abs()
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn lcm(args: &[f64]) -> Result<f64, EvalError> {
    let a = trunc_int(args[0]);
    let b = trunc_int(args[1]);
    let g = gcd(a, b);
    if g == 0 {
        return Ok(0.0);
    }
    Ok(((a / g) as u128 * b as u128) as f64)
}
