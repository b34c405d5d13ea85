use super::numeric;
use std::fmt;

/// Reserved functions implemented directly by the evaluator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Builtin {
    Sqrt,
    Cbrt,
    NthRoot,
    Abs,
    BitDecrement,
    BitIncrement,
    Floor,
    Ceil,
    Exp,
    Logb,
    Log10,
    Log2,
    Log,
    Trunc,
    Sin,
    Sinh,
    Asin,
    Asinh,
    Cos,
    Cosh,
    Acos,
    Acosh,
    Tan,
    Tanh,
    Atan,
    Atanh,
    Round,
    Pow,
    Max,
    Min,
    MaxMagnitude,
    MinMagnitude,
    Rand,
    RandInt,
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    ShiftLeft,
    ShiftRight,
}

impl Builtin {
    pub const ALL: [Builtin; 40] = [
        Builtin::Sqrt,
        Builtin::Cbrt,
        Builtin::NthRoot,
        Builtin::Abs,
        Builtin::BitDecrement,
        Builtin::BitIncrement,
        Builtin::Floor,
        Builtin::Ceil,
        Builtin::Exp,
        Builtin::Logb,
        Builtin::Log10,
        Builtin::Log2,
        Builtin::Log,
        Builtin::Trunc,
        Builtin::Sin,
        Builtin::Sinh,
        Builtin::Asin,
        Builtin::Asinh,
        Builtin::Cos,
        Builtin::Cosh,
        Builtin::Acos,
        Builtin::Acosh,
        Builtin::Tan,
        Builtin::Tanh,
        Builtin::Atan,
        Builtin::Atanh,
        Builtin::Round,
        Builtin::Pow,
        Builtin::Max,
        Builtin::Min,
        Builtin::MaxMagnitude,
        Builtin::MinMagnitude,
        Builtin::Rand,
        Builtin::RandInt,
        Builtin::BitAnd,
        Builtin::BitOr,
        Builtin::BitXor,
        Builtin::BitNot,
        Builtin::ShiftLeft,
        Builtin::ShiftRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Sqrt => "sqrt",
            Builtin::Cbrt => "cbrt",
            Builtin::NthRoot => "ntrt",
            Builtin::Abs => "abs",
            Builtin::BitDecrement => "bitdcr",
            Builtin::BitIncrement => "bitinc",
            Builtin::Floor => "floor",
            Builtin::Ceil => "ceil",
            Builtin::Exp => "exp",
            Builtin::Logb => "logb",
            Builtin::Log10 => "log10",
            Builtin::Log2 => "log2",
            Builtin::Log => "log",
            Builtin::Trunc => "trunc",
            Builtin::Sin => "sin",
            Builtin::Sinh => "sinh",
            Builtin::Asin => "asin",
            Builtin::Asinh => "asinh",
            Builtin::Cos => "cos",
            Builtin::Cosh => "cosh",
            Builtin::Acos => "acos",
            Builtin::Acosh => "acosh",
            Builtin::Tan => "tan",
            Builtin::Tanh => "tanh",
            Builtin::Atan => "atan",
            Builtin::Atanh => "atanh",
            Builtin::Round => "rnd",
            Builtin::Pow => "pow",
            Builtin::Max => "max",
            Builtin::Min => "min",
            Builtin::MaxMagnitude => "maxmg",
            Builtin::MinMagnitude => "minmg",
            Builtin::Rand => "rand",
            Builtin::RandInt => "randint",
            Builtin::BitAnd => "band",
            Builtin::BitOr => "bor",
            Builtin::BitXor => "bxor",
            Builtin::BitNot => "bnot",
            Builtin::ShiftLeft => "shl",
            Builtin::ShiftRight => "shr",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn arity(self) -> usize {
        match self {
            Builtin::Rand => 0,
            Builtin::NthRoot
            | Builtin::Round
            | Builtin::Pow
            | Builtin::Max
            | Builtin::Min
            | Builtin::MaxMagnitude
            | Builtin::MinMagnitude
            | Builtin::RandInt
            | Builtin::BitAnd
            | Builtin::BitOr
            | Builtin::BitXor
            | Builtin::ShiftLeft
            | Builtin::ShiftRight => 2,
            _ => 1,
        }
    }

    /// Applies the function to `args`, given in call-site order.
    ///
    /// The caller guarantees `args.len() == self.arity()`.
    pub fn apply(self, args: &[f64]) -> f64 {
        let x = args.first().copied().unwrap_or(f64::NAN);
        let y = args.get(1).copied().unwrap_or(f64::NAN);

        match self {
            Builtin::Sqrt => x.sqrt(),
            Builtin::Cbrt => x.cbrt(),
            Builtin::NthRoot => numeric::nth_root(x, y),
            Builtin::Abs => x.abs(),
            Builtin::BitDecrement => numeric::bit_decrement(x),
            Builtin::BitIncrement => numeric::bit_increment(x),
            Builtin::Floor => x.floor(),
            Builtin::Ceil => x.ceil(),
            Builtin::Exp => x.exp(),
            Builtin::Logb => numeric::logb(x),
            Builtin::Log10 => x.log10(),
            Builtin::Log2 => x.log2(),
            Builtin::Log => x.ln(),
            Builtin::Trunc => x.trunc(),
            Builtin::Sin => x.sin(),
            Builtin::Sinh => x.sinh(),
            Builtin::Asin => x.asin(),
            Builtin::Asinh => x.asinh(),
            Builtin::Cos => x.cos(),
            Builtin::Cosh => x.cosh(),
            Builtin::Acos => x.acos(),
            Builtin::Acosh => x.acosh(),
            Builtin::Tan => x.tan(),
            Builtin::Tanh => x.tanh(),
            Builtin::Atan => x.atan(),
            Builtin::Atanh => x.atanh(),
            Builtin::Round => numeric::round_digits(x, y),
            Builtin::Pow => x.powf(y),
            Builtin::Max => x.max(y),
            Builtin::Min => x.min(y),
            Builtin::MaxMagnitude => numeric::max_magnitude(x, y),
            Builtin::MinMagnitude => numeric::min_magnitude(x, y),
            Builtin::Rand => numeric::random_unit(),
            Builtin::RandInt => numeric::random_int(x, y),
            Builtin::BitAnd => numeric::bitwise_and(x, y),
            Builtin::BitOr => numeric::bitwise_or(x, y),
            Builtin::BitXor => numeric::bitwise_xor(x, y),
            Builtin::BitNot => numeric::bitwise_not(x),
            Builtin::ShiftLeft => numeric::shift_left(x, y),
            Builtin::ShiftRight => numeric::shift_right(x, y),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = Builtin::ALL.iter().map(|b| b.name()).collect();
        assert_eq!(names.len(), Builtin::ALL.len());
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Builtin::from_name("sqr"), None);
        assert_eq!(Builtin::from_name("SQRT"), None);
    }

    #[test]
    fn test_arity() {
        assert_eq!(Builtin::Rand.arity(), 0);
        assert_eq!(Builtin::Sqrt.arity(), 1);
        assert_eq!(Builtin::Max.arity(), 2);
        assert_eq!(Builtin::NthRoot.arity(), 2);
    }

    #[test]
    fn test_apply_uses_call_site_order() {
        assert_eq!(Builtin::Pow.apply(&[2.0, 10.0]), 1024.0);
        assert_eq!(Builtin::Round.apply(&[3.14159, 2.0]), 3.14);
        assert!((Builtin::NthRoot.apply(&[16.0, 4.0]) - 2.0).abs() < 1e-12);
        assert_eq!(Builtin::ShiftLeft.apply(&[3.0, 2.0]), 12.0);
    }

    #[test]
    fn test_apply_single_argument() {
        assert_eq!(Builtin::Sqrt.apply(&[9.0]), 3.0);
        assert_eq!(Builtin::Abs.apply(&[-4.5]), 4.5);
        assert_eq!(Builtin::Log2.apply(&[8.0]), 3.0);
        assert!(Builtin::Log.apply(&[-1.0]).is_nan());
    }
}
