use std::collections::HashMap;
use whisker_rs::{Evaluator, FunctionDef};

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new(
        vec![
            FunctionDef::new("tripleParam", ["x", "y", "z"], "x*y*z"),
            FunctionDef::new(
                "lawOfCosines",
                ["a", "b", "c"],
                "sqrt(a ^ 2 + b ^ 2 - 2 * a * b * cos(c))",
            ),
            FunctionDef::new(
                "zsormula",
                ["x1", "x2", "y1", "y2", "z1", "z2"],
                "((z1 ^ 2) + (z2^2)) * (x1 * y1 + x2 * y2)",
            ),
            FunctionDef::new("fact", ["n"], "n!"),
        ],
        HashMap::from([
            ("half".to_string(), 0.5),
            ("year".to_string(), 2022.0),
            ("first".to_string(), 1.0),
            ("second".to_string(), 2.0),
            ("third".to_string(), 3.0),
            ("a".to_string(), 97.0),
        ]),
    );

    for function in evaluator.context().functions() {
        println!("{function}");
    }

    for expression in [
        "zsormula(1,2,3,4,5,6)",
        "tripleParam(first, second, third) * half",
        "lawOfCosines(3, 4, acos(0)) + a",
        "fact(third) - year",
    ] {
        let (ok, value) = evaluator.try_evaluate(expression);
        if ok {
            println!("{expression} = {value}");
        } else {
            println!("{expression} could not be evaluated");
        }
    }
}
