use std::collections::HashMap;
use whisker_rs::Evaluator;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new(
        Vec::new(),
        HashMap::from([("price".to_string(), 120.0), ("volume".to_string(), 3000.0)]),
    );

    let expressions = [
        "price * volume",
        "max(price, 100) - min(volume, 5000)",
        "rnd(price / 7, 2)",
        "price + missing",
        "5!",
    ];

    let results = evaluator.evaluate_batch(&expressions);
    for (expression, result) in expressions.iter().zip(results) {
        match result {
            Ok(value) => println!("{expression} = {value}"),
            Err(err) => println!("{expression}: {err}"),
        }
    }
}
