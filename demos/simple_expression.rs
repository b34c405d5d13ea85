use std::collections::HashMap;
use whisker_rs::Evaluator;

fn main() {
    pretty_env_logger::init();

    let constants = HashMap::from([
        ("price".to_string(), 120.0),
        ("volume".to_string(), 3000.0),
    ]);
    let evaluator = Evaluator::new(Vec::new(), constants);

    let expression = "price * 2 + sqrt(volume) / (1 + 1";

    match evaluator.evaluate_detailed(expression) {
        Ok(evaluation) => {
            println!("Result: {}", evaluation.value);
            for diagnostic in &evaluation.diagnostics {
                println!("{diagnostic}");
            }
        }
        Err(err) => println!("Error: {err}"),
    }
}
