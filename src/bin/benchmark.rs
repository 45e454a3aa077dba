//! Performance benchmark comparing execution strategies

use std::time::Instant;
use cellular_automata::{Automaton, BoundaryPolicy, Execution, RngSource};

const DISTRIBUTION: [(Option<u8>, f64); 2] = [(Some(0), 70.0), (Some(1), 30.0)];

fn benchmark<const D: usize>(
    shape: [usize; D],
    rule: &str,
    execution: Execution,
    iterations: usize,
) -> cellular_automata::Result<f64> {
    let mut automaton = Automaton::new(shape, 0);
    automaton
        .set_random_source(RngSource::seeded(7))
        .set_out_of_bound_value(BoundaryPolicy::Wrap)
        .set_execution(execution)
        .fill_with_distribution(&DISTRIBUTION)
        .set_rule(rule)?;

    let start = Instant::now();
    automaton.iterate(iterations)?;
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

/// One row: ms/gen per strategy, then speedup and throughput of the fastest
fn run_row<const D: usize>(
    label: String,
    shape: [usize; D],
    rule: &str,
    iterations: usize,
) -> cellular_automata::Result<()> {
    let cells: usize = shape.iter().product();
    let timings = Execution::all()
        .into_iter()
        .map(|execution| benchmark(shape, rule, execution, iterations))
        .collect::<cellular_automata::Result<Vec<f64>>>()?;

    let baseline = timings[0];
    let fastest = timings.iter().copied().fold(f64::INFINITY, f64::min);

    print!("{:>14}", label);
    for ms in &timings {
        print!(" {:>12.2}", ms);
    }
    println!(
        " {:>9.1}x {:>10.1}",
        baseline / fastest,
        (cells as f64) / (fastest / 1000.0) / 1_000_000.0
    );
    Ok(())
}

fn main() -> cellular_automata::Result<()> {
    println!("=== Cellular Automaton Sweep Benchmark ===\n");

    for execution in Execution::all() {
        println!("{:>10}: {}", execution.name(), execution.description());
    }
    println!();

    let iterations = 10;

    print!("{:>14}", "Shape");
    for execution in Execution::all() {
        print!(" {:>12}", format!("{} ms", execution.name()));
    }
    println!(" {:>10} {:>10}", "Speedup", "Mcells/s");
    println!("{:-<64}", "");

    println!("B3/S23, Moore r1");
    for size in [100, 500, 1000, 2000] {
        run_row(format!("{}x{}", size, size), [size, size], "B3/S23", iterations)?;
    }

    println!("\nS45/B5, 3D Moore r1");
    for size in [32, 64, 128] {
        run_row(format!("{}^3", size), [size, size, size], "S45/B5", iterations)?;
    }

    println!("\nW110, 1D");
    for size in [100_000, 1_000_000] {
        run_row(format!("{}", size), [size], "W110", iterations)?;
    }

    Ok(())
}
