use std::env;

use parallel_quadrature::{Integrator, IntegratorConfig};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [workers] [total_intervals] [block_size]", program);
    eprintln!("  workers: worker thread count, defaults to 4");
    eprintln!("  total_intervals: sub-intervals of [0,1], defaults to 1000000000");
    eprintln!("  block_size: sub-intervals per work claim, defaults to 3316220");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut builder = IntegratorConfig::builder();
    if let Some(arg) = args.get(1) {
        match arg.parse() {
            Ok(workers) => builder = builder.num_workers(workers),
            Err(_) => {
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }
    if let Some(arg) = args.get(2) {
        match arg.parse() {
            Ok(total) => builder = builder.total_intervals(total),
            Err(_) => {
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }
    if let Some(arg) = args.get(3) {
        match arg.parse() {
            Ok(size) => builder = builder.block_size(size),
            Err(_) => {
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }

    let integrator = Integrator::new(builder.build())?;
    let report = integrator.run()?;

    println!("\nCalculated pi = {:.14}", report.estimate);
    println!("  Expected pi = {:.14}", report.reference);

    Ok(())
}
