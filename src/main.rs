use adaptsim::prelude::*;
use nalgebra::{DMatrix, Vector2};

fn main() {
    println!("Adaptive State-Feedback Simulation");
    println!("==================================\n");

    // Mass-spring-damper plant m*q'' + c*q' + k*q = u with a stabilizing
    // gain and the Lyapunov pair for A + B*K.
    let config = SimConfig {
        A: DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]),
        B: DMatrix::from_row_slice(2, 1, &[0.0, 1.0]),
        K: DMatrix::from_row_slice(1, 2, &[-2.0, -2.0]),
        P: DMatrix::from_row_slice(2, 2, &[1.25, 0.25, 0.25, 0.375]),
        m: 1.0,
        c: 2.0,
        k: 3.0,
        x0: Vector2::new(0.0, 5.0),
        gamma_hat0: Vector2::zeros(),
        dt: 1e-4,
        t_final: 50.0,
    };

    println!("Plant:   m = {}, c = {}, k = {}", config.m, config.c, config.k);
    println!("Initial: x = [{}, {}]", config.x0[0], config.x0[1]);
    println!("Horizon: {} s at dt = {} s\n", config.t_final, config.dt);

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let report = match sim.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation aborted: {}", e);
            std::process::exit(1);
        }
    };

    println!("{:>10} {:>14}", "time [s]", "position");
    println!("{:-<10} {:-<14}", "", "");

    let data = sim.trajectory().data();
    let stride = (data.len() / 10).max(1);
    for sample in data.iter().step_by(stride) {
        println!("{:10.2} {:14.6}", sample.time, sample.value);
    }

    let gamma_hat = sim.engine().gamma_hat();
    let gamma = &sim.engine().model().gamma;
    println!();
    println!(
        "Parameter estimate: [{:.4}, {:.4}] (true: [{}, {}])",
        gamma_hat[(0, 0)],
        gamma_hat[(1, 0)],
        gamma[(0, 0)],
        gamma[(1, 0)]
    );

    match sim.trajectory().save("position.csv", "position") {
        Ok(()) => println!("Trajectory saved to 'position.csv'"),
        Err(e) => println!("Could not save trajectory: {}", e),
    }

    println!();
    println!(
        "{} samples, elapsed time => {:.6} s",
        report.samples,
        report.elapsed.as_secs_f64()
    );
}
