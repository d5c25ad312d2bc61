use std::{env::args, fs, process::exit};

use golview::{patterns, Pos, Sim, View};

fn main() {
    env_logger::init();

    let seed = match args().nth(1) {
        Some(arg) => load_seed(&arg),
        None => patterns::default_pattern().positions(),
    };
    log::info!("seeding {} live cells", seed.len());

    let simulation = Sim::spawn(seed);
    let view = View::spawn(simulation.handle());

    view.join();
    simulation.join();
}

/// resolves the argument as a built-in pattern name first, then as a path
/// to a plaintext pattern file.
fn load_seed(arg: &str) -> Vec<Pos> {
    if let Some(pattern) = patterns::by_name(arg) {
        return pattern.positions();
    }

    match fs::read_to_string(arg) {
        Ok(content) => patterns::parse_plaintext(&content),
        Err(err) => {
            eprintln!("[error] no pattern or readable file named {arg:?}: {err}");
            eprintln!("[error] built-in patterns: {}", patterns::names().join(", "));
            exit(1);
        }
    }
}
