use monkey_eval::{repl, Config};
use std::io;
use std::process;

fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init();
    if let Err(err) = result {
        eprintln!("monkey: could not enable tracing: {}", err);
    }
}

fn main() {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("monkey: {}", err);
            process::exit(2);
        }
    };

    if !config.quiet {
        println!("Hello! This is the Monkey programming language!");
        println!("Feel free to type in commands");
    }

    let stdin = io::stdin();
    if let Err(err) = repl::start(stdin.lock(), io::stdout(), &config) {
        eprintln!("monkey: {}", err);
        process::exit(1);
    }
}
