use crate::config::Config;
use crate::interpreter::Interpreter;
use custom_error::custom_error;
use std::io::{BufRead, Write};
use tracing::{debug, trace};

custom_error! {
    pub ReplError

    Io{source: std::io::Error} = "i/o error: {source}",
}

/// Reads lines from `input` until end of input, printing each result (or the
/// parse errors) to `output`.
pub fn start<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    config: &Config,
) -> Result<(), ReplError> {
    let mut interpreter = Interpreter::new(config);

    loop {
        write!(output, "{}", config.prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(());
        }
        trace!(line = line.trim_end(), "read line");

        match interpreter.run(&line) {
            Err(errors) => {
                for err in errors.iter() {
                    writeln!(output, "\t{}", err)?;
                }
            }
            Ok(Some(result)) => writeln!(output, "{}", result.inspect())?,
            Ok(None) => {}
        }
    }
}
