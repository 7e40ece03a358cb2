use std::io::{self, Write};

/// Optional extra sink every console line is copied into.
pub type Tee<'a> = Option<&'a mut dyn Write>;

pub fn println(message: &str, writer: &mut Tee<'_>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::warn!("failed to write to stdout: {e}");
    }
    tee(message, writer)
}

pub fn eprintln(message: &str, writer: &mut Tee<'_>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stderr(), "{message}") {
        tracing::warn!("failed to write to stderr: {e}");
    }
    tee(message, writer)
}

fn tee(message: &str, writer: &mut Tee<'_>) -> io::Result<()> {
    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }
    Ok(())
}
