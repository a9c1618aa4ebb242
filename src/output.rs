use std::io::{self, ErrorKind, Write};

/// Write each line followed by a newline.
pub fn write_lines<W, I, S>(writer: &mut W, lines: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Print lines to stdout. A reader closing the pipe early (e.g. `| head`)
/// ends the output quietly instead of failing.
pub fn print_lines<I, S>(lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdout = io::stdout();
    let mut handle = io::BufWriter::new(stdout.lock());
    ignore_broken_pipe(write_lines(&mut handle, lines))
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
