use crate::fmt::g;
use crate::grid::*;
use crate::parameters::*;
use std::io::prelude::*;
use std::path::Path;

/// Receives the parameters once, then one call per snapshot.
pub trait SnapshotSink {
    fn begin(&mut self, params: &Parameters) -> std::io::Result<()>;

    fn snapshot(
        &mut self,
        time: f64,
        grid: &Grid,
        field: &[f64],
    ) -> std::io::Result<()>;

    fn finish(&mut self) -> std::io::Result<()>;
}

/// Plain text output.
///
/// Twelve `#` lines echo the inputs and derived values, so loaders that
/// skip comment lines read the data directly. Every snapshot is a blank
/// line, a `# t = <time>` line and `<x> <rho>` per grid point.
pub struct TextWriter<W: Write> {
    output: W,
}

impl TextWriter<std::io::BufWriter<std::fs::File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(TextWriter::new(std::io::BufWriter::new(file)))
    }
}

impl<W: Write> TextWriter<W> {
    pub fn new(output: W) -> Self {
        TextWriter { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

pub fn write_preamble<W: Write>(
    output: &mut W,
    params: &Parameters,
) -> std::io::Result<()> {
    let input = &params.input;
    writeln!(output, "#c        {}", g(input.c))?;
    writeln!(output, "#tau      {}", g(input.tau))?;
    writeln!(output, "#x1       {}", g(input.x1))?;
    writeln!(output, "#x2       {}", g(input.x2))?;
    writeln!(output, "#runtime  {}", g(input.runtime))?;
    writeln!(output, "#dx       {}", g(input.dx))?;
    writeln!(output, "#outtime  {}", g(input.outtime))?;
    writeln!(output, "#filename {}", input.outfilename.display())?;
    writeln!(output, "#ngrid (derived) {}", params.ngrid)?;
    writeln!(output, "#dt    (derived) {}", g(params.dt))?;
    writeln!(output, "#nsteps(derived) {}", params.nsteps)?;
    writeln!(output, "#nper  (derived) {}", params.nper)?;
    Ok(())
}

impl<W: Write> SnapshotSink for TextWriter<W> {
    fn begin(&mut self, params: &Parameters) -> std::io::Result<()> {
        write_preamble(&mut self.output, params)
    }

    fn snapshot(
        &mut self,
        time: f64,
        grid: &Grid,
        field: &[f64],
    ) -> std::io::Result<()> {
        profiling::scope!("output::snapshot");
        debug_assert_eq!(grid.len(), field.len());
        writeln!(self.output)?;
        writeln!(self.output, "# t = {}", g(time))?;
        for (&x, &rho) in grid.coords().iter().zip(field) {
            writeln!(self.output, "{} {}", g(x), g(rho))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.output.flush()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn params() -> Parameters {
        "1 1000 0 10 5 0.1 1 out.txt"
            .parse::<InputParameters>()
            .unwrap()
            .derive()
    }

    #[test]
    fn preamble_test() {
        let mut out = Vec::new();
        write_preamble(&mut out, &params()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = "\
#c        1
#tau      1000
#x1       0
#x2       10
#runtime  5
#dx       0.1
#outtime  1
#filename out.txt
#ngrid (derived) 100
#dt    (derived) 0.05
#nsteps(derived) 100
#nper  (derived) 20
";
        assert_eq!(text, expected);
    }

    #[test]
    fn snapshot_block_test() {
        let grid = Grid::new(0.0, 1.0, 3);
        let mut writer = TextWriter::new(Vec::new());
        writer.snapshot(0.25, &grid, &[0.0, 0.125, 0.0]).unwrap();
        writer.finish().unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "\n# t = 0.25\n0 0\n0.5 0.125\n1 0\n");
    }

    #[test]
    fn create_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.dat");
        let mut writer = TextWriter::create(&path).unwrap();
        writer.begin(&params()).unwrap();
        writer.finish().unwrap();
        drop(writer);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 12);
        assert!(text.lines().all(|l| l.starts_with('#')));
    }

    #[test]
    fn create_in_missing_dir_fails_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("wave.dat");
        assert!(TextWriter::create(&path).is_err());
    }
}
