use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Result;
use crate::render::OutputStream;

const FILE_NAME: &str = "index.html";

/// Writes the rendered page to `index.html` in the given directory.
pub struct OutputFile {
    path: PathBuf,
    file: BufWriter<File>,
}

impl OutputFile {
    pub fn new(dir: &Path) -> Result<OutputFile> {
        let path = dir.join(FILE_NAME);
        let file = BufWriter::new(File::create(&path)?);

        Ok(Self { path, file })
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.file.flush()?;
        Ok(self.path)
    }
}

impl OutputStream for OutputFile {
    fn write(&mut self, data: &str) -> Result<()> {
        self.file.write_all(data.as_bytes())?;
        Ok(())
    }
}
