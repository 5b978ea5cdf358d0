mod svg;

pub mod output;

use crate::error::Result;

/// A sink for rendered markup.
pub trait OutputStream {
    fn write(&mut self, data: &str) -> Result<()>;
}

impl OutputStream for String {
    fn write(&mut self, data: &str) -> Result<()> {
        self.push_str(data);
        Ok(())
    }
}

pub trait Render {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream;
}
