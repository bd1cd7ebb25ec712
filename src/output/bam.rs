use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use noodles::bam;
use noodles::sam;
use noodles::sam::alignment::io::Write as _;
use noodles::sam::alignment::RecordBuf;
use tracing::debug;

use super::AlignmentSink;

/// BAM output channel (streaming, unsorted).
///
/// Records are written in the order they are classified; the header is the
/// input file's header so reference ids stay valid.
pub struct BamChannel {
    writer: Box<dyn sam::alignment::io::Write>,
    header: sam::Header,
}

impl BamChannel {
    /// Create a BAM channel at `path` and write `header`
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or the header
    /// cannot be written.
    pub fn create(path: &Path, header: &sam::Header) -> io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = bam::io::Writer::new(BufWriter::new(file));
        writer.write_header(header)?;

        debug!(path = %path.display(), "Opened output channel");

        Ok(Self {
            writer: Box::new(writer),
            header: header.clone(),
        })
    }
}

impl AlignmentSink for BamChannel {
    fn write_records(&mut self, records: &[RecordBuf]) -> io::Result<()> {
        for record in records {
            self.writer.write_alignment_record(&self.header, record)?;
        }
        Ok(())
    }

    fn finish(mut self) -> io::Result<()> {
        self.writer.finish(&self.header)
    }
}
