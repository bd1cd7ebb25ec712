use std::fs::File;
use std::io::Read;
use std::path::Path;

use noodles::bam;
use noodles::sam;
use noodles::sam::alignment::RecordBuf;

use crate::core::alignment::AlignmentRecord;
use crate::core::fragment::Fragment;
use crate::core::types::Mate;
use crate::parsing::ParseError;

/// Reads a BAM file as a stream of fragments.
///
/// The input must be grouped by query name (as written by the aligner, or
/// sorted with `samtools sort -n`). Consecutive records sharing a query
/// name form one [`Fragment`]; each record is filed under its mate by the
/// first/last segment flags, keeping input order.
pub struct FragmentReader<R> {
    reader: bam::io::Reader<R>,
    header: sam::Header,
    pending: Option<RecordBuf>,
}

/// Open a BAM file and read its header
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened or the header
/// cannot be read.
pub fn open(path: &Path) -> Result<FragmentReader<impl Read>, ParseError> {
    let mut reader = File::open(path).map(bam::io::Reader::new)?;
    let header = reader.read_header()?;
    Ok(FragmentReader::new(reader, header))
}

impl<R: Read> FragmentReader<R> {
    /// Wrap a BAM reader whose header has already been read
    pub fn new(reader: bam::io::Reader<R>, header: sam::Header) -> Self {
        Self {
            reader,
            header,
            pending: None,
        }
    }

    pub fn header(&self) -> &sam::Header {
        &self.header
    }

    fn read_record(&mut self) -> Result<Option<RecordBuf>, ParseError> {
        if let Some(record) = self.pending.take() {
            return Ok(Some(record));
        }
        let mut record = RecordBuf::default();
        match self.reader.read_record_buf(&self.header, &mut record)? {
            0 => Ok(None),
            _ => Ok(Some(record)),
        }
    }

    /// Read the next fragment, or `None` at end of input
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` on read failures, `ParseError::InvalidFormat`
    /// for a record without a name, or `ParseError::UnpairedRecord` for a
    /// record that is neither the first nor the last segment.
    pub fn read_fragment(&mut self) -> Result<Option<Fragment>, ParseError> {
        let Some(first) = self.read_record()? else {
            return Ok(None);
        };

        let name = record_name(&first)?;
        let mut fragment = Fragment::new(name.clone());
        let mate = mate_from_flags(&first, &name)?;
        fragment.push(AlignmentRecord::new(first, mate));

        while let Some(record) = self.read_record()? {
            if record_name(&record)? != name {
                self.pending = Some(record);
                break;
            }
            let mate = mate_from_flags(&record, &name)?;
            fragment.push(AlignmentRecord::new(record, mate));
        }

        Ok(Some(fragment))
    }
}

impl<R: Read> Iterator for FragmentReader<R> {
    type Item = Result<Fragment, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_fragment().transpose()
    }
}

fn record_name(record: &RecordBuf) -> Result<String, ParseError> {
    record
        .name()
        .map(ToString::to_string)
        .ok_or_else(|| ParseError::InvalidFormat("BAM record without a query name".to_string()))
}

fn mate_from_flags(record: &RecordBuf, name: &str) -> Result<Mate, ParseError> {
    let flags = record.flags();
    if flags.is_first_segment() {
        Ok(Mate::One)
    } else if flags.is_last_segment() {
        Ok(Mate::Two)
    } else {
        Err(ParseError::UnpairedRecord(name.to_string()))
    }
}
