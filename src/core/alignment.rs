use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::alignment::RecordBuf;

use crate::core::types::Mate;

/// One candidate placement of one mate.
///
/// Wraps the decoded BAM record and caches the fields the classifier looks
/// at. Positions are 0-based, `end` is exclusive. The wrapped record is
/// never modified; tagged copies are produced when a pair is written.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    record: RecordBuf,
    mate: Mate,
    tid: Option<usize>,
    start: usize,
    end: usize,
    is_reverse: bool,
    is_unmapped: bool,
    score: i32,
}

impl AlignmentRecord {
    /// Wrap a decoded record belonging to `mate`
    pub fn new(record: RecordBuf, mate: Mate) -> Self {
        let flags = record.flags();
        let tid = record.reference_sequence_id();
        let start = record.alignment_start().map(usize::from);
        let end = record.alignment_end().map(usize::from);

        let is_unmapped = flags.is_unmapped() || tid.is_none() || start.is_none();
        let start = start.map_or(0, |p| p - 1);
        let end = end.unwrap_or(start).max(start + 1);

        let score = record
            .data()
            .get(&Tag::ALIGNMENT_SCORE)
            .and_then(extract_int_value)
            .unwrap_or(0);

        Self {
            mate,
            tid,
            start,
            end,
            is_reverse: flags.is_reverse_complemented(),
            is_unmapped,
            score,
            record,
        }
    }

    /// Build a mapped alignment without a backing BAM record
    #[cfg(test)]
    pub fn mapped(
        mate: Mate,
        tid: usize,
        start: usize,
        end: usize,
        is_reverse: bool,
        score: i32,
    ) -> Self {
        Self {
            record: RecordBuf::default(),
            mate,
            tid: Some(tid),
            start,
            end,
            is_reverse,
            is_unmapped: false,
            score,
        }
    }

    /// Build an unmapped alignment without a backing BAM record
    #[cfg(test)]
    pub fn unmapped(mate: Mate) -> Self {
        Self {
            record: RecordBuf::default(),
            mate,
            tid: None,
            start: 0,
            end: 1,
            is_reverse: false,
            is_unmapped: true,
            score: 0,
        }
    }

    pub fn record(&self) -> &RecordBuf {
        &self.record
    }

    pub fn into_record(self) -> RecordBuf {
        self.record
    }

    pub fn mate(&self) -> Mate {
        self.mate
    }

    /// Reference id, `None` when unmapped
    pub fn tid(&self) -> Option<usize> {
        if self.is_unmapped {
            None
        } else {
            self.tid
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_reverse(&self) -> bool {
        self.is_reverse
    }

    pub fn is_unmapped(&self) -> bool {
        self.is_unmapped
    }

    /// Alignment score (`AS` tag, 0 when absent)
    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Extract an integer from any of the integer tag value types
pub fn extract_int_value(value: &Value) -> Option<i32> {
    match value {
        Value::Int8(i) => Some(i32::from(*i)),
        Value::Int16(i) => Some(i32::from(*i)),
        Value::Int32(i) => Some(*i),
        Value::UInt8(i) => Some(i32::from(*i)),
        Value::UInt16(i) => Some(i32::from(*i)),
        Value::UInt32(i) => i32::try_from(*i).ok(),
        _ => None,
    }
}
