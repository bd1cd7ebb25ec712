//! Materialization of classified pairs into output records.
//!
//! The input records are cloned; the copies carry the discordance and
//! orientation tags plus mate information pointing at each other.

use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::alignment::RecordBuf;

use crate::classify::pairing::ClassifiedPair;
use crate::core::alignment::{extract_int_value, AlignmentRecord};
use crate::core::types::{DiscordanceTag, Orientation};

/// Tag holding the [`DiscordanceTag`] code
pub const DISCORDANT_TAG: Tag = Tag::new(b'X', b'C');

/// Tag holding the [`Orientation`] code of a cross-gene alignment
pub const ORIENTATION_TAG: Tag = Tag::new(b'X', b'O');

impl ClassifiedPair<'_> {
    /// Tagged copies of (mate 1, mate 2) with mate information filled in
    pub fn to_records(&self) -> [RecordBuf; 2] {
        let template_length = template_length(self.mate1, self.mate2);
        let (o1, o2) = match self.orientations {
            Some((o1, o2)) => (Some(o1), Some(o2)),
            None => (None, None),
        };

        let r1 = pair_record(self.mate1, self.mate2, self.tag, o1, template_length);
        let r2 = pair_record(self.mate2, self.mate1, self.tag, o2, -template_length);
        [r1, r2]
    }
}

fn pair_record(
    alignment: &AlignmentRecord,
    mate: &AlignmentRecord,
    tag: DiscordanceTag,
    orientation: Option<Orientation>,
    template_length: i32,
) -> RecordBuf {
    let mut record = alignment.record().clone();

    let flags = record.flags_mut();
    flags.insert(Flags::SEGMENTED);
    flags.remove(Flags::MATE_UNMAPPED);
    flags.set(Flags::MATE_REVERSE_COMPLEMENTED, mate.is_reverse());
    flags.set(Flags::PROPERLY_SEGMENTED, tag.is_concordant());

    *record.mate_reference_sequence_id_mut() = mate.record().reference_sequence_id();
    *record.mate_alignment_start_mut() = mate.record().alignment_start();
    *record.template_length_mut() = template_length;

    let data = record.data_mut();
    data.insert(DISCORDANT_TAG, Value::Int32(tag.code()));
    match orientation {
        Some(orientation) => {
            data.insert(ORIENTATION_TAG, Value::Int32(orientation.code()));
        }
        None => {
            data.remove(&ORIENTATION_TAG);
        }
    }

    record
}

/// Signed distance between the 5' ends of the two mates, 0 when they are on
/// different references.
fn template_length(r1: &AlignmentRecord, r2: &AlignmentRecord) -> i32 {
    if r1.tid().is_none() || r1.tid() != r2.tid() {
        return 0;
    }

    let five_prime = |a: &AlignmentRecord| {
        let pos = if a.is_reverse() { a.end() - 1 } else { a.start() };
        i64::try_from(pos).unwrap_or(i64::MAX)
    };
    let first = five_prime(r1);
    let second = five_prime(r2);

    let adjustment = if second >= first { 1 } else { -1 };
    i32::try_from(second - first + adjustment).unwrap_or(0)
}

/// Read back the discordance tag written by [`ClassifiedPair::to_records`]
pub fn discordance_tag(record: &RecordBuf) -> Option<DiscordanceTag> {
    record
        .data()
        .get(&DISCORDANT_TAG)
        .and_then(extract_int_value)
        .and_then(DiscordanceTag::from_code)
}

/// Read back the orientation tag written by [`ClassifiedPair::to_records`]
pub fn orientation_tag(record: &RecordBuf) -> Option<Orientation> {
    match record.data().get(&ORIENTATION_TAG).and_then(extract_int_value) {
        Some(0) => Some(Orientation::FivePrime),
        Some(1) => Some(Orientation::ThreePrime),
        _ => None,
    }
}
