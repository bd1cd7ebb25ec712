//! Shared fixtures: a small annotation and BAM input built with noodles.

#![allow(dead_code)]

use std::fs::File;
use std::io::BufWriter;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use noodles::bam;
use noodles::core::Position;
use noodles::sam;
use noodles::sam::alignment::io::Write as _;
use noodles::sam::alignment::record::cigar::op::{Kind, Op};
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::alignment::record_buf::{Cigar, Data, QualityScores, Sequence};
use noodles::sam::alignment::RecordBuf;
use noodles::sam::header::record::value::map::ReferenceSequence;
use noodles::sam::header::record::value::Map;

pub const READ_LENGTH: usize = 50;

/// TX1/TX2 are isoforms of one gene on chr1, TX3 and TX4 are other genes.
pub const TRANSCRIPTS: &str = "name\tcluster_id\tchrom\tstrand\texon_starts\texon_ends
TX1\t1\tchr1\t+\t1000\t3000
TX2\t1\tchr1\t+\t1000,2500\t2000,3000
TX3\t2\tchr2\t+\t5000\t7000
TX4\t3\tchr3\t-\t100\t2100
";

pub const REFERENCES: [(&str, usize); 4] =
    [("TX1", 2000), ("TX2", 1500), ("TX3", 2000), ("TX4", 2000)];

pub fn header() -> sam::Header {
    let mut builder = sam::Header::builder();
    for (name, length) in REFERENCES {
        builder = builder.add_reference_sequence(
            name,
            Map::<ReferenceSequence>::new(NonZeroUsize::try_from(length).unwrap()),
        );
    }
    builder.build()
}

/// A mapped record; `start` is 0-based
pub fn mapped(name: &str, mate: u8, tid: usize, start: usize, reverse: bool, score: i32) -> RecordBuf {
    let mut flags = segment_flags(mate);
    if reverse {
        flags |= Flags::REVERSE_COMPLEMENTED;
    }
    let data = [(Tag::ALIGNMENT_SCORE, Value::Int32(score))]
        .into_iter()
        .collect::<Data>();

    RecordBuf::builder()
        .set_name(name)
        .set_flags(flags)
        .set_reference_sequence_id(tid)
        .set_alignment_start(Position::try_from(start + 1).unwrap())
        .set_cigar([Op::new(Kind::Match, READ_LENGTH)].into_iter().collect::<Cigar>())
        .set_sequence(Sequence::from(vec![b'A'; READ_LENGTH]))
        .set_quality_scores(QualityScores::from(vec![30; READ_LENGTH]))
        .set_data(data)
        .build()
}

pub fn unmapped(name: &str, mate: u8) -> RecordBuf {
    RecordBuf::builder()
        .set_name(name)
        .set_flags(segment_flags(mate) | Flags::UNMAPPED)
        .set_sequence(Sequence::from(vec![b'A'; READ_LENGTH]))
        .set_quality_scores(QualityScores::from(vec![30; READ_LENGTH]))
        .build()
}

fn segment_flags(mate: u8) -> Flags {
    if mate == 1 {
        Flags::SEGMENTED | Flags::FIRST_SEGMENT
    } else {
        Flags::SEGMENTED | Flags::LAST_SEGMENT
    }
}

/// One fragment of each routing outcome, in name-grouped order
pub fn scenario_records() -> Vec<RecordBuf> {
    vec![
        // both mates on TX1 and its isoform TX2: one locus each
        mapped("isoforms", 1, 0, 100, false, 50),
        mapped("isoforms", 1, 1, 100, false, 50),
        mapped("isoforms", 2, 0, 300, true, 50),
        mapped("isoforms", 2, 1, 300, true, 50),
        // TX1 and TX3 are different genes
        mapped("chimera", 1, 0, 100, false, 48),
        mapped("chimera", 2, 2, 300, true, 50),
        // mate 2 did not align
        mapped("lonely", 1, 0, 100, false, 50),
        unmapped("lonely", 2),
        // mate 1 on two unrelated loci
        mapped("repeat", 1, 0, 500, false, 50),
        mapped("repeat", 1, 3, 500, false, 50),
        mapped("repeat", 2, 0, 700, true, 50),
        // both forward on different genes: no 5'/3' combination
        mapped("stray", 1, 0, 100, false, 50),
        mapped("stray", 2, 2, 300, false, 50),
    ]
}

pub fn write_bam(path: &Path, header: &sam::Header, records: &[RecordBuf]) {
    let file = File::create(path).unwrap();
    let mut writer = bam::io::Writer::new(BufWriter::new(file));
    writer.write_header(header).unwrap();
    for record in records {
        writer.write_alignment_record(header, record).unwrap();
    }
    writer.finish(header).unwrap();
}

pub fn read_bam(path: &Path) -> Vec<RecordBuf> {
    let mut reader = File::open(path).map(bam::io::Reader::new).unwrap();
    let header = reader.read_header().unwrap();

    let mut records = Vec::new();
    let mut record = RecordBuf::default();
    while reader.read_record_buf(&header, &mut record).unwrap() != 0 {
        records.push(record.clone());
    }
    records
}

pub fn record_name(record: &RecordBuf) -> String {
    record.name().map(ToString::to_string).unwrap_or_default()
}

/// Input files plus the four output paths inside a temporary directory
pub struct Workspace {
    pub dir: tempfile::TempDir,
    pub transcripts: PathBuf,
    pub input: PathBuf,
}

impl Workspace {
    pub fn new(records: &[RecordBuf]) -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        let transcripts = dir.path().join("transcripts.tsv");
        std::fs::write(&transcripts, TRANSCRIPTS).unwrap();
        let input = dir.path().join("input.bam");
        write_bam(&input, &header(), records);
        Self {
            dir,
            transcripts,
            input,
        }
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{name}.bam"))
    }

    pub fn outputs(&self) -> [PathBuf; 4] {
        ["paired", "discordant", "unpaired", "multimap"].map(|name| self.output(name))
    }
}
