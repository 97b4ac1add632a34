//! Column-indexed parsing of `peptides.txt`-style tab-separated tables
use memchr::{memchr_iter, Memchr};
use std::fs;
use std::io::{self, prelude::*};
use std::path::Path;
use std::str;

/// Generalized wrapper around [`Memchr`] iterator for splitting `&[u8]`
/// slices by a byte.
struct Pitchfork<'a> {
    pos: usize,
    haystack: &'a [u8],
    inner: Memchr<'a>,
}

impl<'a> Pitchfork<'a> {
    pub fn new(needle: u8, haystack: &'a [u8]) -> Self {
        Self {
            pos: 0,
            haystack,
            inner: memchr_iter(needle, haystack),
        }
    }
}

impl<'a> Iterator for Pitchfork<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let end = match self.inner.next() {
            Some(e) => e,
            None => {
                if self.pos < self.haystack.len() {
                    self.haystack.len()
                } else {
                    return None;
                }
            }
        };
        let slice = &self.haystack[self.pos..end];
        self.pos = end + 1;
        Some(slice)
    }
}

/// One peptide row, reduced to the fields the inference pipeline consumes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeptideRecord {
    pub id: u32,
    pub score: f64,
    /// Tags of every experiment with a nonzero evidence count for this row
    pub experiments: Vec<String>,
    /// Candidate isoform labels from the `isoforms(+)` column
    pub isoforms: Vec<String>,
}

/// Row filters applied while loading
#[derive(Copy, Clone, Debug, Default)]
pub struct LoadOptions {
    /// Skip peptides whose `Best MS/MS` field is blank
    pub exclude_nomsms: bool,
    /// Skip peptides flagged in the `Reverse` or `Potential contaminant`
    /// columns
    pub exclude_special: bool,
}

/// A parsed peptides table: the usable records plus the experiment-tag
/// vocabulary taken from the header, in column order
#[derive(Debug, Default)]
pub struct PeptideTable {
    pub records: Vec<PeptideRecord>,
    pub experiments: Vec<String>,
}

const EXPERIMENT_PREFIX: &str = "Experiment ";

struct Header {
    id: usize,
    score: usize,
    isoforms: usize,
    best_msms: Option<usize>,
    reverse: Option<usize>,
    contaminant: Option<usize>,
    /// (column index, experiment tag) pairs
    experiments: Vec<(usize, String)>,
}

fn invalid<T>(msg: &str) -> io::Result<T> {
    Err(io::Error::new(io::ErrorKind::InvalidData, msg.to_string()))
}

impl Header {
    fn parse(line: &[u8], opts: LoadOptions) -> io::Result<Header> {
        let mut id = None;
        let mut score = None;
        let mut isoforms = None;
        let mut best_msms = None;
        let mut reverse = None;
        let mut contaminant = None;
        let mut experiments = Vec::new();

        for (idx, field) in Pitchfork::new(b'\t', line).enumerate() {
            let name = match str::from_utf8(field) {
                Ok(name) => name.trim_end_matches('\r'),
                Err(_) => continue,
            };
            match name {
                "id" => id = Some(idx),
                "Score" => score = Some(idx),
                "isoforms(+)" => isoforms = Some(idx),
                "Best MS/MS" => best_msms = Some(idx),
                "Reverse" => reverse = Some(idx),
                "Potential contaminant" => contaminant = Some(idx),
                _ => {
                    if let Some(tag) = name.strip_prefix(EXPERIMENT_PREFIX) {
                        experiments.push((idx, tag.to_string()));
                    }
                }
            }
        }

        let header = Header {
            id: match id {
                Some(idx) => idx,
                None => return invalid("peptides table has no \"id\" column"),
            },
            score: match score {
                Some(idx) => idx,
                None => return invalid("peptides table has no \"Score\" column"),
            },
            isoforms: match isoforms {
                Some(idx) => idx,
                None => return invalid("peptides table has no \"isoforms(+)\" column"),
            },
            best_msms,
            reverse,
            contaminant,
            experiments,
        };

        if opts.exclude_nomsms && header.best_msms.is_none() {
            return invalid("exclude_nomsms requires a \"Best MS/MS\" column");
        }
        if opts.exclude_special && (header.reverse.is_none() || header.contaminant.is_none()) {
            return invalid(
                "exclude_special requires \"Reverse\" and \"Potential contaminant\" columns",
            );
        }
        Ok(header)
    }
}

fn blank(field: Option<&&[u8]>) -> bool {
    match field {
        Some(f) => f.iter().all(|b| b.is_ascii_whitespace()),
        None => true,
    }
}

#[inline]
fn read_record(line: &[u8], header: &Header, opts: LoadOptions) -> Option<PeptideRecord> {
    let fields = Pitchfork::new(b'\t', line).collect::<Vec<_>>();

    if opts.exclude_nomsms && blank(fields.get(header.best_msms?)) {
        return None;
    }
    if opts.exclude_special
        && (!blank(fields.get(header.reverse?)) || !blank(fields.get(header.contaminant?)))
    {
        return None;
    }

    let isoforms_field = fields.get(header.isoforms)?;
    if blank(Some(isoforms_field)) {
        return None;
    }

    let id = str::from_utf8(fields.get(header.id)?).ok()?.trim();
    let id = id.parse::<u32>().ok()?;
    let score = str::from_utf8(fields.get(header.score)?).ok()?.trim();
    let score = score.parse::<f64>().ok()?;

    let isoforms = str::from_utf8(isoforms_field)
        .ok()?
        .trim()
        .split(';')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect::<Vec<_>>();

    let mut experiments = Vec::new();
    for (idx, tag) in &header.experiments {
        if !blank(fields.get(*idx)) {
            experiments.push(tag.clone());
        }
    }

    Some(PeptideRecord {
        id,
        score,
        experiments,
        isoforms,
    })
}

impl PeptideTable {
    /// Parse a peptides table from an open buffer
    pub fn parse(buffer: &[u8], opts: LoadOptions) -> io::Result<PeptideTable> {
        let mut lines = Pitchfork::new(b'\n', buffer);
        let header_line = match lines.next() {
            Some(line) => line,
            None => return invalid("peptides table is empty"),
        };
        let header = Header::parse(header_line, opts)?;

        let records = lines
            .map(|line| match line.last() {
                Some(b'\r') => &line[..line.len() - 1],
                _ => line,
            })
            .filter(|line| !line.is_empty())
            .filter_map(|line| read_record(line, &header, opts))
            .collect::<Vec<_>>();

        Ok(PeptideTable {
            records,
            experiments: header.experiments.into_iter().map(|(_, tag)| tag).collect(),
        })
    }

    /// Load and parse a peptides table from disk
    pub fn load<P: AsRef<Path>>(path: P, opts: LoadOptions) -> io::Result<PeptideTable> {
        let mut buffer = Vec::new();
        fs::File::open(path)?.read_to_end(&mut buffer)?;
        PeptideTable::parse(&buffer, opts)
    }
}
