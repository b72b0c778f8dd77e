use std::io::{Read, Write};
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ExtrinsicsError, RecordDefect, Result};
use crate::prior::CameraExtrinsicsPrior;
use crate::store::PriorStore;
use crate::tokenizer::{TokenError, TokenReader};

/// Field names in on-disk order: position first, then the row-major rotation.
pub const FIELD_NAMES: [&str; 12] = [
    "px", "py", "pz", "r00", "r01", "r02", "r10", "r11", "r12", "r20", "r21", "r22",
];

/// Serializes an object to a JSON file.
pub fn object_to_json<T: Serialize>(output_path: &str, object: &T) -> Result<()> {
    let j = serde_json::to_string_pretty(object)?;
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(j.as_bytes())?;
    Ok(())
}

/// Deserializes an object from a JSON file.
pub fn object_from_json<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let contents = std::fs::read_to_string(file_path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Reads extrinsics records one at a time.
///
/// The layout is a record count followed by that many records, each an image
/// identifier and twelve numbers (`px py pz r00 r01 r02 r10 r11 r12 r20 r21 r22`),
/// all whitespace separated. Identifiers cannot contain whitespace.
pub struct ExtrinsicsReader<'a> {
    tokens: TokenReader<'a>,
    declared_count: usize,
    produced: usize,
}

impl<'a> ExtrinsicsReader<'a> {
    /// Reads the header.
    pub fn new(text: &'a str) -> Result<ExtrinsicsReader<'a>> {
        let mut tokens = TokenReader::new(text);
        let header = tokens
            .next_token()
            .ok_or_else(|| ExtrinsicsError::MalformedHeader("empty input".to_string()))?;
        let declared_count = header.parse::<usize>().map_err(|_| {
            ExtrinsicsError::MalformedHeader(format!(
                "record count must be a non-negative integer, got {:?}",
                header
            ))
        })?;
        log::info!("extrinsics file declares {} records", declared_count);
        Ok(ExtrinsicsReader {
            tokens,
            declared_count,
            produced: 0,
        })
    }

    pub fn declared_count(&self) -> usize {
        self.declared_count
    }

    /// Records produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Next complete record, or `None` once the declared count is reached or
    /// the input ends cleanly between records.
    pub fn next_record(&mut self) -> Result<Option<(String, CameraExtrinsicsPrior)>> {
        if self.produced >= self.declared_count {
            let last_record_end = self.tokens.consumed();
            let trailing = self.tokens.drain();
            if trailing > 0 {
                log::warn!(
                    "ignoring {} tokens after the {} declared records (token {})",
                    trailing,
                    self.declared_count,
                    last_record_end
                );
            }
            return Ok(None);
        }
        let Some(image_id) = self.tokens.next_token() else {
            log::warn!(
                "extrinsics input ended after {} of {} declared records",
                self.produced,
                self.declared_count
            );
            return Ok(None);
        };

        let mut values = [0.0; 12];
        for (i, &field) in FIELD_NAMES.iter().enumerate() {
            values[i] = self.tokens.next_f64().map_err(|e| {
                let defect = match e {
                    TokenError::End => RecordDefect::UnexpectedEnd { field, found: i },
                    TokenError::NotANumber(token) => RecordDefect::InvalidNumber { field, token },
                };
                ExtrinsicsError::MalformedRecord {
                    index: self.produced,
                    image_id: image_id.to_string(),
                    defect,
                }
            })?;
        }

        let mut prior = CameraExtrinsicsPrior::default();
        for (p, v) in prior.position.iter_mut().zip(&values[..3]) {
            p.set(*v);
        }
        for (p, v) in prior.rotation.iter_mut().zip(&values[3..]) {
            p.set(*v);
        }
        log::trace!(
            "record #{} {} (ends at token {}): {:?}",
            self.produced,
            image_id,
            self.tokens.consumed(),
            values
        );
        self.produced += 1;
        Ok(Some((image_id.to_string(), prior)))
    }
}

/// Result of a full name-keyed parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExtrinsics {
    pub declared_count: usize,
    /// Records in file order.
    pub records: Vec<(String, CameraExtrinsicsPrior)>,
}

impl ParsedExtrinsics {
    /// True when the input ended before the declared count was reached.
    pub fn is_truncated(&self) -> bool {
        self.records.len() < self.declared_count
    }

    pub fn into_store(self) -> PriorStore {
        self.records.into_iter().collect()
    }
}

/// Shortest possible record: a one-character identifier, twelve one-digit
/// numbers and their separators.
const MIN_RECORD_BYTES: usize = 26;

/// Parses a whole text into records.
pub fn parse_extrinsics(text: &str) -> Result<ParsedExtrinsics> {
    let mut reader = ExtrinsicsReader::new(text)?;
    // the header is untrusted, the text length is not
    let capacity = reader.declared_count().min(text.len() / MIN_RECORD_BYTES);
    let mut records = Vec::with_capacity(capacity);
    while let Some(record) = reader.next_record()? {
        records.push(record);
    }
    Ok(ParsedExtrinsics {
        declared_count: reader.declared_count(),
        records,
    })
}

/// Reads a stream to the end and parses it.
pub fn read_extrinsics<R: Read>(mut stream: R) -> Result<ParsedExtrinsics> {
    let mut text = String::new();
    stream.read_to_string(&mut text)?;
    parse_extrinsics(&text)
}

/// Parses an extrinsics file into a [`PriorStore`] for name-keyed lookup.
pub fn read_prior_store<P: AsRef<Path>>(extrinsics_file: P) -> Result<PriorStore> {
    let path = extrinsics_file.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        log::error!("cannot read the extrinsics file from {}", path.display());
        ExtrinsicsError::Io(e)
    })?;
    Ok(read_extrinsics(file)?.into_store())
}

/// Writes complete priors in the text layout [`ExtrinsicsReader`] reads.
///
/// The layout has no way to mark a field absent, so priors missing any field
/// are skipped. Returns the number of records written.
pub fn write_extrinsics<W: Write>(mut writer: W, store: &PriorStore) -> Result<usize> {
    let complete: Vec<_> = store
        .iter()
        .filter(|(image_id, prior)| {
            if !prior.is_complete() {
                log::warn!("skipping partial extrinsics prior for {}", image_id);
            }
            prior.is_complete()
        })
        .collect();
    writeln!(writer, "{}", complete.len())?;
    for (image_id, prior) in &complete {
        let values: Vec<String> = prior
            .position
            .iter()
            .chain(prior.rotation.iter())
            .filter_map(|p| p.value())
            .map(|v| v.to_string())
            .collect();
        writeln!(writer, "{} {}", image_id, values.join(" "))?;
    }
    Ok(complete.len())
}

#[derive(serde::Serialize)]
struct BindReportFile<'a, T: Serialize> {
    timestamp: String,
    extrinsics_file: &'a str,
    report: &'a T,
}

/// Writes a bind or name-merge report as timestamped JSON.
pub fn write_bind_report<T: Serialize>(
    output_path: &str,
    extrinsics_file: &str,
    report: &T,
) -> Result<()> {
    let now =
        time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    let timestamp = now
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    object_to_json(
        output_path,
        &BindReportFile {
            timestamp,
            extrinsics_file,
            report,
        },
    )
}
