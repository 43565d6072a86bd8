use super::criteria::Criteria;
use super::table::{CareerOption, PayoffTable, Score, TableError};
use std::io::{Read, Write};
use std::path::Path;

const NAME_COLUMN: &str = "Career";

#[derive(Debug, thiserror::Error)]
pub enum CsvTableError {
    #[error("failed to access payoff table file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid payoff table CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("payoff table CSV needs a header row: career column followed by criteria")]
    MissingHeader,
    #[error("row {row}: career name is empty")]
    EmptyName { row: usize },
    #[error("row {row}: score '{value}' for '{criterion}' is not a finite number")]
    InvalidScore {
        row: usize,
        criterion: String,
        value: String,
    },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Reads `Career,<label>,...` rows into a table; criterion keys are derived from labels.
///
/// Career names are kept verbatim since they are compared as exact keys. Only headers and
/// score cells are trimmed.
pub fn read_table<R: Read>(reader: R) -> Result<PayoffTable, CsvTableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(CsvTableError::MissingHeader);
    }
    let criteria = Criteria::from_labels(headers.iter().skip(1));

    let mut options = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let row = index + 2;

        let name = record.get(0).unwrap_or_default();
        if name.trim().is_empty() {
            return Err(CsvTableError::EmptyName { row });
        }

        let scores = record
            .iter()
            .skip(1)
            .zip(criteria.iter())
            .map(|(value, criterion)| parse_score(value, row, &criterion.label))
            .collect::<Result<Vec<Score>, _>>()?;

        options.push(CareerOption::new(name, scores));
    }

    Ok(PayoffTable::new(criteria, options)?)
}

pub fn read_table_from_path<P: AsRef<Path>>(path: P) -> Result<PayoffTable, CsvTableError> {
    let file = std::fs::File::open(path)?;
    read_table(file)
}

/// Writes the table in insertion order using the same shape [`read_table`] accepts.
pub fn write_table<W: Write>(table: &PayoffTable, writer: W) -> Result<(), CsvTableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![NAME_COLUMN.to_string()];
    header.extend(table.criteria().iter().map(|criterion| criterion.label.clone()));
    csv_writer.write_record(&header)?;

    for option in table.options() {
        let mut row = vec![option.name.clone()];
        row.extend(option.scores.iter().map(Score::to_string));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn table_to_csv(table: &PayoffTable) -> Result<String, CsvTableError> {
    let mut buffer = Vec::new();
    write_table(table, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
}

fn parse_score(value: &str, row: usize, criterion: &str) -> Result<Score, CsvTableError> {
    value
        .trim()
        .parse::<Score>()
        .ok()
        .filter(|score| score.is_finite())
        .ok_or_else(|| CsvTableError::InvalidScore {
            row,
            criterion: criterion.to_string(),
            value: value.to_string(),
        })
}
