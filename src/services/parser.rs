// src/services/parser.rs

//! Report text parser.
//!
//! The report is a title line followed by comma-separated station rows:
//!
//! ```text
//! 24hr Accumulated Precipitation ending around 7AM on 2024-01-14 12:00:00. Generated ...
//! 12N      , NJ , Andover AS , 41.01 , -74.74 ,     0.03
//! 8W2      , VA , New Market , 38.66 , -78.71 ,     0.00
//! ```
//!
//! Data rows are picked out by shape (six comma separated groups), never by
//! position, so prose lines may appear anywhere in the text.

use csv::{ReaderBuilder, Terminator, Trim};
use regex::Regex;
use tracing::debug;

use crate::error::ParseError;
use crate::models::{ReportDate, StationRecord};

/// Column names of the synthetic header prepended to the data rows.
pub const COLUMNS: [&str; 6] = ["stationId", "state", "location", "lat", "lng", "precip"];

const DATE_PATTERN: &str = r"\d{4}-\d{2}-\d{2}";
const DATA_LINE_PATTERN: &str = r"^.+,.+,.+,.+,.+,.+$";

/// Parser for the daily report text.
pub struct ReportParser {
    date_pattern: Regex,
    data_line_pattern: Regex,
}

impl ReportParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            date_pattern: Regex::new(DATE_PATTERN)?,
            data_line_pattern: Regex::new(DATA_LINE_PATTERN)?,
        })
    }

    /// Find the report date: the first `YYYY-MM-DD` substring anywhere in the text.
    pub fn extract_date(&self, text: &str) -> Result<ReportDate, ParseError> {
        let found = self.date_pattern.find(text).ok_or(ParseError::NoDate)?;
        found.as_str().parse()
    }

    /// Parse every data row of the report into a station record.
    ///
    /// Fails when no line has the data row shape, or when a row has the
    /// wrong field count or a non-numeric coordinate or reading. A report
    /// whose only data-shaped lines are column headers yields an empty table.
    pub fn parse_table(&self, text: &str) -> Result<Vec<StationRecord>, ParseError> {
        let rows = self.station_lines(text)?;
        let document = assemble(rows.iter().map(|(_, line)| *line));

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .quoting(false)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(document.as_bytes());

        // One record per retained line; a lone `\r` must not split a row.
        let mut records = reader.deserialize::<StationRecord>();
        let mut stations = Vec::with_capacity(rows.len());
        for (line, _) in &rows {
            let station = records
                .next()
                .ok_or_else(|| ParseError::row(*line, "row produced no record"))?
                .map_err(|e| ParseError::row(*line, e))?;
            check_finite(*line, &station)?;
            stations.push(station);
        }
        if records.next().is_some() {
            let last = rows.last().map_or(0, |(line, _)| *line);
            return Err(ParseError::row(last, "more records than data lines"));
        }

        debug!("Parsed {} station records", stations.len());
        Ok(stations)
    }

    /// Reassemble the report as the synthetic header followed by its station rows.
    ///
    /// Parsing the returned text gives the same table as parsing `text`.
    pub fn filter_report(&self, text: &str) -> Result<String, ParseError> {
        let rows = self.station_lines(text)?;
        Ok(assemble(rows.iter().map(|(_, line)| *line)))
    }

    /// Data-shaped lines with their 1-based line numbers, header rows removed.
    fn station_lines<'a>(&self, text: &'a str) -> Result<Vec<(usize, &'a str)>, ParseError> {
        let candidates: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| self.data_line_pattern.is_match(line))
            .map(|(index, line)| (index + 1, line))
            .collect();

        if candidates.is_empty() {
            return Err(ParseError::NoDataLines);
        }

        Ok(candidates
            .into_iter()
            .filter(|(_, line)| !is_header_row(line))
            .collect())
    }
}

fn assemble<'a>(rows: impl Iterator<Item = &'a str>) -> String {
    let mut document = COLUMNS.join(",");
    for row in rows {
        document.push('\n');
        document.push_str(row);
    }
    document
}

fn is_header_row(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    fields.len() == COLUMNS.len()
        && fields
            .iter()
            .zip(COLUMNS)
            .all(|(field, column)| field.eq_ignore_ascii_case(column))
}

fn check_finite(line: usize, station: &StationRecord) -> Result<(), ParseError> {
    for (name, value) in [
        ("lat", station.lat),
        ("lng", station.lng),
        ("precip", station.precip_inches),
    ] {
        if !value.is_finite() {
            return Err(ParseError::row(line, format!("{name} is not a finite number")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "24hr Accumulated Precipitation ending around 7AM on 2024-01-14 12:00:00. Generated Sun Jan 14 12:42:50 2024
12N      , NJ , Andover AS , 41.01 , -74.74 ,     0.03
8W2      , VA , New Market , 38.66 , -78.71 ,     0.00
AFRV2    , VA , Alexandria , 38.84 , -77.09 ,     0.01";

    fn parser() -> ReportParser {
        ReportParser::new().unwrap()
    }

    #[test]
    fn test_extract_date_from_title() {
        let date = parser().extract_date(SAMPLE).unwrap();
        assert_eq!(date.to_string(), "2024-01-14");
    }

    #[test]
    fn test_extract_date_not_on_first_line() {
        let text = "Daily precipitation\nno date here\nvalid through 2023-12-31 morning";
        assert_eq!(
            parser().extract_date(text).unwrap().to_string(),
            "2023-12-31"
        );
    }

    #[test]
    fn test_extract_date_takes_first_match() {
        let text = "from 2024-01-13 to 2024-01-14";
        assert_eq!(
            parser().extract_date(text).unwrap().to_string(),
            "2024-01-13"
        );
    }

    #[test]
    fn test_extract_date_impossible_date_before_real_one() {
        // Only the first date-shaped token is considered
        let text = "bulletin 2024-13-45\nending around 7AM on 2024-01-14 12:00:00";
        assert_eq!(
            parser().extract_date(text),
            Err(ParseError::InvalidDate("2024-13-45".to_string()))
        );
    }

    #[test]
    fn test_extract_date_missing() {
        let text = "Generated Sun Jan 14 12:42:50 2024\n12N , NJ , A , 1 , 2 , 0.0";
        assert_eq!(parser().extract_date(text), Err(ParseError::NoDate));
    }

    #[test]
    fn test_extract_date_rejects_impossible_date() {
        assert_eq!(
            parser().extract_date("ending on 2024-13-45"),
            Err(ParseError::InvalidDate("2024-13-45".to_string()))
        );
    }

    #[test]
    fn test_parse_table_trims_fields() {
        let stations = parser().parse_table(SAMPLE).unwrap();
        assert_eq!(stations.len(), 3);

        let first = &stations[0];
        assert_eq!(first.station_id, "12N");
        assert_eq!(first.state, "NJ");
        assert_eq!(first.location, "Andover AS");
        assert_eq!(first.lat, 41.01);
        assert_eq!(first.lng, -74.74);
        assert_eq!(first.precip_inches, 0.03);
    }

    #[test]
    fn test_parse_table_ignores_prose_anywhere() {
        let text = "trailing notes first\n\
                    ABE , PA , Allentown , 40.65 , -75.43 , 0.00\n\
                    Generated Sun Jan 14 12:42:50 2024\n\
                    AOO , PA , Altoona AP , 40.3 , -78.32 , 0.02\n\
                    end of report";
        let stations = parser().parse_table(text).unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.station_id.as_str()).collect();
        assert_eq!(ids, ["ABE", "AOO"]);
    }

    #[test]
    fn test_parse_table_handles_crlf() {
        let text = "title 2024-01-14\r\nABE , PA , Allentown , 40.65 , -75.43 , 0.00\r\n";
        let stations = parser().parse_table(text).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].precip_inches, 0.0);
    }

    #[test]
    fn test_parse_table_without_data_lines() {
        let text = "24hr Accumulated Precipitation ending on 2024-01-14\nNo reports, try later";
        assert_eq!(parser().parse_table(text), Err(ParseError::NoDataLines));
    }

    #[test]
    fn test_parse_table_header_only_is_empty() {
        let text = "Report for 2024-01-14\nstationId , state , location , lat , lng , precip";
        assert_eq!(parser().parse_table(text), Ok(Vec::new()));
    }

    #[test]
    fn test_parse_table_rejects_non_numeric_coordinate() {
        let text = "title\nABE , PA , Allentown , north , -75.43 , 0.00";
        match parser().parse_table(text) {
            Err(ParseError::Row { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_table_rejects_missing_reading() {
        let text = "ABE , PA , Allentown , 40.65 , -75.43 , M\nAOO , PA , Altoona , 40.3 , -78.32 , 0.02";
        assert!(matches!(
            parser().parse_table(text),
            Err(ParseError::Row { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_table_rejects_extra_fields() {
        let text = "ABE , PA , Allentown , 40.65 , -75.43 , 0.00 , extra";
        assert!(matches!(
            parser().parse_table(text),
            Err(ParseError::Row { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_table_lone_carriage_return_does_not_drop_rows() {
        let text = "AAA , PA , One , 40.0 , -75.0 , 0.10\rBBB , PA , Two , 41.0 , -76.0 , 0.20";
        assert!(matches!(
            parser().parse_table(text),
            Err(ParseError::Row { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_table_keeps_rows_around_carriage_return_line() {
        let text = "AAA , PA , One , 40.0 , -75.0 , 0.10\n\
                    BBB , PA , Two , 41.0 , -76.0 , 0.20\r\n\
                    CCC , PA , Three , 42.0 , -77.0 , 0.30";
        let stations = parser().parse_table(text).unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.station_id.as_str()).collect();
        assert_eq!(ids, ["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn test_parse_table_rejects_non_finite_values() {
        let text = "ABE , PA , Allentown , NaN , -75.43 , 0.00";
        assert!(matches!(
            parser().parse_table(text),
            Err(ParseError::Row { line: 1, .. })
        ));
    }

    #[test]
    fn test_filter_report_reparses_identically() {
        let parser = parser();
        let first = parser.parse_table(SAMPLE).unwrap();
        let filtered = parser.filter_report(SAMPLE).unwrap();

        assert!(filtered.starts_with("stationId,state,location,lat,lng,precip\n"));
        assert_eq!(filtered.lines().count(), 4);
        assert_eq!(parser.parse_table(&filtered).unwrap(), first);
        assert_eq!(parser.filter_report(&filtered).unwrap(), filtered);
    }
}
