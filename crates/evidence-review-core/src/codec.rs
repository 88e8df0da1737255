//! CSV reading and writing for the record sequence.
//!
//! Parsing is header-driven: the first row names the columns, empty lines are
//! skipped, and short rows simply lack the trailing columns. Rows whose
//! fields are all blank are kept so that saving never drops them. A row with more fields than the header is malformed. Writing
//! always emits the header followed by every record, with fields in header
//! order and quoted only where the CSV rules require it.

use crate::ParseError;
use crate::record::{Record, RecordSet};

/// Parse CSV text into a [`RecordSet`].
pub fn parse_records(text: &str) -> Result<RecordSet, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() > headers.len() {
            return Err(ParseError::ExtraFields {
                line: row.position().map(|p| p.line()).unwrap_or(0),
                expected: headers.len(),
                found: row.len(),
            });
        }
        records.push(Record::from_pairs(
            headers.iter().cloned().zip(row.iter().map(str::to_string)),
        ));
    }

    Ok(RecordSet::new(headers, records))
}

/// Serialize the whole sequence, header included.
pub fn to_csv(set: &RecordSet) -> Result<String, ParseError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    if !set.headers.is_empty() {
        writer.write_record(&set.headers)?;
        for record in &set.records {
            writer.write_record(set.headers.iter().map(|h| record.get(h)))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ParseError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ParseError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FlagField, columns};

    const SAMPLE: &str = "\
Nombre_a_validar,Nombre_encontrado,Justificacion,Link_imagen,Nombre_ok,Periodo_ok,Tarea_ok
Ana Pérez,Ana Perez,\"Firma visible, fecha 2024\",/data/ev/ana.jpg,1,0,1

Luis Gómez,,\"Dijo \"\"hola\"\"\",,0,0,0
";

    #[test]
    fn parses_header_and_skips_blank_lines() {
        let set = parse_records(SAMPLE).unwrap();
        assert_eq!(set.headers.len(), 7);
        assert_eq!(set.len(), 2);
        assert_eq!(set.records[0].get(columns::NOMBRE_A_VALIDAR), "Ana Pérez");
        assert_eq!(
            set.records[0].get(columns::JUSTIFICACION),
            "Firma visible, fecha 2024"
        );
        assert_eq!(set.records[1].get(columns::JUSTIFICACION), "Dijo \"hola\"");
        assert!(set.records[0].flag(FlagField::Name));
        assert!(!set.records[1].flag(FlagField::Name));
    }

    #[test]
    fn keeps_rows_of_only_empty_fields() {
        let text = "a,b\n1,2\n,\n3,4\n";
        let set = parse_records(text).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.records[1].get("a"), "");
        assert_eq!(set.records[2].get("a"), "3");
        assert_eq!(to_csv(&set).unwrap(), text);
    }

    #[test]
    fn short_rows_lack_trailing_columns() {
        let set = parse_records("a,b,c\n1,2\n").unwrap();
        assert_eq!(set.records[0].get("b"), "2");
        assert_eq!(set.records[0].get("c"), "");
    }

    #[test]
    fn strips_utf8_bom() {
        let set = parse_records("\u{feff}Nombre_ok\n1\n").unwrap();
        assert_eq!(set.headers, vec!["Nombre_ok".to_string()]);
    }

    #[test]
    fn row_longer_than_header_is_an_error() {
        let err = parse_records("a,b\n1,2\n3,4,5\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ExtraFields {
                line: 3,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn unedited_fields_survive_round_trip() {
        let set = parse_records(SAMPLE).unwrap();
        let text = to_csv(&set).unwrap();
        let again = parse_records(&text).unwrap();
        assert_eq!(again, set);
    }

    #[test]
    fn written_csv_keeps_header_order_and_edits() {
        let mut set = parse_records(SAMPLE).unwrap();
        set.records[1].toggle(FlagField::Task);
        let text = to_csv(&set).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Nombre_a_validar,Nombre_encontrado,Justificacion,Link_imagen,Nombre_ok,Periodo_ok,Tarea_ok"
        );
        let last = lines.last().unwrap();
        assert!(last.ends_with(",0,0,1"), "got {last}");
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let set = parse_records("").unwrap();
        assert!(set.is_empty());
        assert_eq!(to_csv(&set).unwrap(), "");
    }
}
