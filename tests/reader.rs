use chrono::{NaiveDate, NaiveDateTime};
use itertools::izip;
use named_csv::{Error, FieldSource, ReadError, Reader, ReaderOptions};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const VALID: &str = "name,age,active,weight,reference
Colorado Leon,26,false,08.09,1996-09-22 23:40:01
Rajah Fletcher,47,false,25.81,1994-08-22 18:59:33
Tobias Snow,16,false,34.64,2005-10-29 17:14:49
Jared Finch,19,true,64.33,1980-01-20 11:39:40
";

const VALID_WITHOUT_HEADERS: &str = "Colorado Leon,26
Rajah Fletcher,47
";

fn date(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

#[test]
fn headers_in_csv() {
    let names = ["Colorado Leon", "Rajah Fletcher", "Tobias Snow", "Jared Finch"];
    let ages = [26_i64, 47, 16, 19];
    let active = [false, false, false, true];
    let weights = [8.09_f64, 25.81, 34.64, 64.33];
    let references = [
        date(1996, 9, 22, 23, 40, 1),
        date(1994, 8, 22, 18, 59, 33),
        date(2005, 10, 29, 17, 14, 49),
        date(1980, 1, 20, 11, 39, 40),
    ];

    let mut reader = Reader::from_reader(VALID.as_bytes());
    let records: Vec<_> = reader
        .records()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records.len(), 4);

    for (i, (record, name, age, active, weight, reference)) in izip!(
        records.iter(),
        names.iter(),
        ages.iter(),
        active.iter(),
        weights.iter(),
        references.iter()
    )
    .enumerate()
    {
        assert_eq!(record.row(), i as u64);
        assert_eq!(record.get_string("name"), *name);
        assert_eq!(record.get_int64("age"), *age);
        assert_eq!(record.get_int("age"), *age as isize);
        assert_eq!(record.get_int32("age"), *age as i32);
        assert_eq!(record.get_boolean("active"), *active);
        assert_eq!(record.get_float64("weight"), *weight);
        assert!((record.get_float32("weight") - *weight as f32).abs() < 1e-5);
        assert_eq!(record.get_time(DATE_FORMAT, "reference"), *reference);
    }
}

#[test]
fn headers_configured() {
    let mut reader =
        Reader::from_reader(VALID_WITHOUT_HEADERS.as_bytes()).with_headers(["name", "age"]);
    let records: Vec<_> = reader
        .records()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].row(), 0);
    assert_eq!(records[0].get_string("name"), "Colorado Leon");
    assert_eq!(records[0].get_int("age"), 26);
    assert_eq!(records[1].row(), 1);
    assert_eq!(records[1].get_string("name"), "Rajah Fletcher");
    assert_eq!(records[1].get_int64("age"), 47);
}

#[test]
fn headers_from_options() {
    let options: ReaderOptions =
        serde_json::from_str(r#"{"delimiter": 59, "headers": ["name", "age"]}"#).unwrap();
    let mut reader = Reader::from_reader_with_options("Tobias Snow;16\n".as_bytes(), &options);
    assert_eq!(reader.headers().unwrap().as_slice(), ["name", "age"]);
    let record = reader.records().unwrap().next().unwrap().unwrap();
    assert_eq!(record.get_string("name"), "Tobias Snow");
    assert_eq!(record.get_int32("age"), 16);
}

#[test]
fn missing_column() {
    let mut reader = Reader::from_reader(VALID.as_bytes());
    for record in reader.records().unwrap() {
        let record = record.unwrap();
        assert_eq!(record.get_string("missing"), "");
        assert_eq!(record.get_int("missing"), 0);
        assert_eq!(record.get_float32("missing"), 0.0);
        assert!(!record.get_boolean("missing"));
        assert_eq!(
            record.get_time(DATE_FORMAT, "missing"),
            NaiveDateTime::default()
        );
    }
}

#[test]
fn header_only_input() {
    let mut reader = Reader::from_reader("name,age\n".as_bytes());
    assert_eq!(reader.headers().unwrap().len(), 2);
    assert!(reader.records().unwrap().next().is_none());
}

#[test]
fn empty_input() {
    let mut reader = Reader::from_reader(&b""[..]);
    assert!(matches!(reader.records(), Err(Error::MissingHeader)));
}

#[test]
fn malformed_row_ends_stream() {
    let data = "name,age
Colorado Leon,26
Rajah Fletcher,47,extra
Tobias Snow,16
Jared Finch,19
";
    let mut reader = Reader::from_reader(data.as_bytes());
    let items: Vec<_> = reader.records().unwrap().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap().get_string("name"), "Colorado Leon");
    assert!(matches!(
        items[1],
        Err(Error::Read {
            row: 1,
            source: ReadError::UnequalLengths { .. }
        })
    ));
}

#[test]
fn flexible_rows() {
    let data = "name,age
Colorado Leon
Rajah Fletcher,47,extra
";
    let options = ReaderOptions {
        flexible: true,
        ..ReaderOptions::default()
    };
    let mut reader = Reader::from_reader_with_options(data.as_bytes(), &options);
    let records: Vec<_> = reader
        .records()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records[0].get_string("age"), "");
    assert_eq!(records[0].get_int("age"), 0);
    assert_eq!(records[1].get_int("age"), 47);
    assert_eq!(records[1].len(), 3);
}

/// A source that fails after a fixed number of rows.
struct FailAfter {
    rows: usize,
    read: usize,
}

impl FieldSource for FailAfter {
    fn read_fields(&mut self) -> Result<Option<Vec<String>>, ReadError> {
        self.read += 1;
        if self.read > self.rows {
            return Err(ReadError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "connection reset",
            )));
        }
        Ok(Some(vec![format!("{}", self.read)]))
    }
}

#[test]
fn source_failure_is_terminal() {
    let mut reader = Reader::new(FailAfter { rows: 3, read: 0 }).with_headers(["n"]);
    let items: Vec<_> = reader.records().unwrap().collect();
    assert_eq!(items.len(), 4);
    assert!(items[..3].iter().all(Result::is_ok));
    assert!(items[3].is_err());
    assert_eq!(reader.into_inner().read, 4);
}

#[test]
fn spawned_reader() {
    let receiver = Reader::from_reader(VALID.as_bytes()).spawn();
    let names: Vec<_> = receiver
        .map(|r| r.unwrap().get_string("name").to_string())
        .collect();
    assert_eq!(
        names,
        vec!["Colorado Leon", "Rajah Fletcher", "Tobias Snow", "Jared Finch"]
    );
}

#[test]
fn records_serialize_as_objects() {
    let mut reader = Reader::from_reader(VALID_WITHOUT_HEADERS.as_bytes()).with_headers(["name"]);
    let record = reader.records().unwrap().next().unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        serde_json::json!({"name": "Colorado Leon"})
    );
}
