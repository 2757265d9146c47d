//! Behavior tests for the symbols → series → CSV pipeline.

use pricesheet_core::{
    format_iso_date, generate_series, parse_symbols, to_csv, to_rows, DataProvider, DateRange,
    MockProvider, SeriesCollection, SeriesRequest, CSV_HEADER,
};

fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).expect("valid range")
}

// =============================================================================
// Symbol parsing
// =============================================================================

#[test]
fn when_input_has_blank_lines_only_real_symbols_survive() {
    // Given: pasted text with blank and whitespace-only lines
    let raw = "  RELIANCE \n\n\t\nTCS\r\n   \nINFY";

    // When
    let symbols = parse_symbols(raw);

    // Then: trimmed, in input order, no empties
    let names: Vec<_> = symbols.iter().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["RELIANCE", "TCS", "INFY"]);
    assert!(symbols.iter().all(|s| !s.as_str().is_empty()));
}

#[test]
fn when_input_is_blank_symbol_list_is_empty() {
    assert!(parse_symbols("").is_empty());
    assert!(parse_symbols(" \n\n \t").is_empty());
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn when_generating_each_symbol_gets_one_point_per_day_newest_first() {
    // Given
    let symbols = parse_symbols("A\nB\nC");
    let mut rng = fastrand::Rng::with_seed(42);

    // When: a 10-day range
    let collection = generate_series(&symbols, range("2024-02-20", "2024-02-29"), &mut rng);

    // Then
    assert_eq!(collection.records().len(), 3);
    for record in collection.records() {
        assert_eq!(record.len(), 10);
        let dates: Vec<_> = record.points().iter().map(|p| p.date).collect();
        assert!(dates.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(format_iso_date(dates[0]), "2024-02-29");
    }
}

#[test]
fn when_generating_with_the_same_seed_output_repeats() {
    let symbols = parse_symbols("X\nY");
    let range = range("2024-01-01", "2024-01-05");

    let first = generate_series(&symbols, range, &mut fastrand::Rng::with_seed(7));
    let second = generate_series(&symbols, range, &mut fastrand::Rng::with_seed(7));

    assert_eq!(first, second);
}

// =============================================================================
// CSV export
// =============================================================================

#[test]
fn when_collection_is_empty_csv_is_header_only() {
    assert_eq!(to_csv(&SeriesCollection::default()), "Symbol,Date,Close,Volume\n");
}

#[test]
fn when_exporting_csv_has_one_row_per_point_plus_header() {
    // Given
    let collection = generate_series(
        &parse_symbols("AAA\nBBB"),
        range("2024-03-01", "2024-03-04"),
        &mut fastrand::Rng::with_seed(1),
    );

    // When
    let csv = to_csv(&collection);
    let lines: Vec<_> = csv.lines().collect();

    // Then: header, then symbol blocks in order with ISO dates
    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert_eq!(lines.len(), 1 + collection.total_points());
    assert!(lines[1].starts_with("AAA,2024-03-04,"));
    assert!(lines[4].starts_with("AAA,2024-03-01,"));
    assert!(lines[5].starts_with("BBB,2024-03-04,"));
}

#[test]
fn when_exported_rows_are_split_the_values_come_back() {
    // Given
    let collection = generate_series(
        &parse_symbols("NIFTY"),
        range("2024-01-01", "2024-01-03"),
        &mut fastrand::Rng::with_seed(5),
    );
    let rows = to_rows(&collection);

    // When: reading each CSV data line back field by field
    let csv = to_csv(&collection);
    for (line, row) in csv.lines().skip(1).zip(&rows) {
        let fields: Vec<_> = line.split(',').collect();

        // Then: every field parses back to the exported value
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], row.symbol.as_str());
        assert_eq!(fields[1], format_iso_date(row.date));
        assert_eq!(fields[2].parse::<f64>().expect("close"), row.close);
        assert_eq!(fields[3].parse::<u64>().expect("volume"), row.volume);
    }
}

// =============================================================================
// End to end
// =============================================================================

#[tokio::test]
async fn when_user_asks_for_two_symbols_over_three_days_csv_has_six_rows() {
    // Given: mixed-case input is kept as typed
    let request = SeriesRequest::new(parse_symbols("aapl\nMSFT"), range("2024-01-01", "2024-01-03"))
        .expect("valid request");

    // When
    let outcome = MockProvider::seeded(2024)
        .fetch(request)
        .await
        .expect("mock never fails");
    let csv = to_csv(&outcome.collection);

    // Then
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[1].starts_with("aapl,2024-01-03,"));
    assert!(lines[3].starts_with("aapl,2024-01-01,"));
    assert!(lines[4].starts_with("MSFT,2024-01-03,"));
}
