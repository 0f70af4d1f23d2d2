use anyhow::Result;
use route_enricher::config::PipelineConfig;
use route_enricher::pipeline::Pipeline;
use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn write_jsonl(path: &std::path::Path, rows: &[Value]) -> Result<()> {
    let mut file = File::create(path)?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    Ok(())
}

fn test_config(root: &std::path::Path) -> PipelineConfig {
    PipelineConfig {
        incoming_dir: root.join("incoming").to_string_lossy().to_string(),
        processed_dir: root.join("processed").to_string_lossy().to_string(),
        output_dir: root.join("output").to_string_lossy().to_string(),
        ..PipelineConfig::default()
    }
}

#[tokio::test]
async fn test_enrich_file_end_to_end() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("routes_batch.jsonl");
    write_jsonl(
        &input,
        &[
            json!({
                "origin_airport": "LAX",
                "destination_airport": "SFO",
                "origin_country": "US",
                "destination_country": "US",
                "origin_region": "West",
                "destination_region": "West",
                "distance_km": 800.0,
                "stops": 0,
                "airline_code": "AA",
                "flight_number": "AA100"
            }),
            json!({
                "origin_airport": "LAX",
                "destination_airport": "NRT",
                "origin_country": "US",
                "destination_country": "JP",
                "origin_region": "West",
                "destination_region": "Asia",
                "distance_km": 4200.0,
                "stops": 1
            }),
            json!({
                "origin_airport": "SEA",
                "destination_airport": "DEN",
                "origin_country": "US",
                "destination_country": "US",
                "distance_km": 2000.0,
                "stops": 0
            }),
            json!({
                "origin_airport": "JFK",
                "destination_airport": "LHR",
                "origin_country": "US",
                "destination_country": "GB",
                "stops": 0
            }),
        ],
    )?;

    let pipeline = Pipeline::new(test_config(temp_dir.path()));
    let summary = pipeline.run_file(&input).await?;

    assert_eq!(summary.total_rows, 4);
    assert_eq!(summary.enriched_rows, 4);
    assert!(summary.row_errors.is_empty());

    let content = fs::read_to_string(&summary.output_file)?;
    let rows: Vec<Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows.len(), 4);

    // Short-haul domestic direct
    assert_eq!(rows[0]["distance_category"], "Short-haul");
    assert_eq!(rows[0]["route_type"], "Domestic");
    assert_eq!(rows[0]["region_pair"], "West to West");
    assert_eq!(rows[0]["flight_type"], "Direct");
    assert_eq!(rows[0]["route_id"], "LAX-SFO");
    // Base fields pass through unchanged
    assert_eq!(rows[0]["airline_code"], "AA");
    assert_eq!(rows[0]["flight_number"], "AA100");

    // Long-haul international with stops
    assert_eq!(rows[1]["distance_category"], "Long-haul");
    assert_eq!(rows[1]["route_type"], "International");
    assert_eq!(rows[1]["flight_type"], "With Stops");
    assert_eq!(rows[1]["route_id"], "LAX-NRT");

    // Boundary region between the thresholds
    assert_eq!(rows[2]["distance_category"], "Medium-haul");

    // Unknown distance and regions fall back softly
    assert_eq!(rows[3]["distance_category"], "Unknown");
    assert_eq!(rows[3]["region_pair"], " to ");
    assert_eq!(rows[3]["flight_type"], "Direct");

    Ok(())
}

#[tokio::test]
async fn test_run_incoming_discovers_and_archives() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = test_config(temp_dir.path());
    let incoming = temp_dir.path().join("incoming");
    fs::create_dir_all(&incoming)?;
    write_jsonl(
        &incoming.join("routes_2026_08.jsonl"),
        &[json!({
            "origin_airport": "SEA",
            "destination_airport": "PDX",
            "origin_country": "US",
            "destination_country": "US",
            "distance_km": 233.0,
            "stops": 0
        })],
    )?;

    let pipeline = Pipeline::new(config);
    let summary = pipeline.run_incoming().await?.expect("one staged file");

    assert_eq!(summary.enriched_rows, 1);

    // Input was archived out of the incoming directory under a timestamped name
    assert!(!incoming.join("routes_2026_08.jsonl").exists());
    let archived = summary.archived_to.expect("archived path");
    assert!(archived.contains("processed"));
    assert!(fs::metadata(&archived)?.len() > 0);

    // Output holds the enriched row
    let content = fs::read_to_string(&summary.output_file)?;
    let row: Value = serde_json::from_str(content.lines().next().unwrap())?;
    assert_eq!(row["route_id"], "SEA-PDX");
    assert_eq!(row["flight_type"], "Direct");

    Ok(())
}

#[tokio::test]
async fn test_run_incoming_with_nothing_staged() -> Result<()> {
    let temp_dir = tempdir()?;
    let pipeline = Pipeline::new(test_config(temp_dir.path()));

    assert!(pipeline.run_incoming().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_undecodable_rows_are_reported_not_fatal() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("routes_mixed.jsonl");
    let mut file = File::create(&input)?;
    writeln!(file, r#"{{"origin_airport":"LAX","destination_airport":"SFO"}}"#)?;
    writeln!(file, "{{broken")?;
    drop(file);

    let pipeline = Pipeline::new(test_config(temp_dir.path()));
    let summary = pipeline.run_file(&input).await?;

    assert_eq!(summary.total_rows, 2);
    assert_eq!(summary.enriched_rows, 1);
    assert_eq!(summary.row_errors.len(), 1);
    assert!(summary.row_errors[0].starts_with("row 2:"));
    Ok(())
}

#[tokio::test]
async fn test_reprocessing_enriched_output_does_not_duplicate_columns() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("routes_first.jsonl");
    write_jsonl(
        &input,
        &[json!({
            "origin_airport": "LAX",
            "destination_airport": "SFO",
            "origin_country": "US",
            "destination_country": "US",
            "distance_km": 800.0,
            "stops": 0
        })],
    )?;

    let pipeline = Pipeline::new(test_config(temp_dir.path()));
    let first = pipeline.run_file(&input).await?;
    let second = pipeline
        .run_file(std::path::Path::new(&first.output_file))
        .await?;

    assert_eq!(second.enriched_rows, 1);
    let content = fs::read_to_string(&second.output_file)?;
    let line = content.lines().next().unwrap();
    // The derived columns appear exactly once on re-derived output
    assert_eq!(line.matches("\"route_id\"").count(), 1);
    assert_eq!(line.matches("\"distance_category\"").count(), 1);

    let row: Value = serde_json::from_str(line)?;
    assert_eq!(row["route_id"], "LAX-SFO");
    assert_eq!(row["distance_category"], "Short-haul");
    Ok(())
}
