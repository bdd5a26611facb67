//! Writes a trimmed local copy of the dataset.

use cvd_data::source::CsvSource;
use cvd_owid::compression::{gzip, is_gzip_path};
use cvd_owid::observation::RawObservation;
use log::info;

/// Fetch the dataset from `source` and write only the required columns to
/// `output`, gzip-compressed when the path ends in `.gz`.
///
/// Rows are written as published: no cleaning, so the snapshot can be fed
/// back through `--source` and produce the same table.
pub async fn run_snapshot<S: CsvSource>(source: &S, output: &str) -> anyhow::Result<usize> {
    info!("Fetching dataset from {}", source.describe());
    let body = source.fetch().await?;
    let rows = RawObservation::parse_owid_csv(&body)?;

    let mut buffer = Vec::new();
    RawObservation::write_trimmed_csv(&rows, &mut buffer)?;
    let bytes = if is_gzip_path(output) {
        gzip(&buffer)?
    } else {
        buffer
    };
    std::fs::write(output, &bytes)?;

    info!(
        "Snapshot complete: {} rows, {} bytes written to {}",
        rows.len(),
        bytes.len(),
        output
    );
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FileSource;
    use cvd_data::dataset::Dataset;

    const CSV: &str = "\
iso_code,continent,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred,extra
DEU,Europe,Germany,2022-06-30,28129540,140292,98,83369840,76.1,x
OWID_WRL,,World,2022-07-01,548000000,6330000,1500,7975105024,60.1,y
";

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("cvd-snapshot-{}-{}", std::process::id(), name))
            .display()
            .to_string()
    }

    #[tokio::test]
    async fn test_snapshot_round_trips_through_file_source() {
        let input = temp_path("input.csv");
        let output = temp_path("output.csv.gz");
        std::fs::write(&input, CSV).unwrap();

        let written = run_snapshot(&FileSource::new(&input), &output).await.unwrap();
        assert_eq!(written, 2);

        let reloaded = FileSource::new(&output).fetch().await.unwrap();
        assert!(reloaded.starts_with("iso_code,location,date,"));
        assert!(!reloaded.contains("continent"));

        // cleaning happens on load, exactly as for the remote file
        let original = Dataset::from_csv(CSV).unwrap();
        let copy = Dataset::from_csv(&reloaded).unwrap();
        assert_eq!(original, copy);
        assert_eq!(copy.len(), 1);

        std::fs::remove_file(input).ok();
        std::fs::remove_file(output).ok();
    }
}
