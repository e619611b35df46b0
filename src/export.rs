//! CSV export of the merged dataset: one row per country, one column per indicator.

use std::io::Write;
use std::path::Path;

use crate::catalog::IndicatorKey;
use crate::model::{Dataset, MetricValue};

pub fn write_dataset_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(IndicatorKey::COUNT + 2);
    header.push("country");
    header.push("is_target");
    header.extend(IndicatorKey::ALL.iter().map(|key| key.as_str()));
    csv_writer.write_record(&header)?;

    for (name, record) in dataset.countries() {
        let mut row = Vec::with_capacity(IndicatorKey::COUNT + 2);
        row.push(name.to_string());
        row.push((name == dataset.target_name()).to_string());
        row.extend(record.iter().map(|(_, value)| match value {
            MetricValue::Present(value) => value.to_string(),
            MetricValue::Absent => String::new(),
        }));
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_dataset_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), csv::Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_dataset_csv(dataset, file)
}
