use crate::dataset::Dataset;
use polars::prelude::*;

/// One row per retained range with its scan geometry and supplemental header summary.
pub fn range_table(dataset: &Dataset) -> Result<DataFrame, PolarsError> {
    let ranges = dataset.ranges();

    let indices: Vec<u64> = ranges.iter().map(|r| r.index as u64).collect();
    let offsets: Vec<u64> = ranges.iter().map(|r| r.offset as u64).collect();
    let steps: Vec<u32> = ranges.iter().map(|r| r.header.steps).collect();
    let start_2th: Vec<f64> = ranges.iter().map(|r| r.header.start_2th).collect();
    let step_size: Vec<f64> = ranges.iter().map(|r| r.header.step_size).collect();
    let step_time: Vec<f64> = ranges.iter().map(|r| r.header.step_time).collect();
    let supplemental_types: Vec<Option<u32>> = ranges
        .iter()
        .map(|r| r.supplemental_kind().map(|kind| kind.tag()))
        .collect();
    let tilts: Vec<Option<f64>> = ranges.iter().map(|r| r.tilt()).collect();
    let programs: Vec<Option<String>> = ranges
        .iter()
        .map(|r| {
            r.supplemental
                .as_ref()
                .and_then(|s| s.as_area_detector())
                .map(|area| area.program.clone())
        })
        .collect();

    DataFrame::new(vec![
        Series::new("index".into(), &indices).into(),
        Series::new("offset".into(), &offsets).into(),
        Series::new("steps".into(), &steps).into(),
        Series::new("start_2th".into(), &start_2th).into(),
        Series::new("step_size".into(), &step_size).into(),
        Series::new("step_time".into(), &step_time).into(),
        Series::new("supplemental_type".into(), &supplemental_types).into(),
        Series::new("tilt".into(), &tilts).into(),
        Series::new("program".into(), &programs).into(),
    ])
}

/// Ranges whose tilt lies in `[min, max]`. Ranges without a tilt never match.
pub fn ranges_in_tilt_window(df: &DataFrame, min: f64, max: f64) -> Result<LazyFrame, PolarsError> {
    Ok(df.clone().lazy().filter(
        col("tilt")
            .is_not_null()
            .and(col("tilt").gt_eq(lit(min)).and(col("tilt").lt_eq(lit(max)))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures::{RangeSpec, file_bytes};

    fn area_dataset() -> Dataset {
        let specs = [
            RangeSpec::area(20.0, 0.5, vec![1.0, 2.0, 3.0], 30.0, 0.0, 0.0),
            RangeSpec::area(20.0, 0.5, vec![1.0, 2.0], 20.0, 0.0, 0.0),
            RangeSpec::area(20.0, 0.5, vec![4.0], 10.0, 0.0, 0.0),
        ];
        Dataset::from_bytes(&file_bytes(&specs), "map.raw").unwrap()
    }

    #[test]
    fn one_row_per_range() {
        let df = range_table(&area_dataset()).unwrap();
        assert_eq!(df.height(), 3);

        let steps: Vec<Option<u32>> = df
            .column("steps")
            .unwrap()
            .as_materialized_series()
            .u32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(steps, [Some(3), Some(2), Some(1)]);

        let tilts: Vec<Option<f64>> = df
            .column("tilt")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(tilts, [Some(150.0), Some(160.0), Some(170.0)]);
    }

    #[test]
    fn scan_has_no_supplemental_columns() {
        let bytes = file_bytes(&[RangeSpec::scan(10.0, 1.0, vec![1.0; 4])]);
        let dataset = Dataset::from_bytes(&bytes, "scan.raw").unwrap();
        let df = range_table(&dataset).unwrap();
        assert_eq!(df.column("supplemental_type").unwrap().as_materialized_series().null_count(), 1);
        assert_eq!(df.column("tilt").unwrap().as_materialized_series().null_count(), 1);
    }

    #[test]
    fn tilt_window_filters_rows() {
        let df = range_table(&area_dataset()).unwrap();
        let window = ranges_in_tilt_window(&df, 155.0, 175.0)
            .unwrap()
            .collect()
            .unwrap();
        let indices: Vec<Option<u64>> = window
            .column("index")
            .unwrap()
            .as_materialized_series()
            .u64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(indices, [Some(1), Some(2)]);
    }
}
