//! Provides the `RainfallClient` for querying the bundled annual rainfall
//! datasets, obtained via [`Clime::rainfall()`].
//!
//! All queries read from whichever dataset is currently selected on the main
//! client ([`Clime::set_rainfall_source()`]). Methods that accept an
//! `excluded_years` list take it as a comma-separated string like
//! `"1914, 1939"`; a malformed list is logged and ignored as a whole rather
//! than partially applied.

use crate::clime::Clime;
use crate::error::ClimeError;
use crate::rainfall::filter::{
    apply_excluded_years, basic_statistics, monthly_averages, year_range, BasicStatistics,
};
use crate::rainfall::record::RainfallRecord;
use crate::stats::buckets::{self, YearBucket};
use crate::stats::trend::{self, TrendLine};
use bon::bon;

/// A client for the annual rainfall datasets.
pub struct RainfallClient<'a> {
    client: &'a Clime,
}

#[bon]
impl<'a> RainfallClient<'a> {
    pub(crate) fn new(client: &'a Clime) -> Self {
        Self { client }
    }

    /// Loads the selected dataset's records, ascending by year.
    ///
    /// # Arguments
    ///
    /// * `.excluded_years(&str)`: Optional. Comma-separated years to drop.
    /// * `.from(i32)` / `.to(i32)`: Optional. Inclusive year bounds.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clime::{Clime, ClimeError};
    /// # async fn run() -> Result<(), ClimeError> {
    /// let client = Clime::builder().secret("super_secret_123").build().await?;
    /// let records = client
    ///     .rainfall()
    ///     .records()
    ///     .from(1950)
    ///     .to(2000)
    ///     .excluded_years("1952, 1953")
    ///     .call()
    ///     .await?;
    /// println!("{} years of rainfall data", records.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn records(
        &self,
        excluded_years: Option<&str>,
        from: Option<i32>,
        to: Option<i32>,
    ) -> Result<Vec<RainfallRecord>, ClimeError> {
        let mut records = self.client.rainfall_catalog().records().await?;
        if let Some(spec) = excluded_years {
            records = apply_excluded_years(records, spec);
        }
        if from.is_some() || to.is_some() {
            records = year_range(records, from.unwrap_or(i32::MIN), to.unwrap_or(i32::MAX));
        }
        Ok(records)
    }

    /// Averages annual totals over aligned multi-year buckets.
    ///
    /// # Arguments
    ///
    /// * `.bucket_size(i32)`: **Required.** Years per bucket, at least 1.
    /// * `.offset(i32)`: Optional. Alignment offset in `[0, bucket_size)`,
    ///   defaulting to 0. Years before the first aligned bucket fall outside
    ///   every bucket.
    /// * `.excluded_years(&str)`: Optional.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Validation`](crate::StatsError::Validation) for
    /// a non-positive bucket size or an offset outside its range.
    #[builder]
    pub async fn buckets(
        &self,
        bucket_size: i32,
        offset: Option<i32>,
        excluded_years: Option<&str>,
    ) -> Result<Vec<YearBucket>, ClimeError> {
        let totals = self.annual_totals(excluded_years).await?;
        let buckets = buckets::bucket_means(&totals, bucket_size, offset.unwrap_or(0))?;
        Ok(buckets)
    }

    /// Fits a least-squares line through the annual totals. `None` when
    /// fewer than two years remain after exclusions.
    #[builder]
    pub async fn trend(
        &self,
        excluded_years: Option<&str>,
    ) -> Result<Option<TrendLine>, ClimeError> {
        let totals = self.annual_totals(excluded_years).await?;
        Ok(trend::linear_trend(&totals))
    }

    /// Mean rainfall per calendar month across all (remaining) years.
    #[builder]
    pub async fn monthly_averages(
        &self,
        excluded_years: Option<&str>,
    ) -> Result<[f64; 12], ClimeError> {
        let records = self.filtered_records(excluded_years).await?;
        Ok(monthly_averages(&records))
    }

    /// Headline numbers: year count, mean annual total, wettest and driest
    /// years.
    #[builder]
    pub async fn basic_statistics(
        &self,
        excluded_years: Option<&str>,
    ) -> Result<BasicStatistics, ClimeError> {
        let records = self.filtered_records(excluded_years).await?;
        Ok(basic_statistics(&records))
    }

    async fn filtered_records(
        &self,
        excluded_years: Option<&str>,
    ) -> Result<Vec<RainfallRecord>, ClimeError> {
        let records = self.client.rainfall_catalog().records().await?;
        Ok(match excluded_years {
            Some(spec) => apply_excluded_years(records, spec),
            None => records,
        })
    }

    async fn annual_totals(
        &self,
        excluded_years: Option<&str>,
    ) -> Result<Vec<(i32, f64)>, ClimeError> {
        let records = self.filtered_records(excluded_years).await?;
        Ok(records.iter().map(|r| (r.year, r.total)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rainfall::source::DataSourceKind;
    use std::io::Write;
    use tempfile::tempdir;

    /// Writes a legacy-format rainfall CSV where year Y has Y-2000 mm in
    /// every month.
    fn write_rainfall_csv(path: &std::path::Path, years: std::ops::RangeInclusive<i32>) {
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "Year,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec,Total").unwrap();
        for year in years {
            let monthly = year - 2000;
            let cells = vec![monthly.to_string(); 12].join(",");
            writeln!(file, "{},{},{}", year, cells, monthly * 12).unwrap();
        }
    }

    async fn client_with_data(dir: &std::path::Path) -> Clime {
        write_rainfall_csv(&dir.join("monthly-rains.csv"), 2001..=2010);
        write_rainfall_csv(&dir.join("station-rainfall-2000-2025.csv"), 2020..=2025);
        Clime::builder()
            .secret("unused")
            .data_dir(dir.to_path_buf())
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn records_respect_range_and_exclusions() {
        let dir = tempdir().unwrap();
        let client = client_with_data(dir.path()).await;

        let records = client
            .rainfall()
            .records()
            .from(2003)
            .to(2007)
            .excluded_years("2005")
            .call()
            .await
            .unwrap();
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2003, 2004, 2006, 2007]);
    }

    #[tokio::test]
    async fn buckets_average_annual_totals() {
        let dir = tempdir().unwrap();
        let client = client_with_data(dir.path()).await;

        let buckets = client
            .rainfall()
            .buckets()
            .bucket_size(5)
            .call()
            .await
            .unwrap();
        // Years 2001-2010 at offset 0: the aligned start below 2001 is 2000,
        // bumped to 2005, so 2001-2004 fall outside every bucket.
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start_year, 2005);
        // mean of totals 60..108 step 12
        assert!((buckets[0].mean_annual_total - 84.0).abs() < 1e-9);
        assert_eq!(buckets[1].start_year, 2010);
        assert_eq!(buckets[1].years, 1);
    }

    #[tokio::test]
    async fn trend_slope_matches_the_constructed_data() {
        let dir = tempdir().unwrap();
        let client = client_with_data(dir.path()).await;

        // Total grows by 12 mm per year by construction.
        let trend = client.rainfall().trend().call().await.unwrap().unwrap();
        assert!((trend.slope - 12.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn monthly_averages_and_basic_statistics() {
        let dir = tempdir().unwrap();
        let client = client_with_data(dir.path()).await;

        let averages = client.rainfall().monthly_averages().call().await.unwrap();
        // Monthly values run 1..=10 across years, mean 5.5 in every month.
        assert!(averages.iter().all(|v| (v - 5.5).abs() < 1e-9));

        let stats = client.rainfall().basic_statistics().call().await.unwrap();
        assert_eq!(stats.years, 10);
        assert_eq!(stats.wettest, Some((2010, 120.0)));
        assert_eq!(stats.driest, Some((2001, 12.0)));
    }

    #[tokio::test]
    async fn queries_follow_the_selected_source() {
        let dir = tempdir().unwrap();
        let client = client_with_data(dir.path()).await;

        client.set_rainfall_source(DataSourceKind::Station);
        let records = client.rainfall().records().call().await.unwrap();
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, (2020..=2025).collect::<Vec<i32>>());
    }
}
