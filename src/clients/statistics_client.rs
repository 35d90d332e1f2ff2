//! Provides the `StatisticsClient` for rainy-day and rainfall statistics
//! computed over the archived observations, obtained via
//! [`Clime::statistics()`].

use crate::clime::Clime;
use crate::error::ClimeError;
use crate::stats::coerce::Season;
use crate::stats::rainfall_totals::{self, YearlyRainfall};
use crate::stats::rainy_days::{self, YearlyRainyDays};
use bon::bon;

/// A client for statistics over the archive.
///
/// The underlying data is the secret-gated archive, so every method takes the
/// unscramble secret. Passing a `season` restricts a statistic to that
/// season's months, attributed to season-years (a winter spans the year
/// boundary and belongs to the year it starts in).
pub struct StatisticsClient<'a> {
    client: &'a Clime,
}

#[bon]
impl<'a> StatisticsClient<'a> {
    pub(crate) fn new(client: &'a Clime) -> Self {
        Self { client }
    }

    /// Counts rainy days per year, ascending. A day is rainy when its
    /// (coerced) rainfall reading is above zero, trace amounts included.
    ///
    /// # Arguments
    ///
    /// * `.secret(&str)`: **Required.**
    /// * `.season(Season)`: Optional. Restrict to summer or winter months.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clime::{Clime, ClimeError, Season};
    /// # async fn run() -> Result<(), ClimeError> {
    /// let client = Clime::builder().secret("super_secret_123").build().await?;
    /// let winters = client
    ///     .statistics()
    ///     .rainy_days()
    ///     .secret("super_secret_123")
    ///     .season(Season::Winter)
    ///     .call()
    ///     .await?;
    /// for year in winters {
    ///     println!("{}: {:.1}% rainy", year.year, year.percentage());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn rainy_days(
        &self,
        secret: &str,
        season: Option<Season>,
    ) -> Result<Vec<YearlyRainyDays>, ClimeError> {
        let observations = self.client.retrieval().all_observations(secret).await?;
        Ok(match season {
            Some(season) => rainy_days::by_season(&observations, season),
            None => rainy_days::by_year(&observations),
        })
    }

    /// Sums rainfall per year, ascending, in millimetres.
    ///
    /// Takes the same arguments as [`rainy_days`](Self::rainy_days).
    #[builder]
    pub async fn rainfall_totals(
        &self,
        secret: &str,
        season: Option<Season>,
    ) -> Result<Vec<YearlyRainfall>, ClimeError> {
        let observations = self.client.retrieval().all_observations(secret).await?;
        Ok(match season {
            Some(season) => rainfall_totals::by_season(&observations, season),
            None => rainfall_totals::by_year(&observations),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClimeError;
    use crate::retrieval::error::RetrievalError;
    use tempfile::tempdir;

    const SECRET: &str = "stats_secret";

    fn month_text(rains: &[&str]) -> String {
        let mut text = String::from("---\n");
        for (i, rain) in rains.iter().enumerate() {
            text.push_str(&format!(
                "{} 25.8 29.2 2:31pm 20.8 6:39am {} 1 23 12:54pm NNE 1011.09 76\n",
                i + 1,
                rain
            ));
        }
        text
    }

    async fn seeded_client(dir: &std::path::Path) -> Clime {
        let client = Clime::builder()
            .secret(SECRET)
            .data_dir(dir.to_path_buf())
            .build()
            .await
            .unwrap();
        let reports = vec![
            (2010, 6, Ok(month_text(&["1.20", "0.0", "0.50"]))),
            (2010, 12, Ok(month_text(&["2.00", "0.0"]))),
            (2011, 1, Ok(month_text(&["3.00"]))),
        ];
        client.ingest().ingest_reports(reports).await.unwrap();
        client
    }

    #[tokio::test]
    async fn rainy_days_by_year_through_the_facade() {
        let dir = tempdir().unwrap();
        let client = seeded_client(dir.path()).await;

        let years = client
            .statistics()
            .rainy_days()
            .secret(SECRET)
            .call()
            .await
            .unwrap();
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2010);
        assert_eq!(years[0].rainy_days, 3);
        assert_eq!(years[0].total_days, 5);
        assert_eq!(years[1].year, 2011);
        assert_eq!(years[1].rainy_days, 1);
    }

    #[tokio::test]
    async fn winter_totals_pull_january_into_the_previous_season_year() {
        let dir = tempdir().unwrap();
        let client = seeded_client(dir.path()).await;

        let winters = client
            .statistics()
            .rainfall_totals()
            .secret(SECRET)
            .season(Season::Winter)
            .call()
            .await
            .unwrap();
        // December 2010 and January 2011 both land in winter 2010.
        assert_eq!(winters.len(), 1);
        assert_eq!(winters[0].year, 2010);
        assert!((winters[0].total_mm - 5.0).abs() < 1e-9);
        assert_eq!(winters[0].days, 3);
    }

    #[tokio::test]
    async fn statistics_are_gated_by_the_secret() {
        let dir = tempdir().unwrap();
        let client = seeded_client(dir.path()).await;

        let denied = client
            .statistics()
            .rainy_days()
            .secret("wrong")
            .call()
            .await;
        assert!(matches!(
            denied,
            Err(ClimeError::Retrieval(RetrievalError::AccessDenied))
        ));
    }
}
