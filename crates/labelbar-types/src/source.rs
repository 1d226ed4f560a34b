//! Ingestion seam.

use async_trait::async_trait;

use crate::{PriceSeries, Result};

/// Something that can deliver a time-ordered [`PriceSeries`].
///
/// The analysis passes never care where bars come from; CSV files and the
/// broker REST API both sit behind this trait.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Loads the full series.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport or decoding fails.
    async fn load(&self) -> Result<PriceSeries>;

    /// Returns a short description for logs and error messages.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bar, LabelbarError};
    use chrono::{TimeZone, Utc};

    struct Fixed(Vec<Bar>);

    #[async_trait]
    impl BarSource for Fixed {
        async fn load(&self) -> Result<PriceSeries> {
            if self.0.is_empty() {
                return Err(LabelbarError::NoData {
                    source_name: self.describe(),
                });
            }
            Ok(PriceSeries::from_unsorted(self.0.clone()))
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    #[tokio::test]
    async fn test_trait_object_load() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let source: Box<dyn BarSource> = Box::new(Fixed(vec![Bar::new(ts, 1.0, 1.0, 1.0, 1.0)]));
        assert_eq!(source.load().await.unwrap().len(), 1);

        let empty: Box<dyn BarSource> = Box::new(Fixed(Vec::new()));
        assert!(matches!(empty.load().await, Err(LabelbarError::NoData { .. })));
    }
}
