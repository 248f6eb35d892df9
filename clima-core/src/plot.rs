//! Series chart cache and the per-factor plot card coordinator.
//!
//! The cache belongs to the factors view and outlives the plot cards: one
//! card is mounted at a time, for the displayed factor, and is recreated
//! whenever that factor changes. `H` is whatever handle the host uses for a
//! fetched image (an object URL in the browser, a path or bytes elsewhere).

use crate::factor::PlotFactor;
use crate::request::SeriesRequest;
use crate::validation::SeriesInputs;

pub const PLOT_ERROR_FALLBACK: &str = "Error al cargar la gráfica";
pub const CSV_ERROR_FALLBACK: &str = "Error al descargar CSV";

/// Last successfully fetched chart for each chartable factor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCache<H> {
    slots: [Option<H>; 4],
}

impl<H> Default for PlotCache<H> {
    fn default() -> Self {
        Self {
            slots: [None, None, None, None],
        }
    }
}

impl<H> PlotCache<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, factor: PlotFactor) -> Option<&H> {
        self.slots[factor.index()].as_ref()
    }

    /// Overwrite the slot for `factor`, returning the handle it replaced.
    pub fn store(&mut self, factor: PlotFactor, handle: H) -> Option<H> {
        self.slots[factor.index()].replace(handle)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// State of one mounted plot card.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCoordinator<H> {
    factor: PlotFactor,
    displayed: Option<H>,
    loading_plot: bool,
    loading_csv: bool,
    error: Option<String>,
}

impl<H: Clone> PlotCoordinator<H> {
    /// Mount a card for `factor`, showing the cached chart if there is one.
    pub fn mount(factor: PlotFactor, cache: &PlotCache<H>) -> Self {
        let displayed = cache.get(factor).cloned();
        log::debug!(
            "plot card mounted for {} ({})",
            factor,
            if displayed.is_some() { "cached" } else { "empty" }
        );
        Self {
            factor,
            displayed,
            loading_plot: false,
            loading_csv: false,
            error: None,
        }
    }

    pub fn factor(&self) -> PlotFactor {
        self.factor
    }

    pub fn displayed(&self) -> Option<&H> {
        self.displayed.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading_plot(&self) -> bool {
        self.loading_plot
    }

    pub fn is_loading_csv(&self) -> bool {
        self.loading_csv
    }

    /// Both action buttons are disabled while inputs are invalid or either
    /// fetch is outstanding.
    pub fn buttons_disabled(&self, inputs: Option<&SeriesInputs>) -> bool {
        inputs.is_none() || self.loading_plot || self.loading_csv
    }

    /// Re-evaluated on mount and after every parameter change: fetch only
    /// when nothing is displayed and no chart fetch is outstanding. A chart
    /// that is already shown is kept even if the parameters changed.
    pub fn auto_load(&mut self, inputs: Option<&SeriesInputs>) -> Option<SeriesRequest> {
        if self.loading_plot || self.displayed.is_some() {
            return None;
        }
        self.begin_plot(inputs?)
    }

    /// "Actualizar gráfica".
    pub fn update_plot(&mut self, inputs: Option<&SeriesInputs>) -> Option<SeriesRequest> {
        if self.buttons_disabled(inputs) {
            return None;
        }
        self.begin_plot(inputs?)
    }

    fn begin_plot(&mut self, inputs: &SeriesInputs) -> Option<SeriesRequest> {
        self.error = None;
        self.loading_plot = true;
        log::info!("requesting {} chart", self.factor);
        Some(SeriesRequest::new(
            &inputs.target,
            self.factor,
            &inputs.settings,
        ))
    }

    /// Record a chart fetch outcome. On success the chart is displayed and
    /// written to the cache slot for this card's factor, replacing whatever
    /// was there; the replaced handle is returned so the host can release it.
    /// On failure the displayed chart is left as it was.
    pub fn complete_plot(
        &mut self,
        outcome: Result<H, String>,
        cache: &mut PlotCache<H>,
    ) -> Option<H> {
        self.loading_plot = false;
        match outcome {
            Ok(handle) => {
                self.displayed = Some(handle.clone());
                cache.store(self.factor, handle)
            }
            Err(message) => {
                log::warn!("{} chart failed: {}", self.factor, message);
                self.error = Some(message);
                None
            }
        }
    }

    /// "Descargar CSV". Never touches the chart cache.
    pub fn download_csv(&mut self, inputs: Option<&SeriesInputs>) -> Option<SeriesRequest> {
        if self.buttons_disabled(inputs) {
            return None;
        }
        let inputs = inputs?;
        self.error = None;
        self.loading_csv = true;
        log::info!("requesting {} CSV", self.factor);
        Some(SeriesRequest::new(
            &inputs.target,
            self.factor,
            &inputs.settings,
        ))
    }

    pub fn complete_csv(&mut self, outcome: Result<(), String>) {
        self.loading_csv = false;
        if let Err(message) = outcome {
            log::warn!("{} CSV failed: {}", self.factor, message);
            self.error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::AnalysisFactor;
    use crate::validation::{FactorsForm, SeriesForm};

    fn inputs() -> SeriesInputs {
        let form = FactorsForm {
            latitude: "19.43".into(),
            longitude: "-99.13".into(),
            month: "6".into(),
            day: "15".into(),
            factor: "wind".into(),
        };
        SeriesForm::default().validate(&form).into_value().unwrap()
    }

    #[test]
    fn test_cache_is_total_over_chartable_factors() {
        let mut cache: PlotCache<&str> = PlotCache::new();
        assert!(cache.is_empty());
        for factor in PlotFactor::ALL {
            assert!(cache.get(factor).is_none());
        }
        assert_eq!(cache.store(PlotFactor::Wind, "a"), None);
        assert_eq!(cache.store(PlotFactor::Wind, "b"), Some("a"));
        assert_eq!(cache.get(PlotFactor::Wind), Some(&"b"));
        assert_eq!(cache.len(), 1);
        assert!(PlotFactor::try_from(AnalysisFactor::Comfort).is_err());
    }

    #[test]
    fn test_empty_cache_auto_loads_once() {
        let cache: PlotCache<u32> = PlotCache::new();
        let mut card = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        let request = card.auto_load(Some(&inputs())).unwrap();
        assert_eq!(request.factor.0, AnalysisFactor::Wind);
        assert!(card.is_loading_plot());
        // Parameter churn while loading does not start another fetch.
        assert!(card.auto_load(Some(&inputs())).is_none());
    }

    #[test]
    fn test_invalid_inputs_do_nothing() {
        let cache: PlotCache<u32> = PlotCache::new();
        let mut card = PlotCoordinator::mount(PlotFactor::Humidity, &cache);
        assert!(card.auto_load(None).is_none());
        assert!(card.update_plot(None).is_none());
        assert!(card.download_csv(None).is_none());
        assert!(!card.is_loading_plot());
        assert!(card.buttons_disabled(None));
    }

    #[test]
    fn test_switching_back_reuses_cached_chart() {
        let mut cache: PlotCache<u32> = PlotCache::new();
        let mut fetches = 0;

        let mut wind = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        if wind.auto_load(Some(&inputs())).is_some() {
            fetches += 1;
            wind.complete_plot(Ok(7), &mut cache);
        }
        assert_eq!(wind.displayed(), Some(&7));

        let mut temperature = PlotCoordinator::mount(PlotFactor::Temperature, &cache);
        if temperature.auto_load(Some(&inputs())).is_some() {
            fetches += 1;
            temperature.complete_plot(Ok(8), &mut cache);
        }

        let mut wind_again = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        assert_eq!(wind_again.displayed(), Some(&7));
        assert!(wind_again.auto_load(Some(&inputs())).is_none());
        assert_eq!(fetches, 2);
    }

    #[test]
    fn test_failure_keeps_displayed_chart() {
        let mut cache: PlotCache<u32> = PlotCache::new();
        cache.store(PlotFactor::Precipitation, 1);
        let mut card = PlotCoordinator::mount(PlotFactor::Precipitation, &cache);
        assert!(card.update_plot(Some(&inputs())).is_some());
        card.complete_plot(Err(PLOT_ERROR_FALLBACK.into()), &mut cache);
        assert_eq!(card.displayed(), Some(&1));
        assert_eq!(card.error(), Some(PLOT_ERROR_FALLBACK));
        assert_eq!(cache.get(PlotFactor::Precipitation), Some(&1));
        assert!(!card.is_loading_plot());

        // The next attempt clears the error.
        card.update_plot(Some(&inputs()));
        assert_eq!(card.error(), None);
    }

    #[test]
    fn test_failed_auto_load_does_not_retry_by_itself() {
        let mut cache: PlotCache<u32> = PlotCache::new();
        let mut card = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        card.auto_load(Some(&inputs()));
        card.complete_plot(Err("boom".into()), &mut cache);
        assert!(card.displayed().is_none());
        // A later parameter change re-runs the check, which fetches again.
        assert!(card.auto_load(Some(&inputs())).is_some());
    }

    #[test]
    fn test_cached_chart_survives_parameter_edits() {
        let mut cache: PlotCache<u32> = PlotCache::new();
        cache.store(PlotFactor::Temperature, 3);
        let mut card = PlotCoordinator::mount(PlotFactor::Temperature, &cache);
        let mut edited = inputs();
        edited.settings.half_window_days = 10;
        assert!(card.auto_load(Some(&edited)).is_none());

        let request = card.update_plot(Some(&edited)).unwrap();
        assert_eq!(request.half_window_days, 10);
        let replaced = card.complete_plot(Ok(4), &mut cache);
        assert_eq!(replaced, Some(3));
        assert_eq!(cache.get(PlotFactor::Temperature), Some(&4));
    }

    #[test]
    fn test_overlapping_fetches_last_write_wins() {
        let mut cache: PlotCache<u32> = PlotCache::new();
        let mut card = PlotCoordinator::mount(PlotFactor::Wind, &cache);
        card.auto_load(Some(&inputs()));
        // A second request issued by a host that does not gate on loading.
        card.complete_plot(Ok(1), &mut cache);
        card.complete_plot(Ok(2), &mut cache);
        assert_eq!(card.displayed(), Some(&2));
        assert_eq!(cache.get(PlotFactor::Wind), Some(&2));
    }

    #[test]
    fn test_csv_is_independent_of_cache() {
        let mut cache: PlotCache<u32> = PlotCache::new();
        let mut card = PlotCoordinator::mount(PlotFactor::Humidity, &cache);
        let request = card.download_csv(Some(&inputs())).unwrap();
        assert_eq!(
            request.csv_filename(),
            "series_humidity_0615_2000-2024_win0.csv"
        );
        assert!(card.is_loading_csv());
        assert!(card.buttons_disabled(Some(&inputs())));
        // Chart button is disabled while the CSV is generated.
        assert!(card.update_plot(Some(&inputs())).is_none());

        card.complete_csv(Err(CSV_ERROR_FALLBACK.into()));
        assert_eq!(card.error(), Some(CSV_ERROR_FALLBACK));
        assert!(!card.is_loading_csv());
        assert!(cache.is_empty());
        cache.store(PlotFactor::Humidity, 9);
        card.complete_csv(Ok(()));
        assert_eq!(cache.get(PlotFactor::Humidity), Some(&9));
    }
}
