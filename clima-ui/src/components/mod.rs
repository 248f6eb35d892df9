//! Reusable Dioxus RSX components for the climate factors app.

mod analysis_form;
mod error_display;
mod factor_selector;
mod factors_view;
mod loading_screen;
mod plot_card;
mod results_card;
mod toast;

pub use analysis_form::AnalysisForm;
pub use error_display::ErrorDisplay;
pub use factor_selector::FactorSelector;
pub use factors_view::FactorsView;
pub use loading_screen::LoadingScreen;
pub use plot_card::PlotCard;
pub use results_card::ResultsCard;
pub use toast::Toast;
