use thiserror::Error;

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// End-of-description markers. The second entry catches the label when the
/// table renderer split the word across cells.
pub(crate) const DEFAULT_STOP_LABELS: [&str; 2] = ["reasonable expected outcome", "reasonab"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("label for {field} must not be empty")]
    EmptyLabel { field: &'static str },
    #[error("{field} must be positive, got {value}")]
    NonPositiveThreshold { field: &'static str, value: f32 },
}

/// Configuration for booklet table extraction.
///
/// Labels are matched by case-insensitive substring containment against
/// whitespace-normalized cells. Use [`TableParsingConfigBuilder`] to
/// construct with validation.
#[derive(Debug, Clone)]
pub struct TableParsingConfig {
    // ── tables.rs ──
    /// Label starting a new record; its value is the project title.
    pub(crate) title_label: String,
    /// Label for the record's theme field. The default also matches
    /// "primary theme" via substring containment.
    pub(crate) theme_label: String,
    /// Label for the supervisors field.
    pub(crate) supervisors_label: String,
    /// Label starting multi-row description accumulation.
    pub(crate) description_label: String,
    /// Labels that terminate description accumulation.
    pub(crate) description_stop_labels: ListOverride<String>,
    /// Cells with more words than this are never treated as labels.
    pub(crate) max_label_cell_words: usize,

    // ── rows.rs ──
    /// Vertical distance (pt) between block top edges within one table row.
    pub(crate) row_gap_threshold: f32,
    /// Horizontal gap (pt) below which adjacent blocks merge into one cell.
    pub(crate) cell_gap_threshold: f32,

    // ── marker.rs ──
    /// Marker string for the flat-text fallback extractor.
    pub(crate) description_marker: String,
    /// Word cap applied to fallback-extracted descriptions.
    pub(crate) max_description_words: usize,
}

impl Default for TableParsingConfig {
    fn default() -> Self {
        Self {
            title_label: "project no & title".to_string(),
            theme_label: "theme".to_string(),
            supervisors_label: "supervisors".to_string(),
            description_label: "project description".to_string(),
            description_stop_labels: ListOverride::Default,
            max_label_cell_words: 6,
            row_gap_threshold: 4.0,
            cell_gap_threshold: 18.0,
            description_marker: "Project Description:".to_string(),
            max_description_words: 100,
        }
    }
}

impl TableParsingConfig {
    /// Stop labels with overrides applied, lowercased for matching.
    pub(crate) fn stop_labels(&self) -> Vec<String> {
        let defaults: Vec<String> = DEFAULT_STOP_LABELS.iter().map(|s| s.to_string()).collect();
        self.description_stop_labels
            .resolve(&defaults)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect()
    }

    pub fn max_description_words(&self) -> usize {
        self.max_description_words
    }
}

/// Builder for [`TableParsingConfig`]. Fails fast on empty labels and
/// non-positive thresholds.
#[derive(Debug, Clone, Default)]
pub struct TableParsingConfigBuilder {
    title_label: Option<String>,
    theme_label: Option<String>,
    supervisors_label: Option<String>,
    description_label: Option<String>,
    description_stop_labels: ListOverride<String>,
    max_label_cell_words: Option<usize>,
    row_gap_threshold: Option<f32>,
    cell_gap_threshold: Option<f32>,
    description_marker: Option<String>,
    max_description_words: Option<usize>,
}

impl TableParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Labels ──

    pub fn title_label(mut self, label: &str) -> Self {
        self.title_label = Some(label.to_string());
        self
    }

    pub fn theme_label(mut self, label: &str) -> Self {
        self.theme_label = Some(label.to_string());
        self
    }

    pub fn supervisors_label(mut self, label: &str) -> Self {
        self.supervisors_label = Some(label.to_string());
        self
    }

    pub fn description_label(mut self, label: &str) -> Self {
        self.description_label = Some(label.to_string());
        self
    }

    pub fn set_stop_labels(mut self, labels: Vec<String>) -> Self {
        self.description_stop_labels = ListOverride::Replace(labels);
        self
    }

    pub fn add_stop_label(mut self, label: String) -> Self {
        match &mut self.description_stop_labels {
            ListOverride::Extend(v) => v.push(label),
            _ => self.description_stop_labels = ListOverride::Extend(vec![label]),
        }
        self
    }

    // ── Scalars ──

    pub fn max_label_cell_words(mut self, n: usize) -> Self {
        self.max_label_cell_words = Some(n);
        self
    }

    pub fn row_gap_threshold(mut self, pt: f32) -> Self {
        self.row_gap_threshold = Some(pt);
        self
    }

    pub fn cell_gap_threshold(mut self, pt: f32) -> Self {
        self.cell_gap_threshold = Some(pt);
        self
    }

    pub fn description_marker(mut self, marker: &str) -> Self {
        self.description_marker = Some(marker.to_string());
        self
    }

    pub fn max_description_words(mut self, n: usize) -> Self {
        self.max_description_words = Some(n);
        self
    }

    /// Validate and produce a [`TableParsingConfig`].
    pub fn build(self) -> Result<TableParsingConfig, ConfigError> {
        let defaults = TableParsingConfig::default();

        let label = |value: Option<String>,
                     default: String,
                     field: &'static str|
         -> Result<String, ConfigError> {
            let v = value.unwrap_or(default);
            if v.trim().is_empty() {
                return Err(ConfigError::EmptyLabel { field });
            }
            Ok(v)
        };

        let threshold =
            |value: Option<f32>, default: f32, field: &'static str| -> Result<f32, ConfigError> {
                let v = value.unwrap_or(default);
                if v <= 0.0 {
                    return Err(ConfigError::NonPositiveThreshold { field, value: v });
                }
                Ok(v)
            };

        Ok(TableParsingConfig {
            title_label: label(self.title_label, defaults.title_label, "title")?
                .to_lowercase(),
            theme_label: label(self.theme_label, defaults.theme_label, "theme")?.to_lowercase(),
            supervisors_label: label(
                self.supervisors_label,
                defaults.supervisors_label,
                "supervisors",
            )?
            .to_lowercase(),
            description_label: label(
                self.description_label,
                defaults.description_label,
                "description",
            )?
            .to_lowercase(),
            description_stop_labels: self.description_stop_labels,
            max_label_cell_words: self
                .max_label_cell_words
                .unwrap_or(defaults.max_label_cell_words),
            row_gap_threshold: threshold(
                self.row_gap_threshold,
                defaults.row_gap_threshold,
                "row_gap_threshold",
            )?,
            cell_gap_threshold: threshold(
                self.cell_gap_threshold,
                defaults.cell_gap_threshold,
                "cell_gap_threshold",
            )?,
            description_marker: label(
                self.description_marker,
                defaults.description_marker,
                "description_marker",
            )?,
            max_description_words: self
                .max_description_words
                .unwrap_or(defaults.max_description_words),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TableParsingConfig::default();
        assert_eq!(config.title_label, "project no & title");
        assert_eq!(config.max_label_cell_words, 6);
        assert!((config.row_gap_threshold - 4.0).abs() < f32::EPSILON);
        assert_eq!(config.max_description_words, 100);
    }

    #[test]
    fn test_builder_basic() {
        let config = TableParsingConfigBuilder::new()
            .title_label("Projekt Nr & Titel")
            .max_description_words(50)
            .build()
            .unwrap();
        assert_eq!(config.title_label, "projekt nr & titel");
        assert_eq!(config.max_description_words, 50);
        // untouched fields keep defaults
        assert_eq!(config.supervisors_label, "supervisors");
    }

    #[test]
    fn test_builder_rejects_empty_label() {
        let result = TableParsingConfigBuilder::new().title_label("  ").build();
        assert!(matches!(result, Err(ConfigError::EmptyLabel { .. })));
    }

    #[test]
    fn test_builder_rejects_non_positive_threshold() {
        let result = TableParsingConfigBuilder::new()
            .row_gap_threshold(0.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::NonPositiveThreshold { .. })
        ));
    }

    #[test]
    fn test_stop_label_extend_and_replace() {
        let extended = TableParsingConfigBuilder::new()
            .add_stop_label("remit".to_string())
            .build()
            .unwrap();
        let labels = extended.stop_labels();
        assert!(labels.contains(&"reasonable expected outcome".to_string()));
        assert!(labels.contains(&"remit".to_string()));

        let replaced = TableParsingConfigBuilder::new()
            .set_stop_labels(vec!["outcomes".to_string()])
            .build()
            .unwrap();
        assert_eq!(replaced.stop_labels(), vec!["outcomes".to_string()]);
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<String> = ListOverride::Replace(vec!["x".to_string()]);
        assert_eq!(r.resolve(&defaults), vec!["x".to_string()]);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(
            e.resolve(&defaults),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
