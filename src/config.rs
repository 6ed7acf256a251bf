use crate::template::{Template, TemplateError};
use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const OUTPUT_FILE_STEM_DEFAULT_VALUE: &str = "%PatientID-%SeriesInstanceUID";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<TemplateError> for ConfigError {
    fn from(err: TemplateError) -> Self {
        ConfigError::InvalidTemplate(format!("{err}"))
    }
}

impl From<garde::Report> for ConfigError {
    fn from(err: garde::Report) -> Self {
        ConfigError::InvalidConfig(format!("{err}"))
    }
}

/// Configuration for extracting tags and rendering output file stems.
///
/// A [`Config`] is an immutable snapshot: it is built once, before any file is processed, and
/// then only read.
///
/// # Fields
///
/// * `output_file_stem` - The template used to name outputs, e.g. `%PatientID-%_md5|7_StudyDate`
/// * `tags` - Tag names to extract; all tags are extracted if empty
/// * `extension` - Only process files with this extension (without the dot), if set
/// * `threads` - Number of worker threads, or the number of CPUs if not set
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
pub struct Config {
    #[garde(length(min = 1))]
    output_file_stem: String,

    #[serde(default)]
    #[garde(skip)]
    tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(pattern(r"^[A-Za-z0-9]+$"))]
    extension: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(range(min = 1))]
    threads: Option<usize>,
}

impl Config {
    fn new(output_file_stem: String) -> Self {
        Self {
            output_file_stem,
            tags: Vec::new(),
            extension: None,
            threads: None,
        }
    }

    pub fn get_output_file_stem(&self) -> &str {
        &self.output_file_stem
    }

    pub fn get_tags(&self) -> &[String] {
        &self.tags
    }

    pub fn get_extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn get_threads(&self) -> Option<usize> {
        self.threads
    }

    /// Checks the field constraints and that the output file stem is a valid template.
    ///
    /// Unknown transforms or bad transform arguments in the template are reported here, even
    /// though rendering itself would just skip them.
    pub fn check(&self) -> Result<Template, ConfigError> {
        self.validate()?;
        let template = Template::parse_strict(&self.output_file_stem)?;
        Ok(template)
    }

    /// Returns `true` if the file name matches the extension filter (case-insensitive), or if
    /// there is no filter.
    pub fn accepts_file_name(&self, file_name: &str) -> bool {
        match &self.extension {
            Some(extension) => file_name
                .rsplit_once('.')
                .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(extension)),
            None => true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(OUTPUT_FILE_STEM_DEFAULT_VALUE.into())
    }
}

/// A builder for [`Config`].
///
/// # Example
///
/// ```
/// use dicom_stem::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .output_file_stem("%PatientAge-%_md5|7_PatientID")
///     .tag("PatientAge")
///     .tag("PatientID")
///     .extension("dcm")
///     .threads(4)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBuilder(Config);

impl ConfigBuilder {
    pub fn new() -> Self {
        ConfigBuilder(Config::default())
    }

    /// Starts from an existing [`Config`], e.g. one loaded from a JSON file.
    pub fn from_config(config: Config) -> Self {
        ConfigBuilder(config)
    }

    /// Sets the output file stem template.
    pub fn output_file_stem(mut self, template: impl Into<String>) -> Self {
        self.0.output_file_stem = template.into();
        self
    }

    /// Adds a tag name to extract.
    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.0.tags.push(name.into());
        self
    }

    /// Replaces the tag names to extract. An empty list means all tags.
    pub fn tags(mut self, names: Vec<String>) -> Self {
        self.0.tags = names;
        self
    }

    /// Only process files with the given extension, e.g. `"dcm"`.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.0.extension = Some(extension.into().trim_start_matches('.').to_string());
        self
    }

    /// Sets the number of worker threads.
    pub fn threads(mut self, threads: usize) -> Self {
        self.0.threads = Some(threads);
        self
    }

    pub fn build(self) -> Config {
        self.0
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
