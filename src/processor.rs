use crate::config::{Config, ConfigError};
use crate::dicom;
use crate::extract::{extract_tags, ExtractedTags, TagDictionary, TagSource};
use crate::render::RenderResult;
use crate::template::Template;
use dicom_object::ReadError;
use log::{debug, warn};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Read error: {}", .0.to_lowercase())]
    ReadError(String),
}

impl From<ReadError> for Error {
    fn from(err: ReadError) -> Self {
        Error::ReadError(format!("{err}"))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The result of processing one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    /// `false` if the file could not be read as DICOM.
    pub status: bool,

    /// Directory containing the file.
    pub input_path: String,

    /// File name without its directory.
    pub input_filename: String,

    /// The rendered output file stem, if the file could be read.
    pub output_file_stem: Option<String>,

    /// Whether any tag was substituted into the output file stem.
    pub any_substitution: bool,

    /// The extracted tags.
    pub tags: TagDictionary,

    /// The tag names that were looked up, in lookup order.
    pub tags_used: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    fn new(path: &Path) -> Self {
        let input_path = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let input_filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            status: false,
            input_path,
            input_filename,
            output_file_stem: None,
            any_substitution: false,
            tags: TagDictionary::new(),
            tags_used: Vec::new(),
            error: None,
        }
    }

    fn failed(path: &Path, error: Error) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(path)
        }
    }

    fn succeeded(path: &Path, extracted: ExtractedTags, rendered: RenderResult) -> Self {
        Self {
            status: true,
            output_file_stem: Some(rendered.rendered),
            any_substitution: rendered.any_substitution,
            tags: extracted.tags,
            tags_used: extracted.tags_used,
            ..Self::new(path)
        }
    }
}

pub trait Processor {
    fn process_file(&self, path: &Path) -> FileReport;
}

/// Extracts the tags of DICOM files and renders the configured output file stem for each.
///
/// The processor holds only the immutable [`Config`] and the template parsed from it, so one
/// instance can be shared by all worker threads.
#[derive(Debug, Clone, PartialEq)]
pub struct FileProcessor {
    config: Config,
    template: Template,
}

impl FileProcessor {
    /// Creates a new [`FileProcessor`], checking the configuration first.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let template = config.check()?;
        Ok(Self { config, template })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Extracts the configured tags of an already decoded record and renders the output file
    /// stem from them.
    pub fn process_record<S>(&self, record: &S) -> (ExtractedTags, RenderResult)
    where
        S: TagSource + ?Sized,
    {
        let extracted = extract_tags(record, self.config.get_tags());
        let rendered = self.template.render(&extracted.tags);
        (extracted, rendered)
    }
}

impl Processor for FileProcessor {
    /// Reads the file at `path` and processes it.
    ///
    /// A file that cannot be read gives a report with `status` set to `false` and an error
    /// message. No template is rendered for it.
    fn process_file(&self, path: &Path) -> FileReport {
        let obj = match dicom::read_file(path) {
            Ok(obj) => obj,
            Err(e) => {
                let error = Error::from(e);
                warn!("{}: {}", path.display(), error);
                return FileReport::failed(path, error);
            }
        };

        let (extracted, rendered) = self.process_record(&obj);
        debug!("{} -> {}", path.display(), rendered.rendered);
        FileReport::succeeded(path, extracted, rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::extract::NO_ATTRIBUTE;
    use crate::tags;
    use crate::test_utils::{make_file_meta, write_dicom_file};
    use dicom_core::value::Value;
    use dicom_core::VR;
    use dicom_object::mem::InMemElement;
    use dicom_object::FileDicomObject;
    use std::collections::BTreeMap;
    use std::fs;

    #[test]
    fn test_new_rejects_invalid_template() {
        let config = ConfigBuilder::new()
            .output_file_stem("%_upper_PatientID")
            .build();
        assert!(FileProcessor::new(config).is_err());
    }

    #[test]
    fn test_process_record() {
        let config = ConfigBuilder::new()
            .output_file_stem("%PatientAge-%PatientID-output.txt")
            .build();
        let processor = FileProcessor::new(config).unwrap();
        let record: BTreeMap<String, String> = [("PatientAge", "006Y"), ("PatientID", "4412364")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let (extracted, rendered) = processor.process_record(&record);
        assert_eq!(extracted.tags.len(), 2);
        assert_eq!(rendered.rendered, "006Y-4412364-output.txt");
        assert!(rendered.any_substitution);
    }

    #[test]
    fn test_process_record_with_allowlist() {
        let config = ConfigBuilder::new()
            .output_file_stem("%PatientAge-%PatientID")
            .tag("PatientID")
            .build();
        let processor = FileProcessor::new(config).unwrap();
        let record: BTreeMap<String, String> = [("PatientAge", "006Y"), ("PatientID", "4412364")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let (extracted, rendered) = processor.process_record(&record);
        assert_eq!(extracted.tags_used, vec!["PatientID"]);
        // PatientAge was not extracted, so its reference stays as is
        assert_eq!(rendered.rendered, "%PatientAge-4412364");
    }

    #[test]
    fn test_process_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut obj = FileDicomObject::new_empty_with_meta(make_file_meta());
        obj.put(InMemElement::new(
            tags::PATIENT_ID,
            VR::LO,
            Value::from("4412364"),
        ));
        obj.put(InMemElement::new(
            tags::PATIENT_AGE,
            VR::AS,
            Value::from("006Y"),
        ));
        let path = write_dicom_file(dir.path(), "image.dcm", &obj);

        let config = ConfigBuilder::new()
            .output_file_stem("%PatientAge-%PatientID-%StudyDate")
            .tags(vec![
                "PatientAge".into(),
                "PatientID".into(),
                "StudyDate".into(),
            ])
            .build();
        let processor = FileProcessor::new(config).unwrap();
        let report = processor.process_file(&path);

        assert!(report.status);
        assert_eq!(report.input_filename, "image.dcm");
        assert_eq!(report.input_path, dir.path().display().to_string());
        assert_eq!(
            report.output_file_stem.as_deref(),
            Some(format!("006Y-4412364-{NO_ATTRIBUTE}").as_str())
        );
        assert_eq!(report.tags.get("StudyDate"), Some(NO_ATTRIBUTE));
        assert_eq!(report.error, None);
    }

    #[test]
    fn test_process_file_not_dicom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not a dicom file").unwrap();

        let processor = FileProcessor::new(Config::default()).unwrap();
        let report = processor.process_file(&path);

        assert!(!report.status);
        assert_eq!(report.input_filename, "notes.txt");
        assert_eq!(report.output_file_stem, None);
        assert!(report.tags.is_empty());
        assert!(report.error.unwrap().starts_with("Read error"));
    }

    #[test]
    fn test_process_file_missing() {
        let processor = FileProcessor::new(Config::default()).unwrap();
        let report = processor.process_file(Path::new("/does/not/exist.dcm"));
        assert!(!report.status);
        assert_eq!(report.input_path, "/does/not");
        assert_eq!(report.input_filename, "exist.dcm");
    }

    #[test]
    fn test_report_serialization() {
        let processor = FileProcessor::new(Config::default()).unwrap();
        let report = processor.process_file(Path::new("/does/not/exist.dcm"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], false);
        assert_eq!(json["input_filename"], "exist.dcm");
        assert!(json["output_file_stem"].is_null());
        assert!(json["error"].is_string());
    }
}
