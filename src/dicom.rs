use crate::extract::TagSource;
use crate::tags;
use dicom_core::header::Header;
use dicom_core::{DataDictionary, Tag};
use dicom_dictionary_std::StandardDataDictionary;
use dicom_object::{DefaultDicomObject, OpenFileOptions, ReadError};
use std::path::Path;

// Function to get the tag keyword from the data dictionary
fn get_tag_alias(tag: &Tag) -> Option<&'static str> {
    let data_dict = StandardDataDictionary;
    data_dict.by_tag(*tag).map(|entry| entry.alias)
}

/// Reads a DICOM file, stopping before the pixel data.
///
/// The pixel data is never extracted, so there is no point in loading it.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<DefaultDicomObject, ReadError> {
    OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .open_file(path)
}

impl TagSource for DefaultDicomObject {
    /// Keywords of all top-level data elements with a standard dictionary entry.
    ///
    /// Private and unknown tags have no keyword and are not listed.
    fn tag_names(&self) -> Vec<String> {
        self.iter()
            .filter_map(|elem| get_tag_alias(&elem.tag()))
            .map(String::from)
            .collect()
    }

    fn try_get_tag_value(&self, name: &str) -> Option<String> {
        let elem = self.element_by_name(name).ok()?;
        let value = elem.to_str().ok()?;
        Some(value.trim_matches(|c: char| c.is_whitespace() || c == '\0').to_string())
    }
}
