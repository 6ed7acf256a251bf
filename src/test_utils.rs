use dicom_object::meta::FileMetaTableBuilder;
use dicom_object::{DefaultDicomObject, FileMetaTable};
use std::path::{Path, PathBuf};

pub(crate) fn make_file_meta() -> FileMetaTable {
    FileMetaTableBuilder::new()
        .media_storage_sop_class_uid("1.2.3")
        .media_storage_sop_instance_uid("2.3.4")
        .transfer_syntax("1.2.840.10008.1.2.1") // Explicit VR Little Endian
        .build()
        .unwrap()
}

pub(crate) fn write_dicom_file(dir: &Path, file_name: &str, obj: &DefaultDicomObject) -> PathBuf {
    let path = dir.join(file_name);
    obj.write_to_file(&path).unwrap();
    path
}
