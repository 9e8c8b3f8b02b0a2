use fsdata_pack_packer::{
    entry::BuildOptions,
    source::{SourceOptions, store_file, store_memory},
};
use fsdata_pack_tests::{
    SourceTable, build_captive_portal, build_captive_portal_cached,
    captive_portal_source_prebuilt,
};
use std::fs;

#[test]
fn builder_builds_source_identical_to_prebuilt() {
    // prebuilt source from data
    let source_prebuilt = captive_portal_source_prebuilt().unwrap();

    // source built from data/captive-portal
    let source = store_memory(build_captive_portal_cached(), &SourceOptions::default()).unwrap();

    assert_eq!(
        String::from_utf8(source).unwrap(),
        String::from_utf8(source_prebuilt).unwrap()
    );
}

#[test]
fn rebuild_is_byte_identical() {
    let source_1 = store_memory(
        &build_captive_portal(&BuildOptions::default()).unwrap(),
        &SourceOptions::default(),
    )
    .unwrap();
    let source_2 = store_memory(
        &build_captive_portal(&BuildOptions::default()).unwrap(),
        &SourceOptions::default(),
    )
    .unwrap();

    assert_eq!(source_1, source_2);
}

#[test]
fn store_file_writes_prebuilt_contents() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("fsdata.c");

    store_file(
        build_captive_portal_cached(),
        &SourceOptions::default(),
        &path,
    )
    .unwrap();

    assert_eq!(
        fs::read(&path).unwrap(),
        captive_portal_source_prebuilt().unwrap()
    );
}

#[test]
fn prebuilt_source_is_consistent() {
    let source = String::from_utf8(captive_portal_source_prebuilt().unwrap()).unwrap();
    let table = SourceTable::parse(&source).unwrap();
    let fsdata = build_captive_portal_cached();

    // one array and one record per file
    assert_eq!(table.count, fsdata.len());
    assert_eq!(table.data_lengths.len(), table.count);
    assert_eq!(table.records.len(), table.count);

    // walking from FS_ROOT visits every record once and ends at NULL
    let walked = table.walk().unwrap();
    assert_eq!(walked.len(), table.count);

    // records point into their arrays, past the name
    for (record, file) in walked.iter().zip(fsdata.walk()) {
        assert_eq!(record.identifier, file.identifier);
        assert_eq!(record.name_length, file.name_length());
        assert_eq!(table.data_lengths[&record.identifier], file.entry.data.len());
    }
}
