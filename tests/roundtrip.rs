//! Property tests: documents built through the API survive save and load

use std::fs;

use inidata::{DataFile, DataFileError, Section};
use proptest::prelude::*;
use tempfile::TempDir;

/// One write against the store: (section, key, value, comment)
type Assignment = (String, String, String, String);

fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z][A-Za-z0-9_.]{0,8}",
        // Padding, indicators, brackets and line breaks anywhere in the name
        1 => "[ \t]{0,2}[A-Za-z;#=:\\[\\]][A-Za-z0-9 =:;#\\[\\]\n]{0,6}[ \t]{0,2}",
    ]
}

fn value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z0-9]([A-Za-z0-9 =:;#/_.-]{0,12}[A-Za-z0-9])?",
        // Outer whitespace and line breaks
        "[ \t]{0,2}[A-Za-z0-9 =:;#\\[\\]\n\r]{0,10}[ \t]{0,2}",
    ]
}

fn comment() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "; [a-z ]{0,10}[a-z]", "# [a-z]{1,6}"]
}

fn writes() -> impl Strategy<Value = Vec<Assignment>> {
    let section = prop_oneof![Just(String::new()), name()];
    prop::collection::vec((section, name(), value(), comment()), 0..20)
}

/// Applies every write, keeping only the ones the store accepted
fn build(writes: &[Assignment]) -> (DataFile, Vec<Assignment>) {
    let mut file = DataFile::new();
    let mut accepted = Vec::new();
    for write in writes {
        let (section, key, value, comment) = write;
        match file.set_value(key, value, comment, section) {
            Ok(()) => accepted.push(write.clone()),
            Err(
                DataFileError::InvalidKeyName(_)
                | DataFileError::InvalidSectionName(_)
                | DataFileError::InvalidValue(_),
            ) => {}
            Err(e) => panic!("unexpected error for {:?}: {}", write, e),
        }
    }
    (file, accepted)
}

fn document(writes: &[Assignment]) -> DataFile {
    build(writes).0
}

fn snapshot(file: &DataFile) -> Vec<Section> {
    file.sections().cloned().collect()
}

proptest! {
    #[test]
    fn save_then_load_reproduces_document(writes in writes()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prop.ini");

        let mut file = document(&writes);
        file.set_file_name(&path);
        file.save().unwrap();

        let loaded = DataFile::open(&path).unwrap();
        prop_assert_eq!(snapshot(&loaded), snapshot(&file));
        prop_assert_eq!(loaded.key_count(), file.key_count());
    }

    #[test]
    fn saving_twice_is_byte_identical(writes in writes()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("twice.ini");

        let mut file = document(&writes);
        file.set_file_name(&path);
        file.save().unwrap();
        let first = fs::read(&path).unwrap();
        file.save().unwrap();
        let second = fs::read(&path).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn rendering_is_a_fixed_point(writes in writes()) {
        let text = document(&writes).render();
        prop_assert_eq!(DataFile::from_text(&text).render(), text);
    }

    #[test]
    fn lookups_ignore_case(writes in writes()) {
        let (file, accepted) = build(&writes);
        for (section, key, _, _) in &accepted {
            let upper = file.get_value(&key.to_uppercase(), &section.to_uppercase());
            let lower = file.get_value(&key.to_lowercase(), &section.to_lowercase());
            prop_assert!(upper.is_some());
            prop_assert_eq!(upper, lower);
        }
    }

    #[test]
    fn accepted_writes_read_back_under_trimmed_names(writes in writes()) {
        let (file, accepted) = build(&writes);
        let loaded = DataFile::from_text(&file.render());
        for (section, key, _, _) in &accepted {
            let found = loaded.find_key(key, section);
            prop_assert!(found.is_some());
            prop_assert_eq!(
                found.map(|k| k.name.to_lowercase()),
                Some(key.trim().to_lowercase())
            );
        }
    }

    #[test]
    fn only_unrepresentable_writes_are_rejected(write in (name(), name(), value(), comment())) {
        let (section, key, value, comment) = &write;
        let mut file = DataFile::new();
        if file.set_value(key, value, comment, section).is_err() {
            let key = key.trim();
            prop_assert!(
                key.is_empty()
                    || key.starts_with([';', '#', '['])
                    || key.contains(['=', ':', '\n', '\r'])
                    || section.contains(['[', ']', '\n', '\r'])
                    || value.trim().contains(['\n', '\r']),
                "{:?} was rejected",
                write
            );
            prop_assert_eq!(file.key_count(), 0);
            prop_assert!(!file.is_dirty());
        }
    }
}
