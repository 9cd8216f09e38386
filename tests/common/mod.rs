// Shared fixtures for metmap integration tests
#![allow(dead_code)]

use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};

/// Form feed between pages, as in pre-extracted text documents
pub const PAGE_BREAK: &str = "\u{000C}";

/// Two pages of compendium rows in the published layout.
pub const SAMPLE_COMPENDIUM: &str = indoc! {"
    Major Heading Activity Code METs Activity Description
    Bicycling 01003 14.0 bicycling, mountain, uphill, vigorous
    Bicycling 01010 5.8 bicycling, <10 mph, leisure, to work or for pleasure
    Bicycling 01015 7.5 bicycling, general
    Bicycling 02010 6.8 bicycling, stationary, general
    Conditioning Exercise 02030 3.5 calisthenics, light effort, 10 lb weights
    Conditioning Exercise 02150 2.5 yoga, Hatha
    Dancing 03010 5.0 ballet, modern, or jazz, general
    Inactivity 07010 1.0 lying quietly, watching television
"};

pub const SAMPLE_COMPENDIUM_PAGE_2: &str = indoc! {"
    Major Heading Activity Code METs Activity Description
    Running 12020 7.0 jogging, general
    Running 12030 8.3 running, 5 mph (12 min/mile)
    Running 12150 9.8 running, 6 mph (10 min/mile)
    Running 12190 11.8 running, 8 mph (7.5 min/mile)
    Sports 15230 8.0 football, competitive
    Sports 15680 7.3 tennis, singles
    Walking 17160 2.0 walking for pleasure
    Walking 17080 5.3 hiking, cross country
    Water Activities 18310 9.8 swimming laps, freestyle, fast
    Home Activities 05010 3.3 cleaning, sweeping carpet or floors
"};

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Both sample pages joined into one text document.
pub fn write_sample_document(dir: &Path) -> PathBuf {
    let text = format!(
        "{}{}{}",
        SAMPLE_COMPENDIUM, PAGE_BREAK, SAMPLE_COMPENDIUM_PAGE_2
    );
    write_file(dir, "compendium.txt", &text)
}
