use pretty_assertions::assert_eq;
use splice::prelude::*;

mod common;
use common::*;

#[test]
fn read_pattern_1() {
    let pattern = Pattern::parse(include_bytes!("../test-asset/pattern_1.splice")).unwrap();

    assert_eq!(pattern.version(), "0.808-alpha");
    assert_eq!(pattern.tempo(), 120.);
    assert_eq!(pattern.tracks().len(), 6);
    assert_eq!(
        pattern.to_string(),
        "Saved with HW Version: 0.808-alpha
Tempo: 120
(0) kick\t|x---|x---|x---|x---|
(1) snare\t|----|x---|----|x---|
(2) clap\t|----|x-x-|----|----|
(3) hh-open\t|--x-|--x-|x-x-|--x-|
(4) hh-close\t|x---|x---|----|x--x|
(5) cowbell\t|----|----|--x-|----|
"
    );
}

#[test]
fn read_pattern_2_keeps_duplicates_in_order() {
    let pattern = Pattern::parse(include_bytes!("../test-asset/pattern_2.splice")).unwrap();

    assert_eq!(pattern.version(), "0.909");
    assert_eq!(pattern.tempo().to_string(), "98.4");

    let ids: Vec<u8> = pattern.tracks().iter().map(Track::id).collect();
    assert_eq!(ids, [40, 1, 40, 99]);

    // the first of the duplicates wins a lookup, both are kept
    let kick = pattern.track(40).unwrap();
    assert_eq!(kick.steps().to_string(), "|x---|----|x---|----|");
    assert_eq!(
        pattern.tracks()[2].steps().to_string(),
        "|x-x-|x-x-|x-x-|x-x-|"
    );

    let unnamed = pattern.track(99).unwrap();
    assert_eq!(unnamed.name(), "");
    assert_eq!(unnamed.steps().active_count(), 0);
}

#[test]
fn read_pattern_ignores_bytes_past_frame() {
    let bytes = include_bytes!("../test-asset/pattern_trailing.splice");
    let pattern = Pattern::parse(bytes).unwrap();

    assert_eq!(pattern.version(), "0.708-alpha");
    assert_eq!(pattern.tempo(), 999.);
    assert_eq!(pattern.tracks().len(), 2);
    assert_eq!(
        pattern.to_string(),
        "Saved with HW Version: 0.708-alpha
Tempo: 999
(1) Kick\t|x---|----|x---|----|
(2) HiHat\t|x-x-|x-x-|x-x-|x-x-|
"
    );
    assert!((pattern.payload_len() as usize) < bytes.len() - 14);
}

#[test]
fn decode_is_deterministic() {
    let bytes = include_bytes!("../test-asset/pattern_1.splice");
    assert_eq!(Pattern::parse(bytes).unwrap(), Pattern::parse(bytes).unwrap());
}

#[test]
fn header_only_frame_has_no_tracks() {
    let bytes = frame("0.808-alpha", 120., &[]);
    assert_eq!(bytes.len(), 14 + 36);

    let pattern = Pattern::parse(&bytes).unwrap();
    assert_eq!(pattern.version(), "0.808-alpha");
    assert_eq!(pattern.tempo(), 120.);
    assert_eq!(pattern.payload_len(), 36);
    assert_eq!(pattern.into_tracks(), Vec::new());
}

#[test]
fn single_kick_renders() {
    let bytes = frame("0.808-alpha", 120., &[record(1, "kick", FOUR_ON_THE_FLOOR)]);
    let pattern = Pattern::parse(&bytes).unwrap();

    assert_eq!(pattern.tracks()[0].to_string(), "(1) kick\t|x---|x---|x---|x---|");
    assert_eq!(
        pattern.tracks()[0],
        Track::new(
            1,
            "kick",
            [
                true, false, false, false, true, false, false, false, true, false, false, false,
                true, false, false, false
            ]
        )
    );
}

#[test]
fn empty_name_track() {
    let bytes = frame("0.808", 60., &[record(7, "", FOUR_ON_THE_FLOOR)]);
    let pattern = Pattern::parse(&bytes).unwrap();

    let track = &pattern.tracks()[0];
    assert_eq!(track.name(), "");
    assert_eq!(track.steps(), &Steps::from_bytes(FOUR_ON_THE_FLOOR));
}

#[test]
fn decode_from_reader() {
    let bytes = include_bytes!("../test-asset/pattern_1.splice");
    let pattern = Pattern::decode(std::io::Cursor::new(&bytes[..])).unwrap();
    assert_eq!(pattern, Pattern::parse(bytes).unwrap());
}

#[test]
fn decode_file_from_disk() {
    let path = std::env::temp_dir().join(format!("splice-decode-{}.splice", std::process::id()));
    std::fs::write(&path, include_bytes!("../test-asset/pattern_1.splice")).unwrap();

    let pattern = decode_file(&path);
    std::fs::remove_file(&path).unwrap();

    let pattern = pattern.unwrap();
    assert_eq!(pattern.tracks().len(), 6);
    assert_eq!(pattern.track(5).unwrap().name(), "cowbell");
}
