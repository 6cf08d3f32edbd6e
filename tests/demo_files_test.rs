//! The shipped demo frames and config stay loadable and classify as documented.

use std::path::Path;
use strictly_rps::{Classification, FileSource, GameConfig, GestureClassifier, Move};

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn test_demo_frames_classify() {
    let config = GameConfig::from_file(demo("strictly_rps.toml")).unwrap();
    let source = FileSource::from_file(demo("frames.json")).unwrap();
    let classifier = GestureClassifier::new(*config.classifier());

    let classes: Vec<_> = source
        .frames()
        .iter()
        .map(|frame| classifier.classify(frame.as_deref()))
        .collect();
    assert_eq!(
        classes,
        vec![
            Classification::Move(Move::Rock),
            Classification::Move(Move::Paper),
            Classification::Move(Move::Scissors),
            Classification::NoHand,
            Classification::Unclear,
        ]
    );
}

#[test]
fn test_demo_config_seed() {
    let config = GameConfig::from_file(demo("strictly_rps.toml")).unwrap();
    assert_eq!(*config.seed(), Some(42));
}
