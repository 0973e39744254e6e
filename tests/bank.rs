mod common;

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use common::{opaque_image, test_bank, test_config};
use dino_runner::sprite::bank::SpriteBank;

#[test]
fn test_base_widths_scale_to_shared_height() {
    let config = test_config(1);
    let bank = test_bank(
        &config,
        vec![vec![
            opaque_image(60, 46),
            opaque_image(90, 46),
            opaque_image(140, 46),
        ]],
    );

    // Base height for player 100 / screen 720 is 92, exactly twice the
    // source height.
    assert_eq!(bank.base_widths(0), &[120, 180, 280]);
    assert_eq!(bank.len(0), 3);
    assert!(bank.is_empty(1));
}

#[test]
fn test_missing_directory_degrades_to_empty() {
    let bank = SpriteBank::load(Path::new("/definitely/not/a/real/path"), 92);
    for level in 0..6 {
        assert!(bank.is_empty(level));
    }
}

#[test]
fn test_load_by_naming_convention() {
    let dir = tempfile::tempdir().unwrap();
    opaque_image(30, 40).save(dir.path().join("bg1_obs1.png")).unwrap();
    opaque_image(50, 40).save(dir.path().join("bg1_obs2.png")).unwrap();
    opaque_image(20, 40).save(dir.path().join("bg2_obs1.png")).unwrap();
    // Broken and unrelated files must be skipped without failing the load.
    fs::write(dir.path().join("bg1_obs3.png"), b"not a png").unwrap();
    fs::write(dir.path().join("readme.txt"), b"ignored").unwrap();

    let bank = SpriteBank::load(dir.path(), 92);
    assert_eq!(bank.len(0), 2);
    assert_eq!(bank.len(1), 1);
    assert!(bank.is_empty(2));

    // Sorted by filename: obs1 (30 wide) before obs2 (50 wide).
    assert_eq!(bank.sprites(0)[0].width(), 30);
    assert_eq!(bank.sprites(0)[1].width(), 50);
}

#[test]
fn test_scale_overrides_by_filename() {
    let dir = tempfile::tempdir().unwrap();
    opaque_image(30, 40).save(dir.path().join("bg3_obs1.png")).unwrap();
    opaque_image(30, 40).save(dir.path().join("bg3_obs2.png")).unwrap();

    let bank = SpriteBank::load(dir.path(), 92);
    assert_eq!(bank.scale_override(2, 0), 1.10);
    assert_eq!(bank.scale_override(2, 1), 1.0);

    // Banks built from memory have no filenames, hence no overrides.
    let config = test_config(1);
    let in_memory = test_bank(&config, vec![vec![opaque_image(30, 40)]]);
    assert_eq!(in_memory.scale_override(0, 0), 1.0);
}
