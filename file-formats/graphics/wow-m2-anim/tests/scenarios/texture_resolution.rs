//! Texture lookup against extracted asset directory layouts

use std::fs::{self, File};
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wow_m2_anim::M2Model;
use wow_m2_anim::chunks::{TextureSlot, TextureType};
use wow_m2_anim::texture_resolver::{
    ResolvedTextures, TextureKey, TextureSearchOptions, resolve_model_textures, resolve_textures,
};

fn touch(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for name in names {
        File::create(dir.join(name)).unwrap();
    }
}

#[test]
fn paired_skin_variant_wins_over_higher_unpaired() {
    let dir = TempDir::new().unwrap();
    touch(
        dir.path(),
        &["HeroSkin00.blp", "HeroSkin00_Extra.blp", "HeroSkin01.blp"],
    );

    let resolved = resolve_textures(dir.path(), "Hero", &[]);
    let expected: ResolvedTextures = [
        (TextureKey::Type(TextureType::Body), dir.path().join("HeroSkin00.blp")),
        (
            TextureKey::Type(TextureType::SkinExtra),
            dir.path().join("HeroSkin00_Extra.blp"),
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(resolved, expected);
}

#[test]
fn embedded_path_found_one_level_up() {
    let root = TempDir::new().unwrap();
    let models = root.path().join("Models");
    touch(&models, &[]);
    touch(&root.path().join("Creature").join("Bear"), &["BearSkin.blp"]);

    let model = M2Model {
        name: "Bear".to_string(),
        textures: vec![TextureSlot::hardcoded("Creature\\Bear\\BearSkin.blp")],
        ..Default::default()
    };
    let resolved =
        resolve_model_textures(&model, models.join("Bear.m2"), &TextureSearchOptions::default());

    assert_eq!(resolved.len(), 1);
    assert_eq!(
        resolved[&TextureKey::Slot(0)],
        root.path().join("Creature/Bear/BearSkin.blp")
    );
}

#[test]
fn character_model_mixes_both_strategies() {
    let root = TempDir::new().unwrap();
    let model_dir = root.path().join("Character").join("Tauren").join("Female");
    touch(
        &model_dir,
        &[
            "TaurenFemale.m2",
            "TaurenFemaleSkin00_00.blp",
            "TaurenFemaleSkin00_00_Extra.blp",
            "TaurenFemaleSkin00_07.blp",
            "TaurenFemaleSkin00_07_Extra.blp",
        ],
    );
    touch(&root.path().join("Item").join("ObjectComponents").join("Cape"), &["Cape_Red.blp"]);

    let model = M2Model {
        name: "Character\\Tauren\\Female\\TaurenFemale.m2\0".to_string(),
        textures: vec![
            TextureSlot::replaceable(TextureType::Body),
            TextureSlot::replaceable(TextureType::Hair),
            TextureSlot::replaceable(TextureType::SkinExtra),
            TextureSlot::hardcoded("Item\\ObjectComponents\\Cape\\Cape_Red.blp\0"),
            TextureSlot::hardcoded("Item\\Missing.blp"),
        ],
        ..Default::default()
    };
    let resolved = resolve_model_textures(
        &model,
        model_dir.join("TaurenFemale.m2"),
        &TextureSearchOptions::default(),
    );

    let keys: Vec<_> = resolved.keys().copied().collect();
    assert_eq!(
        keys,
        vec![TextureKey::Slot(0), TextureKey::Slot(2), TextureKey::Slot(3)]
    );
    assert_eq!(
        resolved[&TextureKey::Slot(0)],
        model_dir.join("TaurenFemaleSkin00_07.blp")
    );
    assert_eq!(
        resolved[&TextureKey::Slot(2)],
        model_dir.join("TaurenFemaleSkin00_07_Extra.blp")
    );
    assert_eq!(
        resolved[&TextureKey::Slot(3)],
        root.path().join("Item/ObjectComponents/Cape/Cape_Red.blp")
    );
}

#[test]
fn missing_directory_resolves_nothing() {
    let root = TempDir::new().unwrap();
    let slots = vec![
        TextureSlot::replaceable(TextureType::Body),
        TextureSlot::hardcoded("Creature\\Ghost\\Ghost.blp"),
    ];

    let resolved = resolve_textures(root.path().join("gone"), "Ghost", &slots);
    assert!(resolved.is_empty());
}
