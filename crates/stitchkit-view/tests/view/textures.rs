use stitchkit_core::{Bead, DisplayMode, FullStitchKind, NodeStitchKind, PartStitchKind};
use stitchkit_view::TextureManager;

#[test]
fn test_consecutive_requests_share_texture() {
    let mut textures = TextureManager::default();
    let first = textures
        .full_stitch_texture(DisplayMode::Solid, FullStitchKind::Full)
        .unwrap();
    let second = textures
        .full_stitch_texture(DisplayMode::Solid, FullStitchKind::Full)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(textures.stats().synthesized, 1);

    textures.clear();
    let third = textures
        .full_stitch_texture(DisplayMode::Solid, FullStitchKind::Full)
        .unwrap();
    assert_ne!(first, third);
    assert!(textures.get(first).is_none());
    textures.clear();
}

#[test]
fn test_textures_are_keyed_by_mode() {
    let mut textures = TextureManager::default();
    let mut ids = Vec::new();
    for mode in DisplayMode::ALL {
        ids.push(textures.part_stitch_texture(mode, PartStitchKind::Quarter).unwrap());
    }
    ids.dedup();
    assert_eq!(ids.len(), 3);

    textures.retain_mode(DisplayMode::Mixed);
    assert_eq!(textures.stats().live, 1);
    assert!(textures.is_alive(ids[2]));
    textures.clear();
}

#[test]
fn test_mode_shapes_differ() {
    let mut textures = TextureManager::default();
    let solid = textures
        .full_stitch_texture(DisplayMode::Solid, FullStitchKind::Full)
        .unwrap();
    let stitches = textures
        .full_stitch_texture(DisplayMode::Stitches, FullStitchKind::Full)
        .unwrap();

    // Near the top edge, halfway along: filled when solid, empty between the strands.
    let solid_px = textures.get(solid).unwrap().pixmap().pixel(50, 10).unwrap();
    let outline_px = textures.get(stitches).unwrap().pixmap().pixel(50, 10).unwrap();
    assert_eq!(solid_px.alpha(), 255);
    assert_eq!(outline_px.alpha(), 0);
    textures.clear();
}

#[test]
fn test_knot_and_beads_survive_mode_changes() {
    let mut textures = TextureManager::default();
    let knot = textures.node_texture(NodeStitchKind::FrenchKnot, None).unwrap();
    let bead = textures
        .node_texture(NodeStitchKind::Bead, Some(&Bead::default()))
        .unwrap();
    textures.retain_mode(DisplayMode::Stitches);

    assert!(textures.is_alive(knot));
    assert!(textures.is_alive(bead));
    assert_eq!(
        textures.node_texture(NodeStitchKind::FrenchKnot, None).unwrap(),
        knot
    );
    textures.clear();
}
