use stitchkit_core::{
    Color, DisplayMode, FullStitch, FullStitchKind, PaletteItem, PartStitch, PartStitchDirection,
    PartStitchKind, Pattern, PatternProject, SpecialStitch, SpecialStitchModel, Stitch,
};
use stitchkit_settings::RenderSettings;
use stitchkit_view::{PatternView, RenderContext, StageKind, StageRef};

fn palette_item(color: Color) -> PaletteItem {
    PaletteItem {
        brand: "DMC".to_string(),
        number: "321".to_string(),
        name: "Red".to_string(),
        color,
        blends: None,
        bead: None,
        symbol_font: None,
        symbol: None,
    }
}

fn project(fullstitches: Vec<FullStitch>) -> PatternProject {
    PatternProject {
        key: "e2e".to_string(),
        pattern: Pattern {
            palette: vec![palette_item(Color::rgb(0xC7, 0x2B, 0x3B))],
            fullstitches,
            ..Pattern::default()
        },
        ..PatternProject::default()
    }
}

fn full_stitch() -> FullStitch {
    FullStitch {
        x: 10.0,
        y: 10.0,
        palindex: 0,
        kind: FullStitchKind::Full,
    }
}

fn particle_count(view: &PatternView, kind: StageKind) -> usize {
    match view.stage(kind) {
        StageRef::Particles(particles) => particles.len(),
        other => panic!("{kind:?} is not a particle stage: {other:?}"),
    }
}

#[test]
fn test_single_full_stitch_end_to_end() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = PatternView::new(project(vec![full_stitch()]));
    assert_eq!((view.fabric().width, view.fabric().height), (100, 100));

    view.attach(&mut ctx).unwrap();

    let StageRef::Particles(particles) = view.stage(StageKind::FullStitches) else {
        panic!("full stitch stage holds particles");
    };
    assert_eq!(particles.len(), 1);
    let particle = particles.particles().next().unwrap();
    assert_eq!(particle.tint, view.palette()[0].color());
    assert_eq!((particle.x, particle.y), (10.0, 10.0));

    view.remove_stitch(Stitch::Full(full_stitch()));
    assert_eq!(particle_count(&view, StageKind::FullStitches), 0);
    assert!(!view.contains_stitch(&Stitch::Full(full_stitch())));
    assert_eq!(view.stitch_count(), 0);

    view.destroy(&mut ctx);
    assert_eq!(ctx.textures.stats().live, 0);
}

#[test]
fn test_structurally_equal_stitch_is_found() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = PatternView::new(project(vec![full_stitch()]));
    view.attach(&mut ctx).unwrap();

    let rebuilt = FullStitch {
        x: 10.0,
        y: 10.0,
        palindex: 0,
        kind: FullStitchKind::Full,
    };
    assert!(view.is_realized(&Stitch::Full(rebuilt)));
    view.remove_full_stitch(&rebuilt);
    assert_eq!(particle_count(&view, StageKind::FullStitches), 0);
    view.destroy(&mut ctx);
}

#[test]
#[should_panic(expected = "is not in the pattern view")]
fn test_removing_unknown_stitch_panics() {
    let mut view = PatternView::new(project(Vec::new()));
    view.remove_stitch(Stitch::Full(full_stitch()));
}

#[test]
fn test_stage_order() {
    let mut view = PatternView::new(project(Vec::new()));
    let kinds: Vec<StageKind> = view.stages().into_iter().map(|(kind, _)| kind).collect();
    assert_eq!(
        kinds,
        vec![
            StageKind::Fabric,
            StageKind::FullStitches,
            StageKind::Petites,
            StageKind::HalfStitches,
            StageKind::Quarters,
            StageKind::Grid,
            StageKind::SpecialStitches,
            StageKind::Lines,
            StageKind::Nodes,
        ]
    );

    view.set_show_symbols(true);
    let kinds: Vec<StageKind> = view.stages().into_iter().map(|(kind, _)| kind).collect();
    assert_eq!(kinds, StageKind::ORDER.to_vec());
}

#[test]
fn test_stitches_land_on_their_stage() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = PatternView::new(project(Vec::new()));
    view.attach(&mut ctx).unwrap();

    view.add_full_stitch(FullStitch {
        x: 3.5,
        y: 3.5,
        palindex: 0,
        kind: FullStitchKind::Petite,
    });
    for (kind, direction) in [
        (PartStitchKind::Half, PartStitchDirection::Forward),
        (PartStitchKind::Quarter, PartStitchDirection::Backward),
        (PartStitchKind::Quarter, PartStitchDirection::Forward),
    ] {
        view.add_part_stitch(PartStitch {
            x: 5.0,
            y: 5.0,
            palindex: 0,
            kind,
            direction,
        });
    }

    assert_eq!(particle_count(&view, StageKind::FullStitches), 0);
    assert_eq!(particle_count(&view, StageKind::Petites), 1);
    assert_eq!(particle_count(&view, StageKind::HalfStitches), 1);
    assert_eq!(particle_count(&view, StageKind::Quarters), 2);
    view.destroy(&mut ctx);
}

#[test]
fn test_display_mode_switch_swaps_textures() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = PatternView::new(project(vec![full_stitch()]));
    view.attach(&mut ctx).unwrap();
    assert_eq!(ctx.textures.stats().live, 4);

    let StageRef::Particles(particles) = view.stage(StageKind::FullStitches) else {
        panic!("full stitch stage holds particles");
    };
    let solid = particles.texture().unwrap();

    view.set_display_mode(&mut ctx, DisplayMode::Stitches).unwrap();
    assert_eq!(view.display_mode(), DisplayMode::Stitches);

    let StageRef::Particles(particles) = view.stage(StageKind::FullStitches) else {
        panic!("full stitch stage holds particles");
    };
    let stitches = particles.texture().unwrap();
    assert_ne!(solid, stitches);
    assert!(!ctx.textures.is_alive(solid));
    assert!(ctx.textures.is_alive(stitches));
    assert_eq!(ctx.textures.stats().live, 4);
    assert_eq!(particles.len(), 1);

    view.destroy(&mut ctx);
}

#[test]
fn test_set_fabric_redraws() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = PatternView::new(project(Vec::new()));
    view.attach(&mut ctx).unwrap();

    let mut fabric = view.fabric().clone();
    fabric.width = 20;
    fabric.color = Color::rgb(0xEE, 0xE8, 0xD5);
    view.set_fabric(fabric);

    let StageRef::Graphics(graphics) = view.stage(StageKind::Fabric) else {
        panic!("fabric stage is a graphics node");
    };
    assert_eq!(graphics.commands().len(), 1);
    assert!(graphics.contains(stitchkit_core::Point::new(19.5, 50.0)));
    assert!(!graphics.contains(stitchkit_core::Point::new(21.0, 50.0)));
    view.destroy(&mut ctx);
}

#[test]
fn test_special_stitches_render_on_their_stage() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut project = project(Vec::new());
    project.pattern.special_stitch_models = vec![SpecialStitchModel {
        unique_name: "heart".to_string(),
        name: "Heart".to_string(),
        ..SpecialStitchModel::default()
    }];
    let mut view = PatternView::new(project);

    view.add_special_stitch(SpecialStitch {
        x: 1.0,
        y: 1.0,
        rotation: 0,
        flip: [false, false],
        palindex: 0,
        modindex: 0,
    });
    view.attach(&mut ctx).unwrap();

    let StageRef::Container(container) = view.stage(StageKind::SpecialStitches) else {
        panic!("special stitch stage is a container");
    };
    assert_eq!(container.len(), 1);
    assert_eq!(view.stitch_count(), 1);
    view.destroy(&mut ctx);
}

#[test]
#[should_panic(expected = "special stitch model 3 is not in the pattern view")]
fn test_special_stitch_requires_model() {
    let mut view = PatternView::new(project(Vec::new()));
    view.add_special_stitch(SpecialStitch {
        x: 1.0,
        y: 1.0,
        rotation: 0,
        flip: [false, false],
        palindex: 0,
        modindex: 3,
    });
}

#[test]
fn test_attach_assigns_batched_textures() {
    let mut ctx = RenderContext::headless(&RenderSettings::default());
    let mut view = PatternView::new(project(vec![full_stitch()]));
    view.attach(&mut ctx).unwrap();

    for kind in [
        StageKind::FullStitches,
        StageKind::Petites,
        StageKind::HalfStitches,
        StageKind::Quarters,
    ] {
        let StageRef::Particles(particles) = view.stage(kind) else {
            panic!("{kind:?} holds particles");
        };
        let texture = particles.texture().expect("texture set on attach");
        assert!(ctx.textures.is_alive(texture));
    }

    view.render(&mut ctx).unwrap();
    let StageRef::Particles(particles) = view.stage(StageKind::FullStitches) else {
        panic!("full stitch stage holds particles");
    };
    assert!(particles.texture().is_some());
    assert_eq!(particles.len(), 1);
    view.destroy(&mut ctx);
}

#[test]
fn test_unset_display_settings_fall_back_to_render_settings() {
    let settings = RenderSettings {
        display_mode: DisplayMode::Mixed,
        default_symbol_font: "CrossStitch3".to_string(),
        ..RenderSettings::default()
    };
    let mut ctx = RenderContext::headless(&settings);
    let mut view = PatternView::new(project(Vec::new()));
    assert_eq!(view.default_symbol_font(), stitchkit_core::constants::DEFAULT_SYMBOL_FONT);

    view.attach(&mut ctx).unwrap();
    assert_eq!(view.display_mode(), DisplayMode::Mixed);
    assert_eq!(view.default_symbol_font(), "CrossStitch3");
    view.destroy(&mut ctx);
}

#[test]
fn test_pattern_display_settings_win_over_render_settings() {
    let settings = RenderSettings {
        display_mode: DisplayMode::Mixed,
        default_symbol_font: "CrossStitch3".to_string(),
        ..RenderSettings::default()
    };
    let mut ctx = RenderContext::headless(&settings);
    let mut project = project(Vec::new());
    project.display_settings.display_mode = Some(DisplayMode::Stitches);
    project.display_settings.default_symbol_font = Some("Ursasoftware".to_string());
    let mut view = PatternView::new(project);

    view.attach(&mut ctx).unwrap();
    assert_eq!(view.display_mode(), DisplayMode::Stitches);
    assert_eq!(view.default_symbol_font(), "Ursasoftware");
    view.destroy(&mut ctx);
}

#[test]
fn test_failed_attach_leaves_view_detached() {
    let settings = RenderSettings {
        resolution: 0.0,
        ..RenderSettings::default()
    };
    let mut ctx = RenderContext::headless(&settings);
    let mut view = PatternView::new(project(vec![full_stitch()]));

    assert!(view.attach(&mut ctx).is_err());
    assert!(!view.is_attached());
    assert!(!view.is_realized(&Stitch::Full(full_stitch())));
    assert_eq!(particle_count(&view, StageKind::FullStitches), 0);

    let petite = FullStitch {
        x: 1.5,
        y: 1.5,
        palindex: 0,
        kind: FullStitchKind::Petite,
    };
    view.add_full_stitch(petite);
    assert!(view.contains_stitch(&Stitch::Full(petite)));
    assert!(!view.is_realized(&Stitch::Full(petite)));
    assert_eq!(particle_count(&view, StageKind::Petites), 0);
    view.destroy(&mut ctx);
}
