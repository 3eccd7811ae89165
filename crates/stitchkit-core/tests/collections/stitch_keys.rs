//! Stitches as map keys.

use stitchkit_core::{
    FullStitch, FullStitchKind, LineStitch, LineStitchKind, NodeStitch, NodeStitchKind,
    ObjectedMap, PartStitch, PartStitchDirection, PartStitchKind, Stitch,
};

#[test]
fn test_independently_built_stitches_resolve_to_same_entry() {
    let mut map = ObjectedMap::new();
    map.insert(
        FullStitch {
            x: 10.0,
            y: 10.0,
            palindex: 0,
            kind: FullStitchKind::Full,
        },
        "particle",
    );

    let probe = FullStitch {
        x: 10.0,
        y: 10.0,
        palindex: 0,
        kind: FullStitchKind::Full,
    };
    assert_eq!(map.get(&probe), Some(&"particle"));

    let petite = FullStitch {
        kind: FullStitchKind::Petite,
        ..probe
    };
    assert_eq!(map.get(&petite), None);
}

#[test]
fn test_part_stitch_direction_is_part_of_identity() {
    let forward = PartStitch {
        x: 1.5,
        y: 2.5,
        palindex: 3,
        kind: PartStitchKind::Quarter,
        direction: PartStitchDirection::Forward,
    };
    let backward = PartStitch {
        direction: PartStitchDirection::Backward,
        ..forward
    };

    let map: ObjectedMap<PartStitch, Option<u32>> = ObjectedMap::with_keys([forward, backward]);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_mixed_stitch_enum_keys() {
    let line = Stitch::Line(LineStitch {
        x: [0.0, 1.0],
        y: [0.0, 1.0],
        palindex: 0,
        kind: LineStitchKind::Back,
    });
    let node = Stitch::Node(NodeStitch {
        x: 0.0,
        y: 0.0,
        palindex: 0,
        kind: NodeStitchKind::FrenchKnot,
        rotated: false,
    });

    let mut map = ObjectedMap::new();
    map.insert(line, 1);
    map.insert(node, 2);
    assert_eq!(map.remove(&line), Some(1));
    assert_eq!(map.get(&node), Some(&2));
    assert!(!map.contains_key(&line));
}

#[test]
fn test_large_pattern_preload() {
    let stitches: Vec<_> = (0..200u16)
        .flat_map(|x| {
            (0..200u16).map(move |y| FullStitch {
                x: f32::from(x),
                y: f32::from(y),
                palindex: u32::from((x + y) % 7),
                kind: FullStitchKind::Full,
            })
        })
        .collect();

    let map: ObjectedMap<FullStitch, Option<usize>> = ObjectedMap::with_keys(stitches.clone());
    assert_eq!(map.len(), 40_000);
    assert!(stitches.iter().step_by(997).all(|s| map.contains_key(s)));
}
