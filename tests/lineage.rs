mod common;

use common::WorldBuilder;
use descent_core::{DescentError, Lineage, OrganismRef, World};
use proptest::prelude::*;

fn chain_world(genomes: &[u8]) -> (World<u8>, OrganismRef) {
    let mut world = World::with_seed(9);
    let mut tip = world.found(genomes[0], 1.0);
    for &g in &genomes[1..] {
        tip = world.give_birth(&[tip], g, 1.0).unwrap();
    }
    (world, tip)
}

#[test]
fn test_lineage_of_dead_ancestor_still_resolves() {
    let (world, refs) = WorldBuilder::new().founder().chain(0, 4).alive_only(&[4]).build();
    let lod = Lineage::of(world.ancestry(), refs[2]).unwrap();
    assert_eq!(lod.as_slice(), &refs[..3]);
}

#[test]
fn test_sexual_birth_is_rejected() {
    let mut world = World::with_seed(1);
    let a = world.found(0u8, 1.0);
    let b = world.found(1u8, 1.0);
    let c = world.give_birth(&[a, b], 2, 1.0).unwrap();
    let d = world.give_birth(&[c], 3, 1.0).unwrap();

    assert_eq!(world.ancestry().parents(c).count(), 2);
    assert_eq!(
        Lineage::of(world.ancestry(), d),
        Err(DescentError::MultipleParentsUnsupported { organism: c })
    );
}

#[test]
fn test_dedup_leaves_graph_untouched() {
    let (world, tip) = chain_world(&[1, 1, 1, 2]);
    let links = world.ancestry().link_count();
    let mut lod = Lineage::of(world.ancestry(), tip).unwrap();
    lod.uniq(world.ancestry()).unwrap();
    lod.remove_default_ancestor();
    assert_eq!(world.ancestry().link_count(), links);
    assert_eq!(world.ancestry().len(), 4);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_lineage_runs_root_to_organism(
        parents in prop::collection::vec(any::<prop::sample::Index>(), 1..60),
        pick in any::<prop::sample::Index>(),
    ) {
        let parents: Vec<Option<usize>> = parents
            .iter()
            .enumerate()
            .map(|(i, idx)| (i > 0).then(|| idx.index(i)))
            .collect();
        let (world, refs) = WorldBuilder::from_parents(&parents).build();
        let x = refs[pick.index(refs.len())];

        let lod = Lineage::of(world.ancestry(), x).unwrap();
        prop_assert_eq!(lod.last(), Some(x));
        prop_assert!(!world.ancestry().has_parents(lod.first().unwrap()));
        prop_assert_eq!(lod.len(), world.organism(x).unwrap().depth + 1);
    }

    #[test]
    fn prop_dedup_keeps_endpoints_and_is_idempotent(
        genomes in prop::collection::vec(0u8..3, 1..40),
    ) {
        let (world, tip) = chain_world(&genomes);
        let full = Lineage::of(world.ancestry(), tip).unwrap();

        let mut latest = full.clone();
        latest.uniq(world.ancestry()).unwrap();
        let mut earliest = full.clone();
        earliest.runiq(world.ancestry()).unwrap();

        for dedup in [&latest, &earliest] {
            prop_assert_eq!(dedup.first(), full.first());
            prop_assert_eq!(dedup.last(), full.last());
            prop_assert!(dedup.len() <= full.len());
        }

        let mut again = latest.clone();
        again.uniq(world.ancestry()).unwrap();
        prop_assert_eq!(&again, &latest);

        let mut again = earliest.clone();
        again.runiq(world.ancestry()).unwrap();
        prop_assert_eq!(&again, &earliest);
    }
}
