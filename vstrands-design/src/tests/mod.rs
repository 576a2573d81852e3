/*
ENSnano, a 3d graphical application for DNA nanostructures.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::cadnano::*;
use super::colors::*;
use super::design_operations::*;
use super::*;

fn n(helix: usize, base: usize) -> Nucl {
    Nucl::new(helix, base)
}

/// A design with `nb_helices` helices on the first row, helix `i` being at column `i`.
fn empty_design(nb_helices: usize, num_bases: usize) -> Design {
    let mut design = Design::new(num_bases);
    for i in 0..nb_helices {
        design.add_helix(i, 0, i as isize).unwrap();
    }
    design
}

/// Link the positions `low..=high` of `helix` in the natural direction of the strand.
fn straight_segment(design: &mut Design, kind: StrandKind, helix: usize, low: usize, high: usize) {
    let goes_right = design.parity_of(helix).unwrap().goes_right(kind);
    for base in low..high {
        let left = n(helix, base);
        if goes_right {
            design.link(kind, left, left.right()).unwrap();
        } else {
            design.link(kind, left.right(), left).unwrap();
        }
    }
}

fn assert_symmetric(design: &Design) {
    design.check_symmetry(StrandKind::Scaffold).unwrap();
    design.check_symmetry(StrandKind::Staple).unwrap();
}

fn all_linkages(design: &Design, kind: StrandKind) -> Vec<Linkage> {
    design
        .helices()
        .flat_map(|h| h.strand(kind).to_vec())
        .collect()
}

fn ends(paths: &[StrandPath]) -> Vec<(Nucl, Nucl, usize)> {
    paths.iter().map(|p| (p.start(), p.end(), p.len())).collect()
}

#[test]
fn get_position_checks_bounds() {
    let design = empty_design(2, 10);
    assert!(matches!(
        design.get_position(0, 10, StrandKind::Staple),
        Err(DesignError::OutOfRange {
            helix: 0,
            base: 10,
            num_bases: 10
        })
    ));
    assert!(matches!(
        design.get_position(5, 0, StrandKind::Scaffold),
        Err(DesignError::UnknownHelix(5))
    ));
    let position = design.get_position(1, 9, StrandKind::Scaffold).unwrap();
    assert_eq!(position.prev, None);
    assert_eq!(position.next, None);
    assert_eq!(position.length(), 1);
}

#[test]
fn duplicate_helix_is_rejected() {
    let mut design = empty_design(2, 10);
    assert!(matches!(
        design.add_helix(1, 3, 3),
        Err(DesignError::DuplicateHelix(1))
    ));
}

#[test]
fn parity_of_helices() {
    let design = empty_design(3, 10);
    assert_eq!(design.parity_of(0).unwrap(), Parity::Even);
    assert_eq!(design.parity_of(1).unwrap(), Parity::Odd);
    assert_eq!(design.parity_of(2).unwrap(), Parity::Even);
    assert_eq!(Parity::from_coordinates(-1, 0), Parity::Odd);
    assert_eq!(design.polarity().len(), 3);
}

#[test]
fn set_link_stores_value_as_is() {
    let mut design = empty_design(2, 10);
    design
        .set_link(StrandKind::Staple, n(0, 3), Side::Next, Some(n(1, 3)))
        .unwrap();
    assert_eq!(
        design.linkage(StrandKind::Staple, n(1, 3)).unwrap().prev,
        None
    );
    assert!(matches!(
        design.check_symmetry(StrandKind::Staple),
        Err(DesignError::AsymmetricLink { .. })
    ));
    design
        .set_link(StrandKind::Staple, n(1, 3), Side::Prev, Some(n(0, 3)))
        .unwrap();
    assert_symmetric(&design);
    assert!(design
        .set_link(StrandKind::Staple, n(0, 4), Side::Next, Some(n(0, 12)))
        .is_err());
}

#[test]
fn link_replaces_previous_neighbours() {
    let mut design = empty_design(1, 10);
    design.link(StrandKind::Staple, n(0, 1), n(0, 2)).unwrap();
    design.link(StrandKind::Staple, n(0, 1), n(0, 5)).unwrap();
    assert_eq!(design.linkage(StrandKind::Staple, n(0, 2)).unwrap().prev, None);
    assert_eq!(
        design.linkage(StrandKind::Staple, n(0, 5)).unwrap().prev,
        Some(n(0, 1))
    );
    assert_symmetric(&design);
    assert!(matches!(
        design.link(StrandKind::Staple, n(0, 4), n(0, 4)),
        Err(DesignError::SelfLink(_))
    ));
}

#[test]
fn unlink_returns_former_neighbour() {
    let mut design = empty_design(1, 10);
    straight_segment(&mut design, StrandKind::Scaffold, 0, 2, 4);
    let partner = design
        .unlink(StrandKind::Scaffold, n(0, 3), Side::Next)
        .unwrap();
    assert_eq!(partner, Some(n(0, 4)));
    assert!(!design.is_linked(StrandKind::Scaffold, n(0, 4)).unwrap());
    assert_symmetric(&design);
}

#[test]
fn trace_scaffold_across_two_helices() {
    let mut design = empty_design(2, 10);
    straight_segment(&mut design, StrandKind::Scaffold, 0, 0, 9);
    design.link(StrandKind::Scaffold, n(0, 9), n(1, 9)).unwrap();
    straight_segment(&mut design, StrandKind::Scaffold, 1, 0, 9);
    let paths = design.trace_all(StrandKind::Scaffold).unwrap();
    assert_eq!(ends(&paths), vec![(n(0, 0), n(1, 0), 20)]);
    assert_eq!(paths[0].positions()[9], n(0, 9));
    assert_eq!(paths[0].positions()[10], n(1, 9));
    assert!(design.trace_all(StrandKind::Staple).unwrap().is_empty());
}

#[test]
fn paths_do_not_revisit_positions() {
    let design = ladder_design();
    for kind in [StrandKind::Scaffold, StrandKind::Staple] {
        let paths = design.trace_all(kind).unwrap();
        let mut seen = std::collections::HashSet::new();
        for p in paths.iter() {
            assert!(p.len() <= design.nb_helices() * design.num_bases());
            for nucl in p.iter() {
                assert!(seen.insert(*nucl), "{} visited twice", nucl);
            }
        }
    }
}

#[test]
fn circular_strands_are_detected() {
    let mut design = empty_design(1, 10);
    straight_segment(&mut design, StrandKind::Staple, 0, 2, 5);
    design.link(StrandKind::Staple, n(0, 2), n(0, 5)).unwrap();
    assert!(design.trace_all(StrandKind::Staple).unwrap().is_empty());
    assert!(matches!(
        design.trace_from(StrandKind::Staple, n(0, 5)),
        Err(DesignError::MalformedStrand { helix: 0, base: 5 })
    ));
}

#[test]
fn lasso_strand_is_malformed() {
    let mut design = empty_design(1, 10);
    let stap = StrandKind::Staple;
    design.set_link(stap, n(0, 1), Side::Next, Some(n(0, 2))).unwrap();
    design.set_link(stap, n(0, 2), Side::Prev, Some(n(0, 1))).unwrap();
    design.set_link(stap, n(0, 2), Side::Next, Some(n(0, 3))).unwrap();
    design.set_link(stap, n(0, 3), Side::Prev, Some(n(0, 2))).unwrap();
    design.set_link(stap, n(0, 3), Side::Next, Some(n(0, 2))).unwrap();
    assert!(matches!(
        design.trace_all(stap),
        Err(DesignError::MalformedStrand { helix: 0, base: 2 })
    ));
}

#[test]
fn break_then_join_restores_staples() {
    for helix in [0, 1] {
        let mut design = empty_design(2, 32);
        straight_segment(&mut design, StrandKind::Staple, helix, 0, 31);
        let before = all_linkages(&design, StrandKind::Staple);
        let repeat = Repeat::new(7, 8, 3);
        insert_break(&mut design, helix, repeat).unwrap();
        assert_symmetric(&design);
        assert_eq!(find_staples(&design).len(), 4);
        join_staple(&mut design, helix, repeat).unwrap();
        assert_symmetric(&design);
        assert_eq!(all_linkages(&design, StrandKind::Staple), before);
    }
}

#[test]
fn insert_break_depends_on_parity() {
    let mut design = empty_design(2, 16);
    straight_segment(&mut design, StrandKind::Staple, 0, 0, 15);
    straight_segment(&mut design, StrandKind::Staple, 1, 0, 15);
    insert_break(&mut design, 0, Repeat::once(7)).unwrap();
    insert_break(&mut design, 1, Repeat::once(7)).unwrap();
    let stap = StrandKind::Staple;

    let even_7 = design.get_position(0, 7, stap).unwrap();
    assert_eq!(even_7.prev, None);
    assert_eq!(even_7.next, Some(n(0, 6)));
    assert_eq!(design.get_position(0, 8, stap).unwrap().next, None);

    let odd_7 = design.get_position(1, 7, stap).unwrap();
    assert_eq!(odd_7.next, None);
    assert_eq!(odd_7.prev, Some(n(1, 6)));
    assert_eq!(design.get_position(1, 8, stap).unwrap().prev, None);

    assert_eq!(find_staples(&design), vec![n(0, 7), n(0, 15), n(1, 0), n(1, 8)]);
}

#[test]
fn operations_validate_before_mutating() {
    let mut design = empty_design(2, 16);
    straight_segment(&mut design, StrandKind::Staple, 0, 0, 15);
    let before = all_linkages(&design, StrandKind::Staple);
    assert!(matches!(
        insert_break(&mut design, 0, Repeat::new(3, 6, 3)),
        Err(DesignError::OutOfRange { base: 16, .. })
    ));
    assert_eq!(all_linkages(&design, StrandKind::Staple), before);
    assert!(matches!(
        join_staple(&mut design, 4, Repeat::once(3)),
        Err(DesignError::UnknownHelix(4))
    ));
}

#[test]
fn scaffold_break_depends_on_parity() {
    let mut design = empty_design(2, 10);
    straight_segment(&mut design, StrandKind::Scaffold, 0, 0, 9);
    straight_segment(&mut design, StrandKind::Scaffold, 1, 0, 9);
    insert_scaff_break(&mut design, 0, Repeat::once(4)).unwrap();
    insert_scaff_break(&mut design, 1, Repeat::once(4)).unwrap();
    assert_symmetric(&design);
    let paths = design.trace_all(StrandKind::Scaffold).unwrap();
    assert_eq!(
        ends(&paths),
        vec![
            (n(0, 0), n(0, 4), 5),
            (n(0, 5), n(0, 9), 5),
            (n(1, 4), n(1, 0), 5),
            (n(1, 9), n(1, 5), 5),
        ]
    );
}

#[test]
fn remove_staples_removes_fragment() {
    let mut design = empty_design(2, 16);
    straight_segment(&mut design, StrandKind::Staple, 1, 3, 7);
    straight_segment(&mut design, StrandKind::Staple, 1, 10, 14);
    assert_eq!(find_staples(&design), vec![n(1, 3), n(1, 10)]);
    remove_staples(&mut design, 1, Repeat::once(3)).unwrap();
    assert_eq!(find_staples(&design), vec![n(1, 10)]);
    for base in 3..=7 {
        assert!(!design.is_linked(StrandKind::Staple, n(1, base)).unwrap());
    }
    assert_symmetric(&design);

    // On even helices the staple is walked from its 3' end.
    straight_segment(&mut design, StrandKind::Staple, 0, 3, 7);
    assert!(find_staples(&design).contains(&n(0, 7)));
    remove_staples(&mut design, 0, Repeat::once(3)).unwrap();
    assert!(!find_staples(&design).contains(&n(0, 7)));
    assert_eq!(find_staples(&design), vec![n(1, 10)]);
    assert_symmetric(&design);
}

#[test]
fn remove_staples_follows_crossovers() {
    let mut design = empty_design(2, 16);
    straight_segment(&mut design, StrandKind::Staple, 1, 0, 3);
    design.link(StrandKind::Staple, n(1, 3), n(0, 3)).unwrap();
    straight_segment(&mut design, StrandKind::Staple, 0, 0, 3);
    straight_segment(&mut design, StrandKind::Staple, 1, 8, 12);
    remove_staples(&mut design, 1, Repeat::once(0)).unwrap();
    assert_eq!(find_staples(&design), vec![n(1, 8)]);
    assert_symmetric(&design);
}

#[test]
fn remove_all_staples_keeps_scaffold() {
    let mut design = ladder_design();
    remove_all_staples(&mut design);
    assert!(find_staples(&design).is_empty());
    assert!(all_linkages(&design, StrandKind::Staple)
        .iter()
        .all(|l| l.is_null()));
    assert_eq!(design.trace_all(StrandKind::Scaffold).unwrap().len(), 1);
}

#[test]
fn deletions_on_helices_with_scaffold_at_the_middle() {
    let mut design = empty_design(5, 128);
    straight_segment(&mut design, StrandKind::Scaffold, 1, 0, 127);
    straight_segment(&mut design, StrandKind::Scaffold, 3, 40, 90);
    straight_segment(&mut design, StrandKind::Scaffold, 4, 0, 30);
    insert_deletions(&mut design, Repeat::new(10, 48, 3)).unwrap();
    for h in 0..5 {
        for base in 0..128 {
            let expected = if (h == 1 || h == 3) && [10, 58, 106].contains(&base) {
                -1
            } else {
                0
            };
            assert_eq!(
                design
                    .get_position(h, base, StrandKind::Scaffold)
                    .unwrap()
                    .skip,
                expected,
                "helix {} base {}",
                h,
                base
            );
        }
    }
}

#[test]
fn deletions_out_of_range_leave_design_untouched() {
    let mut design = empty_design(2, 100);
    straight_segment(&mut design, StrandKind::Scaffold, 0, 0, 99);
    assert!(insert_deletions(&mut design, Repeat::new(10, 48, 3)).is_err());
    assert!(design.helix(0).unwrap().skips().iter().all(|s| *s == 0));
}

#[test]
fn scaffold_crossover_from_even_helix() {
    let mut design = empty_design(3, 10);
    straight_segment(&mut design, StrandKind::Scaffold, 0, 0, 9);
    straight_segment(&mut design, StrandKind::Scaffold, 1, 0, 9);
    insert_scaff_crossover(&mut design, 0, 1, 4).unwrap();
    assert_symmetric(&design);
    let paths = design.trace_all(StrandKind::Scaffold).unwrap();
    assert_eq!(
        ends(&paths),
        vec![(n(0, 0), n(1, 0), 10), (n(1, 9), n(0, 9), 10)]
    );
}

#[test]
fn scaffold_crossover_from_odd_helix() {
    let mut design = empty_design(3, 10);
    straight_segment(&mut design, StrandKind::Scaffold, 1, 0, 9);
    straight_segment(&mut design, StrandKind::Scaffold, 2, 0, 9);
    insert_scaff_crossover(&mut design, 1, 2, 4).unwrap();
    assert_symmetric(&design);
    let paths = design.trace_all(StrandKind::Scaffold).unwrap();
    assert_eq!(
        ends(&paths),
        vec![(n(1, 9), n(2, 9), 10), (n(2, 0), n(1, 0), 10)]
    );
}

#[test]
fn scaffold_crossover_arguments_are_checked() {
    let mut design = empty_design(2, 10);
    assert!(matches!(
        insert_scaff_crossover(&mut design, 1, 1, 4),
        Err(DesignError::SameHelix(1))
    ));
    assert!(matches!(
        insert_scaff_crossover(&mut design, 0, 1, 9),
        Err(DesignError::OutOfRange { base: 10, .. })
    ));
    assert!(all_linkages(&design, StrandKind::Scaffold)
        .iter()
        .all(|l| l.is_null()));
}

#[test]
fn force_path_merges_staples() {
    let mut design = empty_design(2, 16);
    // odd helix: staples 2 -> 5 and 10 -> 14
    straight_segment(&mut design, StrandKind::Staple, 1, 2, 5);
    straight_segment(&mut design, StrandKind::Staple, 1, 10, 14);
    force_path(&mut design, 1, 10, 5).unwrap();
    // even helix: staples 14 -> 10 and 5 -> 2
    straight_segment(&mut design, StrandKind::Staple, 0, 2, 5);
    straight_segment(&mut design, StrandKind::Staple, 0, 10, 14);
    force_path(&mut design, 0, 10, 5).unwrap();
    assert_symmetric(&design);
    let paths = design.trace_all(StrandKind::Staple).unwrap();
    assert_eq!(
        ends(&paths),
        vec![(n(0, 14), n(0, 2), 9), (n(1, 2), n(1, 14), 9)]
    );
    assert!(matches!(
        force_path(&mut design, 0, 3, 3),
        Err(DesignError::SelfLink(_))
    ));
    assert!(matches!(
        force_path(&mut design, 9, 3, 4),
        Err(DesignError::UnknownHelix(9))
    ));
}

fn crossing_staple() -> Design {
    let mut design = empty_design(2, 16);
    straight_segment(&mut design, StrandKind::Staple, 1, 0, 3);
    design.link(StrandKind::Staple, n(1, 3), n(0, 3)).unwrap();
    straight_segment(&mut design, StrandKind::Staple, 0, 0, 3);
    design
}

#[test]
fn remove_crossover_from_both_helices() {
    let design = crossing_staple();
    assert_eq!(find_staples(&design), vec![n(1, 0)]);

    let mut from_odd = design.clone();
    remove_crossover(&mut from_odd, 1, Repeat::once(3), XoverSide::Right).unwrap();
    assert_symmetric(&from_odd);
    assert_eq!(find_staples(&from_odd), vec![n(0, 3), n(1, 0)]);

    let mut from_even = design.clone();
    remove_crossover(&mut from_even, 0, Repeat::once(3), XoverSide::Right).unwrap();
    assert_symmetric(&from_even);
    assert_eq!(find_staples(&from_even), vec![n(0, 3), n(1, 0)]);
}

/// A staple going from base 8 to base 3 of helix 0, then from base 3 to base 8 of helix 1.
fn left_crossing_staple() -> Design {
    let mut design = empty_design(2, 16);
    straight_segment(&mut design, StrandKind::Staple, 0, 3, 8);
    design.link(StrandKind::Staple, n(0, 3), n(1, 3)).unwrap();
    straight_segment(&mut design, StrandKind::Staple, 1, 3, 8);
    design
}

#[test]
fn remove_left_crossover_from_even_helix() {
    let mut design = left_crossing_staple();
    assert_eq!(find_staples(&design), vec![n(0, 8)]);
    remove_crossover(&mut design, 0, Repeat::once(3), XoverSide::Left).unwrap();
    assert_symmetric(&design);
    let severed = design.linkage(StrandKind::Staple, n(0, 3)).unwrap();
    assert_eq!(severed.next, None);
    assert_eq!(severed.prev, Some(n(0, 4)));
    assert_eq!(design.linkage(StrandKind::Staple, n(1, 3)).unwrap().prev, None);
    assert_eq!(find_staples(&design), vec![n(0, 8), n(1, 3)]);
}

#[test]
fn remove_left_crossover_from_odd_helix() {
    let mut design = left_crossing_staple();
    remove_crossover(&mut design, 1, Repeat::once(3), XoverSide::Left).unwrap();
    assert_symmetric(&design);
    let severed = design.linkage(StrandKind::Staple, n(1, 3)).unwrap();
    assert_eq!(severed.prev, None);
    assert_eq!(severed.next, Some(n(1, 4)));
    assert_eq!(design.linkage(StrandKind::Staple, n(0, 3)).unwrap().next, None);
    assert_eq!(find_staples(&design), vec![n(0, 8), n(1, 3)]);
}

#[test]
fn remove_crossover_keeps_links_along_the_helix() {
    for helix in [0, 1] {
        let mut design = empty_design(2, 16);
        straight_segment(&mut design, StrandKind::Staple, helix, 0, 15);
        let before = all_linkages(&design, StrandKind::Staple);
        for side in [XoverSide::Left, XoverSide::Right] {
            remove_crossover(&mut design, helix, Repeat::new(1, 4, 3), side).unwrap();
        }
        assert_eq!(all_linkages(&design, StrandKind::Staple), before);
        assert_eq!(find_staples(&design).len(), 1);
    }
}

#[test]
fn remove_missing_crossover_is_harmless() {
    let mut design = crossing_staple();
    let before = all_linkages(&design, StrandKind::Staple);
    remove_crossover(&mut design, 1, Repeat::once(8), XoverSide::Left).unwrap();
    assert_eq!(all_linkages(&design, StrandKind::Staple), before);
}

/// Four helices of 64 bases with one scaffold snaking through all of them and one long staple per
/// helix.
fn ladder_design() -> Design {
    let mut design = empty_design(4, 64);
    for h in 0..4 {
        straight_segment(&mut design, StrandKind::Scaffold, h, 0, 63);
        straight_segment(&mut design, StrandKind::Staple, h, 0, 63);
    }
    design.link(StrandKind::Scaffold, n(0, 63), n(1, 63)).unwrap();
    design.link(StrandKind::Scaffold, n(1, 0), n(2, 0)).unwrap();
    design.link(StrandKind::Scaffold, n(2, 63), n(3, 63)).unwrap();
    design
}

#[test]
fn edits_keep_links_symmetric() {
    let mut design = ladder_design();
    assert_symmetric(&design);
    for h in 0..4 {
        insert_break(&mut design, h, Repeat::new(7, 16, 4)).unwrap();
        assert_symmetric(&design);
    }
    for h in [0, 2] {
        // staple crossovers between helices h and h + 1
        for base in [15, 47] {
            design
                .link(StrandKind::Staple, n(h + 1, base), n(h, base))
                .unwrap();
            assert_symmetric(&design);
        }
    }
    remove_crossover(&mut design, 0, Repeat::new(15, 32, 2), XoverSide::Right).unwrap();
    assert_symmetric(&design);
    for base in [15, 47] {
        assert_eq!(design.linkage(StrandKind::Staple, n(0, base)).unwrap().prev, None);
        assert_eq!(design.linkage(StrandKind::Staple, n(1, base)).unwrap().next, None);
        assert_eq!(
            design.linkage(StrandKind::Staple, n(0, base)).unwrap().next,
            Some(n(0, base - 1))
        );
    }
    join_staple(&mut design, 3, Repeat::once(23)).unwrap();
    assert_symmetric(&design);
    force_path(&mut design, 2, 5, 40).unwrap();
    assert_symmetric(&design);
    insert_scaff_crossover(&mut design, 1, 2, 30).unwrap();
    assert_symmetric(&design);
    insert_scaff_break(&mut design, 3, Repeat::once(31)).unwrap();
    assert_symmetric(&design);
    remove_staples(&mut design, 1, Repeat::once(24)).unwrap();
    assert_symmetric(&design);
    insert_deletions(&mut design, Repeat::new(10, 48, 1)).unwrap();
    assert_symmetric(&design);
    for kind in [StrandKind::Scaffold, StrandKind::Staple] {
        for path in design.trace_all(kind).unwrap() {
            assert!(path.len() <= 4 * 64);
        }
    }
}

#[test]
fn color_cycle_wraps_around() {
    assert_eq!(color_cycle(0), 13369344);
    assert_eq!(color_cycle(12), color_cycle(0));
    assert_eq!(color_cycle(4), DEFAULT_STAPLE_COLOR);
    assert_eq!(color_cycle(11), 16225054);
}

#[test]
fn length_buckets() {
    let buckets: Vec<usize> = [0, 31, 32, 40, 41, 46, 47, 48, 49, 999, 1000]
        .iter()
        .map(|l| length_bucket(*l))
        .collect();
    assert_eq!(buckets, vec![1, 1, 2, 3, 4, 4, 5, 5, 6, 6, 7]);
}

#[test]
fn palette_names() {
    assert_eq!(Palette::from_code(16204552), Some(Palette::RedOrange));
    assert_eq!(Palette::RedOrange.to_string(), "red orange");
    assert_eq!(color_name(8947848).as_deref(), Some("light gray"));
    assert_eq!(color_name(1), None);
}

fn two_staples() -> Design {
    let mut design = empty_design(2, 16);
    straight_segment(&mut design, StrandKind::Staple, 0, 2, 6);
    straight_segment(&mut design, StrandKind::Staple, 1, 3, 12);
    design
}

#[test]
fn reset_color_tags_every_staple_start() {
    let mut design = two_staples();
    design.set_staple_color(n(0, 3), 29184).unwrap();
    reset_color(&mut design).unwrap();
    assert_eq!(design.staple_color(n(0, 3)).unwrap(), None);
    assert_eq!(
        design.staple_color(n(0, 6)).unwrap(),
        Some(DEFAULT_STAPLE_COLOR)
    );
    assert_eq!(
        design.get_position(1, 3, StrandKind::Staple).unwrap().color,
        Some(DEFAULT_STAPLE_COLOR)
    );
}

#[test]
fn colors_based_on_helix_and_length() {
    let mut design = two_staples();
    color_based_on_helix(&mut design).unwrap();
    assert_eq!(design.staple_color(n(0, 6)).unwrap(), Some(color_cycle(0)));
    assert_eq!(design.staple_color(n(1, 3)).unwrap(), Some(color_cycle(1)));

    color_based_on_length(&mut design).unwrap();
    // both staples are shorter than 32 positions
    assert_eq!(design.staple_color(n(0, 6)).unwrap(), Some(color_cycle(1)));
    assert_eq!(design.staple_color(n(1, 3)).unwrap(), Some(color_cycle(1)));
}

#[test]
fn staple_length_statistics() {
    let design = two_staples();
    let lengths = staple_lengths(&design).unwrap();
    assert_eq!(
        lengths,
        vec![
            StapleLength {
                start: n(0, 6),
                length: 5
            },
            StapleLength {
                start: n(1, 3),
                length: 10
            }
        ]
    );
    let histogram = length_histogram(&design).unwrap();
    assert_eq!(histogram.get(&5), Some(&1));
    assert_eq!(histogram.get(&10), Some(&1));
    assert_eq!(histogram.len(), 2);
}

const SMALL_CADNANO: &str = r##"{
    "name": "small.json",
    "vstrands": [
        {
            "num": 0, "row": 0, "col": 0,
            "scaf": [[-1, -1, 0, 1], [0, 0, 0, 2], [0, 1, 1, 2]],
            "stap": [[-1, -1, -1, -1], [-1, -1, -1, -1], [-1, -1, -1, -1]],
            "loop": [0, 0, 0],
            "skip": [0, 0, 0],
            "scafLoop": [],
            "stapLoop": [],
            "stap_colors": []
        },
        {
            "num": 1, "row": 0, "col": 1,
            "scaf": [[1, 1, -1, -1], [1, 2, 1, 0], [0, 2, 1, 1]],
            "stap": [[-1, -1, 1, 1], [1, 0, -1, -1], [-1, -1, -1, -1]],
            "loop": [0, 0, 1],
            "skip": [0, -1, 0],
            "scafLoop": [],
            "stapLoop": [],
            "stap_colors": [[0, 1507550]]
        }
    ]
}"##;

#[test]
fn read_cadnano_file() {
    let nano = CadnanoDesign::from_json_str(SMALL_CADNANO).unwrap();
    let design = Design::from_cadnano(&nano).unwrap();
    assert_eq!(design.num_bases(), 3);
    assert_eq!(design.helix_ids().collect::<Vec<_>>(), vec![0, 1]);
    assert_symmetric(&design);
    let scaffold = design.trace_all(StrandKind::Scaffold).unwrap();
    assert_eq!(ends(&scaffold), vec![(n(0, 0), n(1, 0), 6)]);
    let position = design.get_position(1, 1, StrandKind::Scaffold).unwrap();
    assert_eq!(position.skip, -1);
    assert_eq!(position.length(), 0);
    assert_eq!(
        design.get_position(1, 2, StrandKind::Scaffold).unwrap().length(),
        2
    );
    assert_eq!(design.staple_color(n(1, 0)).unwrap(), Some(1507550));
}

#[test]
fn save_keeps_unknown_fields() {
    let mut nano = CadnanoDesign::from_json_str(SMALL_CADNANO).unwrap();
    let mut design = Design::from_cadnano(&nano).unwrap();
    insert_scaff_break(&mut design, 0, Repeat::once(0)).unwrap();
    nano.update_from(&design);
    let json = nano.to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "small.json");
    assert!(value["vstrands"][1]["scafLoop"].is_array());
    assert_eq!(value["vstrands"][0]["scaf"][0], serde_json::json!([-1, -1, -1, -1]));
    assert_eq!(value["vstrands"][0]["scaf"][1], serde_json::json!([-1, -1, 0, 2]));

    let reloaded = Design::from_cadnano(&CadnanoDesign::from_json_str(&json).unwrap()).unwrap();
    assert_eq!(
        all_linkages(&reloaded, StrandKind::Scaffold),
        all_linkages(&design, StrandKind::Scaffold)
    );
    assert_eq!(reloaded.helix(1).unwrap().skips(), &[0, -1, 0]);
}

#[test]
fn cadnano_round_trip_of_a_built_design() {
    let mut design = ladder_design();
    insert_deletions(&mut design, Repeat::new(10, 48, 1)).unwrap();
    color_based_on_helix(&mut design).unwrap();
    let json = design.to_cadnano().to_json_string().unwrap();
    let reloaded = Design::from_cadnano(&CadnanoDesign::from_json_str(&json).unwrap()).unwrap();
    for kind in [StrandKind::Scaffold, StrandKind::Staple] {
        assert_eq!(all_linkages(&reloaded, kind), all_linkages(&design, kind));
    }
    assert_eq!(find_staples(&reloaded), find_staples(&design));
    for start in find_staples(&design) {
        assert_eq!(
            reloaded.staple_color(start).unwrap(),
            design.staple_color(start).unwrap()
        );
    }
}

#[test]
fn invalid_cadnano_files() {
    let bad_pointer = SMALL_CADNANO.replace("[-1, -1, 0, 1]", "[-1, 4, 0, 1]");
    let nano = CadnanoDesign::from_json_str(&bad_pointer).unwrap();
    assert!(matches!(
        Design::from_cadnano(&nano),
        Err(CadnanoError::InvalidPointer { helix: 0, base: 0 })
    ));

    let bad_length = SMALL_CADNANO.replace("\"skip\": [0, -1, 0]", "\"skip\": [0, -1]");
    let nano = CadnanoDesign::from_json_str(&bad_length).unwrap();
    assert!(matches!(
        Design::from_cadnano(&nano),
        Err(CadnanoError::InconsistentLength { field: "skip", .. })
    ));

    let empty = CadnanoDesign::from_json_str(r#"{"name": "empty", "vstrands": []}"#).unwrap();
    assert!(matches!(
        Design::from_cadnano(&empty),
        Err(CadnanoError::EmptyDesign)
    ));
}
