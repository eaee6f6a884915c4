//! Exclusion and shift-to-residuary decisions, checked stage by stage.

use mirath_engine::EngineConfig;
use mirath_engine::allocator;
use mirath_engine::hajb::{self, Resolution, Standing};
use mirath_engine::present::PresentHeirs;
use mirath_engine::registry::{self, Condition, PrecedenceClass};
use mirath_types::{Fraction, Gender, Heir, HeirEntry};

fn resolve(deceased: Gender, heirs: &[(Heir, u32)]) -> Resolution {
    let entries: Vec<HeirEntry> = heirs
        .iter()
        .map(|&(heir, count)| HeirEntry::new(heir, count))
        .collect();
    let present = PresentHeirs::from_entries(&entries, deceased, &EngineConfig::default()).unwrap();
    hajb::resolve(&present)
}

fn is_excluded(resolution: &Resolution, heir: Heir) -> bool {
    resolution.excluded.iter().any(|entry| entry.heir == heir)
}

fn standing(resolution: &Resolution, heir: Heir) -> Standing {
    resolution
        .eligible
        .iter()
        .find(|e| e.heir == heir)
        .map(|e| e.standing)
        .unwrap()
}

// ── Registry ────────────────────────────────────────────────────

#[test]
fn precedence_classes() {
    assert_eq!(registry::lookup(Heir::Husband).class, PrecedenceClass::Quranic);
    assert_eq!(registry::lookup(Heir::Son).class, PrecedenceClass::ResiduaryAgnate);
    assert_eq!(registry::lookup(Heir::MaternalSister).class, PrecedenceClass::UterineKin);
}

#[test]
fn residuary_weights_favour_males() {
    assert_eq!(registry::lookup(Heir::Son).residuary_weight, 2);
    assert_eq!(registry::lookup(Heir::Daughter).residuary_weight, 1);
    assert_eq!(registry::lookup(Heir::FullBrother).residuary_weight, 2);
    assert_eq!(registry::lookup(Heir::FullSister).residuary_weight, 1);
    assert_eq!(registry::lookup(Heir::Mother).residuary_weight, 0);
}

#[test]
fn label_lookup_accepts_aliases() {
    let rule = registry::lookup_label("grandson", Gender::Male).unwrap();
    assert_eq!(rule.heir, Heir::SonsSon);
    let rule = registry::lookup_label("FULL_BROTHER", Gender::Female).unwrap();
    assert_eq!(rule.heir, Heir::FullBrother);
}

#[test]
fn conditions_count_across_categories() {
    let present = PresentHeirs::from_entries(
        &[
            HeirEntry::new(Heir::FullSister, 1),
            HeirEntry::new(Heir::MaternalBrother, 1),
        ],
        Gender::Male,
        &EngineConfig::default(),
    )
    .unwrap();
    let siblings = Condition::TotalAtLeast(&[Heir::FullSister, Heir::MaternalBrother], 2);
    assert!(siblings.holds(&present));
    assert!(!Condition::AtLeast(Heir::FullSister, 2).holds(&present));
    assert!(Condition::Not(&Condition::Present(Heir::Son)).holds(&present));
}

// ── Exclusion ───────────────────────────────────────────────────

#[test]
fn son_excludes_grandchildren() {
    let resolution = resolve(
        Gender::Male,
        &[(Heir::Son, 1), (Heir::SonsSon, 2), (Heir::SonsDaughter, 1)],
    );
    assert!(is_excluded(&resolution, Heir::SonsSon));
    assert!(is_excluded(&resolution, Heir::SonsDaughter));
}

#[test]
fn exclusion_is_one_pass() {
    // Son's Son is himself excluded by Son but still closes the brothers.
    let resolution = resolve(
        Gender::Male,
        &[(Heir::Son, 1), (Heir::SonsSon, 1), (Heir::FullBrother, 1)],
    );
    assert!(is_excluded(&resolution, Heir::SonsSon));
    assert!(is_excluded(&resolution, Heir::FullBrother));
}

#[test]
fn grandfather_steps_aside_for_father() {
    let resolution = resolve(
        Gender::Male,
        &[(Heir::Father, 1), (Heir::PaternalGrandfather, 1), (Heir::MaternalGrandmother, 1)],
    );
    assert!(is_excluded(&resolution, Heir::PaternalGrandfather));
    assert!(!is_excluded(&resolution, Heir::MaternalGrandmother));
}

#[test]
fn grandfather_excludes_brothers() {
    let resolution = resolve(
        Gender::Female,
        &[(Heir::PaternalGrandfather, 1), (Heir::FullBrother, 1), (Heir::PaternalSister, 1)],
    );
    assert!(is_excluded(&resolution, Heir::FullBrother));
    assert!(is_excluded(&resolution, Heir::PaternalSister));
}

#[test]
fn paternal_sister_excluded_by_two_full_sisters() {
    let resolution = resolve(Gender::Male, &[(Heir::FullSister, 2), (Heir::PaternalSister, 1)]);
    assert!(is_excluded(&resolution, Heir::PaternalSister));
}

#[test]
fn paternal_brother_rescues_paternal_sister() {
    let resolution = resolve(
        Gender::Male,
        &[(Heir::FullSister, 2), (Heir::PaternalSister, 1), (Heir::PaternalBrother, 1)],
    );
    assert!(!is_excluded(&resolution, Heir::PaternalSister));
    assert_eq!(standing(&resolution, Heir::PaternalSister), Standing::Residuary);
    assert_eq!(standing(&resolution, Heir::PaternalBrother), Standing::Residuary);
}

#[test]
fn residuary_full_sister_excludes_paternal_brother() {
    let resolution = resolve(
        Gender::Male,
        &[(Heir::Daughter, 1), (Heir::FullSister, 1), (Heir::PaternalBrother, 1)],
    );
    assert!(is_excluded(&resolution, Heir::PaternalBrother));
}

#[test]
fn uterine_siblings_excluded_by_any_descendant() {
    let resolution = resolve(
        Gender::Female,
        &[(Heir::SonsDaughter, 1), (Heir::MaternalBrother, 1), (Heir::MaternalSister, 1)],
    );
    assert!(is_excluded(&resolution, Heir::MaternalBrother));
    assert!(is_excluded(&resolution, Heir::MaternalSister));
}

#[test]
fn agnate_chain_keeps_only_the_nearest() {
    let resolution = resolve(
        Gender::Male,
        &[
            (Heir::PaternalBrothersSon, 1),
            (Heir::FullPaternalUncle, 1),
            (Heir::PaternalPaternalUncle, 1),
            (Heir::FullCousin, 1),
            (Heir::PaternalCousin, 1),
        ],
    );
    assert_eq!(resolution.eligible.len(), 1);
    assert_eq!(resolution.eligible[0].heir, Heir::PaternalBrothersSon);
    assert_eq!(resolution.excluded.len(), 4);
}

#[test]
fn core_heirs_are_never_excluded() {
    let resolution = resolve(
        Gender::Female,
        &[
            (Heir::Husband, 1),
            (Heir::Son, 1),
            (Heir::Daughter, 1),
            (Heir::Father, 1),
            (Heir::Mother, 1),
        ],
    );
    assert!(resolution.excluded.is_empty());
}

// ── Standing ────────────────────────────────────────────────────

#[test]
fn daughter_shifts_beside_a_son() {
    let resolution = resolve(Gender::Male, &[(Heir::Son, 1), (Heir::Daughter, 1)]);
    let daughter = resolution.eligible.iter().find(|e| e.heir == Heir::Daughter).unwrap();
    assert_eq!(daughter.standing, Standing::Residuary);
    assert!(daughter.is_shifted());
    let son = resolution.eligible.iter().find(|e| e.heir == Heir::Son).unwrap();
    assert!(!son.is_shifted());
}

#[test]
fn father_standing_depends_on_descendants() {
    let alone = resolve(Gender::Male, &[(Heir::Father, 1)]);
    assert_eq!(standing(&alone, Heir::Father), Standing::Residuary);

    let with_daughter = resolve(Gender::Male, &[(Heir::Father, 1), (Heir::Daughter, 1)]);
    assert_eq!(standing(&with_daughter, Heir::Father), Standing::FixedAndResiduary);

    let with_son = resolve(Gender::Male, &[(Heir::Father, 1), (Heir::Son, 1)]);
    assert_eq!(standing(&with_son, Heir::Father), Standing::Fixed);
}

// ── Fixed shares ────────────────────────────────────────────────

#[test]
fn shifted_heirs_get_no_fixed_share() {
    let resolution = resolve(Gender::Male, &[(Heir::Son, 1), (Heir::Daughter, 3), (Heir::Wife, 1)]);
    let fixed = allocator::allocate(&resolution).unwrap();
    assert_eq!(fixed.shares.len(), 1);
    assert_eq!(fixed.fraction_for(Heir::Wife), Fraction::new(1, 8));
    assert_eq!(fixed.fraction_for(Heir::Daughter), Fraction::ZERO);
}

#[test]
fn fixed_total_may_exceed_one() {
    let resolution = resolve(
        Gender::Female,
        &[(Heir::Husband, 1), (Heir::FullSister, 2), (Heir::Mother, 1)],
    );
    let fixed = allocator::allocate(&resolution).unwrap();
    // 1/2 + 2/3 + 1/6
    assert_eq!(fixed.total, Fraction::new(4, 3));
}

#[test]
fn uterine_share_is_per_head() {
    let resolution = resolve(Gender::Male, &[(Heir::MaternalBrother, 3), (Heir::MaternalSister, 1)]);
    let fixed = allocator::allocate(&resolution).unwrap();
    assert_eq!(fixed.fraction_for(Heir::MaternalBrother), Fraction::new(1, 4));
    assert_eq!(fixed.fraction_for(Heir::MaternalSister), Fraction::new(1, 12));
    assert_eq!(fixed.total, Fraction::new(1, 3));
}
