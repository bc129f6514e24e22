#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use dispo::{
    resolve_day, AvailabilityRule, FindingKind, OwnerId, Polarity, ResolveError,
    ResolvedInterval, Resolver,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn coach() -> OwnerId {
    OwnerId::new("coach-1")
}

/// Lundis 9h-17h sur tout octobre 2025 (2025-10-06 est un lundi).
fn monday_nine_to_five() -> AvailabilityRule {
    AvailabilityRule::periodicity(
        coach(),
        Polarity::Available,
        d(2025, 10, 1),
        d(2025, 10, 31),
        t(9, 0),
        t(17, 0),
        vec![1],
    )
}

#[test]
fn periodicity_rule_matches_its_weekday_only() {
    let rules = vec![monday_nine_to_five()];

    let monday = resolve_day(&rules, &coach(), d(2025, 10, 6));
    assert_eq!(monday, vec![ResolvedInterval::new(540, 1020)]);

    let tuesday = resolve_day(&rules, &coach(), d(2025, 10, 7));
    assert!(tuesday.is_empty());
}

#[test]
fn lunch_break_splits_the_window() {
    let rules = vec![
        monday_nine_to_five(),
        AvailabilityRule::range(
            coach(),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(12, 0),
            t(13, 0),
        ),
    ];

    let windows = resolve_day(&rules, &coach(), d(2025, 10, 6));
    assert_eq!(
        windows,
        vec![
            ResolvedInterval::new(540, 720),
            ResolvedInterval::new(780, 1020),
        ]
    );
}

#[test]
fn unavailability_overflowing_the_window_trims_the_tail() {
    let rules = vec![
        monday_nine_to_five(),
        AvailabilityRule::range(
            coach(),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(14, 0),
            t(18, 0),
        ),
    ];

    let windows = resolve_day(&rules, &coach(), d(2025, 10, 6));
    assert_eq!(windows, vec![ResolvedInterval::new(540, 840)]);
}

#[test]
fn unavailability_alone_never_creates_open_time() {
    let rules = vec![AvailabilityRule::range(
        coach(),
        Polarity::Unavailable,
        d(2025, 10, 1),
        d(2025, 10, 31),
        t(9, 0),
        t(17, 0),
    )];

    assert!(resolve_day(&rules, &coach(), d(2025, 10, 6)).is_empty());
}

#[test]
fn two_unavailabilities_applied_in_sequence() {
    let rules = vec![
        AvailabilityRule::range(
            coach(),
            Polarity::Available,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(9, 0),
            t(17, 0),
        ),
        AvailabilityRule::range(
            coach(),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(10, 0),
            t(11, 0),
        ),
        AvailabilityRule::range(
            coach(),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(15, 0),
            t(16, 0),
        ),
    ];

    let windows = resolve_day(&rules, &coach(), d(2025, 10, 6));
    assert_eq!(
        windows,
        vec![
            ResolvedInterval::new(540, 600),
            ResolvedInterval::new(660, 900),
            ResolvedInterval::new(960, 1020),
        ]
    );

    // sortie triée, fenêtres disjointes
    for pair in windows.windows(2) {
        if let [a, b] = pair {
            assert!(a.start_minute < a.end_minute);
            assert!(a.end_minute <= b.start_minute);
        }
    }
}

#[test]
fn subtraction_never_adds_time() {
    // Fermeture débordant avant l'ouverture : seule la tête est rognée,
    // rien n'apparaît hors de la fenêtre 9h-17h.
    let rules = vec![
        monday_nine_to_five(),
        AvailabilityRule::range(
            coach(),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(8, 0),
            t(9, 30),
        ),
    ];

    let windows = resolve_day(&rules, &coach(), d(2025, 10, 6));
    assert_eq!(windows, vec![ResolvedInterval::new(570, 1020)]);
    for win in &windows {
        assert!(win.start_minute >= 540 && win.end_minute <= 1020);
    }
}

#[test]
fn inverted_date_range_matches_nothing() {
    let rules = vec![AvailabilityRule::range(
        coach(),
        Polarity::Available,
        d(2025, 10, 31),
        d(2025, 10, 1),
        t(9, 0),
        t(17, 0),
    )];

    assert!(resolve_day(&rules, &coach(), d(2025, 10, 6)).is_empty());
    assert!(resolve_day(&rules, &coach(), d(2025, 10, 15)).is_empty());
}

#[test]
fn inverted_time_range_contributes_nothing() {
    // Règle d'ouverture vide : aucun temps ouvert.
    let empty_open = vec![AvailabilityRule::range(
        coach(),
        Polarity::Available,
        d(2025, 10, 6),
        d(2025, 10, 6),
        t(17, 0),
        t(9, 0),
    )];
    assert!(resolve_day(&empty_open, &coach(), d(2025, 10, 6)).is_empty());

    // Règle de fermeture vide : ne soustrait rien.
    let rules = vec![
        monday_nine_to_five(),
        AvailabilityRule::range(
            coach(),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(13, 0),
            t(12, 0),
        ),
    ];
    assert_eq!(
        resolve_day(&rules, &coach(), d(2025, 10, 6)),
        vec![ResolvedInterval::new(540, 1020)]
    );
}

#[test]
fn rules_of_other_owners_are_ignored() {
    let rules = vec![
        monday_nine_to_five(),
        AvailabilityRule::range(
            OwnerId::new("coach-2"),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(9, 0),
            t(17, 0),
        ),
    ];

    // la fermeture de coach-2 ne rogne pas le lundi de coach-1
    assert_eq!(
        resolve_day(&rules, &coach(), d(2025, 10, 6)),
        vec![ResolvedInterval::new(540, 1020)]
    );
    assert!(resolve_day(&rules, &OwnerId::new("coach-2"), d(2025, 10, 6)).is_empty());
}

#[test]
fn single_day_range_is_inclusive_on_both_bounds() {
    let rules = vec![AvailabilityRule::range(
        coach(),
        Polarity::Available,
        d(2025, 10, 15),
        d(2025, 10, 15),
        t(9, 0),
        t(10, 0),
    )];

    assert_eq!(
        resolve_day(&rules, &coach(), d(2025, 10, 15)),
        vec![ResolvedInterval::new(540, 600)]
    );
    assert!(resolve_day(&rules, &coach(), d(2025, 10, 14)).is_empty());
    assert!(resolve_day(&rules, &coach(), d(2025, 10, 16)).is_empty());
}

#[test]
fn overlapping_available_rules_stay_a_multiset() {
    // Deux ouvertures identiques : pas de fusion avant soustraction,
    // chaque copie survit indépendamment.
    let rules = vec![
        monday_nine_to_five(),
        monday_nine_to_five(),
        AvailabilityRule::range(
            coach(),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(12, 0),
            t(13, 0),
        ),
    ];

    let windows = resolve_day(&rules, &coach(), d(2025, 10, 6));
    assert_eq!(
        windows,
        vec![
            ResolvedInterval::new(540, 720),
            ResolvedInterval::new(540, 720),
            ResolvedInterval::new(780, 1020),
            ResolvedInterval::new(780, 1020),
        ]
    );
}

#[test]
fn resolution_is_idempotent() {
    let rules = vec![
        monday_nine_to_five(),
        AvailabilityRule::range(
            coach(),
            Polarity::Unavailable,
            d(2025, 10, 6),
            d(2025, 10, 6),
            t(12, 0),
            t(13, 0),
        ),
    ];

    let first = resolve_day(&rules, &coach(), d(2025, 10, 6));
    let second = resolve_day(&rules, &coach(), d(2025, 10, 6));
    assert_eq!(first, second);
}

#[test]
fn resolve_span_walks_each_day_inclusive() {
    let mut resolver = Resolver::new();
    resolver.add_rule(monday_nine_to_five());

    let days = resolver
        .resolve_span(&coach(), d(2025, 10, 6), d(2025, 10, 8))
        .unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0].1, vec![ResolvedInterval::new(540, 1020)]);
    assert!(days[1].1.is_empty());
    assert!(days[2].1.is_empty());

    let err = resolver
        .resolve_span(&coach(), d(2025, 10, 8), d(2025, 10, 6))
        .unwrap_err();
    assert!(matches!(err, ResolveError::InvalidDateRange));
}

#[test]
fn audit_reports_degenerate_rules() {
    let mut resolver = Resolver::new();
    let empty_time = resolver.add_rule(AvailabilityRule::range(
        coach(),
        Polarity::Available,
        d(2025, 10, 1),
        d(2025, 10, 31),
        t(17, 0),
        t(9, 0),
    ));
    let inverted_dates = resolver.add_rule(AvailabilityRule::range(
        coach(),
        Polarity::Available,
        d(2025, 10, 31),
        d(2025, 10, 1),
        t(9, 0),
        t(17, 0),
    ));
    let no_days = resolver.add_rule(AvailabilityRule::periodicity(
        coach(),
        Polarity::Available,
        d(2025, 10, 1),
        d(2025, 10, 31),
        t(9, 0),
        t(17, 0),
        Vec::new(),
    ));
    let bad_day = resolver.add_rule(AvailabilityRule::periodicity(
        coach(),
        Polarity::Available,
        d(2025, 10, 1),
        d(2025, 10, 31),
        t(9, 0),
        t(17, 0),
        vec![7],
    ));

    let findings = resolver.audit();
    let kinds_of = |id: &dispo::RuleId| {
        findings
            .iter()
            .filter(|f| &f.rule == id)
            .map(|f| f.kind.clone())
            .collect::<Vec<_>>()
    };

    assert_eq!(kinds_of(&empty_time), vec![FindingKind::EmptyTimeRange]);
    assert_eq!(
        kinds_of(&inverted_dates),
        vec![FindingKind::UnmatchableDateRange]
    );
    assert_eq!(kinds_of(&no_days), vec![FindingKind::MissingDaysOfWeek]);
    assert_eq!(kinds_of(&bad_day), vec![FindingKind::InvalidWeekday]);
}

#[test]
fn audit_reports_shadowed_rule() {
    let mut resolver = Resolver::new();
    let open = resolver.add_rule(monday_nine_to_five());
    resolver.add_rule(AvailabilityRule::range(
        coach(),
        Polarity::Unavailable,
        d(2025, 9, 1),
        d(2025, 11, 30),
        t(8, 0),
        t(18, 0),
    ));

    let findings = resolver.audit();
    assert!(findings
        .iter()
        .any(|f| f.rule == open && f.kind == FindingKind::ShadowedRule));

    // et le jour résolu est bien vide
    assert!(resolver.resolve_day(&coach(), d(2025, 10, 6)).is_empty());
}

#[test]
fn remove_rule_unknown_id_is_an_error() {
    let mut resolver = Resolver::new();
    let id = resolver.add_rule(monday_nine_to_five());
    assert!(resolver.book().find_rule(&id).is_some());

    resolver.remove_rule(&id).unwrap();
    assert!(resolver.book().find_rule(&id).is_none());
    assert!(resolver.book().rules.is_empty());

    let err = resolver.remove_rule(&id).unwrap_err();
    assert!(matches!(err, ResolveError::UnknownRule(_)));
}
