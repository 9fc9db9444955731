use crmpro_core::{
    select, FilterState, Lead, LeadDraft, LeadStatus, SortField, SortOrder, StatusFilter,
};
use uuid::Uuid;

#[test]
fn status_filter_keeps_only_matching_leads() {
    let leads = vec![
        lead("00000000-0000-4000-8000-000000000001", "L1", "C1", 90, LeadStatus::New),
        lead("00000000-0000-4000-8000-000000000002", "L2", "C2", 40, LeadStatus::Qualified),
    ];

    let filter = FilterState {
        status: StatusFilter::Qualified,
        ..FilterState::default()
    };
    let visible = select(&leads, &filter);

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "L2");
}

#[test]
fn score_descending_orders_high_to_low() {
    let leads = vec![
        lead("00000000-0000-4000-8000-000000000002", "L2", "C2", 40, LeadStatus::Qualified),
        lead("00000000-0000-4000-8000-000000000001", "L1", "C1", 90, LeadStatus::New),
    ];

    let filter = FilterState {
        sort_by: SortField::Score,
        sort_order: SortOrder::Desc,
        ..FilterState::default()
    };
    let ordered = select(&leads, &filter);

    assert_eq!(ordered[0].name, "L1");
    assert_eq!(ordered[1].name, "L2");
}

#[test]
fn search_matches_across_name_company_email_and_source() {
    let leads = vec![
        lead_full("00000000-0000-4000-8000-000000000001", "Ana Soler", "Solertec", "ana@solertec.example", "referral", 70),
        lead_full("00000000-0000-4000-8000-000000000002", "Bruno Vega", "Vegacorp", "bruno@vegacorp.example", "web", 60),
    ];

    for term in ["soler", "Solertec", "ana@", "referral"] {
        let filter = FilterState {
            search: term.to_string(),
            ..FilterState::default()
        };
        let visible = select(&leads, &filter);
        assert_eq!(visible.len(), 1, "term `{term}` should match exactly one");
        assert_eq!(visible[0].name, "Ana Soler");
    }
}

#[test]
fn search_is_case_and_diacritic_insensitive_both_ways() {
    let leads = vec![
        lead_full("00000000-0000-4000-8000-000000000001", "José Núñez", "Café Andino", "jose@andino.example", "event", 55),
    ];

    for term in ["jose", "JOSE", "núñez", "nunez", "cafe"] {
        let filter = FilterState {
            search: term.to_string(),
            ..FilterState::default()
        };
        assert_eq!(select(&leads, &filter).len(), 1, "term `{term}` should match");
    }
}

#[test]
fn blank_search_is_ignored() {
    let leads = vec![
        lead("00000000-0000-4000-8000-000000000001", "L1", "C1", 90, LeadStatus::New),
        lead("00000000-0000-4000-8000-000000000002", "L2", "C2", 40, LeadStatus::New),
    ];

    let filter = FilterState {
        search: "   ".to_string(),
        ..FilterState::default()
    };
    assert_eq!(select(&leads, &filter).len(), 2);
}

#[test]
fn equal_sort_keys_tie_break_by_ascending_id() {
    let leads = vec![
        lead("00000000-0000-4000-8000-000000000003", "Same", "C3", 50, LeadStatus::New),
        lead("00000000-0000-4000-8000-000000000001", "Same", "C1", 50, LeadStatus::New),
        lead("00000000-0000-4000-8000-000000000002", "Same", "C2", 50, LeadStatus::New),
    ];

    let asc = FilterState {
        sort_by: SortField::Score,
        sort_order: SortOrder::Asc,
        ..FilterState::default()
    };
    let ordered = select(&leads, &asc);
    let companies: Vec<&str> = ordered.iter().map(|l| l.company.as_str()).collect();
    assert_eq!(companies, ["C1", "C2", "C3"]);
}

#[test]
fn descending_order_reverses_the_tie_break_too() {
    let leads = vec![
        lead("00000000-0000-4000-8000-000000000001", "Same", "C1", 50, LeadStatus::New),
        lead("00000000-0000-4000-8000-000000000002", "Same", "C2", 50, LeadStatus::New),
    ];

    let desc = FilterState {
        sort_by: SortField::Score,
        sort_order: SortOrder::Desc,
        ..FilterState::default()
    };
    let ordered = select(&leads, &desc);
    let companies: Vec<&str> = ordered.iter().map(|l| l.company.as_str()).collect();
    assert_eq!(companies, ["C2", "C1"]);
}

#[test]
fn text_sort_uses_the_normalized_comparator() {
    let leads = vec![
        lead("00000000-0000-4000-8000-000000000001", "Beta", "C1", 10, LeadStatus::New),
        lead("00000000-0000-4000-8000-000000000002", "ángel", "C2", 20, LeadStatus::New),
    ];

    let filter = FilterState {
        sort_by: SortField::Name,
        sort_order: SortOrder::Asc,
        ..FilterState::default()
    };
    let ordered = select(&leads, &filter);
    assert_eq!(ordered[0].name, "ángel");
    assert_eq!(ordered[1].name, "Beta");
}

#[test]
fn select_is_deterministic_and_never_mutates_input() {
    let leads = vec![
        lead("00000000-0000-4000-8000-000000000002", "L2", "C2", 40, LeadStatus::Qualified),
        lead("00000000-0000-4000-8000-000000000001", "L1", "C1", 90, LeadStatus::New),
    ];
    let before = leads.clone();

    let filter = FilterState {
        search: "l".to_string(),
        sort_by: SortField::Name,
        sort_order: SortOrder::Asc,
        ..FilterState::default()
    };

    let first = select(&leads, &filter);
    let second = select(&leads, &filter);
    assert_eq!(first, second);
    assert_eq!(leads, before);
}

fn lead(id: &str, name: &str, company: &str, score: i64, status: LeadStatus) -> Lead {
    Lead::with_id(
        Uuid::parse_str(id).unwrap(),
        LeadDraft {
            name: name.to_string(),
            company: company.to_string(),
            email: format!("{}@example.com", company.to_lowercase()),
            source: "web".to_string(),
            score,
            status,
        },
    )
}

fn lead_full(id: &str, name: &str, company: &str, email: &str, source: &str, score: i64) -> Lead {
    Lead::with_id(
        Uuid::parse_str(id).unwrap(),
        LeadDraft {
            name: name.to_string(),
            company: company.to_string(),
            email: email.to_string(),
            source: source.to_string(),
            score,
            status: LeadStatus::New,
        },
    )
}
