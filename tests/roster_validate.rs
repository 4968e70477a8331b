use scorereel::{parse_roster, validate_roster};

#[test]
fn fixture_validates_and_reorders() {
    let s = include_str!("data/top_goals.json");
    let roster = parse_roster(s, 30).unwrap();

    let ranks: Vec<u32> = roster.players.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(roster.leader().unwrap().name, "Thierry Henry");
    assert_eq!(roster.leader().unwrap().goals, 228);
}

#[test]
fn fixture_with_one_broken_entry_fails_entirely() {
    let s = include_str!("data/top_goals.json");
    let mut raw: serde_json::Value = serde_json::from_str(s).unwrap();
    raw.as_array_mut().unwrap()[2]
        .as_object_mut()
        .unwrap()
        .remove("image_url");

    let err = validate_roster(&raw).unwrap_err();
    assert!(err.to_string().contains("$[2].image_url"));
}

#[test]
fn display_count_keeps_the_top_of_the_list() {
    let s = include_str!("data/top_goals.json");
    let roster = parse_roster(s, 4).unwrap();
    assert_eq!(roster.len(), 4);
    assert_eq!(roster.players[0].rank, 1);
    assert_eq!(roster.players[3].rank, 4);
}
