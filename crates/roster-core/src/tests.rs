//! Behavioural tests for `RosterStore` and the derived views.

use std::{cell::RefCell, rc::Rc};

use chrono::{Duration, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use crate::{
  Error,
  creator::{Creator, NewCreator, Niche, OutreachStatus, Platform, Tier},
  policy::{self, GuestCapacity, RosterCounts, RosterFilter},
  roster::{Change, Direction, RosterEvent, RosterStore},
};

fn payload(name: &str, followers: u64, niches: Vec<Niche>) -> NewCreator {
  let handle = format!("@{}", name.to_lowercase().replace(' ', ""));
  NewCreator::new(
    name,
    handle.clone(),
    followers,
    format!("https://instagram.com/{}", &handle[1..]),
    vec![Platform::Instagram],
    niches,
  )
}

fn store_with(capacity: usize, names: &[&str]) -> (RosterStore, Vec<Uuid>) {
  let mut store = RosterStore::new(GuestCapacity::new(capacity).expect("non-zero"));
  let ids = names
    .iter()
    .map(|name| store.create(payload(name, 5_000, vec![Niche::Food])).id)
    .collect();
  (store, ids)
}

fn rank(store: &RosterStore, id: Uuid) -> Option<u32> { store.get(id).unwrap().rank }

fn shortlist_ranks(store: &RosterStore) -> Vec<u32> {
  let mut ranks: Vec<u32> = store
    .creators()
    .iter()
    .filter(|c| c.is_shortlisted)
    .filter_map(|c| c.rank)
    .collect();
  ranks.sort_unstable();
  ranks
}

// ─── Tier ────────────────────────────────────────────────────────────────────

#[test]
fn tier_thresholds() {
  assert_eq!(policy::tier_of(0), Tier::Nano);
  assert_eq!(policy::tier_of(9_999), Tier::Nano);
  assert_eq!(policy::tier_of(10_000), Tier::Micro);
  assert_eq!(policy::tier_of(100_000), Tier::Micro);
  assert_eq!(policy::tier_of(100_001), Tier::Macro);
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[test]
fn create_inserts_newest_first_with_clean_state() {
  let mut store = RosterStore::default();
  let first = store.create(payload("Larry Herz", 150_000, vec![Niche::Lifestyle])).id;
  let second = store.create(payload("Kayla King", 12_000, vec![Niche::Food])).id;

  assert_eq!(store.creators()[0].id, second);
  assert_eq!(store.creators()[1].id, first);

  let larry = store.get(first).unwrap();
  assert_eq!(larry.tier, Tier::Macro);
  assert!(!larry.is_shortlisted && !larry.is_preselected && !larry.is_final_guest);
  assert_eq!(larry.rank, None);
  assert_eq!(larry.outreach_status, OutreachStatus::NotContacted);
  assert_eq!(larry.last_contacted_at, None);
  assert!(larry.notes.is_empty());
  assert!(larry.tags.is_empty());
}

#[test]
fn create_drops_blank_email() {
  let mut store = RosterStore::default();
  let input = NewCreator {
    email: Some("  ".into()),
    ..payload("Ryan Tag", 20_000, vec![Niche::Drinks])
  };
  assert_eq!(store.create(input).email, None);
}

#[test]
fn seed_rejects_invalid_payloads_without_inserting() {
  let mut store = RosterStore::default();
  let result = store.seed(vec![
    payload("Haley Paez", 40_000, vec![Niche::Food]),
    payload("Nameless", 40_000, vec![]),
  ]);
  assert!(matches!(result, Err(Error::Invalid(_))));
  assert!(store.creators().is_empty());
}

#[test]
fn seed_keeps_newest_first_order() {
  let mut store = RosterStore::default();
  let ids = store
    .seed(vec![
      payload("Haley Paez", 40_000, vec![Niche::Food]),
      payload("Nick Howard", 60_000, vec![Niche::Drinks]),
    ])
    .unwrap();
  assert_eq!(store.creators()[0].id, ids[1]);
  assert_eq!(store.creators()[1].id, ids[0]);
}

// ─── Shortlist ───────────────────────────────────────────────────────────────

#[test]
fn shortlist_scenario() {
  let (mut store, ids) = store_with(7, &["A", "B"]);
  let (a, b) = (ids[0], ids[1]);

  assert_eq!(store.set_shortlisted(a, true), Change::Applied);
  assert_eq!(rank(&store, a), Some(1));
  store.set_shortlisted(b, true);
  assert_eq!(rank(&store, b), Some(2));

  assert_eq!(store.reorder_shortlist(b, Direction::Up), Change::Applied);
  assert_eq!(rank(&store, b), Some(1));
  assert_eq!(rank(&store, a), Some(2));

  store.set_shortlisted(a, false);
  assert_eq!(rank(&store, a), None);
  assert_eq!(rank(&store, b), Some(1));
}

#[test]
fn shortlisting_twice_keeps_rank() {
  let (mut store, ids) = store_with(7, &["A", "B"]);
  store.set_shortlisted(ids[0], true);
  store.set_shortlisted(ids[1], true);
  let revision = store.revision();

  assert_eq!(store.set_shortlisted(ids[0], true), Change::Unchanged);
  assert_eq!(rank(&store, ids[0]), Some(1));
  assert_eq!(store.revision(), revision);
}

#[test]
fn unshortlisting_leaves_gap_until_reorder() {
  let (mut store, ids) = store_with(7, &["A", "B", "C"]);
  for id in &ids {
    store.set_shortlisted(*id, true);
  }
  store.set_shortlisted(ids[0], false);
  assert_eq!(shortlist_ranks(&store), vec![2, 3]);

  // Re-adding appends after the highest remaining rank.
  store.set_shortlisted(ids[0], true);
  assert_eq!(rank(&store, ids[0]), Some(4));

  // Boundary move still renumbers densely.
  assert_eq!(store.reorder_shortlist(ids[1], Direction::Up), Change::Applied);
  assert_eq!(shortlist_ranks(&store), vec![1, 2, 3]);
  assert_eq!(rank(&store, ids[1]), Some(1));
  assert_eq!(rank(&store, ids[2]), Some(2));
  assert_eq!(rank(&store, ids[0]), Some(3));
}

#[test]
fn reorder_at_boundaries_is_noop() {
  let (mut store, ids) = store_with(7, &["A", "B", "C"]);
  for id in &ids {
    store.set_shortlisted(*id, true);
  }

  assert_eq!(store.reorder_shortlist(ids[0], Direction::Up), Change::Unchanged);
  assert_eq!(store.reorder_shortlist(ids[2], Direction::Down), Change::Unchanged);
  assert_eq!(shortlist_ranks(&store), vec![1, 2, 3]);
  assert_eq!(rank(&store, ids[0]), Some(1));
  assert_eq!(rank(&store, ids[2]), Some(3));
}

#[test]
fn reorder_down_swaps_with_next() {
  let (mut store, ids) = store_with(7, &["A", "B", "C"]);
  for id in &ids {
    store.set_shortlisted(*id, true);
  }
  store.reorder_shortlist(ids[0], Direction::Down);

  let order: Vec<Uuid> = policy::shortlist_ordered(store.creators())
    .iter()
    .map(|c| c.id)
    .collect();
  assert_eq!(order, vec![ids[1], ids[0], ids[2]]);
}

#[test]
fn reorder_ignores_creators_off_the_shortlist() {
  let (mut store, ids) = store_with(7, &["A", "B"]);
  store.set_shortlisted(ids[0], true);

  assert_eq!(store.reorder_shortlist(ids[1], Direction::Up), Change::Unchanged);
  assert_eq!(rank(&store, ids[1]), None);
  assert_eq!(store.reorder_shortlist(Uuid::new_v4(), Direction::Up), Change::UnknownCreator);
}

// ─── Preselection ────────────────────────────────────────────────────────────

#[test]
fn preselect_is_idempotent_and_independent() {
  let (mut store, ids) = store_with(7, &["A"]);
  assert_eq!(store.set_preselected(ids[0], true), Change::Applied);
  let snapshot = store.creators().to_vec();

  assert_eq!(store.set_preselected(ids[0], true), Change::Unchanged);
  assert_eq!(store.creators(), snapshot.as_slice());

  let creator = store.get(ids[0]).unwrap();
  assert!(!creator.is_shortlisted);
  assert_eq!(creator.rank, None);
  assert!(!creator.is_final_guest);
}

// ─── Guest capacity ──────────────────────────────────────────────────────────

#[test]
fn guest_capacity_scenario() {
  let (mut store, ids) = store_with(2, &["A", "B", "C"]);
  let (a, b, c) = (ids[0], ids[1], ids[2]);

  assert_eq!(store.set_final_guest(a, true), Ok(Change::Applied));
  assert_eq!(store.set_final_guest(b, true), Ok(Change::Applied));
  assert!(policy::is_guest_capacity_reached(store.creators(), store.guest_capacity()));

  let before = store.creators().to_vec();
  assert_eq!(store.set_final_guest(c, true), Err(Error::CapacityExceeded { capacity: 2 }));
  assert_eq!(store.creators(), before.as_slice());
  assert!(!store.get(c).unwrap().is_final_guest);

  assert_eq!(store.set_final_guest(a, false), Ok(Change::Applied));
  assert_eq!(store.set_final_guest(c, true), Ok(Change::Applied));
  assert_eq!(policy::guest_count(store.creators()), 2);
}

#[test]
fn existing_guest_is_unchanged_at_capacity() {
  let (mut store, ids) = store_with(1, &["A"]);
  store.set_final_guest(ids[0], true).unwrap();
  assert_eq!(store.set_final_guest(ids[0], true), Ok(Change::Unchanged));
}

#[test]
fn unknown_guest_is_ignored() {
  let (mut store, _) = store_with(1, &["A"]);
  assert_eq!(store.set_final_guest(Uuid::new_v4(), true), Ok(Change::UnknownCreator));
}

// ─── Outreach status ─────────────────────────────────────────────────────────

#[test]
fn status_change_stamps_contact_time() {
  let (mut store, ids) = store_with(7, &["A"]);
  let id = ids[0];

  let before = Utc::now();
  store.set_outreach_status(id, OutreachStatus::MessageSent);
  let first = store.get(id).unwrap().last_contacted_at.unwrap();
  assert!(first >= before && first <= Utc::now());

  // Same status again still refreshes the timestamp.
  let later = first + Duration::hours(5);
  assert_eq!(
    store.set_outreach_status_at(id, OutreachStatus::MessageSent, later),
    Change::Applied
  );
  assert_eq!(store.get(id).unwrap().last_contacted_at, Some(later));
}

#[test]
fn status_may_move_backwards() {
  let (mut store, ids) = store_with(7, &["A"]);
  store.set_outreach_status(ids[0], OutreachStatus::Accepted);
  store.set_outreach_status(ids[0], OutreachStatus::Declined);
  store.set_outreach_status(ids[0], OutreachStatus::NotContacted);
  assert_eq!(store.get(ids[0]).unwrap().outreach_status, OutreachStatus::NotContacted);
}

#[test]
fn workflow_steps_clamp_at_ends() {
  assert_eq!(OutreachStatus::NotContacted.previous(), OutreachStatus::NotContacted);
  assert_eq!(OutreachStatus::NotContacted.next(), OutreachStatus::MessageSent);
  assert_eq!(OutreachStatus::Accepted.next(), OutreachStatus::Declined);
  assert_eq!(OutreachStatus::Declined.next(), OutreachStatus::Declined);
  assert_eq!(OutreachStatus::FollowUp.previous(), OutreachStatus::MessageSent);
}

#[test]
fn status_labels_parse_back() {
  for status in OutreachStatus::WORKFLOW {
    let parsed: OutreachStatus = status.to_string().parse().unwrap();
    assert_eq!(parsed, status);
  }
  assert_eq!("followup".parse::<OutreachStatus>(), Ok(OutreachStatus::FollowUp));
  assert_eq!("real estate".parse::<Niche>(), Ok(Niche::RealEstate));
}

// ─── Unknown ids ─────────────────────────────────────────────────────────────

#[test]
fn unknown_ids_are_silent_noops() {
  let (mut store, _) = store_with(7, &["A"]);
  let snapshot = store.creators().to_vec();
  let ghost = Uuid::new_v4();

  assert_eq!(store.set_shortlisted(ghost, true), Change::UnknownCreator);
  assert_eq!(store.set_preselected(ghost, true), Change::UnknownCreator);
  assert_eq!(store.set_outreach_status(ghost, OutreachStatus::Accepted), Change::UnknownCreator);
  assert_eq!(store.update_notes(ghost, "hello"), Change::UnknownCreator);
  assert_eq!(store.creators(), snapshot.as_slice());
}

// ─── Free-form fields ────────────────────────────────────────────────────────

#[test]
fn tags_are_trimmed_and_deduplicated() {
  let (mut store, ids) = store_with(7, &["A"]);
  let tags = ["UGC", " brunch ", "", "UGC"].map(String::from);
  assert_eq!(store.set_tags(ids[0], tags), Change::Applied);
  assert_eq!(store.get(ids[0]).unwrap().tags, vec!["UGC", "brunch"]);
}

#[test]
fn notes_do_not_touch_contact_time() {
  let (mut store, ids) = store_with(7, &["A"]);
  store.update_notes(ids[0], "met at the brunch pop-up");
  let creator = store.get(ids[0]).unwrap();
  assert_eq!(creator.notes, "met at the brunch pop-up");
  assert_eq!(creator.last_contacted_at, None);
}

// ─── Notification ────────────────────────────────────────────────────────────

#[test]
fn listeners_see_applied_changes_only() {
  let (mut store, ids) = store_with(1, &["A", "B"]);
  let seen: Rc<RefCell<Vec<RosterEvent>>> = Rc::default();
  let sink = Rc::clone(&seen);
  store.subscribe(move |event: &RosterEvent, _roster: &[Creator]| {
    sink.borrow_mut().push(event.clone());
  });

  store.set_preselected(ids[0], true);
  store.set_preselected(ids[0], true);
  store.set_final_guest(ids[0], true).unwrap();
  let _ = store.set_final_guest(ids[1], true);

  assert_eq!(*seen.borrow(), vec![
    RosterEvent::Preselected { id: ids[0], on: true },
    RosterEvent::FinalGuest { id: ids[0], on: true },
  ]);
}

#[test]
fn listener_receives_post_change_roster() {
  let (mut store, ids) = store_with(7, &["A"]);
  let guests: Rc<RefCell<Vec<usize>>> = Rc::default();
  let sink = Rc::clone(&guests);
  store.subscribe(move |_: &RosterEvent, roster: &[Creator]| {
    sink.borrow_mut().push(policy::guest_count(roster));
  });

  store.set_final_guest(ids[0], true).unwrap();
  store.set_final_guest(ids[0], false).unwrap();
  assert_eq!(*guests.borrow(), vec![1, 0]);
}

// ─── Derived views ───────────────────────────────────────────────────────────

#[test]
fn filter_combines_facets_with_and() {
  let mut store = RosterStore::default();
  store.create(payload("Haley Paez", 40_000, vec![Niche::Food, Niche::Drinks]));
  store.create(payload("Olivia Merrill", 250_000, vec![Niche::Fashion]));
  let kayla = store.create(payload("Kayla King", 8_000, vec![Niche::Food, Niche::Fitness])).id;

  let mut filter = RosterFilter::default();
  assert_eq!(policy::filter_roster(store.creators(), &filter).len(), 3);

  filter.toggle_niche(Niche::Food);
  filter.toggle_niche(Niche::Fashion);
  assert_eq!(policy::filter_roster(store.creators(), &filter).len(), 3);

  filter.toggle_tier(Tier::Nano);
  let found = policy::filter_roster(store.creators(), &filter);
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].id, kayla);

  filter.toggle_status(OutreachStatus::Accepted);
  assert!(policy::filter_roster(store.creators(), &filter).is_empty());

  filter.toggle_status(OutreachStatus::Accepted);
  filter.toggle_tier(Tier::Nano);
  filter.toggle_niche(Niche::Food);
  filter.toggle_niche(Niche::Fashion);
  assert!(filter.is_empty());
}

#[test]
fn search_matches_name_or_handle_case_insensitively() {
  let mut store = RosterStore::default();
  store.create(NewCreator {
    handle: "@milehighfooddude".into(),
    ..payload("Nick Howard", 60_000, vec![Niche::Food])
  });
  store.create(payload("Leigh Skomal", 9_000, vec![Niche::Lifestyle]));

  let filter = RosterFilter {
    text: "FOODDUDE".into(),
    ..RosterFilter::default()
  };
  let found = policy::filter_roster(store.creators(), &filter);
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].name, "Nick Howard");

  let filter = RosterFilter {
    text: "skom".into(),
    ..RosterFilter::default()
  };
  assert_eq!(policy::filter_roster(store.creators(), &filter)[0].name, "Leigh Skomal");
}

#[test]
fn counts_and_board_columns() {
  let (mut store, ids) = store_with(7, &["A", "B", "C"]);
  store.set_shortlisted(ids[0], true);
  store.set_preselected(ids[1], true);
  store.set_final_guest(ids[2], true).unwrap();
  store.set_outreach_status(ids[2], OutreachStatus::Accepted);

  assert_eq!(RosterCounts::tally(store.creators()), RosterCounts {
    total:       3,
    shortlisted: 1,
    preselected: 1,
    guests:      1,
  });

  let columns = policy::board_columns(store.creators());
  assert_eq!(columns.len(), OutreachStatus::WORKFLOW.len());
  assert_eq!(columns[0].0, OutreachStatus::NotContacted);
  assert_eq!(columns[0].1.len(), 2);
  let accepted = columns
    .iter()
    .find(|(status, _)| *status == OutreachStatus::Accepted)
    .unwrap();
  assert_eq!(accepted.1[0].id, ids[2]);
}

#[test]
fn stale_follow_ups_are_flagged() {
  let (mut store, ids) = store_with(7, &["A", "B"]);
  let now = Utc::now();
  let threshold = Duration::days(i64::from(policy::DEFAULT_FOLLOW_UP_DAYS));

  store.set_outreach_status_at(ids[0], OutreachStatus::FollowUp, now - Duration::days(4));
  store.set_outreach_status_at(ids[1], OutreachStatus::FollowUp, now - Duration::days(1));
  assert!(policy::needs_follow_up(store.get(ids[0]).unwrap(), now, threshold));
  assert!(!policy::needs_follow_up(store.get(ids[1]).unwrap(), now, threshold));

  store.set_outreach_status_at(ids[0], OutreachStatus::Responded, now - Duration::days(4));
  assert!(!policy::needs_follow_up(store.get(ids[0]).unwrap(), now, threshold));
}

#[test]
fn shortlist_ordering_puts_missing_ranks_last() {
  let (mut store, ids) = store_with(7, &["A", "B"]);
  store.set_shortlisted(ids[0], true);
  store.set_shortlisted(ids[1], true);

  let mut roster = store.creators().to_vec();
  for creator in &mut roster {
    if creator.id == ids[0] {
      creator.rank = None;
    }
  }
  let ordered = policy::shortlist_ordered(&roster);
  assert_eq!(ordered[0].id, ids[1]);
  assert_eq!(ordered[1].id, ids[0]);
}

// ─── Serialization ───────────────────────────────────────────────────────────

#[test]
fn payload_parses_with_optional_fields_missing() {
  let input: NewCreator = serde_json::from_value(serde_json::json!({
    "name": "Olivia Merrill",
    "handle": "@oliviamerrill",
    "follower_count": 250000,
    "profile_url": "https://www.youtube.com/@oliviamerrill",
    "platforms": ["youtube"],
    "niches": ["fashion", "real_estate"],
    "cost_estimate": 1500
  }))
  .unwrap();

  assert_eq!(input.platforms, vec![Platform::YouTube]);
  assert_eq!(input.niches, vec![Niche::Fashion, Niche::RealEstate]);
  assert_eq!(input.cost_estimate, Some(1500));
  assert_eq!(input.email, None);
  assert!(input.problems().is_empty());
}

#[test]
fn events_are_tagged() {
  let id = Uuid::nil();
  let value = serde_json::to_value(RosterEvent::FinalGuest { id, on: true }).unwrap();
  assert_eq!(value["event"], "final_guest");
  assert_eq!(value["on"], true);
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
  Shortlist(usize, bool),
  Reorder(usize, Direction),
  Guest(usize, bool),
}

fn op(creators: usize) -> impl Strategy<Value = Op> {
  let direction = prop_oneof![Just(Direction::Up), Just(Direction::Down)];
  prop_oneof![
    (0..creators, any::<bool>()).prop_map(|(i, on)| Op::Shortlist(i, on)),
    (0..creators, direction).prop_map(|(i, d)| Op::Reorder(i, d)),
    (0..creators, any::<bool>()).prop_map(|(i, on)| Op::Guest(i, on)),
  ]
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn ranks_stay_unique_and_reorder_makes_them_dense(
    ops in prop::collection::vec(op(6), 0..60),
  ) {
    let (mut store, ids) = store_with(3, &["A", "B", "C", "D", "E", "F"]);

    for op in ops {
      match op {
        Op::Shortlist(i, on) => { store.set_shortlisted(ids[i], on); }
        Op::Reorder(i, d) => { store.reorder_shortlist(ids[i], d); }
        Op::Guest(i, on) => { let _ = store.set_final_guest(ids[i], on); }
      }

      for c in store.creators() {
        prop_assert_eq!(c.rank.is_some(), c.is_shortlisted);
      }
      let ranks = shortlist_ranks(&store);
      let mut unique = ranks.clone();
      unique.dedup();
      prop_assert_eq!(&unique, &ranks);
      prop_assert!(policy::guest_count(store.creators()) <= 3);
    }

    if let Some(first) = policy::shortlist_ordered(store.creators()).first().map(|c| c.id) {
      store.reorder_shortlist(first, Direction::Up);
    }
    let k = store.creators().iter().filter(|c| c.is_shortlisted).count() as u32;
    prop_assert_eq!(shortlist_ranks(&store), (1..=k).collect::<Vec<_>>());
  }

  #[test]
  fn rejected_guest_leaves_roster_untouched(
    picks in prop::collection::vec(0usize..5, 1..20),
  ) {
    let (mut store, ids) = store_with(2, &["A", "B", "C", "D", "E"]);
    for i in picks {
      let before = store.creators().to_vec();
      match store.set_final_guest(ids[i], true) {
        Ok(_) => {}
        Err(Error::CapacityExceeded { capacity }) => {
          prop_assert_eq!(capacity, 2);
          prop_assert_eq!(store.creators(), before.as_slice());
        }
        Err(other) => prop_assert!(false, "unexpected error {other}"),
      }
      prop_assert!(policy::guest_count(store.creators()) <= 2);
    }
  }
}
