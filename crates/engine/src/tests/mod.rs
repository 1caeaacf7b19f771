// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod assignment_tests;
mod statistics_tests;

use duty_rota_domain::Participant;
use duty_rota_persistence::EventStore;

/// Creates an in-memory store pre-populated with the given roster, in order.
pub fn create_store_with_roster(names: &[&str]) -> (EventStore, Vec<Participant>) {
    let mut store: EventStore = EventStore::new_in_memory().expect("in-memory store");
    let roster: Vec<Participant> = names
        .iter()
        .map(|name| store.add_participant(name).expect("add participant"))
        .collect();
    (store, roster)
}
