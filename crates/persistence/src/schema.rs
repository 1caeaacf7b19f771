// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    participants (participant_id) {
        participant_id -> BigInt,
        name -> Text,
        sort_order -> Integer,
    }
}

diesel::table! {
    events (event_id) {
        event_id -> BigInt,
        participant_id -> BigInt,
        kind -> Text,
        start_date -> Text,
        end_date -> Text,
        created_at -> Nullable<Text>,
    }
}

diesel::joinable!(events -> participants (participant_id));

diesel::allow_tables_to_appear_in_same_query!(events, participants);
