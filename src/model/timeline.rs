entity! {
    /// State of one participant at one frame; `champion_stats`, `damage_stats`
    /// and `position` are flattened into the row.
    pub struct TimelineParticipantFrame in "timeline_participants" references "matches" (game_id) {
        key {
            game_id: i64,
            participant_id: i64,
            timestamp: i64,
        }
        fields {
            ability_haste: i64,
            ability_power: i64,
            armor: i64,
            armor_pen: i64,
            armor_pen_percent: i64,
            attack_damage: i64,
            attack_speed: i64,
            bonus_armor_pen_percent: i64,
            bonus_magic_pen_percent: i64,
            cc_reduction: i64,
            cooldown_reduction: i64,
            health: i64,
            health_max: i64,
            health_regen: i64,
            lifesteal: i64,
            magic_pen: i64,
            magic_pen_percent: i64,
            magic_resist: i64,
            movement_speed: i64,
            omnivamp: i64,
            physical_vamp: i64,
            power: i64,
            power_max: i64,
            power_regen: i64,
            spell_vamp: i64,
            magic_damage_done: i64,
            magic_damage_done_to_champions: i64,
            magic_damage_taken: i64,
            physical_damage_done: i64,
            physical_damage_done_to_champions: i64,
            physical_damage_taken: i64,
            total_damage_done: i64,
            total_damage_done_to_champions: i64,
            total_damage_taken: i64,
            true_damage_done: i64,
            true_damage_done_to_champions: i64,
            true_damage_taken: i64,
            x: i64,
            y: i64,
            current_gold: i64,
            gold_per_second: i64,
            jungle_minions_killed: i64,
            level: i64,
            minions_killed: i64,
            time_enemy_spent_controlled: i64,
            total_gold: i64,
            xp: i64,
        }
    }
}

entity! {
    /// A timeline event reduced to who caused it and when. `timeframe` is the
    /// enclosing frame's timestamp and `sequence` the event's index in that frame.
    pub struct TimelineEvent in "timeline_events" references "matches" (game_id) {
        key {
            game_id: i64,
            timeframe: i64,
            sequence: i64,
        }
        fields {
            kind: String,
            participant_id: Option<i64>,
            timestamp: i64,
        }
    }
}
